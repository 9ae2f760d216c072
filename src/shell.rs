use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// Process-wide UI chrome preferences. Initialized at startup, no teardown,
/// and deliberately kept apart from the entity pages: nothing here can touch
/// a CRUD flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellState {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            sidebar_collapsed: false,
        }
    }
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }
}
