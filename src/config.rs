use anyhow::bail;

use crate::api::{FixtureBackend, RecordsBackend, RemoteBackend};

pub const ENV_BASE_URL: &str = "SUPADMIN_API_BASE_URL";
pub const ENV_TOKEN: &str = "SUPADMIN_API_TOKEN";

/// Startup configuration, read once from the environment. Without a base URL
/// the sidecar runs entirely on the in-memory fixture backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub token: String,
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env_nonempty(ENV_BASE_URL);
        let token = env_nonempty(ENV_TOKEN);

        let remote = match (base_url, token) {
            (Some(base_url), Some(token)) => Some(RemoteConfig { base_url, token }),
            (None, _) => None,
            (Some(_), None) => {
                bail!("{ENV_BASE_URL} is set but {ENV_TOKEN} is missing");
            }
        };
        Ok(Self { remote })
    }

    pub fn backend_name(&self) -> &'static str {
        if self.remote.is_some() {
            "remote"
        } else {
            "fixture"
        }
    }

    pub fn build_backend(&self) -> anyhow::Result<Box<dyn RecordsBackend + Send + Sync>> {
        match &self.remote {
            Some(remote) => Ok(Box::new(RemoteBackend::new(&remote.base_url, &remote.token)?)),
            None => Ok(Box::new(FixtureBackend::new())),
        }
    }
}
