use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{required_bool, required_str};
use crate::ipc::types::{AppState, Request};
use crate::shell::Theme;

fn shell_value(state: &AppState) -> serde_json::Value {
    json!({ "shell": state.shell })
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, shell_value(state))
}

fn handle_theme_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let raw = match required_str(req, "theme") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(theme) = Theme::parse(&raw) else {
        return err(&req.id, "bad_params", format!("unknown theme: {raw}"), None);
    };
    state.shell.theme = theme;
    ok(&req.id, shell_value(state))
}

fn handle_sidebar_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let collapsed = match required_bool(req, "collapsed") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    state.shell.sidebar_collapsed = collapsed;
    ok(&req.id, shell_value(state))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "shell.get" => Some(handle_get(state, req)),
        "shell.themeSet" => Some(handle_theme_set(state, req)),
        "shell.sidebarSet" => Some(handle_sidebar_set(state, req)),
        _ => None,
    }
}
