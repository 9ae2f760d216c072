use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "backend": state.backend_name,
        }),
    )
}

fn handle_notifications_drain(state: &mut AppState, req: &Request) -> serde_json::Value {
    let notices = state.notifier.drain();
    ok(&req.id, json!({ "notices": notices }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "notifications.drain" => Some(handle_notifications_drain(state, req)),
        _ => None,
    }
}
