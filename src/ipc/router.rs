use super::error::err;
use super::handlers;
use super::types::{AppState, Request};

pub async fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    if let Some(resp) = handlers::core::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::shell::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::programs::try_handle(state, &req).await {
        return resp;
    }
    if let Some(resp) = handlers::levels::try_handle(state, &req).await {
        return resp;
    }
    if let Some(resp) = handlers::students::try_handle(state, &req).await {
        return resp;
    }

    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
