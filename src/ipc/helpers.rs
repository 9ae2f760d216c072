use super::error::err;
use super::types::Request;

/// A non-empty string param, or the `bad_params` response to send back.
pub fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {key}"), None))
}

pub fn required_bool(req: &Request, key: &str) -> Result<bool, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_bool())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {key}"), None))
}

/// An optional string param. Present-but-empty comes through as empty, which
/// the filter handlers use to mean "clear this filter".
pub fn opt_str(req: &Request, key: &str) -> Option<String> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
}

pub fn opt_i64(req: &Request, key: &str) -> Option<i64> {
    req.params.get(key).and_then(|v| v.as_i64())
}
