use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::{fixture, ApiError, ApiResult, RecordsBackend};
use crate::model::{Level, LevelPayload, Program, ProgramPayload, ProgramType, Student};

/// Live client for the v2 records API. Base address and bearer token come
/// from configuration at startup; nothing is compiled in.
pub struct RemoteBackend {
    http: reqwest::Client,
    base_url: String,
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

async fn rejection(resp: reqwest::Response) -> ApiError {
    let status = resp.status();
    let message = match resp.text().await {
        Ok(body) => {
            // Prefer the server's structured error message when it sent one.
            serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .and_then(|m| m.as_str())
                        .map(|m| m.to_string())
                })
                .unwrap_or_else(|| {
                    if body.trim().is_empty() {
                        status_line(status)
                    } else {
                        body
                    }
                })
        }
        Err(_) => status_line(status),
    };
    ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
}

fn status_line(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

impl RemoteBackend {
    pub fn new(base_url: &str, token: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn recv<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ApiResult<T> {
        let resp = req.send().await.map_err(transport)?;
        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }
        resp.json::<T>().await.map_err(transport)
    }

    async fn recv_unit(&self, req: reqwest::RequestBuilder) -> ApiResult<()> {
        let resp = req.send().await.map_err(transport)?;
        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordsBackend for RemoteBackend {
    async fn programs_list(&self) -> ApiResult<Vec<Program>> {
        self.recv(self.http.get(self.url("/v2/programs"))).await
    }

    async fn program_get(&self, id: &str) -> ApiResult<Program> {
        self.recv(self.http.get(self.url(&format!("/v2/programs/{id}"))))
            .await
    }

    async fn program_create(&self, payload: &ProgramPayload) -> ApiResult<Program> {
        self.recv(self.http.post(self.url("/v2/programs")).json(payload))
            .await
    }

    async fn program_update(&self, id: &str, payload: &ProgramPayload) -> ApiResult<Program> {
        self.recv(
            self.http
                .patch(self.url(&format!("/v2/programs/{id}")))
                .json(payload),
        )
        .await
    }

    async fn program_delete(&self, id: &str) -> ApiResult<()> {
        self.recv_unit(self.http.delete(self.url(&format!("/v2/programs/{id}"))))
            .await
    }

    async fn program_types_list(&self) -> ApiResult<Vec<ProgramType>> {
        self.recv(self.http.get(self.url("/v2/program-types"))).await
    }

    async fn levels_list(&self) -> ApiResult<Vec<Level>> {
        self.recv(self.http.get(self.url("/v2/levels"))).await
    }

    async fn level_get(&self, id: &str) -> ApiResult<Level> {
        self.recv(self.http.get(self.url(&format!("/v2/levels/{id}"))))
            .await
    }

    async fn level_create(&self, payload: &LevelPayload) -> ApiResult<Level> {
        self.recv(self.http.post(self.url("/v2/levels")).json(payload))
            .await
    }

    async fn level_update(&self, id: &str, payload: &LevelPayload) -> ApiResult<Level> {
        self.recv(
            self.http
                .patch(self.url(&format!("/v2/levels/{id}")))
                .json(payload),
        )
        .await
    }

    async fn level_delete(&self, id: &str) -> ApiResult<()> {
        self.recv_unit(self.http.delete(self.url(&format!("/v2/levels/{id}"))))
            .await
    }

    async fn students_list(&self) -> ApiResult<Vec<Student>> {
        // No student endpoints in the v2 API yet; serve the shared fixture.
        Ok(fixture::student_fixture())
    }
}
