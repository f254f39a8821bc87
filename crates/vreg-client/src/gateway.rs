//! Authenticated request gateway
//!
//! Every API call funnels through here. The gateway resolves the active
//! session, attaches its bearer token, and on a 401 refreshes the access
//! token and resends the request exactly once. Requests are described as
//! rebuildable values so the resend can reconstruct bodies, multipart
//! included.

use crate::error::{ApiError, FieldErrors, Result};
use crate::multipart::FormSpec;
use crate::store::SessionStore;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use vreg_core::ActiveSession;

/// Client-wide request timeout applied unless overridden
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry state of one logical request. A request is retried at most once,
/// and only after a successful token refresh.
enum Attempt {
    Initial,
    Retried,
}

enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(FormSpec),
}

/// A rebuildable description of one API request
pub struct ApiRequest {
    method: Method,
    path: String,
    body: RequestBody,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> ApiRequest {
        ApiRequest {
            method,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> ApiRequest {
        ApiRequest::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> ApiRequest {
        ApiRequest::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> ApiRequest {
        ApiRequest::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> ApiRequest {
        ApiRequest::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> ApiRequest {
        ApiRequest::new(Method::DELETE, path)
    }

    pub fn json(mut self, body: serde_json::Value) -> ApiRequest {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn multipart(mut self, spec: FormSpec) -> ApiRequest {
        self.body = RequestBody::Multipart(spec);
        self
    }
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Sends requests with the active session attached and owns the
/// refresh-on-401 cycle
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl Gateway {
    pub fn new(http: reqwest::Client, base_url: String, store: Arc<dyn SessionStore>) -> Gateway {
        Gateway {
            http,
            base_url,
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Send an authenticated request, refreshing the access token once if
    /// the first attempt comes back 401
    pub async fn execute(&self, request: &ApiRequest) -> Result<Response> {
        let mut attempt = Attempt::Initial;
        loop {
            let session = self.store.resolve()?;
            let response = self.dispatch(request, &session).await?;

            if response.status() != StatusCode::UNAUTHORIZED {
                return digest(response).await;
            }

            match attempt {
                Attempt::Initial => {
                    attempt = Attempt::Retried;
                    self.refresh(&session).await?;
                    // Loop resends with the renewed session
                }
                Attempt::Retried => {
                    tracing::warn!(
                        path = %request.path,
                        "still unauthorized after token refresh, clearing sessions"
                    );
                    self.store.clear_all()?;
                    return Err(ApiError::SessionExpired);
                }
            }
        }
    }

    /// Send without a bearer token and without the refresh cycle; for
    /// login and registration endpoints
    pub async fn execute_public(&self, request: &ApiRequest) -> Result<Response> {
        let response = self.dispatch(request, &ActiveSession::None).await?;
        digest(response).await
    }

    /// Authenticated request decoded into `T`
    pub async fn fetch<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        decode(self.execute(request).await?).await
    }

    /// Unauthenticated request decoded into `T`
    pub async fn fetch_public<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        decode(self.execute_public(request).await?).await
    }

    async fn dispatch(&self, request: &ApiRequest, session: &ActiveSession) -> Result<Response> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), &url);

        if let Some(token) = session.access_token() {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(spec) => builder.multipart(spec.to_form()),
        };

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            authenticated = session.is_authenticated(),
            "dispatching request"
        );

        builder.send().await.map_err(ApiError::Connect)
    }

    /// Renew the active session's access token with its refresh token.
    /// Any failure here ends the session: tokens are cleared and the
    /// caller gets `SessionExpired`.
    async fn refresh(&self, session: &ActiveSession) -> Result<()> {
        let kind = match session.kind() {
            Some(kind) => kind,
            None => {
                self.store.clear_all()?;
                return Err(ApiError::SessionExpired);
            }
        };
        let refresh = match self.store.get(kind)? {
            Some(pair) => pair.refresh,
            None => {
                self.store.clear_all()?;
                return Err(ApiError::SessionExpired);
            }
        };

        tracing::debug!(%kind, "access token rejected, attempting refresh");

        let url = format!("{}/token/refresh/", self.base_url);
        let outcome = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await;

        let response = match outcome {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(%kind, status = %response.status(), "token refresh rejected, clearing sessions");
                self.store.clear_all()?;
                return Err(ApiError::SessionExpired);
            }
            Err(err) => {
                tracing::warn!(%kind, error = %err, "token refresh unreachable, clearing sessions");
                self.store.clear_all()?;
                return Err(ApiError::SessionExpired);
            }
        };

        let renewed: RefreshResponse = match response.json().await {
            Ok(renewed) => renewed,
            Err(_) => {
                self.store.clear_all()?;
                return Err(ApiError::SessionExpired);
            }
        };

        self.store.set_access(kind, &renewed.access)?;
        tracing::info!(%kind, "access token refreshed");
        Ok(())
    }
}

/// Decode a successful response body
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Map a response onto the error taxonomy, passing successes through
async fn digest(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(error_for(status, &body))
}

fn error_for(status: StatusCode, body: &str) -> ApiError {
    let value: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = value.as_ref().and_then(extract_message);

    match status {
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => {
            ApiError::NotFound(message.unwrap_or_else(|| "Not found".to_string()))
        }
        StatusCode::BAD_REQUEST => {
            if let Some(errors) = value.as_ref().and_then(FieldErrors::from_body) {
                return ApiError::Validation(errors);
            }
            ApiError::Status {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| "Invalid request".to_string()),
            }
        }
        other => ApiError::Status {
            status: other.as_u16(),
            message: message
                .unwrap_or_else(|| format!("Request failed with status {}", other.as_u16())),
        },
    }
}

/// Pull the human message out of a backend error envelope
fn extract_message(body: &serde_json::Value) -> Option<String> {
    for key in ["detail", "error", "message"] {
        if let Some(text) = body.get(key).and_then(|v| v.as_str()) {
            return Some(text.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_maps_statuses() {
        let err = error_for(StatusCode::NOT_FOUND, r#"{"error":"Vehicle not found with this QR code."}"#);
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Vehicle not found with this QR code."),
            other => panic!("expected NotFound, got {other:?}"),
        }

        assert!(matches!(
            error_for(StatusCode::FORBIDDEN, r#"{"detail":"Admin access required"}"#),
            ApiError::Forbidden
        ));

        match error_for(StatusCode::INTERNAL_SERVER_ERROR, "not json") {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Request failed with status 500");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn test_error_for_maps_validation_bodies() {
        let err = error_for(
            StatusCode::BAD_REQUEST,
            r#"{"year":["A valid integer is required."]}"#,
        );
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.to_string(), "year: A valid integer is required.")
            }
            other => panic!("expected Validation, got {other:?}"),
        }

        // A bare error envelope on a 400 is a plain message, not field errors
        match error_for(StatusCode::BAD_REQUEST, r#"{"error":"No file attached"}"#) {
            ApiError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "No file attached");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }
}
