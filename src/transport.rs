//! The HTTP funnel every API operation goes through.
//!
//! Two cross-cutting behaviors live here and nowhere else: bearer-token
//! attachment (read fresh from the session at send time, never cached at
//! construction) and access-token renewal on `401`/`403` with a single
//! refresh call shared by all concurrently failing requests.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestAuth {
    /// Anonymous endpoint: no authorization header, no refresh handling.
    Public,
    /// Authenticated endpoint: bearer token attached, refresh on 401/403.
    Bearer,
}

/// Request payload, kept in a rebuildable form so a request can be replayed
/// after a token refresh.
pub(crate) enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Form(FormData),
}

/// Multipart form fields. Owned data, rebuilt into a `reqwest` form on every
/// send attempt (reqwest forms are consumed by sending).
pub(crate) struct FormData {
    pub(crate) texts: Vec<(&'static str, String)>,
    pub(crate) file: Option<FileData>,
}

pub(crate) struct FileData {
    pub(crate) field: &'static str,
    pub(crate) file_name: String,
    pub(crate) content_type: String,
    pub(crate) bytes: Vec<u8>,
}

impl FormData {
    fn to_form(&self) -> Result<reqwest::multipart::Form, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &self.texts {
            form = form.text(*name, value.clone());
        }
        if let Some(file) = &self.file {
            let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

pub(crate) struct Transport {
    http: reqwest::Client,
    config: ApiConfig,
    session: Session,
    /// Serializes token refreshes. Concurrent requests that fail auth queue
    /// on this lock in FIFO order; only the head performs the exchange.
    refresh_gate: Mutex<()>,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, config: ApiConfig, session: Session) -> Self {
        Self {
            http,
            config,
            session,
            refresh_gate: Mutex::new(()),
        }
    }

    pub(crate) fn config(&self) -> &ApiConfig {
        &self.config
    }

    // ── Request helpers ────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &'static str,
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, RequestAuth::Bearer, &RequestBody::Empty, fallback)
            .await
    }

    pub(crate) async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &'static str,
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, RequestAuth::Public, &RequestBody::Empty, fallback)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
        fallback: &'static str,
    ) -> Result<T, ApiError> {
        let body = RequestBody::Json(serde_json::to_value(payload)?);
        self.execute(Method::POST, path, RequestAuth::Bearer, &body, fallback)
            .await
    }

    pub(crate) async fn post_public<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
        fallback: &'static str,
    ) -> Result<T, ApiError> {
        let body = RequestBody::Json(serde_json::to_value(payload)?);
        self.execute(Method::POST, path, RequestAuth::Public, &body, fallback)
            .await
    }

    pub(crate) async fn post_public_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
        fallback: &'static str,
    ) -> Result<(), ApiError> {
        let body = RequestBody::Json(serde_json::to_value(payload)?);
        self.send(Method::POST, path, RequestAuth::Public, &body, fallback)
            .await
            .map(drop)
    }

    /// Authenticated POST with no payload (e.g. `notifications/mark-all-read/`).
    pub(crate) async fn post_unit(
        &self,
        path: &str,
        fallback: &'static str,
    ) -> Result<(), ApiError> {
        self.send(Method::POST, path, RequestAuth::Bearer, &RequestBody::Empty, fallback)
            .await
            .map(drop)
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
        fallback: &'static str,
    ) -> Result<T, ApiError> {
        let body = RequestBody::Json(serde_json::to_value(payload)?);
        self.execute(Method::PUT, path, RequestAuth::Bearer, &body, fallback)
            .await
    }

    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormData,
        fallback: &'static str,
    ) -> Result<T, ApiError> {
        self.execute(
            Method::PUT,
            path,
            RequestAuth::Bearer,
            &RequestBody::Form(form),
            fallback,
        )
        .await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
        fallback: &'static str,
    ) -> Result<T, ApiError> {
        let body = RequestBody::Json(serde_json::to_value(payload)?);
        self.execute(Method::PATCH, path, RequestAuth::Bearer, &body, fallback)
            .await
    }

    pub(crate) async fn delete(
        &self,
        path: &str,
        fallback: &'static str,
    ) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, RequestAuth::Bearer, &RequestBody::Empty, fallback)
            .await
            .map(drop)
    }

    // ── Core send/refresh machinery ────────────────────────────────

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        auth: RequestAuth,
        body: &RequestBody,
        fallback: &'static str,
    ) -> Result<T, ApiError> {
        let response = self.send(method, path, auth, body, fallback).await?;
        response.json::<T>().await.map_err(ApiError::from)
    }

    /// Send a request, transparently refreshing the access token once on an
    /// authorization failure. A replayed request that fails auth again is
    /// not retried a second time; its error propagates to the caller.
    async fn send(
        &self,
        method: Method,
        path: &str,
        auth: RequestAuth,
        body: &RequestBody,
        fallback: &'static str,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.config.endpoint(path)?;
        let mut retried = false;
        loop {
            let mut observed_generation = 0;
            let mut request = self.http.request(method.clone(), url.clone());
            if auth == RequestAuth::Bearer {
                // Read fresh every attempt: a refresh that completed between
                // attempts must be picked up here.
                observed_generation = self.session.token_generation();
                if let Some(token) = self.session.access_token() {
                    request = request.bearer_auth(token);
                }
            }
            request = match body {
                RequestBody::Empty => request,
                RequestBody::Json(value) => request.json(value),
                RequestBody::Form(form) => request.multipart(form.to_form()?),
            };

            let response = request.send().await?;
            let status = response.status();

            if auth == RequestAuth::Bearer
                && !retried
                && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN)
            {
                self.refresh_access_token(observed_generation).await?;
                retried = true;
                continue;
            }

            if status.is_success() {
                return Ok(response);
            }
            let body_text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body_text, fallback));
        }
    }

    /// Renew the access token after an authorization failure.
    ///
    /// At most one `token/refresh/` call is in flight at any time: the first
    /// failer holds the gate and performs the exchange, every concurrent
    /// failer waits on the gate and then finds the already-renewed token via
    /// the generation check. If the exchange fails (or no refresh token is
    /// held) the session is signed out and all waiters fail.
    async fn refresh_access_token(&self, observed_generation: u64) -> Result<(), ApiError> {
        let _flight = self.refresh_gate.lock().await;

        if self.session.token_generation() != observed_generation
            && self.session.access_token().is_some()
        {
            // Another request already refreshed while we queued.
            return Ok(());
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            tracing::warn!("authorization failed with no refresh token held, signing out");
            self.session.clear();
            return Err(ApiError::SessionExpired);
        };

        match self.exchange_refresh_token(&refresh_token).await {
            Ok(access_token) => {
                self.session.set_access_token(access_token);
                tracing::debug!("access token refreshed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed, signing out");
                self.session.clear();
                Err(e)
            }
        }
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Deliberately side-effect-free: the session is not touched, so the
    /// call is retryable and callers decide what to persist.
    pub(crate) async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<String, ApiError> {
        let url = self.config.endpoint("token/refresh/")?;
        let response = self
            .http
            .post(url)
            .json(&RefreshRequest {
                refresh: refresh_token,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(
                status.as_u16(),
                &body_text,
                "Unable to refresh the session",
            ));
        }
        let payload: RefreshResponse = response.json().await?;
        Ok(payload.access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_data_builds_a_multipart_form() {
        let form = FormData {
            texts: vec![("bio", "Night-shift guard".to_string())],
            file: Some(FileData {
                field: "profile_picture",
                file_name: "me.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            }),
        };
        assert!(form.to_form().is_ok());
        // Rebuildable: a second build from the same data must also work.
        assert!(form.to_form().is_ok());
    }

    #[test]
    fn form_data_rejects_bad_mime() {
        let form = FormData {
            texts: vec![],
            file: Some(FileData {
                field: "profile_picture",
                file_name: "me.png".to_string(),
                content_type: "not a mime".to_string(),
                bytes: vec![],
            }),
        };
        assert!(form.to_form().is_err());
    }
}
