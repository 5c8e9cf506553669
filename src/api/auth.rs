//! Account lifecycle: signup, login, logout, password reset, token exchange.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Credentials, LoginResponse, PasswordResetCompletion, SignupRequest, User};

impl ApiClient {
    /// Register a new account.
    ///
    /// A successful signup does not sign the user in; follow it with
    /// [`login`](Self::login).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with the server's validation message (the
    /// `detail` string or the first field error) when registration is
    /// rejected.
    pub async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        self.transport()
            .post_public_unit("auth/signup/", request, "Unable to create your account")
            .await
    }

    /// Sign in with username and password.
    ///
    /// On success the session stores the user snapshot and both tokens and
    /// persists them; every subsequent authenticated call picks the access
    /// token up automatically. On failure the session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] carrying the server's message (e.g.
    /// "Invalid credentials") or a transport error.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let granted: LoginResponse = self
            .transport()
            .post_public("auth/login/", credentials, "Invalid username or password")
            .await?;

        self.session()
            .establish(granted.user.clone(), granted.access, granted.refresh);
        tracing::info!(user = %granted.user.username, "signed in");
        Ok(granted.user)
    }

    /// Sign out locally: drop the user and both tokens and remove the
    /// persisted session. Idempotent; no server call is made.
    pub fn logout(&self) {
        self.session().clear();
        tracing::info!("signed out");
    }

    /// Request a password-reset email.
    pub async fn initiate_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.transport()
            .post_public_unit(
                "auth/initiate-password-reset/",
                &serde_json::json!({ "email": email }),
                "Unable to start the password reset",
            )
            .await
    }

    /// Complete a password reset with the emailed token.
    pub async fn complete_password_reset(
        &self,
        completion: &PasswordResetCompletion,
    ) -> Result<(), ApiError> {
        self.transport()
            .post_public_unit(
                "auth/complete-password-reset/",
                completion,
                "Unable to reset the password",
            )
            .await
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Side-effect-free by design: the session is not modified, so the call
    /// is safe to retry and the caller decides whether to store the result.
    /// The transparent refresh performed by the transport uses this same
    /// exchange and does store the token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] when the server rejects the refresh token.
    pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<String, ApiError> {
        self.transport().exchange_refresh_token(refresh_token).await
    }
}
