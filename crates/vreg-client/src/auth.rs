//! Account operations: login, registration, profile, logout

use crate::client::Client;
use crate::error::{ApiError, Result};
use crate::gateway::ApiRequest;
use crate::multipart::FormSpec;
use vreg_core::{
    AdminLoginReceipt, PhotoFile, SessionKind, SignupForm, SignupReceipt, TokenPair, UserProfile,
};

impl Client {
    /// Sign in a regular account and persist its tokens in the user slot
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let request = ApiRequest::post("/token/").json(serde_json::json!({
            "username": username,
            "password": password,
        }));

        let pair: TokenPair = match self.gateway().fetch_public(&request).await {
            Ok(pair) => pair,
            // The token endpoint answers 401 for bad credentials
            Err(ApiError::Status { status: 401, .. }) => {
                return Err(ApiError::Status {
                    status: 401,
                    message: "Invalid username or password".to_string(),
                });
            }
            Err(err) => return Err(err),
        };

        self.store().set(SessionKind::User, &pair)?;
        tracing::info!(username, "signed in");
        Ok(pair)
    }

    /// Sign in the admin account; persists tokens and display identity in
    /// the admin slot
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<AdminLoginReceipt> {
        let request = ApiRequest::post("/admin/login/").json(serde_json::json!({
            "username": username,
            "password": password,
        }));

        let receipt: AdminLoginReceipt = self.gateway().fetch_public(&request).await?;
        self.store().set(SessionKind::Admin, &receipt.tokens())?;
        self.store().set_admin_identity(&receipt.identity())?;
        tracing::info!(username = %receipt.username, role = %receipt.role, "admin signed in");
        Ok(receipt)
    }

    /// Register a new account. Does not sign in; call `login` after.
    pub async fn signup(
        &self,
        form: &SignupForm,
        photo: Option<PhotoFile>,
    ) -> Result<SignupReceipt> {
        let mut spec = FormSpec::new()
            .text("username", &form.username)
            .text("email", &form.email)
            .text("password", &form.password)
            .text("password2", &form.password2)
            .maybe_text("first_name", form.first_name.as_deref())
            .maybe_text("last_name", form.last_name.as_deref());
        if let Some(photo) = photo {
            spec = spec.file("photo", photo.file_name, photo.bytes);
        }

        let request = ApiRequest::post("/register/").multipart(spec);
        self.gateway().fetch_public(&request).await
    }

    /// Profile of the signed-in account
    pub async fn profile(&self) -> Result<UserProfile> {
        self.gateway().fetch(&ApiRequest::get("/profile/")).await
    }

    /// Drop the user session. Purely local; the backend has no logout
    /// route and the refresh token simply ages out.
    pub fn logout(&self) -> Result<()> {
        self.store().clear(SessionKind::User)?;
        tracing::info!("signed out");
        Ok(())
    }

    /// Drop the admin session and its stored identity
    pub fn admin_logout(&self) -> Result<()> {
        self.store().clear(SessionKind::Admin)?;
        tracing::info!("admin signed out");
        Ok(())
    }
}
