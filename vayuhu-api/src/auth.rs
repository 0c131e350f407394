use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vayuhu_core::{GatewayError, SessionError};
use vayuhu_shared::{Admin, Identity, Session, User};

use crate::client::ApiClient;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Signed in, but the session could not be saved: {0}")]
    Session(#[from] SessionError),
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    admin: Option<Admin>,
}

/// Result of a successful login or signup.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub identity: Identity,
    pub message: Option<String>,
}

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<SignedIn, AuthError> {
        let credentials = Credentials {
            email,
            password,
            name: None,
        };
        let response: AuthResponse = self.post_json("/login.php", &credentials).await?;
        self.start_session(response, false)
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignedIn, AuthError> {
        let credentials = Credentials {
            email,
            password,
            name: Some(name),
        };
        let response: AuthResponse = self.post_json("/signup.php", &credentials).await?;
        self.start_session(response, false)
    }

    pub async fn admin_login(&self, email: &str, password: &str) -> Result<SignedIn, AuthError> {
        let credentials = Credentials {
            email,
            password,
            name: None,
        };
        let response: AuthResponse = self.post_json("/admin_login.php", &credentials).await?;
        self.start_session(response, true)
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.sessions().clear()?;
        info!("Signed out");
        Ok(())
    }

    /// Round-trip the bearer token through `/protected.php`.
    pub async fn check_protected(&self) -> Result<serde_json::Value, GatewayError> {
        self.require_session()?;
        self.get("/protected.php", &[]).await
    }

    fn start_session(&self, response: AuthResponse, admin: bool) -> Result<SignedIn, AuthError> {
        let identity = match (admin, response.user, response.admin) {
            (false, Some(user), _) => Identity::User(user),
            (true, _, Some(admin)) => Identity::Admin(admin),
            _ => {
                return Err(GatewayError::Rejected {
                    message: response.message,
                }
                .into())
            }
        };

        let token = response.token.unwrap_or_else(|| {
            warn!(id = identity.id(), "Backend issued no token; requests will be unauthenticated");
            String::new()
        });

        self.sessions()
            .store(Session::new(identity.clone(), token))?;
        info!(id = identity.id(), admin = identity.is_admin(), "Signed in");

        Ok(SignedIn {
            identity,
            message: response.message,
        })
    }
}
