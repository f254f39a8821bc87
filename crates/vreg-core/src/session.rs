//! Session token types
//!
//! The registry issues short-lived access tokens paired with long-lived
//! refresh tokens. Regular accounts and the admin account are tracked as
//! separate slots so an operator can hold both at once.

use serde::{Deserialize, Serialize};

/// An access/refresh token pair as issued by the token endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Which credential slot a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    User,
    Admin,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::User => "user",
            SessionKind::Admin => "admin",
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The session currently in effect for outgoing requests.
///
/// When both slots hold tokens the admin one wins, so a signed-in admin
/// always acts with admin rights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveSession {
    None,
    User { access: String },
    Admin { access: String },
}

impl ActiveSession {
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, ActiveSession::None)
    }

    pub fn kind(&self) -> Option<SessionKind> {
        match self {
            ActiveSession::None => None,
            ActiveSession::User { .. } => Some(SessionKind::User),
            ActiveSession::Admin { .. } => Some(SessionKind::Admin),
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        match self {
            ActiveSession::None => None,
            ActiveSession::User { access } | ActiveSession::Admin { access } => Some(access),
        }
    }
}

/// Admin display identity returned by the admin login endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub username: String,
    pub role: String,
}

/// Body of `POST /admin/login/`
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginReceipt {
    pub message: String,
    pub username: String,
    pub role: String,
    pub refresh: String,
    pub access: String,
}

impl AdminLoginReceipt {
    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access: self.access.clone(),
            refresh: self.refresh.clone(),
        }
    }

    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            username: self.username.clone(),
            role: self.role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_matches_wire_shape() {
        let pair: TokenPair =
            serde_json::from_str(r#"{"access":"aaa.bbb.ccc","refresh":"ddd.eee.fff"}"#).unwrap();
        assert_eq!(pair.access, "aaa.bbb.ccc");
        assert_eq!(pair.refresh, "ddd.eee.fff");
    }

    #[test]
    fn test_admin_login_receipt_split() {
        let receipt: AdminLoginReceipt = serde_json::from_value(serde_json::json!({
            "message": "Admin login successful",
            "username": "admin",
            "role": "superuser",
            "refresh": "r.r.r",
            "access": "a.a.a"
        }))
        .unwrap();
        let tokens = receipt.tokens();
        assert_eq!(tokens.access, "a.a.a");
        let identity = receipt.identity();
        assert_eq!(identity.role, "superuser");
    }

    #[test]
    fn test_active_session_accessors() {
        let none = ActiveSession::None;
        assert!(!none.is_authenticated());
        assert_eq!(none.access_token(), None);
        assert_eq!(none.kind(), None);

        let admin = ActiveSession::Admin {
            access: "tok".to_string(),
        };
        assert!(admin.is_authenticated());
        assert_eq!(admin.access_token(), Some("tok"));
        assert_eq!(admin.kind(), Some(SessionKind::Admin));
    }
}
