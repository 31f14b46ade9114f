//! # Session: the signed-in identity and where it is persisted
//!
//! A [`Session`] is created from a successful login, written to durable
//! per-origin storage under fixed keys, read back on every request and cleared
//! on logout or failed verification.
//!
//! | Key | Field |
//! |-----|-------|
//! | `token` | bearer token |
//! | `userId` | user id |
//! | `userEmail` | email |
//! | `userProfile` | cached avatar path |
//! | `userName` | "first last" display name |
//!
//! Storage goes through the [`SessionStorage`] trait: browser `localStorage` on
//! the web ([`crate::LocalStorage`]) and [`crate::MemoryStorage`] everywhere
//! else, including tests.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::LoginUser;

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";
pub const USER_EMAIL_KEY: &str = "userEmail";
pub const USER_PROFILE_KEY: &str = "userProfile";
pub const USER_NAME_KEY: &str = "userName";

/// Every key a session writes. Logout removes all of them.
pub const SESSION_KEYS: [&str; 5] = [
    TOKEN_KEY,
    USER_ID_KEY,
    USER_EMAIL_KEY,
    USER_PROFILE_KEY,
    USER_NAME_KEY,
];

/// Synchronous key/value storage for session data.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// The signed-in identity, as persisted client-side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub avatar_path: Option<String>,
}

impl Session {
    /// Build a session from a login response.
    pub fn from_login(token: String, user: &LoginUser) -> Self {
        let name = format!(
            "{} {}",
            user.user_first_name.as_deref().unwrap_or_default(),
            user.user_last_name.as_deref().unwrap_or_default()
        );
        let name = name.trim();
        Self {
            token: Some(token),
            user_id: user.user_id.clone(),
            user_email: user.user_email.clone(),
            user_name: (!name.is_empty()).then(|| name.to_string()),
            avatar_path: user.user_profile.clone(),
        }
    }

    /// Read whatever session is currently persisted. Missing keys become `None`.
    pub fn load(storage: &impl SessionStorage) -> Self {
        let read = |key: &str| storage.get(key).filter(|v| !v.is_empty());
        Self {
            token: read(TOKEN_KEY),
            user_id: read(USER_ID_KEY),
            user_email: read(USER_EMAIL_KEY),
            user_name: read(USER_NAME_KEY),
            avatar_path: read(USER_PROFILE_KEY),
        }
    }

    /// Persist every present field. Absent fields are removed so a stale value
    /// from an earlier login cannot linger.
    pub fn save(&self, storage: &impl SessionStorage) -> Result<(), StoreError> {
        let fields = [
            (TOKEN_KEY, &self.token),
            (USER_ID_KEY, &self.user_id),
            (USER_EMAIL_KEY, &self.user_email),
            (USER_NAME_KEY, &self.user_name),
            (USER_PROFILE_KEY, &self.avatar_path),
        ];
        for (key, value) in fields {
            match value {
                Some(v) => storage.set(key, v)?,
                None => storage.remove(key)?,
            }
        }
        Ok(())
    }

    /// Remove every session key from storage.
    pub fn clear(storage: &impl SessionStorage) -> Result<(), StoreError> {
        for key in SESSION_KEYS {
            storage.remove(key)?;
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Name for display, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .or(self.user_email.as_deref())
            .unwrap_or("")
    }

    /// Headers to attach to an outgoing request.
    ///
    /// Without a token nothing is attached. The identity headers are only
    /// added when `include_identity` is set; the backend must not treat them
    /// as credentials.
    pub fn auth_headers(&self, include_identity: bool) -> Vec<(&'static str, String)> {
        let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) else {
            return Vec::new();
        };
        let mut headers = vec![("Authorization", format!("Bearer {token}"))];
        if include_identity {
            let identity = [
                ("user_id", &self.user_id),
                ("user_email", &self.user_email),
                ("user_name", &self.user_name),
            ];
            for (name, value) in identity {
                if let Some(v) = value {
                    headers.push((name, v.clone()));
                }
            }
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn login_user() -> LoginUser {
        LoginUser {
            user_id: Some("u-1".to_string()),
            user_email: Some("ada@example.com".to_string()),
            user_profile: Some("/avatars/ada.png".to_string()),
            user_first_name: Some("Ada".to_string()),
            user_last_name: Some("Lovelace".to_string()),
        }
    }

    #[test]
    fn test_from_login_joins_name() {
        let session = Session::from_login("tok".to_string(), &login_user());
        assert_eq!(session.user_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(session.display_name(), "Ada Lovelace");
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let session = Session::from_login("tok".to_string(), &login_user());
        session.save(&storage).unwrap();

        assert_eq!(storage.get("token").as_deref(), Some("tok"));
        assert_eq!(storage.get("userProfile").as_deref(), Some("/avatars/ada.png"));
        assert_eq!(Session::load(&storage), session);
    }

    #[test]
    fn test_clear_removes_every_key() {
        let storage = MemoryStorage::new();
        Session::from_login("tok".to_string(), &login_user())
            .save(&storage)
            .unwrap();
        storage.set("theme", "dark").unwrap();

        Session::clear(&storage).unwrap();

        for key in SESSION_KEYS {
            assert!(storage.get(key).is_none(), "{key} should be cleared");
        }
        // Unrelated keys survive.
        assert_eq!(storage.get("theme").as_deref(), Some("dark"));
        assert!(!Session::load(&storage).is_authenticated());
    }

    #[test]
    fn test_headers_without_token_are_empty() {
        let session = Session {
            user_id: Some("u-1".to_string()),
            ..Session::default()
        };
        assert!(session.auth_headers(true).is_empty());
    }

    #[test]
    fn test_identity_headers_are_opt_in() {
        let session = Session::from_login("tok".to_string(), &login_user());

        let headers = session.auth_headers(false);
        assert_eq!(headers, vec![("Authorization", "Bearer tok".to_string())]);

        let headers = session.auth_headers(true);
        let names: Vec<_> = headers.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["Authorization", "user_id", "user_email", "user_name"]);
    }
}
