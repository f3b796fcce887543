//! User profile returned by the userinfo endpoint.

use serde::{Deserialize, Serialize};

/// Profile of the currently authenticated user, mapped directly from the
/// userinfo JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Unique external id of the user.
    pub sub: String,
    /// Display nickname.
    #[serde(default)]
    pub nickname: Option<String>,
    /// Given name.
    #[serde(default)]
    pub given_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub family_name: Option<String>,
    /// Locale preference.
    #[serde(default)]
    pub locale: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub picture: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the email address was verified.
    #[serde(default)]
    pub email_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserialization() {
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "sub": "user-123",
            "nickname": "satoshi",
            "given_name": "Satoshi",
            "family_name": "Nakamoto",
            "locale": "en",
            "picture": "https://paxful.com/avatar.png",
            "email": "satoshi@example.com",
            "email_verified": true
        }))
        .unwrap();

        assert_eq!(profile.sub, "user-123");
        assert_eq!(profile.nickname.as_deref(), Some("satoshi"));
        assert!(profile.email_verified);
    }

    #[test]
    fn test_profile_with_minimal_fields() {
        let profile: Profile =
            serde_json::from_value(serde_json::json!({ "sub": "user-123" })).unwrap();
        assert_eq!(profile.sub, "user-123");
        assert!(profile.email.is_none());
        assert!(!profile.email_verified);
    }
}
