use serde::{Deserialize, Serialize};

/// Token response from the authorization-code grant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenData {
    /// A token that can be sent to a Microsoft API for access
    pub access_token: String,
    /// The token type, always `Bearer`
    pub token_type: String,
    /// Remaining lifetime of the access token in seconds
    pub expires_in: u64,
    /// Space-delimited scopes granted to the access token
    pub scope: String,
    /// Present only when the `offline_access` scope was granted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Signed JWT with identity claims, present only when the `openid`
    /// scope was granted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

/// Token response from the refresh-token grant
///
/// The refresh response never re-issues a refresh token in this flow and
/// never echoes an ID token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshTokenData {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: String,
}

/// Profile returned by the Graph OIDC userinfo endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    /// Stable identifier for the user, unique among all Microsoft accounts
    /// and never reused
    pub sub: String,
    /// The user's full name, in a displayable form
    pub name: String,
    /// The user's given name(s) or first name(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    /// The user's surname(s) or last name(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// URL of the user's profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// The user's email address
    pub email: String,
}

/// Provider-neutral user record consumed by the host application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUserInfo {
    /// The provider's stable subject identifier
    pub open_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub email: String,
    /// Always true for this provider
    pub email_verified: bool,
}

impl From<UserInfo> for AuthUserInfo {
    fn from(info: UserInfo) -> Self {
        Self {
            open_id: info.sub,
            name: info.name,
            given_name: info.given_name,
            family_name: info.family_name,
            picture: info.picture,
            email: info.email,
            email_verified: true,
        }
    }
}
