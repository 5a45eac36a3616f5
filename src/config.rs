use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{AuthError, Result};

/// Entra ID endpoints
pub mod endpoints {
    /// Default authority, the "common" multi-tenant issuer
    pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com/common";
    pub const AUTHORIZE_PATH: &str = "/oauth2/v2.0/authorize";
    pub const TOKEN_PATH: &str = "/oauth2/v2.0/token";
    pub const GRAPH_USERINFO: &str = "https://graph.microsoft.com/oidc/userinfo";
}

/// Callback actions appended to the server redirect URL
pub mod actions {
    pub const SIGN_IN: &str = "signin";
    pub const SIGN_UP: &str = "signup";
}

/// Scope requested by the sign-in and sign-up convenience URLs
pub const SIGN_SCOPE: &str = "openid profile email https://graph.microsoft.com/User.Read";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(15),
            request: Duration::from_secs(30),
        }
    }
}

/// OAuth client secret
///
/// Redacted in `Debug` output and zeroized on drop so the secret never
/// leaks through logs or freed memory.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Access the raw secret for an outbound token request
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(***)")
    }
}

impl From<String> for ClientSecret {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for ClientSecret {
    fn from(secret: &str) -> Self {
        Self(secret.to_owned())
    }
}

/// Configuration for [`EntraAuthClient`](crate::EntraAuthClient)
///
/// Derives `Deserialize` so a host application can bind it from its own
/// configuration file. Validation happens once, when the client is
/// constructed; an invalid configuration is a fatal startup error.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthOptions {
    /// Issuer base URL; `None` means the "common" multi-tenant authority.
    /// Valid tenant values are common, organizations, consumers, and
    /// tenant identifiers.
    #[serde(default)]
    pub authority: Option<String>,

    /// The Application (client) ID assigned by the Entra admin center
    pub client_id: String,

    /// The application secret created in the app registration portal
    pub client_secret: ClientSecret,

    /// Authorized redirect URI base for the server-side code flow
    #[serde(default)]
    pub server_redirect_url: Option<String>,

    /// Authorized redirect URI for the script (implicit) flow
    #[serde(default)]
    pub script_redirect_url: Option<String>,

    /// HTTP client timeouts
    #[serde(skip, default)]
    pub http_timeouts: HttpTimeouts,

    /// Custom user agent (optional)
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl AuthOptions {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<ClientSecret>) -> Self {
        Self {
            authority: None,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            server_redirect_url: None,
            script_redirect_url: None,
            http_timeouts: HttpTimeouts::default(),
            user_agent: None,
        }
    }

    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    pub fn with_server_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.server_redirect_url = Some(url.into());
        self
    }

    pub fn with_script_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.script_redirect_url = Some(url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Resolved authority without a trailing slash
    pub fn authority(&self) -> &str {
        self.authority
            .as_deref()
            .unwrap_or(endpoints::DEFAULT_AUTHORITY)
            .trim_end_matches('/')
    }

    /// Validate the configuration
    ///
    /// Required fields must be present and URL-shaped fields must parse.
    /// Called by the client constructor; a failure aborts startup.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(AuthError::Configuration("client_id is required".into()));
        }
        if self.client_secret.is_empty() {
            return Err(AuthError::Configuration("client_secret is required".into()));
        }

        Self::check_url("authority", self.authority.as_deref())?;
        Self::check_url("server_redirect_url", self.server_redirect_url.as_deref())?;
        Self::check_url("script_redirect_url", self.script_redirect_url.as_deref())?;

        Ok(())
    }

    fn check_url(name: &str, value: Option<&str>) -> Result<()> {
        if let Some(value) = value {
            Url::parse(value).map_err(|e| {
                AuthError::Configuration(format!("{name} is not a valid URL: {e}"))
            })?;
        }
        Ok(())
    }
}
