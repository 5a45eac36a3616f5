//! Microsoft Entra ID OAuth2 authorization-code flow client
//!
//! This crate implements the provider side of a web login with Microsoft
//! Entra ID (Azure AD): building authorization URLs, exchanging
//! authorization codes for tokens, refreshing tokens, and fetching the
//! user profile from the Microsoft Graph OIDC userinfo endpoint. It is
//! meant to be consumed by a host web application as an authentication
//! provider plugin.
//!
//! # Login Flow
//!
//! 1. The host stores an opaque `state` value and redirects the user to
//!    [`EntraAuthClient::sign_in_url`]
//! 2. Entra ID redirects back to `{server_redirect_url}/{action}` with
//!    `state` and `code` query parameters
//! 3. The host passes the callback request to
//!    [`EntraAuthClient::complete_login`] together with a
//!    [`StateVerifier`] that checks the state against what it stored
//! 4. The crate validates the callback, exchanges the code for tokens,
//!    fetches the profile, and returns a normalized [`AuthUserInfo`]
//!
//! Token storage and session management stay with the host; this crate
//! never persists anything.
//!
//! # Example
//!
//! ```no_run
//! use entra_auth::{AuthOptions, CallbackUrl, EntraAuthClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let options = AuthOptions::new("client-id", "client-secret")
//!         .with_server_redirect_url("https://app.example.com/auth");
//!     let client = EntraAuthClient::new(options)?;
//!
//!     // Redirect the user to the authorization URL...
//!     let auth_url = client.sign_in_url("opaque-state", None)?;
//!     println!("Visit: {}", auth_url);
//!
//!     // ...and later handle the callback redirect.
//!     let callback =
//!         CallbackUrl::parse("https://app.example.com/auth/signin?state=opaque-state&code=...")?;
//!     let (result, user) = client
//!         .complete_login_with_state(&callback, "opaque-state", None)
//!         .await?;
//!
//!     if let Some(user) = user {
//!         println!("Signed in: {} <{}>", user.name, user.email);
//!     } else {
//!         println!("Login rejected: {:?}", result);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # State Verification
//!
//! The `state` round-trip is the CSRF defense of the flow. This crate
//! never generates or stores state; the host supplies the comparison via
//! [`StateVerifier`] (any `Fn(&str) -> bool` closure qualifies), backed by
//! whatever holds the pre-redirect value, such as a session or a signed
//! cookie.

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod request;
pub mod result;
pub mod state;

// Re-export main types
pub use client::{EntraAuthClient, ResponseType};
pub use config::{AuthOptions, ClientSecret, HttpTimeouts, SIGN_SCOPE, actions, endpoints};
pub use errors::{AuthError, Result};
pub use models::{AuthUserInfo, RefreshTokenData, TokenData, UserInfo};
pub use request::{CallbackRequest, CallbackUrl};
pub use result::{ActionResult, Failure, FailureKind};
pub use state::StateVerifier;
