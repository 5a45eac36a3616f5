use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::{AuthOptions, SIGN_SCOPE, actions, endpoints};
use crate::errors::{AuthError, Result};
use crate::models::{AuthUserInfo, RefreshTokenData, TokenData, UserInfo};
use crate::request::CallbackRequest;
use crate::result::ActionResult;
use crate::state::StateVerifier;

/// OAuth2 response type requested from the authorization endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// `code`, for the server-side authorization-code flow
    Code,
    /// `token`, for the script (implicit) flow
    Token,
}

impl ResponseType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
        }
    }
}

/// Client for the Entra ID authorization-code flow
///
/// Holds the validated options and a single `reqwest` client; cloning is
/// cheap and clones share the connection pool, so one instance can serve
/// any number of concurrent callback flows.
#[derive(Debug, Clone)]
pub struct EntraAuthClient {
    options: AuthOptions,
    authority: String,
    userinfo_url: String,
    http: Client,
}

impl EntraAuthClient {
    /// Create a new authentication client
    ///
    /// Validates the options; an invalid configuration is an error here,
    /// not later at request time.
    pub fn new(options: AuthOptions) -> Result<Self> {
        options.validate()?;

        let http = Client::builder()
            .connect_timeout(options.http_timeouts.connect)
            .timeout(options.http_timeouts.request)
            .user_agent(options.user_agent.as_deref().unwrap_or("entra-auth"))
            .build()?;

        let authority = options.authority().to_string();

        Ok(Self {
            options,
            authority,
            userinfo_url: endpoints::GRAPH_USERINFO.to_string(),
            http,
        })
    }

    /// Build the sign-in authorization URL
    pub fn sign_in_url(&self, state: &str, login_hint: Option<&str>) -> Result<Url> {
        self.server_auth_url(actions::SIGN_IN, state, SIGN_SCOPE, false, login_hint)
    }

    /// Build the sign-up authorization URL
    pub fn sign_up_url(&self, state: &str) -> Result<Url> {
        self.server_auth_url(actions::SIGN_UP, state, SIGN_SCOPE, false, None)
    }

    /// Build an authorization URL for the server-side code flow
    ///
    /// The redirect is the configured server redirect base with the action
    /// segment appended, so one base URL fans out to multiple callback
    /// actions. `offline` appends ` offline_access` to the scope to request
    /// a refresh token; a scope that already contains it gains a second
    /// occurrence.
    pub fn server_auth_url(
        &self,
        action: &str,
        state: &str,
        scope: &str,
        offline: bool,
        login_hint: Option<&str>,
    ) -> Result<Url> {
        let redirect_url = self.server_redirect(action)?;

        let mut scope = scope.to_string();
        if offline {
            scope.push_str(" offline_access");
        }

        self.build_auth_url(&redirect_url, ResponseType::Code, &scope, state, login_hint)
    }

    /// Build an authorization URL for the script (implicit) flow
    ///
    /// Uses the configured script redirect as-is, with no action segment.
    pub fn script_auth_url(
        &self,
        state: &str,
        scope: &str,
        login_hint: Option<&str>,
    ) -> Result<Url> {
        let redirect_url = self.options.script_redirect_url.as_deref().ok_or_else(|| {
            AuthError::Configuration(
                "script_redirect_url is required for script side authentication".into(),
            )
        })?;

        self.build_auth_url(redirect_url, ResponseType::Token, scope, state, login_hint)
    }

    /// Build an authorization URL from explicit parameters
    #[instrument(skip(self))]
    pub fn build_auth_url(
        &self,
        redirect_url: &str,
        response_type: ResponseType,
        scope: &str,
        state: &str,
        login_hint: Option<&str>,
    ) -> Result<Url> {
        if redirect_url.is_empty() {
            return Err(AuthError::Configuration(
                "a redirect URL is required to build an authorization URL".into(),
            ));
        }

        let mut url = Url::parse(&format!("{}{}", self.authority, endpoints::AUTHORIZE_PATH))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("scope", scope)
                .append_pair("response_type", response_type.as_str())
                .append_pair("state", state)
                .append_pair("redirect_uri", redirect_url)
                .append_pair("response_mode", "query")
                .append_pair("client_id", &self.options.client_id);

            if let Some(hint) = login_hint {
                pairs.append_pair("login_hint", hint);
            }
        }

        debug!("Built authorization URL: {}", url);
        Ok(url)
    }

    /// Exchange an authorization code for tokens
    ///
    /// The rebuilt redirect URI must exactly match the one used to obtain
    /// the code, action segment included; the provider rejects the exchange
    /// otherwise. Returns `Ok(None)` when the provider responds with a JSON
    /// `null` body.
    #[instrument(skip(self, code))]
    pub async fn create_token(&self, action: &str, code: &str) -> Result<Option<TokenData>> {
        let redirect_uri = self.server_redirect(action)?;
        let endpoint = format!("{}{}", self.authority, endpoints::TOKEN_PATH);

        let params = [
            ("code", code),
            ("client_id", self.options.client_id.as_str()),
            ("client_secret", self.options.client_secret.expose()),
            ("redirect_uri", redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        debug!("Exchanging authorization code for tokens");
        let response = self.http.post(&endpoint).form(&params).send().await?;

        Self::read_json(response).await
    }

    /// Refresh the access token with a refresh token
    ///
    /// No redirect URI is sent for this grant.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Option<RefreshTokenData>> {
        let endpoint = format!("{}{}", self.authority, endpoints::TOKEN_PATH);

        let params = [
            ("client_id", self.options.client_id.as_str()),
            ("client_secret", self.options.client_secret.expose()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        debug!("Refreshing access token");
        let response = self.http.post(&endpoint).form(&params).send().await?;

        Self::read_json(response).await
    }

    /// Fetch the user profile from the Graph OIDC userinfo endpoint
    ///
    /// The ID token issued alongside the access token does not carry the
    /// full profile claims, so this call is always required to obtain
    /// name, email and picture.
    #[instrument(skip(self, token))]
    pub async fn get_user_info(&self, token: &TokenData) -> Result<Option<UserInfo>> {
        debug!("Fetching user info");
        let response = self
            .http
            .get(&self.userinfo_url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("{} {}", token.token_type, token.access_token),
            )
            .send()
            .await?;

        Self::read_json(response).await
    }

    /// Validate an authorization callback request
    ///
    /// Single-pass evaluation, first match wins: a provider-reported
    /// `error` denies access; a failed state check denies access; an empty
    /// code is missing data; otherwise the code is exchanged for tokens.
    /// Exchange errors are absorbed into the returned [`ActionResult`]
    /// rather than surfaced as `Err`; this is the one boundary where that
    /// happens.
    ///
    /// `action` overrides the action derived from the request path.
    #[instrument(skip_all)]
    pub async fn validate_callback(
        &self,
        request: &impl CallbackRequest,
        verifier: &impl StateVerifier,
        action: Option<&str>,
    ) -> (ActionResult, Option<TokenData>) {
        if let Some(error) = request.query_param("error") {
            return (ActionResult::access_denied(error), None);
        }

        let (Some(state), Some(code)) = (request.query_param("state"), request.query_param("code"))
        else {
            return (ActionResult::no_data_returned("state"), None);
        };

        if !verifier.verify(state) {
            return (ActionResult::access_denied("state"), None);
        }

        if code.is_empty() {
            return (ActionResult::no_data_returned("code"), None);
        }

        match self.exchange_callback_code(request, action, code).await {
            Ok(Some(token)) => (ActionResult::success(), Some(token)),
            Ok(None) => (ActionResult::no_data_returned("token"), None),
            Err(error) => {
                error!("Create token failed: {}", error);
                (ActionResult::from_error(&error), None)
            }
        }
    }

    /// Complete a login from a callback request
    ///
    /// Runs [`validate_callback`](Self::validate_callback) and, on success,
    /// fetches and normalizes the user profile. Userinfo transport errors
    /// propagate as `Err`; a missing payload becomes a `NoDataReturned`
    /// result.
    #[instrument(skip_all)]
    pub async fn complete_login(
        &self,
        request: &impl CallbackRequest,
        verifier: &impl StateVerifier,
        action: Option<&str>,
    ) -> Result<(ActionResult, Option<AuthUserInfo>)> {
        let (result, token) = self.validate_callback(request, verifier, action).await;
        if !result.is_success() {
            return Ok((result, None));
        }
        let Some(token) = token else {
            return Ok((result, None));
        };

        match self.get_user_info(&token).await? {
            Some(info) => Ok((result, Some(info.into()))),
            None => Ok((ActionResult::no_data_returned("userinfo"), None)),
        }
    }

    /// Complete a login, verifying the state by exact equality
    pub async fn complete_login_with_state(
        &self,
        request: &impl CallbackRequest,
        expected_state: &str,
        action: Option<&str>,
    ) -> Result<(ActionResult, Option<AuthUserInfo>)> {
        self.complete_login(request, &|candidate: &str| candidate == expected_state, action)
            .await
    }

    /// Server redirect URI with the action segment appended
    ///
    /// Shared by URL building and the code exchange so both sides always
    /// agree on the exact redirect URI.
    fn server_redirect(&self, action: &str) -> Result<String> {
        let base = self.options.server_redirect_url.as_deref().ok_or_else(|| {
            AuthError::Configuration(
                "server_redirect_url is required for server side authentication".into(),
            )
        })?;

        Ok(format!("{base}/{action}"))
    }

    async fn exchange_callback_code(
        &self,
        request: &impl CallbackRequest,
        action: Option<&str>,
        code: &str,
    ) -> Result<Option<TokenData>> {
        let action = action.or_else(|| request.action()).ok_or_else(|| {
            AuthError::Configuration("no action could be resolved from the callback request".into())
        })?;

        self.create_token(action, code).await
    }

    /// Read a JSON response body
    ///
    /// Non-success statuses become [`AuthError::Http`] with a snippet of
    /// the body; a JSON `null` body is `Ok(None)`; anything else must
    /// deserialize into `T`.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<Option<T>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Http {
                status,
                body_snippet: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
impl EntraAuthClient {
    /// Point the userinfo fetch at a mock server
    fn with_userinfo_url(mut self, url: impl Into<String>) -> Self {
        self.userinfo_url = url.into();
        self
    }
}
