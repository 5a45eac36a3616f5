use std::collections::HashMap;

use url::Url;

use crate::errors::Result;

/// Inbound callback request seen by the validator
///
/// The host web framework adapts its own request type to this trait; the
/// library never depends on a particular framework. [`CallbackUrl`] is a
/// ready-made implementation for hosts that only have the redirect URL.
pub trait CallbackRequest {
    /// Value of a query parameter, if present
    fn query_param(&self, name: &str) -> Option<&str>;

    /// Logical action derived from the request path
    ///
    /// The server authorization URL fans one redirect base out to multiple
    /// callback actions; this recovers the action segment so the token
    /// exchange can rebuild the exact redirect URI.
    fn action(&self) -> Option<&str>;
}

/// Callback request parsed from the full redirect URL
///
/// Query values are percent-decoded; for repeated parameters the first
/// occurrence wins. The action is the last non-empty path segment.
#[derive(Debug, Clone)]
pub struct CallbackUrl {
    query: HashMap<String, String>,
    action: Option<String>,
}

impl CallbackUrl {
    pub fn parse(redirect_url: &str) -> Result<Self> {
        let url = Url::parse(redirect_url)?;

        let mut query = HashMap::new();
        for (key, value) in url.query_pairs() {
            query.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }

        let action = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned);

        Ok(Self { query, action })
    }
}

impl CallbackRequest for CallbackUrl {
    fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}
