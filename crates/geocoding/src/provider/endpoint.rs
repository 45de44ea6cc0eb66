use url::Url;

/// Where a provider lives and how we identify ourselves to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEndpoint {
    base_url: String,
    user_agent: String,
}

impl ProviderEndpoint {
    /// Build an endpoint from a trusted base URL (e.g. a provider default).
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Validate `base_url`, as read from configuration.
    pub fn parse(base_url: &str, user_agent: impl Into<String>) -> Result<Self, url::ParseError> {
        let url = Url::parse(base_url)?;
        Ok(Self::new(url.as_str(), user_agent))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Base URL with `path` appended, tolerating a trailing slash on either side.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
