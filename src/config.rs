use url::Url;

use crate::error::ApiError;

/// CampusWatch API configuration.
///
/// ```rust,ignore
/// use campuswatch_client::ApiConfig;
///
/// let config = ApiConfig::new();
/// // Optional overrides via chaining:
/// let config = config.with_base_url("https://staging.campuswatch.app/api/".parse()?);
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ApiConfig {
    pub(crate) base_url: Url,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiConfig {
    /// Create a configuration pointing at the production API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: normalize_base("https://api.campuswatch.app/api/"
                .parse()
                .expect("valid default URL")),
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// # Optional env vars
    /// - `CAMPUSWATCH_API_URL`: Override the API base URL
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if `CAMPUSWATCH_API_URL` is set but not a
    /// valid URL.
    pub fn from_env() -> Result<Self, ApiError> {
        let mut config = Self::new();
        if let Ok(url_str) = std::env::var("CAMPUSWATCH_API_URL") {
            let url: Url = url_str
                .parse()
                .map_err(|e| ApiError::Config(format!("CAMPUSWATCH_API_URL: {e}")))?;
            config = config.with_base_url(url);
        }
        Ok(config)
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = normalize_base(url);
        self
    }

    /// API base URL every path template is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path template against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Config(format!("endpoint {path}: {e}")))
    }
}

/// `Url::join` drops the last path segment unless the base ends with `/`.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let config = ApiConfig::new();
        assert_eq!(config.base_url().as_str(), "https://api.campuswatch.app/api/");
    }

    #[test]
    fn endpoint_joins_relative_paths() {
        let config = ApiConfig::new();
        let url = config.endpoint("incidents/my-reports/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.campuswatch.app/api/incidents/my-reports/"
        );
    }

    #[test]
    fn base_url_without_trailing_slash_is_normalized() {
        let config =
            ApiConfig::new().with_base_url("http://localhost:8000/api".parse().unwrap());
        let url = config.endpoint("auth/login/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/auth/login/");
    }

    #[test]
    fn bare_host_base_url() {
        let config = ApiConfig::new().with_base_url("http://127.0.0.1:9000".parse().unwrap());
        let url = config.endpoint("token/refresh/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/token/refresh/");
    }
}
