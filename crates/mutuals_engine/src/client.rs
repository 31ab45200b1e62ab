use std::time::Duration;

use mutuals_logging::mutuals_warn;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder};
use url::Url;

use crate::{FailureKind, FetchError, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Root of the REST API, without a trailing path.
    pub api_base: String,
    /// Items per page. The API serves at most [`DEFAULT_PAGE_SIZE`]; larger
    /// values are lowered to it, since a capped page would read as the last one.
    pub page_size: usize,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("mutuals/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP access to the followers/following API.
///
/// Implements both [`crate::RelationSource`] and [`crate::RelationMutator`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    settings: ClientSettings,
    http: reqwest::Client,
}

impl GitHubClient {
    pub fn new(mut settings: ClientSettings) -> Result<Self, FetchError> {
        let page_size = settings.page_size.clamp(1, DEFAULT_PAGE_SIZE);
        if page_size != settings.page_size {
            mutuals_warn!(
                "page_size {} out of range, using {}",
                settings.page_size,
                page_size
            );
            settings.page_size = page_size;
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// `{base}/users/{identity}/{relation}?per_page=P&page=N`
    pub(crate) fn relation_url(
        &self,
        identity: &str,
        relation: &str,
        page: u32,
    ) -> Result<Url, String> {
        let mut url = self.url_with_segments(&["users", identity, relation])?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.settings.page_size.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    /// `{base}/user/following/{identity}`
    pub(crate) fn mutation_url(&self, identity: &str) -> Result<Url, String> {
        self.url_with_segments(&["user", "following", identity])
    }

    pub(crate) fn request(
        &self,
        method: Method,
        url: Url,
        credential: Option<&str>,
    ) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match credential {
            Some(token) => builder.header(AUTHORIZATION, format!("token {token}")),
            None => builder,
        }
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, String> {
        let mut url = Url::parse(&self.settings.api_base).map_err(|err| err.to_string())?;
        url.path_segments_mut()
            .map_err(|_| format!("{} cannot be a base url", self.settings.api_base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

pub(crate) fn map_reqwest_error(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    }
}
