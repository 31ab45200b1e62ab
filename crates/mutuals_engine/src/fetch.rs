use mutuals_logging::{mutuals_debug, mutuals_info};
use reqwest::Method;

use crate::client::map_reqwest_error;
use crate::{FailureKind, FetchError, GitHubClient, RelationKind, UserRecord};

/// Source of complete relation lists.
#[async_trait::async_trait]
pub trait RelationSource: Send + Sync {
    async fn fetch_all(
        &self,
        identity: &str,
        relation: RelationKind,
        credential: Option<&str>,
    ) -> Result<Vec<UserRecord>, FetchError>;
}

#[async_trait::async_trait]
impl RelationSource for GitHubClient {
    /// Walks pages from 1 until an empty or short page. No retries.
    async fn fetch_all(
        &self,
        identity: &str,
        relation: RelationKind,
        credential: Option<&str>,
    ) -> Result<Vec<UserRecord>, FetchError> {
        let page_size = self.settings().page_size;
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let url = self
                .relation_url(identity, relation.path_segment(), page)
                .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err))?;
            mutuals_debug!("GET {} of {} page {}", relation, identity, page);

            let response = self
                .request(Method::GET, url, credential)
                .send()
                .await
                .map_err(|err| FetchError::new(map_reqwest_error(&err), err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let kind = match status.as_u16() {
                    404 => FailureKind::NotFound,
                    403 => FailureKind::RateLimited,
                    code => FailureKind::HttpStatus(code),
                };
                return Err(FetchError::new(kind, status.to_string()));
            }

            let body = response
                .bytes()
                .await
                .map_err(|err| FetchError::new(map_reqwest_error(&err), err.to_string()))?;
            let users: Vec<UserRecord> = serde_json::from_slice(&body)
                .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

            let count = users.len();
            if count == 0 {
                break;
            }
            all.extend(users);
            if count < page_size {
                break;
            }
            page += 1;
        }

        mutuals_info!(
            "Fetched {} {} of {} in {} page(s)",
            all.len(),
            relation,
            identity,
            page
        );
        Ok(all)
    }
}
