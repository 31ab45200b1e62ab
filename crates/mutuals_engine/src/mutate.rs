use mutuals_logging::mutuals_info;
use reqwest::header::CONTENT_LENGTH;
use reqwest::Method;

use crate::client::map_reqwest_error;
use crate::{FailureKind, GitHubClient, MutationError, MutationKind};

/// Performs a single follow/unfollow against the remote graph.
#[async_trait::async_trait]
pub trait RelationMutator: Send + Sync {
    async fn apply(
        &self,
        login: &str,
        kind: MutationKind,
        credential: &str,
    ) -> Result<(), MutationError>;
}

#[async_trait::async_trait]
impl RelationMutator for GitHubClient {
    async fn apply(
        &self,
        login: &str,
        kind: MutationKind,
        credential: &str,
    ) -> Result<(), MutationError> {
        let url = self.mutation_url(login).map_err(MutationError::InvalidUrl)?;
        let request = match kind {
            MutationKind::Follow => self
                .request(Method::PUT, url, Some(credential))
                .header(CONTENT_LENGTH, "0"),
            MutationKind::Unfollow => self.request(Method::DELETE, url, Some(credential)),
        };

        let response = request.send().await.map_err(|err| {
            let message = err.to_string();
            match map_reqwest_error(&err) {
                FailureKind::Timeout => MutationError::Timeout(message),
                _ => MutationError::Network(message),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MutationError::HttpStatus(status.as_u16()));
        }
        mutuals_info!("{} {} succeeded ({})", kind, login, status);
        Ok(())
    }
}
