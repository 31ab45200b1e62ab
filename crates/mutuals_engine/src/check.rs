use futures_util::future::try_join;

use crate::{FetchError, RelationKind, RelationLists, RelationSource};

/// Fetches followers and following concurrently.
///
/// Succeeds only if both lists were fetched completely; the first error wins
/// and the other fetch is dropped.
pub async fn fetch_relations(
    source: &dyn RelationSource,
    identity: &str,
    credential: Option<&str>,
) -> Result<RelationLists, FetchError> {
    let (followers, following) = try_join(
        source.fetch_all(identity, RelationKind::Followers, credential),
        source.fetch_all(identity, RelationKind::Following, credential),
    )
    .await?;

    Ok(RelationLists {
        followers,
        following,
    })
}
