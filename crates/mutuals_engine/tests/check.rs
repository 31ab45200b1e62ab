use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mutuals_engine::{
    fetch_relations, FailureKind, FetchError, RelationKind, RelationSource, UserRecord,
};
use tokio::sync::Barrier;

fn user(login: &str) -> UserRecord {
    UserRecord {
        login: login.to_string(),
        avatar_url: String::new(),
        html_url: format!("https://github.com/{login}"),
    }
}

/// Both fetches must be in flight at once to pass the barrier.
struct RendezvousSource {
    barrier: Barrier,
}

#[async_trait::async_trait]
impl RelationSource for RendezvousSource {
    async fn fetch_all(
        &self,
        _identity: &str,
        relation: RelationKind,
        _credential: Option<&str>,
    ) -> Result<Vec<UserRecord>, FetchError> {
        self.barrier.wait().await;
        Ok(match relation {
            RelationKind::Followers => vec![user("a"), user("b")],
            RelationKind::Following => vec![user("b"), user("c")],
        })
    }
}

struct FailingSource {
    failing: RelationKind,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl RelationSource for FailingSource {
    async fn fetch_all(
        &self,
        _identity: &str,
        relation: RelationKind,
        _credential: Option<&str>,
    ) -> Result<Vec<UserRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if relation == self.failing {
            return Err(FetchError {
                kind: FailureKind::RateLimited,
                message: "403 Forbidden".to_string(),
            });
        }
        Ok(vec![user("x")])
    }
}

#[tokio::test]
async fn both_lists_are_fetched_concurrently() {
    let source = RendezvousSource {
        barrier: Barrier::new(2),
    };

    let lists = tokio::time::timeout(
        Duration::from_secs(5),
        fetch_relations(&source, "octocat", None),
    )
    .await
    .expect("fetches ran one after the other")
    .expect("fetch ok");

    let logins = |list: &[UserRecord]| list.iter().map(|u| u.login.clone()).collect::<Vec<_>>();
    assert_eq!(logins(&lists.followers), vec!["a", "b"]);
    assert_eq!(logins(&lists.following), vec!["b", "c"]);
}

#[tokio::test]
async fn failure_of_either_list_fails_the_check() {
    for failing in [RelationKind::Followers, RelationKind::Following] {
        let source = FailingSource {
            failing,
            calls: AtomicUsize::new(0),
        };

        let err = fetch_relations(&source, "octocat", Some("tok"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, FailureKind::RateLimited);
        assert!(source.calls.load(Ordering::SeqCst) >= 1);
    }
}
