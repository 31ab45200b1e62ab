use std::sync::{mpsc, Arc};
use std::time::Duration;

use mutuals_engine::{
    ChannelEventSink, ClientSettings, EngineEvent, EngineHandle, MutationKind,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn start(server: &MockServer) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let settings = ClientSettings {
        api_base: server.uri(),
        ..ClientSettings::default()
    };
    let engine = EngineHandle::new(settings, Arc::new(ChannelEventSink::new(tx))).expect("engine");
    (engine, rx)
}

async fn next_event(rx: mpsc::Receiver<EngineEvent>) -> (EngineEvent, mpsc::Receiver<EngineEvent>) {
    tokio::task::spawn_blocking(move || {
        let event = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("engine event");
        (event, rx)
    })
    .await
    .expect("join")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn check_reports_both_lists_with_generation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/followers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"login": "a"}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/following"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"login": "b"}])))
        .mount(&server)
        .await;

    let (engine, rx) = start(&server);
    engine.check(4, "octocat", None);

    let (event, _rx) = next_event(rx).await;
    match event {
        EngineEvent::CheckCompleted { generation, result } => {
            assert_eq!(generation, 4);
            let lists = result.expect("check ok");
            assert_eq!(lists.followers[0].login, "a");
            assert_eq!(lists.following[0].login, "b");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn mutation_and_timer_events_are_delivered() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/user/following/c"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let (engine, rx) = start(&server);
    engine.mutate("c", MutationKind::Unfollow, "tok".to_string());
    let (event, rx) = next_event(rx).await;
    assert_eq!(
        event,
        EngineEvent::MutationCompleted {
            login: "c".to_string(),
            kind: MutationKind::Unfollow,
            result: Ok(()),
        }
    );

    engine.schedule(1, Duration::from_millis(500));
    engine.schedule(2, Duration::from_millis(20));
    engine.cancel(1);
    let (event, rx) = next_event(rx).await;
    assert_eq!(event, EngineEvent::TimerFired { timer: 2 });

    let late = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_millis(800)))
        .await
        .expect("join");
    assert!(late.is_err(), "cancelled timer fired: {late:?}");
}
