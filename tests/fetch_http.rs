// tests/fetch_http.rs
use std::sync::Arc;

use wiremock::matchers::{ method, path, query_param };
use wiremock::{ Mock, MockServer, ResponseTemplate };

use slope_status::board::{ RefreshOutcome, RefreshStatus, StatusBoard };
use slope_status::catalogue::Catalogue;
use slope_status::core::net::{ Fetch, HttpFetcher, ProxiedFetcher };
use slope_status::pipeline::Pipeline;
use slope_status::FetchError;

const PAGE: &str = r#"<ul><li class="list-group-item">B-Fugleleiken <span>Åpen</span></li></ul>"#;

#[tokio::test]
async fn http_fetch_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/webkamera-og-vaer"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(5_000).unwrap();
    let body = fetcher.fetch(&format!("{}/webkamera-og-vaer", server.uri())).await.unwrap();
    assert_eq!(body, PAGE);
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(5_000).unwrap();
    let url = format!("{}/status", server.uri());
    match fetcher.fetch(&url).await {
        Err(FetchError::Status { url: got, status }) => {
            assert_eq!(status, 502);
            assert_eq!(got, url);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error_with_cause() {
    let fetcher = HttpFetcher::new(2_000).unwrap();
    // port 9 (discard) on localhost is closed in test environments
    let err = fetcher.fetch("http://127.0.0.1:9/status").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert!(std::error::Error::source(&err).is_some());
    assert!(err.to_string().contains("127.0.0.1:9"));
}

#[tokio::test]
async fn board_failure_message_carries_the_root_cause() {
    let fetcher = Arc::new(HttpFetcher::new(2_000).unwrap());
    let pipeline = Pipeline::new("http://127.0.0.1:9/status", fetcher, Catalogue::builtin());
    let board = StatusBoard::new(pipeline);

    let err = match board.refresh(None).await {
        RefreshOutcome::Failed(e) => e,
        other => panic!("expected failure, got {other:?}"),
    };
    let mut root: &dyn std::error::Error = &err;
    while let Some(next) = root.source() {
        root = next;
    }

    match board.status() {
        RefreshStatus::Failed(msg) => {
            assert!(msg.starts_with("Failed to fetch live status. Please try again later: "), "{msg}");
            assert!(msg.contains("127.0.0.1:9"), "{msg}");
            assert!(msg.contains(&root.to_string()), "{msg} lacks {root}");
        }
        other => panic!("expected failure status, got {other:?}"),
    }
}

#[tokio::test]
async fn proxy_receives_encoded_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw"))
        .and(query_param("url", "https://www.skigeilo.no/webkamera-og-vaer"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let direct: Arc<dyn Fetch> = Arc::new(HttpFetcher::new(5_000).unwrap());
    let proxied = Arc::new(ProxiedFetcher::new(format!("{}/raw?url=", server.uri()), direct));
    let pipeline = Pipeline::new("https://www.skigeilo.no/webkamera-og-vaer", proxied, Catalogue::builtin());

    let out = pipeline.run(None).await.unwrap();
    let lift = out.iter().find(|f| f.feature.full_name == "B-Fugleleiken").unwrap();
    assert!(lift.is_open);
}
