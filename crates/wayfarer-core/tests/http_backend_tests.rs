mod common;

use std::{sync::Arc, time::Duration};

use common::{create_test_store, valid_trip};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};
use wayfarer_core::{
    ChatFlow, ChatHandoff, ErrorKind, HttpBackend, ItineraryResult, Narrative, PlannerFlow,
    PlannerState, TravelBackend,
};

/// Serves exactly one HTTP response and hands back the raw request.
async fn start_single_response_server(
    status: &str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind local test listener");
    let addr = listener.local_addr().unwrap();

    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .into_bytes();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let _ = socket.write_all(&response).await;
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}

/// Reads headers and, when present, the full `Content-Length` body.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&raw);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if raw.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&raw).into_owned()
}

fn request_body(raw: &str) -> serde_json::Value {
    let (_, body) = raw.split_once("\r\n\r\n").expect("request has a body");
    serde_json::from_str(body).expect("request body is JSON")
}

#[tokio::test]
async fn test_gateway_timeout_fails_planner_without_storing() {
    let (base_url, server) =
        start_single_response_server("504 Gateway Timeout", r#"{"detail":"timeout"}"#).await;
    let (_temp_dir, store) = create_test_store().await;
    let planner = PlannerFlow::new(Arc::new(HttpBackend::new(base_url)), store.clone());

    let err = planner.submit(valid_trip()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(matches!(
        planner.state(),
        PlannerState::Failed {
            kind: ErrorKind::Timeout,
            ..
        }
    ));
    assert!(store.get().await.unwrap().is_none());

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /api/travel/generate-itinerary"));
}

#[tokio::test]
async fn test_server_error_is_transport_with_status() {
    let (base_url, _server) =
        start_single_response_server("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
    let (_temp_dir, store) = create_test_store().await;
    let planner = PlannerFlow::new(Arc::new(HttpBackend::new(base_url)), store);

    let err = planner.submit(valid_trip()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.user_message(), "Failed to generate itinerary: HTTP 500");
}

#[tokio::test]
async fn test_successful_generation_posts_trip_payload() {
    let (base_url, server) = start_single_response_server(
        "200 OK",
        r#"{"status":"success","itinerary":"Day 1: Dublin","flights":{"data":[]},"county_dates":{"Dublin":{"start_date":"2025-06-01","end_date":"2025-06-08"}}}"#,
    )
    .await;
    let (_temp_dir, store) = create_test_store().await;
    let planner = PlannerFlow::new(Arc::new(HttpBackend::new(base_url)), store.clone());

    let handoff = planner.submit(valid_trip()).await.unwrap();
    assert_eq!(handoff.result.flight_offers, Some(vec![]));
    assert!(handoff.result.region_dates.contains_key("Dublin"));
    assert_eq!(store.get().await.unwrap(), Some(handoff.result));

    let body = request_body(&server.await.unwrap());
    assert_eq!(body["origin_country"], "LHR");
    assert_eq!(body["destination_country"], "IE");
    assert_eq!(body["arrival_date"], "2025-06-01");
    assert_eq!(body["travel_class"], "ECONOMY");
    assert_eq!(body["preferred_counties"][0], "Dublin");
}

#[tokio::test]
async fn test_chat_request_carries_message_and_history() {
    let (base_url, server) =
        start_single_response_server("200 OK", r#"{"response":"Visit Kilmainham Gaol."}"#).await;
    let (_temp_dir, store) = create_test_store().await;
    let handoff = ChatHandoff {
        result: ItineraryResult::new(Narrative::Text("Day 1: Dublin".to_string())),
        request: Some(valid_trip()),
    };
    let chat = ChatFlow::seed(Arc::new(HttpBackend::new(base_url)), Some(handoff), &store)
        .await
        .unwrap();

    let turn = chat.send("Any history museums?").await.unwrap();
    assert_eq!(turn.text, "Visit Kilmainham Gaol.");

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /api/chat"));
    let body = request_body(&raw);
    assert_eq!(body["message"], "Any history museums?");
    assert_eq!(body["conversation_history"][0]["role"], "assistant");
    assert_eq!(body["travel_data"]["adults"], 2);
}

#[tokio::test]
async fn test_health_check() {
    let (base_url, _server) =
        start_single_response_server("200 OK", r#"{"status":"healthy"}"#).await;

    let status = HttpBackend::new(base_url).health().await.unwrap();
    assert!(status.is_healthy());
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Bind and drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpBackend::new(format!("http://{addr}"))
        .health()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_tolerates_null_slots_and_partial_county_dates() {
    let (base_url, _server) = start_single_response_server(
        "200 OK",
        r#"{"itinerary":[{"day":1,"county":"Dublin","activities":{"morning":"Trinity College","afternoon":null,"evening":null}}],"county_dates":{"Dublin":{"start_date":"2025-06-01"}}}"#,
    )
    .await;
    let (_temp_dir, store) = create_test_store().await;
    let planner = PlannerFlow::new(Arc::new(HttpBackend::new(base_url)), store);

    let handoff = planner.submit(valid_trip()).await.unwrap();
    let Narrative::Days(days) = &handoff.result.narrative else {
        panic!("expected a structured narrative");
    };
    assert_eq!(days[0].region, "Dublin");
    assert_eq!(days[0].activities.morning, "Trinity College");
    assert!(handoff.result.region_dates.is_empty());
}

#[tokio::test]
async fn test_health_check_gives_up_on_silent_service() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _server = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let backend =
        HttpBackend::new(format!("http://{addr}")).with_health_timeout(Duration::from_millis(200));
    let err = tokio::time::timeout(Duration::from_secs(5), backend.health())
        .await
        .expect("health check should give up on its own")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
}
