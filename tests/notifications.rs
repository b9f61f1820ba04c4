
use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use http::StatusCode;
use secrecy::Secret;
use serde_json::{json, Value};
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;
use time::macros::datetime;
use tokio::sync::mpsc;
use tools::{invitation, AppData};
use tracing_test::traced_test;
use wedding_rsvp::modules::store::MemoryStore;
use wedding_rsvp::utils::notifications::Notifier;

type Received = mpsc::UnboundedSender<(Option<String>, Value)>;

async fn receive(
    State(tx): State<Received>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    tx.send((auth, body)).unwrap();
    StatusCode::OK
}

async fn spawn_webhook(status: StatusCode) -> (String, mpsc::UnboundedReceiver<(Option<String>, Value)>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
    let addr = listener.local_addr().unwrap();

    let router = if status == StatusCode::OK {
        Router::new().route("/hook", post(receive)).with_state(tx)
    } else {
        Router::new().route("/hook", post(move || async move { status }))
    };

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router.into_make_service())
            .await
            .unwrap()
    });

    (format!("http://{addr}/hook"), rx)
}

async fn spawn_stalled_webhook(delay: Duration) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
    let addr = listener.local_addr().unwrap();

    let router = Router::new().route(
        "/hook",
        post(move || async move {
            tokio::time::sleep(delay).await;
            StatusCode::OK
        }),
    );

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router.into_make_service())
            .await
            .unwrap()
    });

    format!("http://{addr}/hook")
}

fn payload() -> Value {
    json!({
        "inviteCode": "abc-123",
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@example.com",
        "attendance": "yes",
        "guestCount": 3,
        "adult_count": 2,
        "child_count": 1,
        "dietary": "vegetarian",
        "message": "Can't wait!",
    })
}

fn store() -> MemoryStore {
    MemoryStore::new([invitation("abc-123", datetime!(2025-11-15 00:00 UTC), 4)])
}

#[traced_test]
#[tokio::test]
async fn webhook_receives_stored_record() {
    let (url, mut rx) = spawn_webhook(StatusCode::OK).await;
    let notifier = Notifier::webhook(url, Some(Secret::new("anon-key".to_string()))).unwrap();
    let app = AppData::with_notifier(store(), notifier, datetime!(2025-10-01 00:00 UTC)).await;

    let res = app
        .client()
        .post(app.api("/rsvp"))
        .json(&payload())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (auth, body) = rx.recv().await.unwrap();
    assert_eq!(auth.as_deref(), Some("Bearer anon-key"));
    assert_eq!(body["type"], "INSERT");
    let record = &body["record"];
    assert_eq!(record["name"], "Jane Doe");
    assert_eq!(record["email"], "jane@example.com");
    assert_eq!(record["attending"], true);
    assert_eq!(record["guest_count"], 3);
    assert_eq!(record["dietary_restrictions"], "vegetarian");
    assert_eq!(record["message"], "Can't wait!");
}

#[traced_test]
#[tokio::test]
async fn failing_webhook_does_not_fail_rsvp() {
    let (url, _rx) = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR).await;
    let notifier = Notifier::webhook(url, None).unwrap();
    let app = AppData::with_notifier(store(), notifier, datetime!(2025-10-01 00:00 UTC)).await;

    let res = app
        .client()
        .post(app.api("/rsvp"))
        .json(&payload())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(app.store.rsvp_count().await, 1);
}

#[traced_test]
#[tokio::test]
async fn stalled_webhook_does_not_delay_confirmation() {
    let url = spawn_stalled_webhook(Duration::from_secs(30)).await;
    let notifier = Notifier::webhook(url, None).unwrap();
    let app = AppData::with_notifier(store(), notifier, datetime!(2025-10-01 00:00 UTC)).await;

    let res = tokio::time::timeout(
        Duration::from_secs(5),
        app.client().post(app.api("/rsvp")).json(&payload()).send(),
    )
    .await
    .expect("confirmation waited on the webhook")
    .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "RSVP submitted successfully!");
    assert_eq!(app.store.rsvp_count().await, 1);
}
