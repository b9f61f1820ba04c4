//! Needs a reachable postgres in `DATABASE_URL`; run with `cargo test -- --ignored`.

use serde_json::json;
use sqlx::{query_as, query_scalar, PgPool};
use time::macros::datetime;
use tracing_test::traced_test;
use wedding_rsvp::modules::database::PgStore;
use wedding_rsvp::modules::store::Store;
use wedding_rsvp::utils::rsvp::errors::RsvpError;
use wedding_rsvp::utils::rsvp::{submit_rsvp, RsvpRecord};

fn body(code: &str, attendance: &str) -> Vec<u8> {
    json!({
        "inviteCode": code,
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@example.com",
        "phone": "+1 555 0100",
        "attendance": attendance,
        "guestCount": 3,
        "adult_count": 2,
        "child_count": 1,
        "relationship_to_couple": "Cousin",
    })
    .to_string()
    .into_bytes()
}

#[traced_test]
#[sqlx::test(fixtures("invitations"))]
#[ignore = "requires DATABASE_URL"]
async fn finds_seeded_invitation(pool: PgPool) {
    let store = PgStore::new(pool);

    let invitation = store.find_invitation("abc-123").await.unwrap().unwrap();
    assert_eq!(invitation.allowed_guests, 4);
    assert_eq!(invitation.rsvp_deadline, datetime!(2025-11-15 23:59:59 UTC));

    assert!(store.find_invitation("zzz-999").await.unwrap().is_none());
    assert!(store.find_invitation("").await.unwrap().is_none());
}

#[traced_test]
#[sqlx::test(fixtures("invitations"))]
#[ignore = "requires DATABASE_URL"]
async fn unique_violation_becomes_already_submitted(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let now = datetime!(2025-10-01 00:00 UTC);

    let record = submit_rsvp(&store, &body("abc-123", "yes"), now)
        .await
        .unwrap();
    assert_eq!(record.guest_count, 3);

    let again = submit_rsvp(&store, &body("abc-123", "no"), now).await;
    assert!(matches!(again, Err(RsvpError::AlreadySubmitted)));

    let count: i64 = query_scalar("SELECT count(*) FROM rsvps WHERE invitation_id = $1")
        .bind("abc-123")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let stored: RsvpRecord = query_as(
        r#"
        SELECT invitation_id, name, email, phone, attending, guest_count, adult_count,
               child_count, dietary_restrictions, message, gift_preference, relationship_to_couple
        FROM rsvps WHERE invitation_id = $1
    "#,
    )
    .bind("abc-123")
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(stored, record);
}

#[traced_test]
#[sqlx::test(fixtures("invitations"))]
#[ignore = "requires DATABASE_URL"]
async fn declined_reply_is_zeroed_in_table(pool: PgPool) {
    let store = PgStore::new(pool.clone());

    submit_rsvp(&store, &body("def-456", "no"), datetime!(2025-08-01 00:00 UTC))
        .await
        .unwrap();

    let counts: (bool, i32, i32, i32) = query_as(
        "SELECT attending, guest_count, adult_count, child_count FROM rsvps WHERE invitation_id = $1",
    )
    .bind("def-456")
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(counts, (false, 0, 0, 0));
}
