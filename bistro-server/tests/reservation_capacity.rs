//! Slot capacity and booking lifecycle over HTTP

mod common;

use common::{TestApp, reservation_form};
use serde_json::json;
use shared::models::{NewReservation, ReservationStatus, StaffRole};

use bistro_server::store::ReservationStore;

async fn confirmed(app: &TestApp, date: &str, time: &str, persons: i32) -> i64 {
    app.store
        .insert_reservation(NewReservation {
            full_name: "Walk In".into(),
            phone: "0600000000".into(),
            email: None,
            date: date.into(),
            time: time.into(),
            persons,
            notes: None,
            status: ReservationStatus::Confirmed,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn empty_slot_reports_full_capacity() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/reservations/check",
            json!({"date": "2026-11-20", "time": "20:00"}),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"available": true, "currentCount": 0, "maxCapacity": 50})
    );
}

#[tokio::test]
async fn full_slot_sends_new_booking_to_waitlist() {
    let app = TestApp::with_capacity(2).await;
    confirmed(&app, "2026-11-20", "20:00", 1).await;
    confirmed(&app, "2026-11-20", "20:00", 1).await;

    let (_, check) = app
        .post(
            "/api/reservations/check",
            json!({"date": "2026-11-20", "time": "20:00"}),
        )
        .await;
    assert_eq!(check["available"], false);
    assert_eq!(check["currentCount"], 2);

    let (status, body) = app
        .post("/api/reservations", reservation_form("2026-11-20", "20:00", 2))
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["status"], "waitlist");
    assert_eq!(body["full_name"], "Amina Benali");
    assert_eq!(body["persons"], 2);
}

#[tokio::test]
async fn other_slots_do_not_count() {
    let app = TestApp::with_capacity(2).await;
    confirmed(&app, "2026-11-20", "20:00", 5).await;
    confirmed(&app, "2026-11-21", "19:30", 5).await;

    let (status, body) = app
        .post("/api/reservations", reservation_form("2026-11-20", "19:30", 4))
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn party_size_is_not_compared_with_remaining_seats() {
    let app = TestApp::new();
    confirmed(&app, "2026-11-20", "20:00", 49).await;

    let (_, body) = app
        .post("/api/reservations", reservation_form("2026-11-20", "20:00", 4))
        .await;
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn zero_capacity_waitlists_everything() {
    let app = TestApp::with_capacity(0).await;
    let (_, body) = app
        .post("/api/reservations", reservation_form("2026-11-20", "20:00", 1))
        .await;
    assert_eq!(body["status"], "waitlist");
}

#[tokio::test]
async fn concurrent_bookings_at_last_seat_are_both_pending() {
    let app = TestApp::with_capacity(3).await;
    confirmed(&app, "2026-11-20", "20:00", 2).await;

    let first = app.post("/api/reservations", reservation_form("2026-11-20", "20:00", 2));
    let second = app.post("/api/reservations", reservation_form("2026-11-20", "20:00", 2));
    let ((s1, b1), (s2, b2)) = tokio::join!(first, second);

    assert_eq!((s1.as_u16(), s2.as_u16()), (201, 201));
    assert_eq!(b1["status"], "pending");
    assert_eq!(b2["status"], "pending");
}

#[tokio::test]
async fn invalid_form_is_rejected_and_not_stored() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/api/reservations", reservation_form("20/11/2026", "20:00", 0))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], 2);
    assert!(app.store.list_reservations().await.unwrap().is_empty());
}

#[tokio::test]
async fn confirming_a_waitlisted_booking_changes_only_its_status() {
    let app = TestApp::with_capacity(0).await;
    let (_, created) = app
        .post("/api/reservations", reservation_form("2026-11-20", "20:00", 3))
        .await;
    assert_eq!(created["status"], "waitlist");

    let token = app.token(StaffRole::Manager).await;
    let uri = format!("/api/admin/reservations/{}/status", created["id"]);
    let (status, updated) = app
        .send("PUT", &uri, Some(json!({"status": "confirmed"})), Some(&token))
        .await;

    assert_eq!(status, 200);
    assert_eq!(updated["status"], "confirmed");
    for field in ["id", "full_name", "phone", "email", "date", "time", "persons", "notes", "created_at"] {
        assert_eq!(updated[field], created[field], "{field} changed");
    }

    // confirmed seats now count against the slot
    let (_, check) = app
        .post(
            "/api/reservations/check",
            json!({"date": "2026-11-20", "time": "20:00"}),
        )
        .await;
    assert_eq!(check["currentCount"], 3);
}

#[tokio::test]
async fn capacity_setting_change_applies_to_next_check() {
    let app = TestApp::new();
    let token = app.token(StaffRole::Admin).await;

    let (status, _) = app
        .send(
            "PUT",
            "/api/admin/settings/max_capacity",
            Some(json!({"value": "0"})),
            Some(&token),
        )
        .await;
    assert_eq!(status, 200);

    let (_, check) = app
        .post(
            "/api/reservations/check",
            json!({"date": "2026-11-20", "time": "20:00"}),
        )
        .await;
    assert_eq!(check["maxCapacity"], 0);
    assert_eq!(check["available"], false);
}

#[tokio::test]
async fn failing_store_rejects_booking_and_records_nothing() {
    let app = TestApp::new();
    app.store.set_unavailable(true);

    let (status, body) = app
        .post(
            "/api/reservations",
            reservation_form("2026-11-20", "20:00", 2),
        )
        .await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], 9003);
    assert!(body.get("id").is_none());

    let (status, _) = app
        .post(
            "/api/reservations/check",
            json!({"date": "2026-11-20", "time": "20:00"}),
        )
        .await;
    assert_eq!(status, 500);

    app.store.set_unavailable(false);
    assert!(app.store.list_reservations().await.unwrap().is_empty());
}

#[tokio::test]
async fn write_failure_after_availability_check_is_reported() {
    let app = TestApp::new();
    app.store.set_writes_failing(true);

    let (status, body) = app
        .post(
            "/api/reservations",
            reservation_form("2026-11-20", "20:00", 2),
        )
        .await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], 9004);
    assert_eq!(body["message"], "Failed to write to the data store");

    app.store.set_writes_failing(false);
    assert!(app.store.list_reservations().await.unwrap().is_empty());

    let (status, body) = app
        .post(
            "/api/reservations",
            reservation_form("2026-11-20", "20:00", 2),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["status"], "pending");
}
