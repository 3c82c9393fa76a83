//! Concurrent writers against the JSON file collections

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use eventhub::database::JsonFileStore;
use eventhub::models::participant::ParticipantStatus;
use eventhub::models::{Event, Participant};
use eventhub::{DatabaseService, EventHubError};
use helpers::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_last_seat_goes_to_exactly_one_registrant() {
    let ctx = TestContext::with_json_files();
    let event = ctx
        .services
        .event_service
        .create(create_test_event_request("Last seat", 1))
        .await
        .unwrap();

    let attempts = (0..16).map(|i| {
        let services = ctx.services.clone();
        let event_id = event.id.clone();
        tokio::spawn(async move {
            services
                .participant_service
                .register(&event_id, create_test_participant_request(&format!("user-{}", i)))
                .await
        })
    });
    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.expect("Task panicked"))
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let full = results
        .iter()
        .filter(|r| matches!(r, Err(EventHubError::CapacityExceeded { .. })))
        .count();
    assert_eq!(winners, 1);
    assert_eq!(full, 15);

    assert_eq!(ctx.seats_taken(&event.id).await, 1);
    let stored = ctx.services.participant_service.find_by_event(&event.id).await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_seat_count_matches_live_participants_under_churn() {
    let ctx = TestContext::with_json_files();
    let event = ctx
        .services
        .event_service
        .create(create_test_event_request("Churn", 50))
        .await
        .unwrap();

    let registrations = (0..20).map(|i| {
        let services = ctx.services.clone();
        let event_id = event.id.clone();
        tokio::spawn(async move {
            services
                .participant_service
                .register(&event_id, create_test_participant_request(&format!("user-{}", i)))
                .await
        })
    });
    let registered: Vec<_> = join_all(registrations)
        .await
        .into_iter()
        .map(|joined| joined.expect("Task panicked").expect("Registration failed"))
        .collect();

    // Cancel every other registration while confirming the rest
    let updates = registered.iter().enumerate().map(|(i, participant)| {
        let services = ctx.services.clone();
        let id = participant.id.clone();
        tokio::spawn(async move {
            if i % 2 == 0 {
                services.participant_service.cancel(&id).await.map(|_| ())
            } else {
                services.participant_service.confirm(&id).await.map(|_| ())
            }
        })
    });
    for joined in join_all(updates).await {
        joined.expect("Task panicked").expect("Update failed");
    }

    let participants = ctx.services.participant_service.find_by_event(&event.id).await.unwrap();
    let live = participants.iter().filter(|p| p.status.holds_seat()).count() as u32;
    assert_eq!(live, 10);
    assert_eq!(ctx.seats_taken(&event.id).await, live);
    assert_eq!(
        participants
            .iter()
            .filter(|p| p.status == ParticipantStatus::Confirmed)
            .count(),
        10
    );
}

#[tokio::test]
async fn test_state_survives_reopening_the_files() {
    let ctx = TestContext::with_json_files();
    let event = ctx
        .services
        .event_service
        .create(create_test_event_request("Durable", 3))
        .await
        .unwrap();
    let participant = ctx
        .services
        .participant_service
        .register(&event.id, create_test_participant_request("u1"))
        .await
        .unwrap();

    let dir = ctx.temp_dir.as_ref().expect("file-backed context").path();
    let backoff = Duration::from_millis(1);
    let events = JsonFileStore::<Event>::new(dir.join("events.json"), 1, backoff);
    let participants = JsonFileStore::<Participant>::new(dir.join("participants.json"), 1, backoff);
    let reopened = DatabaseService::new(Arc::new(events), Arc::new(participants));

    let events = reopened.events.list().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].current_participants, 1);
    assert_eq!(
        reopened.participants.find_by_id(&participant.id).await.unwrap(),
        Some(participant)
    );
}
