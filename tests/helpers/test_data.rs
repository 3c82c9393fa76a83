//! Test data helpers for creating request payloads

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use eventhub::models::event::{CreateEventRequest, EventCategory, EventPriority};
use eventhub::models::participant::CreateParticipantRequest;

/// An event starting in a week with registration open until the day before
pub fn create_test_event_request(name: &str, capacity: i64) -> CreateEventRequest {
    let start = Utc::now() + Duration::days(7);
    CreateEventRequest {
        name: name.to_string(),
        description: "Monthly meetup".to_string(),
        status: None,
        category: EventCategory::Workshop,
        priority: EventPriority::Medium,
        start_date: start,
        end_date: start + Duration::hours(3),
        location: "Main hall".to_string(),
        capacity,
        organizer: "Community team".to_string(),
        registration_deadline: start - Duration::days(1),
    }
}

/// An event whose registration deadline has already passed
pub fn create_closed_event_request(name: &str) -> CreateEventRequest {
    let start = Utc::now() + Duration::days(1);
    CreateEventRequest {
        registration_deadline: Utc::now() - Duration::hours(1),
        start_date: start,
        end_date: start + Duration::hours(2),
        ..create_test_event_request(name, 10)
    }
}

pub fn create_test_participant_request(user_id: &str) -> CreateParticipantRequest {
    CreateParticipantRequest {
        user_id: user_id.to_string(),
        name: format!("Participant {}", user_id),
        email: format!("{}@example.com", user_id),
        phone: None,
        notes: None,
    }
}

/// Raw JSON body for `POST /event`
pub fn event_body(name: &str, capacity: i64) -> Value {
    let start = Utc::now() + Duration::days(7);
    json!({
        "name": name,
        "description": "Monthly meetup",
        "category": "WORKSHOP",
        "priority": "MEDIUM",
        "startDate": rfc3339(start),
        "endDate": rfc3339(start + Duration::hours(3)),
        "location": "Main hall",
        "capacity": capacity,
        "organizer": "Community team",
        "registrationDeadline": rfc3339(start - Duration::days(1)),
    })
}

/// Raw JSON body for `POST /event/:id/participant`
pub fn participant_body(user_id: &str) -> Value {
    json!({
        "userId": user_id,
        "name": format!("Participant {}", user_id),
        "email": format!("{}@example.com", user_id),
    })
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}
