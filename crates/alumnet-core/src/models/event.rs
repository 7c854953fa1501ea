use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// An alumni event with a fixed number of places
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub capacity: u32,
    pub registered: u32,
    pub registrants: Vec<String>,
}

impl Event {
    pub fn from_request(request: CreateEventRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            date: request.date,
            location: request.location,
            capacity: request.capacity,
            registered: 0,
            registrants: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.registered >= self.capacity
    }

    pub fn places_left(&self) -> u32 {
        self.capacity.saturating_sub(self.registered)
    }

    /// Take one place for `email`. A full event is left untouched.
    pub fn register(&mut self, email: &str) -> Result<(), AppError> {
        if self.is_full() {
            return Err(AppError::CapacityReached {
                id: self.id,
                capacity: self.capacity,
            });
        }
        self.registered += 1;
        self.registrants.push(email.to_string());
        Ok(())
    }
}

/// Request DTO for creating an event
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Event title must be between 1 and 200 characters"
    ))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    #[validate(length(min = 1, message = "Event location is required"))]
    pub location: String,
    #[validate(range(min = 1, message = "Event capacity must be at least 1"))]
    pub capacity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(capacity: u32) -> Event {
        Event::from_request(CreateEventRequest {
            title: "Annual Reunion".to_string(),
            description: String::new(),
            date: Utc::now(),
            location: "Main Auditorium".to_string(),
            capacity,
        })
    }

    #[test]
    fn test_register_increments_by_one() {
        let mut e = event(2);
        e.register("a@x.edu").unwrap();
        assert_eq!(e.registered, 1);
        assert_eq!(e.places_left(), 1);
        assert_eq!(e.registrants, vec!["a@x.edu".to_string()]);
    }

    #[test]
    fn test_register_when_full_does_not_mutate() {
        let mut e = event(1);
        e.register("a@x.edu").unwrap();
        let err = e.register("b@x.edu").unwrap_err();
        assert!(matches!(err, AppError::CapacityReached { capacity: 1, .. }));
        assert_eq!(e.registered, 1);
        assert_eq!(e.registrants.len(), 1);
    }

    #[test]
    fn test_request_validation() {
        let request = CreateEventRequest {
            title: String::new(),
            description: String::new(),
            date: Utc::now(),
            location: "Hall".to_string(),
            capacity: 0,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("capacity"));
    }
}
