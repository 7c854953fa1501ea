use alumnet_core::models::{CreateEventRequest, Event};
use alumnet_core::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::session::Session;

#[derive(Default)]
pub struct EventRepository {
    events: RwLock<Vec<Event>>,
}

impl EventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    pub async fn create(
        &self,
        session: &Session,
        request: CreateEventRequest,
    ) -> Result<Event, AppError> {
        session.require_admin()?;
        request.validate()?;

        let event = Event::from_request(request);
        self.events.write().await.push(event.clone());

        tracing::info!(
            event_id = %event.id,
            title = %event.title,
            capacity = event.capacity,
            "Event created"
        );
        Ok(event)
    }

    /// Take one place on `event_id` for the session's identity.
    ///
    /// The same identity may register more than once; each registration takes a place.
    pub async fn register(&self, session: &Session, event_id: Uuid) -> Result<Event, AppError> {
        let mut events = self.events.write().await;
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

        event.register(session.email())?;

        tracing::info!(
            event_id = %event_id,
            email = %session.email(),
            registered = event.registered,
            capacity = event.capacity,
            "Event registration"
        );
        Ok(event.clone())
    }

    pub async fn get(&self, id: Uuid) -> Option<Event> {
        self.events.read().await.iter().find(|e| e.id == id).cloned()
    }

    pub async fn list(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    pub async fn registrations_for(&self, email: &str) -> usize {
        self.events
            .read()
            .await
            .iter()
            .map(|e| e.registrants.iter().filter(|r| r.as_str() == email).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumnet_core::models::Identity;
    use chrono::Utc;

    fn admin() -> Session {
        Session::start(Identity::admin("admin@alumni.edu", "Admin"))
    }

    fn alumni(email: &str) -> Session {
        Session::start(Identity::alumni(email, "Alumni", 2015, "B.E"))
    }

    fn request(capacity: u32) -> CreateEventRequest {
        CreateEventRequest {
            title: "Career Fair".to_string(),
            description: "Meet recruiters".to_string(),
            date: Utc::now(),
            location: "Hall B".to_string(),
            capacity,
        }
    }

    #[tokio::test]
    async fn test_only_admin_creates_events() {
        let repo = EventRepository::new();
        let err = repo.create(&alumni("a@x.edu"), request(10)).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = repo.create(&admin(), request(0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        repo.create(&admin(), request(10)).await.unwrap();
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_register_until_full() {
        let repo = EventRepository::new();
        let event = repo.create(&admin(), request(2)).await.unwrap();

        let after = repo.register(&alumni("a@x.edu"), event.id).await.unwrap();
        assert_eq!(after.registered, 1);
        repo.register(&alumni("b@x.edu"), event.id).await.unwrap();

        let err = repo.register(&alumni("c@x.edu"), event.id).await.unwrap_err();
        assert!(matches!(err, AppError::CapacityReached { .. }));
        assert_eq!(repo.get(event.id).await.unwrap().registered, 2);
        assert_eq!(repo.registrations_for("c@x.edu").await, 0);
    }

    #[tokio::test]
    async fn test_register_unknown_event() {
        let repo = EventRepository::new();
        let err = repo.register(&alumni("a@x.edu"), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
