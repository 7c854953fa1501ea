//! Alumnet Services
//!
//! Workflows and repositories behind the alumni portal: authentication and
//! sessions, document upload with bounded retry, admin approval, messaging,
//! events, jobs, the FAQ assistant and dashboard counters. [`PortalState`]
//! ties them together and is the only entry point a view layer needs.

pub mod approval;
pub mod auth;
pub mod documents;
pub mod events;
pub mod faq;
pub mod identity;
pub mod jobs;
pub mod messaging;
pub mod seed;
pub mod session;
pub mod state;
pub mod stats;
pub mod upload;

#[cfg(test)]
mod test_helpers;

pub use approval::{ApprovalWorkflow, BulkDecision, BulkFailure};
pub use auth::authenticate;
pub use documents::DocumentRepository;
pub use events::EventRepository;
pub use faq::FaqAssistant;
pub use identity::{hash_password, verify_password, IdentityStore, StaticIdentityStore};
pub use jobs::JobBoard;
pub use messaging::MessageStore;
pub use session::Session;
pub use state::{Action, Outcome, PortalState};
pub use stats::{AdminStats, AlumniStats};
pub use upload::{RetryPolicy, UploadFile, UploadRequest, UploadWorkflow};
