pub mod document;
pub mod event;
pub mod faq;
pub mod identity;
pub mod job;
pub mod message;

pub use document::{
    Decision, DocumentRecord, DocumentResponse, DocumentStatus, StoredMetadata, UploadReceipt,
};
pub use event::{CreateEventRequest, Event};
pub use faq::{FaqAnswer, FaqEntry};
pub use identity::{Identity, Role};
pub use job::{JobApplication, JobPosting, PostJobRequest};
pub use message::{DeliveryStatus, MessageRecord};
