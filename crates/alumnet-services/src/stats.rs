use alumnet_core::models::{DocumentStatus, Role};
use serde::Serialize;

use crate::documents::DocumentRepository;
use crate::events::EventRepository;
use crate::identity::IdentityStore;
use crate::jobs::JobBoard;
use crate::messaging::MessageStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total_alumni: usize,
    pub pending_documents: usize,
    pub approved_documents: usize,
    pub rejected_documents: usize,
    pub events: usize,
    pub open_jobs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlumniStats {
    pub pending_documents: usize,
    pub approved_documents: usize,
    pub rejected_documents: usize,
    pub registered_events: usize,
    pub job_applications: usize,
    pub unread_messages: usize,
}

pub async fn admin_stats(
    identities: &dyn IdentityStore,
    documents: &DocumentRepository,
    events: &EventRepository,
    jobs: &JobBoard,
) -> AdminStats {
    AdminStats {
        total_alumni: identities.identities(Role::Alumni).len(),
        pending_documents: documents.count_by_status(DocumentStatus::Pending).await,
        approved_documents: documents.count_by_status(DocumentStatus::Approved).await,
        rejected_documents: documents.count_by_status(DocumentStatus::Rejected).await,
        events: events.list().await.len(),
        open_jobs: jobs.open_count().await,
    }
}

pub async fn alumni_stats(
    email: &str,
    documents: &DocumentRepository,
    events: &EventRepository,
    jobs: &JobBoard,
    messages: &MessageStore,
) -> AlumniStats {
    let own = documents.by_owner(email).await;
    let count = |status: DocumentStatus| own.iter().filter(|d| d.status == status).count();

    AlumniStats {
        pending_documents: count(DocumentStatus::Pending),
        approved_documents: count(DocumentStatus::Approved),
        rejected_documents: count(DocumentStatus::Rejected),
        registered_events: events.registrations_for(email).await,
        job_applications: jobs.applications_by(email).await.len(),
        unread_messages: messages.unread_count(email).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::pending_document;
    use alumnet_core::models::Decision;

    #[tokio::test]
    async fn test_alumni_stats_counts_own_documents() {
        let mine = pending_document("a@x.edu", "Mine");
        let other = pending_document("b@x.edu", "Other");
        let documents = DocumentRepository::with_records(vec![mine.clone(), other]);
        documents.decide(mine.id, Decision::Approve, "").await.unwrap();

        let messages = MessageStore::new();
        messages.append("admin@x.edu", "a@x.edu", "hi").await.unwrap();

        let stats = alumni_stats(
            "a@x.edu",
            &documents,
            &EventRepository::new(),
            &JobBoard::new(),
            &messages,
        )
        .await;
        assert_eq!(stats.approved_documents, 1);
        assert_eq!(stats.pending_documents, 0);
        assert_eq!(stats.unread_messages, 1);
        assert_eq!(stats.job_applications, 0);
    }
}
