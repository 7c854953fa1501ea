//! Sample data the portal starts with

use alumnet_core::models::{
    DocumentRecord, DocumentStatus, Event, FaqEntry, Identity, JobPosting,
};
use alumnet_core::AppError;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::identity::StaticIdentityStore;
use crate::messaging::MessageStore;

pub const ADMIN_EMAIL: &str = "admin@alumni.edu";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const ALUMNI_PASSWORD: &str = "alumni123";

// Seeded records keep fixed ids so they can be addressed across runs.
const DOCUMENT_ID_BASE: u128 = 0x0d0c_0000_0000_4000_8000_0000_0000_0000;
const EVENT_ID_BASE: u128 = 0x0e7e_0000_0000_4000_8000_0000_0000_0000;
const JOB_ID_BASE: u128 = 0x00b0_0000_0000_4000_8000_0000_0000_0000;

pub fn identities() -> Result<StaticIdentityStore, AppError> {
    let mut store = StaticIdentityStore::new();
    store.insert(Identity::admin(ADMIN_EMAIL, "Alumni Office"), ADMIN_PASSWORD)?;
    for identity in [
        Identity::alumni(
            "rahul.sharma@alumni.edu",
            "Rahul Sharma",
            2018,
            "B.Tech Computer Science",
        )
        .with_company("Infosys"),
        Identity::alumni("priya.nair@alumni.edu", "Priya Nair", 2019, "MBA")
            .with_company("Deloitte"),
        Identity::alumni("arjun.mehta@alumni.edu", "Arjun Mehta", 2020, "B.E Mechanical"),
    ] {
        store.insert(identity, ALUMNI_PASSWORD)?;
    }
    Ok(store)
}

pub fn documents(now: DateTime<Utc>) -> Vec<DocumentRecord> {
    let record =
        |n: u128, owner: &str, title: &str, filename: &str, category: &str, days_ago: i64| {
            DocumentRecord {
                id: Uuid::from_u128(DOCUMENT_ID_BASE + n),
                owner: owner.to_string(),
                title: title.to_string(),
                original_filename: filename.to_string(),
                category: category.to_string(),
                content_type: if filename.ends_with(".pdf") {
                    "application/pdf".to_string()
                } else {
                    "image/jpeg".to_string()
                },
                status: DocumentStatus::Pending,
                uploaded_at: now - Duration::days(days_ago),
                file_size: 240 * 1024,
                comment: String::new(),
                storage_path: None,
                remote_id: None,
                decided_at: None,
            }
        };

    let mut approved = record(
        1,
        "rahul.sharma@alumni.edu",
        "Degree Certificate",
        "degree_certificate.pdf",
        "certificate",
        12,
    );
    approved.status = DocumentStatus::Approved;
    approved.comment = "Verified against university records.".to_string();
    approved.decided_at = Some(now - Duration::days(10));

    vec![
        approved,
        record(2, "priya.nair@alumni.edu", "MBA Transcript", "transcript.pdf", "transcript", 3),
        record(
            3,
            "arjun.mehta@alumni.edu",
            "Employment Letter",
            "offer_letter.jpg",
            "employment",
            1,
        ),
    ]
}

pub fn events(now: DateTime<Utc>) -> Vec<Event> {
    [
        (
            "Annual Alumni Reunion",
            "Dinner and campus tour",
            30,
            "Main Auditorium",
            200,
        ),
        (
            "Career Mentorship Session",
            "Small-group mentoring with senior alumni",
            14,
            "Seminar Hall 2",
            25,
        ),
        (
            "Startup Pitch Night",
            "Alumni founders pitch to the network",
            45,
            "Innovation Center",
            60,
        ),
    ]
    .into_iter()
    .zip(1u128..)
    .map(|((title, description, days_ahead, location, capacity), n)| Event {
        id: Uuid::from_u128(EVENT_ID_BASE + n),
        title: title.to_string(),
        description: description.to_string(),
        date: now + Duration::days(days_ahead),
        location: location.to_string(),
        capacity,
        registered: 0,
        registrants: Vec::new(),
    })
    .collect()
}

pub fn jobs(now: DateTime<Utc>) -> Vec<JobPosting> {
    [
        ("Software Engineer", "Infosys", "Bengaluru", "rahul.sharma@alumni.edu", 5),
        ("Business Analyst", "Deloitte", "Mumbai", "priya.nair@alumni.edu", 2),
    ]
    .into_iter()
    .zip(1u128..)
    .map(|((title, company, location, posted_by, days_ago), n)| JobPosting {
        id: Uuid::from_u128(JOB_ID_BASE + n),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        description: String::new(),
        posted_by: posted_by.to_string(),
        posted_at: now - Duration::days(days_ago),
        open: true,
    })
    .collect()
}

pub async fn messages(store: &MessageStore) -> Result<(), AppError> {
    store
        .append(
            ADMIN_EMAIL,
            "all",
            "Welcome to the alumni portal! Keep your profile and documents up to date.",
        )
        .await?;
    store
        .append(
            "rahul.sharma@alumni.edu",
            "priya.nair@alumni.edu",
            "Hi Priya, are you attending the reunion this year?",
        )
        .await?;
    store
        .append("priya.nair@alumni.edu", "rahul.sharma@alumni.edu", "Yes! See you there.")
        .await?;
    Ok(())
}

pub fn faq_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            &["upload", "document", "certificate", "transcript"],
            "How do I upload a document?",
            "Open the Documents section, choose a PDF or JPEG up to 10 MB, add a title and \
             category, and submit. The alumni office reviews every upload.",
        ),
        FaqEntry::new(
            &["status", "approved", "rejected", "pending", "review"],
            "How do I check my document status?",
            "Each document shows its status (pending, approved or rejected) along with the \
             reviewer's comment.",
        ),
        FaqEntry::new(
            &["event", "register", "reunion", "seat"],
            "How do I register for an event?",
            "Go to Events and register. Registration closes once the event is full.",
        ),
        FaqEntry::new(
            &["job", "apply", "career", "hiring", "opening"],
            "How do I apply for a job?",
            "Browse the Jobs board and apply with a short cover note. Posters see every \
             application.",
        ),
        FaqEntry::new(
            &["message", "contact", "chat", "admin"],
            "How do I contact the alumni office?",
            "Send a message to the admin from the Messages section.",
        ),
        FaqEntry::new(
            &["password", "login", "sign in", "account"],
            "I can't sign in. What should I do?",
            "Check that you picked the right role and that your email is the one registered \
             with the alumni office.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityStore;
    use alumnet_core::models::Role;

    #[test]
    fn test_seeded_documents_belong_to_seeded_alumni() {
        let store = identities().unwrap();
        assert_eq!(store.identities(Role::Admin).len(), 1);
        for doc in documents(Utc::now()) {
            let owner = store.lookup(&doc.owner).unwrap();
            assert_eq!(owner.role, Role::Alumni);
        }
    }

    #[test]
    fn test_seeded_ids_are_stable() {
        let now = Utc::now();
        let first: Vec<_> = events(now).into_iter().map(|e| e.id).collect();
        let second: Vec<_> = events(now).into_iter().map(|e| e.id).collect();
        assert_eq!(first, second);
        assert_eq!(documents(now)[0].id, documents(now)[0].id);
        assert_ne!(jobs(now)[0].id, jobs(now)[1].id);
    }
}
