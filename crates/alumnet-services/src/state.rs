//! Portal application state
//!
//! Owns every repository and workflow. Callers log in to get a [`Session`],
//! send [`Action`]s through [`PortalState::dispatch`] and read snapshots back.

use std::sync::Arc;

use alumnet_core::models::{
    CreateEventRequest, Decision, DocumentRecord, Event, FaqAnswer, JobApplication,
    JobPosting, MessageRecord, PostJobRequest, Role, UploadReceipt,
};
use alumnet_core::{AppError, DocumentValidator, PortalConfig};
use alumnet_storage::{create_storage, DocumentStore};
use chrono::Utc;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::approval::{ApprovalWorkflow, BulkDecision};
use crate::auth::authenticate;
use crate::documents::DocumentRepository;
use crate::events::EventRepository;
use crate::faq::FaqAssistant;
use crate::identity::IdentityStore;
use crate::jobs::JobBoard;
use crate::messaging::MessageStore;
use crate::seed;
use crate::session::Session;
use crate::stats::{self, AdminStats, AlumniStats};
use crate::upload::{RetryPolicy, UploadFile, UploadRequest, UploadWorkflow};

/// A user intent handed over by the view layer
#[derive(Debug, Clone)]
pub enum Action {
    Upload {
        file: UploadFile,
        category: String,
        title: String,
    },
    Decide {
        document_id: Uuid,
        decision: Decision,
        comment: String,
    },
    BulkApprove {
        comment: String,
    },
    SendMessage {
        to: String,
        text: String,
    },
    MarkRead {
        message_id: Uuid,
    },
    CreateEvent(CreateEventRequest),
    RegisterEvent {
        event_id: Uuid,
    },
    PostJob(PostJobRequest),
    ApplyJob {
        job_id: Uuid,
        cover_note: String,
    },
    CloseJob {
        job_id: Uuid,
    },
    AskFaq {
        question: String,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Upload { .. } => "upload",
            Action::Decide { .. } => "decide",
            Action::BulkApprove { .. } => "bulk_approve",
            Action::SendMessage { .. } => "send_message",
            Action::MarkRead { .. } => "mark_read",
            Action::CreateEvent(_) => "create_event",
            Action::RegisterEvent { .. } => "register_event",
            Action::PostJob(_) => "post_job",
            Action::ApplyJob { .. } => "apply_job",
            Action::CloseJob { .. } => "close_job",
            Action::AskFaq { .. } => "ask_faq",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    Uploaded(UploadReceipt),
    Decided(DocumentRecord),
    BulkApproved(BulkDecision),
    MessageSent(MessageRecord),
    MarkedRead { message_id: Uuid },
    EventCreated(Event),
    Registered(Event),
    JobPosted(JobPosting),
    Applied(JobApplication),
    JobClosed(JobPosting),
    Answer(FaqAnswer),
}

pub struct PortalState {
    config: PortalConfig,
    identities: Arc<dyn IdentityStore>,
    store: Arc<dyn DocumentStore>,
    documents: Arc<DocumentRepository>,
    messages: Arc<MessageStore>,
    events: EventRepository,
    jobs: JobBoard,
    faq: FaqAssistant,
    upload: UploadWorkflow,
    approval: ApprovalWorkflow,
}

impl PortalState {
    /// Empty portal over the given collaborators. The FAQ assistant still
    /// gets the standard entries.
    pub fn new(
        config: PortalConfig,
        store: Arc<dyn DocumentStore>,
        identities: Arc<dyn IdentityStore>,
    ) -> Self {
        Self::assemble(
            config,
            store,
            identities,
            DocumentRepository::new(),
            EventRepository::new(),
            JobBoard::new(),
        )
    }

    /// Portal loaded with the sample identities, documents, events, jobs and messages
    pub async fn seeded(
        config: PortalConfig,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, AppError> {
        let now = Utc::now();
        let state = Self::assemble(
            config,
            store,
            Arc::new(seed::identities()?),
            DocumentRepository::with_records(seed::documents(now)),
            EventRepository::with_events(seed::events(now)),
            JobBoard::with_jobs(seed::jobs(now)),
        );
        seed::messages(&state.messages).await?;

        tracing::info!(
            backend = %state.store.backend_type(),
            environment = %state.config.environment(),
            documents = state.documents.len().await,
            "Portal seeded"
        );
        Ok(state)
    }

    /// Validate `config`, build its storage backend and seed the portal
    pub async fn from_config(config: PortalConfig) -> Result<Self, AppError> {
        config.validate()?;
        let store = create_storage(&config).await?;
        Self::seeded(config, store).await
    }

    fn assemble(
        config: PortalConfig,
        store: Arc<dyn DocumentStore>,
        identities: Arc<dyn IdentityStore>,
        documents: DocumentRepository,
        events: EventRepository,
        jobs: JobBoard,
    ) -> Self {
        let documents = Arc::new(documents);
        let mut messages = MessageStore::new();
        if let Some(admin) = identities.identities(Role::Admin).into_iter().next() {
            messages = messages.with_admin(admin.email);
        }
        let messages = Arc::new(messages);

        let upload = UploadWorkflow::new(
            store.clone(),
            documents.clone(),
            identities.clone(),
            DocumentValidator::from_config(&config),
            RetryPolicy::from_config(&config),
        );
        let approval = ApprovalWorkflow::new(documents.clone(), messages.clone());

        Self {
            config,
            identities,
            store,
            documents,
            messages,
            events,
            jobs,
            faq: FaqAssistant::new(seed::faq_entries()),
            upload,
            approval,
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn login(&self, email: &str, password: &str, role: Role) -> Result<Session, AppError> {
        let identity = authenticate(self.identities.as_ref(), email, password, role)?;
        let session = Session::start(identity);
        tracing::info!(
            session_id = %session.id(),
            email = %session.email(),
            role = %role,
            "Session started"
        );
        Ok(session)
    }

    pub fn logout(&self, session: Session) {
        let duration = Utc::now() - session.started_at();
        tracing::info!(
            session_id = %session.id(),
            email = %session.email(),
            duration_secs = duration.num_seconds(),
            "Session ended"
        );
    }

    pub async fn dispatch(
        &self,
        session: &Session,
        action: Action,
        cancel: &CancellationToken,
    ) -> Result<Outcome, AppError> {
        let name = action.name();
        tracing::debug!(action = name, email = %session.email(), "Dispatching action");

        let outcome = match action {
            Action::Upload {
                file,
                category,
                title,
            } => {
                let request = UploadRequest {
                    file,
                    owner: session.email().to_string(),
                    category,
                    title,
                };
                Outcome::Uploaded(self.upload.upload(request, cancel).await?)
            }
            Action::Decide {
                document_id,
                decision,
                comment,
            } => Outcome::Decided(
                self.approval
                    .decide(session, document_id, decision, &comment)
                    .await?,
            ),
            Action::BulkApprove { comment } => {
                Outcome::BulkApproved(self.approval.bulk_approve(session, &comment).await?)
            }
            Action::SendMessage { to, text } => {
                Outcome::MessageSent(self.messages.append(session.email(), &to, &text).await?)
            }
            Action::MarkRead { message_id } => {
                self.messages.mark_read(message_id, session.email()).await?;
                Outcome::MarkedRead { message_id }
            }
            Action::CreateEvent(request) => {
                Outcome::EventCreated(self.events.create(session, request).await?)
            }
            Action::RegisterEvent { event_id } => {
                Outcome::Registered(self.events.register(session, event_id).await?)
            }
            Action::PostJob(request) => Outcome::JobPosted(self.jobs.post(session, request).await?),
            Action::ApplyJob { job_id, cover_note } => {
                Outcome::Applied(self.jobs.apply(session, job_id, &cover_note).await?)
            }
            Action::CloseJob { job_id } => {
                Outcome::JobClosed(self.jobs.close(session, job_id).await?)
            }
            Action::AskFaq { question } => Outcome::Answer(self.faq.answer(&question)?),
        };

        Ok(outcome)
    }

    /// All documents for an admin, the caller's own documents otherwise
    pub async fn documents(&self, session: &Session) -> Vec<DocumentRecord> {
        if session.identity().is_admin() {
            self.documents.list().await
        } else {
            self.documents.by_owner(session.email()).await
        }
    }

    pub async fn conversation(&self, session: &Session, other: &str) -> Vec<MessageRecord> {
        self.messages.conversation(session.email(), other).await
    }

    pub async fn inbox(&self, session: &Session) -> Vec<MessageRecord> {
        self.messages.inbox(session.email()).await
    }

    pub async fn events(&self) -> Vec<Event> {
        self.events.list().await
    }

    pub async fn jobs(&self) -> Vec<JobPosting> {
        self.jobs.list().await
    }

    pub async fn applications_for(&self, job_id: Uuid) -> Vec<JobApplication> {
        self.jobs.applications_for(job_id).await
    }

    pub async fn admin_stats(&self, session: &Session) -> Result<AdminStats, AppError> {
        session.require_admin()?;
        Ok(stats::admin_stats(
            self.identities.as_ref(),
            &self.documents,
            &self.events,
            &self.jobs,
        )
        .await)
    }

    pub async fn alumni_stats(&self, session: &Session) -> AlumniStats {
        stats::alumni_stats(
            session.email(),
            &self.documents,
            &self.events,
            &self.jobs,
            &self.messages,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::pdf_file;
    use alumnet_core::models::DocumentStatus;
    use alumnet_storage::SimulatedStorage;
    use std::time::Duration;

    async fn portal() -> PortalState {
        let store: Arc<dyn DocumentStore> = Arc::new(SimulatedStorage::new(Duration::ZERO));
        PortalState::seeded(PortalConfig::default(), store)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_admin_login_with_fixed_credentials() {
        let portal = portal().await;
        let session = portal
            .login(seed::ADMIN_EMAIL, seed::ADMIN_PASSWORD, Role::Admin)
            .unwrap();
        assert_eq!(session.role(), Role::Admin);

        let err = portal
            .login(seed::ADMIN_EMAIL, "wrong", Role::Admin)
            .unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
        portal.logout(session);
    }

    #[tokio::test]
    async fn test_upload_then_approve_through_dispatch() {
        let portal = portal().await;
        let cancel = CancellationToken::new();
        let alumni = portal
            .login("arjun.mehta@alumni.edu", seed::ALUMNI_PASSWORD, Role::Alumni)
            .unwrap();
        let admin = portal
            .login(seed::ADMIN_EMAIL, seed::ADMIN_PASSWORD, Role::Admin)
            .unwrap();

        let outcome = portal
            .dispatch(
                &alumni,
                Action::Upload {
                    file: pdf_file("marksheet.pdf", 2048),
                    category: "transcript".to_string(),
                    title: "Final marksheet".to_string(),
                },
                &cancel,
            )
            .await
            .unwrap();
        let Outcome::Uploaded(receipt) = outcome else {
            panic!("expected upload receipt");
        };
        assert!(receipt.path.starts_with("documents/"));

        let unread_before = portal.alumni_stats(&alumni).await.unread_messages;
        portal
            .dispatch(
                &admin,
                Action::Decide {
                    document_id: receipt.record_id,
                    decision: Decision::Approve,
                    comment: String::new(),
                },
                &cancel,
            )
            .await
            .unwrap();

        let mine = portal.documents(&alumni).await;
        let uploaded = mine.iter().find(|d| d.id == receipt.record_id).unwrap();
        assert_eq!(uploaded.status, DocumentStatus::Approved);
        assert_eq!(
            portal.alumni_stats(&alumni).await.unread_messages,
            unread_before + 1
        );
    }

    #[tokio::test]
    async fn test_stats_require_admin() {
        let portal = portal().await;
        let alumni = portal
            .login("priya.nair@alumni.edu", seed::ALUMNI_PASSWORD, Role::Alumni)
            .unwrap();
        assert!(matches!(
            portal.admin_stats(&alumni).await,
            Err(AppError::Forbidden(_))
        ));

        let admin = portal
            .login(seed::ADMIN_EMAIL, seed::ADMIN_PASSWORD, Role::Admin)
            .unwrap();
        let stats = portal.admin_stats(&admin).await.unwrap();
        assert_eq!(stats.total_alumni, 3);
        assert_eq!(stats.approved_documents, 1);
        assert_eq!(stats.pending_documents, 2);
        assert_eq!(stats.open_jobs, 2);
    }

    #[tokio::test]
    async fn test_broadcast_shows_in_every_conversation() {
        let portal = portal().await;
        let rahul = portal
            .login("rahul.sharma@alumni.edu", seed::ALUMNI_PASSWORD, Role::Alumni)
            .unwrap();
        let conversation = portal.conversation(&rahul, "priya.nair@alumni.edu").await;
        assert_eq!(conversation.len(), 3);
        assert!(conversation[0].is_broadcast());
    }
}
