use alumnet_core::models::{JobApplication, JobPosting, PostJobRequest};
use alumnet_core::AppError;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::session::Session;

/// Job postings and the applications made to them
#[derive(Default)]
pub struct JobBoard {
    jobs: RwLock<Vec<JobPosting>>,
    applications: RwLock<Vec<JobApplication>>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<JobPosting>) -> Self {
        Self {
            jobs: RwLock::new(jobs),
            applications: RwLock::new(Vec::new()),
        }
    }

    pub async fn post(
        &self,
        session: &Session,
        request: PostJobRequest,
    ) -> Result<JobPosting, AppError> {
        request.validate()?;

        let job = JobPosting::from_request(request, session.email());
        self.jobs.write().await.push(job.clone());

        tracing::info!(job_id = %job.id, posted_by = %job.posted_by, "Job posted");
        Ok(job)
    }

    /// Apply to an open job. Applying again creates another, independent application.
    pub async fn apply(
        &self,
        session: &Session,
        job_id: Uuid,
        cover_note: &str,
    ) -> Result<JobApplication, AppError> {
        // Close takes the write lock, so the job stays open until the application is recorded.
        let jobs = self.jobs.read().await;
        let job = jobs
            .iter()
            .find(|j| j.id == job_id)
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;
        if !job.open {
            return Err(AppError::InvalidTransition {
                id: job_id,
                from: "closed".to_string(),
            });
        }

        let application = JobApplication {
            id: Uuid::new_v4(),
            job_id,
            applicant: session.email().to_string(),
            cover_note: cover_note.trim().to_string(),
            applied_at: Utc::now(),
        };
        self.applications.write().await.push(application.clone());
        drop(jobs);

        tracing::info!(job_id = %job_id, applicant = %application.applicant, "Job application");
        Ok(application)
    }

    /// Close a posting. Only the poster or the admin may close it.
    pub async fn close(&self, session: &Session, job_id: Uuid) -> Result<JobPosting, AppError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

        if job.posted_by != session.email() && !session.identity().is_admin() {
            return Err(AppError::Forbidden(
                "Only the poster or an admin can close a job".to_string(),
            ));
        }
        if !job.open {
            return Err(AppError::InvalidTransition {
                id: job_id,
                from: "closed".to_string(),
            });
        }
        job.open = false;
        Ok(job.clone())
    }

    pub async fn list(&self) -> Vec<JobPosting> {
        self.jobs.read().await.clone()
    }

    pub async fn open_count(&self) -> usize {
        self.jobs.read().await.iter().filter(|j| j.open).count()
    }

    pub async fn applications_for(&self, job_id: Uuid) -> Vec<JobApplication> {
        self.applications
            .read()
            .await
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect()
    }

    pub async fn applications_by(&self, email: &str) -> Vec<JobApplication> {
        self.applications
            .read()
            .await
            .iter()
            .filter(|a| a.applicant == email)
            .cloned()
            .collect()
    }
}
