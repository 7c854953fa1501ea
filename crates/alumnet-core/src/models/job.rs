use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A job posting shared with the alumni network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub posted_by: String,
    pub posted_at: DateTime<Utc>,
    pub open: bool,
}

impl JobPosting {
    pub fn from_request(request: PostJobRequest, posted_by: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: request.title,
            company: request.company,
            location: request.location,
            description: request.description,
            posted_by: posted_by.to_string(),
            posted_at: Utc::now(),
            open: true,
        }
    }
}

/// An application to a job posting. Repeated applications are kept as separate records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant: String,
    pub cover_note: String,
    pub applied_at: DateTime<Utc>,
}

/// Request DTO for posting a job
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostJobRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Job title must be between 1 and 200 characters"
    ))]
    pub title: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_from_request_is_open() {
        let job = JobPosting::from_request(
            PostJobRequest {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                description: String::new(),
            },
            "admin@alumni.edu",
        );
        assert!(job.open);
        assert_eq!(job.posted_by, "admin@alumni.edu");
    }

    #[test]
    fn test_request_requires_company() {
        let request = PostJobRequest {
            title: "Analyst".to_string(),
            company: String::new(),
            location: String::new(),
            description: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
