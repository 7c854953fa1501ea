//! Alumnet CLI: drive the portal workflows from the command line.
//!
//! Every run starts from the seeded portal state. Storage and retry behaviour
//! come from the environment (see `PortalConfig::from_env`).

use std::path::PathBuf;

use alumnet_cli::{content_type_for, init_tracing, log_error, ErrorReport};
use alumnet_core::models::{CreateEventRequest, Decision, DocumentResponse, PostJobRequest, Role};
use alumnet_core::{AppError, PortalConfig};
use alumnet_services::{Action, PortalState, Session, UploadFile};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "alumnet", about = "Alumni portal CLI")]
struct Cli {
    /// Email of the identity to act as
    #[arg(long)]
    email: String,
    /// Password for that identity
    #[arg(long)]
    password: String,
    /// Role to sign in with: admin or alumni
    #[arg(long, default_value = "alumni")]
    role: Role,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a PDF or JPEG document for review
    Upload {
        /// Path to the file to upload
        file: PathBuf,
        /// Document title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        /// Document category
        #[arg(long, default_value = "general")]
        category: String,
    },
    /// List documents visible to the signed-in identity
    Documents,
    /// Approve or reject a pending document (admin)
    Decide {
        /// Document UUID
        id: Uuid,
        /// approve or reject
        decision: Decision,
        /// Reviewer comment
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Approve every pending document (admin)
    ApproveAll {
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Send a message. Use "all" as the recipient to broadcast.
    Message { to: String, text: String },
    /// Show the conversation with another identity
    Conversation { with: String },
    /// List events, or create one (admin) with `events create`
    Events {
        #[command(subcommand)]
        sub: Option<EventCommands>,
    },
    /// Register for an event
    Register {
        /// Event UUID
        event_id: Uuid,
    },
    /// List jobs, or post one with `jobs post`
    Jobs {
        #[command(subcommand)]
        sub: Option<JobCommands>,
    },
    /// Apply to a job
    Apply {
        /// Job UUID
        job_id: Uuid,
        #[arg(long, default_value = "")]
        cover_note: String,
    },
    /// Ask the FAQ assistant
    Ask { question: String },
    /// Dashboard counters for the signed-in identity
    Stats,
}

#[derive(Subcommand)]
enum EventCommands {
    /// Create an event (admin)
    Create {
        title: String,
        /// Event date, RFC 3339
        #[arg(long)]
        date: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        capacity: u32,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
enum JobCommands {
    /// Post a job
    Post {
        title: String,
        #[arg(long)]
        company: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List applications to a job
    Applications { job_id: Uuid },
    /// Close a job you posted
    Close { job_id: Uuid },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = PortalConfig::from_env().context("Failed to load configuration")?;
    let is_production = config.is_production();
    let portal = PortalState::from_config(config)
        .await
        .context("Failed to start portal")?;
    let session = match portal.login(&cli.email, &cli.password, cli.role) {
        Ok(session) => session,
        Err(e) => return report_failure(&e, is_production),
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    let result = run(&portal, &session, cli.command, &cancel).await;
    portal.logout(session);
    match result {
        Err(e) => match e.downcast_ref::<AppError>() {
            Some(app_error) => report_failure(app_error, is_production),
            None => Err(e),
        },
        ok => ok,
    }
}

/// Print the error body and exit non-zero
fn report_failure(error: &AppError, is_production: bool) -> anyhow::Result<()> {
    log_error(error);
    print_json(&ErrorReport::new(error, is_production))?;
    std::process::exit(1);
}

async fn run(
    portal: &PortalState,
    session: &Session,
    command: Commands,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let action = match command {
        Commands::Upload {
            file,
            title,
            category,
        } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .context("Upload path has no file name")?;
            let title = title.unwrap_or_else(|| {
                file.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| filename.clone())
            });
            Action::Upload {
                file: UploadFile::new(filename, content_type_for(&file), data),
                category,
                title,
            }
        }
        Commands::Documents => {
            let documents: Vec<DocumentResponse> = portal
                .documents(session)
                .await
                .into_iter()
                .map(DocumentResponse::from)
                .collect();
            return print_json(&documents);
        }
        Commands::Decide {
            id,
            decision,
            comment,
        } => Action::Decide {
            document_id: id,
            decision,
            comment,
        },
        Commands::ApproveAll { comment } => Action::BulkApprove { comment },
        Commands::Message { to, text } => Action::SendMessage { to, text },
        Commands::Conversation { with } => {
            return print_json(&portal.conversation(session, &with).await)
        }
        Commands::Events { sub: None } => return print_json(&portal.events().await),
        Commands::Events {
            sub:
                Some(EventCommands::Create {
                    title,
                    date,
                    location,
                    capacity,
                    description,
                }),
        } => {
            let date = date
                .parse::<DateTime<Utc>>()
                .with_context(|| format!("Invalid event date: {}", date))?;
            Action::CreateEvent(CreateEventRequest {
                title,
                description,
                date,
                location,
                capacity,
            })
        }
        Commands::Register { event_id } => Action::RegisterEvent { event_id },
        Commands::Jobs { sub: None } => return print_json(&portal.jobs().await),
        Commands::Jobs {
            sub:
                Some(JobCommands::Post {
                    title,
                    company,
                    location,
                    description,
                }),
        } => Action::PostJob(PostJobRequest {
            title,
            company,
            location,
            description,
        }),
        Commands::Jobs {
            sub: Some(JobCommands::Applications { job_id }),
        } => return print_json(&portal.applications_for(job_id).await),
        Commands::Jobs {
            sub: Some(JobCommands::Close { job_id }),
        } => Action::CloseJob { job_id },
        Commands::Apply { job_id, cover_note } => Action::ApplyJob { job_id, cover_note },
        Commands::Ask { question } => Action::AskFaq { question },
        Commands::Stats => {
            return match session.role() {
                Role::Admin => print_json(&portal.admin_stats(session).await?),
                Role::Alumni => print_json(&portal.alumni_stats(session).await),
            }
        }
    };

    let outcome = portal.dispatch(session, action, cancel).await?;
    print_json(&outcome)
}
