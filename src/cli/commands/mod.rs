use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::TrainflowConfig;
use crate::requests::notify::TracingNotifier;
use crate::requests::transitions::available_actions;
use crate::requests::types::{SessionContext, TrainingRequest};
use crate::requests::WorkflowService;
use crate::session::{open_session, CodeSession};
use crate::store::JsonFileStore;

pub mod decide;
pub mod init;
pub mod list;
pub mod new;
pub mod show;
pub mod steps;
pub mod trainers;

/// Settings every command receives, already merged with configuration
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub data_file: PathBuf,
    pub user_code: Option<String>,
    pub json: bool,
    pub notify_on_transition: bool,
}

impl CommandContext {
    pub fn new(config: &TrainflowConfig, user: Option<String>, data: Option<PathBuf>, json: bool) -> Self {
        Self {
            data_file: data.unwrap_or_else(|| config.store.data_file.clone()),
            user_code: user.or_else(|| config.workflow.default_user_code.clone()),
            json,
            notify_on_transition: config.workflow.notify_on_transition,
        }
    }
}

/// An opened data file together with the acting user's session
pub struct Workspace {
    pub store: Arc<JsonFileStore>,
    pub service: WorkflowService<JsonFileStore, TracingNotifier>,
    pub session: SessionContext,
}

pub async fn open_workspace(ctx: &CommandContext) -> Result<Workspace> {
    if !ctx.data_file.exists() {
        bail!(
            "No data file at {}. Run 'trainflow init' first.",
            ctx.data_file.display()
        );
    }
    let Some(code) = ctx.user_code.as_deref() else {
        bail!("No acting user. Pass --as <CODE> or set workflow.default_user_code.");
    };

    let store = Arc::new(
        JsonFileStore::open(&ctx.data_file)
            .await
            .with_context(|| format!("Failed to open {}", ctx.data_file.display()))?,
    );
    let session = open_session(&CodeSession::new(store.clone(), code)).await?;
    let service = WorkflowService::new(store.clone(), store.clone(), Arc::new(TracingNotifier))
        .with_notifications(ctx.notify_on_transition);

    Ok(Workspace {
        store,
        service,
        session,
    })
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_request(request: &TrainingRequest) {
    let details = &request.details;
    println!("📋 {} - {}", request.id, request.title);
    println!("   🏷️  Status: {}", request.status.label());
    println!("   👤 Requested by: {}", request.requested_by);
    if let Some(sv) = &request.supervisor_id {
        println!("   🧭 Supervisor: {sv}");
    }
    if let Some(pm) = &request.program_manager_id {
        println!("   🗂️  Program manager: {pm}");
    }
    if let Some(tr) = &request.trainer_id {
        println!("   🎓 Trainer: {tr}");
    }
    match details.training_date {
        Some(date) => println!("   📅 Date: {date}"),
        None => println!("   📅 Date: (not set)"),
    }
    if !details.location.is_empty() {
        println!("   📍 Location: {}", details.location);
    }
    if let Some(spec) = details.specialization {
        println!("   🎯 Specialization: {spec}");
    }
    if let Some(count) = details.trainee_count {
        println!("   👥 Trainees: {count}");
    }
    if let Some(description) = &details.description {
        println!("   📝 {description}");
    }
    if let Some(note) = &request.decision_note {
        println!("   💬 Note: {note}");
    }
    for doc in &request.documentation {
        println!("   📎 {doc}");
    }
}

pub fn print_next_steps(session: &SessionContext, request: &TrainingRequest) {
    let actions = available_actions(session.role(), request.status);
    if actions.is_empty() {
        println!("   ⏸️  Nothing for {} to do on this request", session.role());
        return;
    }
    let names: Vec<&str> = actions.iter().map(|a| a.as_str()).collect();
    println!("   👉 Available to you: {}", names.join(", "));
}
