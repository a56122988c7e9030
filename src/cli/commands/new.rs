use anyhow::Result;

use super::{open_workspace, print_json, print_next_steps, print_request, CommandContext};
use crate::requests::types::{RequestAction, TrainingDetails};
use crate::requests::{CreateOutcome, Decision, RequestDraft};

pub struct NewCommand {
    pub ctx: CommandContext,
    pub draft: RequestDraft,
    pub submit: bool,
}

impl NewCommand {
    pub fn new(ctx: CommandContext, title: String, details: TrainingDetails) -> Self {
        Self {
            ctx,
            draft: RequestDraft {
                title,
                details,
                ..Default::default()
            },
            submit: false,
        }
    }

    pub fn with_reviewers(mut self, supervisor: Option<String>, manager: Option<String>) -> Self {
        self.draft.supervisor_id = supervisor;
        self.draft.program_manager_id = manager;
        self
    }

    pub fn with_submit(mut self, submit: bool) -> Self {
        self.submit = submit;
        self
    }

    pub async fn execute(&self) -> Result<()> {
        let ws = open_workspace(&self.ctx).await?;

        let mut request = match ws.service.create_request(&ws.session, self.draft.clone()).await? {
            CreateOutcome::Created(request) => request,
            CreateOutcome::Queued { pending } => {
                println!("📥 Saved offline, {pending} request(s) waiting to sync");
                return Ok(());
            }
        };

        if self.submit {
            request = ws
                .service
                .complete_wizard(&ws.session, &request.id, RequestAction::Submit, Decision::default())
                .await?;
        }

        if self.ctx.json {
            return print_json(&request);
        }
        println!("✅ Created {}", request.id);
        print_request(&request);
        print_next_steps(&ws.session, &request);
        Ok(())
    }
}
