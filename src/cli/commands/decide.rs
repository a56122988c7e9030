use anyhow::Result;

use super::{open_workspace, print_json, print_next_steps, print_request, CommandContext};
use crate::requests::traits::RequestStore;
use crate::requests::types::{RequestAction, RequestId};
use crate::requests::Decision;

/// Submit, approve, reject or complete a request through the acting role's wizard
pub struct DecideCommand {
    pub ctx: CommandContext,
    pub id: RequestId,
    pub action: RequestAction,
    pub decision: Decision,
}

impl DecideCommand {
    pub fn new(ctx: CommandContext, id: impl Into<RequestId>, action: RequestAction) -> Self {
        Self {
            ctx,
            id: id.into(),
            action,
            decision: Decision::default(),
        }
    }

    pub fn with_decision(mut self, decision: Decision) -> Self {
        self.decision = decision;
        self
    }

    pub async fn execute(&self) -> Result<()> {
        let ws = open_workspace(&self.ctx).await?;
        let from = ws.store.fetch_request(&self.id).await?.status;

        let request = ws
            .service
            .complete_wizard(&ws.session, &self.id, self.action, self.decision.clone())
            .await?;

        if self.ctx.json {
            return print_json(&request);
        }
        println!(
            "{} {} {}: {} → {}",
            emoji(self.action),
            self.action,
            request.id,
            from.label(),
            request.status.label()
        );
        print_request(&request);
        print_next_steps(&ws.session, &request);
        Ok(())
    }
}

fn emoji(action: RequestAction) -> &'static str {
    match action {
        RequestAction::Submit => "📤",
        RequestAction::Approve => "✅",
        RequestAction::Reject => "❌",
        RequestAction::Complete => "🏁",
    }
}
