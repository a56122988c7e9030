use anyhow::Result;

use super::{open_workspace, print_json, print_next_steps, print_request, CommandContext};
use crate::requests::types::RequestId;

pub struct ShowCommand {
    pub ctx: CommandContext,
    pub id: RequestId,
}

impl ShowCommand {
    pub fn new(ctx: CommandContext, id: impl Into<RequestId>) -> Self {
        Self { ctx, id: id.into() }
    }

    pub async fn execute(&self) -> Result<()> {
        let ws = open_workspace(&self.ctx).await?;
        let request = ws.service.fetch_visible(&ws.session, &self.id).await?;

        if self.ctx.json {
            return print_json(&request);
        }
        print_request(&request);
        print_next_steps(&ws.session, &request);

        let wizard = ws.service.wizard(&ws.session, &self.id).await?;
        let steps: Vec<&str> = wizard.steps().iter().map(|s| s.title()).collect();
        println!(
            "   🧭 {} ({} steps): {}",
            ws.session.role().form_title(),
            wizard.total_steps(),
            steps.join(" → ")
        );
        Ok(())
    }
}
