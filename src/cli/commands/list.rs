use anyhow::Result;

use super::{open_workspace, print_json, CommandContext};
use crate::requests::types::RequestStatus;

pub struct ListCommand {
    pub ctx: CommandContext,
    pub status: Option<RequestStatus>,
}

impl ListCommand {
    pub fn new(ctx: CommandContext) -> Self {
        Self { ctx, status: None }
    }

    pub fn with_status(mut self, status: Option<RequestStatus>) -> Self {
        self.status = status;
        self
    }

    pub async fn execute(&self) -> Result<()> {
        let ws = open_workspace(&self.ctx).await?;
        let mut requests = ws.service.list_visible(&ws.session).await?;
        if let Some(status) = self.status {
            requests.retain(|r| r.status == status);
        }

        if self.ctx.json {
            return print_json(&requests);
        }

        let user = &ws.session.user;
        println!("📋 TRAINING REQUESTS for {} ({})", user.name, user.role.title());
        println!("──────────────────────────────");
        if requests.is_empty() {
            println!("   📭 No requests visible to you");
            return Ok(());
        }
        for request in &requests {
            let marker = if request.is_terminal() { "⚪" } else { "🟢" };
            println!(
                "{marker} {:<14} {:<24} {}",
                request.id.as_str(),
                request.status.label(),
                request.title
            );
        }
        println!();
        println!("   🎯 Total: {}", requests.len());
        Ok(())
    }
}
