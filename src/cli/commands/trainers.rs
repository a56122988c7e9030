use anyhow::Result;

use super::{open_workspace, print_json, CommandContext};
use crate::requests::types::{RequestId, User};

pub struct TrainersCommand {
    pub ctx: CommandContext,
    pub id: Option<RequestId>,
    pub search: Option<String>,
}

impl TrainersCommand {
    pub fn new(ctx: CommandContext, id: Option<String>) -> Self {
        Self {
            ctx,
            id: id.map(RequestId::from),
            search: None,
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub async fn execute(&self) -> Result<()> {
        let ws = open_workspace(&self.ctx).await?;

        let (heading, trainers) = match &self.id {
            Some(id) => {
                let ranked = ws.service.recommended_trainers(&ws.session, id).await?;
                (format!("🎓 RECOMMENDED TRAINERS for {id}"), ranked)
            }
            None => {
                let query = self.search.as_deref().unwrap_or_default();
                let found = ws.service.find_trainers(query).await?;
                let heading = if query.trim().is_empty() {
                    "🎓 TRAINER DIRECTORY".to_string()
                } else {
                    format!("🎓 TRAINERS matching '{}'", query.trim())
                };
                (heading, found)
            }
        };

        if self.ctx.json {
            return print_json(&trainers);
        }

        println!("{heading}");
        println!("──────────────────────────────");
        if trainers.is_empty() {
            println!("   🤷 No trainer matches");
            return Ok(());
        }
        for (rank, trainer) in trainers.iter().enumerate() {
            println!("   {}. {}", rank + 1, trainer_line(trainer));
        }
        Ok(())
    }
}

fn trainer_line(trainer: &User) -> String {
    let spec = trainer
        .specialization
        .map(|s| s.label())
        .unwrap_or("General");
    let rating = trainer
        .rating
        .map(|r| format!("{r:.1}"))
        .unwrap_or_else(|| "-".to_string());
    let availability = trainer.availability.map(|a| a.label()).unwrap_or("Unknown");
    format!(
        "{} [{}] {} · {} · ⭐ {} · {}",
        trainer.name, trainer.id, trainer.region, spec, rating, availability
    )
}
