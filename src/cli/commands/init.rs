use anyhow::{bail, Result};
use std::path::PathBuf;

use super::{print_json, CommandContext};
use crate::config::TrainflowConfig;
use crate::store::seed::demo_users;
use crate::store::{JsonFileStore, StoreData};

const CONFIG_FILE: &str = "trainflow.toml";

pub struct InitCommand {
    pub data_file: PathBuf,
    pub force: bool,
    pub write_config: bool,
    pub json: bool,
}

impl InitCommand {
    pub fn new(ctx: &CommandContext, force: bool) -> Self {
        Self {
            data_file: ctx.data_file.clone(),
            force,
            write_config: false,
            json: ctx.json,
        }
    }

    pub fn with_write_config(mut self, write_config: bool) -> Self {
        self.write_config = write_config;
        self
    }

    pub async fn execute(&self, config: &TrainflowConfig) -> Result<()> {
        if self.data_file.exists() && !self.force {
            bail!(
                "{} already exists. Use --force to overwrite it.",
                self.data_file.display()
            );
        }

        let store = JsonFileStore::initialize(&self.data_file, StoreData::with_users(demo_users())).await?;
        tracing::info!(path = %store.path().display(), "Data file initialized");

        if self.write_config {
            let mut effective = config.clone();
            effective.store.data_file = self.data_file.clone();
            effective.save_to_file(CONFIG_FILE)?;
        }

        let users = demo_users();
        if self.json {
            return print_json(&users);
        }

        println!("✅ Initialized {}", store.path().display());
        if self.write_config {
            println!("⚙️  Wrote {CONFIG_FILE}");
        }
        println!();
        println!("👥 DEMO ACCOUNTS:");
        println!("────────────────");
        for user in &users {
            println!("   {:<6} {} ({})", user.code, user.name, user.role.title());
        }
        println!();
        println!("💡 Try: trainflow --as DV001 new --title \"Leadership Workshop\" ...");
        Ok(())
    }
}
