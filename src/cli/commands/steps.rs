use anyhow::Result;
use serde::Serialize;

use super::print_json;
use crate::roles::Role;

#[derive(Debug, Serialize)]
struct RoleSteps {
    role: Role,
    form_title: &'static str,
    steps: Vec<&'static str>,
    final_action: &'static str,
}

/// Print wizard steps; does not need a data file
pub struct StepsCommand {
    pub role: Option<Role>,
    pub json: bool,
}

impl StepsCommand {
    pub fn new(role: Option<Role>, json: bool) -> Self {
        Self { role, json }
    }

    pub async fn execute(&self) -> Result<()> {
        let roles: Vec<Role> = match self.role {
            Some(role) => vec![role],
            None => Role::ALL.to_vec(),
        };
        let listing: Vec<RoleSteps> = roles
            .into_iter()
            .map(|role| RoleSteps {
                role,
                form_title: role.form_title(),
                steps: role.wizard_steps().iter().map(|s| s.title()).collect(),
                final_action: role.final_action_label(),
            })
            .collect();

        if self.json {
            return print_json(&listing);
        }
        for entry in &listing {
            println!("🧭 {} - {}", entry.role, entry.form_title);
            for (i, step) in entry.steps.iter().enumerate() {
                println!("   {}. {step}", i + 1);
            }
            println!("   ▶️  {}", entry.final_action);
        }
        Ok(())
    }
}
