use anyhow::Result;
use clap::Parser;

use trainflow::cli::commands::decide::DecideCommand;
use trainflow::cli::commands::init::InitCommand;
use trainflow::cli::commands::list::ListCommand;
use trainflow::cli::commands::new::NewCommand;
use trainflow::cli::commands::show::ShowCommand;
use trainflow::cli::commands::steps::StepsCommand;
use trainflow::cli::commands::trainers::TrainersCommand;
use trainflow::cli::commands::CommandContext;
use trainflow::cli::{Cli, Commands};
use trainflow::requests::types::{RequestAction, TrainingDetails};
use trainflow::requests::Decision;
use trainflow::{init_config, init_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = init_config()?;
    init_telemetry(&config.observability)?;
    tracing::debug!(
        data_file = %config.store.data_file.display(),
        log_level = %config.observability.log_level,
        "Configuration loaded"
    );

    let ctx = CommandContext::new(config, cli.user, cli.data, cli.json);
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        // Default behavior: no subcommand - explain how to get started
        None => {
            show_how_to_get_started();
            Ok(())
        }
        Some(Commands::Init { force, write_config }) => runtime.block_on(async {
            InitCommand::new(&ctx, force)
                .with_write_config(write_config)
                .execute(config)
                .await
        }),
        Some(Commands::New {
            title,
            date,
            location,
            specialization,
            trainees,
            description,
            supervisor,
            manager,
            submit,
        }) => {
            let details = TrainingDetails {
                training_date: date,
                location,
                specialization,
                trainee_count: trainees,
                description,
            };
            runtime.block_on(async {
                NewCommand::new(ctx, title, details)
                    .with_reviewers(supervisor, manager)
                    .with_submit(submit)
                    .execute()
                    .await
            })
        }
        Some(Commands::Submit { id }) => runtime.block_on(async {
            DecideCommand::new(ctx, id, RequestAction::Submit).execute().await
        }),
        Some(Commands::Approve { id, trainer, note }) => runtime.block_on(async {
            DecideCommand::new(ctx, id, RequestAction::Approve)
                .with_decision(Decision {
                    note,
                    trainer_id: trainer,
                    ..Default::default()
                })
                .execute()
                .await
        }),
        Some(Commands::Reject { id, note }) => runtime.block_on(async {
            DecideCommand::new(ctx, id, RequestAction::Reject)
                .with_decision(Decision {
                    note,
                    ..Default::default()
                })
                .execute()
                .await
        }),
        Some(Commands::Complete { id, docs }) => runtime.block_on(async {
            DecideCommand::new(ctx, id, RequestAction::Complete)
                .with_decision(Decision {
                    documentation: docs,
                    ..Default::default()
                })
                .execute()
                .await
        }),
        Some(Commands::Show { id }) => {
            runtime.block_on(async { ShowCommand::new(ctx, id).execute().await })
        }
        Some(Commands::List { status }) => runtime.block_on(async {
            ListCommand::new(ctx).with_status(status).execute().await
        }),
        Some(Commands::Trainers { id, search }) => runtime.block_on(async {
            TrainersCommand::new(ctx, id)
                .with_search(search)
                .execute()
                .await
        }),
        Some(Commands::Steps { role }) => {
            runtime.block_on(async { StepsCommand::new(role, ctx.json).execute().await })
        }
    }
}

fn show_how_to_get_started() {
    println!("🎓 Trainflow - Training Request Approvals");
    println!();
    println!("To get started:");
    println!("  ⚙️  trainflow init                    # Create a data file with demo accounts");
    println!("  📝 trainflow --as DV001 new ...       # Start a training request");
    println!("  📋 trainflow --as SV001 list          # See requests waiting on you");
    println!("  ✅ trainflow --as SV001 approve <id>  # Decide on a request");
    println!();
    println!("💡 Run 'trainflow steps' to see each role's wizard.");
}
