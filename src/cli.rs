use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::client::{self, AIClient, CompletionBackend};
use crate::config::Config;
use crate::interview;
use crate::plan::{self, Milestone, TrainingPlan};
use crate::profile::Profile;
use crate::prompt;
use crate::storage;

pub const PLAN_FILENAME: &str = "training_plan.md";
pub const TASK_FILENAME: &str = "Milestone_1_Practice_Task.md";

/// Entry point for the `pytrainer` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "pytrainer",
    about = "Personalized Python training plans from your terminal",
    version,
    long_about = None
)]
pub struct Cli {
    /// Override the completion model from config
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Override the output directory for generated Markdown files
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self, mut config: Config) -> Result<()> {
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }

        let client = AIClient::new(&config)?;
        run_session(&client, &config).await
    }
}

/// The whole run is one linear pass: interview, plan request, save, then the
/// optional practice-task branch. Every anticipated failure prints a message
/// and returns `Ok` so the process still exits cleanly.
async fn run_session(client: &dyn CompletionBackend, config: &Config) -> Result<()> {
    println!("{}", "🐍 Welcome to the Python Trainer!".bold());

    let profile = interview::gather_profile()?;
    println!("\nUser information collected: {profile}");

    let Some(training_plan) = generate_and_save_plan(client, &profile, config).await? else {
        return Ok(());
    };

    let wants_task =
        interview::confirm("Would you like to generate the practice task for the first milestone?")?;
    maybe_generate_task(client, &training_plan, wants_task, config).await?;

    println!("\n🎉 Thank you for using the Python Trainer!");
    Ok(())
}

/// Post-plan branch. A declined task or a plan without a first milestone
/// writes nothing further; the saved plan file stays on disk either way.
async fn maybe_generate_task(
    client: &dyn CompletionBackend,
    training_plan: &TrainingPlan,
    wants_task: bool,
    config: &Config,
) -> Result<bool> {
    if !wants_task {
        println!("You can generate the practice task later by running pytrainer again.");
        return Ok(false);
    }

    let Some(first_milestone) = training_plan.milestones.first() else {
        println!(
            "{}",
            "Error: the training plan has no first milestone to build a task from.".red()
        );
        return Ok(false);
    };

    generate_and_save_task(client, first_milestone, config).await
}

/// Requests, parses, formats, and saves the training plan. `Ok(None)` means
/// the failure was already reported and nothing was written.
async fn generate_and_save_plan(
    client: &dyn CompletionBackend,
    profile: &Profile,
    config: &Config,
) -> Result<Option<TrainingPlan>> {
    println!("\n⏳ Generating training plan with {}...", config.model);

    let request = prompt::plan_request(profile);
    let content = match client::complete_text(
        client,
        prompt::PLAN_SYSTEM_PROMPT,
        &request,
        &config.model,
        config.max_tokens,
    )
    .await
    {
        Ok(Some(content)) => content,
        Ok(None) => {
            println!(
                "{}",
                "Error: training plan generation failed (the service returned no usable output). Please try again.".red()
            );
            return Ok(None);
        }
        Err(err) => {
            println!("{} {err:#}", "Error: training plan generation failed.".red());
            return Ok(None);
        }
    };

    let training_plan = match plan::parse_training_plan(&content) {
        Ok(plan) => plan,
        Err(err) => {
            println!(
                "{} {err:#}",
                "Error: could not parse the training plan response.".red()
            );
            return Ok(None);
        }
    };

    let formatted = plan::format_training_plan(&training_plan);
    println!("\n{}", "Generated Training Plan:".bold());
    println!("{formatted}");

    match storage::save_markdown(&formatted, PLAN_FILENAME, &config.output_dir) {
        Ok(path) => {
            println!("✅ Training plan saved as Markdown to {}", path.display());
            Ok(Some(training_plan))
        }
        Err(err) => {
            println!("{} {err:#}", "Error: could not save the training plan.".red());
            Ok(None)
        }
    }
}

/// Requests and saves the practice task for one milestone. Returns `true`
/// when the task file was written.
async fn generate_and_save_task(
    client: &dyn CompletionBackend,
    milestone: &Milestone,
    config: &Config,
) -> Result<bool> {
    println!("\n⏳ Generating practice task for the first milestone...");

    let request = prompt::task_request(milestone);
    let task_text = match client::complete_text(
        client,
        prompt::TASK_SYSTEM_PROMPT,
        &request,
        &config.model,
        config.max_tokens,
    )
    .await
    {
        Ok(Some(content)) => content,
        Ok(None) => {
            println!(
                "{}",
                "Error: practice task generation failed (the service returned no usable output). The training plan is still saved.".red()
            );
            return Ok(false);
        }
        Err(err) => {
            println!("{} {err:#}", "Error: practice task generation failed.".red());
            return Ok(false);
        }
    };

    println!("\n{}", "Generated Practice Task for the First Milestone:".bold());
    println!("{task_text}");

    match storage::save_markdown(&task_text, TASK_FILENAME, &config.output_dir) {
        Ok(path) => {
            println!("✅ Practice task saved as Markdown to {}", path.display());
            Ok(true)
        }
        Err(err) => {
            println!("{} {err:#}", "Error: could not save the practice task.".red());
            Ok(false)
        }
    }
}
