//! Scripted walkthrough of the client core: create and complete a task,
//! spend the award on a collectible, reflect, and tweak settings.
//!
//! # Examples
//! ```sh
//! cargo run --bin kaikoon-walkthrough -- --user 1
//! cargo run --bin kaikoon-walkthrough -- --base-url http://localhost:3344/ --timeout-secs 5
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use mockable::DefaultClock;
use reqwest::Url;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use client_core::ClientCore;
use client_core::domain::{ReflectionDraft, SettingsPatch, StepDraft, TaskDraft, UserId};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "kaikoon-walkthrough",
    about = "Exercise the Kaikoon client core end to end against local or remote storage",
    version
)]
struct CliArgs {
    /// Remote API base URL. Local-only wiring when omitted.
    #[arg(long = "base-url", value_name = "url")]
    base_url: Option<Url>,
    /// User the walkthrough acts as.
    #[arg(long = "user", value_name = "id", default_value_t = 1)]
    user: i64,
    /// Request timeout for remote calls, in seconds.
    #[arg(long = "timeout-secs", value_name = "seconds", default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let user = UserId::try_new(args.user)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;

    let core = match args.base_url {
        Some(base_url) => ClientCore::remote_first(
            base_url,
            Duration::from_secs(args.timeout_secs),
            Arc::new(DefaultClock),
        )
        .map_err(|error| io::Error::other(format!("build HTTP client: {error}")))?,
        None => ClientCore::local_with_system_clock(),
    };

    run_walkthrough(&core, user)
        .await
        .map_err(|error| io::Error::other(format!("walkthrough failed: {error}")))
}

async fn run_walkthrough(core: &ClientCore, user: UserId) -> Result<(), client_core::domain::Error> {
    let balance = core.progress().balance(user).await?;
    println!("starting balance: {} Kaiblooms", balance.kaiblooms_points);

    let draft = TaskDraft::try_new(
        "Write history essay",
        60,
        vec![
            StepDraft::try_new("Outline the argument", None)?,
            StepDraft::try_new("Write the first draft", Some("Laptop".to_owned()))?,
            StepDraft::try_new("Proofread", None)?,
        ],
    )?;
    let task = core.tasks().create_task(user, draft).await?;
    println!(
        "created task {} '{}' with {} steps",
        task.id,
        task.title,
        task.steps.len()
    );

    let completed = core.tasks().complete_task(user, task.id).await?;
    println!(
        "completed '{}', awarded {} Kaiblooms",
        completed.task.title, completed.kaiblooms_awarded
    );

    let catalog = core.collectibles().catalog().await?;
    for collectible in &catalog {
        println!(
            "  shop: {} {} [{}] costs {}",
            collectible.emoji, collectible.name, collectible.id, collectible.cost
        );
    }
    if let Some(cheapest) = catalog.iter().min_by_key(|collectible| collectible.cost) {
        let outcome = core.collectibles().purchase(user, cheapest.id).await?;
        println!(
            "bought {} {}, balance now {}",
            cheapest.emoji, cheapest.name, outcome.new_balance
        );
    }

    let reflection = core
        .reflections()
        .append_reflection(user, ReflectionDraft::try_new(task.id, 4, "Stayed focused")?)
        .await?;
    println!(
        "reflected on '{}' feeling {:?}",
        reflection.task_title, reflection.sentiment
    );

    let settings = core
        .settings()
        .update_settings(
            user,
            SettingsPatch {
                break_reminder_interval: Some(45),
                ..SettingsPatch::default()
            },
        )
        .await?;
    println!(
        "break reminders every {} minutes",
        settings.break_reminder_interval
    );

    let collection = core.collectibles().collection(user).await?;
    let final_balance = core.progress().balance(user).await?;
    println!(
        "final state: {} collectible rows, {} Kaiblooms",
        collection.len(),
        final_balance.kaiblooms_points
    );

    Ok(())
}
