//! Headless submission commands

use anyhow::{Result, bail};
use std::path::Path;
use std::sync::Arc;

use holiday_grid::HolidayTable;
use holiday_grid::UserId;
use holiday_grid::config::Config;
use holiday_grid::submit::{BatchSubmitter, Notice, NoticeKind, Notifier, SubmitMode};

/// Prints notices instead of showing them in a window
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => println!("✓ {}", notice.message),
            NoticeKind::Error => eprintln!("✗ {}", notice.message),
        }
    }
}

fn submitter(config: &Config) -> BatchSubmitter {
    BatchSubmitter::from_config(config, Arc::new(ConsoleNotifier))
}

/// Save one user's holidays
pub async fn submit_command(table_path: &Path, config: &Config, user: UserId) -> Result<()> {
    let table = HolidayTable::from_file(table_path)?;
    if table.row(user).is_none() {
        bail!("User {} is not in {}", user, table_path.display());
    }

    println!(
        "Submitting {} day(s) for user {} to {}",
        table.holiday_map(user).len(),
        user,
        config.endpoint.url()
    );

    let outcome = submitter(config)
        .submit_holidays(&table, user, SubmitMode::Single)
        .await;

    if !outcome.is_success() {
        bail!("User {}: {}", user, outcome);
    }
    Ok(())
}

/// Save every user's holidays
pub async fn submit_all_command(table_path: &Path, config: &Config) -> Result<()> {
    let table = HolidayTable::from_file(table_path)?;
    let submitter = submitter(config);

    println!(
        "Submitting {} user(s) to {}",
        table.rows().len(),
        config.endpoint.url()
    );

    let report = submitter.submit_all(&table).await;

    for user in &report.outcomes {
        println!("  user {:>5}: {}", user.user_id, user.outcome);
    }

    if report.outcomes.is_empty() {
        bail!("No users in {}", table_path.display());
    }
    if !report.succeeded() {
        bail!(
            "{} of {} user(s) failed",
            report.failures().count(),
            report.outcomes.len()
        );
    }
    Ok(())
}
