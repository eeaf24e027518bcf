use anyhow::{Result, bail};
use std::time::Duration;
use tubefix_api::YoutubeClient;
use tubefix_auth::AuthProvider;
use tubefix_config::{Config, MAX_PAGE_SIZE};
use tubefix_engine::{Retitler, RunOutcome, RunPolicy, RunReport};

use crate::cli::RunArgs;

pub async fn handle(args: RunArgs, config: &Config) -> Result<()> {
    let policy = policy(&args, config)?;
    tracing::debug!(?policy, "Starting run");

    let provider = super::auth_provider(config)?;
    let credential = provider.credential().await?;
    let client = YoutubeClient::new(credential)?;

    let dry_run = policy.dry_run;
    if dry_run {
        println!("Dry run: no titles will be changed.");
    }

    let report = Retitler::new(&client, policy).run().await?;
    print_report(&report, dry_run);
    Ok(())
}

/// CLI flags over the `[run]` config section.
fn policy(args: &RunArgs, config: &Config) -> Result<RunPolicy> {
    let page_size = args.page_size.unwrap_or(config.run.page_size);
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        bail!(
            "--page-size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE,
            page_size
        );
    }
    let interval_ms = args.interval_ms.unwrap_or(config.run.update_interval_ms);

    Ok(RunPolicy {
        page_size,
        update_interval: Duration::from_millis(interval_ms),
        dry_run: args.dry_run,
    })
}

fn print_report(report: &RunReport, dry_run: bool) {
    if dry_run && !report.changes.is_empty() {
        println!("\nWould rename:");
        for change in &report.changes {
            println!("  {}: {} -> {}", change.video_id, change.old_title, change.new_title);
        }
    }

    println!("\nScanned {} videos on {} pages", report.scanned, report.pages);
    println!("  Matched: {}", report.matched);
    println!("  Skipped (clean titles): {}", report.skipped);
    if !dry_run {
        println!("  Updated: {}", report.updated());
    }
    if !report.failed.is_empty() {
        println!("  Failed: {}", report.failed.len());
        for failed in &report.failed {
            println!("    {} ({}): {}", failed.video_id, failed.title, failed.failure);
        }
    }

    match &report.outcome {
        RunOutcome::Done => println!("\nAll videos processed."),
        RunOutcome::QuotaExceeded {
            video_id,
            failure,
            unattempted_on_page,
            more_pages,
        } => {
            println!("\nQuota limit reached while updating {}: {}", video_id, failure);
            println!(
                "  {} videos left on the current page{}",
                unattempted_on_page,
                if *more_pages { ", more pages not fetched" } else { "" }
            );
            println!("Restart tubefix after the daily quota resets to continue.");
        }
    }
}
