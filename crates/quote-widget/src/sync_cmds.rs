use std::time::Duration;

use anyhow::{Result, bail};
use quote_core::OutputFormat;
use quote_sync::{CycleReport, SyncScheduler};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::app::App;

fn report_json(report: &CycleReport) -> serde_json::Value {
    let status = match report {
        CycleReport::Applied { .. } => "applied",
        CycleReport::Unchanged { .. } => "unchanged",
        CycleReport::Superseded { .. } => "superseded",
        CycleReport::FetchFailed { .. } => "fetch_failed",
        CycleReport::PersistFailed { .. } => "persist_failed",
    };
    let mut value = serde_json::json!({
        "cycle": report.cycle(),
        "status": status,
        "summary": report.to_string(),
    });
    if let CycleReport::Applied { added, updated, .. } = report {
        value["added"] = (*added).into();
        value["updated"] = (*updated).into();
    }
    value
}

fn print_report(report: &CycleReport, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report_json(report))?),
        // Applied cycles are announced by the notifier.
        OutputFormat::Text if report.changed() => {}
        OutputFormat::Text => println!("{report}"),
    }
    Ok(())
}

pub(crate) async fn handle_sync(app: &App) -> Result<()> {
    let report = app.engine.run_cycle().await;
    print_report(&report, &app.format)?;
    // A failed fetch is retried on the next sync and is not an error exit.
    match report {
        CycleReport::PersistFailed { error, .. } => bail!("Could not save quotes: {error}"),
        _ => Ok(()),
    }
}

enum WatchInput {
    Sync,
    Quit,
    Unknown(String),
}

fn parse_watch_input(line: &str) -> Option<WatchInput> {
    match line.trim() {
        "" => None,
        "sync" => Some(WatchInput::Sync),
        "quit" | "exit" => Some(WatchInput::Quit),
        other => Some(WatchInput::Unknown(other.to_string())),
    }
}

pub(crate) async fn handle_watch(app: &App, interval: Option<u64>) -> Result<()> {
    let seconds = interval.unwrap_or(app.config.sync.interval_seconds);
    if seconds == 0 {
        bail!("--interval must be > 0");
    }
    let handle = SyncScheduler::new(app.engine.clone(), Duration::from_secs(seconds)).spawn();
    info!(interval_seconds = seconds, "watching for quote updates");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping sync");
                break;
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(error) => {
                        warn!(%error, "failed to read stdin, stopping sync");
                        break;
                    }
                };
                match parse_watch_input(&line) {
                    None => {}
                    Some(WatchInput::Quit) => break,
                    Some(WatchInput::Sync) => {
                        let report = handle.sync_now().await?;
                        print_report(&report, &app.format)?;
                    }
                    Some(WatchInput::Unknown(other)) => {
                        eprintln!("Unknown command '{other}' (expected 'sync' or 'quit')");
                    }
                }
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_input_recognizes_commands() {
        assert!(matches!(parse_watch_input(" sync "), Some(WatchInput::Sync)));
        assert!(matches!(parse_watch_input("quit"), Some(WatchInput::Quit)));
        assert!(parse_watch_input("   ").is_none());
        assert!(matches!(
            parse_watch_input("Sync"),
            Some(WatchInput::Unknown(cmd)) if cmd == "Sync"
        ));
    }

    #[test]
    fn report_json_includes_counts_for_applied() {
        let value = report_json(&CycleReport::Applied {
            cycle: 4,
            added: 2,
            updated: 1,
        });
        assert_eq!(value["status"], "applied");
        assert_eq!(value["cycle"], 4);
        assert_eq!(value["added"], 2);
        assert_eq!(value["updated"], 1);

        let value = report_json(&CycleReport::Unchanged { cycle: 5 });
        assert_eq!(value["status"], "unchanged");
        assert!(value.get("added").is_none());
    }
}
