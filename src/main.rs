use chartwatch::config::AppConfig;
use chartwatch::error::AppError;
use chartwatch::telemetry;
use chartwatch::workflows::expiry::notify::ConsoleNotifier;
use chartwatch::workflows::expiry::report::views::ExpirySummary;
use chartwatch::workflows::expiry::{
    classify, ExpiryRuleTable, ExpirySweep, FileTriggerStore, SweepOutcome, TriggerHost,
};
use chartwatch::workflows::roster::PatientRoster;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "chartwatch",
    about = "Sweep patient-care rosters and report expiring compliance documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the weekly sweep once and deliver the summary (default command)
    Sweep(SweepArgs),
    /// Print the expiration summary without notifying anyone
    Report(ReportArgs),
    /// Manage the weekly trigger
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommand,
    },
}

#[derive(Args, Debug, Default)]
struct SweepArgs {
    /// Override the configured roster CSV path
    #[arg(long)]
    roster: Option<PathBuf>,
    /// Evaluation date for the sweep (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Override the configured recipient address
    #[arg(long)]
    recipient: Option<String>,
    /// Print the summary instead of handing it to the notifier
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Override the configured roster CSV path
    #[arg(long)]
    roster: Option<PathBuf>,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum ScheduleCommand {
    /// Install (or replace) the weekly trigger
    Install,
    /// Remove the weekly trigger if one is installed
    Remove,
    /// Show the currently installed trigger
    Show,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli.command.unwrap_or(Command::Sweep(SweepArgs::default()));
    match command {
        Command::Sweep(args) => run_sweep(&config, args),
        Command::Report(args) => run_report(&config, args),
        Command::Schedule { command } => run_schedule(&config, command),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn run_sweep(config: &AppConfig, mut args: SweepArgs) -> Result<(), AppError> {
    let roster_path = args.roster.take().unwrap_or_else(|| config.roster.path.clone());
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let recipient = args
        .recipient
        .take()
        .unwrap_or_else(|| config.notify.recipient.clone());

    let rows = PatientRoster::from_path(&roster_path)?;
    info!(roster = %roster_path.display(), rows = rows.len(), %today, "roster snapshot loaded");

    let rules = ExpiryRuleTable::standard();

    if args.dry_run {
        let report = classify(&rows, &rules, today);
        if report.is_empty() {
            println!("Nothing to report: no expired or expiring documents.");
            return Ok(());
        }
        render_expiry_summary(&report.summary(&rules, today));
        return Ok(());
    }

    let sweep = ExpirySweep::new(rules, Arc::new(ConsoleNotifier), recipient);
    match sweep.run(&rows, today)? {
        SweepOutcome::Delivered {
            total_reported,
            total_expired,
            total_expiring_soon,
        } => {
            println!(
                "Delivered summary: {} documents ({} expired, {} expiring soon)",
                total_reported, total_expired, total_expiring_soon
            );
        }
        SweepOutcome::NothingToReport => {
            println!("Nothing to report: no notification sent.");
        }
    }

    Ok(())
}

fn run_report(config: &AppConfig, mut args: ReportArgs) -> Result<(), AppError> {
    let roster_path = args.roster.take().unwrap_or_else(|| config.roster.path.clone());
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let rows = PatientRoster::from_path(&roster_path)?;
    let rules = ExpiryRuleTable::standard();
    let report = classify(&rows, &rules, today);

    if !report.invalid_cells.is_empty() {
        println!("Skipped {} unreadable date cell(s):", report.invalid_cells.len());
        for cell in &report.invalid_cells {
            println!("- {}", cell);
        }
        println!();
    }

    if report.is_empty() {
        println!("Nothing to report: no expired or expiring documents.");
        return Ok(());
    }

    render_expiry_summary(&report.summary(&rules, today));
    Ok(())
}

fn run_schedule(config: &AppConfig, command: ScheduleCommand) -> Result<(), AppError> {
    let store = FileTriggerStore::new(config.schedule.state_path.clone());

    match command {
        ScheduleCommand::Install => {
            let schedule = config.schedule.weekly_schedule();
            store.install(&schedule)?;
            println!(
                "Weekly sweep scheduled: cron '{}' ({})",
                schedule.cron_expression(),
                schedule.timezone
            );
        }
        ScheduleCommand::Remove => {
            if store.remove()? {
                println!("Weekly sweep trigger removed.");
            } else {
                println!("No trigger was installed.");
            }
        }
        ScheduleCommand::Show => match store.current()? {
            Some(schedule) => println!(
                "Installed trigger: cron '{}' ({})",
                schedule.cron_expression(),
                schedule.timezone
            ),
            None => println!("No trigger installed."),
        },
    }

    Ok(())
}

fn render_expiry_summary(summary: &ExpirySummary) {
    println!("{} - {}", summary.title, summary.generated_on);
    println!(
        "Documents needing attention: {} ({} expired, {} expiring within {} days)",
        summary.total_reported,
        summary.total_expired,
        summary.total_expiring_soon,
        summary.window_days
    );

    for section in &summary.sections {
        println!("\n{}", section.kind_label);
        for record in section.expired.iter().chain(section.expiring_soon.iter()) {
            if record.contact.is_empty() {
                println!("- {}: {}", record.patient_name, record.status_line);
            } else {
                println!(
                    "- {} ({}): {}",
                    record.patient_name, record.contact, record.status_line
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_and_rejects_everything_else() {
        assert_eq!(
            parse_date(" 2025-06-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"))
        );
        assert!(parse_date("06/01/2025").is_err());
        assert!(parse_date("soon").is_err());
    }
}
