use anyhow::Context;
use booking_model::domain::model::{ClientId, ReservationId, ReservationStatus, ServiceId};
use booking_model::utils::error::ErrorSeverity;
use booking_model::utils::logger::{self, LogFormat};
use booking_model::{
    apply_seed, current_time_string, BookingService, CliConfig, Command, Describe,
    InMemoryStore, LocalStorage, SeedConfig, Storage,
};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let format = if config.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, config.verbose).context("failed to install logger")?;

    tracing::info!("Starting booking CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config).await {
        Ok(lines) => {
            let mut stdout = std::io::stdout().lock();
            for line in lines {
                writeln!(stdout, "{}", line).context("failed to write to stdout")?;
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

async fn run(config: &CliConfig) -> booking_model::Result<Vec<String>> {
    let seed = config.seed.as_deref().map(SeedConfig::from_file).transpose()?;
    let snapshot_path = config
        .snapshot
        .clone()
        .or_else(|| seed.as_ref().and_then(|s| s.snapshot_path().map(str::to_string)));

    let storage = LocalStorage::new(".");
    let mut needs_save = config.command.mutates();

    let existing_snapshot = match &snapshot_path {
        Some(path) => storage.exists(path).await?.then_some(path.as_str()),
        None => None,
    };

    let store = match existing_snapshot {
        Some(path) => {
            if seed.is_some() {
                tracing::warn!(path = %path, "Snapshot exists; seed file ignored");
            }
            InMemoryStore::load_snapshot(&storage, path).await?
        }
        None => {
            let store = InMemoryStore::new();
            if let Some(seed) = &seed {
                apply_seed(seed, &store).await?;
                needs_save = true;
            }
            store
        }
    };

    let booking = BookingService::new(Arc::new(store));
    let lines = execute(&booking, &config.command).await?;

    if needs_save {
        if let Some(path) = &snapshot_path {
            booking.repository().save_snapshot(&storage, path).await?;
        }
    }

    Ok(lines)
}

async fn execute(
    booking: &BookingService<InMemoryStore>,
    command: &Command,
) -> booking_model::Result<Vec<String>> {
    let lines = match command {
        Command::Describe => booking.describe_all().await?,
        Command::Experience => match booking.average_experience().await? {
            Some(mean) => vec![format!("Average experience: {:.2} years", mean)],
            None => vec!["No instructors registered".to_string()],
        },
        Command::Tags { kind } => booking
            .tags_by_kind(kind)
            .await?
            .iter()
            .map(Describe::describe)
            .collect(),
        Command::Regulations => booking.all_regulations().await?,
        Command::Clock => vec![current_time_string()],
        Command::SetStatus {
            reservation,
            status,
        } => {
            let status: ReservationStatus = status.parse()?;
            let id = ReservationId(*reservation);
            booking.set_status(id, status).await?;
            let details = booking.reservation_details(id).await?;
            vec![format!("{} [{}]", details.describe(), status.label())]
        }
        Command::DeleteClient { client } => {
            let deletion = booking.remove_client(ClientId(*client)).await?;
            vec![format!(
                "Deleted client {} and {} reservation(s)",
                client, deletion.cascaded
            )]
        }
        Command::DeleteService { service } => {
            let deletion = booking.remove_service(ServiceId(*service)).await?;
            vec![format!(
                "Deleted service {} and {} reservation(s)",
                service, deletion.cascaded
            )]
        }
    };
    Ok(lines)
}
