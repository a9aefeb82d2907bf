use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "booking")]
#[command(about = "Inspect and maintain the booking records of a services business")]
pub struct CliConfig {
    /// TOML seed file applied to an empty store.
    #[arg(long)]
    pub seed: Option<String>,

    /// JSON snapshot loaded at start and written back after changes.
    #[arg(long)]
    pub snapshot: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print a summary line for every record.
    Describe,
    /// Mean years of experience across instructors.
    Experience,
    /// Tags of exactly the given kind.
    Tags { kind: String },
    /// Regulations text of every protocol.
    Regulations,
    /// Current local time as HH:MM.
    Clock,
    /// Change the status of a reservation (pending, confirmed, cancelled).
    SetStatus { reservation: u64, status: String },
    /// Delete a client and its reservations.
    DeleteClient { client: u64 },
    /// Delete a service and its reservations.
    DeleteService { service: u64 },
}

impl Command {
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::SetStatus { .. } | Self::DeleteClient { .. } | Self::DeleteService { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_status() {
        let config = CliConfig::try_parse_from([
            "booking",
            "--snapshot",
            "data.json",
            "set-status",
            "3",
            "confirmed",
        ])
        .unwrap();
        assert_eq!(config.snapshot.as_deref(), Some("data.json"));
        assert!(config.command.mutates());
        assert!(matches!(
            config.command,
            Command::SetStatus { reservation: 3, ref status } if status == "confirmed"
        ));
    }

    #[test]
    fn test_parse_read_only_command() {
        let config = CliConfig::try_parse_from(["booking", "--seed", "seed.toml", "tags", "safety"]).unwrap();
        assert!(!config.command.mutates());
        assert!(matches!(config.command, Command::Tags { ref kind } if kind == "safety"));
    }
}
