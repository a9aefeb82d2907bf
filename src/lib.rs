pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{InMemoryStore, LocalStorage, Snapshot};
pub use app::{apply_seed, SeedReport};
pub use config::SeedConfig;
pub use domain::ports::{
    BookingRepository, ClientRepository, Deletion, Describe, ReservationRepository,
    ServiceRepository, Storage,
};
pub use domain::services::BookingService;
pub use utils::clock::current_time_string;
pub use utils::error::{BookingError, Result};
pub use utils::validation::validate_text;
