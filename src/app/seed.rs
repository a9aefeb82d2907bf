use crate::config::seed_config::SeedConfig;
use crate::domain::model::{ClientId, NewReservation, ServiceId};
use crate::domain::ports::{
    BookingRepository, ClientRepository, ReservationRepository, ServiceRepository,
};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{validate_text, Validate};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub services: usize,
    pub clients: usize,
    pub reservations: usize,
}

/// Inserts every seed entry, resolving reservation keys to the new identifiers.
///
/// Entries are inserted in file order; a failure stops the run and leaves
/// earlier entries in place.
pub async fn apply_seed<R: BookingRepository>(config: &SeedConfig, repository: &R) -> Result<SeedReport> {
    config.validate()?;

    let enforce_rules = config.enforce_field_rules();
    let strict_names = config.strict_names();
    let mut report = SeedReport::default();

    let mut service_ids: HashMap<&str, ServiceId> = HashMap::new();
    for seed in &config.services {
        let new = seed.to_new_service()?;
        if enforce_rules {
            new.validate()?;
        }
        let service = repository.insert_service(new).await?;
        debug!(key = %seed.key, service_id = %service.id(), "Seeded service");
        service_ids.insert(seed.key.as_str(), service.id());
        report.services += 1;
    }

    let mut client_ids: HashMap<&str, ClientId> = HashMap::new();
    for seed in &config.clients {
        let new = seed.to_new_client();
        if strict_names {
            validate_text("first_name", &new.first_name)?;
            validate_text("last_name", &new.last_name)?;
        }
        if enforce_rules {
            new.validate()?;
        }
        let client = repository.insert_client(new).await?;
        debug!(key = %seed.key, client_id = %client.id(), "Seeded client");
        client_ids.insert(seed.key.as_str(), client.id());
        report.clients += 1;
    }

    for seed in &config.reservations {
        let (Some(&client_id), Some(&service_id)) = (
            client_ids.get(seed.client.as_str()),
            service_ids.get(seed.service.as_str()),
        ) else {
            return Err(BookingError::IntegrityError {
                message: format!(
                    "seed reservation references unknown keys '{}'/'{}'",
                    seed.client, seed.service
                ),
            });
        };
        let mut new = NewReservation::new(client_id, service_id, seed.parsed_date()?, seed.parsed_time()?)
            .with_status(seed.parsed_status()?);
        new.notes = seed.notes.clone();
        repository.insert_reservation(new).await?;
        report.reservations += 1;
    }

    info!(
        services = report.services,
        clients = report.clients,
        reservations = report.reservations,
        "Seed applied"
    );
    Ok(report)
}
