use crate::domain::model::{NewClient, NewService, ReservationStatus};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{compiled, CompiledPattern, Validate};
use chrono::{NaiveDate, NaiveTime};
use regex::Captures;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    pub store: Option<StoreConfig>,
    pub validation: Option<ValidationSettings>,
    #[serde(default)]
    pub services: Vec<ServiceSeed>,
    #[serde(default)]
    pub clients: Vec<ClientSeed>,
    #[serde(default)]
    pub reservations: Vec<ReservationSeed>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Apply the letters-only rule to client first and last names.
    pub strict_names: Option<bool>,
    /// Check length limits and email shape before inserting.
    pub enforce_field_rules: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSeed {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// One of `service`, `instructor`, `tag`, `protocol`.
    #[serde(default = "default_variant")]
    pub variant: String,
    pub specialty: Option<String>,
    pub years_experience: Option<u32>,
    pub kind: Option<String>,
    pub code: Option<String>,
    pub level: Option<String>,
    pub regulations: Option<String>,
}

fn default_variant() -> String {
    "service".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSeed {
    pub key: String,
    pub document_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationSeed {
    pub client: String,
    pub service: String,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
    pub status: Option<String>,
}

fn required<'a>(key: &str, field: &str, value: &'a Option<String>) -> Result<&'a String> {
    value.as_ref().ok_or_else(|| BookingError::MissingConfigError {
        field: format!("services.{}.{}", key, field),
    })
}

impl ServiceSeed {
    pub fn to_new_service(&self) -> Result<NewService> {
        let key = &self.key;
        let new = match self.variant.as_str() {
            "service" => NewService::plain(&self.name, &self.description),
            "instructor" => NewService::instructor(
                &self.name,
                &self.description,
                required(key, "specialty", &self.specialty)?,
                self.years_experience
                    .ok_or_else(|| BookingError::MissingConfigError {
                        field: format!("services.{}.years_experience", key),
                    })?,
            ),
            "tag" => NewService::tag(
                &self.name,
                &self.description,
                required(key, "kind", &self.kind)?,
                required(key, "code", &self.code)?,
            ),
            "protocol" => NewService::protocol(
                &self.name,
                &self.description,
                required(key, "level", &self.level)?,
                required(key, "regulations", &self.regulations)?,
            ),
            other => {
                return Err(BookingError::InvalidConfigValueError {
                    field: format!("services.{}.variant", key),
                    value: other.to_string(),
                    reason: "Valid variants: service, instructor, tag, protocol".to_string(),
                })
            }
        };
        Ok(new)
    }
}

impl ClientSeed {
    pub fn to_new_client(&self) -> NewClient {
        NewClient {
            document_id: self.document_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}

impl ReservationSeed {
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            BookingError::InvalidConfigValueError {
                field: "reservations.date".to_string(),
                value: self.date.clone(),
                reason: format!("Expected YYYY-MM-DD: {}", e),
            }
        })
    }

    pub fn parsed_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&self.time, "%H:%M:%S"))
            .map_err(|e| BookingError::InvalidConfigValueError {
                field: "reservations.time".to_string(),
                value: self.time.clone(),
                reason: format!("Expected HH:MM or HH:MM:SS: {}", e),
            })
    }

    pub fn parsed_status(&self) -> Result<ReservationStatus> {
        match &self.status {
            None => Ok(ReservationStatus::default()),
            Some(status) => status.parse(),
        }
    }
}

impl SeedConfig {
    /// Reads a seed file, expanding `${NAME}` from the process environment.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw, |name| std::env::var(name).ok()).map_err(|e| match e {
            BookingError::ConfigValidationError { field, message } => {
                BookingError::ConfigValidationError {
                    field,
                    message: format!("{} ({})", message, path.display()),
                }
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, |name| std::env::var(name).ok())
    }

    /// Parses seed TOML after expanding placeholders through `lookup`.
    pub fn parse<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expanded = expand_placeholders(content, lookup)?;
        toml::from_str(&expanded).map_err(|e| BookingError::ConfigValidationError {
            field: "seed".to_string(),
            message: format!("not a valid seed document: {}", e),
        })
    }

    pub fn snapshot_path(&self) -> Option<&str> {
        self.store.as_ref().and_then(|s| s.snapshot_path.as_deref())
    }

    pub fn strict_names(&self) -> bool {
        self.validation
            .as_ref()
            .and_then(|v| v.strict_names)
            .unwrap_or(false)
    }

    pub fn enforce_field_rules(&self) -> bool {
        self.validation
            .as_ref()
            .and_then(|v| v.enforce_field_rules)
            .unwrap_or(true)
    }

    pub fn validate_config(&self) -> Result<()> {
        let mut service_keys = HashSet::new();
        for service in &self.services {
            if !service_keys.insert(service.key.as_str()) {
                return Err(duplicate_key("services", &service.key));
            }
            service.to_new_service()?;
        }

        let mut client_keys = HashSet::new();
        for client in &self.clients {
            if !client_keys.insert(client.key.as_str()) {
                return Err(duplicate_key("clients", &client.key));
            }
        }

        for reservation in &self.reservations {
            if !client_keys.contains(reservation.client.as_str()) {
                return Err(unknown_key("reservations.client", &reservation.client));
            }
            if !service_keys.contains(reservation.service.as_str()) {
                return Err(unknown_key("reservations.service", &reservation.service));
            }
            reservation.parsed_date()?;
            reservation.parsed_time()?;
            reservation
                .parsed_status()
                .map_err(|_| BookingError::InvalidConfigValueError {
                    field: "reservations.status".to_string(),
                    value: reservation.status.clone().unwrap_or_default(),
                    reason: "Valid statuses: pending, confirmed, cancelled".to_string(),
                })?;
        }

        Ok(())
    }
}

static PLACEHOLDER_RE: CompiledPattern = OnceLock::new();

/// `${NAME}` with a shell-style name. Names `lookup` does not know are left untouched.
fn expand_placeholders<F>(content: &str, lookup: F) -> Result<Cow<'_, str>>
where
    F: Fn(&str) -> Option<String>,
{
    let placeholder = compiled(&PLACEHOLDER_RE, r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")?;
    Ok(placeholder.replace_all(content, |caps: &Captures| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    }))
}

fn duplicate_key(section: &str, key: &str) -> BookingError {
    BookingError::InvalidConfigValueError {
        field: format!("{}.key", section),
        value: key.to_string(),
        reason: "Key is used more than once".to_string(),
    }
}

fn unknown_key(field: &str, key: &str) -> BookingError {
    BookingError::InvalidConfigValueError {
        field: field.to_string(),
        value: key.to_string(),
        reason: "No seed entry with this key".to_string(),
    }
}

impl Validate for SeedConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ServiceVariant;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SEED: &str = r#"
[store]
snapshot_path = "data/booking.json"

[validation]
strict_names = true

[[services]]
key = "yoga"
name = "Yoga"
description = "Morning class"

[[services]]
key = "surf"
name = "Surf"
variant = "instructor"
specialty = "Longboard"
years_experience = 8

[[clients]]
key = "ana"
first_name = "Ana"
last_name = "Lopez"
phone = "555"
email = "a@x.com"

[[reservations]]
client = "ana"
service = "yoga"
date = "2024-01-01"
time = "09:00"
"#;

    #[test]
    fn test_parse_seed() {
        let config = SeedConfig::from_toml_str(SEED).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.snapshot_path(), Some("data/booking.json"));
        assert!(config.strict_names());
        assert!(config.enforce_field_rules());
        assert_eq!(config.services.len(), 2);

        let surf = config.services[1].to_new_service().unwrap();
        assert!(matches!(surf.variant, ServiceVariant::Instructor(ref p) if p.years_experience == 8));

        let reservation = &config.reservations[0];
        assert_eq!(reservation.parsed_time().unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(reservation.parsed_status().unwrap(), ReservationStatus::Pending);
    }

    #[test]
    fn test_empty_seed_is_valid() {
        let config = SeedConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.snapshot_path(), None);
        assert!(!config.strict_names());
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let content = SEED.replace("service = \"yoga\"", "service = \"pilates\"");
        let config = SeedConfig::from_toml_str(&content).unwrap();
        match config.validate() {
            Err(BookingError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "reservations.service");
                assert_eq!(value, "pilates");
            }
            other => panic!("expected invalid value error, got {:?}", other),
        }
    }

    #[test]
    fn test_instructor_without_experience_rejected() {
        let content = SEED.replace("years_experience = 8", "");
        let config = SeedConfig::from_toml_str(&content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(BookingError::MissingConfigError { field }) if field == "services.surf.years_experience"
        ));
    }

    #[test]
    fn test_bad_status_and_date_rejected() {
        let content = format!("{}status = \"done\"\n", SEED);
        let config = SeedConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_err());

        let content = SEED.replace("2024-01-01", "01/01/2024");
        let config = SeedConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BOOKING_SEED_TEST_EMAIL", "env@x.com");
        let content = SEED.replace("a@x.com", "${BOOKING_SEED_TEST_EMAIL}");
        let config = SeedConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.clients[0].email, "env@x.com");
        std::env::remove_var("BOOKING_SEED_TEST_EMAIL");
    }

    #[test]
    fn test_placeholders_use_lookup() {
        let content = SEED
            .replace("a@x.com", "${CLIENT_EMAIL}")
            .replace("Ana", "${UNSET_NAME}");
        let config = SeedConfig::parse(&content, |name| {
            (name == "CLIENT_EMAIL").then(|| "lookup@x.com".to_string())
        })
        .unwrap();
        assert_eq!(config.clients[0].email, "lookup@x.com");
        assert_eq!(config.clients[0].first_name, "${UNSET_NAME}");
    }

    #[test]
    fn test_invalid_toml_names_the_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[[clients]\nkey = ").unwrap();
        match SeedConfig::from_file(temp_file.path()) {
            Err(BookingError::ConfigValidationError { field, message }) => {
                assert_eq!(field, "seed");
                assert!(message.contains(&temp_file.path().display().to_string()));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_seed_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SEED.as_bytes()).unwrap();
        let config = SeedConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.clients[0].first_name, "Ana");
    }
}
