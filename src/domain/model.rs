use crate::utils::error::BookingError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SERVICE_NAME_MAX: usize = 150;
pub const SPECIALTY_MAX: usize = 100;
pub const TAG_KIND_MAX: usize = 100;
pub const TAG_CODE_MAX: usize = 50;
pub const PROTOCOL_LEVEL_MAX: usize = 100;
pub const DOCUMENT_ID_MAX: usize = 20;
pub const PERSON_NAME_MAX: usize = 100;
pub const PHONE_MAX: usize = 15;

/// Characters of the regulations text shown in a protocol summary.
pub const REGULATIONS_PREVIEW_CHARS: usize = 50;

macro_rules! record_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(ServiceId);
record_id!(ClientId);
record_id!(ReservationId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorProfile {
    pub specialty: String,
    pub years_experience: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagProfile {
    pub kind: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolProfile {
    pub level: String,
    pub regulations: String,
}

/// Specializations stored in the service identity space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum ServiceVariant {
    #[default]
    Plain,
    Instructor(InstructorProfile),
    Tag(TagProfile),
    Protocol(ProtocolProfile),
}

impl ServiceVariant {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Plain => "service",
            Self::Instructor(_) => "instructor",
            Self::Tag(_) => "tag",
            Self::Protocol(_) => "protocol",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub variant: ServiceVariant,
}

impl NewService {
    pub fn plain(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variant: ServiceVariant::Plain,
        }
    }

    pub fn instructor(
        name: impl Into<String>,
        description: impl Into<String>,
        specialty: impl Into<String>,
        years_experience: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variant: ServiceVariant::Instructor(InstructorProfile {
                specialty: specialty.into(),
                years_experience,
            }),
        }
    }

    pub fn tag(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variant: ServiceVariant::Tag(TagProfile {
                kind: kind.into(),
                code: code.into(),
            }),
        }
    }

    pub fn protocol(
        name: impl Into<String>,
        description: impl Into<String>,
        level: impl Into<String>,
        regulations: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variant: ServiceVariant::Protocol(ProtocolProfile {
                level: level.into(),
                regulations: regulations.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    id: ServiceId,
    created_at: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub variant: ServiceVariant,
}

impl Service {
    pub(crate) fn from_new(id: ServiceId, created_at: DateTime<Utc>, new: NewService) -> Self {
        Self {
            id,
            created_at,
            name: new.name,
            description: new.description,
            variant: new.variant,
        }
    }

    pub fn id(&self) -> ServiceId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn as_instructor(&self) -> Option<&InstructorProfile> {
        match &self.variant {
            ServiceVariant::Instructor(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&TagProfile> {
        match &self.variant {
            ServiceVariant::Tag(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_protocol(&self) -> Option<&ProtocolProfile> {
        match &self.variant {
            ServiceVariant::Protocol(profile) => Some(profile),
            _ => None,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub document_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl NewClient {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            document_id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    pub fn with_document(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    created_at: DateTime<Utc>,
    pub document_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl Client {
    pub(crate) fn from_new(id: ClientId, created_at: DateTime<Utc>, new: NewClient) -> Self {
        Self {
            id,
            created_at,
            document_id: new.document_id,
            first_name: new.first_name,
            last_name: new.last_name,
            phone: new.phone,
            email: new.email,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    /// Stored value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable choice label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BookingError::InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    pub status: ReservationStatus,
}

impl NewReservation {
    pub fn new(client_id: ClientId, service_id: ServiceId, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            client_id,
            service_id,
            date,
            time,
            notes: None,
            status: ReservationStatus::default(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    created_at: DateTime<Utc>,
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ReservationStatus,
}

impl Reservation {
    pub(crate) fn from_new(
        id: ReservationId,
        created_at: DateTime<Utc>,
        new: NewReservation,
    ) -> Self {
        Self {
            id,
            created_at,
            client_id: new.client_id,
            service_id: new.service_id,
            date: new.date,
            time: new.time,
            notes: new.notes,
            status: new.status,
        }
    }

    pub fn id(&self) -> ReservationId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A reservation together with the client and service it references.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDetails {
    pub reservation: Reservation,
    pub client: Client,
    pub service: Service,
}

impl fmt::Display for ReservationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation for {} for {} on {}",
            self.service.name,
            self.client.first_name,
            self.reservation.date.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_pending() {
        assert_eq!(ReservationStatus::default(), ReservationStatus::Pending);
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let new = NewReservation::new(ClientId(1), ServiceId(1), date, time);
        assert_eq!(new.status, ReservationStatus::Pending);
    }

    #[test]
    fn test_status_parse_and_labels() {
        assert_eq!("confirmed".parse::<ReservationStatus>().unwrap(), ReservationStatus::Confirmed);
        assert_eq!(ReservationStatus::Cancelled.label(), "Cancelled");
        assert!(matches!(
            "Confirmed".parse::<ReservationStatus>(),
            Err(BookingError::InvalidStatus(value)) if value == "Confirmed"
        ));
        assert!("archived".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ReservationStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        let parsed: ReservationStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Pending);
        assert!(serde_json::from_str::<ReservationStatus>("\"done\"").is_err());
    }

    #[test]
    fn test_variant_accessors() {
        let now = Utc::now();
        let tag = Service::from_new(ServiceId(3), now, NewService::tag("Helmet", "", "safety", "S-1"));
        assert_eq!(tag.as_tag().map(|t| t.code.as_str()), Some("S-1"));
        assert!(tag.as_instructor().is_none());
        assert!(tag.as_protocol().is_none());
        assert_eq!(tag.variant.label(), "tag");
        assert_eq!(tag.to_string(), "Helmet");
    }

    #[test]
    fn test_client_display() {
        let client = Client::from_new(
            ClientId(1),
            Utc::now(),
            NewClient::new("Ana", "Lopez", "555", "ana@x.com"),
        );
        assert_eq!(client.to_string(), "Ana Lopez");
        assert_eq!(client.full_name(), "Ana Lopez");
    }
}
