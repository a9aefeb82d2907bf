use crate::domain::model::{
    Client, ClientId, NewClient, NewReservation, NewService, Reservation, ReservationId,
    ReservationStatus, Service, ServiceId,
};
use crate::domain::ports::{
    ClientRepository, Deletion, ReservationRepository, ServiceRepository, Storage,
};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextIds {
    pub service: u64,
    pub client: u64,
    pub reservation: u64,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            service: 1,
            client: 1,
            reservation: 1,
        }
    }
}

/// Serializable image of a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub next_ids: NextIds,
}

#[derive(Debug, Default)]
struct Tables {
    services: BTreeMap<ServiceId, Service>,
    clients: BTreeMap<ClientId, Client>,
    reservations: BTreeMap<ReservationId, Reservation>,
    next_ids: NextIds,
}

impl Tables {
    fn ensure_unique_client(&self, candidate: &Client) -> Result<()> {
        for other in self.clients.values() {
            if other.id() == candidate.id() {
                continue;
            }
            if other.email == candidate.email {
                return Err(BookingError::UniqueViolation {
                    entity: "Client",
                    field: "email",
                    value: candidate.email.clone(),
                });
            }
            if let (Some(theirs), Some(ours)) = (&other.document_id, &candidate.document_id) {
                if theirs == ours {
                    return Err(BookingError::UniqueViolation {
                        entity: "Client",
                        field: "document_id",
                        value: ours.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn ensure_references(&self, client_id: ClientId, service_id: ServiceId) -> Result<()> {
        if !self.clients.contains_key(&client_id) {
            return Err(BookingError::IntegrityError {
                message: format!("reservation references missing client {}", client_id),
            });
        }
        if !self.services.contains_key(&service_id) {
            return Err(BookingError::IntegrityError {
                message: format!("reservation references missing service {}", service_id),
            });
        }
        Ok(())
    }

    fn remove_reservations_where(&mut self, predicate: impl Fn(&Reservation) -> bool) -> usize {
        let before = self.reservations.len();
        self.reservations.retain(|_, reservation| !predicate(reservation));
        before - self.reservations.len()
    }
}

/// Returns the id to hand out and the counter value after it.
fn allocate(counter: u64, entity: &'static str) -> Result<(u64, u64)> {
    let following = counter
        .checked_add(1)
        .ok_or_else(|| BookingError::IntegrityError {
            message: format!("{} identifiers exhausted", entity),
        })?;
    Ok((counter, following))
}

/// First free counter value after the highest id in use.
fn next_after(entity: &'static str, max: Option<u64>) -> Result<u64> {
    match max {
        None => Ok(1),
        Some(max) => allocate(max, entity).map(|(_, following)| following),
    }
}

fn ensure_positive(entity: &'static str, id: u64) -> Result<()> {
    if id == 0 {
        return Err(BookingError::IntegrityError {
            message: format!("{} id 0 in snapshot; identifiers start at 1", entity),
        });
    }
    Ok(())
}

/// Blank documents are stored as absent so they never collide.
fn normalize_document(document_id: Option<String>) -> Option<String> {
    document_id.filter(|document| !document.trim().is_empty())
}

/// In-memory implementation of every repository port.
///
/// All tables sit behind one lock, so uniqueness checks and cascading
/// deletes are atomic with respect to other callers.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store, re-checking identifiers, uniqueness and references.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut tables = Tables::default();

        for service in snapshot.services {
            let id = service.id();
            ensure_positive("Service", id.0)?;
            if tables.services.insert(id, service).is_some() {
                return Err(BookingError::IntegrityError {
                    message: format!("duplicate service id {} in snapshot", id),
                });
            }
        }

        for mut client in snapshot.clients {
            let id = client.id();
            ensure_positive("Client", id.0)?;
            client.document_id = normalize_document(client.document_id);
            tables.ensure_unique_client(&client)?;
            if tables.clients.insert(id, client).is_some() {
                return Err(BookingError::IntegrityError {
                    message: format!("duplicate client id {} in snapshot", id),
                });
            }
        }

        for reservation in snapshot.reservations {
            let id = reservation.id();
            ensure_positive("Reservation", id.0)?;
            tables.ensure_references(reservation.client_id, reservation.service_id)?;
            if tables.reservations.insert(id, reservation).is_some() {
                return Err(BookingError::IntegrityError {
                    message: format!("duplicate reservation id {} in snapshot", id),
                });
            }
        }

        // Counters never move backwards past an id already in use.
        tables.next_ids = NextIds {
            service: snapshot.next_ids.service.max(next_after(
                "Service",
                tables.services.keys().next_back().map(|id| id.0),
            )?),
            client: snapshot.next_ids.client.max(next_after(
                "Client",
                tables.clients.keys().next_back().map(|id| id.0),
            )?),
            reservation: snapshot.next_ids.reservation.max(next_after(
                "Reservation",
                tables.reservations.keys().next_back().map(|id| id.0),
            )?),
        };

        info!(
            services = tables.services.len(),
            clients = tables.clients.len(),
            reservations = tables.reservations.len(),
            "Store restored from snapshot"
        );

        Ok(Self {
            tables: RwLock::new(tables),
        })
    }

    pub async fn snapshot(&self) -> Snapshot {
        let tables = self.tables.read().await;
        Snapshot {
            services: tables.services.values().cloned().collect(),
            clients: tables.clients.values().cloned().collect(),
            reservations: tables.reservations.values().cloned().collect(),
            next_ids: tables.next_ids,
        }
    }

    pub async fn save_snapshot<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let snapshot = self.snapshot().await;
        let data = serde_json::to_vec_pretty(&snapshot)?;
        storage.write_file(path, &data).await?;
        info!(path = path, bytes = data.len(), "Snapshot written");
        Ok(())
    }

    pub async fn load_snapshot<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let data = storage.read_file(path).await?;
        let snapshot: Snapshot = serde_json::from_slice(&data)?;
        debug!(path = path, bytes = data.len(), "Snapshot read");
        Self::from_snapshot(snapshot)
    }
}

#[async_trait]
impl ServiceRepository for InMemoryStore {
    async fn insert_service(&self, new: NewService) -> Result<Service> {
        let mut tables = self.tables.write().await;
        let (raw_id, following) = allocate(tables.next_ids.service, "Service")?;
        let id = ServiceId(raw_id);
        let service = Service::from_new(id, Utc::now(), new);
        tables.next_ids.service = following;
        tables.services.insert(id, service.clone());

        info!(service_id = %id, variant = service.variant.label(), "Service inserted");
        Ok(service)
    }

    async fn save_service(&self, service: &Service) -> Result<()> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .services
            .get_mut(&service.id())
            .ok_or(BookingError::NotFound {
                entity: "Service",
                id: service.id().0,
            })?;
        stored.name = service.name.clone();
        stored.description = service.description.clone();
        stored.variant = service.variant.clone();

        debug!(service_id = %service.id(), "Service saved");
        Ok(())
    }

    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>> {
        let tables = self.tables.read().await;
        Ok(tables.services.get(&id).cloned())
    }

    async fn list_services(&self) -> Result<Vec<Service>> {
        let tables = self.tables.read().await;
        Ok(tables.services.values().cloned().collect())
    }

    async fn delete_service(&self, id: ServiceId) -> Result<Deletion> {
        let mut tables = self.tables.write().await;
        if tables.services.remove(&id).is_none() {
            debug!(service_id = %id, "Service not found for deletion");
            return Ok(Deletion::default());
        }
        let cascaded = tables.remove_reservations_where(|r| r.service_id == id);

        info!(service_id = %id, cascaded = cascaded, "Service deleted");
        Ok(Deletion {
            removed: true,
            cascaded,
        })
    }
}

#[async_trait]
impl ClientRepository for InMemoryStore {
    async fn insert_client(&self, mut new: NewClient) -> Result<Client> {
        new.document_id = normalize_document(new.document_id);

        let mut tables = self.tables.write().await;
        let (raw_id, following) = allocate(tables.next_ids.client, "Client")?;
        let id = ClientId(raw_id);
        let client = Client::from_new(id, Utc::now(), new);
        tables.ensure_unique_client(&client)?;
        tables.next_ids.client = following;
        tables.clients.insert(id, client.clone());

        info!(client_id = %id, "Client inserted");
        Ok(client)
    }

    async fn save_client(&self, client: &Client) -> Result<()> {
        let mut candidate = client.clone();
        candidate.document_id = normalize_document(candidate.document_id);

        let mut tables = self.tables.write().await;
        if !tables.clients.contains_key(&client.id()) {
            return Err(BookingError::NotFound {
                entity: "Client",
                id: client.id().0,
            });
        }
        tables.ensure_unique_client(&candidate)?;

        if let Some(stored) = tables.clients.get_mut(&client.id()) {
            stored.document_id = candidate.document_id;
            stored.first_name = candidate.first_name;
            stored.last_name = candidate.last_name;
            stored.phone = candidate.phone;
            stored.email = candidate.email;
        }

        debug!(client_id = %client.id(), "Client saved");
        Ok(())
    }

    async fn find_client(&self, id: ClientId) -> Result<Option<Client>> {
        let tables = self.tables.read().await;
        Ok(tables.clients.get(&id).cloned())
    }

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>> {
        let tables = self.tables.read().await;
        Ok(tables.clients.values().find(|c| c.email == email).cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Client>> {
        let tables = self.tables.read().await;
        Ok(tables.clients.values().cloned().collect())
    }

    async fn delete_client(&self, id: ClientId) -> Result<Deletion> {
        let mut tables = self.tables.write().await;
        if tables.clients.remove(&id).is_none() {
            debug!(client_id = %id, "Client not found for deletion");
            return Ok(Deletion::default());
        }
        let cascaded = tables.remove_reservations_where(|r| r.client_id == id);

        info!(client_id = %id, cascaded = cascaded, "Client deleted");
        Ok(Deletion {
            removed: true,
            cascaded,
        })
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn insert_reservation(&self, new: NewReservation) -> Result<Reservation> {
        let mut tables = self.tables.write().await;
        tables.ensure_references(new.client_id, new.service_id)?;
        let (raw_id, following) = allocate(tables.next_ids.reservation, "Reservation")?;
        let id = ReservationId(raw_id);
        let reservation = Reservation::from_new(id, Utc::now(), new);
        tables.next_ids.reservation = following;
        tables.reservations.insert(id, reservation.clone());

        info!(
            reservation_id = %id,
            client_id = %reservation.client_id,
            service_id = %reservation.service_id,
            status = %reservation.status,
            "Reservation inserted"
        );
        Ok(reservation)
    }

    async fn save_reservation(&self, reservation: &Reservation) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.reservations.contains_key(&reservation.id()) {
            return Err(BookingError::NotFound {
                entity: "Reservation",
                id: reservation.id().0,
            });
        }
        tables.ensure_references(reservation.client_id, reservation.service_id)?;

        if let Some(stored) = tables.reservations.get_mut(&reservation.id()) {
            stored.client_id = reservation.client_id;
            stored.service_id = reservation.service_id;
            stored.date = reservation.date;
            stored.time = reservation.time;
            stored.notes = reservation.notes.clone();
            stored.status = reservation.status;
        }

        debug!(reservation_id = %reservation.id(), status = %reservation.status, "Reservation saved");
        Ok(())
    }

    async fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .reservations
            .get_mut(&id)
            .ok_or(BookingError::NotFound {
                entity: "Reservation",
                id: id.0,
            })?;
        let previous = stored.status;
        stored.status = status;

        info!(reservation_id = %id, from = %previous, to = %status, "Reservation status changed");
        Ok(stored.clone())
    }

    async fn find_reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let tables = self.tables.read().await;
        Ok(tables.reservations.get(&id).cloned())
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        let tables = self.tables.read().await;
        Ok(tables.reservations.values().cloned().collect())
    }

    async fn reservations_for_client(&self, id: ClientId) -> Result<Vec<Reservation>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reservations
            .values()
            .filter(|r| r.client_id == id)
            .cloned()
            .collect())
    }

    async fn reservations_for_service(&self, id: ServiceId) -> Result<Vec<Reservation>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reservations
            .values()
            .filter(|r| r.service_id == id)
            .cloned()
            .collect())
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<Deletion> {
        let mut tables = self.tables.write().await;
        let removed = tables.reservations.remove(&id).is_some();
        if removed {
            info!(reservation_id = %id, "Reservation deleted");
        } else {
            debug!(reservation_id = %id, "Reservation not found for deletion");
        }
        Ok(Deletion {
            removed,
            cascaded: 0,
        })
    }
}
