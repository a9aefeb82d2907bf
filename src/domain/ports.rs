use crate::domain::model::{
    Client, ClientId, NewClient, NewReservation, NewService, Reservation, ReservationId,
    ReservationStatus, Service, ServiceId,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Human-readable one-line summary of a record.
pub trait Describe {
    fn describe(&self) -> String;
}

/// Outcome of a delete: whether the target existed and how many dependants went with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deletion {
    pub removed: bool,
    pub cascaded: usize,
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn insert_service(&self, new: NewService) -> Result<Service>;
    async fn save_service(&self, service: &Service) -> Result<()>;
    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>>;
    async fn list_services(&self) -> Result<Vec<Service>>;
    /// Also deletes every reservation of the service.
    async fn delete_service(&self, id: ServiceId) -> Result<Deletion>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn insert_client(&self, new: NewClient) -> Result<Client>;
    async fn save_client(&self, client: &Client) -> Result<()>;
    async fn find_client(&self, id: ClientId) -> Result<Option<Client>>;
    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>>;
    async fn list_clients(&self) -> Result<Vec<Client>>;
    /// Also deletes every reservation of the client.
    async fn delete_client(&self, id: ClientId) -> Result<Deletion>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn insert_reservation(&self, new: NewReservation) -> Result<Reservation>;
    async fn save_reservation(&self, reservation: &Reservation) -> Result<()>;
    /// Sets only the status under a single write; other stored fields are left as they are.
    async fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation>;
    async fn find_reservation(&self, id: ReservationId) -> Result<Option<Reservation>>;
    async fn list_reservations(&self) -> Result<Vec<Reservation>>;
    async fn reservations_for_client(&self, id: ClientId) -> Result<Vec<Reservation>>;
    async fn reservations_for_service(&self, id: ServiceId) -> Result<Vec<Reservation>>;
    async fn delete_reservation(&self, id: ReservationId) -> Result<Deletion>;
}

/// Everything the booking service needs from persistence.
pub trait BookingRepository: ServiceRepository + ClientRepository + ReservationRepository {}

impl<T> BookingRepository for T where T: ServiceRepository + ClientRepository + ReservationRepository {}
