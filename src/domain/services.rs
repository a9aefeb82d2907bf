use crate::domain::model::{
    ClientId, Reservation, ReservationDetails, ReservationId, ReservationStatus, Service, ServiceId,
};
use crate::domain::ports::{
    BookingRepository, ClientRepository, Deletion, Describe, ReservationRepository,
    ServiceRepository,
};
use crate::domain::queries;
use crate::utils::error::{BookingError, Result};
use std::sync::Arc;

/// Queries and use cases over a booking repository.
pub struct BookingService<R: BookingRepository> {
    repository: Arc<R>,
}

impl<R: BookingRepository> Clone for BookingService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn average_experience(&self) -> Result<Option<f64>> {
        let services = self.repository.list_services().await?;
        Ok(queries::average_experience(&services))
    }

    pub async fn tags_by_kind(&self, kind: &str) -> Result<Vec<Service>> {
        let services = self.repository.list_services().await?;
        Ok(queries::tags_by_kind(&services, kind))
    }

    pub async fn all_regulations(&self) -> Result<Vec<String>> {
        let services = self.repository.list_services().await?;
        Ok(queries::all_regulations(&services))
    }

    pub async fn reservation_details(&self, id: ReservationId) -> Result<ReservationDetails> {
        let reservation = self
            .repository
            .find_reservation(id)
            .await?
            .ok_or(BookingError::NotFound {
                entity: "Reservation",
                id: id.0,
            })?;
        self.load_details(reservation).await
    }

    async fn load_details(&self, reservation: Reservation) -> Result<ReservationDetails> {
        let client = self
            .repository
            .find_client(reservation.client_id)
            .await?
            .ok_or_else(|| BookingError::IntegrityError {
                message: format!(
                    "reservation {} references missing client {}",
                    reservation.id(),
                    reservation.client_id
                ),
            })?;
        let service = self
            .repository
            .find_service(reservation.service_id)
            .await?
            .ok_or_else(|| BookingError::IntegrityError {
                message: format!(
                    "reservation {} references missing service {}",
                    reservation.id(),
                    reservation.service_id
                ),
            })?;
        Ok(ReservationDetails {
            reservation,
            client,
            service,
        })
    }

    /// One summary per service, client and reservation, in that order.
    pub async fn describe_all(&self) -> Result<Vec<String>> {
        let mut lines: Vec<String> = self
            .repository
            .list_services()
            .await?
            .iter()
            .map(Describe::describe)
            .collect();

        lines.extend(
            self.repository
                .list_clients()
                .await?
                .iter()
                .map(Describe::describe),
        );

        for reservation in self.repository.list_reservations().await? {
            lines.push(self.load_details(reservation).await?.describe());
        }

        Ok(lines)
    }

    pub async fn set_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation> {
        self.repository.update_status(id, status).await
    }

    pub async fn remove_client(&self, id: ClientId) -> Result<Deletion> {
        let deletion = self.repository.delete_client(id).await?;
        if !deletion.removed {
            return Err(BookingError::NotFound {
                entity: "Client",
                id: id.0,
            });
        }
        Ok(deletion)
    }

    pub async fn remove_service(&self, id: ServiceId) -> Result<Deletion> {
        let deletion = self.repository.delete_service(id).await?;
        if !deletion.removed {
            return Err(BookingError::NotFound {
                entity: "Service",
                id: id.0,
            });
        }
        Ok(deletion)
    }
}
