use crate::database::in_memory_repository::InMemoryRepository;
use crate::error::app_error::AppError;
use crate::models::booking::{Booking, NewBooking};
use chrono::Utc;
use uuid::Uuid;

#[async_trait::async_trait]
pub trait BookingRepository {
    /// Persists the booking, assigning the next id and the creation time.
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, AppError>;
    /// Bookings newest first, restricted to `owner` when one is given.
    async fn list_bookings(&self, owner: Option<&Uuid>) -> Result<Vec<Booking>, AppError>;
}

#[async_trait::async_trait]
impl BookingRepository for InMemoryRepository {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, AppError> {
        let mut ledger = self.tables.bookings.write()?;
        ledger.last_id += 1;

        let booking = Booking {
            id: ledger.last_id,
            owner: booking.owner,
            destination: booking.destination,
            departure_date: booking.departure_date,
            return_date: booking.return_date,
            travelers: booking.travelers,
            created_at: Utc::now(),
        };
        ledger.rows.push(booking.clone());

        Ok(booking)
    }

    async fn list_bookings(&self, owner: Option<&Uuid>) -> Result<Vec<Booking>, AppError> {
        let ledger = self.tables.bookings.read()?;
        // rows are appended in id order under the write lock
        let bookings: Vec<Booking> = ledger
            .rows
            .iter()
            .rev()
            .filter(|booking| owner.is_none_or(|owner| booking.owner.as_ref() == Some(owner)))
            .cloned()
            .collect();

        Ok(bookings)
    }
}
