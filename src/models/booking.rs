use crate::models::flight::{TravelerCount, TripRequest};
use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: u64,
    pub owner: Option<Uuid>,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub travelers: TravelerCount,
    pub created_at: DateTime<Utc>,
}

/// A booking before the store has assigned its id and timestamp.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub owner: Option<Uuid>,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub travelers: TravelerCount,
}

impl NewBooking {
    pub fn from_trip(owner: Option<Uuid>, trip: TripRequest) -> Self {
        Self {
            owner,
            destination: trip.destination,
            departure_date: trip.departure_date,
            return_date: trip.return_date,
            travelers: trip.travelers,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct BookingResponse {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub travelers: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.owner,
            destination: booking.destination.clone(),
            departure_date: booking.departure_date.clone(),
            return_date: booking.return_date.clone(),
            travelers: booking.travelers.get(),
            created_at: booking.created_at,
        }
    }
}
