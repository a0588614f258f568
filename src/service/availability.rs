use crate::config::AvailabilityConfig;
use crate::error::app_error::AppError;
use crate::models::flight::{FlightQuote, TravelerCount, TripRequest};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;
use validator::Validate;

/// A destination with fixed capacity and per-seat price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightRoute {
    pub name: &'static str,
    pub capacity: u32,
    pub base_price: u32,
}

pub const FLIGHT_TABLE: [FlightRoute; 8] = [
    FlightRoute { name: "Paris", capacity: 45, base_price: 450 },
    FlightRoute { name: "London", capacity: 32, base_price: 380 },
    FlightRoute { name: "New York", capacity: 28, base_price: 520 },
    FlightRoute { name: "Tokyo", capacity: 18, base_price: 780 },
    FlightRoute { name: "Bangkok", capacity: 25, base_price: 620 },
    FlightRoute { name: "Dubai", capacity: 36, base_price: 550 },
    FlightRoute { name: "Rome", capacity: 29, base_price: 420 },
    FlightRoute { name: "Sydney", capacity: 22, base_price: 890 },
];

/// Chance that a destination outside the table has any inventory at all.
pub const UNKNOWN_INVENTORY_PROBABILITY: f64 = 0.7;
const UNKNOWN_SEATS: std::ops::Range<u32> = 10..40;
const UNKNOWN_SEAT_PRICE: std::ops::Range<u32> = 300..700;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination<'a> {
    Known { name: &'static str, capacity: u32, base_price: u32 },
    Unknown { name: &'a str },
}

impl<'a> Destination<'a> {
    /// Looks `raw` up in the flight table, ignoring case and surrounding whitespace.
    pub fn resolve(raw: &'a str) -> Self {
        let name = raw.trim();
        FLIGHT_TABLE
            .iter()
            .find(|route| route.name.eq_ignore_ascii_case(name))
            .map(|route| Destination::Known {
                name: route.name,
                capacity: route.capacity,
                base_price: route.base_price,
            })
            .unwrap_or(Destination::Unknown { name })
    }

    pub fn name(&self) -> &str {
        match self {
            Destination::Known { name, .. } => *name,
            Destination::Unknown { name } => *name,
        }
    }
}

pub fn known_destinations() -> impl Iterator<Item = &'static str> {
    FLIGHT_TABLE.iter().map(|route| route.name)
}

/// Decides availability and price. No waiting happens here.
///
/// Known destinations never touch `rng`. Capacity is not reduced by earlier
/// bookings, so the same question always gets the same answer.
pub fn quote<R: Rng + ?Sized>(destination: &Destination<'_>, travelers: TravelerCount, rng: &mut R) -> FlightQuote {
    let requested = travelers.get();
    match *destination {
        Destination::Known { name, capacity, base_price } => {
            if capacity >= requested {
                FlightQuote {
                    available: true,
                    seats_available: capacity,
                    price: u64::from(base_price) * u64::from(requested),
                    message: format!("Flights available to {}", name),
                }
            } else {
                FlightQuote {
                    available: false,
                    seats_available: capacity,
                    price: 0,
                    message: format!("Not enough seats to {}. Only {} seats left.", name, capacity),
                }
            }
        }
        Destination::Unknown { name } => {
            let has_inventory = rng.random_bool(UNKNOWN_INVENTORY_PROBABILITY);
            let (seats, seat_price) = if has_inventory {
                (rng.random_range(UNKNOWN_SEATS), rng.random_range(UNKNOWN_SEAT_PRICE))
            } else {
                (0, 0)
            };

            if has_inventory && seats >= requested {
                FlightQuote {
                    available: true,
                    seats_available: seats,
                    price: u64::from(seat_price) * u64::from(requested),
                    message: format!("Flights available to {}", name),
                }
            } else {
                FlightQuote {
                    available: false,
                    seats_available: seats,
                    price: 0,
                    message: format!("No flights available to {} for selected dates", name),
                }
            }
        }
    }
}

/// Answers availability questions the way the upstream reservation system would,
/// including its response time.
pub struct AvailabilityEngine {
    latency: Duration,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl AvailabilityEngine {
    pub fn new(config: &AvailabilityConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(Duration::from_millis(config.simulated_latency_ms), rng)
    }

    pub fn with_rng(latency: Duration, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            latency,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// The decision alone, without the simulated latency.
    pub fn decide(&self, trip: &TripRequest) -> FlightQuote {
        let destination = Destination::resolve(&trip.destination);
        // generator state survives a poisoned lock
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let quote = quote(&destination, trip.travelers, &mut **rng);

        debug!(
            destination = destination.name(),
            known = matches!(destination, Destination::Known { .. }),
            travelers = trip.travelers.get(),
            available = quote.available,
            "availability decided"
        );
        quote
    }

    pub async fn check_availability(&self, trip: &TripRequest) -> Result<FlightQuote, AppError> {
        trip.validate()?;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(self.decide(trip))
    }
}
