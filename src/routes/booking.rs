use crate::auth::Caller;
use crate::database::booking::BookingRepository;
use crate::database::in_memory_repository::InMemoryRepository;
use crate::error::app_error::AppError;
use crate::models::booking::{BookingResponse, NewBooking};
use crate::models::flight::TripRequest;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;
use tracing::info;
use validator::Validate;

/// Record a booking for the caller
///
/// No availability check happens here; the client is expected to have asked first.
#[openapi(tag = "Bookings")]
#[post("/", data = "<payload>")]
pub async fn create_booking(repo: &State<InMemoryRepository>, caller: Caller, payload: Json<TripRequest>) -> Result<Json<BookingResponse>, AppError> {
    payload.validate()?;

    let trip = payload.into_inner();
    info!(
        caller = %caller.label(),
        destination = %trip.destination,
        departure_date = %trip.departure_date,
        return_date = %trip.return_date,
        travelers = trip.travelers.get(),
        "booking received"
    );

    let booking = repo.create_booking(NewBooking::from_trip(caller.owner(), trip)).await?;
    Ok(Json(BookingResponse::from(&booking)))
}

/// List the caller's bookings, newest first
#[openapi(tag = "Bookings")]
#[get("/")]
pub async fn list_bookings(repo: &State<InMemoryRepository>, caller: Caller) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = repo.list_bookings(caller.owner().as_ref()).await?;
    Ok(Json(bookings.iter().map(BookingResponse::from).collect()))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![create_booking, list_bookings]
}
