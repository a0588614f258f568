use crate::auth::Caller;
use crate::error::app_error::AppError;
use crate::models::flight::{FlightQuote, TripRequest};
use crate::service::availability::AvailabilityEngine;
use rocket::serde::json::Json;
use rocket::{State, post};
use rocket_okapi::openapi;
use tracing::info;

/// Check whether a trip can be flown and what it costs
///
/// Answers take as long as the upstream reservation system (about 800ms by default).
/// `available: false` is a normal answer, not an error.
#[openapi(tag = "Flights")]
#[post("/", data = "<payload>")]
pub async fn check_flights(engine: &State<AvailabilityEngine>, caller: Caller, payload: Json<TripRequest>) -> Result<Json<FlightQuote>, AppError> {
    info!(
        caller = %caller.label(),
        destination = %payload.destination,
        departure_date = %payload.departure_date,
        return_date = %payload.return_date,
        travelers = payload.travelers.get(),
        "flight check received"
    );

    let quote = engine.check_availability(&payload).await?;
    Ok(Json(quote))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![check_flights]
}
