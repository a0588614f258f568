use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// Number of travelers on a trip, always at least one.
///
/// Clients send this field loosely: a JSON number, a numeric string, or nothing at
/// all. Anything that does not read as a positive integer counts as one traveler.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
#[serde(transparent)]
pub struct TravelerCount(u32);

impl TravelerCount {
    pub const ONE: TravelerCount = TravelerCount(1);

    pub fn new(count: u32) -> Self {
        Self(count.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn from_value(value: &Value) -> Self {
        let parsed = match value {
            Value::Number(number) => number.as_i64().or_else(|| number.as_f64().map(|f| f.trunc() as i64)),
            Value::String(text) => parse_leading_integer(text),
            _ => None,
        };

        match parsed {
            Some(count) if count >= 1 => Self::new(u32::try_from(count).unwrap_or(u32::MAX)),
            _ => Self::ONE,
        }
    }
}

impl Default for TravelerCount {
    fn default() -> Self {
        Self::ONE
    }
}

impl<'de> Deserialize<'de> for TravelerCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Reads the integer at the start of `text` ("3 adults" -> 3, "2.9" -> 2).
fn parse_leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut seen_digit = false;
    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(i64::from(digit - b'0'));
    }

    seen_digit.then_some(if negative { -value } else { value })
}

/// Trip parameters shared by availability checks and bookings.
#[derive(Deserialize, Debug, Clone, Validate, JsonSchema)]
pub struct TripRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub destination: String,
    #[serde(default, alias = "departureDate")]
    #[validate(length(min = 1))]
    pub departure_date: String,
    #[serde(default, alias = "returnDate")]
    #[validate(length(min = 1))]
    pub return_date: String,
    #[serde(default)]
    pub travelers: TravelerCount,
}

/// Result of an availability check. Computed per request and never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct FlightQuote {
    pub available: bool,
    pub seats_available: u32,
    pub price: u64,
    pub message: String,
}
