// Wire types for the transfer marketplace API.

use serde::{Deserialize, Deserializer, Serialize};

/// Search input, constructed once per workflow run.
///
/// Field names match the wire format of the search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub start_address: String,
    pub end_address: String,
    pub mode: String,
    pub pickup_datetime: String,
    pub num_passengers: u32,
    pub currency: String,
    pub campaign: String,
}

/// Response of the search call: the job handle to poll.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCreated {
    pub search_id: String,
}

/// One page of a search job. `more_coming` signals whether another poll
/// will deliver further results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPoll {
    #[serde(default)]
    pub results: Vec<VehicleOffer>,
    pub more_coming: bool,
}

/// A priced transport option returned by a search job.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleOffer {
    pub result_id: String,
    pub total_price: OfferPrice,
}

impl VehicleOffer {
    pub fn amount(&self) -> f64 {
        self.total_price.total_price.value
    }

    pub fn currency(&self) -> &str {
        &self.total_price.total_price.currency
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfferPrice {
    pub total_price: PriceAmount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceAmount {
    #[serde(deserialize_with = "f64_from_number_or_string")]
    pub value: f64,
    pub currency: String,
}

// The marketplace serializes price values inconsistently, sometimes as a
// JSON number and sometimes as a numeric string.
fn f64_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::String(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Booking input: passenger identity, flight metadata and the chosen offer.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code_name: String,
    pub phone_number: String,
    pub airline_iata_code: String,
    pub flight_number: String,
    pub result_id: String,
    pub search_id: String,
}

/// One page of a reservation job, keyed by the owning search.
///
/// The raw `status` string is kept as received so unrecognized values can be
/// reported verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationPoll {
    pub status: String,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

/// A confirmed reservation record.
#[derive(Debug, Clone, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub confirmation_number: String,
}

/// Reservation job status as the workflow interprets it. Anything that is
/// neither pending nor completed (including "failed") stops polling without
/// being an engine-level error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Pending,
    Completed,
    Other,
}

impl ReservationStatus {
    /// Case-insensitive, matching how the upstream reports statuses.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("pending") {
            ReservationStatus::Pending
        } else if raw.eq_ignore_ascii_case("completed") {
            ReservationStatus::Completed
        } else {
            ReservationStatus::Other
        }
    }
}

/// Confirmation data extracted from a completed reservation job.
#[derive(Debug, Clone)]
pub struct ReservationOutcome {
    pub confirmation_number: String,
    pub reservation_id: String,
    /// Poll attempts it took to reach the completed status. Reporting only.
    pub attempts: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn price_value_accepts_json_number() {
        let offer: VehicleOffer = serde_json::from_str(
            r#"{"result_id":"r1","total_price":{"total_price":{"value":42.5,"currency":"USD"}}}"#,
        )
        .unwrap();
        assert_eq!(offer.amount(), 42.5);
        assert_eq!(offer.currency(), "USD");
    }

    #[test]
    fn price_value_accepts_numeric_string() {
        let offer: VehicleOffer = serde_json::from_str(
            r#"{"result_id":"r1","total_price":{"total_price":{"value":"42.50","currency":"USD"}}}"#,
        )
        .unwrap();
        assert_eq!(offer.amount(), 42.5);
    }

    #[test]
    fn poll_pages_default_missing_lists() {
        let page: SearchPoll = serde_json::from_str(r#"{"more_coming":true}"#).unwrap();
        assert!(page.results.is_empty());
        assert!(page.more_coming);

        let update: ReservationPoll = serde_json::from_str(r#"{"status":"pending"}"#).unwrap();
        assert!(update.reservations.is_empty());
    }

    #[test_case("pending", ReservationStatus::Pending ; "pending lowercase")]
    #[test_case("PENDING", ReservationStatus::Pending ; "pending uppercase")]
    #[test_case("completed", ReservationStatus::Completed ; "completed lowercase")]
    #[test_case("Completed", ReservationStatus::Completed ; "completed capitalized")]
    #[test_case("failed", ReservationStatus::Other)]
    #[test_case("cancelled", ReservationStatus::Other)]
    #[test_case("", ReservationStatus::Other)]
    fn status_parsing(raw: &str, expected: ReservationStatus) {
        assert_eq!(ReservationStatus::parse(raw), expected);
    }
}
