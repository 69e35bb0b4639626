// Workflow driver: search, select the cheapest offer, book, and attempt
// cancellation when (and only when) a reservation id was obtained.

use thiserror::Error;
use tracing::info;

use crate::booking::book_and_await_outcome;
use crate::client::{ApiError, TransferApi};
use crate::config::ConfigError;
use crate::identity::Passenger;
use crate::models::{BookingRequest, ReservationOutcome, SearchRequest, VehicleOffer};
use crate::poll::{PollConfig, PollError};
use crate::search::{cheapest_offer, search_and_gather};

/// Fatal workflow conditions. Each halts the run immediately; only the
/// bounded poll loop retries, at the sub-operation level.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("no terminal state after {attempts} poll attempts")]
    PollBudgetExceeded { attempts: u32 },

    #[error("search returned no offers")]
    NoOffersFound,

    #[error("reservation completed but the reservation list was empty")]
    EmptyReservationList,
}

impl From<PollError<ApiError>> for WorkflowError {
    fn from(err: PollError<ApiError>) -> Self {
        match err {
            PollError::Action(api) => WorkflowError::Api(api),
            PollError::BudgetExceeded { attempts } => WorkflowError::PollBudgetExceeded { attempts },
        }
    }
}

/// Flight metadata attached to the booking.
#[derive(Debug, Clone)]
pub struct FlightDetails {
    pub airline_iata_code: String,
    pub flight_number: String,
}

impl Default for FlightDetails {
    fn default() -> Self {
        Self {
            airline_iata_code: "UA".to_string(),
            flight_number: "1201".to_string(),
        }
    }
}

/// What one workflow run did, phase by phase.
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub search_id: String,
    pub offers_considered: usize,
    pub chosen: VehicleOffer,
    /// `None` when the reservation ended in a failed or unrecognized status.
    pub booking: Option<ReservationOutcome>,
    /// `None` when cancellation was skipped because there was nothing to
    /// cancel.
    pub cancelled: Option<bool>,
}

pub struct Workflow<A> {
    pub api: A,
    pub poll: PollConfig,
}

impl<A: TransferApi> Workflow<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            poll: PollConfig::default(),
        }
    }

    pub async fn run(
        &self,
        search: &SearchRequest,
        passenger: &Passenger,
        flight: &FlightDetails,
    ) -> Result<WorkflowReport, WorkflowError> {
        let gathered = search_and_gather(&self.api, search, self.poll).await?;
        let chosen = cheapest_offer(&gathered.offers)
            .ok_or(WorkflowError::NoOffersFound)?
            .clone();
        info!(
            result_id = %chosen.result_id,
            price = chosen.amount(),
            currency = chosen.currency(),
            pool = gathered.offers.len(),
            "selected cheapest offer"
        );

        let booking_request = BookingRequest {
            first_name: passenger.first_name.clone(),
            last_name: passenger.last_name.clone(),
            email: passenger.email.clone(),
            country_code_name: passenger.country_code_name.clone(),
            phone_number: passenger.phone_number.clone(),
            airline_iata_code: flight.airline_iata_code.clone(),
            flight_number: flight.flight_number.clone(),
            result_id: chosen.result_id.clone(),
            search_id: gathered.search_id.clone(),
        };

        let booking =
            book_and_await_outcome(&self.api, &gathered.search_id, &booking_request, self.poll)
                .await?;

        // Business rule: cancel iff a reservation id exists.
        let cancelled = match &booking {
            Some(outcome) => {
                let acknowledged = self.api.cancel(&outcome.reservation_id).await?;
                info!(
                    reservation = %outcome.reservation_id,
                    acknowledged,
                    "cancellation requested"
                );
                Some(acknowledged)
            }
            None => {
                info!("no reservation to cancel, skipping cancellation");
                None
            }
        };

        Ok(WorkflowReport {
            search_id: gathered.search_id,
            offers_considered: gathered.offers.len(),
            chosen,
            booking,
            cancelled,
        })
    }
}
