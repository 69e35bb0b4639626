// Workflow client for a ground-transportation marketplace API: search for
// transfers, book the cheapest offer, and optionally cancel the reservation.
// Search and booking are asynchronous jobs on the server side; both are
// driven to a terminal state by the bounded poll engine in `poll`.

pub mod booking;
pub mod client;
pub mod config;
pub mod identity;
pub mod models;
pub mod poll;
pub mod search;
pub mod workflow;

// Re-export key types for convenience
pub use client::{ApiError, HttpTransferClient, TransferApi};
pub use config::{Config, ConfigError};
pub use models::{
    BookingRequest, Reservation, ReservationOutcome, ReservationStatus, SearchRequest,
    VehicleOffer,
};
pub use poll::{poll_until_terminal, PollConfig, PollError, PollOutcome, PollState};
pub use search::{cheapest_offer, search_and_gather, GatheredSearch};
pub use workflow::{FlightDetails, Workflow, WorkflowError, WorkflowReport};
