// Reservation orchestrator: submit the booking, then poll the reservation
// job (keyed by the owning search) until it leaves the pending status.

use tracing::{info, warn};

use crate::client::TransferApi;
use crate::models::{BookingRequest, ReservationOutcome, ReservationStatus};
use crate::poll::{poll_until_terminal, PollConfig, PollOutcome, PollState};
use crate::workflow::WorkflowError;

/// Books the chosen offer and waits for the reservation to settle.
///
/// Returns `None` when the job ends in a failed or unrecognized status; a
/// booking that does not complete is a valid terminal workflow outcome, not
/// an error.
pub async fn book_and_await_outcome<A>(
    api: &A,
    search_id: &str,
    request: &BookingRequest,
    poll_config: PollConfig,
) -> Result<Option<ReservationOutcome>, WorkflowError>
where
    A: TransferApi + ?Sized,
{
    // The ack body carries nothing the workflow needs; the outcome comes
    // from polling alone.
    api.book(request).await?;
    info!(%search_id, "booking submitted, polling reservation status");

    let outcome = poll_until_terminal(
        || api.poll_reservation(search_id),
        |update| match ReservationStatus::parse(&update.status) {
            ReservationStatus::Pending => PollState::Continuing(()),
            ReservationStatus::Completed => PollState::Terminal(update.reservations),
            ReservationStatus::Other => {
                warn!(status = %update.status, "reservation ended without completing");
                PollState::Indeterminate
            }
        },
        poll_config,
    )
    .await?;

    match outcome {
        PollOutcome::Completed { last, attempts, .. } => {
            let first = last
                .into_iter()
                .next()
                .ok_or(WorkflowError::EmptyReservationList)?;
            info!(
                confirmation = %first.confirmation_number,
                reservation = %first.id,
                attempts,
                "reservation completed"
            );
            Ok(Some(ReservationOutcome {
                confirmation_number: first.confirmation_number,
                reservation_id: first.id,
                attempts,
            }))
        }
        PollOutcome::Indeterminate { attempts, .. } => {
            info!(attempts, "reservation did not complete");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{reservation, status, ScriptedApi};
    use std::sync::atomic::Ordering;
    use std::time::Duration;
    use test_case::test_case;

    fn quick() -> PollConfig {
        PollConfig {
            max_attempts: 20,
            delay: Duration::ZERO,
        }
    }

    fn example_booking() -> BookingRequest {
        BookingRequest {
            first_name: "Dana".to_string(),
            last_name: "Whitfield".to_string(),
            email: "dana.whitfield@example.com".to_string(),
            country_code_name: "US".to_string(),
            phone_number: "(855) 980 5669".to_string(),
            airline_iata_code: "UA".to_string(),
            flight_number: "1201".to_string(),
            result_id: "r-1".to_string(),
            search_id: "s-1".to_string(),
        }
    }

    #[tokio::test]
    async fn completed_after_pending_polls_yields_first_reservation() {
        let api = ScriptedApi::new("s-1").with_reservation_polls(vec![
            status("pending", vec![]),
            status("pending", vec![]),
            status(
                "completed",
                vec![
                    reservation("res-1", "CONF-1"),
                    reservation("res-2", "CONF-2"),
                ],
            ),
        ]);

        let outcome = book_and_await_outcome(&api, "s-1", &example_booking(), quick())
            .await
            .unwrap()
            .expect("reservation should complete");

        assert_eq!(outcome.reservation_id, "res-1");
        assert_eq!(outcome.confirmation_number, "CONF-1");
        assert_eq!(outcome.attempts, 3);
        assert_eq!(api.book_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.poll_reservation_calls.load(Ordering::SeqCst), 3);
    }

    #[test_case("failed")]
    #[test_case("cancelled")]
    #[test_case("SOMETHING_NEW")]
    #[tokio::test]
    async fn non_pending_non_completed_status_is_a_quiet_none(raw: &str) {
        let api = ScriptedApi::new("s-1").with_reservation_polls(vec![status(raw, vec![])]);

        let outcome = book_and_await_outcome(&api, "s-1", &example_booking(), quick())
            .await
            .unwrap();

        assert!(outcome.is_none());
        // First poll already settled it; no budget consumed beyond that.
        assert_eq!(api.poll_reservation_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn completed_with_no_reservations_is_a_contract_violation() {
        let api =
            ScriptedApi::new("s-1").with_reservation_polls(vec![status("completed", vec![])]);

        let result = book_and_await_outcome(&api, "s-1", &example_booking(), quick()).await;

        assert!(matches!(result, Err(WorkflowError::EmptyReservationList)));
    }

    #[tokio::test]
    async fn forever_pending_exhausts_the_budget() {
        let updates = (0..20).map(|_| status("pending", vec![])).collect();
        let api = ScriptedApi::new("s-1").with_reservation_polls(updates);

        let result = book_and_await_outcome(&api, "s-1", &example_booking(), quick()).await;

        assert!(matches!(
            result,
            Err(WorkflowError::PollBudgetExceeded { attempts: 20 })
        ));
    }
}
