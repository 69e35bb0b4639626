// Search orchestrator: issue the search once, poll the job until the server
// stops announcing more results, and pick the cheapest offer.

use tracing::info;

use crate::client::TransferApi;
use crate::models::{SearchRequest, VehicleOffer};
use crate::poll::{poll_until_terminal, PollConfig, PollOutcome, PollState};
use crate::workflow::WorkflowError;

/// Everything a finished search job produced.
#[derive(Debug, Clone)]
pub struct GatheredSearch {
    pub search_id: String,
    /// All offers in arrival order across polls. The server is trusted not
    /// to repeat offers; no deduplication happens here.
    pub offers: Vec<VehicleOffer>,
    pub attempts: u32,
}

pub async fn search_and_gather<A>(
    api: &A,
    request: &SearchRequest,
    poll_config: PollConfig,
) -> Result<GatheredSearch, WorkflowError>
where
    A: TransferApi + ?Sized,
{
    let created = api.search(request).await?;
    let search_id = created.search_id;
    info!(%search_id, "search accepted, polling for offers");

    let outcome = poll_until_terminal(
        || api.poll_search(&search_id),
        |page| {
            if page.more_coming {
                PollState::Continuing(page.results)
            } else {
                PollState::Terminal(page.results)
            }
        },
        poll_config,
    )
    .await?;

    let (pages, last, attempts) = match outcome {
        PollOutcome::Completed {
            partials,
            last,
            attempts,
        } => (partials, last, attempts),
        // The search classifier never produces this arm; treat it as a
        // finished job with no final page.
        PollOutcome::Indeterminate { partials, attempts } => (partials, Vec::new(), attempts),
    };

    let mut offers: Vec<VehicleOffer> = pages.into_iter().flatten().collect();
    offers.extend(last);
    info!(offers = offers.len(), attempts, "search polling finished");

    Ok(GatheredSearch {
        search_id,
        offers,
        attempts,
    })
}

/// Stable minimum on the numeric price: ties keep the first-encountered
/// offer, and total ordering keeps NaN from ever displacing a real price.
pub fn cheapest_offer(offers: &[VehicleOffer]) -> Option<&VehicleOffer> {
    offers
        .iter()
        .min_by(|a, b| a.amount().total_cmp(&b.amount()))
}
