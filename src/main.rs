use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transfer_booking::identity::Passenger;
use transfer_booking::{Config, FlightDetails, HttpTransferClient, SearchRequest, Workflow};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transfer_booking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("loading gateway configuration")?;
    let client = HttpTransferClient::new(config).context("building the gateway client")?;
    let workflow = Workflow::new(client);

    // Example inputs: a one-way airport transfer a month out, booked for a
    // synthetic passenger.
    let pickup = (Utc::now() + chrono::Duration::days(30))
        .format("%Y-%m-%d %H:%M")
        .to_string();
    let search = SearchRequest {
        start_address: "44 Tehama Street, San Francisco, CA, USA".to_string(),
        end_address: "SFO".to_string(),
        mode: "one_way".to_string(),
        pickup_datetime: pickup,
        num_passengers: 2,
        currency: "USD".to_string(),
        campaign: "transfer-booking demo".to_string(),
    };
    let passenger = Passenger::synthetic();

    let report = workflow
        .run(&search, &passenger, &FlightDetails::default())
        .await?;

    tracing::info!(
        search_id = %report.search_id,
        offers = report.offers_considered,
        chosen = %report.chosen.result_id,
        "workflow finished"
    );
    match (&report.booking, report.cancelled) {
        (Some(outcome), cancelled) => tracing::info!(
            confirmation = %outcome.confirmation_number,
            reservation = %outcome.reservation_id,
            cancelled = cancelled.unwrap_or(false),
            "reservation booked, cancellation attempted"
        ),
        (None, _) => tracing::info!("booking did not complete, cancellation skipped"),
    }

    Ok(())
}
