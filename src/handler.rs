//! Adapts a Kinesis-triggered Lambda invocation to the relay.

use crate::relay::Relay;
use aws_lambda_events::event::kinesis::KinesisEvent;
use lambda_runtime::{Error, LambdaEvent};
use tracing::{info, instrument, warn};

/// Handles one invocation: every Kinesis record is relayed in delivery order.
///
/// Always completes normally. Failed records are logged and reported in the
/// batch outcome, but never surfaced to the platform, so it does not redeliver.
#[instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn handle_kinesis_event(
    relay: &Relay,
    event: LambdaEvent<KinesisEvent>,
) -> Result<(), Error> {
    info!("topic base is {}", relay.topic_base());
    info!("subject base is {}", relay.subject_base());
    info!("region is {}", relay.region());

    let records: Vec<Vec<u8>> = event
        .payload
        .records
        .into_iter()
        .map(|record| record.kinesis.data.0)
        .collect();
    info!(count = records.len(), "Received Kinesis batch");

    let outcome = relay.process_batch(records).await;
    if outcome.is_complete() {
        info!("{}", outcome);
    } else {
        warn!("{}", outcome);
    }
    Ok(())
}
