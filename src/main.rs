//! Deviation Relay - Lambda entry point
//!
//! Serves Kinesis-triggered invocations by default, or replays a local file
//! of records with `--replay`.

use anyhow::{anyhow, bail, Result};
use aws_lambda_events::event::kinesis::KinesisEvent;
use clap::Parser;
use deviation_relay::{
    cli::Cli,
    config::Config,
    core::Publisher,
    handler::handle_kinesis_event,
    internal_metrics::LoggingRecorder,
    notification::{LoggingPublisher, SnsPublisher},
    relay::Relay,
    replay, telemetry,
};
use lambda_runtime::{service_fn, LambdaEvent};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli).unwrap_or_else(|err| {
        telemetry::init("info");
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    telemetry::init(&config.log_level);

    let recorder = LoggingRecorder::new();
    metrics::set_global_recorder(recorder.clone())
        .map_err(|e| anyhow!("failed to install metrics recorder: {}", e))?;

    info!("-------------------- Configuration --------------------");
    info!("Topic Base: {}", config.topic_base);
    info!("Subject Base: {}", config.subject_base);
    info!("Region: {}", config.region);
    info!("Failure Policy: {}", config.failure_policy);
    info!("Time Zone: {}", config.time_zone);
    info!("Dry Run: {}", cli.dry_run);
    info!("-------------------------------------------------------");

    let publisher: Arc<dyn Publisher> = if cli.dry_run {
        Arc::new(LoggingPublisher)
    } else {
        Arc::new(SnsPublisher::from_region(&config.region).await)
    };
    let relay = Arc::new(Relay::new(&config, publisher));

    if let Some(path) = &cli.replay {
        let records = replay::read_records(path).await?;
        let outcome = relay.process_batch(records).await;
        recorder.log_counters();
        println!("{}", outcome);
        for failure in &outcome.failures {
            println!("  record {}: {}", failure.index + 1, failure.error);
        }
        if !outcome.is_complete() {
            bail!("replay did not publish every record");
        }
        return Ok(());
    }

    lambda_runtime::run(service_fn(move |event: LambdaEvent<KinesisEvent>| {
        let relay = Arc::clone(&relay);
        let recorder = recorder.clone();
        async move {
            let result = handle_kinesis_event(&relay, event).await;
            recorder.log_counters();
            result
        }
    }))
    .await
    .map_err(|e| anyhow!(e))
}
