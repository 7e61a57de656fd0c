//! Integration tests for the Kinesis Lambda handler.

mod helpers;

use aws_lambda_events::event::kinesis::KinesisEvent;
use deviation_relay::handler::handle_kinesis_event;
use deviation_relay::relay::{FailurePolicy, Relay};
use helpers::{mock_publisher::MockPublisher, test_config, TOPIC_BASE};
use lambda_runtime::{Context, LambdaEvent};
use serde_json::json;
use std::sync::Arc;
use tracing_test::traced_test;

// base64 of: noise-prefix{"id":42,"deviation":3.5,"value":97.2,"timestamp":1690000000000}
const SENSOR_42: &str =
    "bm9pc2UtcHJlZml4eyJpZCI6NDIsImRldmlhdGlvbiI6My41LCJ2YWx1ZSI6OTcuMiwidGltZXN0YW1wIjoxNjkwMDAwMDAwMDAwfQ==";
// base64 of: garbage
const GARBAGE: &str = "Z2FyYmFnZQ==";

fn kinesis_record(sequence: u32, data: &str) -> serde_json::Value {
    json!({
        "kinesis": {
            "kinesisSchemaVersion": "1.0",
            "partitionKey": "1",
            "sequenceNumber": format!("4959033349837127008776931451537093730210000000000000000{}", sequence),
            "data": data,
            "approximateArrivalTimestamp": 1545084650.987,
            "encryptionType": "NONE"
        },
        "eventSource": "aws:kinesis",
        "eventVersion": "1.0",
        "eventID": format!("shardId-000000000006:{}", sequence),
        "eventName": "aws:kinesis:record",
        "invokeIdentityArn": "arn:aws:iam::123456789012:role/lambda-role",
        "awsRegion": "us-east-2",
        "eventSourceARN": "arn:aws:kinesis:us-east-2:123456789012:stream/deviations"
    })
}

fn kinesis_event(data: &[&str]) -> LambdaEvent<KinesisEvent> {
    let records: Vec<_> = data
        .iter()
        .enumerate()
        .map(|(i, d)| kinesis_record(i as u32, d))
        .collect();
    let payload: KinesisEvent = serde_json::from_value(json!({ "Records": records })).unwrap();
    LambdaEvent::new(payload, Context::default())
}

#[tokio::test]
async fn test_handler_publishes_decoded_records() {
    let publisher = MockPublisher::new();
    let relay = Relay::new(&test_config(FailurePolicy::Isolate), Arc::new(publisher.clone()));

    handle_kinesis_event(&relay, kinesis_event(&[SENSOR_42]))
        .await
        .unwrap();

    let sent = publisher.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].destination, format!("{}42", TOPIC_BASE));
    assert_eq!(
        sent[0].message,
        "sensor 42 has value 97.200000 with deviation 3.500000 at 2023-07-22T04:26:40"
    );
}

#[tokio::test]
async fn test_handler_completes_normally_when_records_fail() {
    let publisher = MockPublisher::new();
    let relay = Relay::new(&test_config(FailurePolicy::Abort), Arc::new(publisher.clone()));

    let result = handle_kinesis_event(&relay, kinesis_event(&[GARBAGE, SENSOR_42])).await;

    assert!(result.is_ok());
    assert!(publisher.sent().is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_handler_logs_configuration_for_each_invocation() {
    let mut config = test_config(FailurePolicy::Isolate);
    config.region = "eu-central-1".to_string();
    let relay = Relay::new(&config, Arc::new(MockPublisher::new()));

    handle_kinesis_event(&relay, kinesis_event(&[SENSOR_42]))
        .await
        .unwrap();

    assert!(logs_contain(&format!("topic base is {}", TOPIC_BASE)));
    assert!(logs_contain("subject base is Deviation on sensor "));
    assert!(logs_contain("region is eu-central-1"));
}
