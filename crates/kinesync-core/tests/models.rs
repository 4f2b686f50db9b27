use kinesync_core::models::description::{DescribeDeliveryStreamOutput, ListTagsOutput};
use kinesync_core::models::destination::S3DestinationConfiguration;
use kinesync_core::{
    CoreError, DestinationConfiguration, EncryptionStatus, KeyType, Resource, ResourceSpec,
    StreamStatus, Tag,
};

const DESCRIBE: &str = r#"{
  "DeliveryStreamDescription": {
    "DeliveryStreamName": "orders",
    "DeliveryStreamARN": "arn:aws:firehose:us-east-1:123456789012:deliverystream/orders",
    "DeliveryStreamStatus": "ACTIVE",
    "DeliveryStreamEncryptionConfiguration": {
      "KeyType": "AWS_OWNED_CMK",
      "Status": "ENABLED"
    },
    "DeliveryStreamType": "DirectPut",
    "VersionId": "3",
    "CreateTimestamp": "2024-05-01T12:00:00Z",
    "Destinations": [
      {
        "DestinationId": "destinationId-000000000001",
        "HttpEndpointDestinationDescription": {
          "EndpointConfiguration": { "Name": "collector", "Url": "https://collector.example.com" },
          "BufferingHints": { "IntervalInSeconds": 60, "SizeInMBs": 1 },
          "RetryOptions": { "DurationInSeconds": 300 },
          "S3BackupMode": "FailedDataOnly",
          "S3DestinationDescription": {
            "BucketARN": "arn:aws:s3:::orders-backup",
            "CompressionFormat": "UNCOMPRESSED",
            "EncryptionConfiguration": { "NoEncryptionConfig": "NoEncryption" }
          }
        }
      }
    ],
    "HasMoreDestinations": false
  }
}"#;

#[test]
fn parses_describe_output() {
    let output = DescribeDeliveryStreamOutput::from_json(DESCRIBE.as_bytes()).unwrap();
    let description = output.delivery_stream_description;

    assert_eq!(description.delivery_stream_name.as_deref(), Some("orders"));
    assert_eq!(description.delivery_stream_status, Some(StreamStatus::Active));
    assert_eq!(description.version_id.as_deref(), Some("3"));
    assert!(description.create_timestamp.is_some());
    assert!(description.last_update_timestamp.is_none());

    let encryption = description.delivery_stream_encryption_configuration.unwrap();
    assert_eq!(encryption.key_type, Some(KeyType::AwsOwnedCmk));
    assert_eq!(encryption.status, Some(EncryptionStatus::Enabled));

    assert_eq!(description.destinations.len(), 1);
    let destination = &description.destinations[0];
    let http = destination
        .http_endpoint_destination_description
        .as_ref()
        .unwrap();
    assert_eq!(
        http.endpoint_configuration.as_ref().unwrap().url.as_deref(),
        Some("https://collector.example.com")
    );
    assert_eq!(http.buffering_hints.as_ref().unwrap().size_in_mbs, Some(1));
    assert!(destination.s3_destination_description.is_none());
}

#[test]
fn describe_tolerates_missing_levels() {
    let output =
        DescribeDeliveryStreamOutput::from_json(br#"{"DeliveryStreamDescription": {}}"#).unwrap();
    let description = output.delivery_stream_description;

    assert!(description.delivery_stream_name.is_none());
    assert!(description.destinations.is_empty());
    assert!(!description.has_more_destinations);
}

#[test]
fn parses_list_tags_output() {
    let output = ListTagsOutput::from_json(
        br#"{"Tags": [{"Key": "team", "Value": "data"}, {"Key": "flag"}], "HasMoreTags": false}"#,
    )
    .unwrap();

    assert_eq!(output.tags, vec![Tag::new("team", "data"), Tag::new("flag", "")]);
}

#[test]
fn parses_desired_spec_with_destination() {
    let spec = ResourceSpec::from_json(
        br#"{
          "DeliveryStreamName": "orders",
          "EncryptionConfiguration": { "KeyType": "CUSTOMER_MANAGED_CMK", "KeyARN": "arn:aws:kms:us-east-1:123456789012:key/abc" },
          "DestinationConfiguration": {
            "HttpEndpointDestinationConfiguration": {
              "EndpointConfiguration": { "URL": "https://collector.example.com", "AccessKey": "secret" }
            }
          },
          "Tags": [{ "Key": "team", "Value": "data" }]
        }"#,
    )
    .unwrap();

    let encryption = spec.encryption_configuration.as_ref().unwrap();
    assert_eq!(encryption.key_type, Some(KeyType::CustomerManagedCmk));
    assert_eq!(
        encryption.key_arn.as_deref(),
        Some("arn:aws:kms:us-east-1:123456789012:key/abc")
    );

    match spec.destination_configuration.as_ref().unwrap() {
        DestinationConfiguration::HttpEndpoint(http) => {
            let endpoint = http.endpoint_configuration.as_ref().unwrap();
            assert_eq!(endpoint.access_key.as_deref(), Some("secret"));
        }
        other => panic!("expected http endpoint destination, got {}", other.kind()),
    }
    assert_eq!(spec.tags.len(), 1);
}

#[test]
fn validate_rejects_duplicate_tag_keys() {
    let spec = ResourceSpec {
        delivery_stream_name: "orders".into(),
        destination_configuration: Some(DestinationConfiguration::S3(
            S3DestinationConfiguration::default(),
        )),
        tags: vec![Tag::new("team", "a"), Tag::new("team", "b")],
        ..Default::default()
    };

    match spec.validate() {
        Err(CoreError::DuplicateTagKey(key)) => assert_eq!(key, "team"),
        other => panic!("expected duplicate tag key error, got {other:?}"),
    }
}

#[test]
fn validate_rejects_missing_name() {
    let err = ResourceSpec::from_json(br#"{"Tags": []}"#).unwrap_err();
    assert!(matches!(err, CoreError::MissingField(ref field) if field == "DeliveryStreamName"));
}

#[test]
fn validate_rejects_missing_destination() {
    let err = ResourceSpec::from_json(br#"{"DeliveryStreamName": "orders"}"#).unwrap_err();
    assert!(
        matches!(err, CoreError::MissingField(ref field) if field == "DestinationConfiguration")
    );
}

#[test]
fn parses_epoch_second_timestamps() {
    let output = DescribeDeliveryStreamOutput::from_json(
        br#"{"DeliveryStreamDescription": {
          "CreateTimestamp": 1714564800.5,
          "LastUpdateTimestamp": 1714564800
        }}"#,
    )
    .unwrap();
    let description = output.delivery_stream_description;

    let created = description.create_timestamp.unwrap();
    assert_eq!(created.as_second(), 1714564800);
    assert_eq!(created.subsec_nanosecond(), 500_000_000);
    assert_eq!(
        description.last_update_timestamp,
        Some("2024-05-01T12:00:00Z".parse().unwrap())
    );
}

#[test]
fn parses_offset_timestamps() {
    let output = DescribeDeliveryStreamOutput::from_json(
        br#"{"DeliveryStreamDescription": {"CreateTimestamp": "2024-05-01T14:00:00+02:00"}}"#,
    )
    .unwrap();

    assert_eq!(
        output.delivery_stream_description.create_timestamp,
        Some("2024-05-01T12:00:00Z".parse().unwrap())
    );
}

#[test]
fn rejects_malformed_timestamp() {
    let err = DescribeDeliveryStreamOutput::from_json(
        br#"{"DeliveryStreamDescription": {"CreateTimestamp": "yesterday"}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::Serialization(_)), "got {err:?}");
}

#[test]
fn reported_empty_lists_are_kept() {
    let output = DescribeDeliveryStreamOutput::from_json(
        br#"{"DeliveryStreamDescription": {"Destinations": [{
          "HttpEndpointDestinationDescription": {
            "ProcessingConfiguration": { "Enabled": false, "Processors": [] },
            "RequestConfiguration": { "ContentEncoding": "NONE" }
          }
        }]}}"#,
    )
    .unwrap();
    let http = output.delivery_stream_description.destinations[0]
        .http_endpoint_destination_description
        .clone()
        .unwrap();

    assert_eq!(http.processing_configuration.unwrap().processors, Some(vec![]));
    assert_eq!(http.request_configuration.unwrap().common_attributes, None);
}

#[test]
fn enums_parse_from_wire_names() {
    for status in EncryptionStatus::ALL {
        assert_eq!(status.as_str().parse::<EncryptionStatus>().unwrap(), status);
    }
    assert_eq!("DELETING_FAILED".parse::<StreamStatus>().unwrap(), StreamStatus::DeletingFailed);

    match "SOMETHING_NEW".parse::<KeyType>() {
        Err(CoreError::UnknownValue { kind, value }) => {
            assert_eq!(kind, "KeyType");
            assert_eq!(value, "SOMETHING_NEW");
        }
        other => panic!("expected unknown value error, got {other:?}"),
    }
}

#[test]
fn key_type_uses_wire_names() {
    assert_eq!(
        serde_json::to_string(&KeyType::CustomerManagedCmk).unwrap(),
        "\"CUSTOMER_MANAGED_CMK\""
    );
    let parsed: KeyType = serde_json::from_str("\"AWS_OWNED_CMK\"").unwrap();
    assert_eq!(parsed, KeyType::AwsOwnedCmk);
    assert_eq!(parsed.to_string(), "AWS_OWNED_CMK");
}

#[test]
fn encryption_transitional_states() {
    assert!(EncryptionStatus::Enabling.is_transitional());
    assert!(EncryptionStatus::Disabling.is_transitional());
    assert!(!EncryptionStatus::Enabled.is_transitional());
    assert!(!EncryptionStatus::DisablingFailed.is_transitional());
}

#[test]
fn resource_status_defaults_when_absent() {
    let resource: Resource =
        serde_json::from_str(r#"{"Spec": {"DeliveryStreamName": "orders"}}"#).unwrap();

    assert_eq!(resource.name(), "orders");
    assert!(resource.status.delivery_stream_status.is_none());
    assert!(resource.status.version_id.is_none());
}
