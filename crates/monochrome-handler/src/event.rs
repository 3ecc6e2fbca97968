//! Trigger notification extraction from S3 events

use aws_lambda_events::event::s3::S3Event;

use crate::error::ProcessError;

/// The bucket and still-encoded key of the object that triggered an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerNotification {
    pub bucket: String,
    /// Key as it appears in the notification (form-encoded)
    pub raw_key: String,
}

impl TriggerNotification {
    pub fn new(bucket: impl Into<String>, raw_key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            raw_key: raw_key.into(),
        }
    }

    /// Take the first record of an S3 event.
    ///
    /// Notifications for a single object carry one record; any further
    /// records are logged and ignored.
    pub fn from_s3_event(event: &S3Event) -> Result<Self, ProcessError> {
        let record = event
            .records
            .first()
            .ok_or_else(|| ProcessError::InvalidEvent("No records found in S3 event".to_string()))?;

        if event.records.len() > 1 {
            tracing::warn!(
                record_count = event.records.len(),
                "S3 event contains multiple records; only the first is processed"
            );
        }

        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ProcessError::InvalidEvent("No bucket name found in S3 event".to_string()))?;

        let raw_key = record
            .s3
            .object
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProcessError::InvalidEvent("No object key found in S3 event".to_string()))?;

        Ok(Self::new(bucket, raw_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lambda_events::event::s3::{S3Bucket, S3Entity, S3EventRecord, S3Object};

    fn record(bucket: Option<&str>, key: Option<&str>) -> S3EventRecord {
        S3EventRecord {
            event_name: Some("ObjectCreated:Put".to_string()),
            s3: S3Entity {
                bucket: S3Bucket {
                    name: bucket.map(str::to_string),
                    ..Default::default()
                },
                object: S3Object {
                    key: key.map(str::to_string),
                    size: Some(1234),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_first_record_is_used() {
        let event = S3Event {
            records: vec![
                record(Some("uploads"), Some("my+photo.jpg")),
                record(Some("other"), Some("ignored.png")),
            ],
        };

        let notification = TriggerNotification::from_s3_event(&event).unwrap();
        assert_eq!(notification.bucket, "uploads");
        // Decoding happens in the handler
        assert_eq!(notification.raw_key, "my+photo.jpg");
    }

    #[test]
    fn test_empty_event_is_invalid() {
        let err = TriggerNotification::from_s3_event(&S3Event { records: vec![] }).unwrap_err();
        assert_eq!(err.error_kind(), "invalid_event");
    }

    #[test]
    fn test_missing_bucket_or_key_is_invalid() {
        let no_bucket = S3Event {
            records: vec![record(None, Some("a.jpg"))],
        };
        assert!(matches!(
            TriggerNotification::from_s3_event(&no_bucket),
            Err(ProcessError::InvalidEvent(_))
        ));

        let empty_key = S3Event {
            records: vec![record(Some("uploads"), Some(""))],
        };
        assert!(matches!(
            TriggerNotification::from_s3_event(&empty_key),
            Err(ProcessError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_deserializes_notification_json() {
        let json = r#"{
            "Records": [{
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2024-03-01T12:30:00.000Z",
                "eventName": "ObjectCreated:Put",
                "userIdentity": {"principalId": "EXAMPLE"},
                "requestParameters": {"sourceIPAddress": "127.0.0.1"},
                "responseElements": {},
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "upload-trigger",
                    "bucket": {
                        "name": "uploads",
                        "ownerIdentity": {"principalId": "EXAMPLE"},
                        "arn": "arn:aws:s3:::uploads"
                    },
                    "object": {
                        "key": "holiday%20pics/beach.jpg",
                        "size": 2048,
                        "eTag": "0123456789abcdef",
                        "sequencer": "0A1B2C3D4E5F678901"
                    }
                }
            }]
        }"#;

        let event: S3Event = serde_json::from_str(json).unwrap();
        let notification = TriggerNotification::from_s3_event(&event).unwrap();
        assert_eq!(
            notification,
            TriggerNotification::new("uploads", "holiday%20pics/beach.jpg")
        );
    }
}
