#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use monochrome_db::{MetadataBackend, MetadataError, MetadataRecord, MetadataResult, MetadataStore};
use monochrome_handler::{HandlerConfig, ImageTransformHandler};
use monochrome_processing::TransformOptions;
use monochrome_storage::{ObjectStorage, StorageBackend, StorageError, StorageResult, StoredObject};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const SOURCE_BUCKET: &str = "uploads";
pub const OUTPUT_BUCKET: &str = "processed";

/// Encode a color gradient of the given size
pub fn create_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// A stored upload as seen by the fake
#[derive(Debug, Clone)]
pub struct PutCall {
    pub bucket: String,
    pub key: String,
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

/// In-memory object storage that records calls and fails on demand
#[derive(Default)]
pub struct FakeStorage {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    puts: Mutex<Vec<PutCall>>,
    list_calls: Mutex<Vec<String>>,
    fail_put: AtomicBool,
    fail_list: AtomicBool,
}

impl FakeStorage {
    pub fn insert(&self, bucket: &str, key: &str, data: Vec<u8>, content_type: Option<&str>) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data: Bytes::from(data),
                content_type: content_type.map(str::to_string),
            },
        );
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn puts(&self) -> Vec<PutCall> {
        self.puts.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn fail_puts(&self) {
        self.fail_put.store(true, Ordering::SeqCst);
    }

    pub fn fail_lists(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn list_keys(&self, bucket: &str) -> StorageResult<Vec<String>> {
        self.list_calls.lock().unwrap().push(bucket.to_string());
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(StorageError::ListFailed("access denied".to_string()));
        }

        let mut keys: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        self.object(bucket, key).ok_or_else(|| StorageError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("service unavailable".to_string()));
        }

        self.puts.lock().unwrap().push(PutCall {
            bucket: bucket.to_string(),
            key: key.to_string(),
            data: data.clone(),
            content_type: content_type.map(str::to_string),
        });
        self.insert(bucket, key, data, content_type);
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// In-memory metadata table with upsert semantics
#[derive(Default)]
pub struct FakeMetadataStore {
    records: Mutex<HashMap<String, MetadataRecord>>,
    write_calls: Mutex<usize>,
    fail_writes: AtomicBool,
}

impl FakeMetadataStore {
    pub fn record(&self, key: &str) -> Option<MetadataRecord> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn write_calls(&self) -> usize {
        *self.write_calls.lock().unwrap()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MetadataStore for FakeMetadataStore {
    async fn put_record(&self, record: &MetadataRecord) -> MetadataResult<()> {
        *self.write_calls.lock().unwrap() += 1;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(MetadataError::WriteFailed("throughput exceeded".to_string()));
        }

        self.records
            .lock()
            .unwrap()
            .insert(record.image_id.clone(), record.clone());
        Ok(())
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Local
    }
}

pub fn handler_config() -> HandlerConfig {
    HandlerConfig {
        output_bucket: OUTPUT_BUCKET.to_string(),
        transform: TransformOptions::default(),
        list_source_objects: false,
    }
}

/// Test harness wiring the fakes into a handler
pub struct TestHandler {
    pub handler: ImageTransformHandler,
    pub storage: Arc<FakeStorage>,
    pub metadata: Arc<FakeMetadataStore>,
}

pub fn setup_handler(config: HandlerConfig) -> TestHandler {
    let storage = Arc::new(FakeStorage::default());
    let metadata = Arc::new(FakeMetadataStore::default());
    let handler = ImageTransformHandler::new(storage.clone(), metadata.clone(), config);

    TestHandler {
        handler,
        storage,
        metadata,
    }
}
