//! S3-backed face detection and comparison on top of Amazon Rekognition.
//!
//! Images arrive as multipart uploads, are written to a bucket under a random
//! key, and Rekognition is pointed at the stored object. The same detection
//! path is also exposed as a plain Lambda function for standalone invocation.

pub mod config;
pub mod error;
pub mod event_handler;
pub mod http_handler;
pub mod report;
pub mod storage;
pub mod vision;

use lambda_runtime::tracing;
use tracing_subscriber::EnvFilter;

/// JSON log lines, filtered by `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .init();
}
