use std::net::SocketAddr;

use crate::error::FaceApiError;

pub const DEFAULT_BUCKET: &str = "nhchoi-posting";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_SAMPLE_KEY: &str = "증명사진.png";

/// Runtime settings for both entry points, read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bucket that receives every uploaded image.
    pub bucket: String,
    pub bind_addr: SocketAddr,
    /// Object analysed by the standalone detection function.
    pub sample: ObjectRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, FaceApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FaceApiError> {
        let bucket = lookup("FACE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string());
        let raw_addr = lookup("FACE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|e| FaceApiError::Config(format!("FACE_BIND_ADDR {raw_addr:?}: {e}")))?;
        let sample = ObjectRef {
            bucket: lookup("FACE_SAMPLE_BUCKET").unwrap_or_else(|| bucket.clone()),
            key: lookup("FACE_SAMPLE_KEY").unwrap_or_else(|| DEFAULT_SAMPLE_KEY.to_string()),
        };
        Ok(Self {
            bucket,
            bind_addr,
            sample,
        })
    }
}
