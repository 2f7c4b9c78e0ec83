use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use axum::body::Bytes;
use lambda_runtime::tracing;
use uuid::Uuid;

use crate::error::FaceApiError;

/// Filename used when a multipart part carries none.
pub const FALLBACK_FILE_NAME: &str = "upload";

/// An uploaded image as received from the client.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// `None` when the part had no filename or an empty one.
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Random 32-hex token joined to the original filename.
pub fn storage_key(file_name: &str) -> String {
    format!("{}_{}", Uuid::new_v4().simple(), file_name)
}

/// Writes `payload` to `bucket` under a freshly generated key and returns the key.
pub async fn upload(
    s3_client: &S3Client,
    bucket: &str,
    payload: ImagePayload,
) -> Result<String, FaceApiError> {
    let key = storage_key(payload.file_name.as_deref().unwrap_or(FALLBACK_FILE_NAME));
    tracing::info!("Uploading {} bytes to {}/{}", payload.bytes.len(), bucket, key);
    s3_client
        .put_object()
        .bucket(bucket)
        .key(&key)
        .set_content_type(payload.content_type)
        .body(ByteStream::from(payload.bytes))
        .send()
        .await
        .map_err(|e| FaceApiError::Storage(DisplayErrorContext(&e).to_string()))?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::put_object::{PutObjectError, PutObjectOutput};
    use aws_smithy_mocks::{mock, mock_client};

    fn payload(name: &str) -> ImagePayload {
        ImagePayload {
            file_name: Some(name.to_string()),
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from_static(b"\x89PNG"),
        }
    }

    #[test]
    fn test_storage_key_shape() {
        let key = storage_key("face.png");
        let (token, name) = key.split_once('_').unwrap();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(name, "face.png");
    }

    #[test]
    fn test_storage_keys_differ_for_same_name() {
        let keys: std::collections::HashSet<String> =
            (0..100).map(|_| storage_key("same.jpg")).collect();
        assert_eq!(keys.len(), 100);
    }

    #[tokio::test]
    async fn test_upload_writes_under_generated_key() {
        let put_rule = mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|req| {
                req.bucket() == Some("test-bucket")
                    && req.key().is_some_and(|k| k.ends_with("_face.png"))
                    && req.content_type() == Some("image/png")
            })
            .then_output(|| PutObjectOutput::builder().build());
        let s3 = mock_client!(aws_sdk_s3, [&put_rule]);

        let key = upload(&s3, "test-bucket", payload("face.png")).await.unwrap();

        assert!(key.ends_with("_face.png"));
        assert_eq!(put_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_upload_failure_is_storage_error() {
        let put_rule = mock!(aws_sdk_s3::Client::put_object)
            .then_error(|| {
                PutObjectError::generic(
                    ErrorMetadata::builder()
                        .code("AccessDenied")
                        .message("Access Denied")
                        .build(),
                )
            });
        let s3 = mock_client!(aws_sdk_s3, [&put_rule]);

        let err = upload(&s3, "test-bucket", payload("face.png")).await.unwrap_err();

        assert!(matches!(err, FaceApiError::Storage(_)));
    }
}
