use std::collections::HashMap;
use std::sync::Arc;

use aws_sdk_rekognition::Client as RekognitionClient;
use aws_sdk_s3::Client as S3Client;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lambda_runtime::tracing;

use crate::config::ObjectRef;
use crate::error::FaceApiError;
use crate::report::{ComparisonReport, DetectionReport};
use crate::storage::{self, ImagePayload};
use crate::vision;

pub const NO_IMAGE: &str = "No image file uploaded";
pub const NO_PAIR: &str = "source와 target 이미지를 모두 업로드해야 합니다.";

/// Rekognition refuses S3 images larger than 15 MB.
pub const MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub s3_client: S3Client,
    pub rekognition_client: RekognitionClient,
    pub bucket: Arc<str>,
}

impl AppState {
    fn object(&self, key: String) -> ObjectRef {
        ObjectRef {
            bucket: self.bucket.to_string(),
            key,
        }
    }

    async fn upload(&self, payload: ImagePayload) -> Result<ObjectRef, FaceApiError> {
        let key = storage::upload(&self.s3_client, &self.bucket, payload).await?;
        Ok(self.object(key))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze-face", post(analyze_face))
        .route("/compare-faces", post(compare_faces))
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES * 2))
        .with_state(state)
}

/// Collects the file parts named in `wanted`; the first part wins when a name repeats.
/// A body the parser cannot read is reported with the endpoint's `missing` message.
async fn read_images(
    mut multipart: Multipart,
    wanted: &[&str],
    missing: &'static str,
) -> Result<HashMap<String, ImagePayload>, FaceApiError> {
    let unreadable = |e: MultipartError| {
        tracing::warn!("Unreadable multipart body: {}", e);
        FaceApiError::UnreadableUpload {
            message: missing,
            status: e.status(),
        }
    };
    let mut images = HashMap::new();
    while let Some(field) = multipart.next_field().await.map_err(unreadable)? {
        let Some(name) = field.name().filter(|n| wanted.contains(n)).map(str::to_string) else {
            continue;
        };
        if images.contains_key(&name) {
            continue;
        }
        let file_name = field
            .file_name()
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(unreadable)?;
        images.insert(
            name,
            ImagePayload {
                file_name,
                content_type,
                bytes,
            },
        );
    }
    Ok(images)
}

pub(crate) async fn analyze_face(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DetectionReport>, FaceApiError> {
    let multipart = multipart.map_err(|e| {
        tracing::warn!("Rejected analyze request: {}", e);
        FaceApiError::MissingUpload(NO_IMAGE)
    })?;
    let image = read_images(multipart, &["image"], NO_IMAGE)
        .await?
        .remove("image")
        .ok_or(FaceApiError::MissingUpload(NO_IMAGE))?;

    let object = state.upload(image).await?;
    let output = vision::detect_faces(&state.rekognition_client, &object).await?;
    Ok(Json(DetectionReport::from(&output)))
}

pub(crate) async fn compare_faces(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ComparisonReport>, FaceApiError> {
    let multipart = multipart.map_err(|e| {
        tracing::warn!("Rejected compare request: {}", e);
        FaceApiError::MissingUpload(NO_PAIR)
    })?;
    let mut images = read_images(multipart, &["source", "target"], NO_PAIR).await?;
    // An empty file input arrives as a part without a filename.
    let mut take = |name: &str| images.remove(name).filter(|p| p.file_name.is_some());
    let (Some(source), Some(target)) = (take("source"), take("target")) else {
        return Err(FaceApiError::MissingUpload(NO_PAIR));
    };

    let source = state.upload(source).await?;
    let target = state.upload(target).await?;
    let output = vision::compare_faces(&state.rekognition_client, &source, &target).await?;
    Ok(Json(ComparisonReport::from(&output)))
}
