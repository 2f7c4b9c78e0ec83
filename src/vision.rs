use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::operation::compare_faces::CompareFacesOutput;
use aws_sdk_rekognition::operation::detect_faces::DetectFacesOutput;
use aws_sdk_rekognition::types::{Attribute, Image, S3Object};
use aws_sdk_rekognition::Client as RekognitionClient;
use lambda_runtime::tracing;

use crate::config::ObjectRef;
use crate::error::FaceApiError;

/// Matches below this similarity are dropped by the service; zero keeps all of them.
pub const SIMILARITY_THRESHOLD: f32 = 0.0;

fn s3_image(object: &ObjectRef) -> Image {
    Image::builder()
        .s3_object(
            S3Object::builder()
                .bucket(&object.bucket)
                .name(&object.key)
                .build(),
        )
        .build()
}

/// Runs face detection with the full attribute set on a stored object.
pub async fn detect_faces(
    client: &RekognitionClient,
    object: &ObjectRef,
) -> Result<DetectFacesOutput, FaceApiError> {
    tracing::info!("Detecting faces in {}/{}", object.bucket, object.key);
    let output = client
        .detect_faces()
        .image(s3_image(object))
        .attributes(Attribute::All)
        .send()
        .await
        .map_err(|e| FaceApiError::Vision(DisplayErrorContext(&e).to_string()))?;
    tracing::info!("Detected {} faces", output.face_details().len());
    Ok(output)
}

/// Compares the largest face in `source` against every face in `target`.
pub async fn compare_faces(
    client: &RekognitionClient,
    source: &ObjectRef,
    target: &ObjectRef,
) -> Result<CompareFacesOutput, FaceApiError> {
    tracing::info!(
        "Comparing {}/{} against {}/{}",
        source.bucket,
        source.key,
        target.bucket,
        target.key
    );
    let output = client
        .compare_faces()
        .source_image(s3_image(source))
        .target_image(s3_image(target))
        .similarity_threshold(SIMILARITY_THRESHOLD)
        .send()
        .await
        .map_err(|e| FaceApiError::Vision(DisplayErrorContext(&e).to_string()))?;
    tracing::info!(
        "{} matched, {} unmatched faces",
        output.face_matches().len(),
        output.unmatched_faces().len()
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_rekognition::operation::detect_faces::DetectFacesError;
    use aws_sdk_rekognition::types::error::InvalidS3ObjectException;
    use aws_smithy_mocks::{mock, mock_client};

    fn object(key: &str) -> ObjectRef {
        ObjectRef {
            bucket: "test-bucket".to_string(),
            key: key.to_string(),
        }
    }

    #[tokio::test]
    async fn test_detect_requests_all_attributes() {
        let detect_rule = mock!(aws_sdk_rekognition::Client::detect_faces)
            .match_requests(|req| {
                req.attributes() == [Attribute::All]
                    && req
                        .image()
                        .and_then(|image| image.s3_object())
                        .is_some_and(|o| {
                            o.bucket() == Some("test-bucket") && o.name() == Some("face.png")
                        })
            })
            .then_output(|| DetectFacesOutput::builder().build());
        let client = mock_client!(aws_sdk_rekognition, [&detect_rule]);

        let output = detect_faces(&client, &object("face.png")).await.unwrap();

        assert!(output.face_details().is_empty());
        assert_eq!(detect_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_compare_uses_zero_threshold() {
        let compare_rule = mock!(aws_sdk_rekognition::Client::compare_faces)
            .match_requests(|req| req.similarity_threshold() == Some(0.0))
            .then_output(|| CompareFacesOutput::builder().build());
        let client = mock_client!(aws_sdk_rekognition, [&compare_rule]);

        compare_faces(&client, &object("a.jpg"), &object("b.jpg"))
            .await
            .unwrap();

        assert_eq!(compare_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_detect_fault_is_vision_error() {
        let detect_rule = mock!(aws_sdk_rekognition::Client::detect_faces).then_error(|| {
            DetectFacesError::InvalidS3ObjectException(
                InvalidS3ObjectException::builder()
                    .message("Unable to get object metadata from S3")
                    .build(),
            )
        });
        let client = mock_client!(aws_sdk_rekognition, [&detect_rule]);

        let err = detect_faces(&client, &object("missing.png")).await.unwrap_err();

        assert!(matches!(err, FaceApiError::Vision(_)));
        assert!(err.to_string().contains("Unable to get object metadata"));
    }
}
