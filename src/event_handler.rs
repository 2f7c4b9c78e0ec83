use aws_sdk_rekognition::Client as RekognitionClient;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;

use crate::config::ObjectRef;
use crate::report::FaceDetail;
use crate::vision;

/// API Gateway style result: `body` is itself a JSON document encoded as a string.
#[derive(Debug, Serialize, PartialEq)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Runs face detection on the configured sample object. The event is ignored;
/// any vision fault becomes a 500 response instead of a failed invocation.
pub async fn function_handler(
    event: LambdaEvent<Value>,
    rekognition_client: &RekognitionClient,
    sample: &ObjectRef,
) -> Result<InvocationResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Standalone detection invoked");
    match vision::detect_faces(rekognition_client, sample).await {
        Ok(output) => {
            let details: Vec<FaceDetail> =
                output.face_details().iter().map(FaceDetail::from).collect();
            Ok(InvocationResponse {
                status_code: 200,
                body: serde_json::to_string(&details)?,
            })
        }
        Err(e) => {
            tracing::error!("Face detection failed: {}", e);
            Ok(InvocationResponse {
                status_code: 500,
                body: serde_json::to_string(&e.to_string())?,
            })
        }
    }
}
