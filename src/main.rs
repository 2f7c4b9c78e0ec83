use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_sdk_rekognition::Client as RekognitionClient;
use aws_sdk_s3::Client as S3Client;
use face_lambda::config::Config;
use face_lambda::http_handler::{router, AppState};
use lambda_runtime::{tracing, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    face_lambda::init_tracing();
    let config = Config::from_env()?;
    let shared_config = aws_config::load_defaults(BehaviorVersion::v2025_01_17()).await;
    let app = router(AppState {
        s3_client: S3Client::new(&shared_config),
        rekognition_client: RekognitionClient::new(&shared_config),
        bucket: Arc::from(config.bucket.as_str()),
    });

    if std::env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        tracing::info!("Serving uploads into {} through Lambda", config.bucket);
        return lambda_http::run(app).await;
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {} (bucket {})", config.bind_addr, config.bucket);
    axum::serve(listener, app).await?;
    Ok(())
}
