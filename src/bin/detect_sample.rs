use aws_config::BehaviorVersion;
use aws_sdk_rekognition::Client as RekognitionClient;
use face_lambda::config::Config;
use face_lambda::event_handler::function_handler;
use lambda_runtime::{run, service_fn, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    face_lambda::init_tracing();
    let config = Config::from_env()?;
    let shared_config = aws_config::load_defaults(BehaviorVersion::v2025_01_17()).await;
    let rekognition_client = RekognitionClient::new(&shared_config);
    let sample = config.sample;
    run(service_fn(|event| {
        function_handler(event, &rekognition_client, &sample)
    }))
    .await
}
