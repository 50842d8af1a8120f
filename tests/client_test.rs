use std::time::Duration;

use sdg_classify::{ClassifierError, HttpConfig, SdgClient, SdgPrediction, SdgPredictor};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer) -> SdgClient {
    SdgClient::builder()
        .with_custom_endpoint(&format!("{}/classify", server.uri()))
        .unwrap()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_predict_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/classify"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"text": "Clean water for every village"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [
                {"sdg": {"code": 6, "name": "Clean water and sanitation"}, "prediction": 0.87},
                {"sdg": {"code": "3", "name": "Good health and well-being"}, "prediction": 0.31}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let predictions = client.predict("Clean water for every village").await.unwrap();

    assert_eq!(
        predictions,
        vec![
            SdgPrediction::new(6, "Clean water and sanitation", 0.87),
            SdgPrediction::new(3, "Good health and well-being", 0.31),
        ]
    );
}

#[tokio::test]
async fn test_predict_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).predict("some text").await;
    match result {
        Err(ClassifierError::StatusError(status)) => assert_eq!(status, 500),
        other => panic!("Expected StatusError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_predict_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"labels": []})))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).predict("some text").await;
    assert!(matches!(result, Err(ClassifierError::ResponseError(_))));
}

#[tokio::test]
async fn test_predict_blank_text_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).predict("  \n ").await;
    assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
}

#[tokio::test]
async fn test_predict_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let client = SdgClient::builder()
        .with_http_config(HttpConfig {
            timeout: Some(Duration::from_millis(100)),
            ..HttpConfig::default()
        })
        .with_custom_endpoint(&mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    match client.predict("slow").await {
        Err(ClassifierError::RequestError(err)) => assert!(err.is_timeout()),
        other => panic!("Expected timeout-related error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_model_id_is_endpoint() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);
    assert_eq!(client.model_id(), format!("{}/classify", mock_server.uri()));
}
