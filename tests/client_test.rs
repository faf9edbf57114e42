use bmi_service::domain::model::BmiMeasurement;
use bmi_service::{BmiClient, BmiError, ClientConfig};
use httpmock::prelude::*;

fn client_for(server: &MockServer) -> BmiClient {
    BmiClient::new(&ClientConfig::new(server.base_url())).unwrap()
}

#[tokio::test]
async fn test_calculate_posts_measurement() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bmi")
            .json_body(serde_json::json!({"height": 1.75, "weight": 70.0}));
        then.status(200).json_body(serde_json::json!({
            "bmi": 22.86,
            "message": "BMI calculated and saved successfully"
        }));
    });

    let result = client_for(&server)
        .calculate(BmiMeasurement {
            height: 1.75,
            weight: 70.0,
        })
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(result.bmi, 22.86);
    assert_eq!(result.message, "BMI calculated and saved successfully");
}

#[tokio::test]
async fn test_history_parses_rows() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/bmi");
        then.status(200).json_body(serde_json::json!([
            {"id": 2, "height": 1.9, "weight": 95.5, "bmi": 26.45, "created_at": "2024-05-01T09:00:02"},
            {"id": 1, "height": 1.75, "weight": 70.0, "bmi": 22.86, "created_at": "2024-05-01T09:00:01"}
        ]));
    });

    let history = client_for(&server).history().await.unwrap();

    api_mock.assert();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, Some(2));
    assert_eq!(history[1].bmi, 22.86);
    assert_eq!(history[1].created_at, "2024-05-01T09:00:01");
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/bmi");
        then.status(400).json_body(serde_json::json!({
            "error": "height and weight must be positive numbers"
        }));
    });

    let err = client_for(&server)
        .calculate(BmiMeasurement {
            height: 1.75,
            weight: -1.0,
        })
        .await
        .unwrap_err();

    match err {
        BmiError::ClientError { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "height and weight must be positive numbers");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/bmi");
        then.status(502).body("Bad Gateway");
    });

    let err = client_for(&server).history().await.unwrap_err();
    assert!(matches!(
        err,
        BmiError::ClientError { status: 502, ref message } if message == "Bad Gateway"
    ));
}

#[test]
fn test_client_rejects_invalid_base_url() {
    assert!(BmiClient::new(&ClientConfig::new("not a url")).is_err());
}
