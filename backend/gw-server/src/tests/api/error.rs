use crate::ApiError;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http_body_util::BodyExt;

#[tokio::test]
async fn given_bad_request_when_into_response_then_400_with_code() {
    let error = ApiError::BadRequest {
        message: String::from("missing field `sessionKey`"),
        location: ErrorLocation::from(std::panic::Location::caller()),
    };

    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert_eq!(json["error"]["message"], "missing field `sessionKey`");
}
