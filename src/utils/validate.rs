use crate::error::{AppError, AppResult};
use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that runs `validator` rules before the handler.
///
/// Malformed bodies become `BadRequest`, rule violations become
/// `ValidationErrors`; either way the handler body never runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, message = "Name must not be empty"))]
        name: String,
    }

    fn request(body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ValidatedJson(body) =
            ValidatedJson::<TestBody>::from_request(request(r#"{"name":"Alice"}"#), &())
                .await
                .unwrap();
        assert_eq!(body.name, "Alice");
    }

    #[tokio::test]
    async fn test_empty_name_is_validation_error() {
        let error = ValidatedJson::<TestBody>::from_request(request(r#"{"name":""}"#), &())
            .await
            .unwrap_err();

        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[0].message, "Name must not be empty");
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let error = ValidatedJson::<TestBody>::from_request(request("{}"), &())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let error = ValidatedJson::<TestBody>::from_request(request("{not json"), &())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"name":"Alice"}"#))
            .unwrap();

        let error = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::BadRequest { .. }));
    }
}
