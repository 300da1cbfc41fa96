//! Lenient JSON object body: parse failures are deferred to the handler.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
};
use serde_json::{Map, Value};

/// Request body as a JSON object, or `None` when it is empty, unparseable or not an object.
///
/// Handlers decide when to reject, so a missing parent can still be reported as 404
/// before a malformed body is reported as 400.
#[derive(Clone, Debug, Default)]
pub struct JsonBody(pub Option<Map<String, Value>>);

impl JsonBody {
    pub fn into_inner(self) -> Option<Map<String, Value>> {
        self.0
    }

    /// The object, or `Not a JSON`.
    pub fn into_object(self) -> Result<Map<String, Value>, AppError> {
        self.0.ok_or(AppError::NotJson)
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(body_error)?;
        Ok(JsonBody(parse_object(&bytes)))
    }
}

/// An over-limit body is 413; any other unreadable body counts as not JSON.
fn body_error(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        tracing::debug!(error = %rejection.body_text(), "unreadable request body");
        AppError::NotJson
    }
}

fn parse_object(bytes: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) | Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_objects_are_accepted() {
        assert!(parse_object(br#"{"name":"CA"}"#).is_some());
        assert!(parse_object(br#"["CA"]"#).is_none());
        assert!(parse_object(b"null").is_none());
        assert!(parse_object(b"").is_none());
        assert!(parse_object(b"{name: CA}").is_none());
    }

    #[test]
    fn into_object_reports_not_json() {
        let err = JsonBody(None).into_object().unwrap_err();
        assert_eq!(err.to_string(), "Not a JSON");
    }
}
