use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::web::{Bytes, BytesMut};
use actix_web::{FromRequest, HttpRequest};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;

/// Request bodies are small admin payloads.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// JSON body whose parse failures surface as `BAD_REQUEST` problem details.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|_| {
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }
            parse_body(&body.freeze()).map(ValidatedJson)
        })
    }
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    if body.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "Request body is required",
        ));
    }
    serde_json::from_slice::<T>(body).map_err(|e| {
        debug!(error = %Redacted(&e.to_string()), body_size = body.len(), "json body rejected");
        let detail = match e.classify() {
            Category::Syntax => format!("Invalid JSON at line {}", e.line()),
            Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
            Category::Data => "Invalid JSON: missing or mistyped fields".to_string(),
            Category::Io => "Invalid JSON: could not read body".to_string(),
        };
        AppError::bad_request(ErrorCode::BadRequest, detail)
    })
}
