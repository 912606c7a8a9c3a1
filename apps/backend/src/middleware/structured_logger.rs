use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::TraceId;
use crate::logging::pii::mask_ip;

/// Emits one `request_completed` line per request.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

struct RequestLine {
    method: String,
    path: String,
    client: String,
    trace_id: String,
    started: Instant,
}

impl RequestLine {
    fn emit(&self, status: StatusCode) {
        let duration_us = self.started.elapsed().as_micros() as u64;
        let code = status.as_u16();
        if status.is_server_error() {
            error!(http.method = %self.method, url.path = %self.path, http.status_code = code, client.ip = %self.client, duration_us, trace_id = %self.trace_id, "request_completed");
        } else if status.is_client_error() {
            warn!(http.method = %self.method, url.path = %self.path, http.status_code = code, client.ip = %self.client, duration_us, trace_id = %self.trace_id, "request_completed");
        } else {
            info!(http.method = %self.method, url.path = %self.path, http.status_code = code, client.ip = %self.client, duration_us, trace_id = %self.trace_id, "request_completed");
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let line = RequestLine {
            method: req.method().to_string(),
            path: req.path().to_string(),
            client: req
                .connection_info()
                .realip_remote_addr()
                .map(mask_ip)
                .unwrap_or_else(|| "-".to_string()),
            trace_id: req
                .extensions()
                .get::<TraceId>()
                .map(|t| t.0.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            started: Instant::now(),
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            line.emit(status);
            result
        })
    }
}
