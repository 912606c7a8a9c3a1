use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use pointdraw_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use pointdraw_backend::routes;
use pointdraw_backend::state::app_state::AppState;

/// Production routes and middleware stack around `state`.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    let data = web::Data::new(state);
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data)
            .configure(routes::configure),
    )
    .await
}
