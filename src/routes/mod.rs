use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};

use crate::dto::envelope::ErrorEnvelope;
use crate::services::ServiceError;

pub mod categories;
pub mod health;
pub mod questions;

/// Registers every catalog endpoint. Read endpoints live under `/api`; the
/// health check answers both at `/health` and `/api/health`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = error_response(&ServiceError::Validation(vec![err.to_string()]));
        InternalError::from_response(err, response).into()
    }))
    .service(health::health)
    .service(
        web::scope("/api")
            .service(health::health)
            .service(categories::search_categorized_questions)
            .service(categories::list_categories)
            .service(questions::search_questions)
            .service(questions::list_questions),
    );
}

/// Maps a service failure to its HTTP status and JSON error envelope.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(rules) => HttpResponse::BadRequest()
            .json(ErrorEnvelope::new("Validation failed").with_details(rules.clone())),
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(ErrorEnvelope::new("Unauthorized"))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorEnvelope::new("Not found")),
        ServiceError::StoreUnavailable => HttpResponse::ServiceUnavailable()
            .json(ErrorEnvelope::new("Database connection not ready")),
        ServiceError::Internal => {
            HttpResponse::InternalServerError().json(ErrorEnvelope::new("Internal server error"))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation(vec!["bad".into()]), StatusCode::BAD_REQUEST),
            (ServiceError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::StoreUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (ServiceError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(error_response(&err).status(), status);
        }
    }
}
