use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::envelope::ListEnvelope;
use crate::forms::questions::QuestionSearchForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::questions::{
    list_questions as list_questions_service, search_questions as search_questions_service,
};

#[get("/questions")]
pub async fn list_questions(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_questions_service(repo.get_ref()) {
        Ok(questions) => HttpResponse::Ok().json(ListEnvelope::new(questions)),
        Err(err) => error_response(&err),
    }
}

#[get("/questions/search")]
pub async fn search_questions(
    params: web::Query<QuestionSearchForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    log::debug!("Search query received: {:?}", params.search);
    match search_questions_service(params.into_inner(), repo.get_ref()) {
        Ok(questions) => HttpResponse::Ok().json(ListEnvelope::new(questions)),
        Err(err) => error_response(&err),
    }
}
