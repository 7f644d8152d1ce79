use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::envelope::ListEnvelope;
use crate::forms::questions::QuestionSearchForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::categories::{
    list_categories as list_categories_service,
    search_categorized_questions as search_categorized_questions_service,
};

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories_service(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(ListEnvelope::new(categories)),
        Err(err) => error_response(&err),
    }
}

#[get("/categories/search")]
pub async fn search_categorized_questions(
    params: web::Query<QuestionSearchForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_categorized_questions_service(params.into_inner(), repo.get_ref()) {
        Ok(questions) => HttpResponse::Ok().json(ListEnvelope::new(questions)),
        Err(err) => error_response(&err),
    }
}
