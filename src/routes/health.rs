use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::services::health::check_health;

#[get("/health")]
pub async fn health(repo: web::Data<DieselRepository>) -> impl Responder {
    HttpResponse::Ok().json(check_health(repo.get_ref()))
}
