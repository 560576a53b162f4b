use crate::config::Settings;
use crate::error::ApiError;
use crate::models::*;
use crate::service;
use crate::store::Backend;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use log::info;

type ApiResult = Result<HttpResponse, ApiError>;

fn ok<T: serde::Serialize>(payload: T) -> ApiResult {
    Ok(HttpResponse::Ok().json(Success::new(payload)))
}

/// Ids in paths that do not parse match no question or category.
fn path_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

async fn get_categories<B: Backend>(backend: web::Data<B>) -> ApiResult {
    let categories = web::block(move || backend.run(service::list_categories)).await?;
    ok(categories)
}

async fn get_category_questions<B: Backend>(
    backend: web::Data<B>,
    id: web::Path<String>,
) -> ApiResult {
    let id = path_id(&id)?;
    let questions =
        web::block(move || backend.run(|store| service::questions_by_category(store, id))).await?;
    ok(questions)
}

async fn get_questions<B: Backend>(
    backend: web::Data<B>,
    settings: web::Data<Settings>,
    web::Query(query): web::Query<PageQuery>,
) -> ApiResult {
    let page = query.page.unwrap_or(1);
    let settings = *settings.get_ref();
    let questions =
        web::block(move || backend.run(|store| service::list_questions(store, page, &settings)))
            .await?;
    ok(questions)
}

async fn post_question<B: Backend>(
    backend: web::Data<B>,
    web::Json(body): web::Json<CreateQuestionBody>,
) -> ApiResult {
    let new = body.validate()?;
    let created =
        web::block(move || backend.run(|store| service::create_question(store, &new))).await?;
    info!("created question {}", created.q_id);
    ok(created)
}

async fn delete_question<B: Backend>(backend: web::Data<B>, id: web::Path<String>) -> ApiResult {
    let id = path_id(&id)?;
    let deleted =
        web::block(move || backend.run(|store| service::delete_question(store, id))).await?;
    info!("deleted question {}", deleted.delete_id);
    ok(deleted)
}

async fn search_questions<B: Backend>(
    backend: web::Data<B>,
    web::Json(body): web::Json<SearchBody>,
) -> ApiResult {
    let term = body.validate()?;
    let results = web::block(move || backend.run(|store| service::search(store, &term))).await?;
    ok(results)
}

async fn post_quiz<B: Backend>(
    backend: web::Data<B>,
    web::Json(body): web::Json<QuizBody>,
) -> ApiResult {
    let request = body.validate()?;
    let question = web::block(move || {
        backend.run(|store| service::next_question(store, &request, &mut rand::thread_rng()))
    })
    .await?;
    ok(question)
}

pub async fn not_found() -> ApiResult {
    Err(ApiError::NotFound)
}

async fn method_not_allowed() -> ApiResult {
    Err(ApiError::MethodNotAllowed)
}

/// Routes every endpoint to the services, backed by `B`. A known path hit
/// with the wrong method gets the 405 envelope.
pub fn configure<B: Backend>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/categories")
            .route(web::get().to(get_categories::<B>))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/categories/{id}/questions")
            .route(web::get().to(get_category_questions::<B>))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/questions")
            .route(web::get().to(get_questions::<B>))
            .route(web::post().to(post_question::<B>))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/questions/search")
            .route(web::post().to(search_questions::<B>))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/questions/{id}")
            .route(web::delete().to(delete_question::<B>))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/quizzes")
            .route(web::post().to(post_quiz::<B>))
            .default_service(web::route().to(method_not_allowed)),
    );
}

/// Unreadable JSON bodies get the 400 envelope instead of a plain-text error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("rejected request body: {}", err);
        ApiError::BadRequest.into()
    })
}

/// A non-integer `page` gets the 400 envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("rejected query string: {}", err);
        ApiError::BadRequest.into()
    })
}

pub fn cors() -> actix_cors::CorsFactory {
    Cors::new()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .finish()
}
