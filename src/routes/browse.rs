//! Routes serving the product browser: the initial page, its bootstrap
//! data and the asynchronous product loader.

use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use tera::{Context, Tera};

use crate::dto::browse::{BrowsePayload, BrowseResponse, FailureCode};
use crate::forms::browse::BrowseForm;
use crate::repository::DieselRepository;
use crate::routes::{ensure_session_id, render_template, session_id};
use crate::security::AntiForgery;
use crate::services::{ServiceError, browse as browse_service};

/// Message shown for every failure class; details stay in the logs.
pub const ERROR_LOADING_PRODUCTS: &str = "Error loading products.";

/// Serializes the bootstrap so it can sit inside a `<script>` element.
fn script_safe_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn failure_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Forbidden().json(BrowseResponse::failure(
            FailureCode::Unauthorized,
            "Invalid token.",
        )),
        ServiceError::Form(message) => {
            HttpResponse::BadRequest().json(BrowseResponse::failure(FailureCode::BadRequest, message))
        }
        ServiceError::QueryFailed(err) | ServiceError::CategoriesUnavailable(err) => {
            log::error!("Failed to load products: {err}");
            HttpResponse::InternalServerError().json(BrowseResponse::failure(
                FailureCode::QueryFailed,
                ERROR_LOADING_PRODUCTS,
            ))
        }
        err => {
            log::error!("Failed to load products: {err}");
            HttpResponse::InternalServerError().json(BrowseResponse::failure(
                FailureCode::Internal,
                ERROR_LOADING_PRODUCTS,
            ))
        }
    }
}

/// Plain-text body of the error page shown when the initial render fails.
fn browse_page_error_message(err: &ServiceError) -> &'static str {
    match err {
        ServiceError::CategoriesUnavailable(_) => "Failed to load product categories.",
        _ => "Failed to load products.",
    }
}

#[get("/")]
/// Render the browser with its tabs, search box and first page of products.
pub async fn show_browse(
    session: Session,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    guard: web::Data<AntiForgery>,
) -> impl Responder {
    let session_id = match ensure_session_id(&session) {
        Ok(id) => id,
        Err(err) => {
            log::error!("Failed to start browse session: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let data =
        match browse_service::load_browse_page(repo.get_ref(), &tera, &guard, &session_id) {
            Ok(data) => data,
            Err(err) => {
                log::error!("Failed to load browse page: {err}");
                return HttpResponse::InternalServerError().body(browse_page_error_message(&err));
            }
        };

    let bootstrap_json = match script_safe_json(&data.bootstrap) {
        Ok(json) => json,
        Err(err) => {
            log::error!("Failed to serialize browse bootstrap: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = Context::new();
    context.insert("tabs", &data.bootstrap.tabs);
    context.insert("page_size", &data.config.page_size.get());
    context.insert("search_enabled", &data.config.search_enabled);
    context.insert("fragment", &data.initial.fragment);
    context.insert("bootstrap_json", &bootstrap_json);

    render_template(&tera, "browse/index.html", &context)
}

#[get("/browse/bootstrap")]
/// Same data as the initial render, as JSON, for non-HTML clients.
pub async fn browse_bootstrap(
    session: Session,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    guard: web::Data<AntiForgery>,
) -> impl Responder {
    let session_id = match ensure_session_id(&session) {
        Ok(id) => id,
        Err(err) => {
            log::error!("Failed to start browse session: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match browse_service::load_browse_page(repo.get_ref(), &tera, &guard, &session_id) {
        Ok(data) => HttpResponse::Ok().json(data.bootstrap),
        Err(err) => failure_response(err),
    }
}

#[post("/browse")]
/// Resolve one browse request and answer with the rendered fragment.
pub async fn load_products(
    session: Session,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    guard: web::Data<AntiForgery>,
    form: web::Form<BrowseForm>,
) -> impl Responder {
    let session_id = session_id(&session);

    match browse_service::resolve(
        repo.get_ref(),
        &tera,
        &guard,
        session_id.as_deref(),
        form.into_inner(),
    ) {
        Ok(page) => {
            let debug = page.debug();
            log::debug!("Resolved browse request {debug:?}");
            HttpResponse::Ok().json(BrowseResponse::success(BrowsePayload {
                fragment: page.fragment,
                debug,
            }))
        }
        Err(err) => failure_response(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_page_names_the_failing_part() {
        use crate::repository::errors::RepositoryError;

        let categories =
            ServiceError::CategoriesUnavailable(RepositoryError::ConnectionError("down".into()));
        assert_eq!(
            browse_page_error_message(&categories),
            "Failed to load product categories."
        );

        let products = ServiceError::QueryFailed(RepositoryError::ConnectionError("down".into()));
        assert_eq!(browse_page_error_message(&products), "Failed to load products.");
        assert_eq!(
            browse_page_error_message(&ServiceError::Internal("token".into())),
            "Failed to load products."
        );
    }

    #[test]
    fn script_safe_json_escapes_closing_tags() {
        let json = script_safe_json(&"</script><b>").unwrap();
        assert_eq!(json, r#""<\/script><b>""#);
    }
}
