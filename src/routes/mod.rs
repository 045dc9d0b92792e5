//! HTTP routes and the helpers they share.

use actix_session::Session;
use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use tera::{Context, Tera};
use uuid::Uuid;

use crate::dto::browse::{BrowseResponse, FailureCode};

pub mod browse;

/// Session key holding the browse session id.
pub const SESSION_ID_KEY: &str = "browse_sid";

/// Renders a template, answering with a 500 when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Returns the browse session id, if this client already has one.
pub fn session_id(session: &Session) -> Option<String> {
    session
        .get::<String>(SESSION_ID_KEY)
        .inspect_err(|err| log::warn!("Unreadable browse session: {err}"))
        .ok()
        .flatten()
}

/// Returns the browse session id, assigning a fresh one on first visit.
pub fn ensure_session_id(session: &Session) -> Result<String, actix_web::Error> {
    if let Some(id) = session_id(session) {
        return Ok(id);
    }
    let id = Uuid::new_v4().to_string();
    session.insert(SESSION_ID_KEY, &id)?;
    Ok(id)
}

/// Form extractor config answering malformed bodies with the JSON failure
/// envelope instead of a bare 400.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        log::warn!("Malformed browse request: {err}");
        let response = HttpResponse::BadRequest().json(BrowseResponse::failure(
            FailureCode::BadRequest,
            "Malformed request.",
        ));
        InternalError::from_response(err, response).into()
    })
}
