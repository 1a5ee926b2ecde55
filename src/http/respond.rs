//! HandlerResponse to HTTP

use axum::http::header::{ACCEPT, CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;

use super::{flash, views};
use crate::handlers::{navigation_script, FlashMessage, HandlerResponse, Outcome, View};

/// JSON body of a rendered page
#[derive(Serialize)]
struct JsonPage<'a> {
    #[serde(flatten)]
    view: &'a View,
    #[serde(skip_serializing_if = "Option::is_none")]
    flash: Option<&'a FlashMessage>,
}

/// What the request asked for, read before running the handler
pub(super) struct RequestContext {
    /// Flash left in the cookie by the previous response
    pub pending_flash: Option<FlashMessage>,
    pub wants_json: bool,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wants_json = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.contains("application/json"));

        Self {
            pending_flash: flash::read(headers),
            wants_json,
        }
    }
}

pub(super) fn into_http(response: HandlerResponse, ctx: RequestContext) -> Response {
    let HandlerResponse { outcome, flash: new_flash } = response;

    match outcome {
        Outcome::Render(view) => {
            let consumed = ctx.pending_flash.is_some();
            let shown = new_flash.or(ctx.pending_flash);
            let mut res = if ctx.wants_json {
                Json(JsonPage {
                    view: &view,
                    flash: shown.as_ref(),
                })
                .into_response()
            } else {
                Html(views::render(&view, shown.as_ref())).into_response()
            };
            if consumed {
                append_cookie(&mut res, flash::clear_cookie());
            }
            res
        }
        Outcome::Redirect(path) => {
            let mut res = Redirect::to(&path).into_response();
            if let Some(message) = new_flash {
                append_cookie(&mut res, flash::set_cookie(&message));
            }
            res
        }
        Outcome::Navigate(path) => {
            let mut res = (
                [(CONTENT_TYPE, "text/javascript; charset=utf-8")],
                navigation_script(&path),
            )
                .into_response();
            if let Some(message) = new_flash {
                append_cookie(&mut res, flash::set_cookie(&message));
            }
            res
        }
        Outcome::NotFound => (StatusCode::NOT_FOUND, Html(views::not_found())).into_response(),
    }
}

fn append_cookie(res: &mut Response, cookie: String) {
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        res.headers_mut().append(SET_COOKIE, value);
    }
}
