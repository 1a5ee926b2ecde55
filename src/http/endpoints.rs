//! Route handlers
//!
//! Thin adapters: extract ids and form fields, call the resource handler,
//! convert the result.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tracing::debug;

use super::respond::{into_http, RequestContext};
use super::{AppError, AppState};
use crate::handlers::HandlerResponse;
use crate::routes;

type HttpResult<T = Response> = Result<T, AppError>;

#[derive(Debug, Default, Deserialize)]
pub(super) struct ItemForm {
    content: Option<String>,
    #[serde(rename = "_method")]
    method: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ListForm {
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Verb requested through the `_method` form field
#[derive(Debug, PartialEq, Eq)]
enum MethodOverride {
    Update,
    Destroy,
}

fn method_override(method: Option<&str>) -> Option<MethodOverride> {
    match method.map(str::to_ascii_lowercase).as_deref() {
        Some("put") | Some("patch") => Some(MethodOverride::Update),
        Some("delete") => Some(MethodOverride::Destroy),
        _ => None,
    }
}

/// Numeric id from a path segment; anything else names no record
fn parse_id(segment: &str) -> Option<u32> {
    segment.parse().ok()
}

// ---- todo lists ----

pub(super) async fn lists_index(State(state): State<AppState>, headers: HeaderMap) -> HttpResult {
    let response = state.todo_lists.index().await?;
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

pub(super) async fn lists_new(State(state): State<AppState>, headers: HeaderMap) -> Response {
    into_http(state.todo_lists.new_list(), RequestContext::from_headers(&headers))
}

pub(super) async fn lists_show(Path(todo_list_id): Path<String>) -> Redirect {
    match parse_id(&todo_list_id) {
        Some(id) => Redirect::to(&routes::todo_items_path(id)),
        None => Redirect::to(&routes::new_todo_list_path()),
    }
}

pub(super) async fn lists_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ListForm>,
) -> HttpResult {
    let response = state
        .todo_lists
        .create(
            form.title.as_deref().unwrap_or_default(),
            form.description.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

pub(super) async fn lists_edit(
    State(state): State<AppState>,
    Path(todo_list_id): Path<String>,
    headers: HeaderMap,
) -> HttpResult {
    let response = match parse_id(&todo_list_id) {
        Some(id) => state.todo_lists.edit(id).await?,
        None => state.todo_lists.unknown_list(),
    };
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

async fn update_list(state: &AppState, todo_list_id: &str, form: &ListForm) -> HttpResult<HandlerResponse> {
    let Some(id) = parse_id(todo_list_id) else {
        return Ok(state.todo_lists.unknown_list());
    };
    Ok(state
        .todo_lists
        .update(id, form.title.as_deref(), form.description.as_deref())
        .await?)
}

async fn destroy_list(state: &AppState, todo_list_id: &str) -> HttpResult<HandlerResponse> {
    let Some(id) = parse_id(todo_list_id) else {
        return Ok(state.todo_lists.unknown_list());
    };
    Ok(state.todo_lists.destroy(id).await?)
}

pub(super) async fn lists_update(
    State(state): State<AppState>,
    Path(todo_list_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ListForm>,
) -> HttpResult {
    let response = update_list(&state, &todo_list_id, &form).await?;
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

pub(super) async fn lists_destroy(
    State(state): State<AppState>,
    Path(todo_list_id): Path<String>,
    headers: HeaderMap,
) -> HttpResult {
    let response = destroy_list(&state, &todo_list_id).await?;
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

pub(super) async fn lists_override(
    State(state): State<AppState>,
    Path(todo_list_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ListForm>,
) -> HttpResult {
    let response = match method_override(form.method.as_deref()) {
        Some(MethodOverride::Update) => update_list(&state, &todo_list_id, &form).await?,
        Some(MethodOverride::Destroy) => destroy_list(&state, &todo_list_id).await?,
        None => {
            debug!(%todo_list_id, method = ?form.method, "POST without a usable _method");
            return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
        }
    };
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

// ---- todo items ----

pub(super) async fn items_index(
    State(state): State<AppState>,
    Path(todo_list_id): Path<String>,
    headers: HeaderMap,
) -> HttpResult {
    let response = match parse_id(&todo_list_id) {
        Some(list_id) => state.todo_items.index(list_id).await?,
        None => state.todo_items.unknown_list(&todo_list_id),
    };
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

pub(super) async fn items_new(
    State(state): State<AppState>,
    Path(todo_list_id): Path<String>,
    headers: HeaderMap,
) -> HttpResult {
    let response = match parse_id(&todo_list_id) {
        Some(list_id) => state.todo_items.new_item(list_id).await?,
        None => state.todo_items.unknown_list(&todo_list_id),
    };
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

pub(super) async fn items_edit(
    State(state): State<AppState>,
    Path((todo_list_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> HttpResult {
    let response = match (parse_id(&todo_list_id), parse_id(&id)) {
        (Some(list_id), Some(id)) => state.todo_items.edit(list_id, id).await?,
        (Some(list_id), None) => state.todo_items.unknown_item(list_id).await?,
        (None, _) => state.todo_items.unknown_list(&todo_list_id),
    };
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

pub(super) async fn items_create(
    State(state): State<AppState>,
    Path(todo_list_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ItemForm>,
) -> HttpResult {
    let response = match parse_id(&todo_list_id) {
        Some(list_id) => {
            state
                .todo_items
                .create(list_id, form.content.as_deref().unwrap_or_default())
                .await?
        }
        None => state.todo_items.unknown_list(&todo_list_id),
    };
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

async fn update_item(
    state: &AppState,
    todo_list_id: &str,
    id: &str,
    content: Option<&str>,
) -> HttpResult<HandlerResponse> {
    let response = match (parse_id(todo_list_id), parse_id(id)) {
        (Some(list_id), Some(id)) => state.todo_items.update(list_id, id, content).await?,
        (Some(list_id), None) => state.todo_items.unknown_item(list_id).await?,
        (None, _) => state.todo_items.unknown_list(todo_list_id),
    };
    Ok(response)
}

async fn destroy_item(state: &AppState, todo_list_id: &str, id: &str) -> HandlerResponse {
    match (parse_id(todo_list_id), parse_id(id)) {
        (Some(list_id), Some(id)) => state.todo_items.destroy(list_id, id).await,
        _ => state.todo_items.destroy_unknown(todo_list_id, id),
    }
}

pub(super) async fn items_update(
    State(state): State<AppState>,
    Path((todo_list_id, id)): Path<(String, String)>,
    headers: HeaderMap,
    Form(form): Form<ItemForm>,
) -> HttpResult {
    let response = update_item(&state, &todo_list_id, &id, form.content.as_deref()).await?;
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

/// Never fails: errors come back as a navigation script with a flash
pub(super) async fn items_destroy(
    State(state): State<AppState>,
    Path((todo_list_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let response = destroy_item(&state, &todo_list_id, &id).await;
    into_http(response, RequestContext::from_headers(&headers))
}

pub(super) async fn items_override(
    State(state): State<AppState>,
    Path((todo_list_id, id)): Path<(String, String)>,
    headers: HeaderMap,
    Form(form): Form<ItemForm>,
) -> HttpResult {
    let response = match method_override(form.method.as_deref()) {
        Some(MethodOverride::Update) => {
            update_item(&state, &todo_list_id, &id, form.content.as_deref()).await?
        }
        Some(MethodOverride::Destroy) => destroy_item(&state, &todo_list_id, &id).await,
        None => {
            debug!(%todo_list_id, %id, method = ?form.method, "POST without a usable _method");
            return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
        }
    };
    Ok(into_http(response, RequestContext::from_headers(&headers)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_override() {
        assert_eq!(method_override(Some("put")), Some(MethodOverride::Update));
        assert_eq!(method_override(Some("PATCH")), Some(MethodOverride::Update));
        assert_eq!(method_override(Some("delete")), Some(MethodOverride::Destroy));
        assert_eq!(method_override(Some("get")), None);
        assert_eq!(method_override(None), None);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12345"), Some(12345));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("4294967296"), None);
    }
}
