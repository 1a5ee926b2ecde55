//! Path helpers shared by handlers, views and the router.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in a path segment echoed back from a request
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn root_path() -> String {
    "/".to_string()
}

pub fn todo_lists_path() -> String {
    "/todo_lists".to_string()
}

pub fn new_todo_list_path() -> String {
    "/todo_lists/new".to_string()
}

pub fn todo_list_path(id: u32) -> String {
    format!("/todo_lists/{}", id)
}

pub fn edit_todo_list_path(id: u32) -> String {
    format!("/todo_lists/{}/edit", id)
}

pub fn todo_items_path(todo_list_id: u32) -> String {
    format!("/todo_lists/{}/todo_items", todo_list_id)
}

/// Items index for a list id taken verbatim from a request path
pub fn todo_items_path_for(todo_list_segment: &str) -> String {
    format!(
        "/todo_lists/{}/todo_items",
        utf8_percent_encode(todo_list_segment, PATH_SEGMENT)
    )
}

pub fn new_todo_item_path(todo_list_id: u32) -> String {
    format!("/todo_lists/{}/todo_items/new", todo_list_id)
}

pub fn todo_item_path(todo_list_id: u32, id: u32) -> String {
    format!("/todo_lists/{}/todo_items/{}", todo_list_id, id)
}

pub fn edit_todo_item_path(todo_list_id: u32, id: u32) -> String {
    format!("/todo_lists/{}/todo_items/{}/edit", todo_list_id, id)
}
