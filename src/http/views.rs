//! HTML views
//!
//! Plain server-rendered pages. Every user-supplied string goes through
//! [`escape`].

use crate::domain::{TodoItem, TodoList};
use crate::handlers::{FlashMessage, View};
use crate::routes;

/// Render a page with an optional flash banner
pub fn render(view: &View, flash: Option<&FlashMessage>) -> String {
    let (title, body) = match view {
        View::TodoListsIndex { lists } => ("Todo Lists".to_string(), lists_index(lists)),
        View::NewTodoList {
            title,
            description,
            errors,
        } => (
            "New Todo List".to_string(),
            list_form(&routes::todo_lists_path(), None, title, description, errors),
        ),
        View::EditTodoList { list, errors } => (
            format!("Editing {}", list.title),
            list_form(
                &routes::todo_list_path(list.id),
                Some("put"),
                &list.title,
                &list.description,
                errors,
            ),
        ),
        View::TodoItemsIndex { list, items } => (list.title.clone(), items_index(list, items)),
        View::NewTodoItem {
            list,
            content,
            errors,
        } => (
            format!("New item for {}", list.title),
            item_form(&routes::todo_items_path(list.id), None, list, content, errors),
        ),
        View::EditTodoItem { list, item, errors } => (
            format!("Editing item in {}", list.title),
            item_form(
                &routes::todo_item_path(list.id, item.id),
                Some("put"),
                list,
                &item.content,
                errors,
            ),
        ),
    };

    layout(&title, flash, &body)
}

pub fn not_found() -> String {
    layout(
        "Not Found",
        None,
        &format!(
            "<p>The page you were looking for doesn't exist.</p>\n<p><a href=\"{}\">Back to your lists</a></p>",
            routes::root_path()
        ),
    )
}

fn layout(title: &str, flash: Option<&FlashMessage>, body: &str) -> String {
    let flash = flash
        .map(|f| format!("<div class=\"flash {}\">{}</div>\n", f.kind.as_str(), escape(&f.text)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script>
function destroyTodoItem(path) {{
  fetch(path, {{ method: 'DELETE', headers: {{ 'Accept': 'text/javascript' }} }})
    .then(function (response) {{ return response.text(); }})
    .then(function (script) {{ eval(script); }});
  return false;
}}
</script>
</head>
<body>
{flash}<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
        flash = flash,
        body = body,
    )
}

fn lists_index(lists: &[TodoList]) -> String {
    let mut html = String::new();
    if lists.is_empty() {
        html.push_str("<p>You don't have any todo lists yet.</p>\n");
    } else {
        html.push_str("<ul class=\"todo-lists\">\n");
        for list in lists {
            html.push_str(&format!(
                "<li><a href=\"{items}\">{title}</a> <span class=\"description\">{description}</span> \
                 <a href=\"{edit}\">Edit</a> \
                 <form method=\"post\" action=\"{member}\" class=\"inline\">\
                 <input type=\"hidden\" name=\"_method\" value=\"delete\">\
                 <button type=\"submit\">Destroy</button></form></li>\n",
                items = routes::todo_items_path(list.id),
                title = escape(&list.title),
                description = escape(&list.description),
                edit = routes::edit_todo_list_path(list.id),
                member = routes::todo_list_path(list.id),
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str(&format!(
        "<p><a href=\"{}\">New Todo List</a></p>\n",
        routes::new_todo_list_path()
    ));
    html
}

fn items_index(list: &TodoList, items: &[TodoItem]) -> String {
    let mut html = format!("<p class=\"description\">{}</p>\n", escape(&list.description));
    if items.is_empty() {
        html.push_str("<p>This todo list is empty.</p>\n");
    } else {
        html.push_str("<ul class=\"todo-items\">\n");
        for item in items {
            html.push_str(&format!(
                "<li id=\"todo_item_{id}\">{content} <a href=\"{edit}\">Edit</a> \
                 <a href=\"#\" onclick=\"return destroyTodoItem('{member}');\">Delete</a></li>\n",
                id = item.id,
                content = escape(&item.content),
                edit = routes::edit_todo_item_path(list.id, item.id),
                member = routes::todo_item_path(list.id, item.id),
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str(&format!(
        "<p><a href=\"{}\">New Todo Item</a> | <a href=\"{}\">All lists</a></p>\n",
        routes::new_todo_item_path(list.id),
        routes::root_path()
    ));
    html
}

fn list_form(action: &str, method: Option<&str>, title: &str, description: &str, errors: &[String]) -> String {
    format!(
        "{errors}<form method=\"post\" action=\"{action}\">\n{method}\
         <label>Title <input type=\"text\" name=\"title\" value=\"{title}\"></label>\n\
         <label>Description <textarea name=\"description\">{description}</textarea></label>\n\
         <button type=\"submit\">Save Todo List</button>\n</form>\n<p><a href=\"{back}\">Back</a></p>\n",
        errors = error_list(errors),
        action = escape(action),
        method = method_override(method),
        title = escape(title),
        description = escape(description),
        back = routes::root_path(),
    )
}

fn item_form(action: &str, method: Option<&str>, list: &TodoList, content: &str, errors: &[String]) -> String {
    format!(
        "{errors}<form method=\"post\" action=\"{action}\">\n{method}\
         <label>Content <input type=\"text\" name=\"content\" value=\"{content}\"></label>\n\
         <button type=\"submit\">Save</button>\n</form>\n<p><a href=\"{back}\">Cancel</a></p>\n",
        errors = error_list(errors),
        action = escape(action),
        method = method_override(method),
        content = escape(content),
        back = routes::todo_items_path(list.id),
    )
}

fn method_override(method: Option<&str>) -> String {
    method
        .map(|m| format!("<input type=\"hidden\" name=\"_method\" value=\"{}\">\n", m))
        .unwrap_or_default()
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!("<ul class=\"errors\">{}</ul>\n", items)
}

/// Escape text for HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
