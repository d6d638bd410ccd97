//! Minimal server-rendered pages. No template engine; each page is a
//! `format!` over escaped values, just enough markup for the forms and
//! lists the routes need.

use axum::response::Html;

use feedback_db::models::{FeedbackRow, UserRow};

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html>\n<head><title>{}</title></head>\n<body>\n{}\n</body>\n</html>",
        escape(title),
        body
    ))
}

pub fn home(identity: Option<&str>) -> Html<String> {
    let body = match identity {
        Some(me) => format!(
            "<h1>Feedback Board</h1>\n<p><a href=\"/users/{me}\">Your profile</a> | <a href=\"/logout\">Log out</a></p>",
            me = escape(me)
        ),
        None => "<h1>Feedback Board</h1>\n<p><a href=\"/register\">Register</a> | <a href=\"/login\">Log in</a></p>"
            .to_string(),
    };
    layout("Feedback Board", &body)
}

pub fn register_form(error: Option<&str>) -> Html<String> {
    let notice = match error {
        Some(msg) => format!("<p class=\"error\">{}</p>\n", escape(msg)),
        None => String::new(),
    };
    let body = format!(
        "<h1>Register</h1>\n{notice}<form method=\"post\" action=\"/register\">\n\
         <input name=\"username\" placeholder=\"username\">\n\
         <input name=\"password\" type=\"password\" placeholder=\"password\">\n\
         <input name=\"email\" placeholder=\"email\">\n\
         <input name=\"first_name\" placeholder=\"first name\">\n\
         <input name=\"last_name\" placeholder=\"last name\">\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n<p><a href=\"/login\">Log in instead</a></p>"
    );
    layout("Register", &body)
}

pub fn login_form() -> Html<String> {
    let body = "<h1>Log in</h1>\n<form method=\"post\" action=\"/login\">\n\
         <input name=\"username\" placeholder=\"username\">\n\
         <input name=\"password\" type=\"password\" placeholder=\"password\">\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n<p><a href=\"/register\">Register instead</a></p>";
    layout("Log in", body)
}

pub fn profile(user: &UserRow, feedback: &[FeedbackRow]) -> Html<String> {
    let mut items = String::new();
    for row in feedback {
        items.push_str(&format!(
            "<li><strong>{title}</strong>: {content} \
             <a href=\"/feedback/{id}/update\">edit</a> \
             <a href=\"/feedback/{id}/delete\">delete</a></li>\n",
            title = escape(&row.title),
            content = escape(&row.content),
            id = row.id,
        ));
    }

    let username = escape(&user.username);
    let body = format!(
        "<h1>{first} {last}</h1>\n\
         <p>{email}</p>\n\
         <ul>\n{items}</ul>\n\
         <p><a href=\"/users/{username}/feedback/add\">Add feedback</a> | \
         <a href=\"/logout\">Log out</a> | \
         <a href=\"/users/{username}/delete\">Delete account</a></p>",
        first = escape(&user.first_name),
        last = escape(&user.last_name),
        email = escape(&user.email),
    );
    layout(&user.username, &body)
}

pub fn feedback_form(username: &str) -> Html<String> {
    let body = format!(
        "<h1>Add feedback</h1>\n\
         <form method=\"post\" action=\"/users/{username}/feedback/add\">\n\
         <input name=\"title\" placeholder=\"title\">\n\
         <textarea name=\"content\" placeholder=\"content\"></textarea>\n\
         <button type=\"submit\">Add</button>\n\
         </form>",
        username = escape(username),
    );
    layout("Add feedback", &body)
}

pub fn feedback_update_form(row: &FeedbackRow) -> Html<String> {
    let body = format!(
        "<h1>Edit feedback</h1>\n\
         <form method=\"post\" action=\"/feedback/{id}/update\">\n\
         <input name=\"title\" value=\"{title}\">\n\
         <textarea name=\"content\">{content}</textarea>\n\
         <button type=\"submit\">Save</button>\n\
         </form>",
        id = row.id,
        title = escape(&row.title),
        content = escape(&row.content),
    );
    layout("Edit feedback", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn profile_escapes_feedback_content() {
        let user = UserRow {
            username: "kim08".into(),
            password: "hash".into(),
            email: "kim@example.com".into(),
            first_name: "Kim".into(),
            last_name: "Clark".into(),
            created_at: String::new(),
        };
        let feedback = vec![FeedbackRow {
            id: 1,
            title: "<script>".into(),
            content: "there".into(),
            username: "kim08".into(),
            created_at: String::new(),
        }];

        let Html(page) = profile(&user, &feedback);
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("there"));
    }
}
