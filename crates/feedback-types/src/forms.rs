use serde::Deserialize;

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// -- Feedback --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackForm {
    pub title: String,
    pub content: String,
}

/// Partial update payload. A field left out of the request keeps the
/// stored value rather than failing validation or clearing it.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackUpdateForm {
    pub title: Option<String>,
    pub content: Option<String>,
}
