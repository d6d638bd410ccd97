/// Database row types, mapping directly to SQLite rows.
/// `username` is the sole natural key of a user; feedback rows carry a
/// surrogate integer id and reference their owner by username.

#[derive(Debug, Clone)]
pub struct UserRow {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct FeedbackRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub username: String,
    pub created_at: String,
}
