use crate::Database;
use crate::models::{FeedbackRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password, email, first_name, last_name)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                (username, password_hash, email, first_name, last_name),
            )?;
            Ok(())
        })
    }

    pub fn get_user(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, username))
    }

    /// Removes the user row; the FK cascade removes all feedback they own
    /// in the same statement. Returns false if no such user existed.
    pub fn delete_user(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM users WHERE username = ?1", [username])?;
            Ok(affected > 0)
        })
    }

    // -- Feedback --

    pub fn insert_feedback(&self, title: &str, content: &str, username: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO feedback (title, content, username) VALUES (?1, ?2, ?3)",
                (title, content, username),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_feedback(&self, id: i64) -> Result<Option<FeedbackRow>> {
        self.with_conn(|conn| query_feedback(conn, id))
    }

    pub fn list_feedback_for(&self, username: &str) -> Result<Vec<FeedbackRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, content, username, created_at
                 FROM feedback
                 WHERE username = ?1
                 ORDER BY id",
            )?;

            let rows = stmt
                .query_map([username], feedback_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn update_feedback(&self, id: i64, title: &str, content: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE feedback SET title = ?1, content = ?2 WHERE id = ?3",
                (title, content, id),
            )?;
            Ok(())
        })
    }

    pub fn delete_feedback(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM feedback WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }
}

fn query_user(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT username, password, email, first_name, last_name, created_at
         FROM users
         WHERE username = ?1",
    )?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                username: row.get(0)?,
                password: row.get(1)?,
                email: row.get(2)?,
                first_name: row.get(3)?,
                last_name: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_feedback(conn: &Connection, id: i64) -> Result<Option<FeedbackRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, content, username, created_at FROM feedback WHERE id = ?1",
    )?;

    let row = stmt.query_row([id], feedback_from_row).optional()?;

    Ok(row)
}

fn feedback_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FeedbackRow> {
    Ok(FeedbackRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        username: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, is_constraint_violation};

    fn db_with_user(username: &str, email: &str) -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_user(username, "hash", email, "Kim", "Clark").unwrap();
        db
    }

    #[test]
    fn create_and_fetch_user() {
        let db = db_with_user("kim08", "kim@example.com");

        let user = db.get_user("kim08").unwrap().unwrap();
        assert_eq!(user.username, "kim08");
        assert_eq!(user.email, "kim@example.com");
        assert_eq!(user.first_name, "Kim");

        assert!(db.get_user("nobody").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_is_constraint_violation() {
        let db = db_with_user("kim08", "kim@example.com");

        let err = db
            .create_user("kim08", "hash2", "other@example.com", "K", "C")
            .unwrap_err();
        assert!(is_constraint_violation(&err));
    }

    #[test]
    fn duplicate_email_is_constraint_violation() {
        let db = db_with_user("kim08", "kim@example.com");

        let err = db
            .create_user("kim09", "hash2", "kim@example.com", "K", "C")
            .unwrap_err();
        assert!(is_constraint_violation(&err));
    }

    #[test]
    fn feedback_requires_existing_owner() {
        let db = Database::open_in_memory().unwrap();

        let err = db.insert_feedback("hi", "there", "ghost").unwrap_err();
        assert!(is_constraint_violation(&err));
    }

    #[test]
    fn feedback_crud() {
        let db = db_with_user("kim08", "kim@example.com");

        let id = db.insert_feedback("hi", "there", "kim08").unwrap();
        let row = db.get_feedback(id).unwrap().unwrap();
        assert_eq!(row.title, "hi");
        assert_eq!(row.content, "there");
        assert_eq!(row.username, "kim08");

        db.update_feedback(id, "hi2", "there").unwrap();
        let row = db.get_feedback(id).unwrap().unwrap();
        assert_eq!(row.title, "hi2");
        assert_eq!(row.content, "there");

        assert!(db.delete_feedback(id).unwrap());
        assert!(db.get_feedback(id).unwrap().is_none());
        assert!(!db.delete_feedback(id).unwrap());
    }

    #[test]
    fn list_feedback_is_scoped_to_owner() {
        let db = db_with_user("kim08", "kim@example.com");
        db.create_user("ann", "hash", "ann@example.com", "Ann", "Lee").unwrap();

        db.insert_feedback("a", "1", "kim08").unwrap();
        db.insert_feedback("b", "2", "ann").unwrap();
        db.insert_feedback("c", "3", "kim08").unwrap();

        let rows = db.list_feedback_for("kim08").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.username == "kim08"));
    }

    #[test]
    fn deleting_user_cascades_feedback() {
        let db = db_with_user("kim08", "kim@example.com");
        let id = db.insert_feedback("hi", "there", "kim08").unwrap();

        assert!(db.delete_user("kim08").unwrap());
        assert!(db.get_user("kim08").unwrap().is_none());
        assert!(db.get_feedback(id).unwrap().is_none());

        assert!(!db.delete_user("kim08").unwrap());
    }

    #[test]
    fn missing_feedback_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_feedback(999).unwrap().is_none());
    }
}
