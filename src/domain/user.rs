use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A customer account. Password material lives in
/// [`UserCredentials`], never here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A user together with the stored password hash, for login checks.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Payload for registering an account. Emails are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}

impl NewUser {
    pub fn new(email: &str, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password_hash: password_hash.into(),
            full_name: None,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
}

/// Editable profile fields. `None` clears the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateProfile {
    pub fn new(full_name: Option<String>, phone: Option<String>) -> Self {
        Self {
            full_name,
            phone,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_normalizes_email() {
        let user = NewUser::new("  An.Nguyen@Example.COM ", "hash");
        assert_eq!(user.email, "an.nguyen@example.com");
    }
}
