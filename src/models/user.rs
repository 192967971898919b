use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::user::{
    NewUser as DomainNewUser, UpdateProfile as DomainUpdateProfile, User as DomainUser,
    UserCredentials,
};

#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<User> for DomainUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserCredentials {
    fn from(user: User) -> Self {
        let password_hash = user.password_hash.clone();
        Self {
            user: user.into(),
            password_hash,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}

impl From<&DomainNewUser> for NewUser {
    fn from(payload: &DomainNewUser) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: payload.email.clone(),
            password_hash: payload.password_hash.clone(),
            full_name: payload.full_name.clone(),
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<&DomainUpdateProfile> for UpdateProfile {
    fn from(updates: &DomainUpdateProfile) -> Self {
        Self {
            full_name: updates.full_name.clone(),
            phone: updates.phone.clone(),
            updated_at: updates.updated_at,
        }
    }
}
