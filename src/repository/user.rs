use diesel::prelude::*;

use crate::domain::user::{
    NewUser as DomainNewUser, UpdateProfile as DomainUpdateProfile, User as DomainUser,
    UserCredentials,
};
use crate::models::user::{
    NewUser as DbNewUser, UpdateProfile as DbUpdateProfile, User as DbUser,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: &str) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<UserCredentials>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new = DbNewUser::from(new_user);

        let created = diesel::insert_into(users::table)
            .values(&db_new)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }

    fn update_profile(
        &self,
        user_id: &str,
        updates: &DomainUpdateProfile,
    ) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProfile::from(updates);

        let target = users::table.filter(users::id.eq(user_id));
        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbUser>(&mut conn)?;

        Ok(updated.into())
    }

    fn update_password(&self, user_id: &str, password_hash: &str) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let target = users::table.filter(users::id.eq(user_id));
        let updated = diesel::update(target)
            .set((
                users::password_hash.eq(password_hash),
                users::updated_at.eq(chrono::Local::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
