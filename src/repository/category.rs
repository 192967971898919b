use diesel::prelude::*;

use crate::domain::category::Category as DomainCategory;
use crate::models::category::Category as DbCategory;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let items = categories::table
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?;

        Ok(items.into_iter().map(Into::into).collect())
    }
}
