use diesel::prelude::*;

use crate::domain::brand::Brand as DomainBrand;
use crate::models::brand::Brand as DbBrand;
use crate::repository::errors::RepositoryResult;
use crate::repository::{BrandReader, DieselRepository};

impl BrandReader for DieselRepository {
    fn list_brands(&self) -> RepositoryResult<Vec<DomainBrand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;
        let items = brands::table
            .order(brands::name.asc())
            .load::<DbBrand>(&mut conn)?;

        Ok(items.into_iter().map(Into::into).collect())
    }
}
