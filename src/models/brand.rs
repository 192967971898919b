use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::brand::Brand as DomainBrand;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = crate::schema::brands)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<Brand> for DomainBrand {
    fn from(brand: Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name,
        }
    }
}
