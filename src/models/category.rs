use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::Category as DomainCategory;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<Category> for DomainCategory {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}
