use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Shown in place of the author name when the reviewer's profile has
/// none or the account is gone.
pub const ANONYMOUS_AUTHOR: &str = "Người dùng ẩn danh";

/// A product review with the author name already resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub author_name: String,
    pub created_at: NaiveDateTime,
}

impl Review {
    pub fn new(
        id: String,
        rating: i32,
        comment: Option<String>,
        author_name: Option<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            rating,
            comment,
            author_name: author_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn when() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn keeps_author_name_when_present() {
        let review = Review::new("r1".into(), 5, None, Some("Minh".into()), when());
        assert_eq!(review.author_name, "Minh");
    }

    #[test]
    fn anonymous_when_author_missing_or_blank() {
        let missing = Review::new("r1".into(), 4, None, None, when());
        assert_eq!(missing.author_name, ANONYMOUS_AUTHOR);

        let blank = Review::new("r2".into(), 4, None, Some("   ".into()), when());
        assert_eq!(blank.author_name, ANONYMOUS_AUTHOR);
    }
}
