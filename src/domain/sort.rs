/// Columns the catalog may be ordered by. Requests naming any other
/// column fall back to the default ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Name,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A parsed `field-direction` sort request such as `price-asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for ProductSort {
    /// Newest products first.
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl ProductSort {
    /// Parse a `field-direction` pair. Unknown fields yield the default
    /// sort; any direction other than `asc` sorts descending.
    pub fn parse(raw: &str) -> Self {
        let (field_raw, direction_raw) = raw.split_once('-').unwrap_or((raw, ""));
        let field = match field_raw {
            "price" => SortField::Price,
            "name" => SortField::Name,
            "created_at" => SortField::CreatedAt,
            _ => return Self::default(),
        };
        let direction = if direction_raw == "asc" {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        Self { field, direction }
    }

    pub fn parse_opt(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// The `field-direction` string this sort round-trips to, used to
    /// mark the active option in the sort dropdown.
    pub fn as_param(&self) -> String {
        let field = match self.field {
            SortField::Price => "price",
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        format!("{field}-{direction}")
    }
}
