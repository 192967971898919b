use serde::Deserialize;

use crate::SEARCH_RESULT_LIMIT;
use crate::domain::product::{ProductListQuery, ProductSummary};
use crate::repository::ProductReader;

/// Query parameters accepted by the search page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Raw keyword as typed into the search box.
    pub q: Option<String>,
}

/// Data required to render the search results template.
pub struct SearchPageData {
    /// Trimmed keyword echoed back to the view.
    pub keyword: String,
    /// Up to `SEARCH_RESULT_LIMIT` matching products.
    pub results: Vec<ProductSummary>,
}

/// Searches active products by name or description. A blank keyword
/// yields no results without touching the repository; read failures are
/// logged and also yield no results.
pub fn search_products<R>(repo: &R, query: SearchQuery) -> SearchPageData
where
    R: ProductReader + ?Sized,
{
    let keyword = query.q.unwrap_or_default().trim().to_string();

    if keyword.is_empty() {
        return SearchPageData {
            keyword,
            results: Vec::new(),
        };
    }

    let list_query = ProductListQuery::new()
        .search(keyword.clone())
        .paginate(1, SEARCH_RESULT_LIMIT);

    let results = match repo.list_summaries(list_query) {
        Ok((_, items)) => items,
        Err(err) => {
            log::error!("Failed to search products for {keyword:?}: {err}");
            Vec::new()
        }
    };

    SearchPageData { keyword, results }
}
