use crate::domain::product::ProductSummary;
use crate::repository::ProductReader;

/// Home page shows this many best sellers.
const BEST_SELLING_LIMIT: usize = 8;

/// Home page shows this many top rated products.
const TOP_RATED_LIMIT: usize = 4;

/// Data required to render the home page template.
pub struct HomePageData {
    /// Best sellers, most units sold first.
    pub best_selling: Vec<ProductSummary>,
    /// Highest rated products, best average first.
    pub top_rated: Vec<ProductSummary>,
}

/// Loads the home page listings. Each listing degrades to empty on a
/// read failure so the page still renders.
pub fn load_home_page<R>(repo: &R) -> HomePageData
where
    R: ProductReader + ?Sized,
{
    let best_selling = repo
        .list_best_selling(BEST_SELLING_LIMIT)
        .unwrap_or_else(|err| {
            log::error!("Failed to load best sellers: {err}");
            Vec::new()
        });

    let top_rated = repo.list_top_rated(TOP_RATED_LIMIT).unwrap_or_else(|err| {
        log::error!("Failed to load top rated products: {err}");
        Vec::new()
    });

    HomePageData {
        best_selling,
        top_rated,
    }
}
