use serde::Deserialize;

use crate::CATALOG_PAGE_SIZE;
use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::{ProductDetail, ProductListQuery, ProductSummary};
use crate::domain::sort::ProductSort;
use crate::pagination::{Paginated, total_pages};
use crate::repository::errors::RepositoryError;
use crate::repository::{BrandReader, CategoryReader, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the catalog page.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Category filter; an empty value means no filter.
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    /// Brand filter; an empty value means no filter.
    #[serde(rename = "brandId")]
    pub brand_id: Option<String>,
    /// Requested ordering as a `field-direction` pair.
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// Page requested by the UI (1-based).
    pub page: Option<usize>,
}

/// Data required to render the catalog page template.
pub struct CatalogPageData {
    /// Paginated list of product cards.
    pub products: Paginated<ProductSummary>,
    /// All categories for the filter dropdown.
    pub categories: Vec<Category>,
    /// All brands for the filter dropdown.
    pub brands: Vec<Brand>,
    /// Selected category echoed back to the view when present.
    pub category_id: Option<String>,
    /// Selected brand echoed back to the view when present.
    pub brand_id: Option<String>,
    /// Ordering applied to the listing.
    pub sort: ProductSort,
}

/// Loads the catalog page. Read failures are logged and rendered as an
/// empty listing rather than an error page.
pub fn load_catalog_page<R>(repo: &R, query: CatalogQuery) -> CatalogPageData
where
    R: ProductReader + CategoryReader + BrandReader + ?Sized,
{
    let CatalogQuery {
        category_id,
        brand_id,
        sort_by,
        page,
    } = query;

    let page = page.unwrap_or(1).max(1);
    let category_id = category_id.filter(|id| !id.is_empty());
    let brand_id = brand_id.filter(|id| !id.is_empty());
    let sort = ProductSort::parse_opt(sort_by.as_deref());

    let mut list_query = ProductListQuery::new()
        .sort(sort)
        .paginate(page, CATALOG_PAGE_SIZE);

    if let Some(id) = category_id.as_ref() {
        list_query = list_query.category(id.clone());
    }

    if let Some(id) = brand_id.as_ref() {
        list_query = list_query.brand(id.clone());
    }

    let (total, items) = repo.list_summaries(list_query).unwrap_or_else(|err| {
        log::error!("Failed to list catalog products: {err}");
        (0, Vec::new())
    });

    let categories = repo.list_categories().unwrap_or_else(|err| {
        log::error!("Failed to list categories: {err}");
        Vec::new()
    });

    let brands = repo.list_brands().unwrap_or_else(|err| {
        log::error!("Failed to list brands: {err}");
        Vec::new()
    });

    let products = Paginated::new(items, page, total_pages(total, CATALOG_PAGE_SIZE));

    CatalogPageData {
        products,
        categories,
        brands,
        category_id,
        brand_id,
        sort,
    }
}

/// Loads one product page. Unknown ids and read failures both surface as
/// a missing product; failures are logged first.
pub fn load_product_page<R>(repo: &R, product_id: &str) -> ServiceResult<ProductDetail>
where
    R: ProductReader + ?Sized,
{
    if product_id.trim().is_empty() {
        return Err(ServiceError::NotFound);
    }

    let detail = match repo.get_product_detail(product_id) {
        Ok(detail) => detail,
        Err(RepositoryError::NotFound) => None,
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            None
        }
    };

    detail.ok_or(ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::review::Review;
    use crate::domain::sort::{SortDirection, SortField};
    use crate::repository::mock::MockRepository;

    fn summary(id: &str, name: &str) -> ProductSummary {
        ProductSummary::new(id.into(), name.into(), 990_000.0, None, None)
    }

    #[test]
    fn load_catalog_page_passes_filters_to_repository() {
        let mut repo = MockRepository::new();

        repo.expect_list_summaries()
            .times(1)
            .withf(|query| {
                assert_eq!(query.category_id.as_deref(), Some("c1"));
                assert_eq!(query.brand_id.as_deref(), Some("b1"));
                assert!(!query.include_inactive);
                assert_eq!(query.sort.field, SortField::Price);
                assert_eq!(query.sort.direction, SortDirection::Asc);
                match &query.pagination {
                    Some(pagination) => {
                        assert_eq!(pagination.page, 3);
                        assert_eq!(pagination.per_page, CATALOG_PAGE_SIZE);
                        assert_eq!(pagination.offset(), 24);
                    }
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| Ok((25, vec![summary("p1", "Galaxy S24")])));
        repo.expect_list_categories()
            .times(1)
            .returning(|| Ok(vec![Category {
                id: "c1".into(),
                name: "Điện thoại".into(),
            }]));
        repo.expect_list_brands().times(1).returning(|| Ok(Vec::new()));

        let query = CatalogQuery {
            category_id: Some("c1".into()),
            brand_id: Some("b1".into()),
            sort_by: Some("price-asc".into()),
            page: Some(3),
        };

        let data = load_catalog_page(&repo, query);

        assert_eq!(data.products.page, 3);
        assert_eq!(data.products.total_pages, 3);
        assert_eq!(data.products.items.len(), 1);
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.category_id.as_deref(), Some("c1"));
        assert_eq!(data.sort.as_param(), "price-asc");
    }

    #[test]
    fn load_catalog_page_drops_empty_filters() {
        let mut repo = MockRepository::new();

        repo.expect_list_summaries()
            .times(1)
            .withf(|query| {
                assert_eq!(query.category_id, None);
                assert_eq!(query.brand_id, None);
                true
            })
            .returning(|_| Ok((0, Vec::new())));
        repo.expect_list_categories().returning(|| Ok(Vec::new()));
        repo.expect_list_brands().returning(|| Ok(Vec::new()));

        let query = CatalogQuery {
            category_id: Some(String::new()),
            brand_id: Some(String::new()),
            sort_by: None,
            page: None,
        };

        let data = load_catalog_page(&repo, query);

        assert_eq!(data.category_id, None);
        assert_eq!(data.brand_id, None);
    }

    #[test]
    fn load_catalog_page_falls_back_to_default_sort() {
        let mut repo = MockRepository::new();

        repo.expect_list_summaries()
            .times(1)
            .withf(|query| {
                assert_eq!(query.sort, ProductSort::default());
                true
            })
            .returning(|_| Ok((0, Vec::new())));
        repo.expect_list_categories().returning(|| Ok(Vec::new()));
        repo.expect_list_brands().returning(|| Ok(Vec::new()));

        let query = CatalogQuery {
            sort_by: Some("rating-asc".into()),
            ..CatalogQuery::default()
        };

        let data = load_catalog_page(&repo, query);

        assert_eq!(data.sort, ProductSort::default());
    }

    #[test]
    fn load_catalog_page_renders_empty_on_read_failure() {
        let mut repo = MockRepository::new();

        repo.expect_list_summaries()
            .returning(|_| Err(RepositoryError::NotFound));
        repo.expect_list_categories()
            .returning(|| Err(RepositoryError::NotFound));
        repo.expect_list_brands()
            .returning(|| Err(RepositoryError::NotFound));

        let data = load_catalog_page(&repo, CatalogQuery::default());

        assert!(data.products.items.is_empty());
        assert_eq!(data.products.total_pages, 1);
        assert!(data.categories.is_empty());
        assert!(data.brands.is_empty());
    }

    #[test]
    fn load_product_page_returns_detail() {
        let mut repo = MockRepository::new();

        repo.expect_get_product_detail()
            .times(1)
            .withf(|id| id == "p1")
            .returning(|_| {
                Ok(Some(ProductDetail {
                    id: "p1".into(),
                    name: "iPhone 15".into(),
                    description: None,
                    price: 22_990_000.0,
                    stock_quantity: 4,
                    image_url: "/media/products/iphone.jpg".into(),
                    brand_name: Some("Apple".into()),
                    category_name: None,
                    specifications: Default::default(),
                    images: vec!["/media/products/p1/back.jpg".into()],
                    reviews: vec![Review::new(
                        "r1".into(),
                        5,
                        None,
                        None,
                        chrono::Local::now().naive_utc(),
                    )],
                }))
            });

        let detail = load_product_page(&repo, "p1").unwrap();

        assert_eq!(detail.name, "iPhone 15");
        assert_eq!(detail.reviews.len(), 1);
    }

    #[test]
    fn load_product_page_reports_missing_product() {
        let mut repo = MockRepository::new();

        repo.expect_get_product_detail().returning(|_| Ok(None));

        let result = load_product_page(&repo, "missing");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn load_product_page_treats_read_failure_as_missing() {
        let mut repo = MockRepository::new();

        repo.expect_get_product_detail()
            .returning(|_| Err(RepositoryError::NotFound));

        let result = load_product_page(&repo, "p1");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn load_product_page_skips_lookup_for_blank_id() {
        let mut repo = MockRepository::new();

        repo.expect_get_product_detail().times(0);

        let result = load_product_page(&repo, "   ");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
