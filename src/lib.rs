pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod storage;

/// Catalog pages always show this many products.
pub const CATALOG_PAGE_SIZE: usize = 12;

/// Admin product tables page by this many rows.
pub const ADMIN_PAGE_SIZE: usize = 20;

/// Search never returns more than this many matches.
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Shown in listings when a product has no image reference.
pub const PLACEHOLDER_IMAGE: &str = "/assets/images/phone-placeholder.svg";
