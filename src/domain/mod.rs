pub mod brand;
pub mod category;
pub mod product;
pub mod product_image;
pub mod review;
pub mod sort;
pub mod user;
