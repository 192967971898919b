use std::collections::HashMap;
use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use csv::Trim;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateUrl;

use crate::domain::product::{NewProduct, Product, SpecificationMap};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Minimum length of a product name, in characters.
const NAME_MIN_CHARS: usize = 3;

pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// One or more fields failed validation, keyed by field name.
    #[error("Dữ liệu không hợp lệ.")]
    Validation(HashMap<String, String>),
    #[error("Không đọc được tệp CSV.")]
    FileReadError,
    #[error("Tệp CSV không đúng định dạng.")]
    CsvParseError,
    #[error("Dòng {row} trong tệp CSV không hợp lệ.")]
    InvalidRow { row: usize },
    #[error("Tệp CSV không chứa sản phẩm nào.")]
    EmptyUpload,
}

impl From<std::io::Error> for ProductFormError {
    fn from(_: std::io::Error) -> Self {
        ProductFormError::FileReadError
    }
}

impl From<csv::Error> for ProductFormError {
    fn from(_: csv::Error) -> Self {
        ProductFormError::CsvParseError
    }
}

/// Multipart payload of the add/edit product form. Specification rows
/// arrive as parallel `spec_key`/`spec_value` lists in form order.
#[derive(Debug, MultipartForm)]
pub struct ProductForm {
    pub name: Text<String>,
    pub description: Option<Text<String>>,
    pub price: Text<String>,
    pub stock_quantity: Text<String>,
    pub category_id: Text<String>,
    pub brand_id: Text<String>,
    pub image_url_main: Option<Text<String>>,
    pub is_active: Option<Text<String>>,
    #[multipart(rename = "spec_key")]
    pub spec_keys: Vec<Text<String>>,
    #[multipart(rename = "spec_value")]
    pub spec_values: Vec<Text<String>>,
    #[multipart(rename = "image_main_file", limit = "10MB")]
    pub main_image: Option<TempFile>,
    #[multipart(rename = "product_images_files", limit = "10MB")]
    pub extra_images: Vec<TempFile>,
}

impl ProductForm {
    /// Copy of the text fields, used to refill the form after a failed
    /// submission.
    pub fn fields_snapshot(&self) -> ProductFields {
        ProductFields {
            name: self.name.0.clone(),
            description: self.description.as_ref().map(|text| text.0.clone()),
            price: self.price.0.clone(),
            stock_quantity: self.stock_quantity.0.clone(),
            category_id: self.category_id.0.clone(),
            brand_id: self.brand_id.0.clone(),
            image_url_main: self.image_url_main.as_ref().map(|text| text.0.clone()),
            is_active: matches!(
                self.is_active.as_ref().map(|text| text.0.as_str()),
                Some("on")
            ),
            specs: self
                .spec_keys
                .iter()
                .zip(self.spec_values.iter())
                .map(|(key, value)| (key.0.clone(), value.0.clone()))
                .collect(),
        }
    }

    /// Split into plain fields and the uploaded files.
    pub fn into_parts(self) -> (ProductFields, Option<TempFile>, Vec<TempFile>) {
        let fields = self.fields_snapshot();
        (fields, self.main_image, self.extra_images)
    }
}

/// The text portion of the product form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductFields {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub stock_quantity: String,
    pub category_id: String,
    pub brand_id: String,
    pub image_url_main: Option<String>,
    pub is_active: bool,
    /// Specification rows in submission order.
    pub specs: Vec<(String, String)>,
}

impl ProductFields {
    /// Prefill values for the edit form from a stored product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
            category_id: product.category_id.clone().unwrap_or_default(),
            brand_id: product.brand_id.clone().unwrap_or_default(),
            image_url_main: product.image_url.clone(),
            is_active: product.is_active,
            specs: product
                .specifications
                .iter()
                .map(|(key, value)| {
                    let value = value
                        .as_str()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| value.to_string());
                    (key.clone(), value)
                })
                .collect(),
        }
    }

    /// Validates and sanitizes the payload into a domain `NewProduct`.
    /// All rules must hold or the whole submission is rejected with
    /// per-field messages.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        let mut field_errors = HashMap::new();

        let name = sanitize_inline_text(&self.name);
        if name.chars().count() < NAME_MIN_CHARS {
            field_errors.insert(
                "name".to_string(),
                "Tên sản phẩm phải có ít nhất 3 ký tự.".to_string(),
            );
        }

        let price = match self.price.trim().parse::<f64>() {
            Ok(value) if value >= 0.0 && value.is_finite() => value,
            _ => {
                field_errors.insert("price".to_string(), "Giá không hợp lệ.".to_string());
                0.0
            }
        };

        let stock_quantity = match self.stock_quantity.trim().parse::<i32>() {
            Ok(value) if value >= 0 => value,
            _ => {
                field_errors.insert(
                    "stock_quantity".to_string(),
                    "Số lượng không hợp lệ.".to_string(),
                );
                0
            }
        };

        let category_id = self.category_id.trim().to_string();
        if Uuid::parse_str(&category_id).is_err() {
            field_errors.insert(
                "category_id".to_string(),
                "Danh mục không hợp lệ.".to_string(),
            );
        }

        let brand_id = self.brand_id.trim().to_string();
        if Uuid::parse_str(&brand_id).is_err() {
            field_errors.insert(
                "brand_id".to_string(),
                "Thương hiệu không hợp lệ.".to_string(),
            );
        }

        // An empty URL means "no main image"; it must not reach the
        // insert payload as an empty string.
        let image_url = self
            .image_url_main
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string);
        // Stored uploads come back as site-relative /media paths, so
        // the edit form must accept those alongside absolute URLs.
        if let Some(url) = image_url.as_deref()
            && !url.starts_with('/')
            && !url.validate_url()
        {
            field_errors.insert(
                "image_url_main".to_string(),
                "URL ảnh không hợp lệ.".to_string(),
            );
        }

        if !field_errors.is_empty() {
            return Err(ProductFormError::Validation(field_errors));
        }

        let description = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        let mut new_product = NewProduct::new(name, price, stock_quantity)
            .with_category(category_id)
            .with_brand(brand_id)
            .with_is_active(self.is_active)
            .with_specifications(collect_specifications(&self.specs));

        if let Some(description) = description {
            new_product = new_product.with_description(description);
        }

        if let Some(image_url) = image_url {
            new_product = new_product.with_image_url(image_url);
        }

        Ok(new_product)
    }
}

/// Build the specification map from form rows. Blank keys or values are
/// dropped; a repeated key keeps its first position but takes the last
/// value.
fn collect_specifications(specs: &[(String, String)]) -> SpecificationMap {
    let mut map = SpecificationMap::new();
    for (key, value) in specs {
        let key = sanitize_inline_text(key);
        let value = sanitize_inline_text(value);
        if key.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(key, serde_json::Value::String(value));
    }
    map
}

#[derive(MultipartForm)]
/// Multipart form for importing products from a CSV file.
pub struct UploadProductsForm {
    #[multipart(limit = "10MB")]
    /// Uploaded CSV file with `name`, `price` and `stock_quantity`
    /// columns and an optional `description`.
    pub csv: TempFile,
}

impl UploadProductsForm {
    /// Parse the uploaded CSV file into a list of [`NewProduct`] records.
    pub fn parse(&mut self) -> ProductFormResult<Vec<NewProduct>> {
        self.csv.file.rewind()?;
        parse_products(self.csv.file.by_ref())
    }
}

#[derive(Deserialize)]
struct ProductCsvRow {
    name: String,
    price: f64,
    stock_quantity: i32,
    #[serde(default)]
    description: Option<String>,
}

fn parse_products<R: Read>(reader: R) -> ProductFormResult<Vec<NewProduct>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader);

    let mut products = Vec::new();

    for (index, row) in csv_reader.deserialize::<ProductCsvRow>().enumerate() {
        let row_number = index + 2; // account for header row
        let record = row?;

        let name = sanitize_inline_text(&record.name);
        if name.is_empty() {
            continue;
        }

        if record.price < 0.0 || record.stock_quantity < 0 {
            return Err(ProductFormError::InvalidRow { row: row_number });
        }

        let mut product = NewProduct::new(name, record.price, record.stock_quantity);

        if let Some(description) = record
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            product = product.with_description(description);
        }

        products.push(product);
    }

    if products.is_empty() {
        return Err(ProductFormError::EmptyUpload);
    }

    Ok(products)
}
