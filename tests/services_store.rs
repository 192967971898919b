use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use tempfile::NamedTempFile;

use mobistore::auth::CurrentUser;
use mobistore::domain::product::ProductListQuery;
use mobistore::forms::auth::{LoginForm, RegisterForm};
use mobistore::forms::products::{ProductForm, UploadProductsForm};
use mobistore::forms::profile::{ChangePasswordForm, UpdateProfileForm};
use mobistore::repository::{DieselRepository, ProductReader};
use mobistore::services::{ServiceError, admin, auth, profile};
use mobistore::storage::LocalImageStore;

mod common;

const CATEGORY_ID: &str = "6f2b2c3e-8a30-4f2e-9f4e-2b7a31f0a111";
const BRAND_ID: &str = "9d1a4b6c-5e70-4a8b-b2c1-6f3d42e0b222";

fn admin_user() -> CurrentUser {
    CurrentUser {
        id: "quan-tri".to_string(),
        email: "admin@mobistore.vn".to_string(),
        name: Some("Quản trị viên".to_string()),
        is_admin: true,
    }
}

fn temp_file(name: &str, bytes: &[u8]) -> TempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(bytes).expect("failed to write temp file");
    file.seek(SeekFrom::Start(0))
        .expect("failed to rewind temp file");
    TempFile {
        file,
        content_type: None,
        file_name: Some(name.to_string()),
        size: bytes.len(),
    }
}

fn product_form(name: &str) -> ProductForm {
    ProductForm {
        name: Text(name.to_string()),
        description: Some(Text("Hàng chính hãng, nguyên seal.".to_string())),
        price: Text("28990000".to_string()),
        stock_quantity: Text("12".to_string()),
        category_id: Text(CATEGORY_ID.to_string()),
        brand_id: Text(BRAND_ID.to_string()),
        image_url_main: None,
        is_active: Some(Text("on".to_string())),
        spec_keys: vec![Text("Màn hình".to_string())],
        spec_values: vec![Text("6.1 inch".to_string())],
        main_image: None,
        extra_images: Vec::new(),
    }
}

/// Resolve a `/media/...` URL back to the file inside the store root.
fn stored_file(media_root: &Path, url: &str) -> std::path::PathBuf {
    let key = url
        .strip_prefix("/media/")
        .unwrap_or_else(|| panic!("unexpected image url: {url}"));
    media_root.join(key)
}

#[test]
fn create_product_stores_uploaded_images() {
    let test_db = common::TestDb::new("service_create_product_stores_images.db");
    let repo = DieselRepository::new(test_db.pool());
    common::seed_category(&test_db.pool(), CATEGORY_ID, "Điện thoại");
    common::seed_brand(&test_db.pool(), BRAND_ID, "Apple");

    let media = tempfile::tempdir().expect("failed to create media dir");
    let store = LocalImageStore::new(media.path(), "/media");

    let form = ProductForm {
        main_image: Some(temp_file("chinh dien.png", b"anh chinh")),
        extra_images: vec![
            temp_file("mat truoc.png", b"truoc"),
            temp_file("mat sau.png", b"sau"),
        ],
        ..product_form("iPhone 15 Pro")
    };

    let created = admin::create_product(&repo, &store, &admin_user(), form)
        .expect("expected product creation to succeed");

    let main_url = created.image_url.as_deref().expect("expected a main image");
    assert!(main_url.starts_with("/media/products/public/"));
    assert!(main_url.ends_with("-chinh_dien.png"));
    assert!(stored_file(media.path(), main_url).is_file());

    let detail = repo
        .get_product_detail(&created.id)
        .expect("detail query")
        .expect("created product should be visible");
    assert_eq!(detail.images.len(), 2);
    assert!(detail.images[0].ends_with("-mat_truoc.png"));
    assert!(detail.images[1].ends_with("-mat_sau.png"));
    for url in &detail.images {
        assert!(url.contains(&format!("/{}/", created.id)));
        assert!(stored_file(media.path(), url).is_file());
    }
}

#[test]
fn create_product_requires_admin() {
    let test_db = common::TestDb::new("service_create_product_requires_admin.db");
    let repo = DieselRepository::new(test_db.pool());

    let media = tempfile::tempdir().expect("failed to create media dir");
    let store = LocalImageStore::new(media.path(), "/media");

    let visitor = CurrentUser {
        id: "khach".to_string(),
        email: "khach@example.com".to_string(),
        name: None,
        is_admin: false,
    };

    let result = admin::create_product(&repo, &store, &visitor, product_form("iPhone 15"));

    assert!(matches!(result, Err(ServiceError::Unauthorized)));
    let (total, _) = repo
        .list_summaries(ProductListQuery::new().include_inactive())
        .expect("list products");
    assert_eq!(total, 0);
}

#[test]
fn update_product_swaps_gallery_and_delete_removes_row() {
    let test_db = common::TestDb::new("service_update_product_swaps_gallery.db");
    let repo = DieselRepository::new(test_db.pool());
    common::seed_category(&test_db.pool(), CATEGORY_ID, "Điện thoại");
    common::seed_brand(&test_db.pool(), BRAND_ID, "Apple");

    let media = tempfile::tempdir().expect("failed to create media dir");
    let store = LocalImageStore::new(media.path(), "/media");

    let form = ProductForm {
        main_image: Some(temp_file("chinh dien.png", b"anh chinh")),
        extra_images: vec![
            temp_file("goc trai.png", b"trai"),
            temp_file("goc phai.png", b"phai"),
        ],
        ..product_form("Galaxy S24")
    };
    let created = admin::create_product(&repo, &store, &admin_user(), form)
        .expect("expected product creation to succeed");
    let original_main = created.image_url.clone().expect("expected a main image");

    // Resubmitting the stored /media path must keep the main image, and
    // fresh gallery uploads replace the old set.
    let edit = ProductForm {
        image_url_main: Some(Text(original_main.clone())),
        extra_images: vec![temp_file("anh moi.png", b"moi")],
        ..product_form("Galaxy S24 128GB")
    };
    let updated = admin::update_product(&repo, &store, &admin_user(), &created.id, edit)
        .expect("expected product update to succeed");

    assert_eq!(updated.name, "Galaxy S24 128GB");
    assert_eq!(updated.image_url.as_deref(), Some(original_main.as_str()));

    let detail = repo
        .get_product_detail(&created.id)
        .expect("detail query")
        .expect("updated product should be visible");
    assert_eq!(detail.images.len(), 1);
    assert!(detail.images[0].ends_with("-anh_moi.png"));

    admin::delete_product(&repo, &admin_user(), &created.id).expect("expected delete to succeed");
    assert!(
        repo.get_product_by_id(&created.id)
            .expect("lookup after delete")
            .is_none()
    );
}

#[test]
fn import_products_from_csv_file() {
    let test_db = common::TestDb::new("service_import_products_from_csv.db");
    let repo = DieselRepository::new(test_db.pool());

    let csv = b"name,price,stock_quantity,description\n\
iPhone 15,22990000,5,Ban 128GB\n\
Galaxy S24,18990000,8,\n";
    let form = UploadProductsForm {
        csv: temp_file("san-pham.csv", csv),
    };

    let created = admin::import_products(&repo, &admin_user(), form)
        .expect("expected import to succeed");
    assert_eq!(created, 2);

    let (total, items) = repo
        .list_summaries(ProductListQuery::new())
        .expect("list products");
    assert_eq!(total, 2);
    let mut names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    names.sort();
    assert_eq!(names, ["Galaxy S24", "iPhone 15"]);
}

#[test]
fn register_then_login_round_trip() {
    let test_db = common::TestDb::new("service_register_then_login.db");
    let repo = DieselRepository::new(test_db.pool());

    let registered = auth::register_user(
        &repo,
        RegisterForm {
            full_name: "Nguyễn Văn An".to_string(),
            email: "An.Nguyen@MobiStore.vn".to_string(),
            password: "mat-khau-an-toan".to_string(),
            password_confirm: "mat-khau-an-toan".to_string(),
        },
    )
    .expect("expected registration to succeed");
    assert_eq!(registered.email, "an.nguyen@mobistore.vn");

    let session = auth::login_user(
        &repo,
        LoginForm {
            email: "an.nguyen@mobistore.vn".to_string(),
            password: "mat-khau-an-toan".to_string(),
        },
    )
    .expect("expected login to succeed");
    assert_eq!(session.id, registered.id);
    assert_eq!(session.name.as_deref(), Some("Nguyễn Văn An"));
    assert!(!session.is_admin);

    let wrong_password = auth::login_user(
        &repo,
        LoginForm {
            email: "an.nguyen@mobistore.vn".to_string(),
            password: "doan-mo".to_string(),
        },
    );
    assert!(matches!(wrong_password, Err(ServiceError::Unauthorized)));

    let duplicate = auth::register_user(
        &repo,
        RegisterForm {
            full_name: "Người khác".to_string(),
            email: "an.nguyen@mobistore.vn".to_string(),
            password: "mat-khau-khac".to_string(),
            password_confirm: "mat-khau-khac".to_string(),
        },
    );
    assert!(matches!(duplicate, Err(ServiceError::Conflict)));
}

#[test]
fn profile_update_and_password_change() {
    let test_db = common::TestDb::new("service_profile_update_and_password.db");
    let repo = DieselRepository::new(test_db.pool());

    auth::register_user(
        &repo,
        RegisterForm {
            full_name: "Nguyễn Văn An".to_string(),
            email: "an@mobistore.vn".to_string(),
            password: "mat-khau-cu-1".to_string(),
            password_confirm: "mat-khau-cu-1".to_string(),
        },
    )
    .expect("expected registration to succeed");
    let session = auth::login_user(
        &repo,
        LoginForm {
            email: "an@mobistore.vn".to_string(),
            password: "mat-khau-cu-1".to_string(),
        },
    )
    .expect("expected login to succeed");

    let updated = profile::update_profile(
        &repo,
        &session,
        UpdateProfileForm {
            full_name: Some("Nguyễn Văn An".to_string()),
            phone: Some("0901234567".to_string()),
        },
    )
    .expect("expected profile update to succeed");
    assert_eq!(updated.phone.as_deref(), Some("0901234567"));

    let loaded = profile::load_profile_page(&repo, &session).expect("expected profile page");
    assert_eq!(loaded.phone.as_deref(), Some("0901234567"));

    let wrong_current = profile::change_password(
        &repo,
        &session,
        ChangePasswordForm {
            current_password: "doan-mo".to_string(),
            new_password: "mat-khau-moi-1".to_string(),
            new_password_confirm: "mat-khau-moi-1".to_string(),
        },
    );
    match wrong_current {
        Err(ServiceError::Form(message)) => {
            assert_eq!(message, "Mật khẩu hiện tại không đúng.");
        }
        other => panic!("expected form error, got {other:?}"),
    }

    profile::change_password(
        &repo,
        &session,
        ChangePasswordForm {
            current_password: "mat-khau-cu-1".to_string(),
            new_password: "mat-khau-moi-1".to_string(),
            new_password_confirm: "mat-khau-moi-1".to_string(),
        },
    )
    .expect("expected password change to succeed");

    let old_password = auth::login_user(
        &repo,
        LoginForm {
            email: "an@mobistore.vn".to_string(),
            password: "mat-khau-cu-1".to_string(),
        },
    );
    assert!(matches!(old_password, Err(ServiceError::Unauthorized)));

    auth::login_user(
        &repo,
        LoginForm {
            email: "an@mobistore.vn".to_string(),
            password: "mat-khau-moi-1".to_string(),
        },
    )
    .expect("expected login with the new password to succeed");
}

#[test]
fn profile_page_reports_stale_identity() {
    let test_db = common::TestDb::new("service_profile_stale_identity.db");
    let repo = DieselRepository::new(test_db.pool());

    let ghost = CurrentUser {
        id: "tai-khoan-da-xoa".to_string(),
        email: "ghost@example.com".to_string(),
        name: None,
        is_admin: false,
    };

    let result = profile::load_profile_page(&repo, &ghost);

    assert!(matches!(result, Err(ServiceError::NotFound)));
}
