//! Integration tests for the QR code lifecycle.
//!
//! These drive the manager end to end over the in-memory store and a fake
//! product catalog, so they need neither a database nor Shopify.

use qr_codes_admin::models::{Field, QrCodeDetail, QrCodeDraft, QrCodeView};
use qr_codes_admin::services::QrCodeError;
use qr_codes_admin::services::qr_codes::{
    Intent, Navigation, Outcome, Removal, Submission, SubmitIntent,
};
use qr_codes_core::{Destination, QrCodeId, QrCodeRef, ShopDomain};
use qr_codes_integration_tests::{FakeCatalog, draft, manager, shop};

fn store_shop() -> ShopDomain {
    shop("snowboards.myshopify.com")
}

fn catalog() -> FakeCatalog {
    FakeCatalog::new()
        .with_product("gid://1", "Red Snowboard", "red-snowboard")
        .with_product("gid://2", "Blue Snowboard", "blue-snowboard")
}

fn saved(submission: Submission) -> QrCodeId {
    match submission {
        Submission::Saved(id) => id,
        Submission::Rejected(errors) => panic!("unexpected rejection: {errors:?}"),
    }
}

fn existing(detail: QrCodeDetail) -> QrCodeView {
    match detail {
        QrCodeDetail::Existing(view) => *view,
        QrCodeDetail::Template(_) => panic!("expected a stored QR code"),
    }
}

// =============================================================================
// Create & Read
// =============================================================================

#[tokio::test]
async fn test_create_then_read_returns_submitted_fields() {
    let (manager, _store) = manager();
    let shop = store_shop();
    let catalog = catalog();

    let id = saved(
        manager
            .submit(
                &shop,
                SubmitIntent::Create,
                draft("Red Snowboard QR", "gid://1", "red-snowboard", "product"),
            )
            .await
            .expect("create"),
    );
    assert_eq!(id, QrCodeId::new(1));

    let view = existing(
        manager
            .get(&shop, QrCodeRef::Existing(id), &catalog)
            .await
            .expect("read"),
    );
    assert_eq!(view.qr_code.title, "Red Snowboard QR");
    assert_eq!(view.qr_code.product_id, "gid://1");
    assert_eq!(view.qr_code.product_handle, "red-snowboard");
    assert_eq!(view.qr_code.destination, Destination::Product);
    assert_eq!(view.qr_code.scans, 0);
    assert_eq!(view.product_title, "Red Snowboard");
    assert!(!view.product_deleted);
    assert_eq!(
        view.destination_url,
        "https://snowboards.myshopify.com/products/red-snowboard"
    );
    assert_eq!(view.public_url, "https://qr.example.test/qrcodes/1/scan");
}

#[tokio::test]
async fn test_read_new_returns_template_without_touching_store() {
    let (manager, store) = manager();
    let catalog = catalog();

    let detail = manager
        .get(&store_shop(), QrCodeRef::New, &catalog)
        .await
        .expect("template");

    let QrCodeDetail::Template(template) = detail else {
        panic!("expected the blank template");
    };
    assert_eq!(template.destination, Destination::Product);
    assert_eq!(template.title, "");
    assert!(store.is_empty().await);
    assert_eq!(catalog.lookups(), 0);
}

#[tokio::test]
async fn test_read_unknown_id_is_not_found() {
    let (manager, _store) = manager();

    let err = manager
        .get(&store_shop(), QrCodeRef::Existing(QrCodeId::new(42)), &catalog())
        .await
        .unwrap_err();
    assert!(matches!(err, QrCodeError::NotFound(id) if id == QrCodeId::new(42)));
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_invalid_draft_is_rejected_and_nothing_is_stored() {
    let (manager, store) = manager();

    let submission = manager
        .submit(&store_shop(), SubmitIntent::Create, QrCodeDraft::default())
        .await
        .expect("validation is not a storage error");

    let Submission::Rejected(errors) = submission else {
        panic!("expected a rejection");
    };
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(Field::Title), Some("Title is required"));
    assert_eq!(errors.get(Field::ProductId), Some("Product is required"));
    assert_eq!(errors.get(Field::Destination), Some("Destination is required"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_rejected_update_leaves_stored_code_unchanged() {
    let (manager, _store) = manager();
    let shop = store_shop();
    let catalog = catalog();

    let id = saved(
        manager
            .submit(
                &shop,
                SubmitIntent::Create,
                draft("Original", "gid://1", "red-snowboard", "product"),
            )
            .await
            .expect("create"),
    );

    let submission = manager
        .submit(
            &shop,
            SubmitIntent::Update(id),
            draft("Renamed", "gid://1", "red-snowboard", "checkout"),
        )
        .await
        .expect("update");
    let Submission::Rejected(errors) = submission else {
        panic!("expected a rejection");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Destination]);

    let view = existing(
        manager
            .get(&shop, QrCodeRef::Existing(id), &catalog)
            .await
            .expect("read"),
    );
    assert_eq!(view.qr_code.title, "Original");
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_to_cart_changes_destination_url_only() {
    let (manager, _store) = manager();
    let shop = store_shop();
    let catalog = catalog();

    let id = saved(
        manager
            .submit(
                &shop,
                SubmitIntent::Create,
                draft("Red Snowboard QR", "gid://1", "red-snowboard", "product"),
            )
            .await
            .expect("create"),
    );
    let before = existing(
        manager
            .get(&shop, QrCodeRef::Existing(id), &catalog)
            .await
            .expect("read"),
    );

    let id_after = saved(
        manager
            .submit(
                &shop,
                SubmitIntent::Update(id),
                draft("Red Snowboard QR", "gid://1", "red-snowboard", "cart"),
            )
            .await
            .expect("update"),
    );
    assert_eq!(id_after, id);

    let after = existing(
        manager
            .get(&shop, QrCodeRef::Existing(id), &catalog)
            .await
            .expect("read"),
    );
    assert_eq!(after.qr_code.title, "Red Snowboard QR");
    assert_eq!(after.qr_code.product_id, "gid://1");
    assert_eq!(after.qr_code.destination, Destination::Cart);
    assert_eq!(after.qr_code.created_at, before.qr_code.created_at);
    assert_eq!(after.qr_code.shop, before.qr_code.shop);
    assert!(before.destination_url.contains("/products/"));
    assert!(after.destination_url.contains("/cart"));
    assert_ne!(after.destination_url, before.destination_url);
}

#[tokio::test]
async fn test_update_with_variant_links_straight_to_cart_line() {
    let (manager, _store) = manager();
    let shop = store_shop();

    let mut cart_draft = draft("Cart QR", "gid://shopify/Product/7", "board", "cart");
    cart_draft.product_variant_id = Some("gid://shopify/ProductVariant/4242".to_string());

    let id = saved(
        manager
            .submit(&shop, SubmitIntent::Create, cart_draft)
            .await
            .expect("create"),
    );

    let url = manager.scan(id).await.expect("scan");
    assert_eq!(url, "https://snowboards.myshopify.com/cart/4242:1");
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let (manager, store) = manager();

    let err = manager
        .submit(
            &store_shop(),
            SubmitIntent::Update(QrCodeId::new(9)),
            draft("Ghost", "gid://1", "red-snowboard", "product"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, QrCodeError::NotFound(id) if id == QrCodeId::new(9)));
    assert!(store.is_empty().await);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_read_is_not_found() {
    let (manager, _store) = manager();
    let shop = store_shop();
    let catalog = catalog();

    let id = saved(
        manager
            .submit(
                &shop,
                SubmitIntent::Create,
                draft("Doomed", "gid://1", "red-snowboard", "product"),
            )
            .await
            .expect("create"),
    );

    assert_eq!(manager.remove(&shop, id).await.expect("delete"), Removal::Deleted);
    assert!(matches!(
        manager.get(&shop, QrCodeRef::Existing(id), &catalog).await,
        Err(QrCodeError::NotFound(_))
    ));
    assert_eq!(
        manager.remove(&shop, id).await.expect("second delete"),
        Removal::AlreadyGone
    );
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let (manager, _store) = manager();
    let shop = store_shop();

    let first = saved(
        manager
            .submit(&shop, SubmitIntent::Create, draft("A", "gid://1", "a", "product"))
            .await
            .expect("create"),
    );
    manager.remove(&shop, first).await.expect("delete");

    let second = saved(
        manager
            .submit(&shop, SubmitIntent::Create, draft("B", "gid://1", "b", "product"))
            .await
            .expect("create"),
    );
    assert!(second > first);
}

// =============================================================================
// List & Enrichment
// =============================================================================

#[tokio::test]
async fn test_list_marks_only_the_deleted_product_row() {
    let (manager, _store) = manager();
    let shop = store_shop();
    let catalog = catalog().with_failure("gid://broken");

    for (title, product, handle) in [
        ("Red QR", "gid://1", "red-snowboard"),
        ("Gone QR", "gid://999", "retired-board"),
        ("Broken QR", "gid://broken", "broken-board"),
        ("Blue QR", "gid://2", "blue-snowboard"),
    ] {
        manager
            .submit(&shop, SubmitIntent::Create, draft(title, product, handle, "product"))
            .await
            .expect("create");
    }

    let rows = manager.list(&shop, &catalog).await.expect("list");
    let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Blue QR", "Broken QR", "Gone QR", "Red QR"]);

    let deleted: Vec<_> = rows
        .iter()
        .filter(|r| r.product_deleted)
        .map(|r| r.product_title.as_str())
        .collect();
    assert_eq!(deleted, vec!["broken-board", "retired-board"]);

    let blue = rows.first().expect("blue row");
    assert_eq!(blue.product_title, "Blue Snowboard");
    assert_eq!(
        blue.product_image.as_deref(),
        Some("https://cdn.example.test/blue-snowboard.png")
    );
    assert_eq!(catalog.lookups(), 4);
}

#[tokio::test]
async fn test_list_of_empty_shop_is_empty() {
    let (manager, _store) = manager();
    let catalog = catalog();

    let rows = manager.list(&store_shop(), &catalog).await.expect("list");
    assert!(rows.is_empty());
    assert_eq!(catalog.lookups(), 0);
}

// =============================================================================
// Dispatch & Scan
// =============================================================================

#[tokio::test]
async fn test_dispatch_navigation() {
    let (manager, _store) = manager();
    let shop = store_shop();
    let catalog = catalog();

    let outcome = manager
        .dispatch(
            &shop,
            Intent::Submit {
                target: QrCodeRef::New.into(),
                draft: draft("Red QR", "gid://1", "red-snowboard", "product"),
            },
            &catalog,
        )
        .await
        .expect("submit");
    let Outcome::Redirect(Navigation::QrCode(id)) = outcome else {
        panic!("expected a redirect to the new code");
    };

    let outcome = manager
        .dispatch(&shop, Intent::Delete(id), &catalog)
        .await
        .expect("delete");
    assert!(matches!(outcome, Outcome::Redirect(Navigation::List)));

    let outcome = manager
        .dispatch(&shop, Intent::Delete(id), &catalog)
        .await
        .expect("delete again");
    assert!(matches!(outcome, Outcome::Redirect(Navigation::List)));
}

#[tokio::test]
async fn test_scan_counts_and_resolves() {
    let (manager, _store) = manager();
    let shop = store_shop();
    let catalog = catalog();

    let id = saved(
        manager
            .submit(
                &shop,
                SubmitIntent::Create,
                draft("Red QR", "gid://1", "red-snowboard", "product"),
            )
            .await
            .expect("create"),
    );

    for _ in 0..3 {
        let url = manager.scan(id).await.expect("scan");
        assert_eq!(url, "https://snowboards.myshopify.com/products/red-snowboard");
    }

    let view = existing(
        manager
            .get(&shop, QrCodeRef::Existing(id), &catalog)
            .await
            .expect("read"),
    );
    assert_eq!(view.qr_code.scans, 3);

    assert!(matches!(
        manager.scan(QrCodeId::new(404)).await,
        Err(QrCodeError::NotFound(_))
    ));
}
