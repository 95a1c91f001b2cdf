//! Validation for submitted QR code drafts.
//!
//! Rules are checked independently and every violation is reported, so the
//! merchant sees all problems with a form at once.

use qr_codes_core::Destination;

use crate::models::{Field, FieldErrors, QrCodeDraft, QrCodeFields};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const PRODUCT_REQUIRED: &str = "Product is required";
pub const DESTINATION_REQUIRED: &str = "Destination is required";

/// Check a draft, returning the field errors if there are any.
#[must_use]
pub fn validate(draft: &QrCodeDraft) -> Option<FieldErrors> {
    let mut errors = FieldErrors::default();

    if is_blank(draft.title.as_deref()) {
        errors.insert(Field::Title, TITLE_REQUIRED);
    }

    if is_blank(draft.product_id.as_deref()) {
        errors.insert(Field::ProductId, PRODUCT_REQUIRED);
    }

    if parse_destination(draft).is_none() {
        errors.insert(Field::Destination, DESTINATION_REQUIRED);
    }

    (!errors.is_empty()).then_some(errors)
}

/// Validate a draft and convert it into a storable field set.
///
/// Absent optional fields become empty strings.
///
/// # Errors
///
/// Returns the field errors if any rule fails.
pub fn parse(draft: QrCodeDraft) -> Result<QrCodeFields, FieldErrors> {
    let draft = draft.normalized();
    if let Some(errors) = validate(&draft) {
        return Err(errors);
    }

    let destination = parse_destination(&draft).unwrap_or_default();
    Ok(QrCodeFields {
        title: draft.title.unwrap_or_default(),
        product_id: draft.product_id.unwrap_or_default(),
        product_variant_id: draft.product_variant_id.unwrap_or_default(),
        product_handle: draft.product_handle.unwrap_or_default(),
        destination,
    })
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

fn parse_destination(draft: &QrCodeDraft) -> Option<Destination> {
    draft.destination.as_deref()?.parse().ok()
}
