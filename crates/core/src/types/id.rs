//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use qr_codes_core::define_id;
/// define_id!(QrCodeId);
/// define_id!(ScanId);
///
/// let qr_code_id = QrCodeId::new(1);
/// let scan_id = ScanId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: QrCodeId = scan_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <i32 as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <i32 as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

define_id!(QrCodeId);

/// The path segment reserved for a QR code that has not been saved yet.
pub const NEW_SENTINEL: &str = "new";

/// A reference to a QR code as it appears in a route: either the reserved
/// `"new"` sentinel or the id of a persisted record.
///
/// The sentinel is never a real id; parsing `"new"` never yields
/// [`QrCodeRef::Existing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QrCodeRef {
    /// Not yet persisted.
    New,
    /// A persisted QR code.
    Existing(QrCodeId),
}

impl QrCodeRef {
    /// Returns the persisted id, if any.
    #[must_use]
    pub const fn id(self) -> Option<QrCodeId> {
        match self {
            Self::New => None,
            Self::Existing(id) => Some(id),
        }
    }
}

/// Error returned when a route segment is neither `"new"` nor a valid id.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid QR code id: {0}")]
pub struct QrCodeRefError(String);

impl FromStr for QrCodeRef {
    type Err = QrCodeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NEW_SENTINEL {
            return Ok(Self::New);
        }

        s.parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(|id| Self::Existing(QrCodeId::new(id)))
            .ok_or_else(|| QrCodeRefError(s.to_owned()))
    }
}

impl fmt::Display for QrCodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str(NEW_SENTINEL),
            Self::Existing(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for QrCodeRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QrCodeRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
