//! Value objects carried by the storefront domain entities.
//!
//! Entities hold these wrappers instead of raw strings and floats, so a
//! catalog item, color or order that exists in memory has already passed the
//! basic shape checks (non-empty names, finite totals, known enum values).

use std::fmt::{Display, Formatter};

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A numeric value required to be non-negative was negative or not finite.
    #[error("{0} must be a finite number, zero or greater")]
    NegativeNumber(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// An enumerated value was not one of the accepted spellings.
    #[error("unknown {field}: {value}")]
    UnknownVariant { field: &'static str, value: String },
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Milliseconds since the Unix epoch, used as the time part of generated ids.
fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generates a trimmed, non-empty string newtype.
///
/// Deserialization goes through `TryFrom<String>` so that JSON and database
/// values are validated the same way as values built in code.
macro_rules! text_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

/// Generates a finite, non-negative `f64` newtype.
macro_rules! amount_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
        #[serde(try_from = "f64", into = "f64")]
        pub struct $name(f64);

        impl $name {
            pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
                if value.is_finite() && value >= 0.0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            pub const fn get(self) -> f64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<f64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }
    };
}

text_newtype!(
    CatalogItemId,
    "Stable identifier of a catalog item. Never changes after creation.",
    "toy id"
);
text_newtype!(ItemName, "Display name of a catalog item.", "name");
text_newtype!(
    ImageRef,
    "Image reference of a catalog item: an absolute URL or a storage path.",
    "image url"
);
text_newtype!(Tag, "Free-form catalog tag.", "tag");
text_newtype!(ColorId, "Identifier of a color option.", "color id");
text_newtype!(ColorName, "Display name of a color option.", "color name");
text_newtype!(
    ColorValue,
    "Swatch value of a color option: a hex string or a CSS gradient.",
    "color value"
);
text_newtype!(OrderId, "Identifier assigned to an order at intake.", "order id");
text_newtype!(BuyerName, "Display name supplied by the buyer.", "buyer name");
text_newtype!(
    BuyerContact,
    "Email address or phone number supplied by the buyer.",
    "buyer contact"
);

amount_newtype!(
    OrderTotal,
    "Client-supplied order total. Pay-what-you-want, so zero is allowed.",
    "total"
);
amount_newtype!(PrintHours, "Estimated build time in hours.", "print time");

impl CatalogItemId {
    /// Time-based identifier used when the admin does not supply one.
    pub fn generate() -> Self {
        Self(format!("toy-{}", now_millis()))
    }
}

impl ColorId {
    /// Time-based identifier; `index` keeps ids distinct within one save.
    pub fn generate(index: usize) -> Self {
        Self(format!("color-{}-{index}", now_millis()))
    }
}

/// Upper bound (exclusive) of the random part of an order id.
pub const ORDER_ID_DISAMBIGUATOR: u32 = 1_000_000;

impl OrderId {
    /// Builds `order-<unix millis>-<random>`.
    ///
    /// Uniqueness is probabilistic: two orders created in the same
    /// millisecond collide with probability `1 / ORDER_ID_DISAMBIGUATOR`.
    pub fn generate() -> Self {
        let suffix = rand::rng().random_range(0..ORDER_ID_DISAMBIGUATOR);
        Self(format!("order-{}-{suffix}", now_millis()))
    }
}

/// How the seller should reach the buyer back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
}

impl BuyerContact {
    /// Contacts containing `@` are treated as email addresses, everything else as phone numbers.
    pub fn kind(&self) -> ContactKind {
        if self.0.contains('@') {
            ContactKind::Email
        } else {
            ContactKind::Phone
        }
    }
}

/// Validated `http(s)` link to the page an item was sourced from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SourceUrl(String);

impl SourceUrl {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "source url")?;
        if !trimmed.as_str().validate_url() {
            return Err(TypeConstraintError::InvalidUrl("source url"));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SourceUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SourceUrl {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SourceUrl> for String {
    fn from(value: SourceUrl) -> Self {
        value.0
    }
}

/// Build difficulty shown on the catalog card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl TryFrom<&str> for Difficulty {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(TypeConstraintError::UnknownVariant {
                field: "difficulty",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.as_str().to_string()
    }
}

/// Licensing state of a catalog item.
///
/// `IpRisk` is the restricted value: such items are hidden from the public
/// catalog but remain visible to the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum LicenseStatus {
    #[default]
    Clear,
    IpRisk,
}

impl LicenseStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::IpRisk => "ip-risk",
        }
    }

    pub const fn is_restricted(self) -> bool {
        matches!(self, Self::IpRisk)
    }
}

impl TryFrom<&str> for LicenseStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clear" => Ok(Self::Clear),
            "ip-risk" => Ok(Self::IpRisk),
            other => Err(TypeConstraintError::UnknownVariant {
                field: "license status",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LicenseStatus {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<LicenseStatus> for String {
    fn from(value: LicenseStatus) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_text_values() {
        let name = BuyerName::new("  Alex  ").unwrap();
        assert_eq!(name.as_str(), "Alex");
    }

    #[test]
    fn rejects_blank_text_values() {
        assert_eq!(
            BuyerContact::new("   ").unwrap_err(),
            TypeConstraintError::EmptyString("buyer contact")
        );
    }

    #[test]
    fn contact_kind_is_decided_by_at_sign() {
        assert_eq!(
            BuyerContact::new("alex@example.com").unwrap().kind(),
            ContactKind::Email
        );
        assert_eq!(
            BuyerContact::new("+1 555 0100").unwrap().kind(),
            ContactKind::Phone
        );
    }

    #[test]
    fn order_total_allows_zero_and_rejects_negative() {
        assert_eq!(OrderTotal::new(0.0).unwrap().get(), 0.0);
        assert_eq!(
            OrderTotal::new(-1.0).unwrap_err(),
            TypeConstraintError::NegativeNumber("total")
        );
        assert!(OrderTotal::new(f64::NAN).is_err());
    }

    #[test]
    fn order_ids_follow_the_intake_format() {
        let id = OrderId::generate();
        let parts: Vec<&str> = id.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "order");
        assert!(parts[1].parse::<i64>().is_ok());
        let suffix: u32 = parts[2].parse().unwrap();
        assert!(suffix < ORDER_ID_DISAMBIGUATOR);
    }

    #[test]
    fn generated_catalog_and_color_ids_are_prefixed() {
        assert!(CatalogItemId::generate().as_str().starts_with("toy-"));
        assert!(ColorId::generate(3).as_str().ends_with("-3"));
    }

    #[test]
    fn parses_license_status() {
        assert_eq!(
            LicenseStatus::try_from("ip-risk").unwrap(),
            LicenseStatus::IpRisk
        );
        assert!(LicenseStatus::IpRisk.is_restricted());
        assert!(LicenseStatus::try_from("maybe").is_err());
    }

    #[test]
    fn difficulty_round_trips_through_serde() {
        let value = serde_json::to_value(Difficulty::Hard).unwrap();
        assert_eq!(value, serde_json::json!("hard"));
        let parsed: Difficulty = serde_json::from_value(serde_json::json!("Medium")).unwrap();
        assert_eq!(parsed, Difficulty::Medium);
    }

    #[test]
    fn validates_source_urls() {
        assert!(SourceUrl::new("https://www.printables.com/model/1").is_ok());
        assert_eq!(
            SourceUrl::new("not-a-url").unwrap_err(),
            TypeConstraintError::InvalidUrl("source url")
        );
    }
}
