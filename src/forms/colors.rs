use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::color::ColorOption;
use crate::domain::types::{ColorId, ColorName, ColorValue, TypeConstraintError};

/// One color as edited in the admin panel.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hex: String,
    #[serde(default)]
    pub in_stock: Option<bool>,
}

/// Body of `POST`/`PUT /admin/colors`: the complete new registry.
#[derive(Debug, Deserialize)]
pub struct ReplaceColorsForm {
    pub colors: Vec<ColorForm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceColorsPayload {
    pub colors: Vec<ColorOption>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplaceColorsFormError {
    #[error("Color {position} contains invalid data: {message}")]
    TypeConstraint { position: usize, message: String },
    #[error("Duplicate color id: {0}")]
    DuplicateId(String),
}

impl TryFrom<ReplaceColorsForm> for ReplaceColorsPayload {
    type Error = ReplaceColorsFormError;

    /// Validates the whole set up front: a full replace must not run with a
    /// partially valid registry.
    fn try_from(value: ReplaceColorsForm) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        let mut colors = Vec::with_capacity(value.colors.len());

        for (index, color) in value.colors.into_iter().enumerate() {
            let invalid = |e: TypeConstraintError| ReplaceColorsFormError::TypeConstraint {
                position: index + 1,
                message: e.to_string(),
            };

            let id = match color.id.filter(|id| !id.trim().is_empty()) {
                Some(id) => ColorId::new(id).map_err(invalid)?,
                None => ColorId::generate(index),
            };
            if !seen.insert(id.clone()) {
                return Err(ReplaceColorsFormError::DuplicateId(id.into_inner()));
            }

            colors.push(ColorOption {
                id,
                name: ColorName::new(color.name).map_err(invalid)?,
                hex: ColorValue::new(color.hex).map_err(invalid)?,
                in_stock: color.in_stock.unwrap_or(true),
            });
        }

        Ok(Self { colors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(body: serde_json::Value) -> ReplaceColorsForm {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn fills_missing_ids_and_stock_flags() {
        let payload = ReplaceColorsPayload::try_from(form(serde_json::json!({
            "colors": [
                {"name": "Pink", "hex": "#ec4899"},
                {"id": "rainbow", "name": "Rainbow", "hex": "linear-gradient(90deg,red,blue)", "inStock": false}
            ]
        })))
        .unwrap();

        assert!(payload.colors[0].id.as_str().starts_with("color-"));
        assert!(payload.colors[0].in_stock);
        assert_eq!(payload.colors[1].id, "rainbow");
        assert!(!payload.colors[1].in_stock);
    }

    #[test]
    fn empty_set_is_valid() {
        let payload =
            ReplaceColorsPayload::try_from(form(serde_json::json!({"colors": []}))).unwrap();
        assert!(payload.colors.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = ReplaceColorsPayload::try_from(form(serde_json::json!({
            "colors": [
                {"id": "pink", "name": "Pink", "hex": "#f0f"},
                {"id": "pink", "name": "Hot Pink", "hex": "#f09"}
            ]
        })));
        assert_eq!(
            result,
            Err(ReplaceColorsFormError::DuplicateId("pink".into()))
        );
    }

    #[test]
    fn rejects_blank_names() {
        let result = ReplaceColorsPayload::try_from(form(serde_json::json!({
            "colors": [{"name": "", "hex": "#fff"}]
        })));
        assert!(matches!(
            result,
            Err(ReplaceColorsFormError::TypeConstraint { position: 1, .. })
        ));
    }
}
