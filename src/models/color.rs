use diesel::prelude::*;

use crate::domain::color::ColorOption;
use crate::domain::types::{ColorId, ColorName, ColorValue, TypeConstraintError};

/// Diesel model representing the `colors` table.
#[derive(Debug, Clone, Identifiable, Queryable, Insertable)]
#[diesel(table_name = crate::schema::colors)]
pub struct Color {
    pub id: String,
    pub name: String,
    pub hex: String,
    pub in_stock: bool,
}

impl TryFrom<Color> for ColorOption {
    type Error = TypeConstraintError;

    fn try_from(color: Color) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ColorId::new(color.id)?,
            name: ColorName::new(color.name)?,
            hex: ColorValue::new(color.hex)?,
            in_stock: color.in_stock,
        })
    }
}

impl From<&ColorOption> for Color {
    fn from(color: &ColorOption) -> Self {
        Self {
            id: color.id.as_str().to_string(),
            name: color.name.as_str().to_string(),
            hex: color.hex.as_str().to_string(),
            in_stock: color.in_stock,
        }
    }
}
