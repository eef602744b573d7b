use serde::{Deserialize, Serialize};

use crate::domain::types::{ColorId, ColorName, ColorValue};

/// A selectable finish for catalog items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorOption {
    pub id: ColorId,
    pub name: ColorName,
    pub hex: ColorValue,
    pub in_stock: bool,
}
