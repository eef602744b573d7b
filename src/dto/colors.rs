use serde::Serialize;

use crate::domain::color::ColorOption;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDto {
    pub id: String,
    pub name: String,
    pub hex: String,
    pub in_stock: bool,
}

impl From<ColorOption> for ColorDto {
    fn from(value: ColorOption) -> Self {
        Self {
            id: value.id.into_inner(),
            name: value.name.into_inner(),
            hex: value.hex.into_inner(),
            in_stock: value.in_stock,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ColorListDto {
    pub colors: Vec<ColorDto>,
}
