use crate::domain::session::AdminSession;
use crate::dto::colors::ColorDto;
use crate::forms::colors::ReplaceColorsPayload;
use crate::repository::{ColorListQuery, ColorReader, ColorWriter};

use super::{ServiceError, ServiceResult};

/// Colors a buyer can pick: in-stock only, ordered by name.
pub fn show_public_colors<R>(repo: &R) -> ServiceResult<Vec<ColorDto>>
where
    R: ColorReader,
{
    match repo.list_colors(ColorListQuery::in_stock()) {
        Ok(colors) => Ok(colors.into_iter().map(ColorDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list colors: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_admin_colors<R>(session: &AdminSession, repo: &R) -> ServiceResult<Vec<ColorDto>>
where
    R: ColorReader,
{
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }

    match repo.list_colors(ColorListQuery::all()) {
        Ok(colors) => Ok(colors.into_iter().map(ColorDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list colors: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Swap the whole registry for `payload.colors`.
pub fn replace_colors<R>(
    payload: ReplaceColorsPayload,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<usize>
where
    R: ColorWriter,
{
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }

    match repo.replace_colors(&payload.colors) {
        Ok(count) => {
            log::info!("Color registry replaced with {count} colors");
            Ok(count)
        }
        Err(e) => {
            log::error!("Failed to replace colors: {e}");
            Err(ServiceError::Internal)
        }
    }
}
