use crate::domain::session::AdminSession;
use crate::forms::session::LoginForm;

use super::{ServiceError, ServiceResult};

/// Check the submitted password against the configured admin secret.
pub fn login(form: &LoginForm, admin_password: &str) -> ServiceResult<AdminSession> {
    if admin_password.is_empty() || form.password != admin_password {
        log::warn!("Rejected admin login attempt");
        return Err(ServiceError::Unauthorized);
    }

    log::info!("Admin logged in");
    Ok(AdminSession::authenticated())
}

pub fn session_status(session: &AdminSession) -> bool {
    session.is_authenticated()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str) -> LoginForm {
        LoginForm {
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_matching_password() {
        assert_eq!(
            login(&form("rainbow"), "rainbow"),
            Ok(AdminSession::authenticated())
        );
    }

    #[test]
    fn rejects_wrong_password() {
        assert_eq!(
            login(&form("guess"), "rainbow"),
            Err(ServiceError::Unauthorized)
        );
    }

    #[test]
    fn empty_secret_never_matches() {
        assert_eq!(login(&form(""), ""), Err(ServiceError::Unauthorized));
    }
}
