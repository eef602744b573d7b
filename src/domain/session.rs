/// Outcome of the admin cookie check for the current request.
///
/// Built once per request by the HTTP layer and handed to every admin-scoped
/// service function, which must call [`AdminSession::is_authenticated`]
/// before touching any store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    authenticated: bool,
}

impl AdminSession {
    pub const fn new(authenticated: bool) -> Self {
        Self { authenticated }
    }

    pub const fn authenticated() -> Self {
        Self::new(true)
    }

    pub const fn anonymous() -> Self {
        Self::new(false)
    }

    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
