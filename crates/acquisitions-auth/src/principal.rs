use acquisitions_models::Role;

use crate::claims::Claims;

/// The caller behind a request, derived afresh from its token every time.
/// Anonymous callers and callers with an unverifiable token are guests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub role: Role,
}

impl Principal {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn is_guest(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            id: Some(claims.id),
            email: Some(claims.email),
            role: claims.role,
        }
    }
}
