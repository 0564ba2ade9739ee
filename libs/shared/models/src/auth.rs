use serde::{Deserialize, Serialize};

/// Claims carried by an access token. `email` is the identity; there is no
/// server-side session behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated identity attached to a request by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub email: String,
}

/// Outcome of verifying a bearer token. Expiry is only reported for tokens
/// whose signature already checked out.
#[derive(Debug)]
pub enum TokenVerification {
    Valid(Claims),
    Expired,
    Malformed,
}

/// Outcome of resolving an identity to a stored role. `NotFound` and
/// `NotAdmin` both deny admin access but are distinct cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleLookup {
    Admin,
    NotAdmin,
    NotFound,
}
