//! Authentication and authorization
//!
//! - [`credentials`] - Credential Store (register, verify password)
//! - [`JwtService`] - Token Service
//! - [`require_auth`] / [`optional_auth`] - request middleware
//! - [`CurrentPrincipal`] / [`ensure_owner`] - ownership predicate

pub mod credentials;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod principal;

pub use jwt::{
    Claims, JwtConfig, JwtError, JwtService, MIN_SECRET_LEN, PrincipalKind,
    generate_secure_printable_jwt_secret,
};
pub use middleware::{optional_auth, require_auth};
pub use principal::{CurrentPrincipal, ensure_owner};
