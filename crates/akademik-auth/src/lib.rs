//! # akademik-auth
//!
//! Authentication and single-active-session enforcement.
//!
//! ## Modules
//!
//! - `guard` - the session guard ("last login wins, all other sessions die")
//! - `jwt` - bearer token issuance and decoding
//! - `password` - Argon2id password hashing
//! - `session` - login, logout and force-logout flows
//! - `store` - identity store trait with Postgres and in-memory backends

pub mod guard;
pub mod jwt;
pub mod password;
pub mod session;
pub mod store;

pub use guard::{
    AuthenticationResolver, GuardOutcome, GuardRejection, RequestIdentity, RequestInspector,
    SessionGuard,
};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use session::{LoginResult, SessionManager};
pub use store::{IdentityStore, MemoryIdentityStore};
