//! Single-active-session guard.
//!
//! Every authenticated request must present the one token on record for its
//! user. A different token means a newer login happened elsewhere, so the
//! account is logged out everywhere and the request is rejected.

pub mod rejection;
pub mod request;
pub mod resolver;
pub mod session_guard;

pub use rejection::{GuardOutcome, GuardRejection, RejectionBody};
pub use request::{RequestInspector, path_matches};
pub use resolver::{AuthenticationResolver, RequestIdentity};
pub use session_guard::SessionGuard;
