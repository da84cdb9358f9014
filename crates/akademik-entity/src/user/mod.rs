//! User domain entities.

pub mod model;
pub mod role;
pub mod session_state;

pub use model::{NewUser, User};
pub use role::UserRole;
pub use session_state::SessionState;
