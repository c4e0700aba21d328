pub mod auth;

pub use auth::{AuthenticatedAccount, BearerAuth};
