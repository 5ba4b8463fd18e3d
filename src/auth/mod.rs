//! Local accounts and the signed-in session pointer.

mod models;
mod store;

pub use models::User;
pub use store::{AuthError, CredentialStore};
