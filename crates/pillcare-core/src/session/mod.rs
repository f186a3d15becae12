//! Session domain module.
//!
//! - `model`: `Session` and `UserProfile`
//! - `store`: the injected `SessionStore` trait and `InMemorySessionStore`

mod model;
mod store;

pub use model::{Session, UserProfile};
pub use store::{InMemorySessionStore, SessionStore};
