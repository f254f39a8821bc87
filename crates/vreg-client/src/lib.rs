//! VReg - Client SDK
//!
//! Typed async client for the vehicle registry REST API. Sessions are kept
//! in a pluggable store with separate user and admin slots; every request
//! goes through a gateway that attaches the active bearer token and
//! refreshes it once on a 401 before giving up. Resource methods are thin
//! typed wrappers over the backend routes.

pub mod client;
pub mod error;
pub mod gateway;
pub mod multipart;
pub mod store;

mod admin;
mod auth;
mod dashboard;
mod owners;
mod vehicles;

pub use client::Client;
pub use error::{ApiError, FieldErrors, Result};
pub use gateway::{ApiRequest, Gateway, DEFAULT_TIMEOUT};
pub use multipart::FormSpec;
pub use store::{FileStore, MemoryStore, SessionStore, StoreError};
