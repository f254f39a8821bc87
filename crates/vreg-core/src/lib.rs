//! VReg - Core Library
//!
//! Pure data types shared by the vreg client and CLI: wire models for the
//! vehicle registry API, session token types, and the document expiry rules.
//! No I/O and no async here.

pub mod claims;
pub mod expiry;
pub mod session;
pub mod types;

pub use claims::*;
pub use expiry::*;
pub use session::*;
pub use types::*;
