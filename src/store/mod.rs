//! Client-side state containers
//!
//! - [`storage`]: durable key-value storage for the credential and identity
//! - [`session`]: the authenticated actor (token, identity, admin flag)
//! - [`system`]: backend first-run initialization state
//! - [`monitor`]: background session validity watchdog

pub mod monitor;
pub mod session;
pub mod storage;
pub mod system;
