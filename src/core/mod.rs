//! Shared core: data model, transport encoding and constants.
//!
//! Everything here compiles for both the native server and the browser build.

pub mod encoding;
pub mod model;
pub mod paths;
