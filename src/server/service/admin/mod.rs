//! First-admin bootstrap.
//!
//! While no user holds the Admin role, startup generates a one-time code. Whoever registers
//! with that code becomes the first administrator.

pub mod code;
