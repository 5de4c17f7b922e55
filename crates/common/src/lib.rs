//! Utilities shared by the certificate verification crates and their consumers.

pub mod logging;
