//! CLI library components for npverify.

pub mod logging;
