//! Shared test utilities for the catalina bootstrap workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`archive`]: writing small archives for repository fixtures
//! - [`install`]: [`TestInstall`] builder for a temporary install tree

pub mod archive;
pub mod install;

pub use install::TestInstall;
