//! Filesystem primitives for the catalina bootstrap resolver
//!
//! Provides normalized path handling, canonicalization with an absolute-path
//! fallback, lenient text decoding, and the well-known install layout.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use constants::InstallPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
