//! Configuration types and options for the application.
//!
//! This module contains the run configuration passed into the locator and
//! merger, the auxiliary extension allow-list, and the persistent config file.

pub mod extensions;
pub mod file;
pub mod sync;

pub use extensions::CopyExtensionSet;
pub use file::FileConfig;
pub use sync::SyncConfig;
