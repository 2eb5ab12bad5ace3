//! Project representation and listing functionality.
//!
//! This module contains the data structures describing homebrew projects and
//! the ordered collections produced by the locator.
//!
//! ## Main Parts
//!
//! - [`Project`] - A project and its compiled binary, local or on the volume
//! - [`Projects`] - An ordered listing with 1-based selection
//! - [`ProjectLocation`] - Whether a project lives in the workspace or on the volume

#[allow(clippy::module_inception)]
pub mod project;
pub mod projects;

pub use project::{Project, ProjectLocation};
pub use projects::Projects;
