//! # homebrew-sync
//!
//! Scaffolding and SD/USB synchronisation for Wii homebrew projects.
//!
//! This library provides the core functionality for the homebrew-sync CLI
//! tool: discovering projects in a local workspace and on a mounted volume,
//! and copying a project's boot binary and data assets into the
//! `apps/<name>/` layout the Homebrew Channel expects.

pub mod config;
pub mod error;
pub mod locator;
pub mod merger;
pub mod output;
pub mod platform;
pub mod project;
pub mod scaffold;
pub mod volume;
