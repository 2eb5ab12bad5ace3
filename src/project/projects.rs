//! Collection management and operations for homebrew projects.
//!
//! This module provides the `Projects` struct which wraps an ordered listing
//! of projects and provides the operations built on that order: numbered
//! printing, index-based selection and the interactive selection prompt.

use anyhow::Result;
use colored::Colorize;
use inquire::{CustomType, validator::Validation};

use crate::error::SyncError;

use super::Project;

/// An ordered listing of projects.
///
/// The order is the one produced by the locator and is what 1-based
/// selection indices refer to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Projects(Vec<Project>);

impl From<Vec<Project>> for Projects {
    fn from(projects: Vec<Project>) -> Self {
        Self(projects)
    }
}

impl<'a> IntoIterator for &'a Projects {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Projects {
    /// Get the number of projects in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.0.iter()
    }

    /// Look up a project by its 1-based listing index.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidSelection`] for `0` or any index past the
    /// end of the listing.
    pub fn get(&self, index: usize) -> Result<&Project, SyncError> {
        index
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .ok_or_else(|| SyncError::InvalidSelection {
                input: index.to_string(),
                count: self.len(),
            })
    }

    /// Parse a user-typed selection and look up the matching project.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidSelection`] if the input is not a positive
    /// integer or is out of range.
    pub fn select(&self, input: &str) -> Result<&Project, SyncError> {
        let trimmed = input.trim();
        let invalid = || SyncError::InvalidSelection {
            input: trimmed.to_string(),
            count: self.len(),
        };

        let index: usize = trimmed.parse().map_err(|_| invalid())?;
        self.get(index).map_err(|_| invalid())
    }

    /// Print the listing as `  N) <project>` lines, numbered from 1.
    ///
    /// # Output Format
    ///
    /// ```text
    ///   1) Pong (boot.dol)
    ///   2) SpaceInvaders (boot.dol)
    /// ```
    pub fn print_numbered(&self) {
        for (i, project) in self.0.iter().enumerate() {
            println!("  {}) {project}", (i + 1).to_string().bright_white());
        }
    }

    /// Ask the user to choose one project by number.
    ///
    /// Non-numeric and out-of-range answers are rejected with `Invalid choice.`
    /// and the prompt is shown again until a valid index is entered.
    ///
    /// # Errors
    ///
    /// Fails if the terminal is not interactive or the prompt is cancelled
    /// or interrupted (Esc / Ctrl+C).
    pub fn interactive_selection(&self) -> Result<&Project> {
        let count = self.len();

        let index = CustomType::<usize>::new("Choose a project to upload:")
            .with_error_message("Invalid choice.")
            .with_help_message(&format!("Enter a number between 1 and {count}"))
            .with_validator(move |index: &usize| {
                if (1..=count).contains(index) {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid("Invalid choice.".into()))
                }
            })
            .prompt()?;

        Ok(self.get(index)?)
    }
}
