//! New project scaffolding.
//!
//! `init` lays out a project the locator can discover once it is built:
//!
//! ```text
//! <workspace>/<Name>/
//! ├── CMakeLists.txt   builds bin/boot.dol and copies meta.xml + data/* into bin/
//! ├── meta.xml         homebrew channel metadata
//! ├── src/main.c
//! ├── bin/
//! └── data/icon.png
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use image::{Rgb, RgbImage};

use crate::config::sync::{BUILD_OUTPUT_DIR, DATA_DIR};

/// Name used when the sanitised input is empty.
pub const FALLBACK_PROJECT_NAME: &str = "NewProject";

pub const ICON_WIDTH: u32 = 128;
pub const ICON_HEIGHT: u32 = 48;

const ICON_TOP: [u8; 3] = [35, 95, 200];
const ICON_BOTTOM: [u8; 3] = [20, 45, 110];
const ICON_BORDER: [u8; 3] = [10, 20, 40];

/// Turn free-form input into a folder- and CMake-safe project name.
///
/// Every non-alphanumeric character becomes `_`, leading and trailing `_`
/// are removed, and an empty result falls back to [`FALLBACK_PROJECT_NAME`].
#[must_use]
pub fn sanitize_project_name(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();

    match replaced.trim_matches('_') {
        "" => FALLBACK_PROJECT_NAME.to_string(),
        name => name.to_string(),
    }
}

/// Files and folders written by [`ProjectTemplate::create`].
#[derive(Debug)]
pub struct ScaffoldReport {
    /// Root folder of the new project
    pub root: PathBuf,

    /// Every file written (existing `main.c` and `icon.png` are left alone)
    pub written: Vec<PathBuf>,
}

/// Text and image templates for a new project.
#[derive(Clone, Debug)]
pub struct ProjectTemplate {
    name: String,
    author: String,
    release_date: NaiveDateTime,
}

impl ProjectTemplate {
    /// Create a template, sanitising `raw_name` and stamping the current local time.
    #[must_use]
    pub fn new(raw_name: &str, author: &str) -> Self {
        Self {
            name: sanitize_project_name(raw_name),
            author: author.trim().to_string(),
            release_date: Local::now().naive_local(),
        }
    }

    /// Override the release date written to `meta.xml`.
    #[must_use]
    pub const fn with_release_date(mut self, release_date: NaiveDateTime) -> Self {
        self.release_date = release_date;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The CMake build file.
    ///
    /// The executable is emitted as `bin/boot.dol` and `meta.xml` plus every
    /// file under `data/` are copied into `bin/` at configure time.
    #[must_use]
    pub fn cmake_lists(&self) -> String {
        let name = &self.name;
        format!(
            r"cmake_minimum_required(VERSION 3.20)
project({name})

set(TARGET ${{PROJECT_NAME}})
file(GLOB_RECURSE SOURCES src/*.c src/*.cpp)
file(GLOB_RECURSE BINFILES data/*.*)

add_executable(${{TARGET}} ${{SOURCES}})
target_link_libraries(${{TARGET}} wiiuse bte ogc m)

set_target_properties(${{TARGET}} PROPERTIES
    OUTPUT_NAME boot
    RUNTIME_OUTPUT_DIRECTORY ${{PROJECT_SOURCE_DIR}}/{BUILD_OUTPUT_DIR}
    SUFFIX .dol
)
file(COPY ${{PROJECT_SOURCE_DIR}}/meta.xml ${{BINFILES}} DESTINATION ${{PROJECT_SOURCE_DIR}}/{BUILD_OUTPUT_DIR})
add_custom_target(${{TARGET}}_run COMMAND wiiload ${{PROJECT_SOURCE_DIR}}/{BUILD_OUTPUT_DIR}/boot.dol DEPENDS ${{TARGET}})
"
        )
    }

    /// The homebrew channel `meta.xml`.
    #[must_use]
    pub fn meta_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<app version="1">
	<name>{}</name>
	<coder>{}</coder>
	<version>1.0</version>
	<release_date>{}</release_date>
	<short_description>Short description</short_description>
	<long_description>Long description</long_description>
</app>
"#,
            escape_xml(&self.name),
            escape_xml(&self.author),
            self.release_date.format("%Y%m%d%H%M%S"),
        )
    }

    /// Write the project skeleton under `workspace/<name>/`.
    ///
    /// `CMakeLists.txt` and `meta.xml` are always (re)written; an existing
    /// `src/main.c` or `data/icon.png` is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if a folder or file cannot be created, or the icon
    /// cannot be encoded.
    pub fn create(&self, workspace: &Path) -> Result<ScaffoldReport> {
        let root = workspace.join(&self.name);
        let mut written = Vec::new();

        for dir in ["src", BUILD_OUTPUT_DIR, DATA_DIR] {
            let path = root.join(dir);
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
        }

        let source = root.join("src").join("main.c");
        if !source.exists() {
            write_file(&source, "")?;
            written.push(source);
        }

        let cmake = root.join("CMakeLists.txt");
        write_file(&cmake, &self.cmake_lists())?;
        written.push(cmake);

        let meta = root.join("meta.xml");
        write_file(&meta, &self.meta_xml())?;
        written.push(meta);

        let icon = root.join(DATA_DIR).join("icon.png");
        if !icon.exists() {
            render_icon()
                .save(&icon)
                .with_context(|| format!("Failed to write {}", icon.display()))?;
            written.push(icon);
        }

        Ok(ScaffoldReport { root, written })
    }
}

/// Render the default 128x48 icon: a vertical blue gradient with a dark border.
///
/// The project title and its drop shadow are not drawn, since no font
/// rasteriser is linked in. Every interior row is a single flat colour.
#[must_use]
pub fn render_icon() -> RgbImage {
    RgbImage::from_fn(ICON_WIDTH, ICON_HEIGHT, |x, y| {
        if x == 0 || y == 0 || x == ICON_WIDTH - 1 || y == ICON_HEIGHT - 1 {
            return Rgb(ICON_BORDER);
        }

        let t = f64::from(y) / f64::from(ICON_HEIGHT - 1);
        Rgb([0, 1, 2].map(|i| lerp(ICON_TOP[i], ICON_BOTTOM[i], t)))
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (f64::from(from) + (f64::from(to) - f64::from(from)) * t) as u8
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
