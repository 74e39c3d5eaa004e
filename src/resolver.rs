//! Python package-manager detection
//!
//! Looks at marker files in a project directory and names the package
//! manager the project uses. Markers are checked in a fixed priority order:
//! lock files and tool sections before the generic `.python-version`
//! fallback. Unreadable files are treated as absent.

use std::fmt;
use std::path::Path;

use crate::error::{GuardError, Result};

/// A Python package/environment manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Poetry,
    Uv,
    Pdm,
    Hatch,
    Rye,
    Pixi,
    Conda,
    Mamba,
}

impl PackageManager {
    /// Lowercase tool name
    pub fn name(self) -> &'static str {
        match self {
            PackageManager::Poetry => "poetry",
            PackageManager::Uv => "uv",
            PackageManager::Pdm => "pdm",
            PackageManager::Hatch => "hatch",
            PackageManager::Rye => "rye",
            PackageManager::Pixi => "pixi",
            PackageManager::Conda => "conda",
            PackageManager::Mamba => "mamba",
        }
    }

    /// Prefix that runs a command inside the managed environment
    pub fn run_command(self) -> &'static str {
        match self {
            PackageManager::Poetry => "poetry run",
            PackageManager::Uv => "uv run",
            PackageManager::Pdm => "pdm run",
            PackageManager::Hatch => "hatch run",
            PackageManager::Rye => "rye run",
            PackageManager::Pixi => "pixi run",
            PackageManager::Conda => "conda run -n <env_name>",
            PackageManager::Mamba => "mamba run -n <env_name>",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sections in pyproject.toml that identify a manager, in priority order
const PYPROJECT_SECTIONS: &[(&str, PackageManager)] = &[
    ("[tool.poetry]", PackageManager::Poetry),
    ("[tool.pdm]", PackageManager::Pdm),
    ("[tool.hatch]", PackageManager::Hatch),
];

fn read_marker(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| GuardError::io(path, e))
}

/// Detect the package manager a project directory uses
///
/// Returns `None` when the directory is missing, is not a directory, or
/// has none of the known markers.
pub fn detect_package_manager(project_dir: &Path) -> Option<PackageManager> {
    if !project_dir.is_dir() {
        return None;
    }

    let has = |name: &str| project_dir.join(name).exists();

    if has("poetry.lock") {
        return Some(PackageManager::Poetry);
    }

    let pyproject = project_dir.join("pyproject.toml");
    if pyproject.exists() {
        if let Ok(content) = read_marker(&pyproject) {
            if let Some(&(_, manager)) = PYPROJECT_SECTIONS
                .iter()
                .find(|(section, _)| content.contains(section))
            {
                return Some(manager);
            }
        }
    }

    if has("uv.lock") {
        return Some(PackageManager::Uv);
    }

    if has("rye.lock") {
        return Some(PackageManager::Rye);
    }

    let python_version = project_dir.join(".python-version");
    if python_version.exists() {
        if let Ok(content) = read_marker(&python_version) {
            if content.to_lowercase().contains("rye") || has(".rye") {
                return Some(PackageManager::Rye);
            }
            return Some(PackageManager::Uv);
        }
    }

    if has("pdm.lock") {
        return Some(PackageManager::Pdm);
    }

    if has("pixi.lock") || has("pixi.toml") {
        return Some(PackageManager::Pixi);
    }

    if has("environment.yml") || has("conda.yml") {
        return Some(PackageManager::Conda);
    }

    None
}
