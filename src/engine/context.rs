//! Per-request evaluation context shared by every rule

use once_cell::unsync::OnceCell;
use std::path::{Path, PathBuf};

use crate::input::Request;
use crate::parser::{self, Segment};
use crate::resolver::{self, PackageManager};

/// Answers whether a tool is installed
pub trait ToolLocator {
    fn is_installed(&self, name: &str) -> bool;
}

/// Looks tools up on `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct PathLocator;

impl PathLocator {
    /// Full path of the first `PATH` entry holding an executable named `name`
    pub fn find(name: &str) -> Option<PathBuf> {
        std::env::var_os("PATH").and_then(|paths| {
            std::env::split_paths(&paths).find_map(|dir| {
                let path = dir.join(name);
                if is_executable(&path) {
                    Some(path)
                } else {
                    None
                }
            })
        })
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

impl ToolLocator for PathLocator {
    fn is_installed(&self, name: &str) -> bool {
        Self::find(name).is_some()
    }
}

/// Everything a rule may look at for one request
///
/// Tokens and segments are computed once up front. The project's package
/// manager is resolved on first use and cached.
pub struct RuleContext<'a> {
    pub request: &'a Request,
    /// Whitespace tokens of the whole command
    pub tokens: Vec<&'a str>,
    /// Segments split on `|`, `&&`, `||`, `;`
    pub segments: Vec<Segment<'a>>,
    locator: &'a dyn ToolLocator,
    package_manager: OnceCell<Option<PackageManager>>,
}

impl<'a> RuleContext<'a> {
    pub fn new(request: &'a Request, locator: &'a dyn ToolLocator) -> Self {
        Self {
            request,
            tokens: parser::tokenize(&request.command),
            segments: parser::segments(&request.command),
            locator,
            package_manager: OnceCell::new(),
        }
    }

    /// The raw command string
    pub fn command(&self) -> &'a str {
        &self.request.command
    }

    /// Whether `tool` is installed
    pub fn is_installed(&self, tool: &str) -> bool {
        self.locator.is_installed(tool)
    }

    /// The package manager of the request's project directory
    pub fn package_manager(&self) -> Option<PackageManager> {
        *self.package_manager.get_or_init(|| {
            self.request
                .project_dir
                .as_deref()
                .and_then(resolver::detect_package_manager)
        })
    }
}
