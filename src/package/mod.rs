//! Build and upload of distribution artifacts
//!
//! Builds go through the PEP 517 frontend (`python -m build`) and uploads
//! through twine. Artifacts are whatever regular files sit in the configured
//! output directory; their contents are never inspected.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{PypublishError, Result};
use crate::process::{run_step, CommandRunner, CommandSpec};

/// Leftovers of earlier builds, relative to the project root, besides the output directory
const STALE_BUILD_PATTERNS: &[&str] = &["build", "*.egg-info", "src/*.egg-info"];

pub struct PackageRunner<'a, R: CommandRunner> {
    runner: &'a R,
    config: &'a Config,
}

impl<'a, R: CommandRunner> PackageRunner<'a, R> {
    pub fn new(runner: &'a R, config: &'a Config) -> Self {
        PackageRunner { runner, config }
    }

    /// Remove earlier build output so old artifacts are never uploaded with new ones.
    ///
    /// # Returns
    /// * `Ok(Vec<PathBuf>)` - The paths that were removed
    /// * `Err(Precondition)` - The output directory is the project root or one of its
    ///   ancestors; nothing is removed
    pub fn clean_artifacts(&self) -> Result<Vec<PathBuf>> {
        let dist = self.config.dist_path();
        self.ensure_dist_below_root(&dist)?;
        let mut targets = vec![dist];

        let root = glob::Pattern::escape(&self.config.project_dir.to_string_lossy());
        for pattern in STALE_BUILD_PATTERNS {
            let full = format!("{}/{}", root, pattern);
            let matches = glob::glob(&full).map_err(|e| {
                PypublishError::precondition(format!("invalid clean pattern '{}': {}", full, e))
            })?;
            for entry in matches {
                targets.push(entry.map_err(std::io::Error::from)?);
            }
        }

        let mut removed = Vec::new();
        for target in targets {
            if remove_path(&target)? {
                log::info!("removed {}", target.display());
                removed.push(target);
            }
        }

        Ok(removed)
    }

    fn ensure_dist_below_root(&self, dist: &Path) -> Result<()> {
        let dist = match dist.canonicalize() {
            Ok(dist) => dist,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        let root = self.config.project_dir.canonicalize()?;

        if root.starts_with(&dist) {
            return Err(PypublishError::precondition(format!(
                "refusing to clean {}: it contains the project directory {}",
                dist.display(),
                root.display()
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<()> {
        let spec = CommandSpec::new(&self.config.tools.python, &self.config.project_dir)
            .args(["-m", "build"]);
        run_step(self.runner, "build", &spec)?;
        Ok(())
    }

    /// Regular, non-hidden files in the output directory, sorted by path
    pub fn find_artifacts(&self) -> Result<Vec<PathBuf>> {
        let dist = self.config.dist_path();
        if !dist.is_dir() {
            return Ok(Vec::new());
        }

        let mut artifacts = Vec::new();
        for entry in fs::read_dir(&dist)? {
            let entry = entry?;
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if !hidden && entry.file_type()?.is_file() {
                artifacts.push(entry.path());
            }
        }
        artifacts.sort();

        Ok(artifacts)
    }

    /// Upload every artifact with twine.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of artifacts handed to twine
    /// * `Err(Precondition)` - The output directory is missing or empty; twine is not run
    pub fn upload(&self) -> Result<usize> {
        let artifacts = self.find_artifacts()?;
        if artifacts.is_empty() {
            return Err(PypublishError::precondition(format!(
                "nothing to upload: no artifacts in {}",
                self.config.dist_path().display()
            )));
        }

        let mut spec =
            CommandSpec::new(&self.config.tools.twine, &self.config.project_dir).arg("upload");
        if let Some(repository) = &self.config.repository {
            spec = spec.args(["--repository", repository.as_str()]);
        }
        spec = spec.args(artifacts.iter().map(|p| p.to_string_lossy().into_owned()));

        run_step(self.runner, "upload", &spec)?;
        Ok(artifacts.len())
    }
}

/// Remove a file or directory tree, returning whether anything was there
fn remove_path(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }

    Ok(true)
}
