//! Write plan and overwrite policy
//!
//! A [`ScaffoldPlan`] holds every change for one run in memory. Applying it
//! writes the aggregator first and then each layer file in order. Once a
//! write has happened there is no rollback.
//!
//! Under [`OverwritePolicy::Skip`] the aggregator is only spliced when the
//! route file is new, so a repeated skip run never imports a route twice.

use super::generator::GeneratedFile;
use crate::error::{Result, ScaffoldError};
use std::fs;
use std::path::{Path, PathBuf};

/// What to do when a generated file already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Abort before writing anything
    Fail,
    /// Replace the existing file
    #[default]
    Force,
    /// Keep the existing file and move on; an existing route file also
    /// leaves the aggregator untouched
    Skip,
    /// Move the existing file aside, then write
    Backup,
}

/// Old and new content of the aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorEdit {
    /// Relative path from project root
    pub path: PathBuf,
    /// Content before splicing
    pub original: String,
    /// Content after splicing
    pub updated: String,
}

/// Every change for one resource, computed before any write
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    /// Aggregator modification
    pub aggregator: AggregatorEdit,
    /// New files, in write order
    pub files: Vec<GeneratedFile>,
}

/// Outcome of applying a plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Aggregator path, `None` when it was left untouched
    pub aggregator: Option<PathBuf>,
    /// Files written
    pub written: Vec<PathBuf>,
    /// Existing files left untouched
    pub skipped: Vec<PathBuf>,
    /// Existing files moved aside: (original, backup)
    pub backed_up: Vec<(PathBuf, PathBuf)>,
}

impl ScaffoldPlan {
    /// Generated paths that already exist under `root`
    #[must_use]
    pub fn conflicts(&self, root: &Path) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|file| root.join(&file.path).exists())
            .map(|file| file.path.clone())
            .collect()
    }

    /// The generated file for a layer
    #[must_use]
    pub fn file(&self, layer: super::Layer) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.layer == layer)
    }

    fn route_exists(&self, root: &Path) -> bool {
        self.file(super::Layer::Route)
            .is_some_and(|route| root.join(&route.path).exists())
    }

    /// Write the plan under `root`
    ///
    /// The aggregator is written first, then each file in order. Missing
    /// parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::FileExists`] under [`OverwritePolicy::Fail`]
    /// when any target exists; nothing is written in that case. Returns
    /// [`ScaffoldError::FileSystem`] on I/O failure, leaving earlier writes
    /// in place.
    pub fn apply(&self, root: &Path, policy: OverwritePolicy) -> Result<ScaffoldReport> {
        if policy == OverwritePolicy::Fail {
            if let Some(path) = self.conflicts(root).into_iter().next() {
                return Err(ScaffoldError::FileExists { path });
            }
        }

        let mut report = ScaffoldReport::default();

        if policy == OverwritePolicy::Skip && self.route_exists(root) {
            tracing::warn!(
                path = %self.aggregator.path.display(),
                "route file exists, leaving aggregator untouched"
            );
        } else {
            write_file(&root.join(&self.aggregator.path), &self.aggregator.updated)?;
            tracing::info!(path = %self.aggregator.path.display(), "updated aggregator");
            report.aggregator = Some(self.aggregator.path.clone());
        }

        for file in &self.files {
            let full_path = root.join(&file.path);

            if full_path.exists() {
                match policy {
                    OverwritePolicy::Skip => {
                        tracing::warn!(path = %file.path.display(), "file exists, skipping");
                        report.skipped.push(file.path.clone());
                        continue;
                    }
                    OverwritePolicy::Backup => {
                        let backup = backup_path(&file.path);
                        let full_backup = root.join(&backup);
                        fs::rename(&full_path, &full_backup)
                            .map_err(|e| ScaffoldError::fs(&full_path, e))?;
                        tracing::info!(
                            path = %file.path.display(),
                            backup = %backup.display(),
                            "backed up existing file"
                        );
                        report.backed_up.push((file.path.clone(), backup));
                    }
                    OverwritePolicy::Force | OverwritePolicy::Fail => {
                        tracing::warn!(path = %file.path.display(), "overwriting existing file");
                    }
                }
            }

            write_file(&full_path, &file.content)?;
            tracing::info!(layer = %file.layer, path = %file.path.display(), "wrote file");
            report.written.push(file.path.clone());
        }

        Ok(report)
    }
}

/// `<file>.<timestamp>.bak` next to the original
fn backup_path(path: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S%3f");
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{file_name}.{timestamp}.bak"))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::fs(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ScaffoldError::fs(path, e))
}
