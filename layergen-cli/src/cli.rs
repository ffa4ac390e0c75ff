//! Command-line arguments

use clap::{Parser, ValueEnum};
use layergen::scaffold::OverwritePolicy;
use std::path::PathBuf;

/// Scaffold a layered Express resource
#[derive(Debug, Parser)]
#[command(name = "layergen")]
#[command(version)]
#[command(
    about = "Generate route, controller, service, repository and test files for a resource",
    long_about = None
)]
pub struct Cli {
    /// Resource name in camelCase (e.g. `order`, `invoiceLine`)
    ///
    /// Without a value, or without the flag, the configured default is used.
    #[arg(short, long, num_args = 0..=1, value_name = "WORD")]
    pub name: Option<Option<String>>,

    /// Project root containing `src/routes/_index.ts`
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Extra configuration file layered over `<root>/layergen.toml`
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// What to do when a generated file already exists
    #[arg(long, value_enum, default_value_t = ConflictChoice::Force)]
    pub on_conflict: ConflictChoice,

    /// Show the changes without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not run the generated test afterwards
    #[arg(long)]
    pub no_verify: bool,
}

impl Cli {
    /// The `--name` value, if one was given
    #[must_use]
    pub fn name_value(&self) -> Option<&str> {
        self.name.as_ref().and_then(Option::as_deref)
    }
}

/// Conflict handling selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConflictChoice {
    /// Abort before writing anything
    Fail,
    /// Overwrite existing files
    Force,
    /// Keep existing files
    Skip,
    /// Rename existing files to `<file>.<timestamp>.bak`
    Backup,
    /// Ask before overwriting
    Prompt,
}

impl ConflictChoice {
    /// The policy this choice maps to directly, `None` for [`Self::Prompt`]
    #[must_use]
    pub const fn policy(self) -> Option<OverwritePolicy> {
        match self {
            Self::Fail => Some(OverwritePolicy::Fail),
            Self::Force => Some(OverwritePolicy::Force),
            Self::Skip => Some(OverwritePolicy::Skip),
            Self::Backup => Some(OverwritePolicy::Backup),
            Self::Prompt => None,
        }
    }
}
