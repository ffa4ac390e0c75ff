//! layergen - scaffold layered Express resources
//!
//! Generates the route, controller, service, repository and integration test
//! files for one resource, and splices the route registration into the
//! project's router aggregator (`src/routes/_index.ts`).
//!
//! # Example
//!
//! ```rust,no_run
//! use layergen::config::ScaffoldConfig;
//! use layergen::scaffold::{OverwritePolicy, ResourceName, ScaffoldGenerator};
//! use std::path::Path;
//!
//! # fn main() -> layergen::Result<()> {
//! let root = Path::new(".");
//! let config = ScaffoldConfig::load(root, None)?;
//! let name = ResourceName::parse("order")?;
//!
//! let generator = ScaffoldGenerator::new(name, config)?;
//! let report = generator.plan(root)?.apply(root, OverwritePolicy::Force)?;
//! println!("wrote {} files", report.written.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;
pub mod templates;
pub mod verify;

pub use error::{Result, ScaffoldError};
