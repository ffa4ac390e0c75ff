//! Resource generation command
//!
//! Loads configuration, plans the scaffold, writes it and runs the generated
//! test. A failing or unrunnable test is reported but never turns into an
//! error exit.

use crate::cli::{Cli, ConflictChoice};
use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use layergen::config::{ScaffoldConfig, VerifySettings};
use layergen::scaffold::{
    AggregatorEdit, Layer, OverwritePolicy, ResourceName, ScaffoldGenerator, ScaffoldPlan,
    ScaffoldReport,
};
use layergen::verify::{TestRunner, VerificationReport};
use similar::TextDiff;
use std::path::{Path, PathBuf};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "");
static SKIP: Emoji<'_, '_> = Emoji("- ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");

/// Generate one resource
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    name: Option<String>,
    root: PathBuf,
    config: Option<PathBuf>,
    on_conflict: ConflictChoice,
    dry_run: bool,
    verify: bool,
}

impl GenerateCommand {
    /// Build the command from parsed arguments
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            name: cli.name_value().map(str::to_string),
            root: cli.root.clone(),
            config: cli.config.clone(),
            on_conflict: cli.on_conflict,
            dry_run: cli.dry_run,
            verify: !cli.no_verify,
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration cannot be loaded
    /// - The resource name is empty
    /// - The aggregator cannot be read or lacks an anchor
    /// - A file cannot be written
    pub async fn execute(&self) -> Result<()> {
        let config = ScaffoldConfig::load(&self.root, self.config.as_deref())
            .context("Failed to load configuration")?;
        let name = ResourceName::resolve(self.name.as_deref(), &config.default_name)?;
        let verify_settings = config.verify.clone();

        println!(
            "\n{} {} {}",
            style("Scaffolding resource").cyan().bold(),
            style(name.camel()).green().bold(),
            style(format!("({})", name.base_path())).dim()
        );

        let generator =
            ScaffoldGenerator::new(name, config).context("Failed to create scaffold generator")?;
        let plan = generator.plan(&self.root).context("Failed to prepare scaffold")?;

        if self.dry_run {
            print_dry_run(&plan, &self.root);
            return Ok(());
        }

        let conflicts = plan.conflicts(&self.root);
        let Some(policy) = resolve_policy(self.on_conflict, &conflicts, confirm_overwrite)? else {
            println!("\n{}", style("Aborted, nothing was written.").yellow());
            return Ok(());
        };

        let report = plan
            .apply(&self.root, policy)
            .context("Failed to write scaffold files")?;
        print_report(&plan, &report);

        if self.verify {
            if let Some(test_file) = plan.file(Layer::Test) {
                self.run_generated_test(&verify_settings, &test_file.path).await?;
            }
        }

        println!(
            "\n{} Resource {} is ready!",
            style("✨").green().bold(),
            style(generator.name().pascal()).green().bold()
        );

        Ok(())
    }

    async fn run_generated_test(&self, settings: &VerifySettings, test_file: &Path) -> Result<()> {
        let Some(runner) = TestRunner::from_settings(settings, &self.root) else {
            println!(
                "\n{}",
                style("Test run disabled in configuration, skipping.").dim()
            );
            return Ok(());
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message(format!(
            "Running {}",
            runner.command_line(test_file).join(" ")
        ));

        let outcome = runner.spawn(test_file).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(Ok(report)) => print_verification(&report),
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "could not run generated test");
                println!(
                    "\n{}{} {err}",
                    CROSS,
                    style("Could not run the generated test:").yellow()
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "test task did not complete");
                println!(
                    "\n{}{} {err}",
                    CROSS,
                    style("Test task did not complete:").yellow()
                );
            }
        }

        Ok(())
    }
}

/// Turn the conflict choice into a policy
///
/// `Prompt` only asks when something would be overwritten; a yes maps to
/// [`OverwritePolicy::Force`] and a no to `None` (abort).
///
/// # Errors
///
/// Returns an error if `confirm` fails.
pub fn resolve_policy(
    choice: ConflictChoice,
    conflicts: &[PathBuf],
    confirm: impl FnOnce(&[PathBuf]) -> Result<bool>,
) -> Result<Option<OverwritePolicy>> {
    if let Some(policy) = choice.policy() {
        return Ok(Some(policy));
    }
    if conflicts.is_empty() {
        return Ok(Some(OverwritePolicy::Force));
    }
    Ok(confirm(conflicts)?.then_some(OverwritePolicy::Force))
}

fn confirm_overwrite(conflicts: &[PathBuf]) -> Result<bool> {
    println!("\n{}", style("These files already exist:").yellow().bold());
    for path in conflicts {
        println!("  {}", style(path.display()).dim());
    }

    Confirm::new()
        .with_prompt("Overwrite them?")
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

/// Unified diff of the aggregator edit
#[must_use]
pub fn aggregator_diff(edit: &AggregatorEdit) -> String {
    let path = edit.path.display().to_string();
    let diff = TextDiff::from_lines(edit.original.as_str(), edit.updated.as_str());
    let mut unified = diff.unified_diff();
    unified
        .context_radius(3)
        .header(&format!("a/{path}"), &format!("b/{path}"));
    unified.to_string()
}

fn print_dry_run(plan: &ScaffoldPlan, root: &Path) {
    let banner = style("Dry run, nothing will be written.").yellow().bold();
    println!("\n{banner}");
    println!("\n{FILE}{}", style(plan.aggregator.path.display()).bold());

    for line in aggregator_diff(&plan.aggregator).lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", style(line).bold());
        } else if line.starts_with("@@") {
            println!("{}", style(line).cyan());
        } else if line.starts_with('+') {
            println!("{}", style(line).green());
        } else if line.starts_with('-') {
            println!("{}", style(line).red());
        } else {
            println!("{line}");
        }
    }

    println!("\n{}", style("Files:").cyan().bold());
    for file in &plan.files {
        let marker = if root.join(&file.path).exists() {
            style("exists").yellow()
        } else {
            style("new").green()
        };
        println!(
            "  {} {} ({})",
            marker,
            style(file.path.display()).dim(),
            style(&file.description).dim()
        );
    }
}

fn print_report(plan: &ScaffoldPlan, report: &ScaffoldReport) {
    match &report.aggregator {
        Some(path) => println!(
            "\n{} {}",
            style("Updated").green().bold(),
            style(path.display()).dim()
        ),
        None => println!(
            "\n{} {}",
            style("Kept").yellow().bold(),
            style(plan.aggregator.path.display()).dim()
        ),
    }
    println!(
        "{} {} files:",
        style("Generated").green().bold(),
        report.written.len()
    );

    for file in &plan.files {
        if report.written.contains(&file.path) {
            println!(
                "  {}{} ({})",
                CHECK,
                style(file.path.display()).dim(),
                style(&file.description).dim()
            );
        }
    }
    for path in &report.skipped {
        println!(
            "  {}{} {}",
            SKIP,
            style(path.display()).dim(),
            style("(kept existing)").yellow()
        );
    }
    for (original, backup) in &report.backed_up {
        println!(
            "  {} {} -> {}",
            style("backup").yellow(),
            style(original.display()).dim(),
            style(backup.display()).dim()
        );
    }
}

fn print_verification(report: &VerificationReport) {
    if report.success {
        println!(
            "\n{}{}",
            CHECK,
            style(format!("{} passed", report.command)).green()
        );
    } else {
        let status = report.exit_code.map_or_else(
            || "terminated by signal".to_string(),
            |code| format!("exit code {code}"),
        );
        println!(
            "\n{}{}",
            CROSS,
            style(format!("{} failed ({status})", report.command)).yellow()
        );
    }

    if !report.stdout.trim().is_empty() {
        println!("\n{}", style("stdout:").bold());
        println!("{}", report.stdout.trim_end());
    }
    if !report.stderr.trim().is_empty() {
        println!("\n{}", style("stderr:").bold());
        println!("{}", report.stderr.trim_end());
    }
}
