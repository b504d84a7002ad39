//! CLI command implementations

pub mod list;
pub mod module;
pub mod new;

pub use list::ListCommand;
pub use module::ModuleCommand;
pub use new::NewCommand;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use stencil::{Registry, ScaffoldResult};

/// Load the registry from the definition file given on the command line
pub fn load_registry(config: &Path) -> Result<Registry> {
    Registry::load(config).with_context(|| {
        format!(
            "cannot load template registry from '{}'",
            config.display()
        )
    })
}

/// Resolve a value from a flag, an interactive prompt, or a fallback
///
/// Prompts only when the session is attended; in scripts and CI the fallback
/// wins silently.
pub fn resolve_or_prompt(
    flag: Option<String>,
    prompt: &str,
    fallback: &str,
) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value);
    }
    if console::user_attended() {
        let value = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(fallback.to_string())
            .interact_text()?;
        return Ok(value);
    }
    Ok(fallback.to_string())
}

/// Resolve the destination directory, defaulting to the current directory
pub fn resolve_location(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(location) = flag {
        return Ok(location);
    }
    std::env::current_dir().context("cannot determine current directory")
}

/// Whether to offer an interactive remote prompt after a successful scaffold
///
/// An explicit `--remote` flag goes through the orchestrator instead, and
/// unattended sessions are never prompted.
pub fn should_offer_remote(flag: Option<&str>) -> bool {
    flag.is_none() && console::user_attended()
}

/// Offer to push the finished scaffold to a remote repository
///
/// Runs only after the scaffold exists. A blank answer skips. A bootstrap
/// failure is reported as a warning; the scaffolded files stay untouched
/// either way.
pub fn offer_remote_bootstrap(root: &Path) -> Result<()> {
    let answer = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Remote repository URL (blank to skip git init/push)")
        .allow_empty(true)
        .interact_text()?;
    let url = answer.trim();
    if url.is_empty() {
        return Ok(());
    }

    match stencil::git::bootstrap_remote(root, url) {
        Ok(()) => println!(
            "{} pushed initial commit to {}",
            style("✓").green().bold(),
            style(url).cyan()
        ),
        Err(err) => {
            println!("{} {err}", style("⚠").yellow().bold());
            println!(
                "  {}",
                style("Scaffolded files are intact; retry the git setup manually.").dim()
            );
        }
    }
    Ok(())
}

/// Spinner used while the scaffold runs
pub fn spinner(message: &str) -> Result<ProgressBar> {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(bar)
}

/// Print the shared completion summary for a scaffold result
pub fn print_result(result: &ScaffoldResult) {
    println!(
        "{} {} ({} files)",
        style("✓").green().bold(),
        style(result.root.display()).cyan(),
        result.written.len()
    );

    if let Some(warning) = &result.warning {
        println!(
            "{} {}",
            style("⚠").yellow().bold(),
            style(warning).yellow()
        );
        println!(
            "  {}",
            style("Scaffolded files are intact; retry the git setup manually.").dim()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_wins_without_prompting() {
        let value = resolve_or_prompt(Some("given".to_string()), "ignored", "fallback").unwrap();
        assert_eq!(value, "given");
    }

    #[test]
    fn explicit_location_is_passed_through() {
        let location = resolve_location(Some(PathBuf::from("/tmp/somewhere"))).unwrap();
        assert_eq!(location, PathBuf::from("/tmp/somewhere"));
    }

    #[test]
    fn explicit_remote_flag_suppresses_the_prompt() {
        assert!(!should_offer_remote(Some("git@github.com:x/y.git")));
    }

    #[test]
    fn missing_registry_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_registry(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("nope.toml"));
    }
}
