//! Template set listing command

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use stencil::registry::DEFAULT_SET;

use super::load_registry;

/// Print the template sets known to the registry
pub struct ListCommand {
    pub config: PathBuf,
}

impl ListCommand {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let registry = load_registry(&self.config)?;

        println!("{}", style("Template sets:").bold());
        for set in registry.sets() {
            let marker = if set.name == DEFAULT_SET {
                style(" (default)").dim().to_string()
            } else {
                String::new()
            };
            println!(
                "  {} {}{} - {}",
                style("•").cyan(),
                style(&set.name).cyan().bold(),
                marker,
                set.description
            );
        }

        if let Some(range) = registry.runtime_version() {
            println!();
            println!(
                "{} {}",
                style("Accepted runtime versions:").dim(),
                style(range).dim()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn listing_a_valid_registry_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("stencil.toml");
        fs::write(
            &config,
            r#"
            [defaults]
            project-template = "./p"
            module-template = "./m"

            [sets.api]
            description = "API service"
            "#,
        )
        .unwrap();

        ListCommand { config }.execute().unwrap();
    }
}
