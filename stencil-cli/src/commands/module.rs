//! Module scaffolding command

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use stencil::{ModuleType, ScaffoldKind, ScaffoldRequest};

use super::{
    load_registry, offer_remote_bootstrap, print_result, resolve_location, resolve_or_prompt,
    should_offer_remote, spinner,
};

/// Create a new module from a template set
pub struct ModuleCommand {
    pub config: PathBuf,
    pub name: Option<String>,
    pub location: Option<PathBuf>,
    pub module_type: Option<ModuleType>,
    pub template_set: Option<String>,
    pub remote: Option<String>,
}

impl ModuleCommand {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let registry = load_registry(&self.config)?;

        let name = resolve_or_prompt(self.name, "Module name (snake_case)", "new_module")?;
        let location = resolve_location(self.location)?;
        let module_type = choose_module_type(self.module_type)?;
        let offer_remote = should_offer_remote(self.remote.as_deref());

        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style("module:").bold(),
            style(&name).cyan().bold()
        );

        let request = ScaffoldRequest {
            kind: ScaffoldKind::Module,
            name: name.clone(),
            destination: location,
            template_set: self.template_set,
            module_type: Some(module_type),
            remote_url: self.remote,
        };

        let bar = spinner("Materializing template...")?;
        let result = stencil::run_module(&registry, &request);
        bar.finish_and_clear();

        let result = result?;
        if result.name != name {
            println!(
                "{} module name normalized to '{}'",
                style("⚠").yellow().bold(),
                style(&result.name).cyan()
            );
        }
        print_result(&result);
        println!(
            "  {} {}",
            style("type:").dim(),
            style(module_type.as_str()).cyan()
        );
        if offer_remote {
            offer_remote_bootstrap(&result.root)?;
        }
        Ok(())
    }
}

/// Pick a module type interactively when none was given
///
/// Unattended sessions fall back to the default type.
fn choose_module_type(flag: Option<ModuleType>) -> Result<ModuleType> {
    if let Some(module_type) = flag {
        return Ok(module_type);
    }
    if !console::user_attended() {
        return Ok(ModuleType::default());
    }

    let items: Vec<String> = ModuleType::ALL
        .iter()
        .map(|t| format!("{} - {}", t.as_str(), t.description()))
        .collect();
    let selected = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose module type")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(ModuleType::ALL[selected])
}
