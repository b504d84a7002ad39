//! Project scaffolding command

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use stencil::{Registry, ScaffoldKind, ScaffoldRequest};

use super::{
    load_registry, offer_remote_bootstrap, print_result, resolve_location, resolve_or_prompt,
    should_offer_remote, spinner,
};

/// Create a new project from a template set
pub struct NewCommand {
    pub config: PathBuf,
    pub name: Option<String>,
    pub location: Option<PathBuf>,
    pub template_set: Option<String>,
    pub remote: Option<String>,
}

impl NewCommand {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let registry = load_registry(&self.config)?;

        let name = resolve_or_prompt(self.name, "Project name", "new-project")?;
        let location = resolve_location(self.location)?;
        let template_set = choose_template_set(&registry, self.template_set)?;
        let offer_remote = should_offer_remote(self.remote.as_deref());

        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style("project:").bold(),
            style(&name).cyan().bold()
        );

        let request = ScaffoldRequest {
            kind: ScaffoldKind::Project,
            name,
            destination: location,
            template_set,
            module_type: None,
            remote_url: self.remote,
        };

        let bar = spinner("Materializing template...")?;
        let result = stencil::run_project(&registry, &request);
        bar.finish_and_clear();

        let result = result?;
        print_result(&result);
        if offer_remote {
            offer_remote_bootstrap(&result.root)?;
        }
        print_next_steps(&result.name);
        Ok(())
    }
}

/// Pick a template set interactively when none was given
///
/// Returns `None` (the registry default) in unattended sessions.
fn choose_template_set(
    registry: &Registry,
    flag: Option<String>,
) -> Result<Option<String>> {
    if flag.is_some() {
        return Ok(flag);
    }
    if !console::user_attended() {
        return Ok(None);
    }

    let sets: Vec<_> = registry.sets().collect();
    let items: Vec<String> = sets
        .iter()
        .map(|set| format!("{} - {}", set.name, set.description))
        .collect();
    let default_index = sets
        .iter()
        .position(|set| set.name == stencil::registry::DEFAULT_SET)
        .unwrap_or(0);

    let selected = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose template set")
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(Some(sets[selected].name.clone()))
}

fn print_next_steps(name: &str) {
    println!();
    println!("{}", style("Next steps:").bold());
    println!(
        "  {} {}",
        style("$").dim(),
        style(format!("cd {name}")).cyan()
    );
    println!(
        "  {} {}",
        style("$").dim(),
        style("stencil module my_util --type util").cyan()
    );
}
