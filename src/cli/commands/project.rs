use crate::cli::commands::{audit, open_store};
use crate::cli::parser::{Commands, ProjectAction};
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::db::store::Store;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Project { action } = cmd {
        let store = open_store(cfg)?;

        match action {
            ProjectAction::Add { name } => {
                store.add_project(name, SystemClock.now())?;
                audit(&store, "project", name, &format!("Project '{}' added", name));
                success(format!("Project '{}' added.", name));
            }
            ProjectAction::List => {
                let projects = store.list_projects()?;
                if projects.is_empty() {
                    info("No projects yet. Add one with `tire project add <NAME>`.");
                }
                for name in projects {
                    println!("{}", name);
                }
            }
        }
    }

    Ok(())
}
