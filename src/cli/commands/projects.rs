use crate::cli::commands::now;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::projects::ProjectsLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::Table;
use crate::utils::time::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Projects = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let projects = ProjectsLogic::collect(&pool, now())?;
        if projects.is_empty() {
            info("No projects logged yet.");
            return Ok(());
        }

        let mut table = Table::new(&["PROJECT", "ENTRIES", "TIME"]);
        for p in projects {
            table.add_row(vec![
                p.project,
                p.entries.to_string(),
                format_duration(p.time),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
