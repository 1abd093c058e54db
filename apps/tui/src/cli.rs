use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "lifedash_tui", version, about = "Life Expectancy Dashboard TUI")]
pub struct CliArgs {
    /// Print per-year stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override dataset CSV path
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Override world GeoJSON path
    #[arg(long, value_name = "PATH")]
    pub world: Option<String>,

    /// Initial year shown on the slider (clamped to the data range)
    #[arg(long, value_name = "YEAR")]
    pub year: Option<i32>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(data) = &self.data {
            std::env::set_var("DATA_PATH", data);
        }
        if let Some(world) = &self.world {
            std::env::set_var("WORLD_PATH", world);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
