use clap::Parser;
use color_eyre::Result;
use lifedash_tui::app::App;
use lifedash_tui::cli::CliArgs;
use lifedash_tui::{config, data, event, terminal};
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    // Check if we're running in a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&args);
    }

    let (data_path, world_path) = config::init_app_config();
    if config::debug_enabled() {
        eprintln!(
            "Loading data from {} and {}",
            data_path.display(),
            world_path.display()
        );
    }

    // Kick off the dataset load before the terminal takes over stdout; the
    // event loop shows a spinner until the result lands on this channel.
    let (tx, rx) = oneshot::channel();
    tokio::task::spawn_blocking(move || {
        let result = data::load_bundle(&data_path, &world_path);
        let _ = tx.send(result);
    });

    // Initialize application state
    let mut app = App::new();

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, Some(rx), args.year).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
