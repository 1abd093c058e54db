use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use tokio::sync::oneshot;

use crate::app::{handle_input, App};
use crate::cli::CliArgs;
use crate::config;
use crate::data::filter_for_year;
use crate::data::loader::{load_bundle, DataBundle, LoadError};
use crate::data::sort_descending_by;
use crate::domain::{Continent, ContinentFilter, Metric};
use crate::ui;

pub type PendingLoad = oneshot::Receiver<Result<DataBundle, LoadError>>;

/// Run the main application event loop. The initial data load arrives on
/// `pending` while the loop is already drawing the loading screen; every
/// later recomputation runs synchronously inside the handlers.
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut pending: Option<PendingLoad>,
    requested_year: Option<i32>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Update the animation clock and transition registry.
        app.update();

        // Resolve the async load boundary, if it has completed.
        if let Some(rx) = pending.as_mut() {
            match rx.try_recv() {
                Ok(Ok(bundle)) => {
                    app.install_data(bundle, requested_year);
                    pending = None;
                }
                Ok(Err(load_error)) => {
                    eprintln!("Error loading data: {load_error}");
                    app.fail_load(load_error.to_string());
                    pending = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    app.fail_load("data loader task vanished".to_string());
                    pending = None;
                }
            }
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events for now
                }
            }
        }
    }
    Ok(())
}

/// Run without a UI: load the dataset synchronously, print stats for the
/// chosen year, exit.
pub fn run_headless(args: &CliArgs) -> Result<()> {
    let (data_path, world_path) = config::init_app_config();
    let bundle = load_bundle(&data_path, &world_path)?;
    let stats = build_headless_stats(&bundle, args.year);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        render_headless_stats(&stats);
    }

    Ok(())
}

fn render_headless_stats(stats: &HeadlessStats) {
    println!("\nLife Expectancy Dashboard Stats");
    println!("================================");
    println!("Year: {}", stats.year);
    println!("Countries with data: {}", stats.countries);
    println!(
        "Global life domain: {:.1} - {:.1}",
        stats.life_domain.0, stats.life_domain.1
    );
    if let Some((lo, hi)) = stats.energy_domain {
        println!("Global energy domain: {lo:.2} - {hi:.2}");
    }

    println!("\nCountries by Continent:");
    for (continent, count) in &stats.by_continent {
        println!("- {continent}: {count}");
    }

    println!("\nTop Life Expectancy:");
    for entry in &stats.top_life {
        println!("- {} | {:.1}", entry.country, entry.value);
    }

    println!("\nTop Energy Consumption:");
    for entry in &stats.top_energy {
        println!("- {} | {:.2}", entry.country, entry.value);
    }
}

fn build_headless_stats(bundle: &DataBundle, requested_year: Option<i32>) -> HeadlessStats {
    let dataset = &bundle.dataset;
    let year = requested_year.unwrap_or(dataset.max_year);
    let continents = ContinentFilter::default();

    let rows = filter_for_year(&dataset.records, year, &continents, &[]);

    let by_continent = Continent::ALL
        .iter()
        .map(|continent| {
            let count = rows.iter().filter(|r| r.continent == *continent).count();
            (continent.as_str().to_string(), count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    let top_life = top_by_metric(&rows, Metric::LifeExpectancy, 5);
    let top_energy = top_by_metric(&rows, Metric::EnergyConsumption, 5);

    HeadlessStats {
        generated_at: chrono::Utc::now().to_rfc3339(),
        year,
        total_rows: dataset.records.len(),
        countries: rows.len(),
        life_domain: dataset.global_life_domain,
        energy_domain: dataset.global_energy_domain,
        by_continent,
        top_life,
        top_energy,
    }
}

fn top_by_metric(
    rows: &[crate::data::Record],
    metric: Metric,
    limit: usize,
) -> Vec<HeadlessCountry> {
    let mut with_metric: Vec<crate::data::Record> = rows
        .iter()
        .filter(|row| row.metric(metric).is_some())
        .cloned()
        .collect();
    sort_descending_by(&mut with_metric, metric);

    with_metric
        .into_iter()
        .take(limit)
        .filter_map(|row| {
            row.metric(metric).map(|value| HeadlessCountry {
                country: row.country,
                value,
            })
        })
        .collect()
}

#[derive(serde::Serialize)]
struct HeadlessStats {
    generated_at: String,
    year: i32,
    total_rows: usize,
    countries: usize,
    life_domain: (f64, f64),
    energy_domain: Option<(f64, f64)>,
    by_continent: Vec<(String, usize)>,
    top_life: Vec<HeadlessCountry>,
    top_energy: Vec<HeadlessCountry>,
}

#[derive(serde::Serialize)]
struct HeadlessCountry {
    country: String,
    value: f64,
}
