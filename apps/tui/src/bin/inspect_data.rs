use color_eyre::Result;
use dotenv::dotenv;
use lifedash_tui::config;
use lifedash_tui::data::load_bundle;
use lifedash_tui::domain::Continent;

fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    println!("Inspecting dataset files...");

    let data_path = config::get_data_path();
    let world_path = config::get_world_path();
    println!("Data: {}", data_path.display());
    println!("World: {}", world_path.display());

    let started = chrono::Utc::now();
    let bundle = load_bundle(&data_path, &world_path)?;
    let elapsed = chrono::Utc::now() - started;

    let dataset = &bundle.dataset;
    println!("\nLoad successful ({} ms)", elapsed.num_milliseconds());
    println!("Rows: {}", dataset.records.len());
    println!("Years: {} - {}", dataset.min_year, dataset.max_year);
    println!(
        "Life expectancy domain: {:.1} - {:.1}",
        dataset.global_life_domain.0, dataset.global_life_domain.1
    );
    match dataset.global_energy_domain {
        Some((lo, hi)) => println!("Energy domain: {lo:.2} - {hi:.2}"),
        None => println!("Energy domain: no energy values in dataset"),
    }

    println!("\nRows per continent:");
    for continent in Continent::ALL {
        let count = dataset
            .records
            .iter()
            .filter(|record| record.continent == continent)
            .count();
        if count > 0 {
            println!("- {}: {}", continent.as_str(), count);
        }
    }

    println!("\nWorld features: {}", bundle.world.len());
    let unnamed = bundle
        .world
        .iter()
        .filter(|feature| feature.name.is_empty())
        .count();
    if unnamed > 0 {
        println!("Features without a name property: {unnamed}");
    }

    Ok(())
}
