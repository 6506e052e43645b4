use cityscope_core::{AppError, Config};
use cityscope_directory::{CityListController, DirectoryClient};
use cityscope_session::{FavoritesStore, Session};
use cityscope_weather::WeatherProvider;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!("Fatal: {}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Initialize core
    cityscope_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("Cityscope started");

    // Browse the first page of the city directory
    let client = DirectoryClient::new(&config.directory.base_url)?;
    let mut controller = CityListController::new(client);
    controller.load_next_page().await;

    println!("Cities ({} loaded):", controller.cities().len());
    for city in controller.visible() {
        println!(
            "  {:<24} {:<20} pop {:>10}  ({:.4}, {:.4})",
            city.name, city.country, city.population, city.latitude, city.longitude
        );
    }

    // Optional: show weather for a city named on the command line
    let Some(city_name) = std::env::args().nth(1) else {
        return Ok(());
    };

    let provider = WeatherProvider::new(&config.weather.base_url, &config.weather.api_key)?;
    let session = Session::new(provider, FavoritesStore::load(&config.config_dir));
    session.fetch_weather(&city_name).await;

    let unit = session.unit();
    println!("\nWeather in {}:", city_name);
    match session.weather() {
        Some(snapshot) => {
            println!(
                "  {:.1}°{}, {}",
                snapshot.temperature,
                unit.temperature_suffix(),
                snapshot.description
            );
            println!(
                "  humidity {}%, wind {:.1} {}, pressure {:.0} hPa",
                snapshot.humidity,
                snapshot.wind_speed,
                unit.wind_speed_suffix(),
                snapshot.pressure
            );
        }
        None => println!("  current conditions unavailable"),
    }

    match session.forecast() {
        Some(series) => {
            println!("Forecast:");
            for entry in series.display_entries() {
                let date = entry
                    .time()
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| entry.timestamp.to_string());
                println!(
                    "  {}  {:.1}-{:.1}°{}  {} ({}% rain)",
                    date,
                    entry.temp_min,
                    entry.temp_max,
                    unit.temperature_suffix(),
                    entry.description,
                    (entry.precipitation_probability * 100.0).round() as i64
                );
            }
        }
        None => println!("  forecast unavailable"),
    }

    Ok(())
}
