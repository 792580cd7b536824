use anyhow::{Context, Result};
use chrono::Utc;
use std::env;
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use cinema_facility::{
    inventory_value, write_inventory_csv, AreaRef, Cinema, Config, GlassSize, LoadOutcome, WcType,
};

fn main() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    init_tracing(&config);

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("seed") => run_seed(&config)?,
        Some("inventory") => run_inventory(&config)?,
        Some("report") | None => run_report(&config)?,
        Some(other) => {
            eprintln!("❌ Unknown command: {}", other);
            eprintln!("   Usage: cinema [seed | report | inventory]");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load(config: &Config) -> Result<Cinema> {
    let mut cinema = Cinema::with_limits(config.limits());
    let outcome = cinema
        .load(&config.data_dir)
        .with_context(|| format!("Failed to load {}", config.data_dir.display()))?;
    if outcome == LoadOutcome::NotFound {
        eprintln!("⚠️  No data in {} (run: cinema seed)", config.data_dir.display());
    }
    Ok(cinema)
}

fn run_seed(config: &Config) -> Result<()> {
    println!("🎬 Seeding demo cinema into {}", config.data_dir.display());

    let hour = Duration::from_secs(3600);
    let mut cinema = Cinema::with_limits(config.limits());

    let ground = cinema.create_floor(0, "Ground floor lobby", 2 * hour)?;
    let first = cinema.create_floor(1, "First floor corridor", 4 * hour)?;
    cinema.create_wc(ground, WcType::Women, "Lobby restroom (women)", hour)?;
    cinema.create_wc(ground, WcType::Men, "Lobby restroom (men)", hour)?;
    cinema.create_wc(first, WcType::Unisex, "Upstairs restroom", 2 * hour)?;

    for (number, floor) in [(1, ground), (2, ground), (3, first)] {
        let hall = cinema.create_hall(number, &format!("Hall {}", number), 3 * hour, Some(floor))?;
        for row in ['A', 'B', 'C', 'D'] {
            for seat in 1..=10 {
                cinema.create_seat(hall, seat, row)?;
            }
        }
        cinema.schedule_screening(hall, "Opening night", Utc::now() + chrono::Duration::days(1))?;
    }

    let cleaner = cinema.create_employee("Maria", "Lopez")?;
    cinema.sign_part_time_contract(cleaner, 20)?;
    let manager = cinema.create_employee("Tom", "Becker")?;
    cinema.sign_full_time_contract(manager, 5200.0)?;
    cinema.assign_cleaning(AreaRef::Floor(ground), cleaner, Utc::now())?;

    cinema.create_snack("Popcorn (large)", 12.5, 200)?;
    cinema.create_snack("Nachos", 9.0, 180)?;
    cinema.create_glass3d("3D glasses", 2.0, GlassSize::Adult)?;
    cinema.create_glass3d("3D glasses (kids)", 2.0, GlassSize::Child)?;

    cinema.save(&config.data_dir)?;
    println!("✓ Saved {} areas, {} seats, {} items", cinema.cleanable_areas().len(), cinema.seats().len(), cinema.items().len());
    Ok(())
}

fn run_report(config: &Config) -> Result<()> {
    let cinema = load(config)?;

    println!("📊 Cinema facility");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Floors:      {}", cinema.floors().len());
    println!("  Halls:       {}", cinema.halls().len());
    println!("  Restrooms:   {}", cinema.wcs().len());
    println!("  Seats:       {}", cinema.seats().len());
    println!("  Employees:   {}", cinema.employees().len());
    println!("  Screenings:  {}", cinema.screenings().iter().filter(|s| !s.is_cancelled()).count());
    println!("  Items:       {} (value {:.2})", cinema.items().len(), inventory_value(&cinema));

    let due = cinema.areas_to_clean();
    println!("\n🧹 Areas to clean: {}", due.len());
    for area in due {
        println!("  - {}", cinema.describe_area(area)?);
    }
    Ok(())
}

fn run_inventory(config: &Config) -> Result<()> {
    let cinema = load(config)?;
    write_inventory_csv(&cinema, io::stdout().lock())
}
