//! # Sample Inventory Generator
//!
//! Fills a database with sample import records for development.
//!
//! ## Usage
//! ```bash
//! # Generate 25 cars (default) into the configured database
//! cargo run -p carimport-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p carimport-store --bin seed -- --count 60
//!
//! # Specify database path
//! cargo run -p carimport-store --bin seed -- --db ./carimport_dev.db
//! ```
//!
//! ## Generated Cars
//! - Chassis: `{MODEL CODE}-{SERIAL}`, unique per run
//! - Auction price: 400,000 - 2,300,000 (origin currency)
//! - Ocean freight: 700 - 1,200 (shipping currency)
//! - Duty and VAT scaled from the auction price
//! - Status cycles through the lifecycle; every fifth car is sold

use carimport_core::{
    BasicInfo, CarInput, CarStatus, CostBreakdown, DEFAULT_MODEL_YEAR, SUGGESTED_MARKUP,
};
use carimport_store::{InventoryStore, StoreConfig};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 25;

/// (make, model, chassis code, engine cc)
const MODELS: &[(&str, &str, &str, u32)] = &[
    ("Toyota", "Axio", "NZE161", 1500),
    ("Toyota", "Premio", "NZT260", 1500),
    ("Toyota", "Noah", "ZRR80", 2000),
    ("Toyota", "C-HR", "ZYX10", 1800),
    ("Toyota", "Harrier", "ZSU60", 2000),
    ("Honda", "Vezel", "RU3", 1500),
    ("Honda", "Grace", "GM4", 1500),
    ("Honda", "Fit", "GP5", 1500),
    ("Nissan", "X-Trail", "HNT32", 2000),
    ("Nissan", "Note", "HE12", 1200),
    ("Mazda", "Axela", "BM5FP", 1500),
    ("Mitsubishi", "Outlander", "GG2W", 2000),
];

const COLORS: &[&str] = &["Pearl White", "Black", "Silver", "Wine Red", "Gun Metallic"];

const GRADES: &[&str] = &["3.5", "4", "4.5", "5", "R"];

/// Non-sold statuses cycled through for unsold cars.
const OPEN_STATUSES: &[CarStatus] = &[
    CarStatus::Purchased,
    CarStatus::InTransit,
    CarStatus::AtPort,
    CarStatus::Cleared,
    CarStatus::InShowroom,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,carimport_store=debug,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config = StoreConfig::load_or_default(None);
    let mut count = DEFAULT_COUNT;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Car Import Tracker Sample Inventory Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of cars to generate (default: 25)");
                println!("  -d, --db <PATH>    Database file path (default: from carimport.toml)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Car Import Tracker Seed");
    println!("==========================");
    println!("Database: {}", config.database_path.display());
    println!("Cars:     {}", count);
    println!();

    let mut store = InventoryStore::connect(&config).await?;
    println!("✓ Connected to database");

    if !store.inventory().is_empty() {
        println!("⚠ Inventory already has {} cars", store.inventory().len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Clear the inventory or delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating cars...");
    let start = std::time::Instant::now();

    let mut sold = 0;
    for seed in 0..count {
        let car = match store.add_car(sample_car(seed)).await {
            Ok(car) => car,
            Err(e) => {
                eprintln!("Failed to add car {}: {}", seed, e);
                continue;
            }
        };

        if seed % 5 == 4 {
            // Sold between 5% under and 25% over landed cost
            let factor = 0.95 + ((seed * 7) % 31) as f64 / 100.0;
            let price = (car.total_cost.as_f64() * factor / 1000.0).round() * 1000.0;
            store.mark_sold(&car.id, price).await?;
            sold += 1;
        }
    }

    let elapsed = start.elapsed();
    let summary = store.summary_statistics();

    println!();
    println!("✓ Generated {} cars ({} sold) in {:?}", summary.total_cars, sold, elapsed);
    println!("  Total investment: {}", summary.total_investment);
    for share in store.status_distribution() {
        println!(
            "  {:<10} {:>3} ({:.1}%)",
            share.status.label(),
            share.count,
            share.percentage
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one deterministic sample car.
fn sample_car(seed: usize) -> CarInput {
    let (make, model, code, engine_cc) = MODELS[seed % MODELS.len()];

    let car_price = 400_000.0 + ((seed * 137_000) % 1_900_000) as f64;
    let ocean_freight = 700.0 + ((seed * 45) % 500) as f64;

    let mut costs = CostBreakdown::default();
    costs.origin.car_price = car_price;
    costs.origin.auction_fees = (car_price * 0.04).round();
    costs.origin.agent_commission = (car_price * 0.03).round();
    costs.origin.deregistration_fee = 5_000.0;
    costs.origin.inland_transport = 15_000.0 + ((seed % 4) as f64) * 2_500.0;
    costs.shipping.ocean_freight = ocean_freight;
    costs.shipping.marine_insurance = 25.0;
    costs.shipping.documentation_fee = 40.0;

    let status = if seed % 5 == 4 {
        CarStatus::InShowroom
    } else {
        OPEN_STATUSES[seed % OPEN_STATUSES.len()]
    };

    // Destination charges only exist once the car has landed
    if matches!(
        status,
        CarStatus::AtPort | CarStatus::Cleared | CarStatus::InShowroom
    ) {
        let cfr = car_price * 1.05 + ocean_freight * 110.0;
        costs.destination_port.port_handling = 45_000.0;
        costs.destination_port.customs_duty = (cfr * 1.27).round();
        costs.destination_port.supplementary_duty = (cfr * 0.45).round();
        costs.destination_port.vat = (cfr * 0.15).round();
        costs.destination_port.ait = (cfr * 0.05).round();
        costs.destination_port.agent_fee = 12_000.0;
    }
    if matches!(status, CarStatus::Cleared | CarStatus::InShowroom) {
        costs.destination_inland.transport_to_showroom = 8_000.0;
        costs.destination_inland.reconditioning = 20_000.0 + ((seed % 3) as f64) * 10_000.0;
        costs.destination_inland.fitness_check = 6_500.0;
    }

    let estimated = car_price * 2.6;
    let target_selling_price = if seed % 3 == 0 {
        0.0
    } else {
        (estimated * SUGGESTED_MARKUP / 10_000.0).round() * 10_000.0
    };

    CarInput {
        basic_info: BasicInfo {
            chassis_number: format!("{}-{:07}", code, 1_000_000 + seed * 7_919),
            make: make.to_string(),
            model: model.to_string(),
            year: DEFAULT_MODEL_YEAR - 1 - (seed % 6) as i32,
            color: COLORS[seed % COLORS.len()].to_string(),
            engine_displacement_cc: engine_cc,
            transmission: "Automatic".to_string(),
            fuel_type: if seed % 4 == 1 { "Hybrid" } else { "Petrol" }.to_string(),
            auction_grade: GRADES[seed % GRADES.len()].to_string(),
        },
        costs,
        status,
        target_selling_price,
        notes: String::new(),
    }
}
