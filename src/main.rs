//! # Hoardsmith Command Line
//!
//! Enchants one base item from the bundled templates and prints the result.

use clap::Parser;
use hoardsmith::generation::utils::standard_sources;
use hoardsmith::{
    config, BaseItems, EnchantedArmorGenerator, EnchantedWeaponGenerator, EnchantmentConfig,
    Enchanter, Generator, HoardError, HoardResult, Power, StaticCatalog, TableSet, WeightedTables,
};
#[cfg(feature = "dev-tools")]
use tracing::{error, info, Level};
#[cfg(feature = "dev-tools")]
use tracing_subscriber;

#[cfg(not(feature = "dev-tools"))]
macro_rules! info {
    ($($arg:tt)*) => { eprintln!($($arg)*) };
}

#[cfg(not(feature = "dev-tools"))]
macro_rules! error {
    ($($arg:tt)*) => { eprintln!($($arg)*) };
}

/// Command line arguments for Hoardsmith.
#[derive(Parser, Debug)]
#[command(name = "hoardsmith")]
#[command(about = "Rolls special abilities onto magic weapons and armor")]
#[command(version)]
struct Args {
    /// Random seed for table and spell draws
    #[arg(short, long, default_value_t = config::DEFAULT_SEED)]
    seed: u64,

    /// Treasure power level (minor, medium, major)
    #[arg(short, long, default_value = "medium")]
    power: Power,

    /// Enhancement bonus of the item
    #[arg(short, long, default_value_t = 1)]
    bonus: i32,

    /// Number of special abilities to roll
    #[arg(short, long, default_value_t = 1)]
    abilities: usize,

    /// Base item name, such as "Longsword" or "Heavy steel shield"
    #[arg(long, default_value = "Longsword")]
    base: String,

    /// Ability catalog JSON file replacing the bundled catalog
    #[arg(long)]
    catalog: Option<String>,

    /// Table JSON file replacing the bundled tables
    #[arg(long)]
    tables: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the enchanted item as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> HoardResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    if let Err(e) = run(&args) {
        error!("Enchantment failed: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> HoardResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();

        info!("Hoardsmith v{} logging at {}", hoardsmith::VERSION, level);
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let _ = log_level;
    }

    Ok(())
}

fn run(args: &Args) -> HoardResult<()> {
    let catalog = match &args.catalog {
        Some(path) => StaticCatalog::from_path(path)?,
        None => StaticCatalog::standard()?,
    };

    let config = EnchantmentConfig::new(args.seed);
    let enchanter = Enchanter::new(&catalog, &config);
    let (mut tables, mut spells) = standard_sources(&config)?;
    if let Some(path) = &args.tables {
        tables = WeightedTables::new(TableSet::from_path(path)?, config.seed);
    }
    let bases = BaseItems::standard()?;

    info!(
        "Enchanting {} at {} power, +{} with {} abilities (seed {})",
        args.base, args.power, args.bonus, args.abilities, args.seed
    );

    if let Ok(base) = bases.weapon(&args.base) {
        let generator =
            EnchantedWeaponGenerator::new(base.clone(), args.power, args.bonus, args.abilities);
        let weapon = generator.generate_validated(&enchanter, &mut tables, &mut spells)?;

        println!("{}", weapon);
        for spell in &weapon.item.contents {
            println!("  stores {}", spell);
        }
        if args.json {
            println!("{}", serde_json::to_string_pretty(&weapon)?);
        }
        return Ok(());
    }

    let base = bases.armor(&args.base).map_err(|_| {
        HoardError::UnknownBase(format!(
            "{} (known: {})",
            args.base,
            bases.names().join(", ")
        ))
    })?;
    let generator =
        EnchantedArmorGenerator::new(base.clone(), args.power, args.bonus, args.abilities);
    let armor = generator.generate_validated(&enchanter, &mut tables, &mut spells)?;

    println!("{}", armor);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&armor)?);
    }

    Ok(())
}
