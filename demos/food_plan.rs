extern crate mcts_planner;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mcts_planner::config::SearchConfig;
use mcts_planner::ingest::{CategoryFilter, Columns, into_catalog, read_records, remove_empty};
use mcts_planner::item::{Catalog, Item};
use mcts_planner::mcts::MonteCarloTreeSearch;
use mcts_planner::random::{RandomGenerator, SeededRandomGenerator, StandardRandomGenerator};
use mcts_planner::report::write_csv;
use mcts_planner::scoring::Weights;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "food_plan")]
#[command(about = "Pick foods under a calorie limit, trading calories against energy")]
struct Args {
    /// CSV with food_category, food_name, cal_per_serving and kj_per_serving columns.
    /// A small built-in catalog is used when omitted.
    #[arg(long)]
    data: Option<PathBuf>,

    /// TOML search config; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep only these categories (repeatable).
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Calorie limit.
    #[arg(long)]
    capacity: Option<f64>,

    /// Raw importance of few calories; normalized together with --energy-weight.
    #[arg(long, default_value_t = 1.0)]
    calorie_weight: f64,

    /// Raw importance of much energy; normalized together with --calorie-weight.
    #[arg(long, default_value_t = 1.0)]
    energy_weight: f64,

    #[arg(long)]
    iterations: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Write root statistics as CSV to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SearchConfig::load_from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SearchConfig::default().apply_env_overrides(),
    };
    let weights = Weights::normalized(args.calorie_weight, args.energy_weight)?;
    config.cost_weight = weights.cost();
    config.benefit_weight = weights.benefit();
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    let catalog = load_catalog(&args)?;
    info!("Searching {} foods under {} calories", catalog.len(), config.capacity);

    match config.seed {
        Some(seed) => plan(catalog, &config, SeededRandomGenerator::new(seed), &args),
        None => plan(catalog, &config, StandardRandomGenerator::default(), &args),
    }
}

fn plan<K: RandomGenerator>(
    catalog: Catalog,
    config: &SearchConfig,
    random: K,
    args: &Args,
) -> Result<()> {
    let mut mcts = MonteCarloTreeSearch::builder(catalog)
        .with_random_generator(random)
        .with_config(config)
        .build()?;

    let plan = mcts.run(config.iterations)?;

    if let Some(path) = &args.report {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_csv(&mcts.root_report(), file)?;
        info!("Wrote root statistics to {}", path.display());
    }

    println!("Best food plan under {} calories:", config.capacity);
    for food in &plan.items {
        println!(
            "{} - Calories: {}, Energy: {}",
            food.id(),
            food.cost(),
            food.benefit()
        );
    }
    println!(
        "Total calories: {}, total energy: {}",
        plan.total_cost, plan.total_benefit
    );
    Ok(())
}

fn load_catalog(args: &Args) -> Result<Catalog> {
    let filter = if args.categories.is_empty() {
        CategoryFilter::All
    } else {
        CategoryFilter::only(args.categories.iter().cloned())
    };

    match &args.data {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            let records = remove_empty(read_records(file, &Columns::default())?);
            Ok(into_catalog(filter.apply(records))?)
        }
        None => Ok(Catalog::new(vec![
            Item::new("Apple", 52.0, 218.0)?,
            Item::new("Banana", 89.0, 371.0)?,
            Item::new("Boiled Egg", 155.0, 649.0)?,
            Item::new("Brown Rice", 111.0, 464.0)?,
            Item::new("Milk", 42.0, 176.0)?,
            Item::new("Salmon", 208.0, 870.0)?,
            Item::new("Whole Wheat Bread", 247.0, 1034.0)?,
        ])?),
    }
}
