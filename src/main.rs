//! Command line interface to the room assignment optimizer.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use u_rooming::sa::create_rng;
use u_rooming::{io::load_matrix, optimize, Config, Report};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assigns students to rooms by simulated annealing")]
struct Args {
    /// TOML configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rating matrix file (defaults to roommates.txt)
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Initial temperature (defaults to 1000)
    #[arg(short = 'T', long)]
    temperature: Option<f64>,

    /// Number of students placed into rooms (defaults to 200)
    #[arg(short = 's', long)]
    student_count: Option<usize>,

    /// Students per room (defaults to 4)
    #[arg(short = 'c', long)]
    room_capacity: Option<usize>,

    /// Temperature cooling factor in (0, 1) (defaults to 0.95)
    #[arg(short = 'a', long)]
    cooling_factor: Option<f64>,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many attempted moves
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Log cooling steps
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> u_rooming::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(file) = self.file {
            config.input = file;
        }
        if let Some(t) = self.temperature {
            config.anneal.initial_temperature = t;
        }
        if let Some(n) = self.student_count {
            config.population = n;
        }
        if let Some(c) = self.room_capacity {
            config.capacity = c;
        }
        if let Some(alpha) = self.cooling_factor {
            config.anneal.cooling_factor = alpha;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(n) = self.max_iterations {
            config.anneal.max_iterations = n;
        }
        Ok(config)
    }
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> u_rooming::Result<()> {
    let started = Instant::now();
    let mut config = args.into_config()?;
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    config.seed = Some(seed);
    info!(seed, input = %config.input.display(), "starting run");

    let matrix = load_matrix(&config.input, config.population)?;

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    if let Err(err) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
        warn!(%err, "cannot install interrupt handler");
    }

    let mut rng = create_rng(Some(seed));
    let result = optimize(&matrix, &config, &mut rng, Some(&cancel))?;

    print!(
        "{}",
        Report {
            config: &config,
            matrix: &matrix,
            result: &result,
            elapsed: started.elapsed(),
        }
    );
    Ok(())
}
