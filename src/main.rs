//! stretchhash CLI
//!
//! # Commands
//!
//! - `derive` - Derive a digest (one or many iteration counts, in parallel)
//! - `mine-genesis` - Mine the genesis block
//! - `mine` - Mine a chain of blocks carrying a message
//! - `salt` - Generate a random salt
//! - `benchmark` - Measure stretching throughput
//! - `init-config` - Write a default config file

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use stretchhash::algorithm::{
    Algorithm, Clock, DerivationRequest, Difficulty, Digest, FixedClock, MAX_HEX_LENGTH,
    MinedBlock, Miner, SEED_SIZE, SystemClock, derive_batch_with, derive_with,
};
use stretchhash::config::{
    Config, MAX_CHAIN_BLOCKS, MIN_CHAIN_BLOCKS, Overrides, default_config_path,
};
use stretchhash::salt::{DEFAULT_SALT_BYTES, random_salt};

#[derive(Parser)]
#[command(name = "stretchhash")]
#[command(version)]
#[command(about = "Configurable-length iterative hash engine and block miner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: <config dir>/stretchhash/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Worker threads (default: number of CPU cores)
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Log debug events
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a digest from a code and salt
    Derive {
        /// Secret input
        #[arg(long)]
        code: String,

        /// Salt mixed into every stretching round
        #[arg(long, default_value = "")]
        salt: String,

        /// Stretching rounds; repeat to derive several digests at once
        #[arg(short, long)]
        iterations: Vec<u64>,

        /// Digest length in hex characters (even, 2-256)
        #[arg(short, long)]
        length: Option<usize>,

        /// Primitive hash: sha256 or blake3
        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Mine the genesis block
    MineGenesis {
        /// Difficulty 1-10
        #[arg(short, long)]
        difficulty: Option<u8>,

        /// Fixed block timestamp (unix seconds) for reproducible mining
        #[arg(long)]
        timestamp: Option<u32>,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Mine a genesis block followed by blocks carrying a message
    Mine {
        /// Number of blocks including genesis (2-888)
        #[arg(short, long)]
        blocks: u32,

        /// Transaction message stored in every non-genesis block
        #[arg(short, long)]
        message: String,

        /// Difficulty 1-10
        #[arg(short, long)]
        difficulty: Option<u8>,

        /// Fixed block timestamp (unix seconds) for reproducible mining
        #[arg(long)]
        timestamp: Option<u32>,

        /// Print the whole chain as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a random hex salt
    Salt {
        /// Number of random bytes
        #[arg(short, long, default_value_t = DEFAULT_SALT_BYTES)]
        bytes: usize,
    },

    /// Run stretching benchmark
    Benchmark {
        /// Number of stretching rounds
        #[arg(short, long, default_value = "100000")]
        iterations: u64,

        /// Primitive hash: sha256 or blake3
        #[arg(short, long)]
        algorithm: Option<Algorithm>,
    },

    /// Write a config file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // A broken config file must not block writing a fresh one
    let config = if matches!(cli.command, Commands::InitConfig { .. }) {
        Config::default()
    } else {
        Config::discover(cli.config.as_deref()).context("Failed to load config")?
    }
    .with_overrides(&Overrides {
        threads: cli.threads,
        ..Overrides::default()
    });
    configure_thread_pool(config.threads)?;

    match cli.command {
        Commands::Derive {
            code,
            salt,
            iterations,
            length,
            algorithm,
            json,
        } => {
            let config = config.with_overrides(&Overrides {
                algorithm,
                hex_length: length,
                ..Overrides::default()
            });
            cmd_derive(&config, &code, &salt, iterations, json)
        }
        Commands::MineGenesis {
            difficulty,
            timestamp,
            json,
        } => cmd_mine_genesis(difficulty.unwrap_or(config.difficulty), timestamp, json),
        Commands::Mine {
            blocks,
            message,
            difficulty,
            timestamp,
            json,
        } => cmd_mine(
            blocks,
            &message,
            difficulty.unwrap_or(config.difficulty),
            timestamp,
            json,
        ),
        Commands::Salt { bytes } => cmd_salt(bytes),
        Commands::Benchmark {
            iterations,
            algorithm,
        } => cmd_benchmark(iterations, algorithm.unwrap_or(config.algorithm), &config),
        Commands::InitConfig { force } => cmd_init_config(cli.config.as_deref(), force),
    }
}

/// Size the global rayon pool used by batch derivation and nonce search
fn configure_thread_pool(threads: Option<usize>) -> anyhow::Result<()> {
    let threads = threads.unwrap_or_else(num_cpus::get).max(1);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to start worker threads")?;
    debug!(threads, "worker pool ready");
    Ok(())
}

/// Block timestamps: wall clock, or pinned with `--timestamp`
enum CliClock {
    System,
    Fixed(FixedClock),
}

impl CliClock {
    fn new(timestamp: Option<u32>) -> Self {
        timestamp.map_or(CliClock::System, |t| CliClock::Fixed(FixedClock(t)))
    }
}

impl Clock for CliClock {
    fn unix_time(&self) -> u32 {
        match self {
            CliClock::System => SystemClock.unix_time(),
            CliClock::Fixed(clock) => clock.unix_time(),
        }
    }
}

#[derive(Serialize)]
struct DigestOutput<'a> {
    algorithm: Algorithm,
    iterations: u64,
    hex_length: usize,
    digest: &'a str,
}

#[derive(Serialize)]
struct BlockOutput {
    height: usize,
    timestamp: u32,
    nonce: u32,
    data_length: u32,
    data_hash: String,
    previous_header_hash: String,
    hash: String,
}

impl BlockOutput {
    fn new(height: usize, block: &MinedBlock) -> Self {
        Self {
            height,
            timestamp: block.header.timestamp,
            nonce: block.header.nonce,
            data_length: block.header.data_length,
            data_hash: block.data_hash_hex(),
            previous_header_hash: hex::encode(block.header.previous_header_hash),
            hash: block.hash_hex(),
        }
    }
}

fn cmd_derive(
    config: &Config,
    code: &str,
    salt: &str,
    iterations: Vec<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let iterations = if iterations.is_empty() {
        vec![config.iterations]
    } else {
        iterations
    };

    let requests: Vec<DerivationRequest> = iterations
        .iter()
        .map(|&rounds| DerivationRequest::new(code, salt, rounds, config.hex_length))
        .collect();

    let start = Instant::now();
    let digests = derive_batch_with(config.algorithm, &requests)
        .into_iter()
        .collect::<Result<Vec<Digest>, _>>()?;
    info!(
        algorithm = %config.algorithm,
        count = digests.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "derivation finished"
    );

    if json {
        let output: Vec<DigestOutput> = requests
            .iter()
            .zip(&digests)
            .map(|(request, digest)| DigestOutput {
                algorithm: config.algorithm,
                iterations: request.iterations,
                hex_length: request.hex_length,
                digest: digest.as_str(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let [digest] = digests.as_slice() {
        println!("{}", digest);
    } else {
        for (rounds, digest) in iterations.iter().zip(&digests) {
            println!("{}\t{}", rounds, digest);
        }
    }

    Ok(())
}

fn cmd_mine_genesis(difficulty: u8, timestamp: Option<u32>, json: bool) -> anyhow::Result<()> {
    let difficulty = Difficulty::new(difficulty)?;
    let miner = Miner::new(difficulty).with_clock(CliClock::new(timestamp));

    println!("Mining genesis block at difficulty {}...", difficulty);
    let start = Instant::now();
    let genesis = miner.mine_genesis()?;
    let elapsed = start.elapsed();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&BlockOutput::new(0, &genesis))?
        );
    } else {
        print_block(&genesis);
        println!("  Time:        {:.2}s", elapsed.as_secs_f64());
    }

    Ok(())
}

fn cmd_mine(
    blocks: u32,
    message: &str,
    difficulty: u8,
    timestamp: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    anyhow::ensure!(!message.is_empty(), "Describe your transaction in words");
    anyhow::ensure!(
        (MIN_CHAIN_BLOCKS..=MAX_CHAIN_BLOCKS).contains(&blocks),
        "Blocks must be {} to {}",
        MIN_CHAIN_BLOCKS,
        MAX_CHAIN_BLOCKS
    );
    let difficulty = Difficulty::new(difficulty)?;
    info!(difficulty = difficulty.level(), transaction = message, "mining chain");

    let miner = Miner::new(difficulty).with_clock(CliClock::new(timestamp));
    let start = Instant::now();
    let chain = miner.mine_chain(blocks, message.as_bytes())?;
    let elapsed = start.elapsed();

    if json {
        let output: Vec<BlockOutput> = chain
            .iter()
            .enumerate()
            .map(|(height, block)| BlockOutput::new(height, block))
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let last = chain.last().context("Mined chain is empty")?;
    println!("\nMined {} blocks at difficulty {}", chain.len(), difficulty);
    print_block(last);
    println!("  Time:        {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

fn print_block(block: &MinedBlock) {
    println!("  Data hash:   {}", block.data_hash_hex());
    println!("  Header hash: {}", block.hash_hex());
    println!("  Nonce:       {}", block.header.nonce);
    println!("  Timestamp:   {}", block.header.timestamp);
}

fn cmd_salt(bytes: usize) -> anyhow::Result<()> {
    println!("{}", random_salt(bytes)?);
    Ok(())
}

fn cmd_benchmark(iterations: u64, algorithm: Algorithm, config: &Config) -> anyhow::Result<()> {
    println!(
        "Running benchmark with {} {} rounds...",
        iterations, algorithm
    );

    let request = DerivationRequest::new(
        "benchmark code",
        "benchmark salt",
        iterations,
        config.hex_length,
    );

    let start = Instant::now();
    let digest = derive_with(algorithm, &request)?;
    let elapsed = start.elapsed();
    let rate = iterations as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Rounds:       {}", iterations);
    println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());
    println!("  Rounds/s:     {:.0}", rate);
    println!("  Digest:       {}", digest);

    println!("\nEngine parameters:");
    println!("  Primitive:    {}", algorithm);
    println!("  Seed size:    {} bytes", SEED_SIZE);
    println!("  Max length:   {} hex chars", MAX_HEX_LENGTH);

    Ok(())
}

fn cmd_init_config(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);

    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite it.",
            path.display()
        );
    }

    Config::default().save(&path)?;
    println!("Config written to {}", path.display());

    Ok(())
}
