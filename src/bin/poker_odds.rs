use clap::{ArgAction, Parser};
use poker_odds::config::{SimulationConfig, DEFAULT_TRIALS};
use poker_odds::evaluator::EvalMode;
use poker_odds::hand::{InputError, Street};
use poker_odds::request::OddsRequest;
use poker_odds::simulator::{SimulationError, Simulator};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "poker-odds",
    version,
    about = "Estimate Hold'em win/lose/tie odds against two random opponents",
    long_about = "Run a Monte Carlo simulation of the rest of the hand against two random \
                  opponents.\nGive your two hole cards and, optionally, the flop, turn and river \
                  that are already known."
)]
struct Args {
    /// Hole cards, e.g. `AS AH` or `"AS,AH"`
    #[arg(required = true, num_args = 1..)]
    hero: Vec<String>,

    /// Known community cards in dealing order (3 for the flop, 4 after the turn, 5 after the river)
    #[arg(short, long, num_args = 1..)]
    board: Vec<String>,

    /// Street to evaluate; inferred from the board when omitted
    #[arg(long)]
    street: Option<Street>,

    /// Number of trials to run
    #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
    trials: u64,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Worker count (defaults to the available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Hand evaluation mode: whole-set or best-five
    #[arg(long, default_value_t = EvalMode::WholeSet)]
    mode: EvalMode,

    /// Print the odds as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::default().with_trials(self.trials).with_mode(self.mode);
        if let Some(threads) = self.threads {
            config = config.with_workers(threads);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    fn request(&self) -> OddsRequest {
        let mut request = OddsRequest::new(split_ids(&self.hero)).with_board(split_ids(&self.board));
        if let Some(street) = self.street {
            request = request.with_street(street);
        }
        request
    }
}

/// Accept both `AS AH` and `"AS,AH"` style arguments.
fn split_ids(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|a| a.split(|c: char| c.is_whitespace() || c == ','))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("could not serialize odds: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// 2 for bad input, 1 for anything that went wrong on our side.
    fn exit_status(&self) -> u8 {
        match self {
            CliError::Simulation(SimulationError::Input(_)) => 2,
            _ => 1,
        }
    }
}

impl From<InputError> for CliError {
    fn from(e: InputError) -> Self {
        CliError::Simulation(e.into())
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let request = args.request();
    let known = request.known_cards()?;
    let config = args.config();

    let tally = Simulator::new(config).run_counts(&known)?;
    let odds = tally.odds();

    if args.json {
        println!("{}", serde_json::to_string(&odds)?);
        return Ok(());
    }

    println!(
        "street: {}  trials: {}  mode: {}",
        known.street(),
        config.trials,
        config.mode
    );
    println!("win   {:>6.2}%  ({})", odds.win, tally.win);
    println!("lose  {:>6.2}%  ({})", odds.lose, tally.lose);
    println!("tie   {:>6.2}%  ({})", odds.tie, tally.tie);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ CliError::Simulation(SimulationError::Input(_))) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_status())
        }
        Err(e) => {
            tracing::error!(error = %e, "odds run failed");
            eprintln!("error: internal failure: {e}");
            ExitCode::from(e.exit_status())
        }
    }
}
