use std::io::{self, Write};

use clap::{Parser, ValueEnum};

use u_nqueens::cp::{DfsSolver, SolverConfig, ValSelection, VarSelection};
use u_nqueens::queens::{self, BoardModel, DEFAULT_SEED};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BranchingArg {
    /// Random variable, random value.
    Random,
    /// Lowest-index cell first, queen first.
    InOrder,
    /// Cell closest to the board centre first, queen first.
    Middle,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for simplelog::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => simplelog::LevelFilter::Off,
            LogLevel::Error => simplelog::LevelFilter::Error,
            LogLevel::Warn => simplelog::LevelFilter::Warn,
            LogLevel::Info => simplelog::LevelFilter::Info,
            LogLevel::Debug => simplelog::LevelFilter::Debug,
            LogLevel::Trace => simplelog::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Solve N-Queens with one 0/1 variable per cell")]
struct Cli {
    /// Board size.
    #[arg(value_name = "INT", default_value = "9", allow_negative_numbers = true)]
    size: i64,

    /// Number of solutions to print (0 = all).
    #[arg(long, value_name = "INT", default_value = "1")]
    solutions: usize,

    /// Seed for the random branching.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Time limit in milliseconds (0 = none).
    #[arg(long, value_name = "MS", default_value = "0")]
    time: u64,

    /// Branching strategy.
    #[arg(long, value_enum, default_value = "random")]
    branching: BranchingArg,

    /// Log level.
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level.into(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let mut board = BoardModel::new(args.size)?;
    let (var, val) = match args.branching {
        BranchingArg::Random => (VarSelection::Random, ValSelection::Random),
        BranchingArg::InOrder => (VarSelection::InOrder, ValSelection::Max),
        BranchingArg::Middle => (VarSelection::Middle, ValSelection::Max),
    };
    board.select_branching(var, val, args.seed);

    let config = SolverConfig::default()
        .with_solution_limit(args.solutions)
        .with_time_limit_ms(args.time);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = queens::run(&board, &DfsSolver::new(), &config, &mut out)?;

    let stats = &outcome.stats;
    writeln!(out, "Initial")?;
    writeln!(out, "\tpropagators: {}", board.model().constraint_count())?;
    writeln!(out, "\tbranchers:   1")?;
    writeln!(out)?;
    writeln!(out, "Summary")?;
    writeln!(out, "\tstatus:       {:?}", outcome.status)?;
    writeln!(out, "\truntime:      {:.3} ms", time_total.elapsed().as_secs_f64() * 1000.0)?;
    writeln!(out, "\tsolutions:    {}", stats.solutions)?;
    writeln!(out, "\tpropagations: {}", stats.propagations)?;
    writeln!(out, "\tnodes:        {}", stats.nodes)?;
    writeln!(out, "\tfailures:     {}", stats.failures)?;
    writeln!(out, "\tpeak depth:   {}", stats.peak_depth)?;

    Ok(())
}
