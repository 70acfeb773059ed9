mod os_signal_termination;
mod parsers;
mod result;

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gourd_solver::asserts::GOURD_ASSERT_LEVEL_DEFINITION;
use gourd_solver::asserts::GOURD_ASSERT_MODERATE;
use gourd_solver::options::*;
use gourd_solver::race::diversify;
use gourd_solver::race::race;
use gourd_solver::race::Answer;
use gourd_solver::statistics::configure_statistic_logging;
use gourd_solver::Formula;
use log::error;
use log::info;
use log::warn;
use log::Level;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use parsers::dimacs::parse_cnf;
use result::GourdError;
use result::GourdResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The instance to solve, given in the DIMACS format with the '*.cnf' extension.
    ///
    /// Besides clauses, lines starting with 'x' are read as XOR constraints: 'x1 -2 3 0' states
    /// that an odd number of the literals 1, -2 and 3 is true.
    #[clap(verbatim_doc_comment)]
    instance_path: PathBuf,

    /// The time budget for the solver, given in milliseconds.
    ///
    /// Possible values: u64 (Optional)
    #[arg(
        short = 't',
        long = "time-limit",
        conflicts_with = "conflict_limit",
        verbatim_doc_comment
    )]
    time_limit: Option<u64>,

    /// The number of conflicts after which the solver gives up.
    ///
    /// Cannot be combined with "--time-limit".
    ///
    /// Possible values: u64 (Optional)
    #[arg(long = "conflict-limit", verbatim_doc_comment)]
    conflict_limit: Option<u64>,

    /// Decides when restarts happen.
    ///
    /// - The "none" approach never restarts
    /// - The "sequence" approach restarts after a number of conflicts given by the sequence of
    ///   "--restart-sequence-generator-type"
    /// - The "glucose" approach restarts when recently learned clauses are of poor quality
    ///   compared to the long-term average (see "Refining Restarts Strategies for SAT and UNSAT -
    ///   Audemard and Simon (2012)")
    #[arg(long, value_enum, default_value_t, verbatim_doc_comment)]
    restart_strategy: RestartStrategyType,

    /// Decides the sequence based on which the restarts are performed when the restart strategy
    /// is "sequence".
    ///
    /// - The "constant" approach uses a constant number of conflicts before another restart is
    ///   triggered
    /// - The "geometric" approach uses a geometrically increasing sequence
    /// - The "luby" approach uses a recursive sequence of the form 1, 1, 2, 1, 1, 2, 4, 1, 1, 2,
    ///   1, 1, 2, 4, 8, 1, 1, 2.... (see "Optimal speedup of Las Vegas algorithms - Luby et al.
    ///   (1993)")
    ///
    /// To be used in combination with "--restart-base-interval".
    #[arg(long, value_enum, default_value_t, verbatim_doc_comment)]
    restart_sequence_generator_type: SequenceGeneratorType,

    /// The base interval length is used as a multiplier to the restart sequence.
    /// - In the case of the "constant" restart sequence this argument indicates the constant which
    ///   is used to determine when a restart occurs
    /// - For the "geometric" approach this argument indicates the starting value of the sequence
    /// - For the "luby" approach, the sequence is multiplied by this value
    ///
    /// For example, constant restarts with base interval 50 means a restart is triggered every 50
    /// conflicts.
    ///
    /// Possible values: u64
    #[arg(
        long = "restart-base-interval",
        default_value_t = 50,
        verbatim_doc_comment
    )]
    restart_base_interval: u64,

    /// Indicates the minimum number of initial conflicts before the first restart can occur. This
    /// allows the solver to learn some things about the problem before a restart is allowed to
    /// occur.
    ///
    /// Possible values: u64
    #[arg(
        long = "restart-min-initial-conflicts",
        default_value_t = 10000,
        verbatim_doc_comment
    )]
    restart_min_num_conflicts_before_first_restart: u64,

    /// Used to determine if a restart should be forced when the restart strategy is "glucose".
    ///
    /// The state is "bad" if the current LBD value is much greater than the global LBD average. A
    /// greater (lower) value for lbd-coef means a less (more) frequent restart policy. If the
    /// long-term average LBD multiplied by this coefficient is lower than the short-term average
    /// LBD then a restart is performed.
    ///
    /// Possible values: f64
    #[arg(
        long = "restart-lbd-coef",
        default_value_t = 1.25,
        verbatim_doc_comment
    )]
    restart_lbd_coef: f64,

    /// Used to determine if a restart should be blocked when the restart strategy is "glucose".
    ///
    /// To be used in combination with "--restart-num-assigned-window".
    ///
    /// A restart is blocked if the number of assigned propositional variables is much greater than
    /// the average number of assigned variables in the recent past. A greater (lower) value for
    /// "--restart-num-assigned-coef" means fewer (more) blocked restarts.
    ///
    /// Possible values: f64
    #[arg(
        long = "restart-num-assigned-coef",
        default_value_t = 1.4,
        verbatim_doc_comment
    )]
    restart_num_assigned_coef: f64,

    /// Used to determine the length of the recent past that should be considered when deciding on
    /// blocking restarts.
    ///
    /// The solver considers the last "--restart-num-assigned-window" conflicts as the reference
    /// point for the number of assigned variables.
    ///
    /// Possible values: u64
    #[arg(
        long = "restart-num-assigned-window",
        default_value_t = 5000,
        verbatim_doc_comment
    )]
    restart_num_assigned_window: u64,

    /// The coefficient in the geometric sequence `x_i = x_{i-1} * "--restart-geometric-coef"`
    /// where `x_1 = "--restart-base-interval"`. Used only if "--restart-sequence-generator-type"
    /// is "geometric".
    ///
    /// Possible values: f64
    #[arg(
        long = "restart-geometric-coef",
        default_value_t = 1.5,
        verbatim_doc_comment
    )]
    restart_geometric_coef: f64,

    /// Decides which half of the learned clauses is forgotten when the database is reduced.
    #[arg(long, value_enum, default_value_t)]
    deletion_strategy: DeletionStrategyType,

    /// Learned clauses with a literal block distance up to this threshold are never forgotten
    /// by the LBD based deletion strategies.
    ///
    /// Possible values: u32
    #[arg(
        long = "learning-lbd-threshold",
        default_value_t = 2,
        verbatim_doc_comment
    )]
    learning_lbd_threshold: u32,

    /// Decides how learned clauses are minimised after they have been derived.
    #[arg(long, value_enum, default_value_t)]
    minimisation: LearnedClauseMinimisation,

    /// Decides which value is tried first for a decided variable.
    #[arg(long, value_enum, default_value_t)]
    phase: PhaseSelection,

    /// The random seed to use for the Pseudo Random Number Generator.
    ///
    /// Randomisation is used when deciding random variables or random values. When several
    /// solvers race, each of them derives its own seed from this one.
    ///
    /// Possible values: u64
    #[arg(
        short = 'r',
        long = "random-seed",
        default_value_t = 42,
        verbatim_doc_comment
    )]
    random_seed: u64,

    /// When the instance is satisfiable, also print a prime implicant of the model, computed
    /// with the given strategy, on a comment line.
    #[arg(long, value_enum)]
    prime_implicant: Option<PrimeImplicantStrategyType>,

    /// The number of differently configured solvers which race to solve the instance, each in
    /// its own thread.
    ///
    /// Possible values: u32 (at least 1)
    #[arg(
        short = 'p',
        long = "parallel",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        verbatim_doc_comment
    )]
    parallel: u32,

    /// Enables log message output from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,

    /// If `--verbose` is enabled then this option removes the timestamp information from the log
    /// messages.
    ///
    /// Possible values: bool
    #[arg(long = "omit-timestamp", verbatim_doc_comment)]
    omit_timestamp: bool,

    /// If `--verbose` is enabled then this option removes the call site information from the log
    /// messages. The call site is the file and line from which the message originated.
    ///
    /// Possible values: bool
    #[arg(long = "omit-call-site", default_value_t = false, verbatim_doc_comment)]
    omit_call_site: bool,
}

fn configure_logging(
    verbose: bool,
    log_statistics: bool,
    omit_timestamp: bool,
    omit_call_site: bool,
) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging("c STAT", None, None, None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "c ")?;
            if record.level() != Level::Info && !omit_timestamp {
                write!(buf, "{} ", buf.timestamp())?;
            }
            write!(buf, "{} ", record.level())?;
            if record.level() != Level::Info && !omit_call_site {
                write!(
                    buf,
                    "[{}:{}] ",
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0)
                )?;
            }
            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> GourdResult<()> {
    let args = Args::parse();

    configure_logging(
        args.verbose,
        args.log_statistics,
        args.omit_timestamp,
        args.omit_call_site,
    )?;

    if GOURD_ASSERT_LEVEL_DEFINITION >= GOURD_ASSERT_MODERATE {
        warn!(
            "Potential performance degradation: the Gourd assert level is set to {GOURD_ASSERT_LEVEL_DEFINITION}, meaning many debug asserts are active which may result in performance degradation."
        );
    }

    if args.instance_path.extension().and_then(|ext| ext.to_str()) != Some("cnf") {
        return Err(GourdError::invalid_instance(args.instance_path.display()));
    }

    let timeout = match (args.time_limit, args.conflict_limit) {
        (Some(time_limit), _) => Timeout::WallClock(Duration::from_millis(time_limit)),
        (None, Some(conflict_limit)) => Timeout::Conflicts(conflict_limit),
        (None, None) => Timeout::None,
    };
    let restart_options = RestartOptions {
        strategy: args.restart_strategy,
        sequence_generator_type: args.restart_sequence_generator_type,
        base_interval: args.restart_base_interval,
        min_num_conflicts_before_first_restart: args.restart_min_num_conflicts_before_first_restart,
        lbd_coef: args.restart_lbd_coef,
        num_assigned_coef: args.restart_num_assigned_coef,
        num_assigned_window: args.restart_num_assigned_window,
        geometric_coef: args.restart_geometric_coef,
    };
    let learning_options = LearningOptions {
        deletion_strategy: args.deletion_strategy,
        lbd_threshold: args.learning_lbd_threshold,
        ..Default::default()
    };
    let solver_options = SolverOptions {
        restart_options,
        learning_options,
        learned_clause_minimisation: args.minimisation,
        phase_selection: args.phase,
        prime_implicant_strategy: args.prime_implicant.unwrap_or_default(),
        random_seed: args.random_seed,
        timeout,
        ..Default::default()
    };

    let instance_file = File::open(&args.instance_path)?;
    let formula = parse_cnf::<Formula>(instance_file)?;
    info!(
        "Read {} constraints over {} variables",
        formula.constraints().len(),
        formula.num_variables()
    );

    let configurations = diversify(solver_options, args.parallel as usize);
    let mut interrupt = OsSignal::install()?;
    let result = race(
        &formula,
        &configurations,
        args.prime_implicant.is_some(),
        &mut interrupt,
    );

    match result.answer {
        Answer::Satisfiable {
            model,
            prime_implicant,
        } => {
            println!("s SATISFIABLE");
            println!("v {}", stringify_literals(&model));
            if let Some(prime_implicant) = prime_implicant {
                println!("c prime implicant {}", stringify_literals(&prime_implicant));
            }
        }
        Answer::Unsatisfiable => println!("s UNSATISFIABLE"),
        Answer::Unknown => println!("s UNKNOWN"),
    }

    Ok(())
}

/// Writes the literals separated by spaces and terminated with a 0.
fn stringify_literals(literals: &[i32]) -> String {
    literals
        .iter()
        .map(|literal| format!("{literal} "))
        .chain(std::iter::once(String::from("0")))
        .collect::<String>()
}
