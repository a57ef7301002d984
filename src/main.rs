use branching_solver::cnf_reader;
use branching_solver::config::{DEFAULT_NODE_BUDGET, DEFAULT_PROGRESS_INTERVAL};
use branching_solver::{Error, Formula, Outcome, Solver, SolverConfig};

use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

/// Decide whether a CNF formula in DIMACS format is satisfiable
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// The DIMACS CNF file to solve
    file: PathBuf,

    /// The most decision-tree nodes alive at once
    #[arg(long, default_value_t = DEFAULT_NODE_BUDGET)]
    node_budget: usize,

    /// Log progress every this many nodes (0 to disable)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_interval: usize,

    /// Skip checking a satisfying assignment against the formula
    #[arg(long)]
    no_verify: bool,
}

/// Open `file`, falling back to the `test/` and `test/test_cases/`
/// directories when it isn't found as given
fn load(file: &Path) -> Result<Formula, Error> {
    let candidates = [
        file.to_path_buf(),
        Path::new("test").join(file),
        Path::new("test/test_cases").join(file),
    ];
    for path in &candidates {
        match cnf_reader::read_from_file(path) {
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not found", path.display());
            }
            result => return result,
        }
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("could not open {}", file.display()),
    )
    .into())
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let formula = match load(&cli.file) {
        Ok(formula) => formula,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.file.display(), e);
            process::exit(1);
        }
    };

    let config = SolverConfig::default()
        .with_node_budget(cli.node_budget)
        .with_progress_interval(cli.progress_interval);
    let mut solver = Solver::new(&formula, config);

    match solver.solve() {
        Outcome::Satisfiable(model) => {
            println!("SAT!");
            println!("{}", model);
            if !cli.no_verify {
                if let Some(clause) = formula.first_unsatisfied(&model) {
                    log::error!("Not satisfied: {:?}", clause);
                    process::exit(2);
                }
                log::info!("Model checked against all {} clauses", formula.clause_count());
            }
        }
        Outcome::Unsatisfiable => println!("UNSAT!"),
        Outcome::Unknown => println!(
            "UNKNOWN! (node budget of {} exhausted)",
            solver.config().node_budget
        ),
    }
}
