//! Generates a random nested list of consecutive integers, prints it,
//! flattens it and prints the result.
//!
//! Run with: cargo run --bin lispy -- --max 30 --depth 5
//!
//! Logging is controlled by the `LISPY_LOG` environment variable
//! (e.g. `LISPY_LOG=debug`).

use clap::{Parser, ValueEnum};
use lispy_list::{DEFAULT_MAX_ELEMENTS, Heap, Lcg, List, PrintOptions, Value};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Accumulator flatten, recursive
    Acc,
    /// Accumulator flatten on an explicit stack
    AccIter,
    /// Destructive flatten built on nconc
    Splice,
    /// Flatten by traversal, one splice per atom
    Traverse,
}

#[derive(Debug, Parser)]
#[command(name = "lispy", version, about)]
struct Cli {
    /// Start value for numbers
    #[arg(long, default_value_t = 1)]
    start: i64,

    /// How many numbers to generate
    #[arg(short = 'n', long, default_value_t = 20)]
    max: usize,

    /// Maximum nesting depth
    #[arg(long, default_value_t = 7)]
    depth: usize,

    /// Seed for the list generator; taken from the clock if absent
    #[arg(long)]
    seed: Option<u64>,

    /// Atoms printed before a list is cut short with `...`
    #[arg(long, default_value_t = DEFAULT_MAX_ELEMENTS)]
    max_print: usize,

    #[arg(long, value_enum, default_value_t = Algorithm::Splice)]
    algorithm: Algorithm,

    /// Print successive car/cdr pairs instead of flattening
    #[arg(long)]
    walk: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn walk(heap: &Heap<i64>, mut list: List, options: PrintOptions) -> lispy_list::Result<()> {
    while list.is_some() {
        let car = heap.cxr("a", list)?;
        let cdr = heap.cxr("d", list)?;
        println!("car={}", heap.display_with(&car, options));
        println!("cdr={}", heap.display_with(&cdr, options));
        list = cdr.to_list()?;
    }
    Ok(())
}

fn atom_count(heap: &Heap<i64>, tree: List) -> usize {
    let mut count = 0;
    heap.traverse(tree, |_| count += 1);
    count
}

fn main() -> ExitCode {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().filter_or("LISPY_LOG", "warn")).init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!("seed {seed}");

    let mut heap = Heap::new();
    let mut rng = Lcg::new(seed);
    let tree = heap.gen_nested_list(&mut rng, cli.start, cli.max, cli.depth);
    let options = PrintOptions::default().with_max_elements(cli.max_print);
    println!("{}", heap.display_with(&Value::from(tree), options));

    if cli.walk {
        return match walk(&heap, tree, options) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    // counted up front, the splice flatten consumes the tree
    let atoms = atom_count(&heap, tree);

    heap.reset_stats();
    let flat = match cli.algorithm {
        Algorithm::Acc => heap.flatten_acc(tree),
        Algorithm::AccIter => heap.flatten_acc_iter(tree),
        Algorithm::Splice => heap.flatten_splice(tree),
        Algorithm::Traverse => heap.flatten_traverse(tree),
    };
    let stats = heap.stats();
    log::info!(
        "{:?}: {} cells allocated, {} tail links walked",
        cli.algorithm,
        stats.allocations,
        stats.tail_walks
    );
    println!("{}", heap.display_with(&Value::from(flat), options));

    if heap.is_ascending_run(flat, cli.start, atoms) {
        ExitCode::SUCCESS
    } else {
        log::error!("flattened list is not a run of {atoms} integers from {}", cli.start);
        ExitCode::FAILURE
    }
}
