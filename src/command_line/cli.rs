#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_dlx::dlx::solver::SearchStats;
use sudoku_dlx::sudoku::processor::{parse_sudoku, parse_sudoku_file, write_solution};
use sudoku_dlx::sudoku::solver::{Size, Solution, SudokuSolver};

/// Defines the command-line interface for the Sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku_dlx", version, about = "A Sudoku solver built on Dancing Links")]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand, it's
    /// treated as the path to a Sudoku puzzle file to solve.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the Sudoku solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a Sudoku puzzle file.
    Solve {
        /// Path to the puzzle file: D lines of D tokens, `_` for an empty
        /// cell, base-16 digits for pre-filled cells.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a Sudoku puzzle provided as plain text.
    Text {
        /// Literal puzzle input as a string (e.g. "4 _ _ 1\n_ 1 3 _\n...").
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file in a directory.
    Dir {
        /// Path to the directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output, echoing the puzzle size and the dimensions of
    /// the exact cover matrix before solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable verification of the found solution against the Sudoku rules.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and search statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,
}

/// Solves a single Sudoku puzzle file and reports the results.
///
/// # Errors
///
/// If the path does not point at a readable, well-formed puzzle file.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Sudoku file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    println!("Solving: {}", path.display());

    let time = Instant::now();
    let solver = parse_sudoku_file(path)?;
    let parse_time = time.elapsed();

    solve_and_report(solver, parse_time, common)
}

/// Solves a Sudoku puzzle given inline as text and reports the results.
///
/// # Errors
///
/// If the input is not a well-formed puzzle.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let solver = parse_sudoku(input)?;
    let parse_time = time.elapsed();

    solve_and_report(solver, parse_time, common)
}

/// Solves every `.sudoku` file under a directory.
///
/// # Errors
///
/// If the path is not a directory, or any contained puzzle fails to parse.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            continue;
        }

        if !file_path.is_file() {
            continue;
        }

        solve_file(file_path, common)?;
    }

    Ok(())
}

/// Solves a parsed puzzle, writes the solution, and prints verification and
/// statistics as requested by the common options.
fn solve_and_report(
    mut solver: SudokuSolver,
    parse_time: Duration,
    common: &CommonOptions,
) -> Result<(), String> {
    let size = solver.size();
    let digits = usize::from(size);

    if common.debug {
        println!("Puzzle size: {size}");
        println!("Matrix columns: {}", 4 * digits * digits);
        println!("Matrix rows: {}", digits * digits * digits);
    }

    let time = Instant::now();
    let solution = solver.solve();
    let elapsed = time.elapsed();

    match &solution {
        Some(solution) => {
            let mut stdout = io::stdout();
            write_solution(&mut stdout, solution)
                .map_err(|e| format!("Unable to write solution: {e}"))?;
        }
        None => println!("No valid Sudoku solution found"),
    }

    if common.verify {
        if let Some(solution) = &solution {
            verify_solution(solution);
        }
    }

    if common.stats {
        print_stats(parse_time, elapsed, size, solver.stats(), solution.is_some());
    }

    Ok(())
}

/// Verifies a found solution against the Sudoku rules.
///
/// Prints whether the verification was successful. If verification fails,
/// it panics.
fn verify_solution(solution: &Solution) {
    let ok = solution.is_valid();
    println!("Verified: {ok:?}");
    assert!(ok, "Solution failed verification!");
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    size: Size,
    stats: SearchStats,
    solved: bool,
) {
    let digits = usize::from(size);
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Puzzle size", size);
    stat_line("Matrix columns", 4 * digits * digits);
    stat_line("Matrix rows", digits * digits * digits);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", stats.decisions, elapsed_secs);
    stat_line_with_rate("Backtracks", stats.backtracks, elapsed_secs);
    stat_line_with_rate("Covers", stats.covers, elapsed_secs);
    stat_line("Max depth", stats.max_depth);
    stat_line("Solve time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solved {
        println!("\nSOLVED");
    } else {
        println!("\nNO SOLUTION FOUND");
    }
}
