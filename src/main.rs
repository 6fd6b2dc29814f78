//! Command-line entry point for the Sudoku solver.
//!
//! Without arguments, a puzzle is read from standard input and the solution
//! written to standard output. Otherwise the subcommands solve puzzle files,
//! inline text, or whole directories; see `--help`.

use clap::{CommandFactory, Parser};
use std::io;
use std::process::ExitCode;
use sudoku_dlx::sudoku::processor::process;

mod command_line;

use command_line::cli::{self, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Solve { path, common }) => cli::solve_file(path, common),
        Some(Commands::Text { input, common }) => cli::solve_text(input, common),
        Some(Commands::Dir { path, common }) => cli::solve_dir(path, common),
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(*shell, &mut command, name, &mut io::stdout());
            Ok(())
        }
        None => match &cli.path {
            Some(path) => cli::solve_file(path, &cli.common),
            None => {
                let stdin = io::stdin();
                let mut stdout = io::stdout();
                return if process(stdin.lock(), &mut stdout) {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                };
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
