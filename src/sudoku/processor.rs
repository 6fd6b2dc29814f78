#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Text input/output for Sudoku puzzles.
//!
//! The input is a stream of lines defining a partial Sudoku. For a Sudoku of
//! size D there are D lines of D tokens each: a base-16 digit for a
//! pre-filled cell, or `_` for an empty cell. Whitespace between tokens is
//! ignored, and the size is inferred from the number of tokens on the first
//! line. Sudokus of size 16 use the digit range 0..F for the values 1..16;
//! sizes 4 and 9 use their values directly.
//!
//! The output is the solved grid, one glyph per cell, each followed by a
//! single space, one line per row.

use crate::sudoku::matrix::{condition_indexes, SudokuMatrix};
use crate::sudoku::solver::{Size, Solution, SudokuSolver};
use smallvec::SmallVec;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// In the input, an empty cell is represented by an underscore.
pub const EMPTY_CELL: char = '_';

/// Glyphs used to print cell values, indexed by value in base 16.
const GLYPHS: &[u8] = b"0123456789ABCDEF";

/// An example 4x4 Sudoku puzzle in the processor's text format.
pub const EXAMPLE_FOUR: &str = "\
4 _ _ 1
_ 1 3 _
_ 4 1 _
1 _ _ 3
";

/// An example 9x9 Sudoku puzzle in the processor's text format.
pub const EXAMPLE_NINE: &str = "\
5 3 _ _ 7 _ _ _ _
6 _ _ 1 9 5 _ _ _
_ 9 8 _ _ _ _ 6 _
8 _ _ _ 6 _ _ _ 3
4 _ _ 8 _ 3 _ _ 1
7 _ _ _ 2 _ _ _ 6
_ 6 _ _ _ _ 2 8 _
_ _ _ 4 1 9 _ _ 5
_ _ _ _ 8 _ _ 7 9
";

/// An example 16x16 Sudoku puzzle in the processor's text format, using the
/// digit range 0..F.
pub const EXAMPLE_SIXTEEN: &str = "\
_ A _ _ _ 1 2 D _ _ 8 B _ _ _ F
E B _ _ _ A _ 0 C 9 _ _ _ _ 6 1
_ _ 9 _ _ _ _ _ F A _ 0 5 3 B 2
_ F D 0 _ 3 _ 5 _ 2 _ E _ 7 _ _
0 5 4 B _ _ A _ _ 8 7 _ _ _ _ _
_ _ _ 6 D 0 7 _ _ E 5 _ C 4 _ 3
3 E 7 _ 8 C _ _ _ _ 6 F 2 _ _ _
_ 8 C _ _ _ _ E 9 _ _ _ 6 5 _ A
D _ 5 A _ _ _ B 6 _ _ _ _ 2 C _
_ _ _ 4 7 D _ _ _ _ C A _ 0 1 5
C _ F 3 _ E 4 _ _ 0 B 5 7 _ _ _
_ _ _ _ _ F 9 _ _ 7 _ _ A 8 3 4
_ _ A _ 0 _ D _ 4 _ 2 _ E 6 F _
4 C E 2 F _ 3 6 _ _ _ _ _ 1 _ _
F 0 _ _ _ _ B 1 D _ E _ _ _ 2 7
8 _ _ _ C 4 _ _ 7 5 F _ _ _ 9 _
";

/// Reads a partial Sudoku from `input` and writes the solution to `output`.
///
/// On a parse error, or when the puzzle admits no solution, a single
/// human-readable message line is written instead.
///
/// # Returns
///
/// Whether a solution was found and written to the output.
pub fn process<R: BufRead, W: Write>(input: R, output: &mut W) -> bool {
    let mut solver = match parse_input(input) {
        Ok(solver) => solver,
        Err(message) => {
            let _ = writeln!(output, "{message}");
            return false;
        }
    };

    match solver.solve() {
        Some(solution) => write_solution(output, &solution).is_ok(),
        None => {
            let _ = writeln!(output, "No valid Sudoku solution found");
            false
        }
    }
}

/// Parses a partial Sudoku from the given stream into a solver with the
/// pre-filled cells pinned as input.
///
/// # Errors
///
/// Returns a human-readable message when the input is empty, the size is
/// not one of 4, 9, or 16, a line has a different number of tokens than the
/// first, the stream ends before D lines were read, a token is neither `_`
/// nor a digit valid for the puzzle size, or two pre-filled cells contradict
/// each other.
pub fn parse_input<R: BufRead>(input: R) -> Result<SudokuSolver, String> {
    let mut lines = input.lines().map_while(Result::ok);

    // The first line determines the Sudoku size.
    let first = lines
        .next()
        .ok_or_else(|| "Error: Input stream is empty".to_string())?;
    let mut tokens = line_tokens(&first);

    let size = Size::try_from(tokens.len()).map_err(|()| {
        format!(
            "Error: Unrecognized Sudoku size: {}. Valid sizes are: 4, 9, 16",
            tokens.len()
        )
    })?;
    let digits = usize::from(size);

    let mut solver = SudokuSolver::new(SudokuMatrix::new(size));
    // Conditions already claimed by a pin; a second claim means the givens
    // contradict each other and must not reach the engine.
    let mut claimed = vec![false; 4 * digits * digits];

    for row in 1..=digits {
        if tokens.len() != digits {
            return Err(format!(
                "Error: All lines should be of equal size. Read: {}. expected: {}",
                tokens.len(),
                digits
            ));
        }

        for (index, &token) in tokens.iter().enumerate() {
            if token == EMPTY_CELL {
                continue;
            }

            let column = index + 1;
            let number = token_to_number(token, size).ok_or_else(|| {
                format!("Error: Invalid token '{token}' for a Sudoku of size {digits}")
            })?;

            for condition in condition_indexes(size, row, column, number) {
                if claimed[condition] {
                    return Err(format!(
                        "Error: Conflicting input at row {row}, column {column}"
                    ));
                }
                claimed[condition] = true;
            }

            solver.set_input(row, column, number);
        }

        if row < digits {
            let line = lines.next().ok_or_else(|| {
                format!("Error: Read {row} lines. Expected to read {digits} lines instead")
            })?;
            tokens = line_tokens(&line);
        }
    }

    Ok(solver)
}

/// Parses a partial Sudoku from a string.
///
/// # Errors
///
/// See [`parse_input`].
pub fn parse_sudoku(text: &str) -> Result<SudokuSolver, String> {
    parse_input(text.as_bytes())
}

/// Parses a partial Sudoku from a file.
///
/// # Errors
///
/// Returns an error when the file cannot be read, or when its content is
/// not a valid Sudoku (see [`parse_input`]).
pub fn parse_sudoku_file(path: &Path) -> Result<SudokuSolver, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_sudoku(&content)
}

/// Writes a Sudoku solution to the given stream, one glyph per cell, each
/// followed by a single space, one line per row.
///
/// # Errors
///
/// Propagates write failures of the underlying stream.
pub fn write_solution<W: Write>(output: &mut W, solution: &Solution) -> io::Result<()> {
    let size = solution.size();
    let digits = usize::from(size);

    for row in 1..=digits {
        for column in 1..=digits {
            let number = solution.cell_value(row, column);
            write!(output, "{} ", number_to_glyph(number, size))?;
        }
        writeln!(output)?;
    }

    Ok(())
}

/// Interprets an input token as a cell value for the given puzzle size.
///
/// Sudokus of 16x16 start at 0 instead of 1 (digit range 0..F), so the
/// parsed value is incremented by one; sizes 4 and 9 use the parsed value
/// directly. Tokens outside `1..=D` yield `None`.
fn token_to_number(token: char, size: Size) -> Option<usize> {
    let digit = token.to_digit(16)? as usize;
    let number = if size == Size::Sixteen { digit + 1 } else { digit };

    (1..=usize::from(size)).contains(&number).then_some(number)
}

/// Prints a cell value with the appropriate glyph for the given puzzle
/// size, inverting the mapping of [`token_to_number`].
fn number_to_glyph(number: usize, size: Size) -> char {
    let index = if size == Size::Sixteen {
        number - 1
    } else {
        number
    };
    GLYPHS[index % GLYPHS.len()] as char
}

fn line_tokens(line: &str) -> SmallVec<[char; 16]> {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}
