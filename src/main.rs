use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use chess_rules::{Cell, Game, MatchInterface, RuleEngine, Square};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

const HELP: &str = "\
commands:
  r c r c       move the piece on (r, c) to (r, c)
  moves r c     legal destinations of the piece on (r, c)
  save <path>   write the position to a file
  load <path>   read a position from a file
  reset         start over
  quit";

fn main() -> Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=trace`).
    info!("Starting a new game");

    let mut game = Game::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    render(&game, &mut stdout)?;
    println!("{HELP}");
    loop {
        print!("{} > ", game.current_player());
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<_> = line.split_whitespace().collect();
        let outcome = match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["reset"] => {
                game.reset();
                Ok(true)
            }
            ["moves", row, col] => show_moves(&game, row, col).map(|_| false),
            ["save", path] => save(&game, path).map(|_| false),
            ["load", path] => load(&mut game, path).map(|_| true),
            [from_row, from_col, to_row, to_col] => {
                play(&mut game, [*from_row, *from_col, *to_row, *to_col]).map(|_| true)
            }
            _ => {
                println!("{HELP}");
                Ok(false)
            }
        };
        match outcome {
            Ok(true) => render(&game, &mut stdout)?,
            Ok(false) => {}
            Err(err) => {
                warn!("{err:#}");
                println!("error: {err:#}");
            }
        }
    }
    Ok(())
}

fn parse_square(row: &str, col: &str) -> Result<Square> {
    let row: usize = row.parse().with_context(|| format!("bad row `{row}`"))?;
    let col: usize = col.parse().with_context(|| format!("bad column `{col}`"))?;
    Ok(Square::try_from((row, col))?)
}

fn play(game: &mut Game, coords: [&str; 4]) -> Result<()> {
    let from = parse_square(coords[0], coords[1])?;
    let to = parse_square(coords[2], coords[3])?;
    game.execute_move(from, to)?;
    Ok(())
}

fn show_moves(game: &Game, row: &str, col: &str) -> Result<()> {
    let square = parse_square(row, col)?;
    match game.possible_moves(square.row() as usize, square.col() as usize) {
        Some(moves) => {
            let moves: Vec<_> = moves.iter().map(Square::to_string).collect();
            println!("{}", moves.join(" "));
        }
        None => println!("no moves from {square}"),
    }
    Ok(())
}

fn save(game: &Game, path: &str) -> Result<()> {
    let bytes = game.engine().snapshot()?;
    fs::write(path, bytes).with_context(|| format!("can't write `{path}`"))?;
    info!("Saved position to {path}");
    Ok(())
}

fn load(game: &mut Game, path: &str) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("can't read `{path}`"))?;
    if bytes.is_empty() {
        bail!("`{path}` is empty");
    }
    let engine = RuleEngine::restore(&bytes).with_context(|| format!("can't load `{path}`"))?;
    game.load(engine);
    info!("Loaded position from {path}");
    Ok(())
}

fn render(game: &Game, out: &mut impl Write) -> Result<()> {
    writeln!(out, "   0 1 2 3 4 5 6 7")?;
    for (row, cells) in game.current_board().iter().enumerate() {
        write!(out, "{row} ")?;
        for (col, cell) in cells.iter().enumerate() {
            let symbol = match cell {
                Cell::Figure(figure) => figure.symbol,
                Cell::Empty if (row + col) % 2 == 0 => '·',
                Cell::Empty => ' ',
            };
            write!(out, " {symbol}")?;
        }
        writeln!(out)?;
    }
    if let Some(target) = game.engine().en_passant_target() {
        debug!("En passant target: {target}");
    }
    Ok(())
}
