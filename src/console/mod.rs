//! Line based front end: every line is either a square name, fed to the
//! session as a click, or one of a handful of commands.

use crate::chess_board::ChessField;
use crate::config::Config;
use crate::error::ChessResult;
use crate::session::{Outcome, Session};
use log::{debug, info};
use std::io::{BufRead, Write};

const HELP: &str = "\
Enter a square (e.g. e2) to select a piece, then a target square to move it.
Commands:
  board   show the board
  moves   list the targets of the selected piece
  fen     print the current position
  new     start over
  help    show this text
  quit    leave";

pub fn run_console<R: BufRead, W: Write>(input: R, output: &mut W, config: &Config) -> ChessResult<()> {
    let mut session = config.initial_session()?;

    writeln!(output, "{}", render(&session, config))?;
    writeln!(output, "{}", session.status(None))?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "quit" | "exit" => {
                info!("console closed by user");
                return Ok(());
            }
            "help" => writeln!(output, "{}", HELP)?,
            "board" | "d" => writeln!(output, "{}", render(&session, config))?,
            "moves" => writeln!(output, "{}", describe_targets(&session))?,
            "fen" => writeln!(output, "{}", session.board().to_fen(session.turn()))?,
            "new" => {
                session = config.initial_session()?;
                writeln!(output, "{}", render(&session, config))?;
                writeln!(output, "{}", session.status(None))?;
            }
            square => match ChessField::from_algebraic(square) {
                Ok(field) => {
                    let (next, outcome) = session.square_chosen(field);
                    session = next;
                    debug!("{} -> {}", field, outcome);
                    match outcome {
                        Outcome::Selected(_) if config.show_legal_moves => {
                            writeln!(output, "{}", describe_targets(&session))?
                        }
                        Outcome::MoveApplied(mv) => {
                            writeln!(output, "{}", mv)?;
                            writeln!(output, "{}", render(&session, config))?;
                        }
                        _ => {}
                    }
                    writeln!(output, "{}", session.status(Some(&outcome)))?;
                }
                Err(e) => writeln!(output, "{} (type 'help' for commands)", e)?,
            },
        }
        output.flush()?;
    }
    Ok(())
}

fn render(session: &Session, config: &Config) -> String {
    let highlights = if config.show_legal_moves {
        session.current_legal_moves()
    } else {
        Default::default()
    };
    session.board().render_to_string(config.unicode_pieces, &highlights)
}

fn describe_targets(session: &Session) -> String {
    match session.selection() {
        None => "No piece selected".to_string(),
        Some(selection) if selection.moves.is_empty() => format!("{} has no moves", selection.origin),
        Some(selection) => {
            let targets: Vec<String> = selection.moves.iter().map(|mv| mv.to_string()).collect();
            format!("Targets: {}", targets.join(" "))
        }
    }
}
