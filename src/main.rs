use anyhow::{bail, Context, Result};
use clap::{arg, command, value_parser, Command};
use clickchess::chess_board::fen::INITIAL_POSITION;
use clickchess::chess_board::perft;
use clickchess::config::Config;
use clickchess::console::run_console;
use clickchess::{ChessBoard, ChessField, MoveKind};
use env_logger::Env;
use log::info;
use std::io::{stdin, stdout};
use std::path::PathBuf;
use std::time::Instant;
use tabled::settings::Style;
use tabled::{Table, Tabled};

fn main() -> Result<()> {
    let matches = command!()
        .propagate_version(true)
        .arg(
            arg!(-c --config <FILE> "YAML configuration file")
                .required(false)
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(Command::new("play").about("Play a game on the console"))
        .subcommand(
            Command::new("moves")
                .about("List the moves of the piece on a square")
                .arg(arg!(-f --fen <FEN> "Board position").default_value(INITIAL_POSITION))
                .arg(arg!(<SQUARE> "Square of the piece, e.g. e2")),
        )
        .subcommand(
            Command::new("perft")
                .about("Count the leaves of the move tree")
                .arg(arg!(-f --fen <FEN> "Board position").default_value(INITIAL_POSITION))
                .arg(
                    arg!(-x --depth <d> "depth")
                        .default_value("3")
                        .value_parser(value_parser!(u8)),
                ),
        )
        .get_matches();

    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .or_else(|| std::env::var_os("CLICKCHESS_CONFIG").map(PathBuf::from));
    let config = Config::load(config_path.as_deref()).context("failed to load configuration")?;

    let env = Env::default().filter_or("CLICKCHESS_LOG", config.log_level.as_str());
    env_logger::Builder::from_env(env).init();
    info!("configuration: {:?}", config);

    match matches.subcommand() {
        Some(("moves", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").context("missing position")?;
            let square = arg_matches.get_one::<String>("SQUARE").context("missing square")?;
            list_moves(fen, square)
        }
        Some(("perft", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").context("missing position")?;
            let depth = arg_matches.get_one::<u8>("depth").copied().unwrap_or(3);
            run_perft(fen, depth)
        }
        Some(("play", _)) | None => {
            run_console(stdin().lock(), &mut stdout(), &config).context("console failed")
        }
        Some((other, _)) => bail!("unknown subcommand {}", other),
    }
}

#[derive(Tabled)]
struct MoveRow {
    #[tabled(rename = "move")]
    notation: String,
    kind: &'static str,
    captures: String,
}

fn list_moves(fen: &str, square: &str) -> Result<()> {
    let (board, _) = ChessBoard::from_fen(fen)?;
    let field = ChessField::from_algebraic(square)?;
    let moves = board.generate_moves_at(field);
    if moves.is_empty() {
        println!("No moves from {}", field);
        return Ok(());
    }

    let rows: Vec<MoveRow> = moves
        .iter()
        .map(|mv| MoveRow {
            notation: mv.to_string(),
            kind: match mv.kind {
                MoveKind::Quiet => "quiet",
                MoveKind::Capture => "capture",
            },
            captures: board
                .piece_at(mv.to)
                .piece()
                .map(|p| p.kind.name().to_string())
                .unwrap_or_default(),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::modern()));
    Ok(())
}

fn run_perft(fen: &str, depth: u8) -> Result<()> {
    println!("Perft test for {} with depth {}", fen, depth);
    let (board, active_color) = ChessBoard::from_fen(fen)?;
    let start_time = Instant::now();

    let mut num_nodes = 0;
    if depth == 0 {
        num_nodes = 1;
    } else {
        let mut result_moves = Vec::<(String, u64)>::new();
        for (field, piece) in board.pieces_of(active_color) {
            for mv in board.generate_moves(field, piece).iter() {
                let new_board = board.apply(*mv, piece);
                result_moves.push((mv.as_algebraic(), perft(&new_board, active_color.opposite(), depth - 1)));
            }
        }
        result_moves.sort();

        for (m, c) in result_moves {
            println!("{}: {}", m, c);
            num_nodes += c;
        }
    }

    println!("\nNodes searched: {}", num_nodes);
    println!("Elapsed: {:.3}s", start_time.elapsed().as_secs_f32());
    Ok(())
}
