// CPU-vs-CPU self-play driver.
//
// Thin host layer over the engine: it owns the game loop, passes turns
// when a side is blocked, declares the game over when both are, and runs
// one search call at a time.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use othello_engine::{choose_move, profile_for, Board, CancelToken, Side};

#[derive(Parser)]
#[command(name = "othello", about = "Othello engine self-play")]
struct Args {
    /// Difficulty level for Black.
    #[arg(long, default_value_t = 3)]
    black: u16,

    /// Difficulty level for White.
    #[arg(long, default_value_t = 3)]
    white: u16,

    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Only print final results, not every position.
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let black = profile_for(args.black);
    let white = profile_for(args.white);
    println!(
        "Black: {} (level {})  vs  White: {} (level {})",
        black.name, black.level, white.name, white.level
    );

    let mut black_wins = 0u32;
    let mut white_wins = 0u32;
    let mut draws = 0u32;

    for game in 1..=args.games {
        let count = play_game(black.level, white.level, args.quiet)?;
        let verdict = match count.black.cmp(&count.white) {
            std::cmp::Ordering::Greater => {
                black_wins += 1;
                "black wins"
            }
            std::cmp::Ordering::Less => {
                white_wins += 1;
                "white wins"
            }
            std::cmp::Ordering::Equal => {
                draws += 1;
                "draw"
            }
        };
        println!(
            "game {}: black {} - white {} ({})",
            game, count.black, count.white, verdict
        );
    }

    if args.games > 1 {
        println!(
            "tally: black {} / white {} / draws {}",
            black_wins, white_wins, draws
        );
    }
    Ok(())
}

fn play_game(black_level: u16, white_level: u16, quiet: bool) -> Result<othello_engine::StoneCount> {
    let mut board = Board::new();
    let mut side = Side::Black;
    let cancel = CancelToken::new();

    loop {
        if !board.has_any_move(side) {
            if !board.has_any_move(side.opponent()) {
                break;
            }
            info!("{:?} passes", side);
            side = side.opponent();
            continue;
        }

        let level = match side {
            Side::Black => black_level,
            Side::White => white_level,
        };
        let mv = choose_move(&board, side, level, &cancel)
            .context("engine returned no move for a position with legal moves")?;

        info!("{:?} plays ({}, {})", side, mv.x, mv.y);
        board.apply(&mv, side);
        if !quiet {
            println!("{}", board);
        }
        side = side.opponent();
    }

    Ok(board.count_stones())
}
