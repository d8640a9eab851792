// Simple command-line application to play chess
//
// Enter a square to show where its piece can go, or two squares to make a move, like
// `E2 E4`. Set `RUST_LOG=debug` to see what the engine is doing.

use chesst::{board::PrettyStyle, engine::Engine, Bitboard, Color};
use std::io::{self, BufRead, Write};

fn print_targets(targets: Bitboard) {
    let names: Vec<_> = targets.into_iter().map(|c| c.to_string()).collect();
    if names.is_empty() {
        println!("This piece cannot move");
    } else {
        println!("Can move to: {}", names.join(" "));
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let mut stdin = io::stdin().lock();
    let mut engine = Engine::initial();

    loop {
        let board = engine.board();
        println!("{}", board.pretty(PrettyStyle::Ascii));
        let side = match board.side() {
            Color::White => "White",
            Color::Black => "Black",
        };
        print!("{} move ({}): ", side, board.move_number());
        io::stdout().flush()?;

        let mut s = String::new();
        if stdin.read_line(&mut s)? == 0 {
            break;
        }
        let words: Vec<&str> = s.split_ascii_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["new"] => engine.set_starting_configuration(),
            ["moves"] => println!("{}", engine.chain().uci_list()),
            [square] => match engine.select_piece(&square.to_ascii_uppercase()) {
                Ok(sel) => print_targets(sel.highlighted),
                Err(e) => println!("Cannot select: {}", e),
            },
            [src, dst] => {
                match engine.move_piece(&src.to_ascii_uppercase(), &dst.to_ascii_uppercase()) {
                    Ok(mv) => println!("Moved {}", mv),
                    Err(e) => println!("Bad move: {}", e),
                }
            }
            _ => println!("Enter a square or two squares"),
        }
        println!();
    }

    println!("Moves: {}", engine.chain().uci_list());
    Ok(())
}
