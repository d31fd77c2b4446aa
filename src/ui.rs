//! Plain-text rendering and coordinate parsing for the CLI binaries.

use crate::board::{Board, Cell};
use crate::session::{GameSession, Side};

/// Format `(x, y)` as a grid label like `B4`.
pub fn coord_label(x: usize, y: usize) -> String {
    let col = (b'A' + x as u8) as char;
    format!("{}{}", col, y + 1)
}

/// Parse a grid label like `B4` (column letter, 1-based row) into `(x, y)`.
pub fn parse_coord(input: &str) -> Option<(usize, usize)> {
    if input.len() < 2 {
        return None;
    }
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let x = (col_ch as u8 - b'A') as usize;
    let row_str: String = chars.collect();
    let row: usize = row_str.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((x, row - 1))
}

/// Print a board. With `reveal` the ship layout is shown; without it only
/// hits and misses, which is the attacker's view.
pub fn print_board(board: &Board, reveal: bool) {
    print!("   ");
    for x in 0..board.size() {
        print!(" {}", (b'A' + x as u8) as char);
    }
    println!();
    for y in 0..board.size() {
        print!("{:2} ", y + 1);
        for x in 0..board.size() {
            let ch = match board.cell(x, y).unwrap_or(Cell::Empty) {
                Cell::Hit { .. } => 'X',
                Cell::Miss => 'o',
                Cell::Ship { .. } if reveal => 'S',
                _ => '.',
            };
            print!(" {}", ch);
        }
        println!();
    }
}

/// Display the bot's board (attacker's view, top) and the human's own
/// board (revealed, bottom).
pub fn print_player_view(session: &GameSession) {
    println!("Enemy waters:");
    print_board(session.board(Side::Bot), false);
    println!("\nYour fleet:");
    print_board(session.board(Side::Human), true);
}
