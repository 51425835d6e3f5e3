use popquest_core::{BoardView, CellState, CellView, ChallengeView, Phase};
use std::fmt::Write;

fn glyph(cell: CellView) -> char {
    match cell.state {
        CellState::Hidden => '#',
        CellState::Revealed if cell.adjacent_mine_count == 0 => '.',
        CellState::Revealed => char::from(b'0' + cell.adjacent_mine_count),
        CellState::Flagged => 'F',
        CellState::MineHidden => '*',
        CellState::MineDefused => '+',
        CellState::MineDetonated => 'X',
    }
}

/// Plain-text frame: column header, one line per row, then status.
pub fn frame(view: &BoardView) -> String {
    let mut out = String::new();
    let (rows, cols) = view.size;

    out.push_str("    ");
    for col in 0..cols {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{:>3} ", row);
        for col in 0..cols {
            let cell = view.cell((row, col)).unwrap_or_default();
            let _ = write!(out, "{:>3}", glyph(cell));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{}", status(view.phase, view.lives));
    if let Some(challenge) = &view.challenge {
        out.push_str(&challenge_prompt(challenge));
        out.push('\n');
    }
    out
}

pub fn status(phase: Phase, lives: u8) -> String {
    let hearts = "<3 ".repeat(usize::from(lives));
    match phase {
        Phase::Menu => "menu: type `start` to play".to_owned(),
        Phase::Playing => format!("lives: {}", hearts.trim_end()),
        Phase::Victory => "all safe cells cleared, you win! type `restart`".to_owned(),
        Phase::Defeat => "out of lives, game over. type `restart`".to_owned(),
    }
}

pub fn challenge_prompt(challenge: &ChallengeView) -> String {
    format!(
        "BOOM! unscramble {:?} in {}s, your input: {:?}",
        challenge.scrambled_word, challenge.seconds_remaining, challenge.user_input
    )
}
