use ndarray::Array2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// What a presentation layer may show for one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub state: CellState,
    /// Only meaningful for [`CellState::Revealed`], zero otherwise.
    pub adjacent_mine_count: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeView {
    pub scrambled_word: String,
    pub user_input: String,
    pub seconds_remaining: u64,
}

impl ChallengeView {
    pub fn new(challenge: &Challenge, now: Instant) -> Self {
        Self {
            scrambled_word: challenge.scrambled_word().to_owned(),
            user_input: challenge.user_input().to_owned(),
            seconds_remaining: challenge.seconds_remaining(now),
        }
    }
}

/// Snapshot of everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub phase: Phase,
    pub lives: u8,
    pub cells: Array2<CellView>,
    pub challenge: Option<ChallengeView>,
}

impl BoardView {
    pub fn from_session(session: &Session, now: Instant) -> Self {
        let size = session.board().size();
        let mut cells = Array2::default(size.to_nd_index());

        let (rows, cols) = size;
        for row in 0..rows {
            for col in 0..cols {
                if let Ok(view) = session.cell_view(row, col) {
                    cells[(row, col).to_nd_index()] = view;
                }
            }
        }

        Self {
            size,
            phase: session.phase(),
            lives: session.lives(),
            cells,
            challenge: session.active_challenge_view(now),
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_session() -> Session {
        let config = GameConfig::new(2, 3, 1).unwrap();
        let mut session = Session::new(config, ["orbit"], 0).unwrap();
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0)]).unwrap();
        session.start_game_with_layout(layout).unwrap();
        session
    }

    #[test]
    fn snapshot_masks_hidden_mines() {
        let now = Instant::now();
        let mut session = playing_session();
        session.activate_cell(1, 2, now).unwrap();

        let view = session.board_view(now);

        assert_eq!(view.size, (2, 3));
        assert_eq!(view.phase, Phase::Playing);
        assert_eq!(view.lives, STARTING_LIVES);
        assert_eq!(view.count_state(CellState::MineHidden), 0);
        assert_eq!(view.count_state(CellState::Revealed), 4);
        assert_eq!(
            view.cell((0, 1)),
            Some(CellView {
                state: CellState::Revealed,
                adjacent_mine_count: 1
            })
        );
        assert_eq!(view.cell((5, 5)), None);
        assert!(view.challenge.is_none());
    }

    #[test]
    fn snapshot_carries_pending_challenge() {
        let now = Instant::now();
        let mut session = playing_session();
        session.activate_cell(0, 0, now).unwrap();
        session.challenge_push_char('o').unwrap();

        let view = session.board_view(now);
        let challenge = view.challenge.unwrap();

        assert_eq!(challenge.user_input, "o");
        assert_eq!(challenge.seconds_remaining, 15);
        assert_eq!(challenge.scrambled_word.len(), "orbit".len());
    }

    #[test]
    fn snapshot_serializes() {
        let view = playing_session().board_view(Instant::now());

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["lives"], 3);
    }
}
