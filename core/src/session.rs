use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Victory,
    Defeat,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct PendingChallenge {
    position: Coord2,
    challenge: Challenge,
}

/// One play-through: board, lives, phase and at most one pending challenge.
///
/// Every transition runs to completion inside a single call, the owner drives it from one
/// control loop and calls [`Session::tick`] at a steady cadence so deadlines are noticed.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    words: Vec<String>,
    rng: SmallRng,
    board: Board,
    lives: u8,
    phase: Phase,
    active_challenge: Option<PendingChallenge>,
}

impl Session {
    /// Validates configuration and word list up front, the session starts in the menu.
    pub fn new<I, S>(config: GameConfig, words: I, rng_seed: u64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;

        let words: Vec<String> = words
            .into_iter()
            .map(Into::<String>::into)
            .map(|word| word.trim().to_owned())
            .filter(|word| !word.is_empty())
            .collect();
        if words.is_empty() {
            return Err(GameError::EmptyWordList);
        }

        log::debug!(
            "New session: {}x{}, {} mines, {} words, seed {}",
            config.rows,
            config.cols,
            config.mines,
            words.len(),
            rng_seed
        );

        Ok(Self {
            board: Board::new(config.size())?,
            config,
            words,
            rng: SmallRng::seed_from_u64(rng_seed),
            lives: STARTING_LIVES,
            phase: Phase::Menu,
            active_challenge: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Position of the mine whose challenge is still open.
    pub fn pending_mine(&self) -> Option<Coord2> {
        self.active_challenge.as_ref().map(|pending| pending.position)
    }

    pub fn has_pending_challenge(&self) -> bool {
        self.active_challenge.is_some()
    }

    /// Menu to Playing, with a freshly mined board and full lives.
    pub fn start_game(&mut self) -> Result<()> {
        self.check_phase(Phase::Menu)?;
        let mut board = Board::new(self.config.size())?;
        board.place_mines(self.config.mines, &mut self.rng)?;
        self.begin(board);
        Ok(())
    }

    /// Like [`Session::start_game`] but with a predetermined layout.
    pub fn start_game_with_layout(&mut self, mine_layout: MineLayout) -> Result<()> {
        self.check_phase(Phase::Menu)?;
        if mine_layout.size() != self.config.size() {
            return Err(GameError::InvalidBoardSize);
        }
        if mine_layout.mine_count() != self.config.mines {
            return Err(GameError::InvalidMineCount);
        }
        let board = Board::with_layout(mine_layout)?;
        self.begin(board);
        Ok(())
    }

    fn begin(&mut self, board: Board) {
        self.board = board;
        self.lives = STARTING_LIVES;
        self.active_challenge = None;
        self.set_phase(Phase::Playing);
    }

    /// Victory or Defeat back to the menu, discarding the board.
    pub fn restart(&mut self) -> Result<()> {
        if !self.phase.is_finished() {
            log::warn!("Restart requested during {:?}", self.phase);
            return Err(GameError::WrongPhase(self.phase));
        }
        self.board = Board::new(self.config.size())?;
        self.lives = STARTING_LIVES;
        self.active_challenge = None;
        self.set_phase(Phase::Menu);
        Ok(())
    }

    /// Reveals a cell for the player.
    ///
    /// Returns `None` when the activation is ignored: outside of play or while a challenge is
    /// pending. Stepping on a mine opens a challenge whose clock starts at `now`.
    pub fn activate_cell(
        &mut self,
        row: Coord,
        col: Coord,
        now: Instant,
    ) -> Result<Option<RevealOutcome>> {
        let coords = self.board.validate_coords((row, col))?;
        if !self.accepts_board_input() {
            log::debug!("Ignoring activation at {:?}", coords);
            return Ok(None);
        }

        let outcome = self.board.reveal(coords)?;
        match &outcome {
            RevealOutcome::Revealed { victory: true, .. } => self.set_phase(Phase::Victory),
            RevealOutcome::MineTriggered(position) => {
                let challenge =
                    Challenge::start(&self.words, &mut self.rng, now, self.config.time_limit())?;
                self.active_challenge = Some(PendingChallenge {
                    position: *position,
                    challenge,
                });
            }
            RevealOutcome::Revealed { .. } | RevealOutcome::Unchanged => {}
        }
        Ok(Some(outcome))
    }

    /// Flags or unflags a cell, ignored (`None`) under the same rules as activation.
    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> Result<Option<MarkOutcome>> {
        let coords = self.board.validate_coords((row, col))?;
        if !self.accepts_board_input() {
            log::debug!("Ignoring flag at {:?}", coords);
            return Ok(None);
        }
        self.board.toggle_flag(coords).map(Some)
    }

    pub fn challenge_push_char(&mut self, c: char) -> Result<()> {
        self.pending_mut()?.challenge.push_char(c);
        Ok(())
    }

    pub fn challenge_pop_char(&mut self) -> Result<()> {
        self.pending_mut()?.challenge.pop_char();
        Ok(())
    }

    pub fn challenge_submit(&mut self, now: Instant) -> Result<ChallengeResult> {
        let pending = self
            .active_challenge
            .take()
            .ok_or(GameError::NoPendingChallenge)?;
        let result = pending.challenge.submit(now);
        self.settle(pending.position, result)?;
        Ok(result)
    }

    /// Times out a pending challenge whose deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Result<Option<ChallengeResult>> {
        let expired = self
            .active_challenge
            .as_ref()
            .is_some_and(|pending| pending.challenge.tick(now));
        if !expired {
            return Ok(None);
        }

        log::debug!("Challenge deadline passed");
        self.challenge_submit(now).map(Some)
    }

    fn settle(&mut self, position: Coord2, result: ChallengeResult) -> Result<()> {
        self.board.resolve_mine(position, result.is_success())?;
        if !result.is_success() {
            self.lives = self.lives.saturating_sub(1);
            log::debug!("Life lost, {} left", self.lives);
            if self.lives == 0 {
                self.set_phase(Phase::Defeat);
            }
        }
        Ok(())
    }

    pub fn cell_view(&self, row: Coord, col: Coord) -> Result<CellView> {
        let coords = (row, col);
        let state = self.board.get_state(coords)?;
        let state = if self.phase.is_finished() {
            state
        } else {
            state.masked()
        };
        let adjacent_mine_count = match state {
            CellState::Revealed => self.board.adjacent_mine_count(coords)?,
            _ => 0,
        };
        Ok(CellView {
            state,
            adjacent_mine_count,
        })
    }

    pub fn active_challenge_view(&self, now: Instant) -> Option<ChallengeView> {
        self.active_challenge
            .as_ref()
            .map(|pending| ChallengeView::new(&pending.challenge, now))
    }

    pub fn board_view(&self, now: Instant) -> BoardView {
        BoardView::from_session(self, now)
    }

    /// Every mine with its state, meant for the end-of-game display.
    pub fn reveal_all_mines_for_display(&self) -> Vec<(Coord2, CellState)> {
        self.board.reveal_all_mines_for_display().collect()
    }

    fn accepts_board_input(&self) -> bool {
        self.phase.is_playing() && self.active_challenge.is_none()
    }

    fn pending_mut(&mut self) -> Result<&mut PendingChallenge> {
        self.active_challenge
            .as_mut()
            .ok_or(GameError::NoPendingChallenge)
    }

    fn check_phase(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            log::warn!("Expected {:?} but session is in {:?}", expected, self.phase);
            Err(GameError::WrongPhase(self.phase))
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}
