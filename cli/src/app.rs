use popquest_core::{ChallengeResult, Coord, GameError, Instant, Phase, RevealOutcome, Session};
use std::io::Write;

use crate::command::{self, Command, HELP, Keystroke};
use crate::render;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The control loop's side of the game: turns input lines and ticks into session calls and
/// prints what changed.
pub struct App<W> {
    session: Session,
    out: W,
}

impl<W: Write> App<W> {
    pub fn new(session: Session, out: W) -> Self {
        Self { session, out }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn greet(&mut self, now: Instant) -> std::io::Result<()> {
        writeln!(self.out, "POP A QUEST")?;
        writeln!(self.out, "{HELP}")?;
        self.draw(now)
    }

    pub fn handle_line(&mut self, line: &str, now: Instant) -> std::io::Result<Flow> {
        let command = match command::parse(line, self.session.has_pending_challenge()) {
            Ok(command) => command,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };
        log::debug!("Command: {:?}", command);

        let result = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Start => self.session.start_game().map(|_| None),
            Command::Restart => self.session.restart().map(|_| None),
            Command::Reveal(row, col) => self.reveal(row, col, now).map(|_| None),
            Command::Flag(row, col) => self.session.toggle_flag(row, col).map(|_| None),
            Command::Answer(keys) => self.answer(&keys, now).map(Some),
        };

        match result {
            Ok(Some(challenge_result)) => self.announce(challenge_result)?,
            Ok(None) => {}
            Err(err) => {
                // player mistakes are reported and play continues
                log::warn!("Rejected: {}", err);
                writeln!(self.out, "{err}")?;
            }
        }
        self.draw(now)?;
        Ok(Flow::Continue)
    }

    /// Samples the challenge clock, announcing a timeout when it fires.
    pub fn tick(&mut self, now: Instant) -> std::io::Result<()> {
        match self.session.tick(now) {
            Ok(Some(result)) => {
                self.announce(result)?;
                self.draw(now)
            }
            Ok(None) => Ok(()),
            Err(err) => {
                log::warn!("Tick failed: {}", err);
                Ok(())
            }
        }
    }

    fn reveal(&mut self, row: Coord, col: Coord, now: Instant) -> Result<(), GameError> {
        match self.session.activate_cell(row, col, now)? {
            None => log::info!("Board is not accepting moves right now"),
            Some(RevealOutcome::MineTriggered(position)) => {
                log::info!("Stepped on the mine at {:?}", position)
            }
            Some(outcome) => log::trace!("Reveal outcome: {:?}", outcome),
        }
        Ok(())
    }

    fn answer(&mut self, keys: &[Keystroke], now: Instant) -> Result<ChallengeResult, GameError> {
        for key in keys {
            match key {
                Keystroke::Char(c) => self.session.challenge_push_char(*c)?,
                Keystroke::Backspace => self.session.challenge_pop_char()?,
            }
        }
        self.session.challenge_submit(now)
    }

    fn announce(&mut self, result: ChallengeResult) -> std::io::Result<()> {
        let message = match result {
            ChallengeResult::Success => "defused!",
            ChallengeResult::Failure => "wrong word, the mine went off",
            ChallengeResult::Timeout => "too slow, the mine went off",
        };
        writeln!(self.out, "{message}")
    }

    fn draw(&mut self, now: Instant) -> std::io::Result<()> {
        let view = self.session.board_view(now);
        match view.phase {
            Phase::Menu => writeln!(self.out, "{}", render::status(view.phase, view.lives)),
            _ => write!(self.out, "{}", render::frame(&view)),
        }
    }
}
