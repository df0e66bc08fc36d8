//! Terminal review loop.
//! Reads one command per line and drives a review session until it finishes or the user quits.
//!
//! Commands: empty line = continue (show answer, then auto-rate), `r` = show answer,
//! `0`..`3` = rate, `q` = quit.

use chrono::{DateTime, Utc};
use flashcard_review::models::{ContinueOutcome, RateOutcome, Transition};
use flashcard_review::{ReviewSession, ReviewSink, SessionError};
use std::io::{self, BufRead, Write};

#[derive(Debug, PartialEq)]
enum Command {
    Continue,
    Reveal,
    Rate(u8),
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Command> {
        match line.trim() {
            "" => Some(Command::Continue),
            "r" | "reveal" => Some(Command::Reveal),
            "q" | "quit" => Some(Command::Quit),
            other => other.parse::<u8>().ok().map(Command::Rate),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunEnd {
    Finished,
    Aborted,
}

pub struct ReviewApp<R, W, C> {
    input: R,
    output: W,
    clock: C,
}

impl<R, W, C> ReviewApp<R, W, C>
where
    R: BufRead,
    W: Write,
    C: FnMut() -> DateTime<Utc>,
{
    pub fn new(input: R, output: W, clock: C) -> Self {
        Self {
            input,
            output,
            clock,
        }
    }

    pub fn run<S: ReviewSink + ?Sized>(
        &mut self,
        session: &mut ReviewSession,
        sink: &mut S,
    ) -> io::Result<RunEnd> {
        if session.is_empty() {
            writeln!(self.output, "No cards due for now!")?;
            return Ok(RunEnd::Finished);
        }

        while let Some(card_id) = session.current_card() {
            let position = session.position().unwrap_or(0);
            let shown = if session.is_revealed() {
                " [answer shown]"
            } else {
                ""
            };
            write!(
                self.output,
                "Card {} ({} / {}){} > ",
                card_id,
                position,
                session.len(),
                shown
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(RunEnd::Aborted);
            }

            let now = (self.clock)();
            let result = match Command::parse(&line) {
                Some(Command::Quit) => return Ok(RunEnd::Aborted),
                Some(Command::Reveal) => match session.reveal(now) {
                    Ok(_) => {
                        writeln!(self.output, "Answer shown. Rate 0-3.")?;
                        continue;
                    }
                    Err(e) => Err(e),
                },
                Some(Command::Continue) => match session.continue_action(now, sink) {
                    Ok(ContinueOutcome::Revealed) => {
                        writeln!(self.output, "Answer shown. Rate 0-3 or press enter.")?;
                        continue;
                    }
                    Ok(ContinueOutcome::Rated(outcome)) => Ok(outcome),
                    Err(e) => Err(e),
                },
                Some(Command::Rate(quality)) => session.rate_quality(card_id, quality, now, sink),
                None => {
                    writeln!(self.output, "Unknown command: {}", line.trim())?;
                    continue;
                }
            };

            match result {
                Ok(outcome) => self.report(&outcome)?,
                Err(SessionError::Persistence(e)) => {
                    writeln!(self.output, "Warning: review not saved ({e}); continuing.")?
                }
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
        }

        writeln!(self.output, "Session complete!")?;
        Ok(RunEnd::Finished)
    }

    fn report(&mut self, outcome: &RateOutcome) -> io::Result<()> {
        let next = match outcome.transition {
            Transition::Requeued => "again later in this session",
            Transition::Advanced | Transition::Finished => "done for this session",
        };
        writeln!(
            self.output,
            "Rated {}: next in {} day(s), ease {:.2}; {}.",
            outcome.event.rating, outcome.update.state.interval, outcome.update.state.ease_factor, next
        )
    }
}
