//! Event sinks.
//!
//! The collider hands every accepted event to an [`Output`]. Two sinks ship
//! with the crate: [`TextOutput`], one whitespace-separated line per event,
//! and `Vec<EventRecord>`, which keeps everything in memory.

use std::io::Write;

use crate::core::collider::Collision;
use crate::core::profile::EventResult;
use crate::error::Result;

/// Receives accepted events in order.
pub trait Output {
    fn emit(&mut self, index: usize, collision: &Collision, event: &EventResult) -> Result<()>;

    /// Called once after the last event.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One event as collected by the in-memory sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRecord {
    pub index: usize,
    pub collision: Collision,
    pub event: EventResult,
}

impl Output for Vec<EventRecord> {
    fn emit(&mut self, index: usize, collision: &Collision, event: &EventResult) -> Result<()> {
        self.push(EventRecord {
            index,
            collision: *collision,
            event: *event,
        });
        Ok(())
    }
}

/// Plain-text sink.
///
/// Columns: `index b npart [ncoll] [trials] e2 e3 e4 e5`; the bracketed
/// columns are written only when the corresponding counter is tracked.
pub struct TextOutput<W: Write> {
    writer: W,
    with_ncoll: bool,
    with_trials: bool,
}

impl<W: Write> TextOutput<W> {
    pub fn new(writer: W, with_ncoll: bool, with_trials: bool) -> Self {
        Self {
            writer,
            with_ncoll,
            with_trials,
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Output for TextOutput<W> {
    fn emit(&mut self, index: usize, collision: &Collision, event: &EventResult) -> Result<()> {
        write!(
            self.writer,
            "{index} {:.3} {}",
            collision.impact_parameter, event.npart
        )?;
        if self.with_ncoll {
            write!(self.writer, " {}", collision.binary_collisions)?;
        }
        if self.with_trials {
            write!(self.writer, " {}", collision.trials)?;
        }
        for e in &event.eccentricity {
            write!(self.writer, " {e:.6}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Discards everything (`--quiet`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl Output for NullOutput {
    fn emit(&mut self, _: usize, _: &Collision, _: &EventResult) -> Result<()> {
        Ok(())
    }
}
