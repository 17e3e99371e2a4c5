//! Scripted GPIO line
//!
//! Replays a level waveform against the simulated time base and records
//! every level the driver drives onto the line.

use std::vec::Vec;

use super::clock::SimTime;
use crate::gpio::{Direction, FlexPin, InputPin, Level, OutputPin, Pull, WaitForLevel, WaitTimeout};

/// When the scripted waveform starts playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    /// Waveform started at a fixed time
    At(u64),
    /// Waveform starts the first time the line is switched to input
    OnRelease,
}

/// Mock line driven by a waveform script
///
/// The waveform is a list of `(level, duration_us)` segments. Once the
/// script runs out the line settles to its idle level: the explicit
/// idle level if one was set, otherwise whatever the pull resistor gives
/// (low when floating).
#[derive(Debug, Clone)]
pub struct ScriptedLine {
    time: SimTime,
    direction: Direction,
    pull: Pull,
    output_level: Level,
    driven: Vec<(u64, Level)>,
    waveform: Vec<(Level, u32)>,
    anchor: Anchor,
    started_at: Option<u64>,
    idle: Option<Level>,
}

impl ScriptedLine {
    fn with_script(time: &SimTime, direction: Direction, waveform: &[(Level, u32)], anchor: Anchor) -> Self {
        let started_at = match anchor {
            Anchor::At(at) => Some(at),
            Anchor::OnRelease => None,
        };
        Self {
            time: time.clone(),
            direction,
            pull: Pull::None,
            output_level: Level::Low,
            driven: Vec::new(),
            waveform: waveform.to_vec(),
            anchor,
            started_at,
            idle: None,
        }
    }

    /// Output-only line (trigger, mode select)
    pub fn output(time: &SimTime) -> Self {
        Self::with_script(time, Direction::Output, &[], Anchor::At(time.now()))
    }

    /// Input line whose waveform starts now
    pub fn input(time: &SimTime, waveform: &[(Level, u32)]) -> Self {
        Self::with_script(time, Direction::Input, waveform, Anchor::At(time.now()))
    }

    /// Bidirectional line whose waveform starts when the host releases it
    ///
    /// Models a single-wire device that answers after the host switches
    /// the line back to input.
    pub fn responder(time: &SimTime, waveform: &[(Level, u32)]) -> Self {
        Self::with_script(time, Direction::Output, waveform, Anchor::OnRelease)
    }

    /// Force the level the line settles to after the script
    pub fn with_idle(mut self, level: Level) -> Self {
        self.idle = Some(level);
        self
    }

    /// Every level driven by the host, with the time it was driven
    pub fn driven(&self) -> &[(u64, Level)] {
        &self.driven
    }

    /// Current direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current bias
    pub fn pull(&self) -> Pull {
        self.pull
    }

    /// Time the waveform started playing, if it has
    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    fn idle_level(&self) -> Level {
        self.idle.unwrap_or(match self.pull {
            Pull::Up => Level::High,
            Pull::Down | Pull::None => Level::Low,
        })
    }

    /// Level seen on the wire at `at_us`
    fn level_at(&self, at_us: u64) -> Level {
        if self.direction == Direction::Output {
            return self.output_level;
        }
        let Some(start) = self.started_at else {
            return self.idle_level();
        };
        if at_us < start {
            return self.idle_level();
        }
        let offset = at_us - start;
        let mut end = 0u64;
        for &(level, duration) in &self.waveform {
            end += duration as u64;
            if offset < end {
                return level;
            }
        }
        self.idle_level()
    }

    /// First segment boundary strictly after `at_us`, if any
    fn next_edge_after(&self, at_us: u64) -> Option<u64> {
        let start = self.started_at?;
        if at_us < start {
            return Some(start);
        }
        let mut end = start;
        for &(_, duration) in &self.waveform {
            end += duration as u64;
            if end > at_us {
                return Some(end);
            }
        }
        None
    }
}

impl OutputPin for ScriptedLine {
    fn set_high(&mut self) {
        self.output_level = Level::High;
        self.driven.push((self.time.now(), Level::High));
    }

    fn set_low(&mut self) {
        self.output_level = Level::Low;
        self.driven.push((self.time.now(), Level::Low));
    }
}

impl InputPin for ScriptedLine {
    fn is_high(&mut self) -> bool {
        self.level_at(self.time.now()) == Level::High
    }
}

impl WaitForLevel for ScriptedLine {
    fn wait_for_level(&mut self, level: Level, timeout_us: u32) -> Result<u32, WaitTimeout> {
        let now = self.time.now();
        let deadline = now + timeout_us as u64;
        let mut at = now;

        loop {
            if self.level_at(at) == level {
                self.time.advance_to(at);
                return Ok((at - now) as u32);
            }
            match self.next_edge_after(at) {
                Some(edge) if edge <= deadline && self.direction == Direction::Input => at = edge,
                _ => {
                    self.time.advance_to(deadline);
                    return Err(WaitTimeout {
                        level,
                        waited_us: timeout_us,
                    });
                }
            }
        }
    }
}

impl FlexPin for ScriptedLine {
    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        if direction == Direction::Input
            && self.anchor == Anchor::OnRelease
            && self.started_at.is_none()
        {
            self.started_at = Some(self.time.now());
        }
    }

    fn set_pull(&mut self, pull: Pull) {
        self.pull = pull;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_edges() {
        let time = SimTime::new();
        let mut line = ScriptedLine::input(
            &time,
            &[(Level::Low, 50), (Level::High, 70), (Level::Low, 50)],
        );

        assert!(line.is_low());
        assert_eq!(line.wait_for_level(Level::High, 100), Ok(50));
        assert_eq!(line.wait_for_level(Level::Low, 100), Ok(70));
        assert_eq!(time.now(), 120);
    }

    #[test]
    fn test_wait_times_out() {
        let time = SimTime::new();
        let mut line = ScriptedLine::input(&time, &[(Level::Low, 500)]);

        let err = line.wait_for_level(Level::High, 100).unwrap_err();
        assert_eq!(err.waited_us, 100);
        assert_eq!(time.now(), 100);
    }

    #[test]
    fn test_idle_follows_pull() {
        let time = SimTime::new();
        let mut line = ScriptedLine::input(&time, &[]);

        assert!(line.is_low());
        line.set_pull(Pull::Up);
        assert!(line.is_high());
    }

    #[test]
    fn test_responder_starts_on_release() {
        let time = SimTime::new();
        let mut line = ScriptedLine::responder(&time, &[(Level::Low, 80), (Level::High, 80)]);

        line.set_low();
        time.advance(18_000);
        line.set_high();
        assert!(line.started_at().is_none());

        line.set_direction(Direction::Input);
        assert_eq!(line.started_at(), Some(18_000));
        assert_eq!(line.wait_for_level(Level::High, 200), Ok(80));
        assert_eq!(line.driven(), &[(0, Level::Low), (18_000, Level::High)]);
    }

    #[test]
    fn test_output_reads_back_driven_level() {
        let time = SimTime::new();
        let mut line = ScriptedLine::output(&time);

        line.set_high();
        assert!(line.is_high());
        assert_eq!(line.wait_for_level(Level::High, 10), Ok(0));
        assert!(line.wait_for_level(Level::Low, 10).is_err());
    }
}
