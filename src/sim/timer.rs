//! Turn countdown
//!
//! Pure state; the controller drives `tick` from a repeating one-second task
//! and cancels that task whenever the timer stops.

use serde::{Deserialize, Serialize};

/// Countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    Stopped,
    Running(u32),
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Timer was not running
    Idle,
    /// Seconds remaining after the tick
    Counting(u32),
    /// Reached zero; the timer is now stopped
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnTimer {
    duration: u32,
    state: TimerState,
    /// Value shown while stopped
    display: u32,
}

impl TurnTimer {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            state: TimerState::Stopped,
            display: duration,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running(_))
    }

    /// Seconds to display
    pub fn remaining(&self) -> u32 {
        match self.state {
            TimerState::Running(n) => n,
            TimerState::Stopped => self.display,
        }
    }

    /// Start a full countdown. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = TimerState::Running(self.duration);
        true
    }

    /// Advance one second
    pub fn tick(&mut self) -> TimerTick {
        match self.state {
            TimerState::Stopped => TimerTick::Idle,
            TimerState::Running(n) if n > 1 => {
                self.state = TimerState::Running(n - 1);
                TimerTick::Counting(n - 1)
            }
            TimerState::Running(_) => {
                self.state = TimerState::Stopped;
                self.display = 0;
                TimerTick::Expired
            }
        }
    }

    /// Halt, keeping the displayed value
    pub fn stop(&mut self) {
        self.display = self.remaining();
        self.state = TimerState::Stopped;
    }

    /// Halt and show a full countdown again
    pub fn reset(&mut self) {
        self.state = TimerState::Stopped;
        self.display = self.duration;
    }

    /// New duration for the next countdown. Only call between turns.
    pub fn set_duration(&mut self, duration: u32) {
        self.duration = duration;
        if !self.is_running() {
            self.display = duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_and_expires() {
        let mut timer = TurnTimer::new(3);
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert!(timer.start());
        assert_eq!(timer.remaining(), 3);
        assert_eq!(timer.tick(), TimerTick::Counting(2));
        assert_eq!(timer.tick(), TimerTick::Counting(1));
        assert_eq!(timer.tick(), TimerTick::Expired);
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(timer.tick(), TimerTick::Idle);
    }

    #[test]
    fn test_expires_after_exactly_duration_ticks() {
        let mut timer = TurnTimer::new(10);
        timer.start();
        let ticks: Vec<TimerTick> = (0..10).map(|_| timer.tick()).collect();
        assert_eq!(ticks.iter().filter(|t| **t == TimerTick::Expired).count(), 1);
        assert_eq!(ticks.last(), Some(&TimerTick::Expired));
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut timer = TurnTimer::new(5);
        timer.start();
        timer.tick();
        assert!(!timer.start());
        assert_eq!(timer.remaining(), 4);
    }

    #[test]
    fn test_stop_keeps_display_and_reset_restores() {
        let mut timer = TurnTimer::new(15);
        timer.start();
        timer.tick();
        timer.tick();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 13);
        timer.reset();
        assert_eq!(timer.remaining(), 15);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_set_duration() {
        let mut timer = TurnTimer::new(15);
        timer.set_duration(30);
        assert_eq!(timer.remaining(), 30);
        timer.start();
        assert_eq!(timer.remaining(), 30);
    }
}
