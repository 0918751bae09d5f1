use std::time::Duration;

/// Quiet-period debouncer for the search field.
///
/// Pure bookkeeping: the caller owns the timer. Every update bumps the
/// generation, so a timer armed for an older generation can never commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    quiet_period: Duration,
    min_len: usize,
    generation: u64,
    pending: Option<String>,
}

/// What the caller must do after feeding an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Debounce {
    /// Input is below the minimum length; nothing will be committed
    Clear,
    /// Arm a timer that reports `generation` back after `delay`
    Schedule { generation: u64, delay: Duration },
}

impl Debouncer {
    pub fn new(quiet_period: Duration, min_len: usize) -> Self {
        Self {
            quiet_period,
            min_len,
            generation: 0,
            pending: None,
        }
    }

    /// True when `value` is long enough to be worth a suggestion fetch
    pub fn meets_min_len(&self, value: &str) -> bool {
        value.chars().count() >= self.min_len
    }

    /// Feeds a new raw value
    pub fn update(&mut self, value: &str) -> Debounce {
        self.generation += 1;

        if !self.meets_min_len(value) {
            self.pending = None;
            return Debounce::Clear;
        }

        self.pending = Some(value.to_string());
        Debounce::Schedule {
            generation: self.generation,
            delay: self.quiet_period,
        }
    }

    /// Timer callback; yields the value to commit if the timer is still current
    pub fn fire(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Drops any pending commit
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
