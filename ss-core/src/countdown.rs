/// Seconds the resend button stays disabled after the page loads.
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 60;

/// Outcome of a single countdown tick.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CountdownStep {
    /// Still counting; carries the seconds left.
    Counting(u32),
    /// Reached zero. Terminal.
    Expired,
}

/// Decrementing counter behind the resend cooldown.
///
/// Never goes below zero; once expired every further tick reports
/// [`CountdownStep::Expired`] without changing anything.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CountdownState {
    remaining: u32,
}

impl CountdownState {
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn tick(&mut self) -> CountdownStep {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            CountdownStep::Expired
        } else {
            CountdownStep::Counting(self.remaining)
        }
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECONDS)
    }
}
