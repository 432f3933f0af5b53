use crate::count::{LengthWindow, Strategy};

/// Everything that can be configured about a run. The defaults count lengths `7..=11` and pick
/// the strategy automatically.
///
/// ```
/// use walkcount::prelude::*;
///
/// let config = Config::default().with_high(20).with_strategy(Strategy::Propagation);
/// assert_eq!(config.window, LengthWindow::new(7, 20));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// The lengths that are counted.
    pub window: LengthWindow,
    /// How walks are counted.
    pub strategy: Strategy,
}

impl Config {
    /// Counts names of length `7..=11`.
    pub fn short_names() -> Self {
        Self::default()
    }

    /// Counts names of length `7..=98`, where precomputing matrix powers for every starting
    /// length becomes expensive.
    pub fn long_names() -> Self {
        Self::default().with_high(98)
    }

    /// Replaces the window.
    pub fn with_window(mut self, window: LengthWindow) -> Self {
        self.window = window;
        self
    }

    /// Replaces the smallest counted length.
    pub fn with_low(mut self, low: usize) -> Self {
        self.window = LengthWindow::new(low, self.window.high());
        self
    }

    /// Replaces the largest counted length.
    pub fn with_high(mut self, high: usize) -> Self {
        self.window = LengthWindow::new(self.window.low(), high);
        self
    }

    /// Replaces the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}
