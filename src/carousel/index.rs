use crate::input::Direction;

/// Number of planet/heading panels on the carousel.
pub const PANEL_COUNT: usize = 4;

/// Which panel is active. Always in `0..PANEL_COUNT` and wraps in both
/// directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CycleIndex(usize);

impl CycleIndex {
    /// The first panel.
    pub const ZERO: Self = Self(0);

    /// Index for `value`, wrapped into range.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value % PANEL_COUNT)
    }

    /// Raw panel number.
    #[must_use]
    pub const fn value(self) -> usize {
        self.0
    }

    /// The next panel, wrapping 3 → 0.
    #[must_use]
    pub const fn advance(self) -> Self {
        Self((self.0 + 1) % PANEL_COUNT)
    }

    /// The previous panel, wrapping 0 → 3.
    #[must_use]
    pub const fn retreat(self) -> Self {
        Self((self.0 + PANEL_COUNT - 1) % PANEL_COUNT)
    }

    /// One step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Forward => self.advance(),
            Direction::Backward => self.retreat(),
        }
    }
}
