//! Grid coordinates, movement directions, and spatial utilities.
//!
//! The world is a fixed `width × height` rectangle with `(0, 0)` in the
//! top-left corner.  `y` grows downward, so `Direction::Up` decrements `y`.
//! There is no wraparound anywhere: every step and neighborhood is clipped
//! to [`GridBounds`].

use std::fmt;
use std::str::FromStr;

use crate::EmError;

// ── Position ──────────────────────────────────────────────────────────────────

/// A cell coordinate on the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (king-move) distance: `max(|Δx|, |Δy|)`.
    #[inline]
    pub fn chebyshev(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// One step in `direction`, clamped to `bounds`.
    ///
    /// Stepping into a boundary returns `self` unchanged.
    pub fn step(self, direction: Direction, bounds: GridBounds) -> Position {
        let Position { x, y } = self;
        match direction {
            Direction::Up => Position::new(x, y.saturating_sub(1)),
            Direction::Down => Position::new(x, (y + 1).min(bounds.height - 1)),
            Direction::Left => Position::new(x.saturating_sub(1), y),
            Direction::Right => Position::new((x + 1).min(bounds.width - 1), y),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── GridBounds ────────────────────────────────────────────────────────────────

/// Dimensions of the grid.  Both sides are at least 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    pub width:  u32,
    pub height: u32,
}

impl GridBounds {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Number of cells.
    #[inline]
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `pos`.  Caller guarantees `self.contains(pos)`.
    #[inline]
    pub fn index_of(self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Inverse of [`index_of`][Self::index_of].
    #[inline]
    pub fn position_of(self, index: usize) -> Position {
        let w = self.width as usize;
        Position::new((index % w) as u32, (index / w) as u32)
    }

    /// The square of side `2 * radius + 1` centred on `center`, clipped to the
    /// grid, in row-major order.  Includes `center` itself.
    pub fn neighborhood(self, center: Position, radius: u32) -> impl Iterator<Item = Position> {
        let x0 = center.x.saturating_sub(radius);
        let y0 = center.y.saturating_sub(radius);
        let x1 = center.x.saturating_add(radius).min(self.width - 1);
        let y1 = center.y.saturating_add(radius).min(self.height - 1);
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| Position::new(x, y)))
    }

    /// All positions in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

impl fmt::Display for GridBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// A cardinal movement direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Upper-case label, as used in tagged oracle responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = EmError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            other => Err(EmError::Parse(format!("unknown direction {other:?}"))),
        }
    }
}
