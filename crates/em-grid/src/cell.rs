//! A single grid cell and the two food kinds it can hold.

use em_core::{Energy, GREEN_FOOD_ENERGY, RED_FOOD_ENERGY};

/// The two kinds of food.  Red is scarce-but-rich, green is plentiful-but-poor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FoodKind {
    Red,
    Green,
}

impl FoodKind {
    /// Energy of one unit.
    #[inline]
    pub fn energy(self) -> Energy {
        match self {
            FoodKind::Red => RED_FOOD_ENERGY,
            FoodKind::Green => GREEN_FOOD_ENERGY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FoodKind::Red => "red",
            FoodKind::Green => "green",
        }
    }
}

/// Food counts at one `(x, y)`.  Counts are unsigned, so never negative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub red_food:   u32,
    pub green_food: u32,
}

impl Cell {
    pub const EMPTY: Cell = Cell { red_food: 0, green_food: 0 };

    #[inline]
    pub const fn new(red_food: u32, green_food: u32) -> Self {
        Self { red_food, green_food }
    }

    /// A cell holding `units` of a single kind.
    pub fn of(kind: FoodKind, units: u32) -> Self {
        match kind {
            FoodKind::Red => Cell::new(units, 0),
            FoodKind::Green => Cell::new(0, units),
        }
    }

    /// `red_food * 50 + green_food * 5`.
    #[inline]
    pub fn energy(&self) -> Energy {
        self.red_food as Energy * RED_FOOD_ENERGY + self.green_food as Energy * GREEN_FOOD_ENERGY
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.red_food == 0 && self.green_food == 0
    }

    /// Add `units` of `kind`.
    pub fn add(&mut self, kind: FoodKind, units: u32) {
        match kind {
            FoodKind::Red => self.red_food = self.red_food.saturating_add(units),
            FoodKind::Green => self.green_food = self.green_food.saturating_add(units),
        }
    }

    /// Zero the cell and return what it held.
    #[inline]
    pub fn take(&mut self) -> Cell {
        std::mem::take(self)
    }
}
