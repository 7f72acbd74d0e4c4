//! `GridWorld`: the resource grid and its seeding / replenishment rules.

use em_core::{Energy, GridBounds, MarketConfig, Position, SimRng};
use tracing::debug;

use crate::{Cell, FoodKind, GridError, GridResult};

/// Outcome of one [`GridWorld::replenish`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Replenishment {
    /// Energy actually added.  Never exceeds the requested target.
    pub energy_added: Energy,
    pub red_units:    u32,
    pub green_units:  u32,
    /// Increments drawn but discarded because they would overshoot the target.
    pub rejected:     u32,
}

/// A fixed `width × height` grid of [`Cell`]s stored row-major.
///
/// Cells are only ever zeroed (by gathering) or incremented (by seeding and
/// replenishment); the grid itself lives for the whole run.
#[derive(Clone, Debug)]
pub struct GridWorld {
    bounds: GridBounds,
    cells:  Vec<Cell>,
}

impl GridWorld {
    /// An empty grid.
    pub fn new(bounds: GridBounds) -> Self {
        Self { bounds, cells: vec![Cell::EMPTY; bounds.area()] }
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.bounds.contains(pos)
    }

    pub fn cell(&self, pos: Position) -> GridResult<&Cell> {
        self.check(pos)?;
        Ok(&self.cells[self.bounds.index_of(pos)])
    }

    pub fn cell_mut(&mut self, pos: Position) -> GridResult<&mut Cell> {
        self.check(pos)?;
        let i = self.bounds.index_of(pos);
        Ok(&mut self.cells[i])
    }

    /// Overwrite one cell.
    pub fn set_cell(&mut self, pos: Position, cell: Cell) -> GridResult<()> {
        *self.cell_mut(pos)? = cell;
        Ok(())
    }

    /// Zero `pos` and return its previous contents.
    pub fn take(&mut self, pos: Position) -> GridResult<Cell> {
        Ok(self.cell_mut(pos)?.take())
    }

    /// All cells with their positions, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (self.bounds.position_of(i), c))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn cell_energy(&self, pos: Position) -> GridResult<Energy> {
        Ok(self.cell(pos)?.energy())
    }

    /// Sum of every cell's energy.
    pub fn total_food_energy(&self) -> Energy {
        self.cells.iter().map(Cell::energy).sum()
    }

    // ── Seeding ───────────────────────────────────────────────────────────

    /// Initial stochastic seeding.  Clears the grid first.
    ///
    /// Scans cells row-major; each cell receives food with probability
    /// `config.food_probability`: red with `config.red_probability`, otherwise
    /// green, in a count drawn from `1..=config.max_food_per_cell`.  The scan
    /// stops as soon as the distributed energy reaches
    /// `config.initial_grid_energy()`, so the total never exceeds the target
    /// by more than one cell's worth.
    ///
    /// Returns the energy distributed.
    pub fn distribute_resources(&mut self, config: &MarketConfig, rng: &mut SimRng) -> Energy {
        self.cells.fill(Cell::EMPTY);

        let target = config.initial_grid_energy();
        let mut total: Energy = 0;
        for cell in self.cells.iter_mut() {
            if total >= target {
                break;
            }
            if !rng.gen_bool(config.food_probability) {
                continue;
            }
            let kind = pick_kind(config.red_probability, rng);
            let units = rng.gen_range(1..=config.max_food_per_cell);
            *cell = Cell::of(kind, units);
            total += cell.energy();
        }

        debug!(target_energy = target, distributed = total, "grid seeded");
        total
    }

    /// Add single food units to uniformly random cells until `target_energy`
    /// has been added.
    ///
    /// Each draw is one red unit (probability `config.red_probability`) or one
    /// green unit.  A draw that would overshoot the target is rejected; after
    /// `config.replenish_retry_budget` rejections the call gives up, so it
    /// always terminates even when no increment fits the remaining budget.
    pub fn replenish(
        &mut self,
        target_energy: Energy,
        config:        &MarketConfig,
        rng:           &mut SimRng,
    ) -> Replenishment {
        let mut out = Replenishment::default();
        while out.energy_added < target_energy && out.rejected < config.replenish_retry_budget {
            let index = rng.gen_range(0..self.cells.len());
            let kind = pick_kind(config.red_probability, rng);
            if out.energy_added + kind.energy() > target_energy {
                out.rejected += 1;
                continue;
            }
            self.cells[index].add(kind, 1);
            out.energy_added += kind.energy();
            match kind {
                FoodKind::Red => out.red_units += 1,
                FoodKind::Green => out.green_units += 1,
            }
        }
        out
    }

    fn check(&self, pos: Position) -> GridResult<()> {
        if self.bounds.contains(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds(pos))
        }
    }
}

#[inline]
fn pick_kind(red_probability: f64, rng: &mut SimRng) -> FoodKind {
    if rng.gen_bool(red_probability) { FoodKind::Red } else { FoodKind::Green }
}
