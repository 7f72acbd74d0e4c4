//! `Market`: exclusive owner of the grid and the agent roster.
//!
//! Every state change in a run goes through one of the methods below.  The
//! roster is kept in insertion order, which is also turn order; agent ids are
//! assigned sequentially from zero and never reused, so the roster is always
//! sorted by id and lookups are a binary search.

use em_agent::{Agent, AgentSeed};
use em_core::{AgentId, Direction, Energy, GridBounds, MarketConfig, Position, SimRng, Step};
use em_grid::{Cell, GridError, GridWorld, Replenishment};
use tracing::debug;

use crate::{
    AgentSnapshot, CellSnapshot, DecaySweep, MarketError, MarketResult, MarketSnapshot,
    SystemEnergy, TradeEntry,
};

/// Radius of the square sensory window around an agent (3×3).
pub const SIGHT_RADIUS: u32 = 1;

/// Result of [`Market::move_agent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Position,
    pub to:   Position,
}

impl MoveOutcome {
    /// The grid edge stopped the move.
    #[inline]
    pub fn blocked(&self) -> bool {
        self.from == self.to
    }
}

pub struct Market {
    grid:                        GridWorld,
    agents:                      Vec<Agent>,
    trade_history:               Vec<TradeEntry>,
    total_energy_added_per_turn: Energy,
    next_id:                     u32,
}

impl Market {
    // ── Construction ──────────────────────────────────────────────────────

    /// A market over an existing grid with an empty roster.
    pub fn new(grid: GridWorld, total_energy_added_per_turn: Energy) -> Self {
        Self {
            grid,
            agents: Vec::new(),
            trade_history: Vec::new(),
            total_energy_added_per_turn,
            next_id: 0,
        }
    }

    /// A market with a freshly seeded grid (see
    /// [`GridWorld::distribute_resources`]).
    pub fn from_config(config: &MarketConfig, rng: &mut SimRng) -> Self {
        let mut grid = GridWorld::new(config.bounds());
        grid.distribute_resources(config, rng);
        Self::new(grid, config.total_energy_added_per_turn)
    }

    /// Place a new agent on the roster and return its id.
    ///
    /// Seed fields left unset take their values from `config`; a seed without
    /// a position is placed on a uniformly random cell no living agent
    /// occupies.  Names must be unique, positions distinct and in bounds, and
    /// starting energy positive.
    pub fn add_agent(
        &mut self,
        seed:   AgentSeed,
        config: &MarketConfig,
        rng:    &mut SimRng,
    ) -> MarketResult<AgentId> {
        if seed.name.is_empty() {
            return Err(MarketError::InvalidSeed("agent name is empty".into()));
        }
        if self.find_by_name(&seed.name).is_some() {
            return Err(MarketError::DuplicateName(seed.name));
        }
        let energy = seed.energy.unwrap_or(config.initial_energy);
        if energy <= 0 {
            return Err(MarketError::InvalidSeed(format!(
                "{}: starting energy must be positive, got {energy}",
                seed.name
            )));
        }
        let loss = seed.energy_loss_per_turn.unwrap_or(config.energy_loss_per_turn);
        if loss < 0 {
            return Err(MarketError::InvalidSeed(format!(
                "{}: energy_loss_per_turn must be non-negative, got {loss}",
                seed.name
            )));
        }

        let position = match seed.position {
            Some(pos) => {
                if !self.grid.contains(pos) {
                    return Err(GridError::OutOfBounds(pos).into());
                }
                if self.occupied(pos) {
                    return Err(MarketError::PositionTaken(pos));
                }
                pos
            }
            None => self.random_free_cell(rng)?,
        };

        let id = AgentId(self.next_id);
        self.next_id += 1;
        debug!(agent = %seed.name, %id, %position, energy, "agent placed");
        self.agents.push(Agent::new(id, seed.name, seed.persona, position, energy, loss));
        Ok(id)
    }

    fn occupied(&self, pos: Position) -> bool {
        self.agents.iter().any(|a| a.is_alive() && a.position() == pos)
    }

    fn random_free_cell(&self, rng: &mut SimRng) -> MarketResult<Position> {
        let free: Vec<Position> = self.bounds().positions().filter(|&p| !self.occupied(p)).collect();
        if free.is_empty() {
            return Err(MarketError::NoFreeCell);
        }
        Ok(free[rng.gen_range(0..free.len())])
    }

    // ── Access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    /// Direct grid access, for scenario setup and tests.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut GridWorld {
        &mut self.grid
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.grid.bounds()
    }

    /// The roster in turn order.  May still hold agents that died this step
    /// until [`remove_dead`][Self::remove_dead] runs.
    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn living_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    #[inline]
    pub fn total_energy_added_per_turn(&self) -> Energy {
        self.total_energy_added_per_turn
    }

    /// Number of ids handed out so far; every id ever issued is below this.
    #[inline]
    pub fn issued_ids(&self) -> usize {
        self.next_id as usize
    }

    /// Ids of the current roster, in turn order.
    pub fn roster(&self) -> Vec<AgentId> {
        self.agents.iter().map(Agent::id).collect()
    }

    fn index_of(&self, id: AgentId) -> MarketResult<usize> {
        self.agents
            .binary_search_by_key(&id, Agent::id)
            .map_err(|_| MarketError::AgentNotFound(id))
    }

    pub fn agent(&self, id: AgentId) -> MarketResult<&Agent> {
        Ok(&self.agents[self.index_of(id)?])
    }

    pub fn agent_mut(&mut self, id: AgentId) -> MarketResult<&mut Agent> {
        let i = self.index_of(id)?;
        Ok(&mut self.agents[i])
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name() == name)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The agent's cell and its eight neighbours, clipped to the grid,
    /// row-major.
    pub fn nearby_cells(&self, id: AgentId) -> MarketResult<Vec<(Position, Cell)>> {
        let center = self.agent(id)?.position();
        self.bounds()
            .neighborhood(center, SIGHT_RADIUS)
            .map(|p| self.grid.cell(p).map(|c| (p, *c)).map_err(MarketError::from))
            .collect()
    }

    /// Other living agents within Chebyshev distance `radius`, in roster
    /// order.
    pub fn nearby_agents(&self, id: AgentId, radius: u32) -> MarketResult<Vec<AgentId>> {
        let center = self.agent(id)?.position();
        Ok(self
            .agents
            .iter()
            .filter(|a| a.id() != id && a.is_alive() && a.position().chebyshev(center) <= radius)
            .map(Agent::id)
            .collect())
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Move one cell in `direction`, clamped at the grid edge.
    ///
    /// A dead agent does not move; its outcome reports `from == to`.
    pub fn move_agent(&mut self, id: AgentId, direction: Direction) -> MarketResult<MoveOutcome> {
        let bounds = self.bounds();
        let agent = self.agent_mut(id)?;
        let from = agent.position();
        if !agent.is_alive() {
            return Ok(MoveOutcome { from, to: from });
        }
        let to = from.step(direction, bounds);
        agent.set_position(to);
        Ok(MoveOutcome { from, to })
    }

    /// Empty the agent's cell into its energy.  Returns the energy gained;
    /// 0 for a dead agent or an empty cell.
    pub fn gather(&mut self, id: AgentId) -> MarketResult<Energy> {
        let i = self.index_of(id)?;
        if !self.agents[i].is_alive() {
            return Ok(0);
        }
        let food = self.grid.take(self.agents[i].position())?;
        let gained = food.energy();
        self.agents[i].gain(gained);
        Ok(gained)
    }

    /// Decay every living agent once.
    pub fn decay_all(&mut self) -> DecaySweep {
        let mut sweep = DecaySweep::default();
        for agent in self.agents.iter_mut().filter(|a| a.is_alive()) {
            sweep.alive_before += 1;
            let outcome = agent.decay();
            sweep.decay_loss += outcome.lost;
            if outcome.died {
                sweep.shortfall -= agent.energy();
                sweep.died.push(agent.id());
            }
        }
        sweep
    }

    /// Drop dead agents from the roster, keeping survivors in order.
    /// Returns how many were removed.
    pub fn remove_dead(&mut self) -> usize {
        let before = self.agents.len();
        self.agents.retain(Agent::is_alive);
        before - self.agents.len()
    }

    /// Scatter `target_energy` worth of food (see [`GridWorld::replenish`]).
    pub fn replenish(
        &mut self,
        target_energy: Energy,
        config:        &MarketConfig,
        rng:           &mut SimRng,
    ) -> Replenishment {
        self.grid.replenish(target_energy, config, rng)
    }

    /// Move `amount` energy from `from` to `to`, all or nothing.
    ///
    /// Fails without changing anything when either agent is missing, the
    /// target is dead, or the proposer's spend precondition fails.  Does not
    /// check distance or append to the trade history.
    pub fn transfer(&mut self, from: AgentId, to: AgentId, amount: Energy) -> MarketResult<()> {
        if from == to {
            return Err(MarketError::SelfTrade(from));
        }
        let (fi, ti) = (self.index_of(from)?, self.index_of(to)?);
        if !self.agents[ti].is_alive() {
            return Err(MarketError::AgentDead(to));
        }
        self.agents[fi].spend(amount)?;
        self.agents[ti].gain(amount);
        Ok(())
    }

    /// Append an executed trade to the history.
    pub fn record_trade(&mut self, step: Step, from: &str, to: &str, amount: Energy) {
        self.trade_history.push(TradeEntry {
            step,
            from: from.to_string(),
            to: to.to_string(),
            amount,
        });
    }

    #[inline]
    pub fn trade_history(&self) -> &[TradeEntry] {
        &self.trade_history
    }

    // ── Accounting ────────────────────────────────────────────────────────

    /// Living-agent energy, grid food energy, and their sum.
    pub fn system_energy(&self) -> SystemEnergy {
        let agents = self.agents.iter().filter(|a| a.is_alive()).map(Agent::energy).sum();
        SystemEnergy::new(agents, self.grid.total_food_energy())
    }

    /// Copy of everything a renderer shows for one frame.
    pub fn snapshot(&self, step: Step) -> MarketSnapshot {
        let cells = self
            .grid
            .cells()
            .map(|(position, cell)| CellSnapshot {
                position,
                red_food: cell.red_food,
                green_food: cell.green_food,
            })
            .collect();
        let agents = self
            .agents
            .iter()
            .map(|a| AgentSnapshot {
                id:            a.id(),
                name:          a.name().to_string(),
                persona:       a.persona().to_string(),
                position:      a.position(),
                energy:        a.energy(),
                alive:         a.is_alive(),
                latest_action: a.latest_action.clone(),
                latest_trade:  a.latest_trade.clone(),
            })
            .collect();
        MarketSnapshot { step, bounds: self.bounds(), cells, agents }
    }
}
