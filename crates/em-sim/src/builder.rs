//! Fluent builder for constructing a [`Sim`].

use em_agent::{AgentRngs, AgentSeed};
use em_behavior::DecisionOracle;
use em_core::{MarketConfig, SimRng, Step};
use em_market::Market;
use tracing::info;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<O>`].
///
/// # Required inputs
///
/// - [`MarketConfig`]: grid size, seed, step budget, energy economics, …
/// - `O: DecisionOracle`: decides for every agent and evaluates trades
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                            |
/// |------------------|----------------------------------------------------|
/// | `.agents(v)`     | No agents (the run ends before its first step)     |
/// | `.agent(seed)`   | Appends one seed                                   |
/// | `.market(m)`     | `Market::from_config`: a freshly seeded grid       |
///
/// Seeds are placed in the order given, which is also turn order.
///
/// # Example
///
/// ```rust
/// use em_agent::AgentSeed;
/// use em_behavior::WaitOracle;
/// use em_core::{MarketConfig, Position};
/// use em_sim::{NoopObserver, SimBuilder};
///
/// let config = MarketConfig { max_steps: 5, ..MarketConfig::default() };
/// let mut sim = SimBuilder::new(config, WaitOracle)
///     .agent(AgentSeed::new("Agent_1", "Cooperative").at(Position::new(2, 2)))
///     .build()
///     .unwrap();
/// let summary = sim.run(&mut NoopObserver).unwrap();
/// assert_eq!(summary.steps_run, 5);
/// ```
pub struct SimBuilder<O: DecisionOracle> {
    config: MarketConfig,
    oracle: O,
    seeds:  Vec<AgentSeed>,
    market: Option<Market>,
}

impl<O: DecisionOracle> SimBuilder<O> {
    pub fn new(config: MarketConfig, oracle: O) -> Self {
        Self { config, oracle, seeds: Vec::new(), market: None }
    }

    /// Replace the agent seeds.
    pub fn agents(mut self, seeds: Vec<AgentSeed>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn agent(mut self, seed: AgentSeed) -> Self {
        self.seeds.push(seed);
        self
    }

    /// Start from a prepared market (hand-built grid, agents already placed)
    /// instead of seeding one from the configuration.
    ///
    /// The market's grid must have the configured dimensions.  Seeds given to
    /// the builder are still added on top of it.
    pub fn market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }

    /// Validate the configuration, seed the grid, place the agents, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<O>> {
        self.config.validate()?;
        let mut rng = SimRng::new(self.config.seed);

        let mut market = match self.market {
            Some(market) => {
                if market.bounds() != self.config.bounds() {
                    return Err(SimError::BoundsMismatch {
                        expected: self.config.bounds().to_string(),
                        got:      market.bounds().to_string(),
                    });
                }
                market
            }
            None => Market::from_config(&self.config, &mut rng),
        };

        for seed in self.seeds {
            market.add_agent(seed, &self.config, &mut rng)?;
        }

        let rngs = AgentRngs::new(market.issued_ids(), self.config.seed);
        info!(
            agents = market.len(),
            grid = %market.bounds(),
            food_energy = market.grid().total_food_energy(),
            seed = self.config.seed,
            "simulation built"
        );

        Ok(Sim::from_parts(self.config, market, self.oracle, rngs, rng, Step::ZERO))
    }
}
