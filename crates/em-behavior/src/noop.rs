//! An oracle whose agents never do anything.

use em_core::AgentRng;

use crate::{Decision, DecisionContext, DecisionOracle, OracleResult};

/// A [`DecisionOracle`] that always waits and rejects every offer.
///
/// Useful as a placeholder in tests, and for checking that decay alone drains
/// a population at the expected rate.
pub struct WaitOracle;

impl DecisionOracle for WaitOracle {
    fn decide(&mut self, _ctx: &DecisionContext, _rng: &mut AgentRng) -> OracleResult<Decision> {
        Ok(Decision::Wait)
    }
}
