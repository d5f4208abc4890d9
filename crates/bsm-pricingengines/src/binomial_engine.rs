//! Binomial lattice engine.
//!
//! Prices European, American and Bermudan options by backward induction on
//! a Cox-Ross-Rubinstein tree. Early exercise is governed by the exercise
//! mask of the contract: every node for American options, the nodes within
//! half a step of an exercise time for Bermudan ones, none for European.

use bsm_core::{ensure, errors::Result, Settings, Size};
use bsm_instruments::{MarketData, PricingEngine, PricingResults, VanillaOption};
use bsm_methods::{exercise_mask, rollback, BinomialTree, TimeGrid};
use bsm_processes::BlackScholesProcess;
use tracing::debug;

/// CRR binomial tree pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialEngine {
    steps: Size,
}

impl BinomialEngine {
    /// Create an engine using a tree with `steps` time steps.
    pub fn new(steps: Size) -> Self {
        Self { steps }
    }

    /// Number of time steps of the tree.
    pub fn steps(&self) -> Size {
        self.steps
    }
}

impl Default for BinomialEngine {
    fn default() -> Self {
        Self::new(Settings::instance().pricing_defaults().lattice_steps)
    }
}

impl PricingEngine for BinomialEngine {
    fn calculate(&self, option: &VanillaOption, market: &MarketData) -> Result<PricingResults> {
        ensure!(self.steps > 0, "binomial engine needs at least one step");
        market.validate()?;
        let expiry = option.expiry();
        let grid = TimeGrid::uniform(expiry, self.steps)?;
        let mask = exercise_mask(option.exercise(), &grid)?;
        let process = BlackScholesProcess::new(option.spot(), market)?;
        let tree = BinomialTree::cox_ross_rubinstein(&process, expiry, self.steps)?;
        debug!(
            steps = self.steps,
            up = tree.up(),
            p = tree.probability_up(),
            %option,
            "binomial backward induction"
        );

        let discount = process.discount(tree.dt());
        let npv = rollback(&tree, &|s| option.payoff_at(s), discount, &mask)?;
        Ok(PricingResults::from_npv(npv))
    }
}
