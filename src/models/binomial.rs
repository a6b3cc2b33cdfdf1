//! Cox-Ross-Rubinstein Binomial Tree
//!
//! dt = T/N, u = exp(σ√dt), d = 1/u, p = (exp(r·dt) - d) / (u - d)
//!
//! Terminal payoffs are rolled back through the tree with discounted
//! risk-neutral expectations. American contracts compare every node's
//! continuation value with immediate exercise, which makes this the only
//! engine that prices early exercise.

use super::PricingEngine;
use crate::core::{ExerciseStyle, OptionContract, PricingError, PricingResult};

/// Tree parameters for one pricing call
#[derive(Debug, Clone, Copy)]
struct TreeParams {
    dt: f64,
    u: f64,
    d: f64,
    p: f64,
}

impl TreeParams {
    fn new(contract: &OptionContract, steps: usize) -> Self {
        let dt = contract.time_to_maturity() / steps as f64;
        let u = (contract.volatility() * dt.sqrt()).exp();
        let d = 1.0 / u;
        let p = ((contract.rate() * dt).exp() - d) / (u - d);
        Self { dt, u, d, p }
    }

    /// Underlying price at node `i` of layer `step` (i up-moves)
    fn spot_at(&self, spot: f64, step: usize, i: usize) -> f64 {
        spot * self.u.powi(i as i32) * self.d.powi((step - i) as i32)
    }
}

/// Binomial lattice engine
#[derive(Debug, Clone)]
pub struct LatticeEngine {
    steps: usize,
}

impl Default for LatticeEngine {
    fn default() -> Self {
        Self::new(100)
    }
}

impl LatticeEngine {
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Takes effect on the next pricing call
    pub fn set_steps(&mut self, steps: usize) {
        self.steps = steps;
    }

    /// Price by backward induction; handles both exercise styles.
    pub fn price(&self, contract: &OptionContract) -> PricingResult<f64> {
        let n = self.steps;
        if n == 0 {
            return Err(PricingError::config("binomial steps must be > 0"));
        }

        let tree = TreeParams::new(contract, n);
        tracing::trace!(
            steps = n,
            dt = tree.dt,
            u = tree.u,
            p = tree.p,
            "binomial tree parameters"
        );

        let spot = contract.spot();
        let disc = (-contract.rate() * tree.dt).exp();
        let american = contract.exercise() == ExerciseStyle::American;

        let mut values: Vec<f64> = (0..=n)
            .map(|i| contract.payoff(tree.spot_at(spot, n, i)))
            .collect();

        for step in (0..n).rev() {
            for i in 0..=step {
                let continuation =
                    disc * (tree.p * values[i + 1] + (1.0 - tree.p) * values[i]);
                values[i] = if american {
                    let intrinsic = contract.payoff(tree.spot_at(spot, step, i));
                    continuation.max(intrinsic)
                } else {
                    continuation
                };
            }
        }

        let value = values[0];
        tracing::debug!(
            engine = self.name(),
            steps = n,
            exercise = %contract.exercise(),
            value,
            "priced contract"
        );
        Ok(value)
    }
}

impl PricingEngine for LatticeEngine {
    fn name(&self) -> &'static str {
        "Binomial Tree"
    }

    fn price(&mut self, contract: &OptionContract) -> PricingResult<f64> {
        LatticeEngine::price(&*self, contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;
    use crate::models::AnalyticEngine;

    #[test]
    fn test_converges_to_black_scholes() {
        let lattice = LatticeEngine::new(5000);
        let analytic = AnalyticEngine::new();

        for option_type in [OptionType::Call, OptionType::Put] {
            let c = OptionContract::european(100.0, 100.0, 0.05, 0.20, 1.0, option_type).unwrap();
            let tree = lattice.price(&c).unwrap();
            let bs = analytic.price(&c).unwrap();
            assert!((tree - bs).abs() < 1e-2, "{}: tree {} vs bs {}", option_type, tree, bs);
        }
    }

    #[test]
    fn test_early_exercise_premium() {
        let lattice = LatticeEngine::new(500);

        for option_type in [OptionType::Call, OptionType::Put] {
            let eu = OptionContract::european(100.0, 100.0, 0.05, 0.2, 1.0, option_type).unwrap();
            let am = OptionContract::american(100.0, 100.0, 0.05, 0.2, 1.0, option_type).unwrap();
            assert!(lattice.price(&am).unwrap() >= lattice.price(&eu).unwrap());
        }

        // Deep ITM put: early exercise is strictly valuable
        let eu = OptionContract::european(60.0, 100.0, 0.08, 0.2, 1.0, OptionType::Put).unwrap();
        let am = OptionContract::american(60.0, 100.0, 0.08, 0.2, 1.0, OptionType::Put).unwrap();
        let am_price = lattice.price(&am).unwrap();
        assert!(am_price > lattice.price(&eu).unwrap() + 0.5);
        assert!((am_price - 40.0).abs() < 1e-9, "exercise immediately: {}", am_price);
    }

    #[test]
    fn test_american_put_above_european_bs() {
        let lattice = LatticeEngine::new(1000);
        let am = OptionContract::american(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Put).unwrap();
        let eu = OptionContract::european(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Put).unwrap();

        let bs_put = AnalyticEngine::new().price(&eu).unwrap();
        assert!((bs_put - 5.5735).abs() < 1e-3);
        let am_put = lattice.price(&am).unwrap();
        assert!(am_put >= bs_put, "american {} < european {}", am_put, bs_put);
        // Known CRR value for these parameters is ~6.09
        assert!(am_put > 6.0 && am_put < 6.2);
    }

    #[test]
    fn test_monotone_in_spot() {
        let lattice = LatticeEngine::new(200);
        let mut last_call = f64::NEG_INFINITY;
        let mut last_put = f64::INFINITY;
        for spot in (70..=130).step_by(10) {
            let s = spot as f64;
            let call = OptionContract::american(s, 100.0, 0.05, 0.2, 1.0, OptionType::Call).unwrap();
            let put = OptionContract::american(s, 100.0, 0.05, 0.2, 1.0, OptionType::Put).unwrap();
            let c = lattice.price(&call).unwrap();
            let p = lattice.price(&put).unwrap();
            assert!(c > last_call);
            assert!(p < last_put);
            last_call = c;
            last_put = p;
        }
    }

    #[test]
    fn test_european_monotone_in_spot() {
        let lattice = LatticeEngine::new(200);
        let mut last_call = f64::NEG_INFINITY;
        let mut last_put = f64::INFINITY;
        for spot in (70..=130).step_by(10) {
            let s = spot as f64;
            let call = OptionContract::european(s, 100.0, 0.05, 0.2, 1.0, OptionType::Call).unwrap();
            let put = OptionContract::european(s, 100.0, 0.05, 0.2, 1.0, OptionType::Put).unwrap();
            let c = lattice.price(&call).unwrap();
            let p = lattice.price(&put).unwrap();
            assert!(c > last_call, "call not increasing at {}", s);
            assert!(p < last_put, "put not decreasing at {}", s);
            last_call = c;
            last_put = p;
        }
    }

    #[test]
    fn test_zero_steps_rejected() {
        let lattice = LatticeEngine::new(0);
        let c = OptionContract::european(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Call).unwrap();
        assert!(matches!(lattice.price(&c), Err(PricingError::Config(_))));
    }

    #[test]
    fn test_set_steps() {
        let mut lattice = LatticeEngine::default();
        assert_eq!(lattice.steps(), 100);
        lattice.set_steps(250);
        assert_eq!(lattice.steps(), 250);
    }
}
