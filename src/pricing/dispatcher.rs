//! PricingDispatcher - single entry point over the three engines

use std::collections::BTreeMap;

use super::PricingMethod;
use crate::core::{EngineConfig, Greeks, OptionContract, PricingError, PricingResult};
use crate::models::{AnalyticEngine, LatticeEngine, PricingEngine, SimulationEngine};

/// Owns one engine per registered method
#[derive(Debug, Clone)]
pub struct PricingDispatcher {
    analytic: AnalyticEngine,
    lattice: LatticeEngine,
    simulation: SimulationEngine,
}

impl Default for PricingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingDispatcher {
    /// Create a dispatcher with default engine settings
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            analytic: AnalyticEngine::new(),
            lattice: LatticeEngine::new(config.lattice_steps),
            simulation: SimulationEngine::new(config.simulation_count, config.seed)
                .with_path_steps(config.path_steps),
        }
    }

    pub fn analytic(&self) -> &AnalyticEngine {
        &self.analytic
    }

    pub fn lattice(&self) -> &LatticeEngine {
        &self.lattice
    }

    /// Mutable access for the variance-reduced estimators and path generation
    pub fn simulation_mut(&mut self) -> &mut SimulationEngine {
        &mut self.simulation
    }

    /// Engine registered under `method`
    pub fn engine_mut(&mut self, method: PricingMethod) -> &mut dyn PricingEngine {
        match method {
            PricingMethod::BlackScholes => &mut self.analytic,
            PricingMethod::Binomial => &mut self.lattice,
            PricingMethod::MonteCarlo => &mut self.simulation,
        }
    }

    /// Price with a method given by its registry name.
    ///
    /// Fails with `UnknownMethod` for an unregistered name and passes the
    /// engine's own error through otherwise.
    pub fn price(&mut self, contract: &OptionContract, method: &str) -> PricingResult<f64> {
        let method: PricingMethod = method.parse()?;
        self.price_with(contract, method)
    }

    /// Price with a typed method
    pub fn price_with(
        &mut self,
        contract: &OptionContract,
        method: PricingMethod,
    ) -> PricingResult<f64> {
        self.engine_mut(method).price(contract)
    }

    /// Price with every registered method.
    ///
    /// Never fails: a method that cannot price the contract gets NaN in its
    /// slot.
    pub fn price_all_methods(&mut self, contract: &OptionContract) -> BTreeMap<&'static str, f64> {
        let mut results = BTreeMap::new();

        for method in PricingMethod::ALL {
            let value = match self.price_with(contract, method) {
                Ok(v) => v,
                Err(e @ PricingError::UnsupportedExercise { .. }) => {
                    tracing::debug!("{} skipped: {}", method, e);
                    f64::NAN
                }
                Err(e) => {
                    tracing::warn!("{} unavailable: {}", method, e);
                    f64::NAN
                }
            };
            results.insert(method.name(), value);
        }

        results
    }

    /// Greeks from the closed-form engine.
    ///
    /// American contracts are not rejected; their Greeks are the European
    /// values and only approximate the early-exercise contract.
    pub fn calculate_greeks(&self, contract: &OptionContract) -> Greeks {
        self.analytic.greeks(contract)
    }

    /// Binomial tree depth for subsequent calls
    pub fn set_lattice_steps(&mut self, steps: usize) {
        tracing::info!("Binomial steps set to {}", steps);
        self.lattice.set_steps(steps);
    }

    /// Monte Carlo draw count for subsequent calls
    pub fn set_simulation_count(&mut self, simulations: usize) {
        tracing::info!("Monte Carlo simulations set to {}", simulations);
        self.simulation.set_simulations(simulations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;

    fn fast_dispatcher() -> PricingDispatcher {
        PricingDispatcher::with_config(&EngineConfig::fast())
    }

    #[test]
    fn test_price_by_name() {
        let mut dispatcher = fast_dispatcher();
        let call = OptionContract::european(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Call).unwrap();

        let bs = dispatcher.price(&call, "BlackScholes").unwrap();
        assert!((bs - 10.4506).abs() < 1e-3);

        let tree = dispatcher.price(&call, "Binomial").unwrap();
        assert!((tree - bs).abs() < 0.1);

        let mc = dispatcher.price(&call, "MonteCarlo").unwrap();
        assert!((mc - bs).abs() < 0.6);
    }

    #[test]
    fn test_unknown_method() {
        let mut dispatcher = fast_dispatcher();
        let call = OptionContract::european(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Call).unwrap();
        assert!(matches!(
            dispatcher.price(&call, "Heston"),
            Err(PricingError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_engine_errors_propagate() {
        let mut dispatcher = fast_dispatcher();
        let put = OptionContract::american(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Put).unwrap();
        assert!(matches!(
            dispatcher.price(&put, "BlackScholes"),
            Err(PricingError::UnsupportedExercise { .. })
        ));
        assert!(dispatcher.price(&put, "Binomial").is_ok());
    }

    #[test]
    fn test_price_all_isolates_failures() {
        let mut dispatcher = PricingDispatcher::new();
        dispatcher.set_lattice_steps(1000);
        let put = OptionContract::american(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Put).unwrap();

        let results = dispatcher.price_all_methods(&put);
        assert_eq!(results.len(), 3);
        assert!(results["BlackScholes"].is_nan());
        assert!(results["MonteCarlo"].is_nan());
        assert!(results["Binomial"].is_finite());
        assert!(results["Binomial"] >= 5.5735);
    }

    #[test]
    fn test_price_all_isolates_misconfigured_engine() {
        let mut dispatcher = fast_dispatcher();
        dispatcher.set_simulation_count(0);
        let call = OptionContract::european(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Call).unwrap();

        let results = dispatcher.price_all_methods(&call);
        assert!(results["MonteCarlo"].is_nan());
        assert!(results["BlackScholes"].is_finite());
        assert!(results["Binomial"].is_finite());
    }

    #[test]
    fn test_price_all_european() {
        let mut dispatcher = fast_dispatcher();
        let call = OptionContract::european(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Call).unwrap();

        let results = dispatcher.price_all_methods(&call);
        let keys: Vec<_> = results.keys().copied().collect();
        assert_eq!(keys, vec!["Binomial", "BlackScholes", "MonteCarlo"]);
        assert!(results.values().all(|v| v.is_finite()));
    }

    #[test]
    fn test_greeks() {
        let dispatcher = PricingDispatcher::new();
        let call = OptionContract::european(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Call).unwrap();

        let greeks = dispatcher.calculate_greeks(&call).named();
        assert!((greeks["Delta"] - 0.6368).abs() < 1e-4);
        assert!((greeks["Vega"] - 0.3752).abs() < 1e-4);

        // American contracts get the European values
        let american = OptionContract::american(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Call).unwrap();
        assert_eq!(
            dispatcher.calculate_greeks(&american),
            dispatcher.calculate_greeks(&call)
        );
    }

    #[test]
    fn test_configuration_forwarding() {
        let mut dispatcher = PricingDispatcher::new();
        assert_eq!(dispatcher.lattice().steps(), 100);

        dispatcher.set_lattice_steps(10);
        dispatcher.set_simulation_count(2000);
        assert_eq!(dispatcher.lattice().steps(), 10);
        assert_eq!(dispatcher.simulation_mut().simulations(), 2000);
        assert_eq!(dispatcher.engine_mut(PricingMethod::Binomial).name(), "Binomial Tree");
    }

    #[test]
    fn test_same_seed_dispatchers_agree() {
        let config = EngineConfig::fast();
        let mut a = PricingDispatcher::with_config(&config);
        let mut b = PricingDispatcher::with_config(&config);
        let put = OptionContract::european(95.0, 100.0, 0.03, 0.25, 0.5, OptionType::Put).unwrap();

        assert_eq!(
            a.price(&put, "MonteCarlo").unwrap().to_bits(),
            b.price(&put, "MonteCarlo").unwrap().to_bits()
        );
    }
}
