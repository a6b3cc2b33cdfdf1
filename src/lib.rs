//! # Vanilla Pricer - Option Pricing Engines
//!
//! Fair values and Greeks for vanilla European and American options using
//! three independent methods, plus multi-leg strategy payoffs.
//!
//! ## Overview
//!
//! - **Black-Scholes**: closed form with analytic Greeks (European only)
//! - **Binomial Tree**: Cox-Ross-Rubinstein lattice with early exercise
//! - **Monte Carlo**: risk-neutral GBM with antithetic and control-variate
//!   estimators (European only), deterministic for a given seed
//!
//! The [`PricingDispatcher`](pricing::PricingDispatcher) runs the engines by
//! name ("BlackScholes", "Binomial", "MonteCarlo"). Pricing with all methods
//! at once never fails: a method that cannot price a contract reports NaN.
//!
//! ## Usage
//!
//! ```rust
//! use vanilla_pricer::prelude::*;
//!
//! let option = OptionContract::european(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Call)?;
//!
//! let mut pricer = PricingDispatcher::new();
//! let bs = pricer.price(&option, "BlackScholes")?;
//! assert!((bs - 10.4506).abs() < 1e-3);
//!
//! let greeks = pricer.calculate_greeks(&option);
//! assert!(greeks.delta > 0.6);
//!
//! let american = OptionContract::american(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Put)?;
//! let all = pricer.price_all_methods(&american);
//! assert!(all["BlackScholes"].is_nan());
//! assert!(all["Binomial"].is_finite());
//! # Ok::<(), vanilla_pricer::PricingError>(())
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Calibrate to market data or solve for implied volatility
//! - Price path-dependent payoffs (only raw GBM paths are generated)
//! - Persist results

pub mod core;
pub mod models;
pub mod pricing;
pub mod strategy;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        ContractParams, EngineConfig, ExerciseStyle, Greeks, OptionContract, OptionType,
        PositionSide, PricingError, PricingResult,
    };

    // Engines
    pub use crate::models::{
        norm_cdf, norm_pdf, AnalyticEngine, LatticeEngine, PricingEngine, SimulationEngine,
        SimulationEstimate, VarianceReduction,
    };

    // Dispatch
    pub use crate::pricing::{PricingDispatcher, PricingMethod};

    // Strategies
    pub use crate::strategy::{Leg, LegParams, PnlPoint, Strategy, StrategyKind};
}

// Re-export main types at crate root
pub use crate::core::{OptionContract, PricingError, PricingResult};
pub use crate::pricing::PricingDispatcher;
