//! Black-Scholes-Merton Model
//!
//! Provides:
//! - European option pricing in closed form
//! - Greeks computation (delta, gamma, theta, vega, rho)
//!
//! The normal CDF uses the Abramowitz-Stegun 7.1.26 rational approximation
//! rather than an exact erf, so reference prices reproduce to within its
//! ~1.5e-7 error bound.

use std::f64::consts::{PI, SQRT_2};

use super::PricingEngine;
use crate::core::{ExerciseStyle, Greeks, OptionContract, OptionType, PricingError, PricingResult};

const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

/// Standard normal CDF (Abramowitz-Stegun approximation)
pub fn norm_cdf(x: f64) -> f64 {
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs() / SQRT_2;

    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    let y = 1.0 - poly * (-x * x).exp();

    0.5 * (1.0 + sign * y)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 and d2 for a contract
pub fn d1_d2(contract: &OptionContract) -> (f64, f64) {
    let s = contract.spot();
    let k = contract.strike();
    let r = contract.rate();
    let vol = contract.volatility();
    let time = contract.time_to_maturity();

    let vol_sqrt_t = vol * time.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * vol * vol) * time) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Closed-form engine for European options.
///
/// Greeks are evaluated with the European formulas regardless of the
/// contract's exercise style; for American contracts they are only an
/// approximation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEngine;

impl AnalyticEngine {
    pub fn new() -> Self {
        Self
    }

    /// Black-Scholes price. Fails for American exercise.
    pub fn price(&self, contract: &OptionContract) -> PricingResult<f64> {
        if contract.exercise() == ExerciseStyle::American {
            return Err(PricingError::unsupported_exercise(
                self.name(),
                contract.exercise(),
            ));
        }

        let (d1, d2) = d1_d2(contract);
        let s = contract.spot();
        let k = contract.strike();
        let df = contract.discount_factor();

        let value = match contract.option_type() {
            OptionType::Call => s * norm_cdf(d1) - k * df * norm_cdf(d2),
            OptionType::Put => k * df * norm_cdf(-d2) - s * norm_cdf(-d1),
        };

        tracing::debug!(
            engine = self.name(),
            kind = %contract.option_type(),
            value,
            "priced contract"
        );
        Ok(value)
    }

    pub fn delta(&self, contract: &OptionContract) -> f64 {
        let (d1, _) = d1_d2(contract);
        match contract.option_type() {
            OptionType::Call => norm_cdf(d1),
            OptionType::Put => norm_cdf(d1) - 1.0,
        }
    }

    /// Same for call and put
    pub fn gamma(&self, contract: &OptionContract) -> f64 {
        let (d1, _) = d1_d2(contract);
        norm_pdf(d1)
            / (contract.spot() * contract.volatility() * contract.time_to_maturity().sqrt())
    }

    /// Time decay per calendar day
    pub fn theta(&self, contract: &OptionContract) -> f64 {
        let (d1, d2) = d1_d2(contract);
        let s = contract.spot();
        let k = contract.strike();
        let r = contract.rate();
        let df = contract.discount_factor();

        let term1 = -s * norm_pdf(d1) * contract.volatility()
            / (2.0 * contract.time_to_maturity().sqrt());
        let theta = match contract.option_type() {
            OptionType::Call => term1 - r * k * df * norm_cdf(d2),
            OptionType::Put => term1 + r * k * df * norm_cdf(-d2),
        };
        theta / 365.0
    }

    /// Per 1% vol move
    pub fn vega(&self, contract: &OptionContract) -> f64 {
        let (d1, _) = d1_d2(contract);
        contract.spot() * contract.time_to_maturity().sqrt() * norm_pdf(d1) / 100.0
    }

    /// Per 1% rate move
    pub fn rho(&self, contract: &OptionContract) -> f64 {
        let (_, d2) = d1_d2(contract);
        let k = contract.strike();
        let time = contract.time_to_maturity();
        let df = contract.discount_factor();
        match contract.option_type() {
            OptionType::Call => k * time * df * norm_cdf(d2) / 100.0,
            OptionType::Put => -k * time * df * norm_cdf(-d2) / 100.0,
        }
    }

    /// All five Greeks
    pub fn greeks(&self, contract: &OptionContract) -> Greeks {
        Greeks::new(
            self.delta(contract),
            self.gamma(contract),
            self.theta(contract),
            self.vega(contract),
            self.rho(contract),
        )
    }
}

impl PricingEngine for AnalyticEngine {
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    fn price(&mut self, contract: &OptionContract) -> PricingResult<f64> {
        AnalyticEngine::price(&*self, contract)
    }
}
