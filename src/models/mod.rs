//! Pricing Models
//!
//! Implements:
//! - Black-Scholes (closed form + Greeks)
//! - Cox-Ross-Rubinstein binomial tree (European and American)
//! - Monte Carlo under risk-neutral GBM (with variance reduction)

pub mod binomial;
pub mod black_scholes;
pub mod monte_carlo;

pub use binomial::*;
pub use black_scholes::*;
pub use monte_carlo::*;

use crate::core::{OptionContract, PricingResult};

/// Common interface of the pricing engines.
///
/// `price` takes `&mut self` because the simulation engine advances its
/// random stream on every call.
pub trait PricingEngine {
    /// Human-readable engine name
    fn name(&self) -> &'static str;

    /// Fair value of the contract, or the reason this engine cannot price it
    fn price(&mut self, contract: &OptionContract) -> PricingResult<f64>;
}
