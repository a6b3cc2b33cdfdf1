//! Core data types for the pricing engines
//!
//! Defines fundamental types:
//! - OptionContract: spot, strike, rate, vol, maturity, type, exercise
//! - Greeks: analytic sensitivities
//! - EngineConfig: lattice/simulation settings
//! - PricingError: error taxonomy

pub mod config;
pub mod error;
pub mod greeks;
pub mod option;

pub use config::*;
pub use error::*;
pub use greeks::*;
pub use option::*;
