//! Registered pricing methods

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::PricingError;

/// A pricing method known to the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PricingMethod {
    BlackScholes,
    Binomial,
    MonteCarlo,
}

impl PricingMethod {
    /// Every registered method
    pub const ALL: [PricingMethod; 3] = [
        PricingMethod::BlackScholes,
        PricingMethod::Binomial,
        PricingMethod::MonteCarlo,
    ];

    /// Registry key
    pub fn name(&self) -> &'static str {
        match self {
            PricingMethod::BlackScholes => "BlackScholes",
            PricingMethod::Binomial => "Binomial",
            PricingMethod::MonteCarlo => "MonteCarlo",
        }
    }
}

impl fmt::Display for PricingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PricingMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| PricingError::unknown_method(s))
    }
}
