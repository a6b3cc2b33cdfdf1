//! Multi-leg option strategies
//!
//! A strategy is an ordered list of legs (contract, side, premium, quantity).
//! It aggregates the premium paid or received, the P&L at an observed spot,
//! and recognises the common one- and two-leg shapes.

mod analysis;
mod presets;

pub use analysis::*;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Greeks, OptionContract, OptionType, PositionSide, PricingError, PricingResult};
use crate::models::AnalyticEngine;

/// Raw leg fields, checked on the way into a [`Leg`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LegParams {
    pub contract: OptionContract,
    pub side: PositionSide,
    pub premium: f64,
    pub quantity: u32,
}

/// One position in a strategy.
///
/// The premium is finite and non-negative and the quantity is at least one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LegParams")]
pub struct Leg {
    contract: OptionContract,
    side: PositionSide,
    /// Premium per contract
    premium: f64,
    quantity: u32,
}

impl Leg {
    pub fn new(
        contract: OptionContract,
        side: PositionSide,
        premium: f64,
        quantity: u32,
    ) -> PricingResult<Self> {
        if !premium.is_finite() || premium < 0.0 {
            return Err(PricingError::invalid_input(format!(
                "premium must be finite and non-negative, got {}",
                premium
            )));
        }
        if quantity == 0 {
            return Err(PricingError::invalid_input("quantity must be at least 1"));
        }
        Ok(Self {
            contract,
            side,
            premium,
            quantity,
        })
    }

    pub fn contract(&self) -> &OptionContract {
        &self.contract
    }

    pub fn side(&self) -> PositionSide {
        self.side
    }

    pub fn premium(&self) -> f64 {
        self.premium
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Premium flow when opening: negative when paid, positive when received
    pub fn premium_flow(&self) -> f64 {
        -self.side.sign() * self.premium * self.quantity as f64
    }

    /// P&L of the leg with the underlying at `spot`
    pub fn pnl(&self, spot: f64) -> f64 {
        self.contract.position_pnl(spot, self.premium, self.side) * self.quantity as f64
    }
}

impl TryFrom<LegParams> for Leg {
    type Error = PricingError;

    fn try_from(p: LegParams) -> PricingResult<Self> {
        Self::new(p.contract, p.side, p.premium, p.quantity)
    }
}

/// Recognised strategy shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    Single {
        side: PositionSide,
        option_type: OptionType,
    },
    Straddle,
    Strangle,
    Spread,
    Custom,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Single { side, option_type } => write!(f, "{} {}", side, option_type),
            StrategyKind::Straddle => write!(f, "Straddle"),
            StrategyKind::Strangle => write!(f, "Strangle"),
            StrategyKind::Spread => write!(f, "Spread"),
            StrategyKind::Custom => write!(f, "Custom Strategy"),
        }
    }
}

/// Ordered collection of legs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Strategy {
    legs: Vec<Leg>,
}

impl Strategy {
    pub fn new() -> Self {
        Self { legs: Vec::new() }
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn push(&mut self, leg: Leg) {
        self.legs.push(leg);
    }

    /// Append a leg
    pub fn add_leg(
        &mut self,
        contract: OptionContract,
        side: PositionSide,
        premium: f64,
        quantity: u32,
    ) -> PricingResult<&mut Self> {
        self.legs.push(Leg::new(contract, side, premium, quantity)?);
        Ok(self)
    }

    /// Net premium to open: paid premiums negative, received positive
    pub fn net_premium(&self) -> f64 {
        self.legs.iter().map(Leg::premium_flow).sum()
    }

    /// Total P&L at expiry with the underlying at `spot`
    pub fn pnl(&self, spot: f64) -> f64 {
        self.legs.iter().map(|leg| leg.pnl(spot)).sum()
    }

    /// Side- and quantity-weighted Greeks of all legs
    pub fn net_greeks(&self, engine: &AnalyticEngine) -> Greeks {
        self.legs.iter().fold(Greeks::default(), |acc, leg| {
            let weight = leg.side.sign() * leg.quantity as f64;
            acc.add(&engine.greeks(&leg.contract).scale(weight))
        })
    }

    /// Recognise the strategy shape.
    ///
    /// Only one- and two-leg strategies are recognised. Two legs are checked
    /// in order: straddle, strangle, spread. Strikes compare exactly.
    pub fn classify(&self) -> StrategyKind {
        match self.legs.as_slice() {
            [leg] => StrategyKind::Single {
                side: leg.side,
                option_type: leg.contract.option_type(),
            },
            [a, b] => {
                let same_strike = a.contract.strike() == b.contract.strike();
                let same_type = a.contract.option_type() == b.contract.option_type();
                let same_side = a.side == b.side;

                match (same_strike, same_type, same_side) {
                    (true, false, true) => StrategyKind::Straddle,
                    (false, false, true) => StrategyKind::Strangle,
                    (_, true, false) => StrategyKind::Spread,
                    _ => StrategyKind::Custom,
                }
            }
            _ => StrategyKind::Custom,
        }
    }
}
