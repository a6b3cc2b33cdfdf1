//! Option contract definitions
//!
//! Represents a single vanilla European/American option together with the
//! market inputs needed to price it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{PricingError, PricingResult};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Exercise style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseStyle {
    European,
    American,
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::American => write!(f, "American"),
        }
    }
}

/// Side of a position: bought (long) or written (short)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            PositionSide::Long => 1.0,
            PositionSide::Short => -1.0,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            PositionSide::Long => PositionSide::Short,
            PositionSide::Short => PositionSide::Long,
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSide::Long => write!(f, "Long"),
            PositionSide::Short => write!(f, "Short"),
        }
    }
}

/// Raw contract fields, checked on the way into an [`OptionContract`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContractParams {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub volatility: f64,
    pub time_to_maturity: f64,
    pub option_type: OptionType,
    pub exercise: ExerciseStyle,
}

/// Immutable option contract with its pricing inputs.
///
/// Construction validates the numeric fields, so every engine can assume
/// `spot`, `strike`, `volatility` and `time_to_maturity` are finite and
/// strictly positive and `rate` is finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ContractParams")]
pub struct OptionContract {
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    time_to_maturity: f64,
    option_type: OptionType,
    exercise: ExerciseStyle,
}

impl OptionContract {
    /// Create a validated contract
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        time_to_maturity: f64,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> PricingResult<Self> {
        check_positive("spot", spot)?;
        check_positive("strike", strike)?;
        check_positive("volatility", volatility)?;
        check_positive("time to maturity", time_to_maturity)?;
        if !rate.is_finite() {
            return Err(PricingError::invalid_input("rate must be finite"));
        }

        Ok(Self {
            spot,
            strike,
            rate,
            volatility,
            time_to_maturity,
            option_type,
            exercise,
        })
    }

    /// Create a new European option
    pub fn european(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        time_to_maturity: f64,
        option_type: OptionType,
    ) -> PricingResult<Self> {
        Self::new(
            spot,
            strike,
            rate,
            volatility,
            time_to_maturity,
            option_type,
            ExerciseStyle::European,
        )
    }

    /// Create a new American option
    pub fn american(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        time_to_maturity: f64,
        option_type: OptionType,
    ) -> PricingResult<Self> {
        Self::new(
            spot,
            strike,
            rate,
            volatility,
            time_to_maturity,
            option_type,
            ExerciseStyle::American,
        )
    }

    /// Create a contract whose maturity is measured between two calendar dates
    /// (ACT/365.25).
    #[allow(clippy::too_many_arguments)]
    pub fn with_expiry(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        expiry: NaiveDate,
        as_of: NaiveDate,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> PricingResult<Self> {
        let days = (expiry - as_of).num_days();
        if days <= 0 {
            return Err(PricingError::invalid_input(format!(
                "expiry {} is not after {}",
                expiry, as_of
            )));
        }
        let time = days as f64 / 365.25;
        Self::new(spot, strike, rate, volatility, time, option_type, exercise)
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Same market inputs and exercise, different strike and type
    pub fn with_terms(&self, strike: f64, option_type: OptionType) -> PricingResult<Self> {
        Self::new(
            self.spot,
            strike,
            self.rate,
            self.volatility,
            self.time_to_maturity,
            option_type,
            self.exercise,
        )
    }

    /// Intrinsic payoff if the underlying is observed at `spot`
    pub fn payoff(&self, spot: f64) -> f64 {
        self.option_type.intrinsic(spot, self.strike)
    }

    /// P&L of a position opened at `premium`, settled with the underlying at `spot`
    pub fn position_pnl(&self, spot: f64, premium: f64, side: PositionSide) -> f64 {
        let payoff = self.payoff(spot);
        match side {
            PositionSide::Long => payoff - premium,
            PositionSide::Short => premium - payoff,
        }
    }

    /// Discount factor e^(-rT) to maturity
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.time_to_maturity).exp()
    }

    /// Is this option in the money at the given spot?
    pub fn is_itm(&self, spot: f64) -> bool {
        match self.option_type {
            OptionType::Call => spot > self.strike,
            OptionType::Put => spot < self.strike,
        }
    }
}

impl TryFrom<ContractParams> for OptionContract {
    type Error = PricingError;

    fn try_from(p: ContractParams) -> PricingResult<Self> {
        Self::new(
            p.spot,
            p.strike,
            p.rate,
            p.volatility,
            p.time_to_maturity,
            p.option_type,
            p.exercise,
        )
    }
}

fn check_positive(field: &str, value: f64) -> PricingResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PricingError::invalid_input(format!(
            "{} must be finite and positive, got {}",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_call() -> OptionContract {
        OptionContract::european(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Call).unwrap()
    }

    #[test]
    fn test_option_type() {
        assert_eq!(OptionType::Call.phi(), 1.0);
        assert_eq!(OptionType::Put.phi(), -1.0);

        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
    }

    #[test]
    fn test_payoff_and_pnl() {
        let call = atm_call();
        assert_eq!(call.payoff(120.0), 20.0);
        assert_eq!(call.payoff(80.0), 0.0);

        assert_eq!(call.position_pnl(120.0, 10.0, PositionSide::Long), 10.0);
        assert_eq!(call.position_pnl(120.0, 10.0, PositionSide::Short), -10.0);
        assert_eq!(call.position_pnl(80.0, 10.0, PositionSide::Short), 10.0);

        let put = OptionContract::european(100.0, 100.0, 0.05, 0.20, 1.0, OptionType::Put).unwrap();
        assert_eq!(put.payoff(85.0), 15.0);
        assert_eq!(put.position_pnl(85.0, 5.0, PositionSide::Long), 10.0);
    }

    #[test]
    fn test_validation_rejects_degenerate_inputs() {
        let cases = [
            (0.0, 100.0, 0.05, 0.2, 1.0),
            (100.0, -1.0, 0.05, 0.2, 1.0),
            (100.0, 100.0, 0.05, 0.0, 1.0),
            (100.0, 100.0, 0.05, 0.2, 0.0),
            (100.0, 100.0, f64::NAN, 0.2, 1.0),
            (f64::INFINITY, 100.0, 0.05, 0.2, 1.0),
        ];
        for (s, k, r, v, t) in cases {
            let res = OptionContract::european(s, k, r, v, t, OptionType::Call);
            assert!(matches!(res, Err(PricingError::InvalidInput(_))));
        }

        // Negative rates are allowed
        assert!(OptionContract::european(100.0, 100.0, -0.01, 0.2, 1.0, OptionType::Put).is_ok());
    }

    #[test]
    fn test_with_expiry() {
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();

        let opt = OptionContract::with_expiry(
            500.0,
            500.0,
            0.05,
            0.2,
            expiry,
            as_of,
            OptionType::Call,
            ExerciseStyle::European,
        )
        .unwrap();

        // ~5 months = ~0.41 years
        assert!(opt.time_to_maturity() > 0.4 && opt.time_to_maturity() < 0.42);

        let expired = OptionContract::with_expiry(
            500.0,
            500.0,
            0.05,
            0.2,
            as_of,
            expiry,
            OptionType::Call,
            ExerciseStyle::European,
        );
        assert!(expired.is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"spot":100.0,"strike":95.0,"rate":0.03,"volatility":0.25,
            "time_to_maturity":0.5,"option_type":"Put","exercise":"American"}"#;
        let opt: OptionContract = serde_json::from_str(json).unwrap();
        assert_eq!(opt.strike(), 95.0);
        assert_eq!(opt.exercise(), ExerciseStyle::American);

        let bad = r#"{"spot":100.0,"strike":95.0,"rate":0.03,"volatility":-0.25,
            "time_to_maturity":0.5,"option_type":"Put","exercise":"American"}"#;
        assert!(serde_json::from_str::<OptionContract>(bad).is_err());
    }

    #[test]
    fn test_moneyness() {
        let call = atm_call();
        assert!(call.is_itm(110.0));
        assert!(!call.is_itm(90.0));
        assert!((call.discount_factor() - (-0.05f64).exp()).abs() < 1e-15);
    }
}
