//! Preset strategies
//!
//! Each preset takes a template contract for the market inputs (spot, rate,
//! vol, maturity, exercise) and a pricer that supplies every leg's premium,
//! e.g. `|c| engine.price(c)` with an [`AnalyticEngine`](crate::models::AnalyticEngine).

use super::{Leg, Strategy};
use crate::core::{OptionContract, OptionType, PositionSide, PricingError, PricingResult};

impl Strategy {
    /// Call and put at the same strike, both on `side`
    pub fn straddle<F>(
        template: &OptionContract,
        strike: f64,
        side: PositionSide,
        pricer: F,
    ) -> PricingResult<Self>
    where
        F: FnMut(&OptionContract) -> PricingResult<f64>,
    {
        build(
            template,
            &[
                (strike, OptionType::Call, side),
                (strike, OptionType::Put, side),
            ],
            pricer,
        )
    }

    /// Put at `put_strike` and call at `call_strike`, both on `side`
    pub fn strangle<F>(
        template: &OptionContract,
        put_strike: f64,
        call_strike: f64,
        side: PositionSide,
        pricer: F,
    ) -> PricingResult<Self>
    where
        F: FnMut(&OptionContract) -> PricingResult<f64>,
    {
        check_ordered(put_strike, call_strike)?;
        build(
            template,
            &[
                (call_strike, OptionType::Call, side),
                (put_strike, OptionType::Put, side),
            ],
            pricer,
        )
    }

    /// Long call at `low_strike`, short call at `high_strike` (flipped for a short side)
    pub fn bull_call_spread<F>(
        template: &OptionContract,
        low_strike: f64,
        high_strike: f64,
        side: PositionSide,
        pricer: F,
    ) -> PricingResult<Self>
    where
        F: FnMut(&OptionContract) -> PricingResult<f64>,
    {
        check_ordered(low_strike, high_strike)?;
        build(
            template,
            &[
                (low_strike, OptionType::Call, side),
                (high_strike, OptionType::Call, side.opposite()),
            ],
            pricer,
        )
    }

    /// Long put at `high_strike`, short put at `low_strike` (flipped for a short side)
    pub fn bear_put_spread<F>(
        template: &OptionContract,
        low_strike: f64,
        high_strike: f64,
        side: PositionSide,
        pricer: F,
    ) -> PricingResult<Self>
    where
        F: FnMut(&OptionContract) -> PricingResult<f64>,
    {
        check_ordered(low_strike, high_strike)?;
        build(
            template,
            &[
                (high_strike, OptionType::Put, side),
                (low_strike, OptionType::Put, side.opposite()),
            ],
            pricer,
        )
    }

    /// Four-leg condor over strikes `[put wing, put body, call body, call wing]`.
    ///
    /// `side` applies to the body: `Short` is the usual credit condor (sold
    /// body, bought wings).
    pub fn iron_condor<F>(
        template: &OptionContract,
        strikes: [f64; 4],
        side: PositionSide,
        pricer: F,
    ) -> PricingResult<Self>
    where
        F: FnMut(&OptionContract) -> PricingResult<f64>,
    {
        let [put_wing, put_body, call_body, call_wing] = strikes;
        check_ordered(put_wing, put_body)?;
        check_ordered(put_body, call_body)?;
        check_ordered(call_body, call_wing)?;

        let wing = side.opposite();
        build(
            template,
            &[
                (put_wing, OptionType::Put, wing),
                (put_body, OptionType::Put, side),
                (call_body, OptionType::Call, side),
                (call_wing, OptionType::Call, wing),
            ],
            pricer,
        )
    }
}

fn build<F>(
    template: &OptionContract,
    legs: &[(f64, OptionType, PositionSide)],
    mut pricer: F,
) -> PricingResult<Strategy>
where
    F: FnMut(&OptionContract) -> PricingResult<f64>,
{
    let mut strategy = Strategy::new();
    for &(strike, option_type, side) in legs {
        let contract = template.with_terms(strike, option_type)?;
        let premium = pricer(&contract)?;
        strategy.push(Leg::new(contract, side, premium, 1)?);
    }
    Ok(strategy)
}

fn check_ordered(low: f64, high: f64) -> PricingResult<()> {
    if low >= high {
        return Err(PricingError::invalid_input(format!(
            "strikes out of order: {} >= {}",
            low, high
        )));
    }
    Ok(())
}
