//! Example: Pricing one option three ways
//!
//! Run with: cargo run --example basic_pricing

use vanilla_pricer::prelude::*;

fn main() -> PricingResult<()> {
    // Option parameters
    let spot = 500.0;
    let strike = 505.0;
    let time = 0.25; // 3 months
    let rate = 0.05; // 5% risk-free rate
    let vol = 0.20; // 20% volatility

    println!("=== Vanilla Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Time:     {:.2} years ({:.0} days)", time, time * 365.0);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    let call = OptionContract::european(spot, strike, rate, vol, time, OptionType::Call)?;
    let put = call.with_terms(strike, OptionType::Put)?;

    let analytic = AnalyticEngine::new();
    let lattice = LatticeEngine::new(1000);
    let mut simulation = SimulationEngine::new(200_000, 42);

    let call_price = analytic.price(&call)?;
    let put_price = analytic.price(&put)?;
    println!("Black-Scholes call: ${:.4}", call_price);
    println!("Black-Scholes put:  ${:.4}", put_price);
    println!("Binomial call:      ${:.4}", lattice.price(&call)?);

    for reduction in [
        VarianceReduction::None,
        VarianceReduction::Antithetic,
        VarianceReduction::ControlVariate,
    ] {
        let est = simulation.estimate(&call, reduction)?;
        println!(
            "Monte Carlo call ({:?}): ${:.4} ± {:.4}",
            reduction, est.price, est.std_error
        );
    }

    // Verify put-call parity: C - P = S - K*e^(-rT)
    let parity_lhs = call_price - put_price;
    let parity_rhs = spot - strike * (-rate * time).exp();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", parity_lhs);
    println!("  S - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.6}", (parity_lhs - parity_rhs).abs());

    // Early exercise
    let american_put = OptionContract::american(spot, strike, rate, vol, time, OptionType::Put)?;
    println!("\n=== Early Exercise ===\n");
    println!("European put (BS):   ${:.4}", put_price);
    println!("American put (tree): ${:.4}", lattice.price(&american_put)?);

    println!("\n=== Greeks (Call) ===\n");
    let greeks = analytic.greeks(&call);
    println!("Delta:  {:.4}", greeks.delta);
    println!("Gamma:  {:.4}", greeks.gamma);
    println!("Theta:  {:.4} (per day)", greeks.theta);
    println!("Vega:   {:.4} (per 1% vol)", greeks.vega);
    println!("Rho:    {:.4} (per 1% rate)", greeks.rho);

    let path = simulation.generate_default_path(&call)?;
    println!(
        "\nSimulated path: {} points, final spot ${:.2}",
        path.len(),
        path[path.len() - 1]
    );

    Ok(())
}
