//! Vanilla Pricer CLI
//!
//! Prices a reference contract with every method and prints its Greeks and a
//! straddle profile. An optional first argument names a JSON engine config.

use vanilla_pricer::prelude::*;
use vanilla_pricer::strategy::DEFAULT_CURVE_POINTS;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> PricingResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    println!("Vanilla Option Pricing");
    println!("======================\n");
    println!("  Binomial steps:        {}", config.lattice_steps);
    println!("  Monte Carlo draws:     {}", config.simulation_count);
    println!("  Seed:                  {}\n", config.seed);

    let mut pricer = PricingDispatcher::with_config(&config);

    let spot = 100.0;
    let strike = 100.0;
    let rate = 0.05;
    let vol = 0.20;
    let time = 1.0;

    println!("Contract:");
    println!("  Spot: ${:.2}", spot);
    println!("  Strike: ${:.2}", strike);
    println!("  Rate: {:.1}%", rate * 100.0);
    println!("  Vol: {:.1}%", vol * 100.0);
    println!("  Time: {:.2} years\n", time);

    for exercise in [ExerciseStyle::European, ExerciseStyle::American] {
        for option_type in [OptionType::Call, OptionType::Put] {
            let option = OptionContract::new(spot, strike, rate, vol, time, option_type, exercise)?;
            println!("{} {}:", exercise, option_type);
            for (method, value) in pricer.price_all_methods(&option) {
                if value.is_nan() {
                    println!("  {:<14} N/A", method);
                } else {
                    println!("  {:<14} ${:.4}", method, value);
                }
            }
        }
    }

    let call = OptionContract::european(spot, strike, rate, vol, time, OptionType::Call)?;
    println!("\nCall Greeks:");
    for (name, value) in pricer.calculate_greeks(&call).named() {
        println!("  {:<6} {:.4}", name, value);
    }

    let estimate = pricer
        .simulation_mut()
        .estimate(&call, VarianceReduction::ControlVariate)?;
    println!(
        "\nControl-variate MC: ${:.4} (std error {:.4})",
        estimate.price, estimate.std_error
    );

    let analytic = *pricer.analytic();
    let straddle = Strategy::straddle(&call, strike, PositionSide::Long, |c| analytic.price(c))?;
    println!("\n{}:", straddle.classify());
    println!("  Net premium: ${:.4}", straddle.net_premium());
    if let Some((lo, hi)) = straddle.default_spot_range() {
        let breakevens = straddle.breakevens(lo, hi, DEFAULT_CURVE_POINTS);
        let formatted: Vec<String> = breakevens.iter().map(|b| format!("${:.2}", b)).collect();
        println!("  Breakevens: {}", formatted.join(", "));
        println!("  Max loss: ${:.4}", straddle.max_loss(lo, hi, DEFAULT_CURVE_POINTS));
    }

    println!("\n--- Done ---");
    Ok(())
}
