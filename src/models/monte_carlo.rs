//! Monte Carlo pricing under risk-neutral GBM
//!
//! S_T = S · exp((r - σ²/2)·T + σ√T·Z), Z ~ N(0, 1)
//!
//! Estimators:
//! - Plain: discounted sample mean of the payoff
//! - Antithetic: each draw Z is paired with -Z
//! - Control variate: the terminal price, whose risk-neutral mean S·e^(rT)
//!   is known, with the sample-optimal coefficient β = Cov/Var
//!
//! The generator is owned by the engine and advances on every draw, so two
//! engines built with the same seed and simulation count return identical
//! prices for the same sequence of calls.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use super::PricingEngine;
use crate::core::{ExerciseStyle, OptionContract, PricingError, PricingResult};

/// Variance reduction scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarianceReduction {
    None,
    Antithetic,
    ControlVariate,
}

/// Result of a simulation run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationEstimate {
    /// Discounted estimate of the option value
    pub price: f64,
    /// Standard error of `price`
    pub std_error: f64,
    /// Number of payoffs evaluated
    pub samples: usize,
}

/// Monte Carlo engine for European options
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    simulations: usize,
    seed: u64,
    path_steps: usize,
    rng: ChaCha8Rng,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(100_000, 42)
    }
}

impl SimulationEngine {
    pub fn new(simulations: usize, seed: u64) -> Self {
        Self {
            simulations,
            seed,
            path_steps: 252,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn with_path_steps(mut self, path_steps: usize) -> Self {
        self.path_steps = path_steps;
        self
    }

    pub fn simulations(&self) -> usize {
        self.simulations
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Takes effect on the next pricing call
    pub fn set_simulations(&mut self, simulations: usize) {
        self.simulations = simulations;
    }

    /// Restart the random stream from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Plain Monte Carlo price
    pub fn price(&mut self, contract: &OptionContract) -> PricingResult<f64> {
        Ok(self.estimate(contract, VarianceReduction::None)?.price)
    }

    /// Antithetic-variates price
    pub fn price_antithetic(&mut self, contract: &OptionContract) -> PricingResult<f64> {
        Ok(self.estimate(contract, VarianceReduction::Antithetic)?.price)
    }

    /// Control-variate price
    pub fn price_control_variate(&mut self, contract: &OptionContract) -> PricingResult<f64> {
        Ok(self.estimate(contract, VarianceReduction::ControlVariate)?.price)
    }

    /// Run the simulation with the chosen estimator
    pub fn estimate(
        &mut self,
        contract: &OptionContract,
        reduction: VarianceReduction,
    ) -> PricingResult<SimulationEstimate> {
        if contract.exercise() == ExerciseStyle::American {
            return Err(PricingError::unsupported_exercise(
                self.name(),
                contract.exercise(),
            ));
        }

        let min_draws = match reduction {
            VarianceReduction::None => 1,
            VarianceReduction::Antithetic | VarianceReduction::ControlVariate => 2,
        };
        if self.simulations < min_draws {
            return Err(PricingError::config(format!(
                "{:?} estimator needs at least {} simulations, got {}",
                reduction, min_draws, self.simulations
            )));
        }

        let df = contract.discount_factor();
        let (mean, std_error, samples) = match reduction {
            VarianceReduction::None => self.plain(contract),
            VarianceReduction::Antithetic => self.antithetic(contract),
            VarianceReduction::ControlVariate => self.control_variate(contract),
        };

        let estimate = SimulationEstimate {
            price: df * mean,
            std_error: df * std_error,
            samples,
        };
        tracing::debug!(
            engine = self.name(),
            ?reduction,
            samples,
            price = estimate.price,
            std_error = estimate.std_error,
            "priced contract"
        );
        Ok(estimate)
    }

    /// Full discretized GBM path of `steps` increments (steps + 1 points)
    pub fn generate_path(
        &mut self,
        contract: &OptionContract,
        steps: usize,
    ) -> PricingResult<Vec<f64>> {
        if steps == 0 {
            return Err(PricingError::config("path needs at least one step"));
        }
        let dt = contract.time_to_maturity() / steps as f64;
        let vol = contract.volatility();
        let drift = (contract.rate() - 0.5 * vol * vol) * dt;
        let diffusion = vol * dt.sqrt();

        let mut path = Vec::with_capacity(steps + 1);
        let mut s = contract.spot();
        path.push(s);

        for _ in 0..steps {
            let z = self.draw();
            s *= (drift + diffusion * z).exp();
            path.push(s);
        }

        Ok(path)
    }

    /// Path with the configured number of steps (252 by default)
    pub fn generate_default_path(&mut self, contract: &OptionContract) -> PricingResult<Vec<f64>> {
        self.generate_path(contract, self.path_steps)
    }

    fn draw(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }

    fn plain(&mut self, contract: &OptionContract) -> (f64, f64, usize) {
        let payoffs: Vec<f64> = (0..self.simulations)
            .map(|_| {
                let z = self.draw();
                contract.payoff(terminal_spot(contract, z))
            })
            .collect();

        let (mean, std) = mean_and_std(&payoffs);
        (mean, std / (payoffs.len() as f64).sqrt(), payoffs.len())
    }

    fn antithetic(&mut self, contract: &OptionContract) -> (f64, f64, usize) {
        let pairs = self.simulations / 2;
        let mut total = 0.0;
        let mut pair_means = Vec::with_capacity(pairs);

        for _ in 0..pairs {
            let z = self.draw();
            let up = contract.payoff(terminal_spot(contract, z));
            let down = contract.payoff(terminal_spot(contract, -z));
            total += up + down;
            pair_means.push(0.5 * (up + down));
        }

        let samples = 2 * pairs;
        let (_, std) = mean_and_std(&pair_means);
        (total / samples as f64, std / (pairs as f64).sqrt(), samples)
    }

    fn control_variate(&mut self, contract: &OptionContract) -> (f64, f64, usize) {
        let n = self.simulations;
        let forward = contract.spot() * (contract.rate() * contract.time_to_maturity()).exp();

        let mut payoffs = Vec::with_capacity(n);
        let mut controls = Vec::with_capacity(n);
        for _ in 0..n {
            let z = self.draw();
            let s_t = terminal_spot(contract, z);
            payoffs.push(contract.payoff(s_t));
            controls.push(s_t - forward);
        }

        let payoff_mean = payoffs.iter().sum::<f64>() / n as f64;
        let control_mean = controls.iter().sum::<f64>() / n as f64;

        let (covariance, control_var) = payoffs.iter().zip(&controls).fold(
            (0.0, 0.0),
            |(cov, var), (&y, &c)| {
                let dc = c - control_mean;
                (cov + (y - payoff_mean) * dc, var + dc * dc)
            },
        );
        let beta = if control_var > 0.0 {
            covariance / control_var
        } else {
            0.0
        };
        tracing::trace!(beta, control_mean, "control variate coefficient");

        let adjusted: Vec<f64> = payoffs
            .iter()
            .zip(&controls)
            .map(|(&y, &c)| y - beta * c)
            .collect();
        let (_, std) = mean_and_std(&adjusted);

        (payoff_mean - beta * control_mean, std / (n as f64).sqrt(), n)
    }
}

impl PricingEngine for SimulationEngine {
    fn name(&self) -> &'static str {
        "Monte Carlo"
    }

    fn price(&mut self, contract: &OptionContract) -> PricingResult<f64> {
        SimulationEngine::price(self, contract)
    }
}

/// Terminal spot for one standard normal draw
fn terminal_spot(contract: &OptionContract, z: f64) -> f64 {
    let vol = contract.volatility();
    let time = contract.time_to_maturity();
    let drift = (contract.rate() - 0.5 * vol * vol) * time;
    contract.spot() * (drift + vol * time.sqrt() * z).exp()
}

/// Sample mean and (n-1) standard deviation
fn mean_and_std(xs: &[f64]) -> (f64, f64) {
    let n = xs.len();
    if n == 0 {
        return (f64::NAN, f64::NAN);
    }
    let mean = xs.iter().sum::<f64>() / n as f64;
    if n < 2 {
        return (mean, 0.0);
    }
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (mean, var.sqrt())
}
