//! Payoff profile of a strategy over a grid of spots at expiry

use serde::{Deserialize, Serialize};

use super::Strategy;

/// Points used when no grid size is given
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// One point of the P&L profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlPoint {
    pub spot: f64,
    pub pnl: f64,
}

impl Strategy {
    /// Spot range from half to one and a half times the first leg's strike
    pub fn default_spot_range(&self) -> Option<(f64, f64)> {
        self.legs
            .first()
            .map(|leg| (0.5 * leg.contract.strike(), 1.5 * leg.contract.strike()))
    }

    /// P&L at `points + 1` evenly spaced spots from `min_spot` to `max_spot`
    pub fn pnl_curve(&self, min_spot: f64, max_spot: f64, points: usize) -> Vec<PnlPoint> {
        let points = points.max(1);
        let step = (max_spot - min_spot) / points as f64;
        (0..=points)
            .map(|i| {
                let spot = min_spot + i as f64 * step;
                PnlPoint {
                    spot,
                    pnl: self.pnl(spot),
                }
            })
            .collect()
    }

    /// Spots where the P&L crosses zero, interpolated between grid points
    pub fn breakevens(&self, min_spot: f64, max_spot: f64, points: usize) -> Vec<f64> {
        let curve = self.pnl_curve(min_spot, max_spot, points);
        let mut result = Vec::new();

        for (i, w) in curve.windows(2).enumerate() {
            let (a, b) = (w[0], w[1]);
            if a.pnl == 0.0 {
                // Flat zero stretches report their first point only
                if i == 0 || curve[i - 1].pnl != 0.0 {
                    result.push(a.spot);
                }
            } else if a.pnl * b.pnl < 0.0 {
                let frac = a.pnl / (a.pnl - b.pnl);
                result.push(a.spot + frac * (b.spot - a.spot));
            }
        }
        if let [.., prev, last] = curve.as_slice() {
            if last.pnl == 0.0 && prev.pnl != 0.0 {
                result.push(last.spot);
            }
        }

        result
    }

    /// Largest P&L on the grid
    pub fn max_profit(&self, min_spot: f64, max_spot: f64, points: usize) -> f64 {
        self.pnl_curve(min_spot, max_spot, points)
            .iter()
            .map(|p| p.pnl)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest P&L on the grid
    pub fn max_loss(&self, min_spot: f64, max_spot: f64, points: usize) -> f64 {
        self.pnl_curve(min_spot, max_spot, points)
            .iter()
            .map(|p| p.pnl)
            .fold(f64::INFINITY, f64::min)
    }
}
