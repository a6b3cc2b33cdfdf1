//! Pricing dispatch
//!
//! Runs the engines by registered method name, prices with every method at
//! once, and computes Greeks.

mod dispatcher;
mod method;

pub use dispatcher::*;
pub use method::*;
