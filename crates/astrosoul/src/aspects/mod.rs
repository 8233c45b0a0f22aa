pub mod calculator;
pub mod types;

pub use calculator::{separation, AspectCalculator, ADVANCED_ORB, STANDARD_ORB};
pub use types::{Aspect, AspectKind, AspectMatch, AspectStrength, CrossAspect};
