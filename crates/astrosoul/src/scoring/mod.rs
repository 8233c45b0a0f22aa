pub mod advanced;
pub mod compatibility;

pub use advanced::AdvancedAnalysis;
pub use compatibility::{cross_aspects, score_aspects, CompatibilityReport, MatchLabel};
