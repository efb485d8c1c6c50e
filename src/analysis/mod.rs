pub mod engine;

pub use engine::{produce_result, AnalysisEngine, AnalysisEvent};
