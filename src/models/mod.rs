pub mod analysis;
pub mod user;

pub use analysis::{format_file_size, AnalysisResult, FactorSeverity, RiskFactor, RiskLevel};
pub use user::User;
