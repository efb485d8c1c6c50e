use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall risk category of an analyzed contract, ordered by severity.
///
/// Always derived from the risk percentage via [`RiskLevel::from_percentage`];
/// never assigned independently once the final percentage is known.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    /// Threshold mapping: <30 Low, [30,60) Medium, [60,80) High, >=80 Critical.
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            0..=29 => RiskLevel::Low,
            30..=59 => RiskLevel::Medium,
            60..=79 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FactorSeverity {
    Low,
    Medium,
    High,
}

impl FactorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorSeverity::Low => "Low",
            FactorSeverity::Medium => "Medium",
            FactorSeverity::High => "High",
        }
    }
}

/// One identified risk in an analyzed contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub category: String,
    pub description: String,
    pub severity: FactorSeverity,
    pub recommendation: String,
}

/// Output record of one contract risk analysis. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    pub risk_percentage: u8,
    pub risk_level: RiskLevel,
    pub file_name: String,
    pub file_size: String,
    pub analysis_date: DateTime<Utc>,
    pub factors: Vec<RiskFactor>,
    pub overall_recommendation: String,
}

/// Human-readable file size, always rendered in megabytes.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_thresholds_map_boundaries_correctly() {
        assert_eq!(RiskLevel::from_percentage(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percentage(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percentage(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_percentage(59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_percentage(60), RiskLevel::High);
        assert_eq!(RiskLevel::from_percentage(79), RiskLevel::High);
        assert_eq!(RiskLevel::from_percentage(80), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_percentage(100), RiskLevel::Critical);
    }

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn file_size_is_rendered_in_megabytes() {
        assert_eq!(format_file_size(1_048_576), "1.00 MB");
        assert_eq!(format_file_size(0), "0.00 MB");
        assert_eq!(format_file_size(2_621_440), "2.50 MB");
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let result = AnalysisResult {
            id: "1700000000000".into(),
            risk_percentage: 45,
            risk_level: RiskLevel::Medium,
            file_name: "NDA.pdf".into(),
            file_size: "1.00 MB".into(),
            analysis_date: Utc::now(),
            factors: Vec::new(),
            overall_recommendation: "Review before signing.".into(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["riskPercentage"], 45);
        assert_eq!(json["riskLevel"], "Medium");
        assert_eq!(json["fileName"], "NDA.pdf");
        assert!(json.get("analysisDate").is_some());
    }
}
