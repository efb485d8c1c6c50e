use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::SecondsFormat;

use crate::models::AnalysisResult;

/// Render the plain-text report for one analysis result.
///
/// Fixed layout: header block, one numbered block per factor each followed
/// by a blank line, then the overall recommendation and the end marker.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut lines: Vec<String> = vec![
        "Contract Analysis Report".into(),
        "=======================".into(),
        format!("File Name: {}", result.file_name),
        format!("File Size: {}", result.file_size),
        format!(
            "Analysis Date: {}",
            result
                .analysis_date
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        format!("Risk Percentage: {}%", result.risk_percentage),
        format!("Risk Level: {}", result.risk_level.as_str()),
        String::new(),
        "Identified Risk Factors:".into(),
    ];

    for (index, factor) in result.factors.iter().enumerate() {
        lines.push(format!(
            "  {}. Category: {}\n     Severity: {}\n     Description: {}\n     Recommendation: {}\n",
            index + 1,
            factor.category,
            factor.severity.as_str(),
            factor.description,
            factor.recommendation,
        ));
    }

    lines.push("Overall Recommendation:".into());
    lines.push(result.overall_recommendation.clone());
    lines.push(String::new());
    lines.push("--- End of Report ---".into());

    lines.join("\n")
}

/// Name of the exported report file: `<file name>.txt`, or a fallback when
/// the result somehow carries no file name.
pub fn report_file_name(result: &AnalysisResult) -> String {
    if result.file_name.is_empty() {
        "contract-report.txt".into()
    } else {
        format!("{}.txt", result.file_name)
    }
}

/// Write the rendered report into `dir` and return the written path.
pub fn export_report(result: &AnalysisResult, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(report_file_name(result));
    fs::write(&path, render_report(result))
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::produce_result;
    use crate::models::{AnalysisResult, RiskLevel};
    use chrono::{TimeZone, Utc};

    fn bare_result() -> AnalysisResult {
        AnalysisResult {
            id: "1700000000000".into(),
            risk_percentage: 45,
            risk_level: RiskLevel::from_percentage(45),
            file_name: "NDA.pdf".into(),
            file_size: "1.00 MB".into(),
            analysis_date: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            factors: Vec::new(),
            overall_recommendation: "Review before signing.".into(),
        }
    }

    #[test]
    fn report_has_literal_header_and_footer() {
        let report = render_report(&produce_result("NDA.pdf", 1_048_576));

        assert!(report.starts_with("Contract Analysis Report\n=======================\n"));
        assert!(report.contains("File Name: NDA.pdf"));
        assert!(report.contains("File Size: 1.00 MB"));
        assert!(report.contains("Identified Risk Factors:"));
        assert!(report.contains("  1. Category: Termination Clauses"));
        assert!(report.contains("  4. Category: Intellectual Property"));
        assert!(report.contains("     Severity: High"));
        assert!(report.ends_with("--- End of Report ---"));
    }

    #[test]
    fn empty_factor_list_still_emits_header_and_recommendation() {
        let report = render_report(&bare_result());

        assert!(report.contains("Identified Risk Factors:\nOverall Recommendation:"));
        assert!(report.contains("Review before signing."));
        assert!(!report.contains("1. Category:"));
        assert!(report.ends_with("--- End of Report ---"));
    }

    #[test]
    fn analysis_date_uses_millisecond_utc_form() {
        let report = render_report(&bare_result());
        assert!(report.contains("Analysis Date: 2024-01-15T09:30:00.000Z"));
    }

    #[test]
    fn export_names_file_after_the_contract() {
        let tmp = tempfile::tempdir().unwrap();
        let path = export_report(&bare_result(), tmp.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "NDA.pdf.txt");
        assert!(path.exists());

        let mut unnamed = bare_result();
        unnamed.file_name = String::new();
        let path = export_report(&unnamed, tmp.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "contract-report.txt");
    }
}
