//! Explainable confidence score.
//!
//! `0.5` baseline plus, in order:
//!
//! | factor               | contribution                      |
//! |----------------------|-----------------------------------|
//! | Section Completeness | `min(found / 7, 1) × 0.3`         |
//! | Safety Check         | `+0.2` clean, `−0.2` hallucinated |
//! | Red Flags            | `−0.1`, only listed when present  |
//! | RAG Grounding        | `rag × 0.2`                       |
//!
//! The sum is clamped to `[0, 1]` and reported rounded to two decimals.

use serde::Serialize;

use crate::metrics::round_to;

pub const BASELINE: f64 = 0.5;
pub const SECTION_COUNT: usize = 7;

const SECTION_WEIGHT: f64 = 0.3;
const SAFETY_WEIGHT: f64 = 0.2;
const RED_FLAG_PENALTY: f64 = -0.1;
const RAG_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceFactor {
    pub factor: &'static str,
    pub value: String,
    /// Signed, unrounded contribution.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceReport {
    /// Clamped and rounded to two decimals.
    pub overall_confidence: f64,
    /// Baseline plus every contribution, before clamping.
    pub unclamped: f64,
    pub factors: Vec<ConfidenceFactor>,
    pub explanation: String,
}

/// Scores one note.
pub fn confidence(
    sections_found: usize,
    has_red_flags: bool,
    has_hallucinations: bool,
    rag_score: f64,
) -> ConfidenceReport {
    let mut factors = Vec::with_capacity(4);

    let completeness = (sections_found as f64 / SECTION_COUNT as f64).min(1.0);
    factors.push(ConfidenceFactor {
        factor: "Section Completeness",
        value: format!("{sections_found}/{SECTION_COUNT} sections found"),
        contribution: completeness * SECTION_WEIGHT,
    });

    factors.push(if has_hallucinations {
        ConfidenceFactor {
            factor: "Safety Check",
            value: "Hallucinations detected".into(),
            contribution: -SAFETY_WEIGHT,
        }
    } else {
        ConfidenceFactor {
            factor: "Safety Check",
            value: "No hallucinations detected".into(),
            contribution: SAFETY_WEIGHT,
        }
    });

    if has_red_flags {
        factors.push(ConfidenceFactor {
            factor: "Red Flags",
            value: "Red flags present - requires attention".into(),
            contribution: RED_FLAG_PENALTY,
        });
    }

    factors.push(ConfidenceFactor {
        factor: "RAG Grounding",
        value: format!("Knowledge base match: {}", round_to(rag_score, 2)),
        contribution: rag_score * RAG_WEIGHT,
    });

    let unclamped = factors
        .iter()
        .fold(BASELINE, |acc, f| acc + f.contribution);
    let clamped = unclamped.clamp(0.0, 1.0);

    ConfidenceReport {
        overall_confidence: round_to(clamped, 2),
        unclamped,
        explanation: format!(
            "Confidence is {}% based on section completeness ({sections_found}/{SECTION_COUNT}), safety checks, and knowledge base grounding.",
            (clamped * 100.0).round() as i64
        ),
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_case_clamps_to_one() {
        let report = confidence(7, false, false, 1.0);
        assert!((report.unclamped - 1.2).abs() < 1e-9);
        assert_eq!(report.overall_confidence, 1.0);
        assert_eq!(report.factors.len(), 3);
        assert!(report.explanation.starts_with("Confidence is 100% "));
        assert!(report.explanation.contains("(7/7)"));
    }

    #[test]
    fn factors_follow_computation_order() {
        let report = confidence(2, true, true, 0.5);
        let names: Vec<_> = report.factors.iter().map(|f| f.factor).collect();
        assert_eq!(
            names,
            ["Section Completeness", "Safety Check", "Red Flags", "RAG Grounding"]
        );
        assert_eq!(report.factors[0].value, "2/7 sections found");
        assert_eq!(report.factors[1].value, "Hallucinations detected");
        assert_eq!(report.factors[3].value, "Knowledge base match: 0.5");
        // 0.5 + 0.0857 - 0.2 - 0.1 + 0.1
        assert_eq!(report.overall_confidence, 0.39);
    }

    #[test]
    fn red_flag_factor_only_when_present() {
        let report = confidence(0, false, false, 0.0);
        assert!(report.factors.iter().all(|f| f.factor != "Red Flags"));
        assert_eq!(report.overall_confidence, 0.7);
    }

    #[test]
    fn always_within_unit_interval_and_explained() {
        for found in 0..=SECTION_COUNT {
            for red in [false, true] {
                for halluc in [false, true] {
                    for step in 0..=100 {
                        let rag = f64::from(step) / 100.0;
                        let r = confidence(found, red, halluc, rag);

                        assert!(
                            (0.0..=1.0).contains(&r.overall_confidence),
                            "{found} {red} {halluc} {rag}: {}",
                            r.overall_confidence
                        );
                        let sum: f64 = r.factors.iter().map(|f| f.contribution).sum();
                        assert!((BASELINE + sum - r.unclamped).abs() < 1e-9);
                        assert_eq!(
                            r.overall_confidence,
                            round_to(r.unclamped.clamp(0.0, 1.0), 2)
                        );
                    }
                }
            }
        }
    }
}
