//! `finflags-rules` - financial flag rules
//!
//! Evaluates the three analysis flags (revenue above 5 crore, borrowing to
//! revenue ratio, interest service coverage) over an uploaded company
//! document, producing the same `{ "flags": { ... } }` report the analysis
//! endpoint returns.

#![warn(missing_docs, missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod document;
pub mod error;
pub mod rules;

pub use document::{CompanyData, Document, Financial};
pub use error::{Result, RulesError};
pub use rules::{evaluate, FlagColor, FlagReport, FlagSet};

/// Parse a document and evaluate it in one step.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid document or a rule cannot
/// be evaluated.
pub fn evaluate_slice(bytes: &[u8]) -> Result<FlagReport> {
    let document = Document::from_slice(bytes)?;
    evaluate(&document.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_slice() {
        let json = br#"{
            "data": {
                "financials": [
                    {
                        "nature": "CONSOLIDATED",
                        "pnl": {"lineItems": {"net_revenue": 1, "profit_before_tax": 0}},
                        "bs": {"liabilities": {}}
                    },
                    {
                        "nature": "STANDALONE",
                        "pnl": {"lineItems": {
                            "net_revenue": 40000000,
                            "profit_before_tax": 1000,
                            "depreciation": 0,
                            "interest": 1000
                        }},
                        "bs": {"liabilities": {"long_term_borrowings": 20000000}}
                    }
                ]
            }
        }"#;
        let report = evaluate_slice(json).unwrap();
        assert_eq!(report.flags.total_revenue_5cr, FlagColor::Red);
        assert_eq!(report.flags.borrowing_to_revenue, FlagColor::Amber);
        assert_eq!(report.flags.iscr, FlagColor::Red);
    }

    #[test]
    fn test_evaluate_slice_invalid_json() {
        assert!(matches!(evaluate_slice(b"{"), Err(RulesError::Json(_))));
    }
}
