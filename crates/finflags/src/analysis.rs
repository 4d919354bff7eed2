//! The analysis result returned by the upload endpoint.
//!
//! The endpoint answers with `{ "flags": { ... } }`. Three flag names are
//! recognised; their values are opaque scalars rendered verbatim. Unknown
//! keys are ignored and missing keys stay empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire name of the revenue above 5 crore flag.
pub const TOTAL_REVENUE_5CR_FLAG: &str = "TOTAL_REVENUE_5CR_FLAG";

/// Wire name of the borrowing to revenue flag.
pub const BORROWING_TO_REVENUE_FLAG: &str = "BORROWING_TO_REVENUE_FLAG";

/// Wire name of the interest service coverage ratio flag.
pub const ISCR_FLAG: &str = "ISCR_FLAG";

/// A flag value as sent by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A boolean flag.
    Bool(bool),
    /// A numeric flag, e.g. a colour code.
    Number(serde_json::Number),
    /// A textual flag, e.g. `"Y"`.
    Text(String),
    /// Any other JSON shape, kept as-is.
    Other(Value),
}

impl std::fmt::Display for FlagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

/// The three recognised flags. `None` means the key was absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    /// Rule 1: revenue of at least 5 crore.
    #[serde(rename = "TOTAL_REVENUE_5CR_FLAG", default)]
    pub total_revenue_5cr: Option<FlagValue>,
    /// Rule 2: borrowings relative to revenue.
    #[serde(rename = "BORROWING_TO_REVENUE_FLAG", default)]
    pub borrowing_to_revenue: Option<FlagValue>,
    /// Rule 3: interest service coverage ratio.
    #[serde(rename = "ISCR_FLAG", default)]
    pub iscr: Option<FlagValue>,
}

impl Flags {
    /// Extract the flags from the `flags` member of a response body.
    ///
    /// A missing or non-object `flags` member yields empty flags.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let Some(flags) = body.get("flags").and_then(Value::as_object) else {
            return Self::default();
        };
        let pick = |name: &str| -> Option<FlagValue> {
            flags
                .get(name)
                .filter(|v| !v.is_null())
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok())
        };

        Self {
            total_revenue_5cr: pick(TOTAL_REVENUE_5CR_FLAG),
            borrowing_to_revenue: pick(BORROWING_TO_REVENUE_FLAG),
            iscr: pick(ISCR_FLAG),
        }
    }

    /// Look a flag up by its wire name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        match name {
            TOTAL_REVENUE_5CR_FLAG => self.total_revenue_5cr.as_ref(),
            BORROWING_TO_REVENUE_FLAG => self.borrowing_to_revenue.as_ref(),
            ISCR_FLAG => self.iscr.as_ref(),
            _ => None,
        }
    }
}

/// A parsed response from the analysis endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    raw: Value,
    flags: Flags,
}

impl AnalysisResult {
    /// Build a result from any parsed response body.
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        let flags = Flags::from_body(&raw);
        Self { raw, flags }
    }

    /// The response body exactly as parsed.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The recognised flags.
    #[must_use]
    pub fn flags(&self) -> &Flags {
        &self.flags
    }
}

impl From<Value> for AnalysisResult {
    fn from(raw: Value) -> Self {
        Self::from_value(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_extracts_flags() {
        let result = AnalysisResult::from_value(json!({
            "flags": {
                "TOTAL_REVENUE_5CR_FLAG": "Y",
                "BORROWING_TO_REVENUE_FLAG": 2,
                "ISCR_FLAG": true
            }
        }));

        let flags = result.flags();
        assert_eq!(flags.total_revenue_5cr, Some(FlagValue::Text("Y".into())));
        assert_eq!(
            flags.borrowing_to_revenue,
            Some(FlagValue::Number(2.into()))
        );
        assert_eq!(flags.iscr, Some(FlagValue::Bool(true)));
    }

    #[test]
    fn test_raw_is_preserved() {
        let body = json!({"flags": {"ISCR_FLAG": 1}, "company": "Acme"});
        let result = AnalysisResult::from_value(body.clone());
        assert_eq!(result.raw(), &body);
    }

    #[test]
    fn test_missing_key_is_none() {
        let result = AnalysisResult::from_value(json!({
            "flags": {"TOTAL_REVENUE_5CR_FLAG": "Y", "BORROWING_TO_REVENUE_FLAG": "N"}
        }));
        assert!(result.flags().iscr.is_none());
        assert!(result.flags().total_revenue_5cr.is_some());
    }

    #[test]
    fn test_null_value_is_none() {
        let result = AnalysisResult::from_value(json!({"flags": {"ISCR_FLAG": null}}));
        assert!(result.flags().iscr.is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let result = AnalysisResult::from_value(json!({
            "flags": {"ISCR_FLAG": 0, "DEBT_FLAG": 1}
        }));
        assert_eq!(result.flags().get(ISCR_FLAG), Some(&FlagValue::Number(0.into())));
        assert!(result.flags().get("DEBT_FLAG").is_none());
    }

    #[test]
    fn test_missing_flags_member_is_empty() {
        let result = AnalysisResult::from_value(json!({"error": "No file part"}));
        assert_eq!(result.flags(), &Flags::default());
    }

    #[test]
    fn test_non_object_body_is_empty() {
        let result = AnalysisResult::from_value(json!([1, 2, 3]));
        assert_eq!(result.flags(), &Flags::default());
        let result = AnalysisResult::from_value(json!({"flags": "none"}));
        assert_eq!(result.flags(), &Flags::default());
    }

    #[test]
    fn test_flag_value_display_is_verbatim() {
        assert_eq!(FlagValue::Text("Y".into()).to_string(), "Y");
        assert_eq!(FlagValue::Number(1.into()).to_string(), "1");
        assert_eq!(
            FlagValue::Number(serde_json::Number::from_f64(0.5).unwrap()).to_string(),
            "0.5"
        );
        assert_eq!(FlagValue::Bool(false).to_string(), "false");
        assert_eq!(FlagValue::Other(json!([1, 2])).to_string(), "[1,2]");
    }

    #[test]
    fn test_flags_deserialize_directly() {
        let flags: Flags = serde_json::from_value(json!({"ISCR_FLAG": "Y"})).unwrap();
        assert_eq!(flags.iscr, Some(FlagValue::Text("Y".into())));
        assert!(flags.total_revenue_5cr.is_none());
    }
}
