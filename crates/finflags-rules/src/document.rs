//! Shape of an uploaded company document.
//!
//! Only the fields the rules read are modelled. Everything else in the
//! document is ignored, and absent or `null` values deserialize to `None`.

use serde::Deserialize;

use crate::error::Result;

/// Statement nature marking a standalone (non-consolidated) filing.
pub const STANDALONE: &str = "STANDALONE";

/// Top-level uploaded document: `{ "data": { ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Document {
    /// Company data block.
    #[serde(default)]
    pub data: CompanyData,
}

impl Document {
    /// Parse a document from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a JSON document of the expected shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Company data holding the list of financial statements.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompanyData {
    /// Financial statements, most recent first.
    #[serde(default)]
    pub financials: Vec<Financial>,
}

/// One financial statement.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Financial {
    /// Statement nature, e.g. `STANDALONE` or `CONSOLIDATED`.
    pub nature: Option<String>,
    /// Profit and loss section.
    pub pnl: Option<ProfitAndLoss>,
    /// Balance sheet section.
    pub bs: Option<BalanceSheet>,
}

impl Financial {
    /// Whether this statement is a standalone filing.
    #[must_use]
    pub fn is_standalone(&self) -> bool {
        self.nature.as_deref() == Some(STANDALONE)
    }
}

/// Profit and loss section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfitAndLoss {
    /// Line items of the statement.
    #[serde(rename = "lineItems")]
    pub line_items: Option<PnlLineItems>,
}

/// Profit and loss line items.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PnlLineItems {
    /// Revenue from operations, net of duties.
    pub net_revenue: Option<f64>,
    /// Profit before tax.
    pub profit_before_tax: Option<f64>,
    /// Depreciation and amortisation.
    pub depreciation: Option<f64>,
    /// Finance costs.
    pub interest: Option<f64>,
}

/// Balance sheet section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BalanceSheet {
    /// Liabilities side of the sheet.
    pub liabilities: Option<Liabilities>,
}

/// Balance sheet liabilities.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Liabilities {
    /// Non-current borrowings.
    pub long_term_borrowings: Option<f64>,
    /// Current borrowings.
    pub short_term_borrowings: Option<f64>,
}
