//! Flag rules over the selected financial statement.

use serde::{Serialize, Serializer};

use crate::document::{CompanyData, Financial, PnlLineItems};
use crate::error::{Result, RulesError};

/// Revenue threshold for the 5 crore rule (5 crore = 50,000,000).
pub const REVENUE_5CR_THRESHOLD: f64 = 50_000_000.0;

/// Maximum borrowing to revenue ratio that still earns a green flag.
pub const BORROWING_TO_REVENUE_LIMIT: f64 = 0.25;

/// Minimum interest service coverage ratio that earns a green flag.
pub const ISCR_THRESHOLD: f64 = 2.0;

/// Flag colour assigned by a rule.
///
/// Serialized as its integer code, which is what the analysis endpoint
/// returns and what clients render verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagColor {
    /// Code 0.
    Red,
    /// Code 1.
    Green,
    /// Code 2.
    Amber,
    /// Code 3. Display only, never produced by a rule.
    MediumRisk,
    /// Code 4. Data for the field is missing.
    White,
}

impl FlagColor {
    /// Integer code of this colour.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Amber => 2,
            Self::MediumRisk => 3,
            Self::White => 4,
        }
    }

    /// Colour for an integer code, if it is one.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Red),
            1 => Some(Self::Green),
            2 => Some(Self::Amber),
            3 => Some(Self::MediumRisk),
            4 => Some(Self::White),
            _ => None,
        }
    }
}

impl std::fmt::Display for FlagColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
            Self::Amber => write!(f, "amber"),
            Self::MediumRisk => write!(f, "medium_risk"),
            Self::White => write!(f, "white"),
        }
    }
}

impl Serialize for FlagColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Index of the latest standalone statement, falling back to the first entry.
#[must_use]
pub fn latest_financial_index(data: &CompanyData) -> usize {
    data.financials
        .iter()
        .position(Financial::is_standalone)
        .unwrap_or(0)
}

fn line_items(financial: &Financial) -> Option<&PnlLineItems> {
    financial.pnl.as_ref()?.line_items.as_ref()
}

/// Net revenue of a statement, or 0 when it is not reported.
#[must_use]
pub fn total_revenue(financial: &Financial) -> f64 {
    if let Some(revenue) = line_items(financial).and_then(|items| items.net_revenue) {
        revenue
    } else {
        tracing::warn!("net_revenue key not found");
        0.0
    }
}

/// Sum of long and short term borrowings.
///
/// # Errors
///
/// Returns [`RulesError::MissingField`] if the statement has no liabilities block.
pub fn total_borrowing(financial: &Financial) -> Result<f64> {
    let liabilities = financial
        .bs
        .as_ref()
        .and_then(|bs| bs.liabilities.as_ref())
        .ok_or(RulesError::MissingField {
            field: "bs.liabilities",
        })?;

    Ok(liabilities.long_term_borrowings.unwrap_or(0.0)
        + liabilities.short_term_borrowings.unwrap_or(0.0))
}

/// Interest service coverage ratio.
///
/// `(profit_before_tax + depreciation + 1) / (interest + 1)`; the added ones
/// keep the ratio defined when interest is zero.
///
/// # Errors
///
/// Returns [`RulesError::MissingField`] if `profit_before_tax` is not reported.
pub fn iscr(financial: &Financial) -> Result<f64> {
    let items = line_items(financial).ok_or(RulesError::MissingField {
        field: "pnl.lineItems",
    })?;
    let profit_before_tax = items.profit_before_tax.ok_or(RulesError::MissingField {
        field: "pnl.lineItems.profit_before_tax",
    })?;
    let depreciation = items.depreciation.unwrap_or(0.0);
    let interest = items.interest.unwrap_or(0.0);

    Ok((profit_before_tax + depreciation + 1.0) / (interest + 1.0))
}

/// Green when revenue reaches 5 crore, red otherwise.
#[must_use]
pub fn total_revenue_5cr_flag(financial: &Financial) -> FlagColor {
    if total_revenue(financial) >= REVENUE_5CR_THRESHOLD {
        FlagColor::Green
    } else {
        FlagColor::Red
    }
}

/// Green when borrowings are at most a quarter of revenue, amber above that.
///
/// Zero revenue is red.
///
/// # Errors
///
/// Returns an error if borrowings cannot be computed.
#[allow(clippy::float_cmp)]
pub fn borrowing_to_revenue_flag(financial: &Financial) -> Result<FlagColor> {
    let borrowings = total_borrowing(financial)?;
    let revenue = total_revenue(financial);

    if revenue == 0.0 {
        tracing::warn!("total revenue is zero, cannot calculate borrowing to revenue ratio");
        return Ok(FlagColor::Red);
    }

    if borrowings / revenue <= BORROWING_TO_REVENUE_LIMIT {
        Ok(FlagColor::Green)
    } else {
        Ok(FlagColor::Amber)
    }
}

/// Green when ISCR is at least 2, red otherwise.
///
/// # Errors
///
/// Returns an error if ISCR cannot be computed.
pub fn iscr_flag(financial: &Financial) -> Result<FlagColor> {
    if iscr(financial)? >= ISCR_THRESHOLD {
        Ok(FlagColor::Green)
    } else {
        Ok(FlagColor::Red)
    }
}

/// The three flags in the wire shape of the analysis endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagSet {
    /// Rule 1: revenue above 5 crore.
    #[serde(rename = "TOTAL_REVENUE_5CR_FLAG")]
    pub total_revenue_5cr: FlagColor,
    /// Rule 2: total borrowing within a quarter of revenue.
    #[serde(rename = "BORROWING_TO_REVENUE_FLAG")]
    pub borrowing_to_revenue: FlagColor,
    /// Rule 3: interest service coverage ratio.
    #[serde(rename = "ISCR_FLAG")]
    pub iscr: FlagColor,
}

/// Evaluation report, serialized as `{ "flags": { ... } }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagReport {
    /// Flags of the evaluated statement.
    pub flags: FlagSet,
}

/// Evaluate all three rules against the latest standalone statement.
///
/// # Errors
///
/// Returns [`RulesError::NoFinancials`] for an empty statement list, or a
/// missing field error from the individual rules.
pub fn evaluate(data: &CompanyData) -> Result<FlagReport> {
    let index = latest_financial_index(data);
    let financial = data.financials.get(index).ok_or(RulesError::NoFinancials)?;
    tracing::debug!(index, nature = ?financial.nature, "evaluating financial entry");

    let flags = FlagSet {
        total_revenue_5cr: total_revenue_5cr_flag(financial),
        borrowing_to_revenue: borrowing_to_revenue_flag(financial)?,
        iscr: iscr_flag(financial)?,
    };
    Ok(FlagReport { flags })
}
