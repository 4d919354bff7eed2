//! Text rendering of the page.
//!
//! Every renderer is a pure function of its input.

use crate::analysis::{AnalysisResult, FlagValue};
use crate::route::Route;

/// Title shown at the top of every page.
pub const TITLE: &str = "Financial Analysis Model";

/// Heading of the upload view.
pub const UPLOAD_HEADING: &str = "Model";

/// Heading of the result view.
pub const RESULT_HEADING: &str = "Results";

/// Label of the first flag line.
pub const REVENUE_LABEL: &str = "TOTAL REVENUE 5CR FLAG Rule 1";

/// Label of the second flag line.
pub const BORROWING_LABEL: &str = "BORROWING TO REVENUE FLAG-Rule 2";

/// Label of the third flag line.
pub const ISCR_LABEL: &str = "ISCR FLAG Rule 3";

/// The title banner.
#[must_use]
pub fn render_header() -> String {
    let rule = "=".repeat(TITLE.len());
    format!("{TITLE}\n{rule}\n")
}

/// The file picker and submit control.
#[must_use]
pub fn render_upload(selected: Option<&str>) -> String {
    let file = selected.unwrap_or("No file chosen");
    format!("{UPLOAD_HEADING}\n  File: {file}\n  [ Submit ]\n")
}

fn flag_line(out: &mut String, label: &str, value: Option<&FlagValue>) {
    out.push_str(label);
    out.push_str(": ");
    if let Some(value) = value {
        out.push_str(&value.to_string());
    }
    out.push('\n');
}

/// The three flag lines of a result.
#[must_use]
pub fn render_result(result: &AnalysisResult) -> String {
    let flags = result.flags();
    let mut out = format!("{RESULT_HEADING}\n");
    flag_line(&mut out, REVENUE_LABEL, flags.total_revenue_5cr.as_ref());
    flag_line(&mut out, BORROWING_LABEL, flags.borrowing_to_revenue.as_ref());
    flag_line(&mut out, ISCR_LABEL, flags.iscr.as_ref());
    out
}

/// The whole page: banner plus the view for `route`.
///
/// The result route with no result renders the banner only.
#[must_use]
pub fn render_page(route: Route, result: Option<&AnalysisResult>, selected: Option<&str>) -> String {
    let mut page = render_header();
    page.push('\n');
    match (route, result) {
        (Route::Upload, _) => page.push_str(&render_upload(selected)),
        (Route::Result, Some(result)) => page.push_str(&render_result(result)),
        (Route::Result, None) => {}
    }
    page
}
