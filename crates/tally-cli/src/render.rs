//! HTML overview rendering.
//!
//! The template is compiled into the binary. Its name ends in `.html`, so
//! minijinja escapes every interpolated value.

use crate::error::Result;
use minijinja::{context, Environment};
use tally_domain::ExtractedRecord;

const OVERVIEW_TEMPLATE_NAME: &str = "overview.html";
const OVERVIEW_TEMPLATE: &str = include_str!("../templates/overview.html");

/// Timestamp format shown in the overview footer.
pub const PROCESSED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the overview page for `record`.
///
/// `processed_at` is shown verbatim; callers format it with
/// [`PROCESSED_AT_FORMAT`].
pub fn render_overview(record: &ExtractedRecord, processed_at: &str) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(OVERVIEW_TEMPLATE_NAME, OVERVIEW_TEMPLATE)?;
    let template = env.get_template(OVERVIEW_TEMPLATE_NAME)?;

    let html = template.render(context! {
        record => record,
        processed_at => processed_at,
        amount_sek => record.amount_major_units().map(|amount| format!("{:.2}", amount)),
        original_amount => format_with_currency(record.original_amount, record.original_currency.as_deref()),
        vat_amount => format_with_currency(record.original_vat_amount, record.original_currency.as_deref()),
    })?;

    Ok(html)
}

/// `12.50 EUR`, or just `12.50` when the currency is unknown.
fn format_with_currency(amount: Option<f64>, currency: Option<&str>) -> Option<String> {
    let amount = amount?;
    Some(match currency.map(str::trim).filter(|c| !c.is_empty()) {
        Some(currency) => format!("{:.2} {}", amount, currency),
        None => format!("{:.2}", amount),
    })
}
