//! CSV and HTML report generation over persisted proposals.
//!
//! Reports cover only proposals the customer has actually received: status
//! `sent` or `accepted`. Amounts are rounded half-up to two decimal places
//! at this boundary; the stored values stay exact.

use std::io::Write;

use bidlock_core::Proposal;
use bidlock_core::pricing::{self, round_half_up};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The filtered selection was empty; there is nothing to report on.
    #[error("no sent or accepted proposals to export")]
    NoProposals,

    #[error("CSV write error: {0}")]
    CsvWrite(String),
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::CsvWrite(err.to_string())
    }
}

/// A single row of the proposals report.
///
/// `services` is the line-item count, not the item names; tax is
/// recomputed from the stored subtotal and rate so the column stays
/// consistent with the other two amounts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Services")]
    pub services: usize,
    #[serde(rename = "Subtotal")]
    pub subtotal: String,
    #[serde(rename = "Tax")]
    pub tax: String,
    #[serde(rename = "Total")]
    pub total: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl ReportRow {
    pub fn from_proposal(proposal: &Proposal) -> Self {
        Self {
            date: proposal.created_at.format("%Y-%m-%d").to_string(),
            customer: proposal.customer_name.clone(),
            address: proposal.customer_address.clone().unwrap_or_default(),
            phone: proposal.customer_phone.clone().unwrap_or_default(),
            email: proposal.customer_email.clone().unwrap_or_default(),
            services: proposal.services.len(),
            subtotal: format_amount(proposal.subtotal),
            tax: format_amount(pricing::tax(proposal.subtotal, proposal.tax_rate)),
            total: format_amount(proposal.total),
            status: proposal.status.as_str().to_string(),
        }
    }
}

/// Currency formatting for report cells: rounded half-up, always two
/// decimal places.
fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

/// Filters a proposal list down to the records reports cover.
pub fn exportable(proposals: &[Proposal]) -> Vec<&Proposal> {
    proposals.iter().filter(|p| p.status.is_exportable()).collect()
}

/// Writes the CSV report, returning the number of data rows written.
///
/// # Errors
///
/// [`ReportError::NoProposals`] if no proposal in the input is sent or
/// accepted; nothing is written in that case.
pub fn write_csv<W: Write>(writer: W, proposals: &[Proposal]) -> Result<usize, ReportError> {
    let selected = exportable(proposals);
    if selected.is_empty() {
        return Err(ReportError::NoProposals);
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    for proposal in &selected {
        csv_writer.serialize(ReportRow::from_proposal(proposal))?;
    }
    csv_writer
        .flush()
        .map_err(|e| ReportError::CsvWrite(e.to_string()))?;

    Ok(selected.len())
}

/// Renders the printable HTML summary: a header with the proposal count
/// and combined value, one table row per proposal, and a total row.
pub fn render_html(proposals: &[Proposal]) -> Result<String, ReportError> {
    let selected = exportable(proposals);
    if selected.is_empty() {
        return Err(ReportError::NoProposals);
    }

    let total_value: Decimal = selected.iter().map(|p| p.total).sum();

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Proposals Report</title>\n");
    html.push_str(
        "<style>\nbody { font-family: Arial, sans-serif; color: #333; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }\n\
         th { background-color: #f3f4f6; }\n</style>\n",
    );
    html.push_str("</head>\n<body>\n<h1>Proposals Report</h1>\n");
    html.push_str(&format!(
        "<p><strong>Total Proposals:</strong> {}</p>\n\
         <p><strong>Total Value:</strong> ${}</p>\n",
        selected.len(),
        format_amount(total_value)
    ));

    html.push_str(
        "<table>\n<tr><th>Date</th><th>Customer</th><th>Services</th>\
         <th>Subtotal</th><th>Tax</th><th>Total</th><th>Status</th></tr>\n",
    );
    for proposal in &selected {
        let row = ReportRow::from_proposal(proposal);
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>${}</td><td>${}</td>\
             <td>${}</td><td>{}</td></tr>\n",
            row.date,
            escape_html(&row.customer),
            row.services,
            row.subtotal,
            row.tax,
            row.total,
            row.status,
        ));
    }
    html.push_str(&format!(
        "<tr><td colspan=\"5\"><strong>Total</strong></td>\
         <td><strong>${}</strong></td><td></td></tr>\n",
        format_amount(total_value)
    ));
    html.push_str("</table>\n</body>\n</html>\n");

    Ok(html)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
