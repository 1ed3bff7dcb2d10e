//! Text report rendering
//!
//! Pure string templating over a built `ValidationReport`, producing the
//! operator-facing summary file. Only file I/O can fail; rendering cannot.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use crate::model::{PriceRecord, ValidationReport, Violation};

fn blank_or(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "",
    }
}

/// Price cell text: parsed prices as `%.2f`, unparseable tokens verbatim,
/// blank when the column was empty.
fn price_cell(record: &PriceRecord) -> String {
    match record.price {
        Some(price) => format!("{:.2}", price),
        None => record
            .original_price_token
            .clone()
            .unwrap_or_default(),
    }
}

fn date_cell(record: &PriceRecord) -> String {
    record
        .trade_date
        .map(|d| d.to_string())
        .unwrap_or_default()
}

fn push_record_details(out: &mut String, record: &PriceRecord) {
    let _ = writeln!(out, "Instrument GUID: {}", record.guid().unwrap_or(""));
    let _ = writeln!(out, "  Trade Date:    {}", date_cell(record));
    let _ = writeln!(out, "  Price:         {}", price_cell(record));
    let _ = writeln!(out, "  Exchange:      {}", blank_or(record.exchange.as_deref()));
    let _ = writeln!(out, "  Product Type:  {}", blank_or(record.product_type.as_deref()));
    let _ = writeln!(
        out,
        "  Error:         {}",
        record.validation_error().unwrap_or_default()
    );
    out.push('\n');
}

/// Renders the full text report.
pub fn render_text_report(report: &ValidationReport) -> String {
    let mut out = String::new();

    // Header
    let _ = writeln!(out, "{}", "=".repeat(43));
    out.push('\n');
    let _ = writeln!(out, "Pricing Data Validation Report");
    out.push('\n');
    let _ = writeln!(out, "{}", "=".repeat(43));
    out.push('\n');

    // Summary
    let _ = writeln!(out, "Total Records: {}", report.total_records);
    out.push('\n');
    let _ = writeln!(out, "Valid Records: {}", report.valid_records);
    out.push('\n');
    let _ = writeln!(out, "Invalid Records: {}", report.invalid_records);
    out.push('\n');
    let _ = writeln!(out, "Duplicate Records: {}", report.duplicate_records);
    out.push('\n');
    let _ = writeln!(out, "Missing Values: {}", report.missing_total());
    out.push('\n');

    // Error breakdown, non-zero lines only
    let _ = writeln!(out, "Error Breakdown:");
    out.push('\n');
    let _ = writeln!(out, "{}", "-".repeat(27));
    out.push('\n');

    let breakdown: [(&str, usize); 9] = [
        ("Missing Price", report.missing_price),
        ("Invalid Price Format", report.invalid_price_format),
        ("Missing instrument_guid", report.missing_instrument_guid),
        ("Missing trade_date", report.missing_trade_date),
        ("Missing exchange", report.missing_exchange),
        ("Missing product_type", report.missing_product_type),
        ("Invalid exchange", report.invalid_exchange),
        ("Invalid product_type", report.invalid_product_type),
        ("Duplicate Records", report.duplicate_records),
    ];
    for (label, count) in breakdown {
        if count > 0 {
            let _ = writeln!(out, "{}: {}", label, count);
        }
    }
    out.push('\n');
    let _ = writeln!(out, "{}", "-".repeat(27));

    // Invalid record details
    if !report.invalid_records_list.is_empty() {
        let _ = writeln!(out, "INVALID RECORDS DETAILS");
        let _ = writeln!(out, "{}", "-".repeat(80));
        for record in &report.invalid_records_list {
            push_record_details(&mut out, record);
        }
    }

    // Duplicate record details
    let duplicates: Vec<&PriceRecord> = report
        .invalid_records_list
        .iter()
        .filter(|r| r.has_violation(&Violation::DuplicateGuid))
        .collect();
    if !duplicates.is_empty() {
        let _ = writeln!(out, "DUPLICATE RECORDS DETAILS");
        let _ = writeln!(out, "{}", "-".repeat(80));
        for record in duplicates {
            push_record_details(&mut out, record);
        }
    }

    // Missing value details, one block per category
    if report.missing_total() > 0 {
        let _ = writeln!(out, "MISSING VALUES DETAILS");
        let _ = writeln!(out, "{}", "-".repeat(80));

        push_missing_block(
            &mut out,
            report,
            "Missing Price Records:",
            &Violation::MissingPrice,
            |r| {
                format!(
                    "  - GUID: {}, Trade Date: {}, Exchange: {}, Product Type: {}",
                    r.guid().unwrap_or(""),
                    date_cell(r),
                    blank_or(r.exchange.as_deref()),
                    blank_or(r.product_type.as_deref()),
                )
            },
        );
        push_missing_block(
            &mut out,
            report,
            "Missing Instrument GUID Records:",
            &Violation::MissingGuid,
            |r| {
                format!(
                    "  - Trade Date: {}, Price: {}, Exchange: {}, Product Type: {}",
                    date_cell(r),
                    price_cell(r),
                    blank_or(r.exchange.as_deref()),
                    blank_or(r.product_type.as_deref()),
                )
            },
        );
        push_missing_block(
            &mut out,
            report,
            "Missing Trade Date Records:",
            &Violation::MissingTradeDate,
            |r| {
                format!(
                    "  - GUID: {}, Price: {}, Exchange: {}, Product Type: {}",
                    r.guid().unwrap_or(""),
                    price_cell(r),
                    blank_or(r.exchange.as_deref()),
                    blank_or(r.product_type.as_deref()),
                )
            },
        );
        push_missing_block(
            &mut out,
            report,
            "Missing Exchange Records:",
            &Violation::MissingExchange,
            |r| {
                format!(
                    "  - GUID: {}, Trade Date: {}, Price: {}, Product Type: {}",
                    r.guid().unwrap_or(""),
                    date_cell(r),
                    price_cell(r),
                    blank_or(r.product_type.as_deref()),
                )
            },
        );
        push_missing_block(
            &mut out,
            report,
            "Missing Product Type Records:",
            &Violation::MissingProductType,
            |r| {
                format!(
                    "  - GUID: {}, Trade Date: {}, Price: {}, Exchange: {}",
                    r.guid().unwrap_or(""),
                    date_cell(r),
                    price_cell(r),
                    blank_or(r.exchange.as_deref()),
                )
            },
        );
    }

    // Full listing, presentation order
    let _ = writeln!(out, "ALL RECORDS");
    let _ = writeln!(out, "{}", "-".repeat(80));
    let _ = writeln!(
        out,
        "{:<15} {:<12} {:<10} {:<8} {:<12} {:<8}",
        "Instrument GUID", "Trade Date", "Price", "Exchange", "Product Type", "Status"
    );
    let _ = writeln!(out, "{}", "-".repeat(80));
    for record in &report.all_records {
        let _ = writeln!(
            out,
            "{:<15} {:<12} {:<10} {:<8} {:<12} {:<8}",
            record.guid().unwrap_or(""),
            date_cell(record),
            price_cell(record),
            blank_or(record.exchange.as_deref()),
            blank_or(record.product_type.as_deref()),
            if record.is_valid() { "VALID" } else { "INVALID" }
        );
    }

    out.push('\n');
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "End of Report");
    let _ = writeln!(out, "{}", "=".repeat(80));

    out
}

fn push_missing_block(
    out: &mut String,
    report: &ValidationReport,
    heading: &str,
    violation: &Violation,
    line: impl Fn(&PriceRecord) -> String,
) {
    let matches: Vec<&PriceRecord> = report
        .invalid_records_list
        .iter()
        .filter(|r| r.has_violation(violation))
        .collect();
    if matches.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}", heading);
    for record in matches {
        let _ = writeln!(out, "{}", line(record));
    }
    out.push('\n');
}

/// Renders the report and writes it to `path`.
pub fn write_text_report(report: &ValidationReport, path: &Path) -> io::Result<String> {
    let content = render_text_report(report);
    fs::write(path, &content)?;
    Ok(content)
}
