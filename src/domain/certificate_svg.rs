//! Certificate artifact rendering.
//!
//! [`render_certificate_svg`] is a pure function of its four inputs: the
//! same arguments always produce byte-identical SVG markup.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::GatewayError;

/// MIME type of the rendered artifact.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Formats a date in long form, e.g. `14 March 2025`.
#[must_use]
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Parses an issue date given either as an RFC 3339 timestamp or as a
/// plain `YYYY-MM-DD` date. Timestamps are reduced to their UTC date.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] if the string is neither form.
pub fn parse_issue_date(value: &str) -> Result<NaiveDate, GatewayError> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| GatewayError::Validation(format!("invalid issue date: {value}")))
}

/// Download filename for a certificate number.
#[must_use]
pub fn artifact_filename(certificate_number: &str) -> String {
    let safe: String = certificate_number
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}.svg")
}

/// Renders the fixed-layout certificate of attendance.
///
/// Contains a bordered frame, title, attendee name, event name, the long
/// form of `issued_on`, the certificate number and a signature line.
#[must_use]
pub fn render_certificate_svg(
    attendee_name: &str,
    event_name: &str,
    issued_on: NaiveDate,
    certificate_number: &str,
) -> String {
    let attendee_name = escape_xml(attendee_name);
    let event_name = escape_xml(event_name);
    let certificate_number = escape_xml(certificate_number);
    let issued_on = format_long_date(issued_on);

    let mut svg = String::with_capacity(2_400);
    svg.push_str(r#"<svg width="1200" height="800" xmlns="http://www.w3.org/2000/svg">"#);
    svg.push('\n');

    // frame
    push_line(
        &mut svg,
        r##"<rect width="1200" height="800" fill="white" stroke="#2d3748" stroke-width="3"/>"##,
    );
    push_line(
        &mut svg,
        r##"<rect x="20" y="20" width="1160" height="760" fill="none" stroke="#a78bfa" stroke-width="2"/>"##,
    );
    push_line(
        &mut svg,
        r##"<rect x="30" y="30" width="1140" height="740" fill="none" stroke="#a78bfa" stroke-width="1"/>"##,
    );

    push_line(
        &mut svg,
        r##"<text x="600" y="80" font-size="48" font-weight="bold" text-anchor="middle" fill="#2d3748">CERTIFICATE OF ATTENDANCE</text>"##,
    );
    push_line(
        &mut svg,
        r##"<circle cx="150" cy="120" r="40" fill="#6366f1" opacity="0.1"/>"##,
    );
    push_line(
        &mut svg,
        r##"<text x="150" y="130" font-size="20" font-weight="bold" text-anchor="middle" fill="#4f46e5">VPAA</text>"##,
    );
    push_line(
        &mut svg,
        r##"<text x="600" y="200" font-size="32" text-anchor="middle" fill="#2d3748">This certifies that</text>"##,
    );

    let _ = writeln!(
        svg,
        r##"  <text x="600" y="280" font-size="56" font-weight="bold" text-anchor="middle" fill="#2d3748">{attendee_name}</text>"##
    );
    push_line(
        &mut svg,
        r##"<line x1="300" y1="310" x2="900" y2="310" stroke="#2d3748" stroke-width="2"/>"##,
    );
    push_line(
        &mut svg,
        r##"<text x="600" y="380" font-size="24" text-anchor="middle" fill="#4b5563">has successfully participated in</text>"##,
    );
    let _ = writeln!(
        svg,
        r##"  <text x="600" y="450" font-size="32" font-weight="bold" text-anchor="middle" fill="#4f46e5">{event_name}</text>"##
    );
    let _ = writeln!(
        svg,
        r##"  <text x="600" y="530" font-size="18" text-anchor="middle" fill="#6b7280">Date of Issue: {issued_on}</text>"##
    );
    let _ = writeln!(
        svg,
        r##"  <text x="150" y="680" font-size="14" fill="#9ca3af">Certificate #: {certificate_number}</text>"##
    );

    // signature
    push_line(
        &mut svg,
        r##"<line x1="800" y1="720" x2="1050" y2="720" stroke="#2d3748" stroke-width="2"/>"##,
    );
    push_line(
        &mut svg,
        r##"<text x="925" y="750" font-size="14" text-anchor="middle" fill="#2d3748">Authorized Signature</text>"##,
    );
    push_line(
        &mut svg,
        r##"<text x="600" y="780" font-size="12" text-anchor="middle" fill="#9ca3af">This certificate is awarded in recognition of participation and engagement</text>"##,
    );

    svg.push_str("</svg>\n");
    svg
}

fn push_line(svg: &mut String, element: &str) {
    svg.push_str("  ");
    svg.push_str(element);
    svg.push('\n');
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
