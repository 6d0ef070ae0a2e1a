//! Deterministic PDF rendering of salary slips.
//!
//! The slip is a single A4 page with three fixed sections: an identity
//! header, an earnings/deductions comparison table, and formatted currency
//! throughout. The output is byte-for-byte reproducible for identical inputs:
//! no timestamps, no random object IDs. Rendering writes to an in-memory
//! buffer only; delivery is the caller's concern.

// PDF coordinates are points expressed as f32; layout arithmetic is
// inherently floating point.
#![allow(clippy::float_arithmetic)]

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use rust_decimal::Decimal;

use crate::payroll::{format_currency, SalaryBreakup};

/// A4 page size in points.
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;

const MARGIN: f32 = 56.0;
const LINE_HEIGHT: f32 = 20.0;

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");

/// Identity fields shown in the slip header.
#[derive(Debug, Clone, Copy)]
pub struct SlipData<'a> {
    /// Employee full name (from the linked user).
    pub full_name: &'a str,
    /// Department label.
    pub department: &'a str,
    /// Designation label.
    pub designation: &'a str,
    /// Gross monthly salary.
    pub gross: Decimal,
}

/// Renders a salary slip to PDF bytes.
#[must_use]
pub fn render_salary_slip(data: &SlipData<'_>, breakup: &SalaryBreakup) -> Vec<u8> {
    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let regular_id = Ref::new(4);
    let bold_id = Ref::new(5);
    let content_id = Ref::new(6);

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources()
            .fonts()
            .pair(FONT_REGULAR, regular_id)
            .pair(FONT_BOLD, bold_id);
    }

    pdf.type1_font(regular_id).base_font(Name(b"Helvetica"));
    pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));

    let mut content = Content::new();
    draw_title(&mut content);
    let table_top = draw_header(&mut content, data);
    draw_table(&mut content, breakup, table_top);
    pdf.stream(content_id, &content.finish());

    pdf.finish()
}

fn text(content: &mut Content, font: Name<'_>, size: f32, x: f32, y: f32, s: &str) {
    content.begin_text();
    content.set_font(font, size);
    content.next_line(x, y);
    content.show(Str(s.as_bytes()));
    content.end_text();
}

fn rule(content: &mut Content, x1: f32, y1: f32, x2: f32, y2: f32) {
    content.set_line_width(0.8);
    content.move_to(x1, y1);
    content.line_to(x2, y2);
    content.stroke();
}

fn draw_title(content: &mut Content) {
    text(content, FONT_BOLD, 18.0, MARGIN, PAGE_HEIGHT - 72.0, "SALARY SLIP");
    rule(
        content,
        MARGIN,
        PAGE_HEIGHT - 80.0,
        PAGE_WIDTH - MARGIN,
        PAGE_HEIGHT - 80.0,
    );
}

/// Draws the identity header; returns the y coordinate below it.
fn draw_header(content: &mut Content, data: &SlipData<'_>) -> f32 {
    let label_x = MARGIN;
    let value_x = MARGIN + 120.0;
    let mut y = PAGE_HEIGHT - 110.0;

    let rows = [
        ("Employee", data.full_name.to_string()),
        ("Department", data.department.to_string()),
        ("Designation", data.designation.to_string()),
        ("Gross Salary", format_currency(data.gross)),
    ];

    for (label, value) in rows {
        text(content, FONT_BOLD, 11.0, label_x, y, label);
        text(content, FONT_REGULAR, 11.0, value_x, y, &value);
        y -= LINE_HEIGHT;
    }

    y - 10.0
}

/// Draws the earnings/deductions comparison table below `top`.
fn draw_table(content: &mut Content, breakup: &SalaryBreakup, top: f32) {
    let mid = PAGE_WIDTH / 2.0;
    let left_label = MARGIN;
    let left_value = mid - 110.0;
    let right_label = mid + 16.0;
    let right_value = PAGE_WIDTH - MARGIN - 94.0;

    // Column headers.
    let mut y = top;
    rule(content, MARGIN, y + 14.0, PAGE_WIDTH - MARGIN, y + 14.0);
    text(content, FONT_BOLD, 12.0, left_label, y, "Earnings");
    text(content, FONT_BOLD, 12.0, right_label, y, "Deductions");
    y -= 8.0;
    rule(content, MARGIN, y, PAGE_WIDTH - MARGIN, y);

    let earnings = [
        ("Basic", breakup.basic),
        ("HRA", breakup.hra),
        ("Special Allowance", breakup.special),
    ];
    let deductions = [
        ("Provident Fund", breakup.pf),
        ("Professional Tax", breakup.professional_tax),
    ];

    let body_top = y;
    y -= LINE_HEIGHT;
    for (label, amount) in earnings {
        text(content, FONT_REGULAR, 11.0, left_label, y, label);
        text(
            content,
            FONT_REGULAR,
            11.0,
            left_value,
            y,
            &format_currency(amount),
        );
        y -= LINE_HEIGHT;
    }

    let mut right_y = body_top - LINE_HEIGHT;
    for (label, amount) in deductions {
        text(content, FONT_REGULAR, 11.0, right_label, right_y, label);
        text(
            content,
            FONT_REGULAR,
            11.0,
            right_value,
            right_y,
            &format_currency(amount),
        );
        right_y -= LINE_HEIGHT;
    }

    // Totals row.
    y -= 4.0;
    rule(content, MARGIN, y + 14.0, PAGE_WIDTH - MARGIN, y + 14.0);
    text(content, FONT_BOLD, 11.0, left_label, y, "Total Earnings");
    text(
        content,
        FONT_BOLD,
        11.0,
        left_value,
        y,
        &format_currency(breakup.total_earnings),
    );
    text(content, FONT_BOLD, 11.0, right_label, y, "Total Deductions");
    text(
        content,
        FONT_BOLD,
        11.0,
        right_value,
        y,
        &format_currency(breakup.total_deductions),
    );

    // Vertical divider across the table body.
    rule(content, mid, body_top, mid, y - 6.0);

    // Net salary.
    y -= LINE_HEIGHT + 8.0;
    rule(content, MARGIN, y + 14.0, PAGE_WIDTH - MARGIN, y + 14.0);
    text(content, FONT_BOLD, 12.0, left_label, y, "Net Salary");
    text(
        content,
        FONT_BOLD,
        12.0,
        left_value,
        y,
        &format_currency(breakup.net_salary),
    );
    rule(content, MARGIN, y - 8.0, PAGE_WIDTH - MARGIN, y - 8.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll::breakup_salary;
    use rust_decimal_macros::dec;

    fn sample() -> (SlipData<'static>, SalaryBreakup) {
        let data = SlipData {
            full_name: "Asha Verma",
            department: "Engineering",
            designation: "Senior Developer",
            gross: dec!(50000),
        };
        (data, breakup_salary(dec!(50000)))
    }

    #[test]
    fn test_output_is_a_pdf() {
        let (data, breakup) = sample();
        let bytes = render_salary_slip(&data, &breakup);
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_output_is_deterministic() {
        let (data, breakup) = sample();
        let first = render_salary_slip(&data, &breakup);
        let second = render_salary_slip(&data, &breakup);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_inputs_differ() {
        let (data, breakup) = sample();
        let other_data = SlipData {
            full_name: "Ravi Kumar",
            ..data
        };
        assert_ne!(
            render_salary_slip(&data, &breakup),
            render_salary_slip(&other_data, &breakup)
        );
    }

    #[test]
    fn test_contains_formatted_amounts() {
        let (data, breakup) = sample();
        let bytes = render_salary_slip(&data, &breakup);
        let haystack = String::from_utf8_lossy(&bytes);
        // Content streams are uncompressed, so the literal text is visible.
        assert!(haystack.contains("Rs. 45,000.00"));
        assert!(haystack.contains("Rs. 41,800.00"));
        assert!(haystack.contains("Asha Verma"));
    }
}
