use crate::query::MonthlySummary;
use crate::Expense;
use rust_decimal::prelude::*;
use std::io;

const BAR_WIDTH: usize = 40;

/// Fixed two decimal places, so 0 renders as "0.00" and 12.5 as "12.50".
pub fn money(amount: Decimal) -> String {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    amount.to_string()
}

/// Renders a summary as a horizontal bar chart, one line per category in
/// fixed order. Bars are scaled against the largest total; an all-zero
/// summary gets empty bars.
pub fn render_chart<T: io::Write>(
    summary: &MonthlySummary,
    year: i32,
    month: u32,
    mut target: T,
) -> io::Result<()> {
    writeln!(target, "Expense summary for {}-{:02}", year, month)?;
    let max = summary
        .iter()
        .map(|(_, amount)| amount)
        .max()
        .unwrap_or(Decimal::ZERO);
    for (category, amount) in summary.iter() {
        let bar_len = if max.is_zero() {
            0
        } else {
            (amount / max * Decimal::from(BAR_WIDTH))
                .to_usize()
                .unwrap_or(0)
        };
        writeln!(
            target,
            "{:<13} {:>10} | {}",
            category,
            money(amount),
            "#".repeat(bar_len)
        )?;
    }
    Ok(())
}

/// Renders records as an aligned table: date, amount, category, description.
pub fn render_table<T: io::Write>(expenses: &[Expense], mut target: T) -> io::Result<()> {
    writeln!(
        target,
        "{:<10} | {:>10} | {:<13} | {}",
        "Date", "Amount", "Category", "Description"
    )?;
    writeln!(target, "{}", "-".repeat(55))?;
    for expense in expenses {
        writeln!(
            target,
            "{:<10} | {:>10} | {:<13} | {}",
            expense.date.to_string(),
            money(expense.amount),
            expense.category,
            expense.description
        )?;
    }
    Ok(())
}

#[cfg(test)]
use crate::{query::monthly_summary, Category};
#[cfg(test)]
use chrono::NaiveDate;
#[cfg(test)]
use rust_decimal_macros::dec;

#[test]
fn chart_scales_bars_against_the_largest_total() {
    let expenses = vec![
        Expense::new(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            dec!(40.00),
            Category::Bills,
            "electric",
        )
        .unwrap(),
        Expense::new(
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            dec!(20.00),
            Category::Food,
            "groceries",
        )
        .unwrap(),
    ];
    let summary = monthly_summary(&expenses, 2025, 3);

    let mut output = Vec::new();
    render_chart(&summary, 2025, 3, &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("Expense summary for 2025-03"));
    assert_eq!(
        lines.next(),
        Some(&format!("Food               20.00 | {}", "#".repeat(20))[..])
    );
    assert_eq!(lines.next(), Some("Transport           0.00 | "));
    assert_eq!(lines.next(), Some("Entertainment       0.00 | "));
    assert_eq!(
        lines.next(),
        Some(&format!("Bills              40.00 | {}", "#".repeat(40))[..])
    );
    assert_eq!(lines.next(), Some("Other               0.00 | "));
    assert_eq!(lines.next(), None);
}

#[test]
fn empty_summary_renders_without_bars() {
    let summary = monthly_summary(&[], 2025, 1);
    let mut output = Vec::new();
    render_chart(&summary, 2025, 1, &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(!output.contains('#'));
}

#[test]
fn table_lists_one_row_per_expense() {
    let expenses = vec![Expense::new(
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        dec!(12.50),
        Category::Food,
        "lunch",
    )
    .unwrap()];

    let mut output = Vec::new();
    render_table(&expenses, &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    let mut lines = output.lines();
    assert_eq!(
        lines.next(),
        Some("Date       |     Amount | Category      | Description")
    );
    assert_eq!(lines.next(), Some("-".repeat(55).as_str()));
    assert_eq!(
        lines.next(),
        Some("2025-03-01 |      12.50 | Food          | lunch")
    );
    assert_eq!(lines.next(), None);
}
