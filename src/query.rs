use crate::{Category, Expense};
use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Per-category totals for one month. Every one of the fixed categories is
/// present, zero-initialized, whether or not it saw any activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    totals: BTreeMap<Category, Decimal>,
}

impl MonthlySummary {
    fn new() -> Self {
        MonthlySummary {
            totals: Category::ALL
                .iter()
                .map(|&category| (category, Decimal::ZERO))
                .collect(),
        }
    }

    pub fn total(&self, category: Category) -> Decimal {
        self.totals[&category]
    }

    /// Totals in fixed category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.totals.iter().map(|(&category, &amount)| (category, amount))
    }
}

/// Sums amounts per category over records falling in the given year and
/// month. Pure function over the snapshot it is handed; callers re-load the
/// store when they want fresh data.
pub fn monthly_summary(expenses: &[Expense], year: i32, month: u32) -> MonthlySummary {
    let mut summary = MonthlySummary::new();
    for expense in expenses {
        if expense.date.year() == year && expense.date.month() == month {
            *summary.totals.entry(expense.category).or_default() += expense.amount;
        }
    }
    summary
}

/// Optional year/month/category predicates, combined with AND. Category
/// case-insensitivity is handled where text is parsed, not here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub category: Option<Category>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        self.year.map_or(true, |year| expense.date.year() == year)
            && self.month.map_or(true, |month| expense.date.month() == month)
            && self
                .category
                .map_or(true, |category| expense.category == category)
    }
}

/// Records satisfying every set filter, in input order. An empty result is
/// a normal value.
pub fn list_expenses(expenses: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| filter.matches(expense))
        .cloned()
        .collect()
}

#[cfg(test)]
use chrono::NaiveDate;
#[cfg(test)]
use rust_decimal_macros::dec;

#[cfg(test)]
fn expense(date: &str, amount: Decimal, category: Category) -> Expense {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    Expense::new(date, amount, category, "").unwrap()
}

#[cfg(test)]
fn march_expenses() -> Vec<Expense> {
    vec![
        expense("2025-03-01", dec!(12.50), Category::Food),
        expense("2025-03-15", dec!(40.00), Category::Bills),
        expense("2025-04-02", dec!(7.25), Category::Food),
        expense("2024-03-09", dec!(3.00), Category::Transport),
    ]
}

#[test]
fn summary_buckets_by_category() {
    let expenses = march_expenses();
    let summary = monthly_summary(&expenses, 2025, 3);

    assert_eq!(summary.total(Category::Food), dec!(12.50));
    assert_eq!(summary.total(Category::Bills), dec!(40.00));
    assert_eq!(summary.total(Category::Transport), dec!(0));
    assert_eq!(summary.total(Category::Entertainment), dec!(0));
    assert_eq!(summary.total(Category::Other), dec!(0));
}

#[test]
fn summary_always_carries_all_categories() {
    let summary = monthly_summary(&[], 2025, 3);
    let totals: Vec<_> = summary.iter().collect();

    assert_eq!(totals.len(), Category::ALL.len());
    for (_, amount) in totals {
        assert_eq!(amount, dec!(0));
    }
}

#[test]
fn summary_is_idempotent() {
    let expenses = march_expenses();
    let first = monthly_summary(&expenses, 2025, 3);
    let second = monthly_summary(&expenses, 2025, 3);
    assert_eq!(first, second);
}

#[test]
fn filters_compose_with_and() {
    let expenses = march_expenses();
    let filter = ExpenseFilter {
        year: Some(2025),
        month: Some(3),
        category: Some(Category::Food),
    };

    let matched = list_expenses(&expenses, &filter);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].amount, dec!(12.50));
}

#[test]
fn dropping_a_filter_widens_the_result() {
    let expenses = march_expenses();
    let narrow = ExpenseFilter {
        year: Some(2025),
        month: Some(3),
        category: Some(Category::Food),
    };
    let wider = ExpenseFilter {
        year: None,
        month: Some(3),
        category: Some(Category::Food),
    };
    let widest = ExpenseFilter::default();

    let narrow_hits = list_expenses(&expenses, &narrow);
    let wider_hits = list_expenses(&expenses, &wider);
    let all_hits = list_expenses(&expenses, &widest);

    assert!(narrow_hits.len() <= wider_hits.len());
    assert!(wider_hits.len() <= all_hits.len());
    assert_eq!(all_hits.len(), expenses.len());
    for hit in &narrow_hits {
        assert!(wider_hits.contains(hit));
    }
}

#[test]
fn no_match_is_an_empty_list() {
    let expenses = march_expenses();
    let filter = ExpenseFilter {
        year: Some(1999),
        ..ExpenseFilter::default()
    };
    assert!(list_expenses(&expenses, &filter).is_empty());
}
