use chrono::NaiveDate;
use env_logger::Env;
use log::error;
use rust_decimal::Decimal;
use std::env;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use ledger::query::{list_expenses, monthly_summary, ExpenseFilter};
use ledger::report::{money, render_chart, render_table};
use ledger::store::ExpenseStore;
use ledger::{Category, Expense, LedgerError};

const DEFAULT_FILE: &str = "expenses.csv";

fn main() {
    // skipped-row warnings should show up without RUST_LOG being set
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        error!("At most one argument is supported: the expense file path");
        std::process::exit(1);
    }
    let path = args.get(1).map_or(DEFAULT_FILE, String::as_str);
    let store = ExpenseStore::new(path);

    let stdin = io::stdin();
    if let Err(err) = run(&store, &mut stdin.lock()) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(store: &ExpenseStore, input: &mut impl BufRead) -> Result<(), LedgerError> {
    loop {
        println!("\nPersonal Expense Tracker");
        println!("-----------------------");
        println!("1. Add Expense");
        println!("2. View Monthly Summary");
        println!("3. List Expenses");
        println!("4. Exit");

        let choice = read_line(input, "Choose an option (1-4): ")?;
        match choice.as_str() {
            "1" => add_expense(store, input)?,
            "2" => show_summary(store, input)?,
            "3" => list_filtered(store, input)?,
            "4" => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => println!("Invalid choice. Please select 1-4."),
        }
    }
}

fn add_expense(store: &ExpenseStore, input: &mut impl BufRead) -> Result<(), LedgerError> {
    let date = prompt(input, "Enter date of expense (YYYY-MM-DD): ", parse_date)?;
    let amount = prompt(input, "Enter amount spent: ", parse_amount)?;
    println!("Categories: {}", category_names());
    let category = prompt(input, "Enter category: ", |raw| {
        raw.parse::<Category>().map_err(|err| err.to_string())
    })?;
    let description = read_line(input, "Enter description: ")?;

    let expense = Expense::new(date, amount, category, description)?;
    store.append(&expense)?;
    println!("Expense added successfully.");
    Ok(())
}

fn show_summary(store: &ExpenseStore, input: &mut impl BufRead) -> Result<(), LedgerError> {
    let year = prompt(input, "Enter year (e.g., 2025): ", parse_year)?;
    let month = prompt(input, "Enter month (1-12): ", parse_month)?;

    let expenses = store.load_all()?;
    let summary = monthly_summary(&expenses, year, month);

    println!("\nExpense Summary:");
    for (category, amount) in summary.iter() {
        println!("{}: {}", category, money(amount));
    }
    println!();
    render_chart(&summary, year, month, io::stdout()).map_err(LedgerError::from)
}

fn list_filtered(store: &ExpenseStore, input: &mut impl BufRead) -> Result<(), LedgerError> {
    println!("Filter expenses (leave blank for no filter):");
    let filter = ExpenseFilter {
        year: prompt_optional(input, "Year (YYYY): ", parse_year)?,
        month: prompt_optional(input, "Month (1-12): ", parse_month)?,
        category: prompt_optional(input, "Category: ", |raw| {
            raw.parse::<Category>().map_err(|err| err.to_string())
        })?,
    };

    let expenses = store.load_all()?;
    let matched = list_expenses(&expenses, &filter);
    if matched.is_empty() {
        println!("No expenses found for given filters.");
        return Ok(());
    }
    render_table(&matched, io::stdout()).map_err(LedgerError::from)
}

fn category_names() -> String {
    let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
    names.join(", ")
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| "Invalid date format. Please enter date in YYYY-MM-DD format.".to_string())
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let amount = Decimal::from_str(raw).map_err(|_| "Please enter a valid number.".to_string())?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err("Amount must not be negative.".to_string());
    }
    Ok(amount)
}

fn parse_year(raw: &str) -> Result<i32, String> {
    raw.parse()
        .map_err(|_| "Please enter a valid year.".to_string())
}

fn parse_month(raw: &str) -> Result<u32, String> {
    match raw.parse() {
        Ok(month @ 1..=12) => Ok(month),
        _ => Err("Please enter a month between 1 and 12.".to_string()),
    }
}

/// Re-prompts until the parser accepts the input. The parse failure message
/// is shown verbatim, so parsers carry their own user-facing wording.
fn prompt<T, F>(input: &mut impl BufRead, message: &str, parse: F) -> io::Result<T>
where
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        let line = read_line(input, message)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(reason) => println!("{}", reason),
        }
    }
}

/// Like `prompt`, but a blank line means "no value".
fn prompt_optional<T, F>(
    input: &mut impl BufRead,
    message: &str,
    parse: F,
) -> io::Result<Option<T>>
where
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        let line = read_line(input, message)?;
        if line.is_empty() {
            return Ok(None);
        }
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(reason) => println!("{}", reason),
        }
    }
}

fn read_line(input: &mut impl BufRead, message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    // closed stdin would otherwise spin the re-prompt loops forever
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}
