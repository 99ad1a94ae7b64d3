//! Plain-text rendering of ledger query results.
//!
//! Everything here is a pure function of the data passed in; nothing touches
//! the ledger or the store.

use chrono::NaiveDate;

use crate::domain::{Summary, Transaction, format_signed_amount};

/// Render a listing, one transaction per line, in the order given.
pub fn render_transactions(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\nTry changing your filter criteria.\n".to_string();
    }

    let mut out = format!(
        "{:<14} {:<18} {:<30} {:>14}  ID\n",
        "DATE", "CATEGORY", "DESCRIPTION", "AMOUNT"
    );
    out.push_str(&"-".repeat(84));
    out.push('\n');

    for transaction in transactions {
        out.push_str(&format!(
            "{:<14} {:<18} {:<30} {:>14}  {}\n",
            format_date(transaction.date),
            transaction.display_category().label(),
            truncate(&transaction.description, 30),
            format_signed_amount(transaction.amount),
            transaction.id
        ));
    }
    out
}

/// Render the balance, income and expense totals.
pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Balance:  {}\nIncome:   {}\nExpenses: {}\n",
        format_money(summary.total_balance),
        format_money(summary.total_income),
        format_money(summary.total_expenses)
    )
}

/// Render one transaction as a detail block.
pub fn render_transaction(transaction: &Transaction) -> String {
    format!(
        "Transaction: {}\n  Description: {}\n  Amount:      {}\n  Type:        {}\n  Category:    {}\n  Date:        {}\n",
        transaction.id,
        transaction.description,
        format_signed_amount(transaction.amount),
        transaction.kind,
        transaction.display_category().label(),
        format_date(transaction.date)
    )
}

/// "Jan 15, 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "$12.34", "-$4.50"
fn format_money(cents: i64) -> String {
    let formatted = format_signed_amount(cents);
    formatted.trim_start_matches('+').to_string()
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    }
}
