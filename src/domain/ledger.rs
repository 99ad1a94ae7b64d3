use super::{CategoryFilter, Cents, Transaction};

/// Aggregate totals over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Sum of all positive amounts
    pub total_income: Cents,
    /// Sum of the absolute values of all negative amounts
    pub total_expenses: Cents,
    /// total_income - total_expenses
    pub total_balance: Cents,
}

/// Compute the income, expense and balance totals for a list of transactions.
///
/// Returns `None` if any total does not fit in `Cents`.
pub fn summarize(transactions: &[Transaction]) -> Option<Summary> {
    let (total_income, total_expenses) =
        transactions
            .iter()
            .try_fold((0 as Cents, 0 as Cents), |(income, expenses), tx| {
                match tx.amount {
                    a if a > 0 => Some((income.checked_add(a)?, expenses)),
                    a if a < 0 => Some((income, expenses.checked_add(a.checked_abs()?)?)),
                    _ => Some((income, expenses)),
                }
            })?;

    Some(Summary {
        total_income,
        total_expenses,
        total_balance: total_income.checked_sub(total_expenses)?,
    })
}

/// Select the transactions matching `filter`, newest date first.
///
/// The sort is stable: records sharing a date keep their relative order from
/// `transactions`.
pub fn newest_first(transactions: &[Transaction], filter: &CategoryFilter) -> Vec<Transaction> {
    let mut selected: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| filter.matches(&tx.category))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}
