//! Pure aggregation and filtering over loaded transaction lists.
//!
//! Both operations are display-side projections: they are recomputed from
//! the full in-memory list after every load and never mutate it. Totals are
//! only as complete as the list itself.

use crate::types::id::UserId;
use crate::types::status::TransactionStatus;
use crate::types::transaction::Transaction;

/// Dashboard headline figures, all in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionStats {
    /// Sum of completed transactions received by the current user.
    pub income: i64,
    /// Sum of completed transactions sent by the current user.
    pub expenses: i64,
    /// `income - expenses`.
    pub balance: i64,
    /// Number of transactions still pending, in either direction.
    pub pending_count: usize,
}

impl TransactionStats {
    /// Compute stats for `current_user` over the full loaded list.
    #[must_use]
    pub fn compute(transactions: &[Transaction], current_user: &UserId) -> Self {
        let mut stats = Self::default();

        for txn in transactions {
            match txn.status {
                TransactionStatus::Completed => {
                    if txn.is_incoming_for(current_user) {
                        stats.income += txn.amount;
                    }
                    if txn.is_outgoing_for(current_user) {
                        stats.expenses += txn.amount;
                    }
                }
                TransactionStatus::Pending => stats.pending_count += 1,
                TransactionStatus::Cancelled => {}
            }
        }

        stats.balance = stats.income - stats.expenses;
        stats
    }
}

/// A non-destructive view filter over a loaded transaction list.
///
/// Free-text matching is a case-insensitive substring check against the
/// identifier and the status name; the status field is exact equality. Both
/// must pass when both are set.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Free-text query, if any.
    pub query: Option<String>,
    /// Exact status to keep, if any.
    pub status: Option<TransactionStatus>,
}

impl TransactionFilter {
    /// Returns `true` when no criteria are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.query.is_none() && self.status.is_none()
    }

    /// Project the list through the filter without mutating it.
    #[must_use]
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let query = self
            .query
            .as_deref()
            .map(str::to_lowercase)
            .filter(|q| !q.is_empty());

        transactions
            .iter()
            .filter(|txn| {
                if let Some(q) = &query {
                    let id_match = txn.id.as_str().to_lowercase().contains(q.as_str());
                    let status_match = txn.status.to_string().contains(q.as_str());
                    if !id_match && !status_match {
                        return false;
                    }
                }
                if let Some(status) = self.status
                    && txn.status != status
                {
                    return false;
                }
                true
            })
            .collect()
    }
}
