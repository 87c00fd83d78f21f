//! In-memory expense store with monotonic id assignment

use tokio::sync::RwLock;

use crate::types::Expense;

struct Inner {
    expenses: Vec<Expense>,
    next_id: u64,
}

/// In-memory, insertion-ordered expense collection.
///
/// A single lock guards both the collection and the id counter so the
/// read-then-append sequence is atomic under a multi-threaded runtime:
/// ids stay unique and monotonic for the process lifetime, and they are
/// never reused. Nothing is persisted across restarts.
pub struct ExpenseStore {
    inner: RwLock<Inner>,
}

impl ExpenseStore {
    /// Create an empty store with the id counter at 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                expenses: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store seeded with the three fixed startup records.
    pub fn with_seed_data() -> Self {
        let mut expenses = Vec::with_capacity(SEED_EXPENSES.len());
        let mut next_id = 1;
        for (amount, description, category, date) in SEED_EXPENSES {
            expenses.push(Expense::new(
                next_id,
                amount,
                description.to_string(),
                category.to_string(),
                date.to_string(),
            ));
            next_id += 1;
        }

        Self {
            inner: RwLock::new(Inner { expenses, next_id }),
        }
    }

    /// Snapshot of all expenses in insertion order.
    pub async fn list(&self) -> Vec<Expense> {
        self.inner.read().await.expenses.clone()
    }

    /// Assign the next id, append a new record, and return it.
    pub async fn append(
        &self,
        amount: f64,
        description: String,
        category: String,
        date: String,
    ) -> Expense {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let expense = Expense::new(id, amount, description, category, date);
        inner.expenses.push(expense.clone());
        expense
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.expenses.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.expenses.is_empty()
    }
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Records installed at process start, ids 1..=3.
const SEED_EXPENSES: [(f64, &str, &str, &str); 3] = [
    (50.00, "Groceries from local store", "Food", "2023-11-29"),
    (15.50, "Coffee and sandwich", "Food", "2023-11-29"),
    (300.00, "Monthly rent payment", "Housing", "2023-12-01"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_store_has_three_records() {
        let store = ExpenseStore::with_seed_data();
        let expenses = store.list().await;

        assert_eq!(expenses.len(), 3);
        assert_eq!(
            expenses.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(expenses[0].amount, "50.00");
        assert_eq!(expenses[1].amount, "15.50");
        assert_eq!(expenses[2].amount, "300.00");
    }

    #[tokio::test]
    async fn append_assigns_monotonic_ids() {
        let store = ExpenseStore::with_seed_data();

        let first = store
            .append(25.0, "Taxi".into(), "Transport".into(), "2024-01-01".into())
            .await;
        let second = store
            .append(9.99, "Lunch".into(), "Food".into(), "2024-01-02".into())
            .await;

        assert_eq!(first.id, 4);
        assert_eq!(second.id, 5);
        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn empty_store_starts_counting_at_one() {
        let store = ExpenseStore::new();
        assert!(store.is_empty().await);

        let expense = store
            .append(1.0, "Gum".into(), "Misc".into(), "2024-01-01".into())
            .await;
        assert_eq!(expense.id, 1);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = ExpenseStore::new();
        for i in 0..10 {
            store
                .append(
                    f64::from(i) + 1.0,
                    format!("item {i}"),
                    "Misc".into(),
                    "2024-01-01".into(),
                )
                .await;
        }

        let ids: Vec<u64> = store.list().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn concurrent_appends_never_reuse_ids() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let store = Arc::new(ExpenseStore::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let mut ids = Vec::new();
                for _ in 0..25 {
                    let expense = store
                        .append(5.0, "x".into(), "y".into(), "2024-01-01".into())
                        .await;
                    ids.push(expense.id);
                }
                ids
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.await.expect("task should finish") {
                assert!(seen.insert(id), "id {id} assigned twice");
            }
        }
        assert_eq!(seen.len(), 200);
    }
}
