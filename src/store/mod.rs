//! In-memory expense storage

mod expense_store;

pub use expense_store::ExpenseStore;
