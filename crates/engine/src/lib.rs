//! Core engine for the expense ledger.
//!
//! The engine owns the storage handle and enforces the domain invariants:
//! expense categories must belong to the global catalog *and* be linked to
//! the filing user, each source message maps to at most one stored expense,
//! and queries return rows in insertion order, newest first.

pub use error::EngineError;
pub use expenses::{Expense, NewExpense};
pub use ops::{Engine, EngineBuilder};

mod categories;
mod error;
mod expenses;
mod ops;
mod user_categories;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
