//! Scoped dialect switching
//!
//! [`ActiveDialect`] is the single mutable "active dialect" field a client
//! carries. Clones share the same cell. [`DialectGuard`] switches that cell
//! for the lifetime of a scope and puts the previous value back when the
//! scope ends, whichever way it ends.

use super::types::Dialect;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Shared active-dialect cell
#[derive(Debug, Clone)]
pub struct ActiveDialect {
    value: Arc<AtomicU8>,
}

impl ActiveDialect {
    /// Create a cell holding `dialect`
    pub fn new(dialect: Dialect) -> Self {
        Self {
            value: Arc::new(AtomicU8::new(dialect.to_u8())),
        }
    }

    /// Current dialect
    pub fn get(&self) -> Dialect {
        Dialect::from_u8(self.value.load(Ordering::SeqCst))
    }

    /// Replace the current dialect
    pub fn set(&self, dialect: Dialect) {
        self.value.store(dialect.to_u8(), Ordering::SeqCst);
    }

    /// Switch to `target` until the returned guard is dropped
    pub fn enter(&self, target: Dialect) -> DialectGuard {
        DialectGuard::enter(self, target)
    }
}

impl Default for ActiveDialect {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

/// Restores the dialect recorded at entry when dropped.
///
/// Guards nest as a stack: an inner guard restores whatever the outer guard
/// established, not the value from before the outer guard. Dropping guards
/// out of LIFO order is not supported.
#[must_use = "the dialect is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct DialectGuard {
    cell: ActiveDialect,
    original: Dialect,
    target: Dialect,
    restored: bool,
}

impl DialectGuard {
    /// Record the active dialect and switch to `target` if it differs
    pub fn enter(cell: &ActiveDialect, target: Dialect) -> Self {
        let original = cell.get();
        if original != target {
            debug!(from = %original, to = %target, "switching dialect");
            cell.set(target);
        }
        Self {
            cell: cell.clone(),
            original,
            target,
            restored: false,
        }
    }

    /// Dialect that was active when the guard was entered
    pub fn original(&self) -> Dialect {
        self.original
    }

    /// Dialect the guard switched to
    pub fn target(&self) -> Dialect {
        self.target
    }

    /// Whether entering the guard actually changed the active dialect
    pub fn switched(&self) -> bool {
        self.original != self.target
    }

    /// Whether restoration has already run
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Put the original dialect back. Runs at most once; later calls and the
    /// eventual drop are no-ops.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if self.switched() {
            debug!(from = %self.target, to = %self.original, "restoring dialect");
            self.cell.set(self.original);
        }
    }
}

impl Drop for DialectGuard {
    fn drop(&mut self) {
        self.restore();
    }
}
