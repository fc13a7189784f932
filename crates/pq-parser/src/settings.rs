//! Parser configuration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Production reads that may be open at once before the parse gives up with
/// [`Error::RecursionLimitExceeded`](crate::Error).
///
/// One level of source nesting costs several reads: a parenthesized operand takes
/// about half a dozen with [`Strategy::Combinatorial`] and twice that with
/// [`Strategy::Naive`].
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

/// How binary-operator expressions are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// One recursive-descent layer per precedence level.
    Naive,
    /// Flat operator run, rebuilt into a tree by precedence.
    #[default]
    Combinatorial,
}

/// How ambiguous `(` and `[` openers are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disambiguation {
    /// Token lookahead only; never backtracks.
    Strict,
    /// Speculatively reads each alternative and keeps the one that succeeds
    /// (or the failure that got furthest).
    #[default]
    Thorough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSettings {
    pub strategy: Strategy,
    pub disambiguation: Disambiguation,
    pub recursion_limit: Option<u32>,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            disambiguation: Disambiguation::default(),
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
        }
    }
}

/// Cooperative cancellation flag. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
