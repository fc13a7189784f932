//! Grammar productions for M.
//!
//! This module implements all `read_*` methods as an extension of `Parser`.
//! Binary-operator expressions are read in `binary` (one layer per precedence
//! level) or by the combiner, depending on the configured strategy.

mod binary;
mod document;
mod expressions;
mod identifiers;
mod primary;
mod sequences;
mod types;
