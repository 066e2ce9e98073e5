//! Row identifiers carried as index payloads.

/// Unique identifier for a row.
pub type RowId = u64;
