//! Focused accessor traits.
//!
//! - `Lined` - source line access, implemented by every node
//! - `Named` - declared-name access for declarations

use crate::IdSymbol;

/// A node that records the source line it came from.
pub trait Lined {
    /// Source line number.
    fn line(&self) -> u32;
}

/// A declaration with a name.
pub trait Named {
    fn name(&self) -> IdSymbol;
}
