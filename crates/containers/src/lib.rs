//! Growable, associative, and linked containers with checked operations.
//!
//! Operations that have a precondition (a valid index, a non-empty container)
//! report violations as [`Error`] values instead of terminating. The only
//! exceptions are the `Index`/`IndexMut` impls, which panic.

mod buffer;
mod map;
mod queue;
mod set;
mod stack;
mod string_map;
mod vector;

pub use buffer::EditorBuffer;
pub use map::Map;
pub use queue::Queue;
pub use set::Set;
pub use stack::Stack;
pub use string_map::StringMap;
pub use vector::Vector;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An index lay outside the range accepted by the operation: `[0, len)`
    /// for reads, writes and removals, `[0, len]` for insertion.
    #[error("{op}: index {index} out of range for length {len}")]
    IndexOutOfRange {
        op: &'static str,
        index: usize,
        len: usize,
    },
    /// The operation needs at least one element.
    #[error("{op}: attempting to {op} an empty {container}")]
    Empty {
        op: &'static str,
        container: &'static str,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
