use failure::Fail;

use crate::selection::SelectionMode;


/// Errors that can be returned by the index based selection API of a
/// [`Mesh`][crate::Mesh].
///
/// All other mesh operations do not fail: they are no-ops on insufficient
/// input. Violated internal invariants are bugs and result in panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum Error {
    /// The given selection index is not smaller than the number of selectable
    /// elements in the current selection mode.
    #[fail(
        display = "selection index {} is out of range: only {} {} are selectable",
        index, len, mode
    )]
    IndexOutOfRange {
        index: usize,
        len: usize,
        mode: SelectionMode,
    },
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let e = Error::IndexOutOfRange { index: 7, len: 3, mode: SelectionMode::Edges };
        assert_eq!(e.to_string(), "selection index 7 is out of range: only 3 edges are selectable");
    }
}
