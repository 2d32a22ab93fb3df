//! The ordered element container every mesh element kind is stored in.

use std::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use stable_vec::{
    StableVec,
    core::DefaultCore,
    iter::{
        Indices, Iter as SvIter, Values as SvValues, ValuesMut as SvValuesMut,
    },
};

use crate::handle::{hsize, Handle};


/// An ordered list of owned elements addressed by handles of type `H`.
///
/// This is the node graph container of the mesh: vertices, edges and
/// triangles are each stored in one `NodeList`.
///
/// - Appending an element is O(1) and returns a new handle. Elements are
///   always appended at the end, so iteration order is creation order.
/// - Removing an element by handle is O(1) and leaves a hole. No other element
///   moves, which means all other handles stay valid. Holes are never filled
///   again: a removed handle never starts referring to a different element.
///
/// Internally, this is a `StableVec` where the handle is the index into the
/// vector.
#[derive(Clone)]
pub struct NodeList<H: Handle, T> {
    vec: StableVec<T>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> NodeList<H, T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            vec: StableVec::new(),
            _dummy: PhantomData,
        }
    }

    /// Appends the given element and returns its handle.
    pub fn push(&mut self, elem: T) -> H {
        H::from_usize(self.vec.push(elem))
    }

    /// Removes the element referred to by `handle` and returns it. Returns
    /// `None` if there is no such element (e.g. because it was already
    /// removed).
    pub fn remove(&mut self, handle: H) -> Option<T> {
        let idx = handle.to_usize();
        if !self.vec.has_element_at(idx) {
            return None;
        }

        self.vec.remove(idx)
    }

    pub fn contains(&self, handle: H) -> bool {
        self.vec.has_element_at(handle.to_usize())
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.vec.get(handle.to_usize())
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.vec.get_mut(handle.to_usize())
    }

    /// Returns the number of live elements (holes are not counted).
    pub fn len(&self) -> hsize {
        self.vec.num_elements() as hsize
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, H, T> {
        Iter::new(self)
    }
    pub fn handles(&self) -> Handles<'_, H, T> {
        Handles::new(self)
    }
    pub fn values(&self) -> Values<'_, H, T> {
        Values::new(self)
    }
    pub fn values_mut(&mut self) -> ValuesMut<'_, H, T> {
        ValuesMut::new(self)
    }

    /// Collects the handles of all elements satisfying `pred`, in store
    /// order. Useful to remove elements without borrowing the list while
    /// iterating.
    pub fn handles_where(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<H> {
        self.iter().filter(|(_, elem)| pred(elem)).map(|(h, _)| h).collect()
    }
}

impl<H: Handle, T> Default for NodeList<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T> Index<H> for NodeList<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get(handle) {
            None => panic!("no element found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> IndexMut<H> for NodeList<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            None => panic!("no element found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for NodeList<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}


// ===== Iterator wrappers =======================================================================

/// This macro generates an iterator wrapper. The usage is kinda awkward, but
/// this way we can avoid duplicate code.
macro_rules! gen_iter_wrapper {
    (
        $name:ident, $sv_name:ident, $iter_method:ident, [$($mutable:ident)?], [$($clone:ident)?],
        |$lt:tt, $h:ident, $t:ident| $item:ty,
        [$($mapping:tt)*] $(,)?
    ) => {
        #[derive(Debug, $($clone)?)]
        pub struct $name<$lt, $h: Handle, $t> {
            iter: $sv_name<$lt, $t, DefaultCore<$t>>,
            _dummy: PhantomData<&$lt $h>,
        }

        impl<$lt, $h: Handle, $t> $name<$lt, $h, $t> {
            fn new(list: &$lt $($mutable)? NodeList<$h, $t>) -> Self {
                Self {
                    iter: list.vec.$iter_method(),
                    _dummy: PhantomData,
                }
            }
        }

        impl<$lt, $h: Handle, $t> Iterator for $name<$lt, $h, $t> {
            type Item = $item;
            fn next(&mut self) -> Option<Self::Item> {
                self.iter.next() $($mapping)*
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.iter.size_hint()
            }
        }

        impl<$lt, $h: Handle, $t> DoubleEndedIterator for $name<$lt, $h, $t> {
            fn next_back(&mut self) -> Option<Self::Item> {
                self.iter.next_back() $($mapping)*
            }
        }

        impl<$lt, $h: Handle, $t> FusedIterator for $name<$lt, $h, $t> {}
    };
}

gen_iter_wrapper!(
    Iter, SvIter, iter, [], [Clone],
    |'list, H, T| (H, &'list T),
    [.map(|(i, e)| (H::from_usize(i), e))],
);
gen_iter_wrapper!(Handles, Indices, indices, [], [Clone], |'list, H, T| H, [.map(H::from_usize)]);
gen_iter_wrapper!(Values, SvValues, values, [], [Clone], |'list, H, T| &'list T, []);
gen_iter_wrapper!(ValuesMut, SvValuesMut, values_mut, [mut], [], |'list, H, T| &'list mut T, []);


// ===== Tests ===================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::VertexHandle;

    type List = NodeList<VertexHandle, &'static str>;

    #[test]
    fn empty() {
        let list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.handles().count(), 0);
        assert!(!list.contains(VertexHandle::new(0)));
        assert_eq!(list.get(VertexHandle::new(5)), None);
    }

    #[test]
    fn push_and_iterate_in_order() {
        let mut list = List::new();
        let a = list.push("anna");
        let b = list.push("bob");
        let c = list.push("carl");

        assert_eq!(list.len(), 3);
        assert_eq!(list.handles().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(list.values().cloned().collect::<Vec<_>>(), vec!["anna", "bob", "carl"]);
        assert_eq!(list[b], "bob");
    }

    #[test]
    fn remove_keeps_other_handles_valid() {
        let mut list = List::new();
        let a = list.push("anna");
        let b = list.push("bob");
        let c = list.push("carl");

        assert_eq!(list.remove(b), Some("bob"));
        assert_eq!(list.remove(b), None);
        assert_eq!(list.len(), 2);
        assert!(!list.contains(b));
        assert_eq!(list[a], "anna");
        assert_eq!(list[c], "carl");
        assert_eq!(list.handles().collect::<Vec<_>>(), vec![a, c]);

        // New elements are appended, the hole is not reused.
        let d = list.push("dora");
        assert_ne!(d, b);
        assert_eq!(list.handles().collect::<Vec<_>>(), vec![a, c, d]);
    }

    #[test]
    fn emptied_list_does_not_reuse_handles() {
        let mut list = List::new();
        let a = list.push("anna");
        let b = list.push("bob");
        list.remove(a);
        list.remove(b);
        assert!(list.is_empty());

        let c = list.push("carl");
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert!(!list.contains(a));
        assert_eq!(list.handles().collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn remove_out_of_bounds() {
        let mut list = List::new();
        list.push("anna");
        assert_eq!(list.remove(VertexHandle::new(100)), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn mutate_through_handles() {
        let mut list = NodeList::<VertexHandle, u32>::new();
        let a = list.push(1);
        let b = list.push(2);
        list[a] += 10;
        *list.get_mut(b).unwrap() += 20;
        for v in list.values_mut() {
            *v *= 2;
        }

        assert_eq!(list.iter().map(|(h, v)| (h, *v)).collect::<Vec<_>>(), vec![(a, 22), (b, 44)]);
        assert_eq!(list.handles_where(|v| *v > 30), vec![b]);
    }

    #[test]
    #[should_panic(expected = "no element found")]
    fn index_removed() {
        let mut list = List::new();
        let a = list.push("anna");
        list.remove(a);
        let _ = list[a];
    }
}
