//! Inner (member) type enumeration.

use std::collections::VecDeque;

use jforge_model::{ElementId, TypeModel};

/// Lazy walk over the member types of a container.
///
/// Direct members come first in declaration order. When recursive, the
/// members of each yielded type follow breadth-first.
pub struct InnerTypes<'a> {
    model: &'a dyn TypeModel,
    current: std::slice::Iter<'a, ElementId>,
    pending: VecDeque<ElementId>,
    recursive: bool,
}

impl<'a> InnerTypes<'a> {
    pub fn new(model: &'a dyn TypeModel, container: ElementId, recursive: bool) -> Self {
        Self {
            model,
            current: model.inner_types(container).iter(),
            pending: VecDeque::new(),
            recursive,
        }
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Exact number of remaining elements; only known for a direct walk.
    pub fn estimate_size(&self) -> Option<usize> {
        (!self.recursive).then(|| self.current.len())
    }
}

impl Iterator for InnerTypes<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        loop {
            if let Some(&ty) = self.current.next() {
                if self.recursive {
                    self.pending.push_back(ty);
                }
                return Some(ty);
            }
            let container = self.pending.pop_front()?;
            self.current = self.model.inner_types(container).iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.current.len();
        if self.recursive {
            (remaining, None)
        } else {
            (remaining, Some(remaining))
        }
    }
}

impl std::iter::FusedIterator for InnerTypes<'_> {}

#[cfg(test)]
mod tests {
    use jforge_model::{TypeDecl, TypeIndex};

    use super::*;

    fn nested() -> (TypeIndex, ElementId, [ElementId; 4]) {
        let mut index = TypeIndex::new();
        let outer = index.add_type(TypeDecl::class("p.Outer"));
        let a = index.add_inner_type(outer, TypeDecl::class("A"));
        let b = index.add_inner_type(outer, TypeDecl::interface("B"));
        let a1 = index.add_inner_type(a, TypeDecl::class("A1"));
        let b1 = index.add_inner_type(b, TypeDecl::class("B1"));
        (index, outer, [a, b, a1, b1])
    }

    #[test]
    fn test_direct_members() {
        let (index, outer, [a, b, ..]) = nested();
        let inner = InnerTypes::new(&index, outer, false);
        assert_eq!(inner.size_hint(), (2, Some(2)));
        assert_eq!(inner.estimate_size(), Some(2));
        assert_eq!(inner.collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_recursive_is_breadth_first() {
        let (index, outer, [a, b, a1, b1]) = nested();
        let inner = InnerTypes::new(&index, outer, true);
        assert_eq!(inner.size_hint(), (2, None));
        assert_eq!(inner.estimate_size(), None);
        assert_eq!(inner.collect::<Vec<_>>(), vec![a, b, a1, b1]);
    }

    #[test]
    fn test_no_members() {
        let (index, _, [.., b1]) = nested();
        assert_eq!(InnerTypes::new(&index, b1, true).count(), 0);
    }
}
