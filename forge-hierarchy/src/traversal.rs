//! Breadth-first supertype traversal.
//!
//! # Example
//!
//! ```ignore
//! use jforge_hierarchy::{SuperTypes, TraversalOptions};
//!
//! // Every supertype of `mid`, including `mid` itself.
//! for ty in SuperTypes::new(&index, mid, true, true, true) {
//!     println!("{}", index.qualified_name(ty).unwrap_or_default());
//! }
//!
//! // Interfaces only, walking through superclasses without yielding them.
//! let interfaces: Vec<_> = TraversalOptions::new()
//!     .superclasses(false)
//!     .superinterfaces(true)
//!     .traverse(&index, mid)
//!     .collect();
//! ```

use std::collections::{HashSet, VecDeque};

use bitflags::bitflags;
use jforge_model::{ElementId, TypeModel};

bitflags! {
    /// Properties a traversal guarantees about the elements it yields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Characteristics: u8 {
        /// Elements come in a defined encounter order.
        const ORDERED = 1 << 0;
        /// No element is yielded twice.
        const DISTINCT = 1 << 1;
        /// Every yielded handle refers to an element of the model.
        const NONNULL = 1 << 2;
        /// The exact number of elements is known up front.
        const SIZED = 1 << 3;
    }
}

/// Which levels of the hierarchy a [`SuperTypes`] traversal yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalOptions {
    pub include_superclasses: bool,
    pub include_superinterfaces: bool,
    pub include_start: bool,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            include_superclasses: true,
            include_superinterfaces: true,
            include_start: false,
        }
    }
}

impl TraversalOptions {
    /// Superclasses and superinterfaces, excluding the start type.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn superclasses(mut self, include: bool) -> Self {
        self.include_superclasses = include;
        self
    }

    pub fn superinterfaces(mut self, include: bool) -> Self {
        self.include_superinterfaces = include;
        self
    }

    pub fn start(mut self, include: bool) -> Self {
        self.include_start = include;
        self
    }

    /// Start a traversal from `start` with these options.
    pub fn traverse<'a>(self, model: &'a dyn TypeModel, start: ElementId) -> SuperTypes<'a> {
        SuperTypes::with_options(model, start, self)
    }
}

/// Lazy walk over the supertypes of a type.
///
/// Yields types in definition order: a class before its own interfaces,
/// level by level. Each interface is yielded at most once even when reachable
/// along several paths. The superclass chain is always walked, so interfaces
/// declared on a superclass are found even when superclasses are not yielded.
///
/// A traversal is single-use; collect it to iterate the result again.
///
/// The model's hierarchy must be acyclic. The TOML loader of
/// [`TypeIndex`](jforge_model::TypeIndex) rejects cycles; a model assembled
/// by hand is trusted.
pub struct SuperTypes<'a> {
    model: &'a dyn TypeModel,
    start: ElementId,
    options: TraversalOptions,
    queue: VecDeque<ElementId>,
    visited: HashSet<ElementId>,
    expand: bool,
}

impl<'a> SuperTypes<'a> {
    pub fn new(
        model: &'a dyn TypeModel,
        start: ElementId,
        include_superclasses: bool,
        include_superinterfaces: bool,
        include_start: bool,
    ) -> Self {
        Self::with_options(
            model,
            start,
            TraversalOptions {
                include_superclasses,
                include_superinterfaces,
                include_start,
            },
        )
    }

    pub fn with_options(
        model: &'a dyn TypeModel,
        start: ElementId,
        options: TraversalOptions,
    ) -> Self {
        let expand = options.include_superclasses || options.include_superinterfaces;
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();

        if model.type_element(start).is_some() && (expand || options.include_start) {
            queue.push_back(start);
            if options.include_superinterfaces && model.is_interface(start) {
                visited.insert(start);
            }
        }
        tracing::debug!(
            start = %start,
            superclasses = options.include_superclasses,
            superinterfaces = options.include_superinterfaces,
            include_start = options.include_start,
            seeded = queue.len(),
            "seeded supertype traversal"
        );

        Self {
            model,
            start,
            options,
            queue,
            visited,
            expand,
        }
    }

    pub fn options(&self) -> TraversalOptions {
        self.options
    }

    pub fn characteristics(&self) -> Characteristics {
        let base = Characteristics::ORDERED | Characteristics::DISTINCT | Characteristics::NONNULL;
        if self.expand {
            base
        } else {
            base | Characteristics::SIZED
        }
    }

    /// Exact number of remaining elements, when known.
    pub fn estimate_size(&self) -> Option<usize> {
        (!self.expand).then_some(self.queue.len())
    }

    fn enqueue_supertypes(&mut self, ty: ElementId) {
        if let Some(superclass) = self.model.superclass(ty) {
            self.queue.push_back(superclass);
        }
        if self.options.include_superinterfaces {
            for &iface in self.model.superinterfaces(ty) {
                if self.visited.insert(iface) {
                    self.queue.push_back(iface);
                }
            }
        }
    }

    fn matches(&self, ty: ElementId) -> bool {
        if ty == self.start {
            self.options.include_start
        } else if self.model.is_interface(ty) {
            self.options.include_superinterfaces
        } else {
            self.options.include_superclasses
        }
    }
}

impl Iterator for SuperTypes<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        while let Some(ty) = self.queue.pop_front() {
            if self.expand {
                self.enqueue_supertypes(ty);
            }
            if self.matches(ty) {
                return Some(ty);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.estimate_size() {
            Some(n) => (n, Some(n)),
            None => (0, None),
        }
    }
}

impl std::iter::FusedIterator for SuperTypes<'_> {}

#[cfg(test)]
mod tests {
    use jforge_model::{TypeDecl, TypeIndex};

    use super::*;

    /// `Base implements IA, IB`; `Mid extends Base implements IC`;
    /// `IC extends IA`.
    fn scenario() -> (TypeIndex, [ElementId; 5]) {
        let mut index = TypeIndex::new();
        let ia = index.add_type(TypeDecl::interface("p.IA"));
        let ib = index.add_type(TypeDecl::interface("p.IB"));
        let ic = index.add_type(TypeDecl::interface("p.IC").implements([ia]));
        let base = index.add_type(TypeDecl::class("p.Base").implements([ia, ib]));
        let mid = index.add_type(TypeDecl::class("p.Mid").extends(base).implements([ic]));
        (index, [mid, base, ic, ia, ib])
    }

    #[test]
    fn test_definition_order_with_shared_interface() {
        let (index, [mid, base, ic, ia, ib]) = scenario();
        let all: Vec<_> = SuperTypes::new(&index, mid, true, true, true).collect();
        assert_eq!(all, vec![mid, base, ic, ia, ib]);
    }

    #[test]
    fn test_excluding_start() {
        let (index, [mid, base, ic, ia, ib]) = scenario();
        let all: Vec<_> = SuperTypes::new(&index, mid, true, true, false).collect();
        assert_eq!(all, vec![base, ic, ia, ib]);
    }

    #[test]
    fn test_interfaces_found_through_unyielded_superclass() {
        let (index, [mid, _base, ic, ia, ib]) = scenario();
        let all: Vec<_> = TraversalOptions::new()
            .superclasses(false)
            .traverse(&index, mid)
            .collect();
        assert_eq!(all, vec![ic, ia, ib]);
    }

    #[test]
    fn test_superclasses_only() {
        let (index, [mid, base, ..]) = scenario();
        let all: Vec<_> = SuperTypes::new(&index, mid, true, false, false).collect();
        assert_eq!(all, vec![base]);
    }

    #[test]
    fn test_start_only_is_sized() {
        let (index, [mid, ..]) = scenario();
        let traversal = SuperTypes::new(&index, mid, false, false, true);
        assert!(traversal.characteristics().contains(Characteristics::SIZED));
        assert_eq!(traversal.estimate_size(), Some(1));
        assert_eq!(traversal.size_hint(), (1, Some(1)));
        assert_eq!(traversal.collect::<Vec<_>>(), vec![mid]);

        let empty = SuperTypes::new(&index, mid, false, false, false);
        assert_eq!(empty.size_hint(), (0, Some(0)));
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn test_expanding_traversal_is_unsized() {
        let (index, [mid, ..]) = scenario();
        let traversal = SuperTypes::new(&index, mid, true, true, true);
        assert!(!traversal.characteristics().contains(Characteristics::SIZED));
        assert_eq!(traversal.estimate_size(), None);
        assert_eq!(traversal.size_hint(), (0, None));
    }

    #[test]
    fn test_interface_start() {
        let (index, [_mid, _base, ic, ia, _ib]) = scenario();
        let all: Vec<_> = SuperTypes::new(&index, ic, true, true, true).collect();
        assert_eq!(all, vec![ic, ia]);
    }

    #[test]
    fn test_absent_start_yields_nothing() {
        let (index, _) = scenario();
        let missing = ElementId::new(999);
        assert_eq!(SuperTypes::new(&index, missing, true, true, true).count(), 0);
    }
}
