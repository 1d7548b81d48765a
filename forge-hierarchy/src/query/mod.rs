//! Fluent structural queries over a [`TypeModel`].
//!
//! Every query is built from a root type, refined with `with_*` modifiers and
//! then pulled like any iterator:
//!
//! ```ignore
//! use jforge_hierarchy::query::{MethodQuery, Query};
//!
//! let close = MethodQuery::new(&index, ty)?
//!     .with_name("close")
//!     .with_parameter_count(0)
//!     .with_recursive(true)
//!     .unique();
//! ```
//!
//! - [`InnerTypeQuery`] - member types of the root
//! - [`FieldQuery`] / [`MethodQuery`] - declared or inherited members
//! - [`ExportedSymbolQuery`] - members visible outside the package
//! - [`SuperTypeQuery`] - superclasses and superinterfaces
//! - [`SubTypeQuery`] / [`DependencyQuery`] - reverse relations
//!
//! Queries are single-pass. The underlying traversal is created on the first
//! pull and kept, so a terminal operation after partial consumption continues
//! where consumption stopped. Build a new query (or [`Query::to_vec`]) for an
//! independent pass.

/// Lazy cursor plumbing and [`Query`] for a query struct with `model`,
/// `root`, `name` and `cursor` fields and an `open` method.
macro_rules! impl_query {
    ($($query:ident => $label:literal),* $(,)?) => {
        $(
            impl Iterator for $query<'_> {
                type Item = ElementId;

                fn next(&mut self) -> Option<ElementId> {
                    if self.cursor.is_none() {
                        self.cursor = Some(self.open());
                    }
                    self.cursor.as_mut()?.next()
                }
            }

            impl Query for $query<'_> {
                fn describe(&self) -> String {
                    let root = self.model.qualified_name(self.root).unwrap_or("?");
                    match &self.name {
                        Some(name) => format!("{} on {} named '{}'", $label, root, name),
                        None => format!("{} on {}", $label, root),
                    }
                }
            }
        )*
    };
}

mod members;
mod types;

use std::collections::{HashSet, VecDeque};

use jforge_core::{Error, Result};
use jforge_model::{Element, ElementId, TypeModel};

pub use members::{ExportedSymbolQuery, FieldQuery, MethodQuery};
pub use types::{DependencyQuery, InnerTypeQuery, SubTypeQuery, SuperTypeQuery};

use crate::SuperTypes;

/// Lazily created result stream of a query.
type Cursor<'a> = Box<dyn Iterator<Item = ElementId> + 'a>;

/// Terminal operations shared by every query.
pub trait Query: Iterator<Item = ElementId> + Sized {
    /// Short human-readable description used in diagnostics.
    fn describe(&self) -> String;

    /// First match in declaration order.
    ///
    /// A second match is not an error: it is logged as an ambiguity and the
    /// first match is still returned.
    fn unique(mut self) -> Option<ElementId> {
        let first = self.next()?;
        if let Some(second) = self.next() {
            tracing::warn!(
                "ambiguous {}: {} and {} both match, using {}",
                self.describe(),
                first,
                second,
                first
            );
        }
        Some(first)
    }

    /// Materialize the remaining results.
    fn to_vec(self) -> Vec<ElementId> {
        self.collect()
    }
}

/// Fail unless `root` is a type of the model.
fn require_type(model: &dyn TypeModel, root: ElementId, query: &str) -> Result<()> {
    match model.element(root) {
        Some(Element::Type(_)) => Ok(()),
        Some(other) => Err(Error::invalid_argument(format!(
            "{} root {} is a {}, expected a type",
            query,
            root,
            other.kind()
        ))),
        None => Err(Error::invalid_argument(format!(
            "{} root {} is not part of the model",
            query, root
        ))),
    }
}

/// Keep only elements whose simple name equals `name`, when set.
fn named<'a>(
    model: &'a dyn TypeModel,
    name: Option<String>,
) -> impl FnMut(&ElementId) -> bool + 'a {
    move |&id| match &name {
        Some(name) => model.name(id) == Some(name.as_str()),
        None => true,
    }
}

/// Types whose members a member query visits, in definition order.
fn member_scope<'a>(
    model: &'a dyn TypeModel,
    root: ElementId,
    recursive: bool,
    include_self: bool,
) -> Cursor<'a> {
    if recursive {
        Box::new(SuperTypes::new(model, root, true, true, include_self))
    } else if include_self {
        Box::new(std::iter::once(root))
    } else {
        Box::new(std::iter::empty())
    }
}

/// Breadth-first walk over a reverse relation (inheritors, dependents).
struct ReverseWalk<'a> {
    model: &'a dyn TypeModel,
    edges: fn(&'a dyn TypeModel, ElementId) -> &'a [ElementId],
    queue: VecDeque<ElementId>,
    visited: HashSet<ElementId>,
    recursive: bool,
}

impl<'a> ReverseWalk<'a> {
    fn new(
        model: &'a dyn TypeModel,
        root: ElementId,
        edges: fn(&'a dyn TypeModel, ElementId) -> &'a [ElementId],
        recursive: bool,
    ) -> Self {
        let mut walk = Self {
            model,
            edges,
            queue: VecDeque::new(),
            visited: HashSet::from([root]),
            recursive,
        };
        walk.expand(root);
        walk
    }

    fn expand(&mut self, ty: ElementId) {
        for &next in (self.edges)(self.model, ty) {
            if self.visited.insert(next) {
                self.queue.push_back(next);
            }
        }
    }
}

impl Iterator for ReverseWalk<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let ty = self.queue.pop_front()?;
        if self.recursive {
            self.expand(ty);
        }
        Some(ty)
    }
}
