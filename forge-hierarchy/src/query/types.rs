//! Queries yielding types.

use jforge_core::Result;
use jforge_model::{ElementId, TypeModel};

use super::{Cursor, Query, ReverseWalk, named, require_type};
use crate::{InnerTypes, SuperTypes};

/// Member types of a container.
pub struct InnerTypeQuery<'a> {
    model: &'a dyn TypeModel,
    root: ElementId,
    name: Option<String>,
    recursive: bool,
    include_self: bool,
    cursor: Option<Cursor<'a>>,
}

impl<'a> InnerTypeQuery<'a> {
    pub fn new(model: &'a dyn TypeModel, root: ElementId) -> Result<Self> {
        require_type(model, root, "inner type query")?;
        Ok(Self {
            model,
            root,
            name: None,
            recursive: false,
            include_self: false,
            cursor: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Descend into member types of member types.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Yield the container itself before its members.
    pub fn with_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    fn open(&self) -> Cursor<'a> {
        let own = self.include_self.then_some(self.root);
        let inner = InnerTypes::new(self.model, self.root, self.recursive);
        Box::new(
            own.into_iter()
                .chain(inner)
                .filter(named(self.model, self.name.clone())),
        )
    }
}

/// Superclasses and superinterfaces of a type.
///
/// Direct by default: the superclass followed by the declared interfaces.
/// Recursive queries follow [`SuperTypes`] order.
pub struct SuperTypeQuery<'a> {
    model: &'a dyn TypeModel,
    root: ElementId,
    name: Option<String>,
    recursive: bool,
    include_self: bool,
    classes: bool,
    interfaces: bool,
    cursor: Option<Cursor<'a>>,
}

impl<'a> SuperTypeQuery<'a> {
    pub fn new(model: &'a dyn TypeModel, root: ElementId) -> Result<Self> {
        require_type(model, root, "supertype query")?;
        Ok(Self {
            model,
            root,
            name: None,
            recursive: false,
            include_self: false,
            classes: true,
            interfaces: true,
            cursor: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Whether superclasses are yielded.
    pub fn with_classes(mut self, classes: bool) -> Self {
        self.classes = classes;
        self
    }

    /// Whether superinterfaces are yielded.
    pub fn with_interfaces(mut self, interfaces: bool) -> Self {
        self.interfaces = interfaces;
        self
    }

    fn open(&self) -> Cursor<'a> {
        let filter = named(self.model, self.name.clone());
        if self.recursive {
            let walk = SuperTypes::new(
                self.model,
                self.root,
                self.classes,
                self.interfaces,
                self.include_self,
            );
            return Box::new(walk.filter(filter));
        }

        let model = self.model;
        let own = self.include_self.then_some(self.root);
        let superclass = model.superclass(self.root).filter(|_| self.classes);
        let interfaces: &'a [ElementId] = if self.interfaces {
            model.superinterfaces(self.root)
        } else {
            &[]
        };
        Box::new(
            own.into_iter()
                .chain(superclass)
                .chain(interfaces.iter().copied())
                .filter(filter),
        )
    }
}

/// Types that extend or implement the root.
pub struct SubTypeQuery<'a> {
    model: &'a dyn TypeModel,
    root: ElementId,
    name: Option<String>,
    recursive: bool,
    include_self: bool,
    cursor: Option<Cursor<'a>>,
}

impl<'a> SubTypeQuery<'a> {
    pub fn new(model: &'a dyn TypeModel, root: ElementId) -> Result<Self> {
        require_type(model, root, "subtype query")?;
        Ok(Self {
            model,
            root,
            name: None,
            recursive: false,
            include_self: false,
            cursor: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    fn open(&self) -> Cursor<'a> {
        let own = self.include_self.then_some(self.root);
        let inheritors = |m: &'a dyn TypeModel, t| m.inheritors(t);
        let walk = ReverseWalk::new(self.model, self.root, inheritors, self.recursive);
        Box::new(
            own.into_iter()
                .chain(walk)
                .filter(named(self.model, self.name.clone())),
        )
    }
}

/// Types that declare a dependency on the root.
pub struct DependencyQuery<'a> {
    model: &'a dyn TypeModel,
    root: ElementId,
    name: Option<String>,
    recursive: bool,
    include_self: bool,
    cursor: Option<Cursor<'a>>,
}

impl<'a> DependencyQuery<'a> {
    pub fn new(model: &'a dyn TypeModel, root: ElementId) -> Result<Self> {
        require_type(model, root, "dependency query")?;
        Ok(Self {
            model,
            root,
            name: None,
            recursive: false,
            include_self: false,
            cursor: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Follow dependents of dependents.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    fn open(&self) -> Cursor<'a> {
        let own = self.include_self.then_some(self.root);
        let dependents = |m: &'a dyn TypeModel, t| m.dependents(t);
        let walk = ReverseWalk::new(self.model, self.root, dependents, self.recursive);
        Box::new(
            own.into_iter()
                .chain(walk)
                .filter(named(self.model, self.name.clone())),
        )
    }
}

impl_query! {
    InnerTypeQuery => "inner type query",
    SuperTypeQuery => "supertype query",
    SubTypeQuery => "subtype query",
    DependencyQuery => "dependency query",
}
