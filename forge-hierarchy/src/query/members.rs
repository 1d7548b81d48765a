//! Queries yielding fields, methods and exported symbols.
//!
//! Member queries visit the root's own declarations by default. Recursive
//! queries continue through every supertype in [`SuperTypes`](crate::SuperTypes)
//! order; `with_self(false)` then restricts the result to inherited members.

use jforge_core::Result;
use jforge_model::{DataType, ElementId, ElementKind, Modifiers, TypeModel};

use super::{Cursor, Query, member_scope, named, require_type};

/// Fields declared by the root or, recursively, its supertypes.
pub struct FieldQuery<'a> {
    model: &'a dyn TypeModel,
    root: ElementId,
    name: Option<String>,
    recursive: bool,
    include_self: bool,
    cursor: Option<Cursor<'a>>,
}

impl<'a> FieldQuery<'a> {
    pub fn new(model: &'a dyn TypeModel, root: ElementId) -> Result<Self> {
        require_type(model, root, "field query")?;
        Ok(Self {
            model,
            root,
            name: None,
            recursive: false,
            include_self: true,
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

    /// Whether the root's own fields are included.
    pub fn with_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    fn open(&self) -> Cursor<'a> {
        let model = self.model;
        let scope = member_scope(model, self.root, self.recursive, self.include_self);
        Box::new(
            scope
                .flat_map(move |ty| model.fields(ty).iter().copied())
                .filter(named(model, self.name.clone())),
        )
    }
}

/// Methods and constructors declared by the root or, recursively, its
/// supertypes.
pub struct MethodQuery<'a> {
    model: &'a dyn TypeModel,
    root: ElementId,
    name: Option<String>,
    recursive: bool,
    include_self: bool,
    parameter_types: Option<Vec<DataType>>,
    parameter_count: Option<usize>,
    cursor: Option<Cursor<'a>>,
}

impl<'a> MethodQuery<'a> {
    pub fn new(model: &'a dyn TypeModel, root: ElementId) -> Result<Self> {
        require_type(model, root, "method query")?;
        Ok(Self {
            model,
            root,
            name: None,
            recursive: false,
            include_self: true,
            parameter_types: None,
            parameter_count: None,
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

    /// Whether the root's own methods are included.
    pub fn with_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Match methods whose parameter types equal `types` after erasure.
    pub fn with_parameter_types(mut self, types: impl IntoIterator<Item = DataType>) -> Self {
        self.parameter_types = Some(types.into_iter().map(|t| t.erasure()).collect());
        self
    }

    pub fn with_parameter_count(mut self, count: usize) -> Self {
        self.parameter_count = Some(count);
        self
    }

    fn open(&self) -> Cursor<'a> {
        let model = self.model;
        let scope = member_scope(model, self.root, self.recursive, self.include_self);
        let parameter_types = self.parameter_types.clone();
        let parameter_count = self.parameter_count;
        Box::new(
            scope
                .flat_map(move |ty| model.methods(ty).iter().copied())
                .filter(named(model, self.name.clone()))
                .filter(move |&id| {
                    let Some(method) = model.method(id) else {
                        return false;
                    };
                    if parameter_count.is_some_and(|n| n != method.parameters.len()) {
                        return false;
                    }
                    match &parameter_types {
                        Some(expected) => signature_matches(model, &method.parameters, expected),
                        None => true,
                    }
                }),
        )
    }
}

fn signature_matches(
    model: &dyn TypeModel,
    parameters: &[ElementId],
    expected: &[DataType],
) -> bool {
    parameters.len() == expected.len()
        && parameters.iter().zip(expected).all(|(&param, expected)| {
            model
                .parameter(param)
                .is_some_and(|p| p.data_type.erasure() == *expected)
        })
}

/// Fields, methods and member types visible outside the root's package.
///
/// A member is exported when it is public, or protected in a type that can
/// be subclassed. Members of interfaces are implicitly public.
pub struct ExportedSymbolQuery<'a> {
    model: &'a dyn TypeModel,
    root: ElementId,
    name: Option<String>,
    recursive: bool,
    include_self: bool,
    kind: Option<ElementKind>,
    cursor: Option<Cursor<'a>>,
}

impl<'a> ExportedSymbolQuery<'a> {
    pub fn new(model: &'a dyn TypeModel, root: ElementId) -> Result<Self> {
        require_type(model, root, "exported symbol query")?;
        Ok(Self {
            model,
            root,
            name: None,
            recursive: false,
            include_self: true,
            kind: None,
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

    /// Whether the root's own members are included.
    pub fn with_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Restrict results to one element kind (`Field`, `Method` or `Type`).
    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    fn open(&self) -> Cursor<'a> {
        let model = self.model;
        let scope = member_scope(model, self.root, self.recursive, self.include_self);
        let kind = self.kind;
        Box::new(
            scope
                .flat_map(move |ty| {
                    let fields = model.fields(ty).iter();
                    let methods = model.methods(ty).iter();
                    let inner = model.inner_types(ty).iter();
                    fields
                        .chain(methods)
                        .chain(inner)
                        .copied()
                        .filter(move |&member| is_exported(model, member, ty))
                })
                .filter(move |&id| kind.is_none_or(|k| model.kind(id) == Some(k)))
                .filter(named(model, self.name.clone())),
        )
    }
}

fn is_exported(model: &dyn TypeModel, member: ElementId, declaring: ElementId) -> bool {
    let modifiers = model.modifiers(member);
    if model.is_interface(declaring) {
        return !modifiers.contains(Modifiers::PRIVATE);
    }
    modifiers.contains(Modifiers::PUBLIC)
        || (modifiers.contains(Modifiers::PROTECTED)
            && !model.modifiers(declaring).contains(Modifiers::FINAL))
}

impl_query! {
    FieldQuery => "field query",
    MethodQuery => "method query",
    ExportedSymbolQuery => "exported symbol query",
}

#[cfg(test)]
mod tests {
    use jforge_model::{FieldDecl, MethodDecl, Primitive, TypeDecl, TypeIndex};

    use super::*;

    fn string() -> DataType {
        DataType::declared("java.lang.String")
    }

    fn shapes() -> (TypeIndex, ElementId, ElementId) {
        let mut index = TypeIndex::new();
        let shape = index.add_type(TypeDecl::interface("p.Shape"));
        index.add_method(
            shape,
            MethodDecl::new("area")
                .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .returns(DataType::primitive(Primitive::Double)),
        );
        let base = index.add_type(
            TypeDecl::class("p.Base")
                .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .implements([shape]),
        );
        index.add_field(
            base,
            FieldDecl::new("name", string()).modifiers(Modifiers::PROTECTED),
        );
        index.add_field(base, FieldDecl::new("cache", string()));
        index.add_method(base, MethodDecl::new("describe").returns(string()));
        index.add_method(
            base,
            MethodDecl::new("describe")
                .returns(string())
                .param("prefix", string()),
        );
        index.add_method(
            base,
            MethodDecl::new("describe")
                .returns(string())
                .param("items", DataType::generic("java.util.List", vec![string()])),
        );
        (index, shape, base)
    }

    #[test]
    fn test_declared_fields() {
        let (index, _, base) = shapes();
        let names: Vec<_> = FieldQuery::new(&index, base)
            .unwrap()
            .map(|f| index.name(f).unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["name", "cache"]);
    }

    #[test]
    fn test_methods_by_signature() {
        let (index, _, base) = shapes();
        let overloads = MethodQuery::new(&index, base).unwrap().with_name("describe");
        assert_eq!(overloads.count(), 3);

        let no_args = MethodQuery::new(&index, base)
            .unwrap()
            .with_name("describe")
            .with_parameter_count(0)
            .to_vec();
        assert_eq!(no_args.len(), 1);

        let by_list = MethodQuery::new(&index, base)
            .unwrap()
            .with_parameter_types([DataType::declared("java.util.List")])
            .unique()
            .unwrap();
        let params = &index.method(by_list).unwrap().parameters;
        assert_eq!(index.name(params[0]), Some("items"));
    }

    #[test]
    fn test_inherited_methods() {
        let (index, shape, base) = shapes();
        let inherited = MethodQuery::new(&index, base)
            .unwrap()
            .with_recursive(true)
            .with_self(false)
            .to_vec();
        assert_eq!(inherited, index.methods(shape).to_vec());

        let all = MethodQuery::new(&index, base).unwrap().with_recursive(true);
        assert_eq!(all.count(), 4);
    }

    #[test]
    fn test_exported_symbols() {
        let (index, _, base) = shapes();
        let fields: Vec<_> = ExportedSymbolQuery::new(&index, base)
            .unwrap()
            .with_kind(ElementKind::Field)
            .map(|f| index.name(f).unwrap_or_default())
            .collect();
        assert_eq!(fields, vec!["name"]);

        let area = ExportedSymbolQuery::new(&index, base)
            .unwrap()
            .with_recursive(true)
            .with_name("area")
            .unique();
        assert!(area.is_some());
    }

    #[test]
    fn test_protected_hidden_in_final_class() {
        let mut index = TypeIndex::new();
        let sealed = index.add_type(
            TypeDecl::class("p.Sealed").modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
        );
        index.add_field(
            sealed,
            FieldDecl::new("hidden", string()).modifiers(Modifiers::PROTECTED),
        );
        assert_eq!(ExportedSymbolQuery::new(&index, sealed).unwrap().count(), 0);
    }

    #[test]
    fn test_field_root_rejected() {
        let (index, _, base) = shapes();
        let field = index.fields(base)[0];
        assert!(FieldQuery::new(&index, field).is_err());
        assert!(MethodQuery::new(&index, field).is_err());
        assert!(ExportedSymbolQuery::new(&index, field).is_err());
    }
}
