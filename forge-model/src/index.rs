//! In-memory [`TypeModel`] with a declaration API.

use std::collections::HashMap;

use crate::{
    AnnotationElement, DataType, Element, ElementId, FieldElement, MethodElement, Modifiers,
    ParameterElement, TypeElement, TypeKind, TypeModel, TypeParameterElement,
};

/// Declaration of a type to add to a [`TypeIndex`].
#[derive(Debug, Clone)]
pub struct TypeDecl {
    name: String,
    kind: TypeKind,
    modifiers: Modifiers,
    superclass: Option<ElementId>,
    interfaces: Vec<ElementId>,
    type_parameters: Vec<(String, Vec<DataType>)>,
    annotations: Vec<String>,
}

impl TypeDecl {
    /// Declare a type of the given kind. For top-level types `name` is the
    /// qualified name; for inner types it is the simple name.
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::PUBLIC,
            superclass: None,
            interfaces: Vec::new(),
            type_parameters: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Enum, name)
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn extends(mut self, superclass: ElementId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interfaces: impl IntoIterator<Item = ElementId>) -> Self {
        self.interfaces.extend(interfaces);
        self
    }

    pub fn type_parameter(mut self, name: impl Into<String>, bounds: Vec<DataType>) -> Self {
        self.type_parameters.push((name.into(), bounds));
        self
    }

    pub fn annotation(mut self, type_name: impl Into<String>) -> Self {
        self.annotations.push(type_name.into());
        self
    }
}

/// Declaration of a field to add to a [`TypeIndex`].
#[derive(Debug, Clone)]
pub struct FieldDecl {
    name: String,
    data_type: DataType,
    modifiers: Modifiers,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            modifiers: Modifiers::PRIVATE,
        }
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Declaration of a method or constructor to add to a [`TypeIndex`].
#[derive(Debug, Clone)]
pub struct MethodDecl {
    name: String,
    modifiers: Modifiers,
    return_type: Option<DataType>,
    parameters: Vec<(String, DataType, bool)>,
    type_parameters: Vec<(String, Vec<DataType>)>,
    exceptions: Vec<DataType>,
    annotations: Vec<String>,
}

impl MethodDecl {
    /// Declare a `public void` method.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            return_type: Some(DataType::void()),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            exceptions: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Declare a public constructor; it takes the simple name of its type.
    pub fn constructor(type_name: impl Into<String>) -> Self {
        Self {
            return_type: None,
            ..Self::new(type_name)
        }
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn returns(mut self, ty: DataType) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: DataType) -> Self {
        self.parameters.push((name.into(), ty, false));
        self
    }

    /// Add a trailing varargs parameter; `element_type` is the declared
    /// array type as written in the model (e.g. `java.lang.String[]`).
    pub fn varargs_param(mut self, name: impl Into<String>, element_type: DataType) -> Self {
        self.parameters.push((name.into(), element_type, true));
        self
    }

    pub fn type_parameter(mut self, name: impl Into<String>, bounds: Vec<DataType>) -> Self {
        self.type_parameters.push((name.into(), bounds));
        self
    }

    pub fn throws(mut self, ty: DataType) -> Self {
        self.exceptions.push(ty);
        self
    }

    pub fn annotation(mut self, type_name: impl Into<String>) -> Self {
        self.annotations.push(type_name.into());
        self
    }
}

/// Arena-backed type model.
///
/// Maintains the reverse inheritor and dependent indices as supertypes and
/// dependencies are declared.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    elements: Vec<Element>,
    by_name: HashMap<String, ElementId>,
    inheritors: HashMap<ElementId, Vec<ElementId>>,
    dependents: HashMap<ElementId, Vec<ElementId>>,
    method_annotations: HashMap<ElementId, Vec<ElementId>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements of all kinds.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over all types in insertion order.
    pub fn types(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, Element::Type(_)))
            .map(|(i, _)| ElementId::new(i as u32))
    }

    /// Add a top-level type; `decl` carries its qualified name.
    pub fn add_type(&mut self, decl: TypeDecl) -> ElementId {
        let qualified = decl.name.clone();
        let simple = jforge_core::simple_name(&qualified).to_string();
        self.insert_type(decl, simple, qualified, None)
    }

    /// Add a member type of `container`; `decl` carries its simple name.
    pub fn add_inner_type(&mut self, container: ElementId, decl: TypeDecl) -> ElementId {
        let prefix = self.qualified_name_of(container).unwrap_or_default();
        let qualified = if prefix.is_empty() {
            decl.name.clone()
        } else {
            format!("{}.{}", prefix, decl.name)
        };
        let simple = decl.name.clone();
        let id = self.insert_type(decl, simple, qualified, Some(container));
        if let Some(Element::Type(t)) = self.elements.get_mut(container.index()) {
            t.inner_types.push(id);
        }
        id
    }

    fn insert_type(
        &mut self,
        decl: TypeDecl,
        name: String,
        qualified_name: String,
        enclosing: Option<ElementId>,
    ) -> ElementId {
        let id = self.next_id();
        self.elements.push(Element::Type(TypeElement {
            name,
            qualified_name: qualified_name.clone(),
            kind: decl.kind,
            modifiers: decl.modifiers,
            superclass: None,
            interfaces: Vec::new(),
            inner_types: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            type_parameters: Vec::new(),
            annotations: Vec::new(),
            enclosing,
        }));
        self.by_name.insert(qualified_name, id);

        let type_parameters = self.push_type_parameters(decl.type_parameters);
        let annotations = self.push_annotations(decl.annotations);
        if let Some(Element::Type(t)) = self.elements.get_mut(id.index()) {
            t.type_parameters = type_parameters;
            t.annotations = annotations;
        }
        if let Some(superclass) = decl.superclass {
            self.set_superclass(id, superclass);
        }
        for iface in decl.interfaces {
            self.add_superinterface(id, iface);
        }
        id
    }

    /// Set the superclass of `ty`, replacing any previous one.
    pub fn set_superclass(&mut self, ty: ElementId, superclass: ElementId) {
        let previous = match self.elements.get_mut(ty.index()) {
            Some(Element::Type(t)) => t.superclass.replace(superclass),
            _ => return,
        };
        if let Some(list) = previous.and_then(|p| self.inheritors.get_mut(&p)) {
            list.retain(|&i| i != ty);
        }
        self.inheritors.entry(superclass).or_default().push(ty);
    }

    /// Append a superinterface to `ty`; duplicates are ignored.
    pub fn add_superinterface(&mut self, ty: ElementId, iface: ElementId) {
        match self.elements.get_mut(ty.index()) {
            Some(Element::Type(t)) if !t.interfaces.contains(&iface) => t.interfaces.push(iface),
            _ => return,
        }
        self.inheritors.entry(iface).or_default().push(ty);
    }

    /// Record that `dependent` depends on `dependency`.
    pub fn add_dependency(&mut self, dependent: ElementId, dependency: ElementId) {
        let list = self.dependents.entry(dependency).or_default();
        if !list.contains(&dependent) {
            list.push(dependent);
        }
    }

    pub fn add_field(&mut self, ty: ElementId, decl: FieldDecl) -> ElementId {
        let id = self.next_id();
        self.elements.push(Element::Field(FieldElement {
            name: decl.name,
            modifiers: decl.modifiers,
            data_type: decl.data_type,
            declaring_type: ty,
        }));
        if let Some(Element::Type(t)) = self.elements.get_mut(ty.index()) {
            t.fields.push(id);
        }
        id
    }

    pub fn add_method(&mut self, ty: ElementId, decl: MethodDecl) -> ElementId {
        let id = self.next_id();
        self.elements.push(Element::Method(MethodElement {
            name: decl.name,
            modifiers: decl.modifiers,
            return_type: decl.return_type,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            exceptions: decl.exceptions,
            declaring_type: ty,
        }));

        let parameters = decl
            .parameters
            .into_iter()
            .map(|(name, data_type, varargs)| {
                self.push(Element::Parameter(ParameterElement {
                    name,
                    modifiers: Modifiers::empty(),
                    data_type,
                    varargs,
                }))
            })
            .collect();
        let type_parameters = self.push_type_parameters(decl.type_parameters);
        let annotations = self.push_annotations(decl.annotations);
        if let Some(Element::Method(m)) = self.elements.get_mut(id.index()) {
            m.parameters = parameters;
            m.type_parameters = type_parameters;
        }
        if !annotations.is_empty() {
            self.method_annotations.insert(id, annotations);
        }
        if let Some(Element::Type(t)) = self.elements.get_mut(ty.index()) {
            t.methods.push(id);
        }
        id
    }

    /// Annotations declared on a method.
    pub fn method_annotations(&self, method: ElementId) -> &[ElementId] {
        self.method_annotations
            .get(&method)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn next_id(&self) -> ElementId {
        ElementId::new(self.elements.len() as u32)
    }

    fn push(&mut self, element: Element) -> ElementId {
        let id = self.next_id();
        self.elements.push(element);
        id
    }

    fn push_type_parameters(&mut self, params: Vec<(String, Vec<DataType>)>) -> Vec<ElementId> {
        params
            .into_iter()
            .map(|(name, bounds)| {
                self.push(Element::TypeParameter(TypeParameterElement { name, bounds }))
            })
            .collect()
    }

    fn push_annotations(&mut self, annotations: Vec<String>) -> Vec<ElementId> {
        annotations
            .into_iter()
            .map(|type_name| self.push(Element::Annotation(AnnotationElement { type_name })))
            .collect()
    }

    fn qualified_name_of(&self, ty: ElementId) -> Option<String> {
        TypeModel::qualified_name(self, ty).map(str::to_string)
    }
}

impl TypeModel for TypeIndex {
    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    fn find_type(&self, qualified_name: &str) -> Option<ElementId> {
        self.by_name.get(qualified_name).copied()
    }

    fn inheritors(&self, ty: ElementId) -> &[ElementId] {
        self.inheritors.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }

    fn dependents(&self, ty: ElementId) -> &[ElementId] {
        self.dependents.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_type_and_lookup() {
        let mut index = TypeIndex::new();
        let base = index.add_type(TypeDecl::class("com.acme.Base"));
        assert_eq!(index.find_type("com.acme.Base"), Some(base));
        assert_eq!(index.name(base), Some("Base"));
        assert_eq!(TypeModel::qualified_name(&index, base), Some("com.acme.Base"));
        assert!(!index.is_interface(base));
    }

    #[test]
    fn test_inner_type_qualified_name() {
        let mut index = TypeIndex::new();
        let outer = index.add_type(TypeDecl::class("com.acme.Outer"));
        let inner = index.add_inner_type(outer, TypeDecl::interface("Listener"));
        assert_eq!(
            TypeModel::qualified_name(&index, inner),
            Some("com.acme.Outer.Listener")
        );
        assert_eq!(index.inner_types(outer), &[inner]);
        assert_eq!(index.type_element(inner).unwrap().enclosing, Some(outer));
    }

    #[test]
    fn test_reverse_inheritor_index() {
        let mut index = TypeIndex::new();
        let iface = index.add_type(TypeDecl::interface("com.acme.Shape"));
        let base = index.add_type(TypeDecl::class("com.acme.Base").implements([iface]));
        let circle = index.add_type(TypeDecl::class("com.acme.Circle").extends(base));
        assert_eq!(index.inheritors(iface), &[base]);
        assert_eq!(index.inheritors(base), &[circle]);

        let other = index.add_type(TypeDecl::class("com.acme.Other"));
        index.set_superclass(circle, other);
        assert!(index.inheritors(base).is_empty());
        assert_eq!(index.inheritors(other), &[circle]);
    }

    #[test]
    fn test_duplicate_superinterface_ignored() {
        let mut index = TypeIndex::new();
        let iface = index.add_type(TypeDecl::interface("com.acme.Shape"));
        let ty = index.add_type(TypeDecl::class("com.acme.Square"));
        index.add_superinterface(ty, iface);
        index.add_superinterface(ty, iface);
        assert_eq!(index.superinterfaces(ty), &[iface]);
        assert_eq!(index.inheritors(iface), &[ty]);
    }

    #[test]
    fn test_methods_and_parameters() {
        let mut index = TypeIndex::new();
        let ty = index.add_type(TypeDecl::class("com.acme.Greeter"));
        let method = index.add_method(
            ty,
            MethodDecl::new("greet")
                .returns(DataType::declared("java.lang.String"))
                .param("name", DataType::declared("java.lang.String"))
                .varargs_param("extra", DataType::declared("java.lang.Object").array(1))
                .annotation("java.lang.Deprecated"),
        );
        let m = index.method(method).unwrap();
        assert_eq!(m.parameters.len(), 2);
        let extra = index.parameter(m.parameters[1]).unwrap();
        assert!(extra.varargs);
        assert_eq!(index.methods(ty), &[method]);
        assert_eq!(index.method_annotations(method).len(), 1);
    }

    #[test]
    fn test_wrong_kind_relations_are_empty() {
        let mut index = TypeIndex::new();
        let ty = index.add_type(TypeDecl::class("com.acme.Holder"));
        let field = index.add_field(
            ty,
            FieldDecl::new("value", DataType::primitive(crate::Primitive::Int)),
        );
        assert!(index.superinterfaces(field).is_empty());
        assert_eq!(index.superclass(field), None);
        assert!(index.type_element(field).is_none());
        assert_eq!(index.fields(ty), &[field]);
    }
}
