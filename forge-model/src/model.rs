use crate::{
    Element, ElementId, ElementKind, FieldElement, MethodElement, Modifiers, ParameterElement,
    TypeElement,
};

/// Read-only view of a Java type model.
///
/// Implemented by the host environment (a compiled or source index). All
/// queries are side-effect free. Relations are returned in declaration order;
/// asking a relation of an element of the wrong kind yields an empty result.
pub trait TypeModel {
    /// Look up an element by handle.
    fn element(&self, id: ElementId) -> Option<&Element>;

    /// Look up a type by qualified name.
    fn find_type(&self, qualified_name: &str) -> Option<ElementId>;

    /// Direct superclass of a type; `None` at the top of the hierarchy and
    /// for interfaces.
    fn superclass(&self, ty: ElementId) -> Option<ElementId> {
        self.type_element(ty).and_then(|t| t.superclass)
    }

    /// Directly implemented (or, for interfaces, extended) interfaces.
    fn superinterfaces(&self, ty: ElementId) -> &[ElementId] {
        self.type_element(ty)
            .map(|t| t.interfaces.as_slice())
            .unwrap_or(&[])
    }

    /// Directly declared member types.
    fn inner_types(&self, ty: ElementId) -> &[ElementId] {
        self.type_element(ty)
            .map(|t| t.inner_types.as_slice())
            .unwrap_or(&[])
    }

    /// Directly declared fields.
    fn fields(&self, ty: ElementId) -> &[ElementId] {
        self.type_element(ty)
            .map(|t| t.fields.as_slice())
            .unwrap_or(&[])
    }

    /// Directly declared methods and constructors.
    fn methods(&self, ty: ElementId) -> &[ElementId] {
        self.type_element(ty)
            .map(|t| t.methods.as_slice())
            .unwrap_or(&[])
    }

    /// Reverse index: types whose superclass or superinterfaces contain `ty`.
    fn inheritors(&self, ty: ElementId) -> &[ElementId];

    /// Reverse index: types that declare a dependency on `ty`.
    fn dependents(&self, ty: ElementId) -> &[ElementId];

    fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.element(id).map(Element::kind)
    }

    fn name(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(Element::name)
    }

    fn modifiers(&self, id: ElementId) -> Modifiers {
        self.element(id)
            .map(Element::modifiers)
            .unwrap_or_default()
    }

    fn type_element(&self, id: ElementId) -> Option<&TypeElement> {
        match self.element(id)? {
            Element::Type(t) => Some(t),
            _ => None,
        }
    }

    fn field(&self, id: ElementId) -> Option<&FieldElement> {
        match self.element(id)? {
            Element::Field(f) => Some(f),
            _ => None,
        }
    }

    fn method(&self, id: ElementId) -> Option<&MethodElement> {
        match self.element(id)? {
            Element::Method(m) => Some(m),
            _ => None,
        }
    }

    fn parameter(&self, id: ElementId) -> Option<&ParameterElement> {
        match self.element(id)? {
            Element::Parameter(p) => Some(p),
            _ => None,
        }
    }

    fn qualified_name(&self, ty: ElementId) -> Option<&str> {
        self.type_element(ty).map(|t| t.qualified_name.as_str())
    }

    fn is_interface(&self, ty: ElementId) -> bool {
        self.type_element(ty).is_some_and(TypeElement::is_interface)
    }
}
