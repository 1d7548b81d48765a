//! Program element handles and per-kind element data.

use std::fmt;

use crate::{DataType, Modifiers};

/// Opaque handle into a [`TypeModel`](crate::TypeModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The fixed set of element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Type,
    Field,
    Method,
    Parameter,
    Annotation,
    TypeParameter,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Field => "field",
            Self::Method => "method",
            Self::Parameter => "parameter",
            Self::Annotation => "annotation",
            Self::TypeParameter => "type parameter",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration kind of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "@interface",
        }
    }

    /// Interfaces and annotation types take part in the interface hierarchy.
    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }
}

/// A program element: closed set of kinds, each with its own data.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Type(TypeElement),
    Field(FieldElement),
    Method(MethodElement),
    Parameter(ParameterElement),
    Annotation(AnnotationElement),
    TypeParameter(TypeParameterElement),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Type(_) => ElementKind::Type,
            Self::Field(_) => ElementKind::Field,
            Self::Method(_) => ElementKind::Method,
            Self::Parameter(_) => ElementKind::Parameter,
            Self::Annotation(_) => ElementKind::Annotation,
            Self::TypeParameter(_) => ElementKind::TypeParameter,
        }
    }

    /// Simple name of the element. Annotations report their type's simple name.
    pub fn name(&self) -> &str {
        match self {
            Self::Type(t) => &t.name,
            Self::Field(f) => &f.name,
            Self::Method(m) => &m.name,
            Self::Parameter(p) => &p.name,
            Self::Annotation(a) => jforge_core::simple_name(&a.type_name),
            Self::TypeParameter(tp) => &tp.name,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::Type(t) => t.modifiers,
            Self::Field(f) => f.modifiers,
            Self::Method(m) => m.modifiers,
            Self::Parameter(p) => p.modifiers,
            Self::Annotation(_) | Self::TypeParameter(_) => Modifiers::empty(),
        }
    }
}

/// A class, interface, enum or annotation type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeElement {
    pub name: String,
    pub qualified_name: String,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub superclass: Option<ElementId>,
    pub interfaces: Vec<ElementId>,
    pub inner_types: Vec<ElementId>,
    pub fields: Vec<ElementId>,
    pub methods: Vec<ElementId>,
    pub type_parameters: Vec<ElementId>,
    pub annotations: Vec<ElementId>,
    pub enclosing: Option<ElementId>,
}

impl TypeElement {
    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldElement {
    pub name: String,
    pub modifiers: Modifiers,
    pub data_type: DataType,
    pub declaring_type: ElementId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodElement {
    pub name: String,
    pub modifiers: Modifiers,
    /// `None` for constructors.
    pub return_type: Option<DataType>,
    pub parameters: Vec<ElementId>,
    pub type_parameters: Vec<ElementId>,
    pub exceptions: Vec<DataType>,
    pub declaring_type: ElementId,
}

impl MethodElement {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterElement {
    pub name: String,
    pub modifiers: Modifiers,
    pub data_type: DataType,
    pub varargs: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationElement {
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterElement {
    pub name: String,
    pub bounds: Vec<DataType>,
}
