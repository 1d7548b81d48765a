//! Loading a [`TypeIndex`] from a TOML description.
//!
//! ```toml
//! [[types]]
//! name = "com.acme.Base"
//! modifiers = ["public", "abstract"]
//! implements = ["com.acme.Shape"]
//!
//! [[types.methods]]
//! name = "area"
//! returns = "double"
//! modifiers = ["public", "abstract"]
//!
//! [[types.inner]]
//! name = "Builder"
//! modifiers = ["public", "static"]
//! ```
//!
//! Type references use qualified names and may point at any type declared in
//! the same file, including inner types (`com.acme.Base.Builder`). Only
//! classes use `extends`, and it must name a class; `implements` (for an
//! interface: its superinterfaces) must name interfaces. No type may be its
//! own supertype.

use std::{collections::HashSet, path::Path, str::FromStr};

use serde::Deserialize;
use toml::Spanned;

use crate::{
    DataType, ElementId, Error, FieldDecl, MethodDecl, Modifiers, Result, TypeDecl, TypeIndex,
    TypeKind,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IndexFile {
    #[serde(default)]
    types: Vec<TypeSpec>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
enum KindSpec {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl From<KindSpec> for TypeKind {
    fn from(kind: KindSpec) -> Self {
        match kind {
            KindSpec::Class => TypeKind::Class,
            KindSpec::Interface => TypeKind::Interface,
            KindSpec::Enum => TypeKind::Enum,
            KindSpec::Annotation => TypeKind::Annotation,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeSpec {
    name: Spanned<String>,
    #[serde(default)]
    kind: KindSpec,
    #[serde(default)]
    modifiers: Vec<Spanned<String>>,
    extends: Option<Spanned<String>>,
    #[serde(default)]
    implements: Vec<Spanned<String>>,
    #[serde(default)]
    depends_on: Vec<Spanned<String>>,
    #[serde(default)]
    annotations: Vec<String>,
    #[serde(default)]
    type_parameters: Vec<TypeParameterSpec>,
    #[serde(default)]
    fields: Vec<FieldSpec>,
    #[serde(default)]
    methods: Vec<MethodSpec>,
    #[serde(default)]
    inner: Vec<TypeSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeParameterSpec {
    name: String,
    #[serde(default)]
    bounds: Vec<DataType>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldSpec {
    name: String,
    #[serde(rename = "type")]
    ty: DataType,
    #[serde(default)]
    modifiers: Vec<Spanned<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodSpec {
    name: String,
    returns: Option<DataType>,
    #[serde(default)]
    constructor: bool,
    #[serde(default)]
    modifiers: Vec<Spanned<String>>,
    #[serde(default)]
    params: Vec<ParamSpec>,
    #[serde(default)]
    type_parameters: Vec<TypeParameterSpec>,
    #[serde(default)]
    throws: Vec<DataType>,
    #[serde(default)]
    annotations: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParamSpec {
    name: String,
    #[serde(rename = "type")]
    ty: DataType,
    #[serde(default)]
    varargs: bool,
}

impl FromStr for TypeIndex {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_index(s, "index.toml")
    }
}

impl TypeIndex {
    /// Load a type index description from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_index(&content, &path.display().to_string())
    }

    /// Load a type index description from a string with a custom filename
    /// for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_index(content, filename)
    }
}

/// Parse a type index description.
pub fn parse_index(content: &str, filename: &str) -> Result<TypeIndex> {
    let file: IndexFile = toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
    let mut loader = Loader {
        src: content,
        filename,
        index: TypeIndex::new(),
        declared: Vec::new(),
    };
    for spec in &file.types {
        loader.declare(spec, None)?;
    }
    // Supertypes and members are linked once every type has a handle, so
    // references may point forward in the file.
    let declared = std::mem::take(&mut loader.declared);
    for (id, spec) in &declared {
        loader.link(*id, spec)?;
    }
    for (id, spec) in &declared {
        loader.check_acyclic(*id, spec)?;
    }
    Ok(loader.index)
}

struct Loader<'a> {
    src: &'a str,
    filename: &'a str,
    index: TypeIndex,
    declared: Vec<(ElementId, &'a TypeSpec)>,
}

impl<'a> Loader<'a> {
    fn declare(&mut self, spec: &'a TypeSpec, container: Option<ElementId>) -> Result<()> {
        let modifiers = self.modifiers(&spec.modifiers)?;
        let mut decl = TypeDecl::new(spec.kind.into(), spec.name.get_ref().clone())
            .modifiers(modifiers);
        for tp in &spec.type_parameters {
            decl = decl.type_parameter(tp.name.clone(), tp.bounds.clone());
        }
        for annotation in &spec.annotations {
            decl = decl.annotation(annotation.clone());
        }

        let qualified = match container {
            Some(outer) => format!(
                "{}.{}",
                crate::TypeModel::qualified_name(&self.index, outer).unwrap_or_default(),
                spec.name.get_ref()
            ),
            None => spec.name.get_ref().clone(),
        };
        if crate::TypeModel::find_type(&self.index, &qualified).is_some() {
            return Err(Error::validation_at(
                format!("duplicate type '{}'", qualified),
                self.src,
                self.filename,
                spec.name.span(),
            ));
        }

        let id = match container {
            Some(outer) => self.index.add_inner_type(outer, decl),
            None => self.index.add_type(decl),
        };
        self.declared.push((id, spec));
        for inner in &spec.inner {
            self.declare(inner, Some(id))?;
        }
        Ok(())
    }

    fn link(&mut self, id: ElementId, spec: &TypeSpec) -> Result<()> {
        if let Some(extends) = &spec.extends {
            if TypeKind::from(spec.kind) != TypeKind::Class {
                let message = format!(
                    "only classes declare a superclass; list the supertypes of {} '{}' under \
                     `implements`",
                    TypeKind::from(spec.kind).keyword(),
                    spec.name.get_ref()
                );
                return Err(self.invalid(message, extends));
            }
            let superclass = self.resolve(extends)?;
            if self.kind_of(superclass) != Some(TypeKind::Class) {
                let message = format!("'{}' is not a class", extends.get_ref());
                return Err(self.invalid(message, extends));
            }
            self.index.set_superclass(id, superclass);
        }
        for name in &spec.implements {
            let iface = self.resolve(name)?;
            if !crate::TypeModel::is_interface(&self.index, iface) {
                let message = format!("'{}' is not an interface", name.get_ref());
                return Err(self.invalid(message, name));
            }
            self.index.add_superinterface(id, iface);
        }
        for dependency in &spec.depends_on {
            let dependency = self.resolve(dependency)?;
            self.index.add_dependency(id, dependency);
        }
        for field in &spec.fields {
            let modifiers = self.modifiers(&field.modifiers)?;
            self.index.add_field(
                id,
                FieldDecl::new(field.name.clone(), field.ty.clone()).modifiers(modifiers),
            );
        }
        for method in &spec.methods {
            let decl = self.method_decl(method)?;
            self.index.add_method(id, decl);
        }
        Ok(())
    }

    fn method_decl(&self, method: &MethodSpec) -> Result<MethodDecl> {
        let mut decl = if method.constructor {
            MethodDecl::constructor(method.name.clone())
        } else {
            MethodDecl::new(method.name.clone())
                .returns(method.returns.clone().unwrap_or_else(DataType::void))
        };
        decl = decl.modifiers(self.modifiers(&method.modifiers)?);
        for param in &method.params {
            decl = if param.varargs {
                decl.varargs_param(param.name.clone(), param.ty.clone())
            } else {
                decl.param(param.name.clone(), param.ty.clone())
            };
        }
        for tp in &method.type_parameters {
            decl = decl.type_parameter(tp.name.clone(), tp.bounds.clone());
        }
        for thrown in &method.throws {
            decl = decl.throws(thrown.clone());
        }
        for annotation in &method.annotations {
            decl = decl.annotation(annotation.clone());
        }
        Ok(decl)
    }

    /// Reject a supertype edge of `id` that leads back to `id`.
    fn check_acyclic(&self, id: ElementId, spec: &TypeSpec) -> Result<()> {
        for edge in spec.extends.iter().chain(&spec.implements) {
            let supertype = self.resolve(edge)?;
            if self.reaches(supertype, id) {
                let qualified =
                    crate::TypeModel::qualified_name(&self.index, id).unwrap_or_default();
                let message = format!(
                    "cyclic inheritance: '{}' is a subtype of '{}'",
                    edge.get_ref(),
                    qualified
                );
                return Err(self.invalid(message, edge));
            }
        }
        Ok(())
    }

    /// Whether `target` is `from` or one of its supertypes.
    fn reaches(&self, from: ElementId, target: ElementId) -> bool {
        let mut pending = vec![from];
        let mut seen = HashSet::new();
        while let Some(next) = pending.pop() {
            if next == target {
                return true;
            }
            if seen.insert(next) {
                pending.extend(crate::TypeModel::superclass(&self.index, next));
                pending.extend(crate::TypeModel::superinterfaces(&self.index, next));
            }
        }
        false
    }

    fn kind_of(&self, id: ElementId) -> Option<TypeKind> {
        crate::TypeModel::type_element(&self.index, id).map(|t| t.kind)
    }

    fn invalid(&self, message: String, at: &Spanned<String>) -> Box<Error> {
        Error::validation_at(message, self.src, self.filename, at.span())
    }

    fn resolve(&self, name: &Spanned<String>) -> Result<ElementId> {
        crate::TypeModel::find_type(&self.index, name.get_ref()).ok_or_else(|| {
            Error::validation_at(
                format!("unknown type '{}'", name.get_ref()),
                self.src,
                self.filename,
                name.span(),
            )
        })
    }

    fn modifiers(&self, keywords: &[Spanned<String>]) -> Result<Modifiers> {
        keywords.iter().try_fold(Modifiers::empty(), |acc, kw| {
            Modifiers::from_keyword(kw.get_ref())
                .map(|flag| acc | flag)
                .ok_or_else(|| {
                    Error::validation_at(
                        format!("unknown modifier '{}'", kw.get_ref()),
                        self.src,
                        self.filename,
                        kw.span(),
                    )
                })
        })
    }
}
