//! Type references as seen by the model.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// Java primitive types (including `void` for return types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "char" => Self::Char,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "void" => Self::Void,
            _ => return None,
        })
    }
}

/// Bound of a wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Extends(Box<DataType>),
    Super(Box<DataType>),
}

/// The non-array part of a data type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    Primitive(Primitive),
    /// A class or interface by qualified name, with type arguments.
    Declared {
        name: String,
        arguments: Vec<DataType>,
    },
    /// A type variable such as `T`.
    Variable(String),
    /// `?`, `? extends X` or `? super X`; only valid as a type argument.
    Wildcard(Option<WildcardBound>),
}

/// A reference to a type: primitive, declared, type variable or wildcard,
/// with array dimensions.
///
/// The textual form is Java syntax with qualified names, e.g.
/// `java.util.Map<java.lang.String, T>[]`. A dotless name that is not a
/// primitive keyword parses as a type variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct DataType {
    pub base: BaseType,
    pub dimensions: u8,
}

impl DataType {
    pub fn primitive(primitive: Primitive) -> Self {
        Self {
            base: BaseType::Primitive(primitive),
            dimensions: 0,
        }
    }

    pub fn void() -> Self {
        Self::primitive(Primitive::Void)
    }

    pub fn declared(name: impl Into<String>) -> Self {
        Self {
            base: BaseType::Declared {
                name: name.into(),
                arguments: Vec::new(),
            },
            dimensions: 0,
        }
    }

    pub fn generic(name: impl Into<String>, arguments: Vec<DataType>) -> Self {
        Self {
            base: BaseType::Declared {
                name: name.into(),
                arguments,
            },
            dimensions: 0,
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            base: BaseType::Variable(name.into()),
            dimensions: 0,
        }
    }

    pub fn wildcard() -> Self {
        Self {
            base: BaseType::Wildcard(None),
            dimensions: 0,
        }
    }

    pub fn array(mut self, dimensions: u8) -> Self {
        self.dimensions = self.dimensions.saturating_add(dimensions);
        self
    }

    pub fn is_void(&self) -> bool {
        self.dimensions == 0 && matches!(self.base, BaseType::Primitive(Primitive::Void))
    }

    pub fn is_primitive(&self) -> bool {
        self.dimensions == 0 && matches!(self.base, BaseType::Primitive(_))
    }

    /// Qualified name of a declared base type.
    pub fn declared_name(&self) -> Option<&str> {
        match &self.base {
            BaseType::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Same type without type arguments, used when comparing signatures.
    pub fn erasure(&self) -> DataType {
        let base = match &self.base {
            BaseType::Declared { name, .. } => BaseType::Declared {
                name: name.clone(),
                arguments: Vec::new(),
            },
            BaseType::Variable(_) | BaseType::Wildcard(_) => BaseType::Declared {
                name: "java.lang.Object".to_string(),
                arguments: Vec::new(),
            },
            other => other.clone(),
        };
        DataType {
            base,
            dimensions: self.dimensions,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            BaseType::Primitive(p) => write!(f, "{}", p.as_str())?,
            BaseType::Declared { name, arguments } => {
                write!(f, "{}", name)?;
                if !arguments.is_empty() {
                    let args: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
            }
            BaseType::Variable(name) => write!(f, "{}", name)?,
            BaseType::Wildcard(None) => write!(f, "?")?,
            BaseType::Wildcard(Some(WildcardBound::Extends(bound))) => {
                write!(f, "? extends {}", bound)?
            }
            BaseType::Wildcard(Some(WildcardBound::Super(bound))) => {
                write!(f, "? super {}", bound)?
            }
        }
        for _ in 0..self.dimensions {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

impl Serialize for DataType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl TryFrom<String> for DataType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { src: s, pos: 0 };
        let ty = parser.data_type()?;
        parser.skip_ws();
        if parser.pos != s.len() {
            return Err(format!(
                "invalid data type '{}': unexpected '{}'",
                s,
                &s[parser.pos..]
            ));
        }
        Ok(ty)
    }
}

/// Recursive-descent parser over the textual form.
struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        self.skip_ws();
        let matched = self.rest().strip_prefix(keyword).is_some_and(|after| {
            after.chars().next().is_none_or(|c| !is_ident_char(c))
        });
        if matched {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn error(&self, expected: &str) -> String {
        format!(
            "invalid data type '{}': expected {} at offset {}",
            self.src, expected, self.pos
        )
    }

    fn name(&mut self) -> Result<String, String> {
        self.skip_ws();
        let start = self.pos;
        let len = self
            .rest()
            .find(|c: char| !(is_ident_char(c) || c == '.'))
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(self.error("a type name"));
        }
        self.pos += len;
        let name = self.src[start..self.pos].to_string();
        if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.error("a well-formed qualified name"));
        }
        Ok(name)
    }

    fn data_type(&mut self) -> Result<DataType, String> {
        let base = if self.eat("?") {
            if self.eat_keyword("extends") {
                BaseType::Wildcard(Some(WildcardBound::Extends(Box::new(self.data_type()?))))
            } else if self.eat_keyword("super") {
                BaseType::Wildcard(Some(WildcardBound::Super(Box::new(self.data_type()?))))
            } else {
                BaseType::Wildcard(None)
            }
        } else {
            let name = self.name()?;
            if let Some(primitive) = Primitive::from_keyword(&name) {
                BaseType::Primitive(primitive)
            } else if self.eat("<") {
                let mut arguments = vec![self.data_type()?];
                while self.eat(",") {
                    arguments.push(self.data_type()?);
                }
                if !self.eat(">") {
                    return Err(self.error("'>'"));
                }
                BaseType::Declared { name, arguments }
            } else if name.contains('.') {
                BaseType::Declared {
                    name,
                    arguments: Vec::new(),
                }
            } else {
                BaseType::Variable(name)
            }
        };
        let mut dimensions = 0u8;
        while self.eat("[") {
            if !self.eat("]") {
                return Err(self.error("']'"));
            }
            dimensions = dimensions.saturating_add(1);
        }
        Ok(DataType { base, dimensions })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
