//! Type descriptor resolution.
//!
//! Maps the runtime type hints found in an options-style `props` object
//! (`String`, `[Number, String]`, `Object as PropType<Foo>`, ...) to the
//! static type written into the generated `Props` alias. Resolution is
//! total: every hint maps to some type, falling back to a reference of the
//! same name or to `unknown`.

use compact_str::CompactString;
use phf::phf_map;
use std::fmt;

/// TypeScript keyword types a constructor can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    String,
    Number,
    Boolean,
    /// `any[]`
    AnyArray,
    /// `object`
    Object,
    Unknown,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::String => "string",
            Keyword::Number => "number",
            Keyword::Boolean => "boolean",
            Keyword::AnyArray => "any[]",
            Keyword::Object => "object",
            Keyword::Unknown => "unknown",
        }
    }
}

/// Static type handle of a prop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Keyword(Keyword),
    /// Reference to a caller-visible type name (`Date`, `Foo`, `ns.Foo`)
    Reference(CompactString),
    Union(Vec<TypeDescriptor>),
    /// Type annotation copied verbatim from the source
    Node(CompactString),
}

impl TypeDescriptor {
    pub fn unknown() -> Self {
        TypeDescriptor::Keyword(Keyword::Unknown)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Keyword(keyword) => f.write_str(keyword.as_str()),
            TypeDescriptor::Reference(name) | TypeDescriptor::Node(name) => f.write_str(name),
            TypeDescriptor::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}

/// A runtime type hint, as classified from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// A fully formed type annotation (source text); used as-is
    Node(CompactString),
    /// A type name taken from a type position; always a reference
    Identifier(CompactString),
    /// A list of constructor names
    Names(Vec<CompactString>),
    /// A single constructor name
    Name(CompactString),
    Absent,
}

/// What a built-in constructor stands for at the type level.
#[derive(Debug, Clone, Copy)]
enum ConstructorType {
    Keyword(Keyword),
    SameNamedReference,
}

static CONSTRUCTOR_TYPES: phf::Map<&'static str, ConstructorType> = phf_map! {
    "String" => ConstructorType::Keyword(Keyword::String),
    "Number" => ConstructorType::Keyword(Keyword::Number),
    "Boolean" => ConstructorType::Keyword(Keyword::Boolean),
    "Array" => ConstructorType::Keyword(Keyword::AnyArray),
    "Object" => ConstructorType::Keyword(Keyword::Object),
    "Date" => ConstructorType::SameNamedReference,
    "Function" => ConstructorType::SameNamedReference,
    "Symbol" => ConstructorType::SameNamedReference,
};

/// Resolve a type hint to a type descriptor.
pub fn resolve(hint: TypeHint) -> TypeDescriptor {
    match hint {
        TypeHint::Node(text) => TypeDescriptor::Node(text),
        TypeHint::Identifier(name) => TypeDescriptor::Reference(name),
        TypeHint::Names(names) => {
            let mut members: Vec<TypeDescriptor> =
                names.into_iter().map(resolve_constructor).collect();
            match members.len() {
                0 => TypeDescriptor::unknown(),
                1 => members.remove(0),
                _ => TypeDescriptor::Union(members),
            }
        }
        TypeHint::Name(name) => resolve_constructor(name),
        TypeHint::Absent => TypeDescriptor::unknown(),
    }
}

/// Table lookup for a constructor name; unmapped names become references.
fn resolve_constructor(name: CompactString) -> TypeDescriptor {
    match CONSTRUCTOR_TYPES.get(name.as_str()) {
        Some(ConstructorType::Keyword(keyword)) => TypeDescriptor::Keyword(*keyword),
        Some(ConstructorType::SameNamedReference) | None => TypeDescriptor::Reference(name),
    }
}
