//! Mapping of protobuf types to TypeScript type expressions.
//!
//! [`resolve`] builds a [`TsType`] tree; its `Display` impl is the only place
//! that decides how the expression is spelled.

use std::fmt;

use crate::registry::{Registry, TypeRef};
use crate::utils::to_upper_camel_case;

/// Scalar TypeScript types protobuf scalars collapse to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    String,
    Number,
    Boolean,
    Bytes,
}

impl Scalar {
    /// Map a protobuf scalar kind; `None` for anything not in the table.
    ///
    /// 64-bit integers become `string`: a JS number cannot hold them exactly.
    pub fn from_proto(kind: &str) -> Option<Self> {
        match kind {
            "uint64" | "sint64" | "int64" | "fixed64" | "sfixed64" | "string" => Some(Self::String),
            "float" | "double" | "int32" | "sint32" | "uint32" | "fixed32" | "sfixed32" => {
                Some(Self::Number)
            }
            "bool" => Some(Self::Boolean),
            "bytes" => Some(Self::Bytes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Bytes => "Uint8Array",
        }
    }
}

/// A resolved TypeScript type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    Scalar(Scalar),
    /// Declared in the file being generated
    Local(String),
    /// Declared in another file, reached through its module import
    External { module: String, identifier: String },
    /// `{[key: K]: V}`
    Map { key: Box<TsType>, value: Box<TsType> },
    Array(Box<TsType>),
    /// Nothing in the scalar table or the registry matched; renders empty
    Unmapped(String),
}

impl TsType {
    /// Name of the first type that could not be mapped, searching nested types.
    pub fn unmapped(&self) -> Option<&str> {
        match self {
            Self::Unmapped(name) => Some(name),
            Self::Map { key, value } => key.unmapped().or_else(|| value.unmapped()),
            Self::Array(inner) => inner.unmapped(),
            Self::Scalar(_) | Self::Local(_) | Self::External { .. } => None,
        }
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => f.write_str(scalar.as_str()),
            Self::Local(identifier) => f.write_str(identifier),
            Self::External { module, identifier } => write!(f, "{module}.{identifier}"),
            Self::Map { key, value } => write!(f, "{{[key: {key}]: {value}}}"),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::Unmapped(_) => Ok(()),
        }
    }
}

/// Resolve a use-site type reference against the registry.
///
/// Map entries are declared `repeated` in descriptors; they resolve to an
/// index signature and never get an array suffix.
pub fn resolve(registry: &Registry, type_ref: &TypeRef) -> TsType {
    let info = registry.lookup(&type_ref.type_name);

    if let Some(info) = info.filter(|i| i.is_map_entry) {
        if let (Some(key), Some(value)) = (&info.key_type, &info.value_type) {
            return TsType::Map {
                key: Box::new(resolve(registry, key)),
                value: Box::new(resolve(registry, value)),
            };
        }
    }

    let resolved = if !type_ref.is_qualified() {
        Scalar::from_proto(&type_ref.type_name)
            .map(TsType::Scalar)
            .unwrap_or_else(|| TsType::Unmapped(type_ref.type_name.clone()))
    } else {
        match info {
            None => TsType::Unmapped(type_ref.type_name.clone()),
            Some(info) if !type_ref.is_external => TsType::Local(info.package_identifier.clone()),
            Some(info) => TsType::External {
                module: module_name(&info.package, &info.file),
                identifier: info.package_identifier.clone(),
            },
        }
    };

    if type_ref.is_repeated {
        TsType::Array(Box::new(resolved))
    } else {
        resolved
    }
}

/// Identifier under which a file's generated module is imported.
///
/// UpperCamelCase package segments followed by the UpperCamelCase file stem:
/// `google.protobuf` + `google/protobuf/empty.proto` gives `GoogleProtobufEmpty`.
pub fn module_name(package: &str, file: &str) -> String {
    let base = file.rsplit('/').next().unwrap_or(file);
    let stem = match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => base,
    };

    let mut name: String = package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(to_upper_camel_case)
        .collect();
    name.push_str(&to_upper_camel_case(stem));
    name
}
