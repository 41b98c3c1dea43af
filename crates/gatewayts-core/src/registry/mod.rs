//! Schema registry: every declared type and every file to generate.
//!
//! The registry is produced by whatever decoded the protobuf descriptors and
//! is read-only once a generation run starts. It can be built in-process with
//! [`Registry::insert_type`] / [`Registry::add_file`], or loaded from a JSON or
//! YAML dump.
//!
//! # Examples
//!
//! ```no_run
//! use gatewayts_core::registry::Registry;
//! use gatewayts_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let registry = Registry::from_file("registry.json").await?;
//! for file in registry.files() {
//!     println!("{} -> {}", file.name, file.ts_file_name());
//! }
//! # Ok(())
//! # }
//! ```

mod file;
mod imports;

pub use file::{Enum, Field, File, HttpMethod, Message, Method, Service};
pub use imports::{fetch_module_path, Dependency, FETCH_MODULE};

// Internal imports (std, crate)
use std::collections::HashMap;
use std::path::Path;

use crate::{field_name::FieldNamer, url_template::tokenize, Error};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// A use-site reference to a scalar kind or a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Scalar kind (`int64`, `string`, ...) or fully-qualified name starting with `.`
    pub type_name: String,
    #[serde(default)]
    pub is_repeated: bool,
    /// Declared in a different source file than the one being generated
    #[serde(default)]
    pub is_external: bool,
}

impl TypeRef {
    /// Reference to a scalar kind such as `int64`.
    pub fn scalar(kind: impl Into<String>) -> Self {
        Self {
            type_name: kind.into(),
            is_repeated: false,
            is_external: false,
        }
    }

    /// Reference to a declared type. A missing leading `.` is added, so
    /// `named("pkg.Msg")` and `named(".pkg.Msg")` are the same reference.
    pub fn named(fullname: impl Into<String>) -> Self {
        let fullname = fullname.into();
        if fullname.starts_with('.') {
            Self::scalar(fullname)
        } else {
            Self::scalar(format!(".{fullname}"))
        }
    }

    pub fn repeated(mut self) -> Self {
        self.is_repeated = true;
        self
    }

    pub fn external(mut self) -> Self {
        self.is_external = true;
        self
    }

    /// Fully-qualified references start with the package separator.
    pub fn is_qualified(&self) -> bool {
        self.type_name.starts_with('.')
    }
}

/// Registry entry for a declared message, enum or synthetic map entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Fully-qualified name, e.g. ".pkg.Outer.Inner"
    pub fullname: String,
    #[serde(default)]
    pub package: String,
    /// Source file the type is declared in
    pub file: String,
    /// TypeScript identifier used when referenced from its own file
    pub package_identifier: String,
    #[serde(default)]
    pub is_map_entry: bool,
    #[serde(default)]
    pub key_type: Option<TypeRef>,
    #[serde(default)]
    pub value_type: Option<TypeRef>,
}

impl TypeInfo {
    pub fn new(
        fullname: impl Into<String>,
        package: impl Into<String>,
        file: impl Into<String>,
        package_identifier: impl Into<String>,
    ) -> Self {
        Self {
            fullname: fullname.into(),
            package: package.into(),
            file: file.into(),
            package_identifier: package_identifier.into(),
            is_map_entry: false,
            key_type: None,
            value_type: None,
        }
    }

    pub fn map_entry(
        fullname: impl Into<String>,
        package: impl Into<String>,
        file: impl Into<String>,
        key_type: TypeRef,
        value_type: TypeRef,
    ) -> Self {
        let fullname = fullname.into();
        let identifier = fullname.rsplit('.').next().unwrap_or_default().to_string();
        Self {
            is_map_entry: true,
            key_type: Some(key_type),
            value_type: Some(value_type),
            ..Self::new(fullname, package, file, identifier)
        }
    }
}

/// On-disk shape of a registry dump
#[derive(Debug, Deserialize)]
struct RegistryDump {
    #[serde(default)]
    use_proto_names: bool,
    #[serde(default)]
    types: Vec<TypeInfo>,
    #[serde(default)]
    files: Vec<File>,
}

/// Read-only view of the parsed schema for one generation run
#[derive(Debug, Clone, Default)]
pub struct Registry {
    use_proto_names: bool,
    types: HashMap<String, TypeInfo>,
    files: Vec<File>,
}

impl Registry {
    /// Create an empty registry
    pub fn new(use_proto_names: bool) -> Self {
        Self {
            use_proto_names,
            ..Default::default()
        }
    }

    /// Load a registry dump from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            Error::registry(format!(
                "Failed to load registry from {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Parse content as JSON when it is a JSON object, as YAML otherwise
    pub fn parse_content(content: &str) -> crate::Result<Self> {
        let dump: RegistryDump = if content.trim_start().starts_with('{') {
            serde_json::from_str(content)?
        } else {
            serde_yaml::from_str(content)?
        };

        let mut registry = Self::new(dump.use_proto_names);
        for info in dump.types {
            registry.insert_type(info);
        }
        for file in dump.files {
            registry.add_file(file);
        }
        registry.validate()?;
        Ok(registry)
    }

    /// Register a declared type under its fully-qualified name
    pub fn insert_type(&mut self, info: TypeInfo) {
        self.types.insert(info.fullname.clone(), info);
    }

    /// Add a file to generate. Methods without an HTTP annotation are bound to
    /// `POST /<package>.<Service>/<Method>` with the whole request as body.
    pub fn add_file(&mut self, mut file: File) {
        for service in &mut file.services {
            let service_name = if file.package.is_empty() {
                service.name.clone()
            } else {
                format!("{}.{}", file.package, service.name)
            };
            for method in service.methods.iter_mut().filter(|m| m.url.is_empty()) {
                method.url = format!("/{}/{}", service_name, method.name);
                method.http_method = HttpMethod::Post;
                method.http_request_body = None;
            }
        }
        self.files.push(file);
    }

    /// Check the structural invariants the renderer relies on: map entries
    /// carry key and value types, and every HTTP path pattern tokenizes.
    pub fn validate(&self) -> crate::Result<()> {
        for info in self.types.values().filter(|t| t.is_map_entry) {
            if info.key_type.is_none() || info.value_type.is_none() {
                return Err(Error::registry(format!(
                    "map entry '{}' must declare both a key type and a value type",
                    info.fullname
                )));
            }
        }

        let methods = self
            .files
            .iter()
            .flat_map(|f| &f.services)
            .flat_map(|s| &s.methods);
        for method in methods {
            tokenize(&method.url)?;
        }
        Ok(())
    }

    pub fn lookup(&self, fullname: &str) -> Option<&TypeInfo> {
        self.types.get(fullname)
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn use_proto_names(&self) -> bool {
        self.use_proto_names
    }

    /// Override the field naming convention before the run starts
    pub fn set_use_proto_names(&mut self, use_proto_names: bool) {
        self.use_proto_names = use_proto_names;
    }

    /// Field-name normalizer configured for this run
    pub fn field_namer(&self) -> FieldNamer {
        FieldNamer::new(self.use_proto_names)
    }
}
