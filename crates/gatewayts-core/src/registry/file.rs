//! Per-file declarations walked by the templates.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::TypeRef;

/// One `.proto` source file and everything it declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Path of the source file as passed to the compiler (e.g. "pkg/service.proto")
    pub name: String,
    /// Protobuf package, possibly empty
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub enums: Vec<Enum>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl File {
    /// Name of the generated TypeScript module, e.g. "pkg/service.pb.ts"
    pub fn ts_file_name(&self) -> String {
        format!("{}.ts", module_path(&self.name))
    }

    /// Every type reference appearing in fields or method signatures.
    pub fn type_refs(&self) -> impl Iterator<Item = &TypeRef> {
        let fields = self
            .messages
            .iter()
            .flat_map(|m| m.fields.iter().map(|f| &f.type_ref));
        let methods = self
            .services
            .iter()
            .flat_map(|s| s.methods.iter().flat_map(|m| [&m.input, &m.output]));
        fields.chain(methods)
    }

    pub fn has_one_of_fields(&self) -> bool {
        self.messages.iter().any(Message::has_one_of_fields)
    }
}

/// Strip the `.proto` extension, leaving the import path of the generated module
/// minus its `.ts` suffix.
pub(crate) fn module_path(proto_file: &str) -> String {
    let stem = proto_file.strip_suffix(".proto").unwrap_or(proto_file);
    format!("{stem}.pb")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Message {
    pub fn has_one_of_fields(&self) -> bool {
        self.fields.iter().any(|f| f.one_of_index.is_some())
    }

    /// Fields that are not members of any oneof, in declaration order.
    pub fn non_one_of_fields(&self) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| f.one_of_index.is_none())
            .collect()
    }

    /// Oneof members grouped by oneof index, groups ordered by index.
    pub fn one_of_groups(&self) -> Vec<Vec<&Field>> {
        let mut groups: BTreeMap<u32, Vec<&Field>> = BTreeMap::new();
        for field in &self.fields {
            if let Some(index) = field.one_of_index {
                groups.entry(index).or_default().push(field);
            }
        }
        groups.into_values().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name exactly as declared in the schema
    pub name: String,
    pub type_ref: TypeRef,
    /// Index of the enclosing oneof, if the field belongs to one
    #[serde(default)]
    pub one_of_index: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
}

/// HTTP verbs a method can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An RPC method together with its HTTP binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub input: TypeRef,
    pub output: TypeRef,
    /// HTTP path pattern, may contain `{field}` placeholders.
    /// Empty means the method carries no HTTP annotation.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub http_method: HttpMethod,
    /// `None` or `"*"`: whole request is the body, `""`: no body,
    /// anything else: only that request field is the body.
    #[serde(default)]
    pub http_request_body: Option<String>,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
}

impl Method {
    /// A method bound to `verb url`, non-streaming, with no body selector.
    pub fn new(
        name: impl Into<String>,
        input: TypeRef,
        output: TypeRef,
        http_method: HttpMethod,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            url: url.into(),
            http_method,
            http_request_body: None,
            client_streaming: false,
            server_streaming: false,
        }
    }

    pub fn with_body(mut self, selector: impl Into<String>) -> Self {
        self.http_request_body = Some(selector.into());
        self
    }

    pub fn client_streaming(mut self) -> Self {
        self.client_streaming = true;
        self
    }

    pub fn server_streaming(mut self) -> Self {
        self.server_streaming = true;
        self
    }
}
