//! Template-specific context types for code generation

use serde::Serialize;

use crate::registry::{fetch_module_path, Dependency, Enum, Field, File, Message, Registry, Service};

/// Everything the `file` template and its partials see under `file`
#[derive(Debug, Clone, Serialize)]
pub struct FileView<'a> {
    pub name: &'a str,
    pub ts_file_name: String,
    /// Relative import path of the fetch helper module
    pub fetch_module: String,
    pub dependencies: Vec<Dependency>,
    /// Emit the `Absent` / `OneOf` helper types
    pub needs_one_of: bool,
    pub enums: &'a [Enum],
    pub messages: Vec<MessageView<'a>>,
    pub services: &'a [Service],
}

impl<'a> FileView<'a> {
    pub fn new(registry: &Registry, file: &'a File) -> Self {
        Self {
            name: &file.name,
            ts_file_name: file.ts_file_name(),
            fetch_module: fetch_module_path(&file.name),
            dependencies: registry.dependencies(file),
            needs_one_of: file.has_one_of_fields(),
            enums: &file.enums,
            messages: file.messages.iter().map(MessageView::from).collect(),
            services: &file.services,
        }
    }
}

/// A message with its oneof members split out of the plain field list
#[derive(Debug, Clone, Serialize)]
pub struct MessageView<'a> {
    pub name: &'a str,
    /// Fields outside any oneof
    pub fields: Vec<&'a Field>,
    pub has_one_of: bool,
    pub one_of_groups: Vec<Vec<&'a Field>>,
}

impl<'a> From<&'a Message> for MessageView<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            name: &message.name,
            fields: message.non_one_of_fields(),
            has_one_of: message.has_one_of_fields(),
            one_of_groups: message.one_of_groups(),
        }
    }
}
