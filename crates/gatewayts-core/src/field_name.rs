//! Field name normalization shared by message rendering and URL templating.

use crate::utils::to_lower_camel_case;

/// Renders declared field names either verbatim or as lowerCamelCase.
///
/// Every place that turns a field name into a JSON property key goes through
/// the same namer, so path parameters and object properties always agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldNamer {
    use_proto_names: bool,
}

impl FieldNamer {
    pub fn new(use_proto_names: bool) -> Self {
        Self { use_proto_names }
    }

    pub fn use_proto_names(&self) -> bool {
        self.use_proto_names
    }

    pub fn apply(&self, name: &str) -> String {
        if self.use_proto_names {
            name.to_string()
        } else {
            to_lower_camel_case(name)
        }
    }
}
