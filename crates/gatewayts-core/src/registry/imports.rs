//! Import lines a generated module needs: its external types and the fetch helper.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{file::module_path, File, Registry, TypeRef};
use crate::resolve::module_name;

/// Import path (relative to the output root, without `.ts`) of the runtime helper module
pub const FETCH_MODULE: &str = "fetch.pb";

/// `import * as <module_identifier> from "<source_file>"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub module_identifier: String,
    pub source_file: String,
}

impl Registry {
    /// Imports needed by `file`, one per external module, sorted by identifier.
    pub fn dependencies(&self, file: &File) -> Vec<Dependency> {
        let mut modules = BTreeMap::new();
        for type_ref in file.type_refs() {
            self.collect_external(&file.name, type_ref, &mut modules);
        }
        modules
            .into_iter()
            .map(|(module_identifier, source_file)| Dependency {
                module_identifier,
                source_file,
            })
            .collect()
    }

    fn collect_external(
        &self,
        from_file: &str,
        type_ref: &TypeRef,
        modules: &mut BTreeMap<String, String>,
    ) {
        let Some(info) = self.lookup(&type_ref.type_name) else {
            return;
        };

        if info.is_map_entry {
            for inner in [&info.key_type, &info.value_type].into_iter().flatten() {
                self.collect_external(from_file, inner, modules);
            }
            return;
        }

        if type_ref.is_external {
            modules
                .entry(module_name(&info.package, &info.file))
                .or_insert_with(|| relative_import(from_file, &module_path(&info.file)));
        }
    }
}

/// Import path of the fetch helper as seen from the module generated for `proto_file`
pub fn fetch_module_path(proto_file: &str) -> String {
    relative_import(proto_file, FETCH_MODULE)
}

/// Relative ES module specifier from the module generated for `from_proto`
/// to `to_module` (a path relative to the output root).
pub(crate) fn relative_import(from_proto: &str, to_module: &str) -> String {
    let from_dirs: Vec<&str> = from_proto.split('/').collect();
    let from_dirs = &from_dirs[..from_dirs.len() - 1];
    let to_parts: Vec<&str> = to_module.split('/').collect();
    let to_dirs = &to_parts[..to_parts.len() - 1];

    let common = from_dirs
        .iter()
        .zip(to_dirs)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dirs.len() - common;
    let rest = to_parts[common..].join("/");
    if ups == 0 {
        format!("./{rest}")
    } else {
        format!("{}{rest}", "../".repeat(ups))
    }
}
