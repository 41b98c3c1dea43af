//! Code generation entry points

use std::path::Path;
use std::sync::Arc;

use tokio::fs;

use crate::{
    config::Config,
    error::Result,
    registry::{Registry, FETCH_MODULE},
    templates::Renderer,
};

/// A rendered output file, path relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

/// Render every file of the registry plus the shared fetch helper module.
///
/// The first file that fails to render aborts the run.
pub fn generate(registry: Arc<Registry>) -> Result<Vec<GeneratedFile>> {
    let renderer = Renderer::new(Arc::clone(&registry))?;

    let mut generated = Vec::with_capacity(registry.files().len() + 1);
    for file in registry.files() {
        generated.push(GeneratedFile {
            name: file.ts_file_name(),
            content: renderer.render_file(file)?,
        });
    }

    generated.push(GeneratedFile {
        name: format!("{FETCH_MODULE}.ts"),
        content: Renderer::render_fetch_module()?,
    });

    Ok(generated)
}

/// Write generated files below `output_dir`, creating directories as needed
pub async fn write_files<P: AsRef<Path>>(output_dir: P, files: &[GeneratedFile]) -> Result<()> {
    let output_dir = output_dir.as_ref();
    for file in files {
        let path = output_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        log::debug!("Writing {}", path.display());
        fs::write(&path, &file.content).await?;
    }
    Ok(())
}

/// Load the registry named by `config`, render it and write the output.
///
/// Returns the generated files so callers can report what was written.
pub async fn run(config: &Config) -> Result<Vec<GeneratedFile>> {
    let mut registry = Registry::from_file(&config.registry_path).await?;
    if let Some(use_proto_names) = config.use_proto_names {
        registry.set_use_proto_names(use_proto_names);
    }

    let files = generate(Arc::new(registry))?;
    write_files(&config.output_dir, &files).await?;
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{
        fetch_module_path, Field, File, HttpMethod, Message, Method, Service, TypeInfo, TypeRef,
    };
    use tempfile::tempdir;

    /// Output-root path an import specifier written in `from_proto`'s module points at
    fn import_target(from_proto: &str, specifier: &str) -> String {
        let mut parts: Vec<&str> = from_proto.split('/').collect();
        parts.pop();
        for part in specifier.split('/') {
            match part {
                "." => {}
                ".." => {
                    parts.pop();
                }
                _ => parts.push(part),
            }
        }
        format!("{}.ts", parts.join("/"))
    }

    fn registry() -> Registry {
        let mut registry = Registry::new(false);
        registry.insert_type(TypeInfo::new(".echo.Ping", "echo", "echo/v1/echo.proto", "Ping"));
        registry.add_file(File {
            name: "echo/v1/echo.proto".to_string(),
            package: "echo".to_string(),
            messages: vec![Message {
                name: "Ping".to_string(),
                ..Default::default()
            }],
            services: vec![Service {
                name: "Echo".to_string(),
                methods: vec![Method::new(
                    "Say",
                    TypeRef::named(".echo.Ping"),
                    TypeRef::named(".echo.Ping"),
                    HttpMethod::Get,
                    "/v1/echo/{message_id}",
                )],
            }],
            ..Default::default()
        });
        registry
    }

    #[test]
    fn test_generate_includes_fetch_module() -> Result<()> {
        let files = generate(Arc::new(registry()))?;
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["echo/v1/echo.pb.ts", "fetch.pb.ts"]);
        assert!(files[0].content.contains("import * as fm from \"../../fetch.pb\""));
        assert!(files[0]
            .content
            .contains("`/v1/echo/${req[\"messageId\"]}?${fm.renderURLSearchParams(req, [\"messageId\"])}`"));
        Ok(())
    }

    #[test]
    fn test_imports_point_at_generated_files() -> Result<()> {
        let mut registry = registry();
        registry.insert_type(TypeInfo::new(
            ".google.protobuf.Empty",
            "google.protobuf",
            "google/protobuf/empty.proto",
            "Empty",
        ));
        registry.add_file(File {
            name: "google/protobuf/empty.proto".to_string(),
            package: "google.protobuf".to_string(),
            messages: vec![Message {
                name: "Empty".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        });
        registry.add_file(File {
            name: "service.proto".to_string(),
            package: "main".to_string(),
            messages: vec![Message {
                name: "Holder".to_string(),
                fields: vec![
                    Field {
                        name: "empty".to_string(),
                        type_ref: TypeRef::named(".google.protobuf.Empty").external(),
                        one_of_index: None,
                    },
                    Field {
                        name: "ping".to_string(),
                        type_ref: TypeRef::named(".echo.Ping").external(),
                        one_of_index: None,
                    },
                ],
            }],
            ..Default::default()
        });
        let registry = Arc::new(registry);

        let files = generate(Arc::clone(&registry))?;
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();

        let mut checked = 0;
        for file in registry.files() {
            let fetch = fetch_module_path(&file.name);
            assert!(
                names.contains(&import_target(&file.name, &fetch).as_str()),
                "{} imports missing {fetch}",
                file.name
            );
            for dep in registry.dependencies(file) {
                let target = import_target(&file.name, &dep.source_file);
                assert!(names.contains(&target.as_str()), "{} imports missing {target}", file.name);
                checked += 1;
            }
        }
        assert_eq!(checked, 2);

        let service = files.iter().find(|f| f.name == "service.pb.ts").unwrap();
        assert!(service
            .content
            .contains("import * as GoogleProtobufEmpty from \"./google/protobuf/empty.pb\""));
        assert!(service.content.contains("import * as EchoEcho from \"./echo/v1/echo.pb\""));
        Ok(())
    }

    #[test]
    fn test_generate_empty_registry() -> Result<()> {
        let files = generate(Arc::new(Registry::new(false)))?;
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "fetch.pb.ts");
        Ok(())
    }

    #[tokio::test]
    async fn test_write_files_creates_directories() -> Result<()> {
        let dir = tempdir()?;
        let files = generate(Arc::new(registry()))?;
        write_files(dir.path(), &files).await?;

        let written = fs::read_to_string(dir.path().join("echo/v1/echo.pb.ts")).await?;
        assert_eq!(written, files[0].content);
        assert!(dir.path().join("fetch.pb.ts").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_run_applies_proto_names_override() -> Result<()> {
        let dir = tempdir()?;
        let registry_path = dir.path().join("registry.yaml");
        fs::write(
            &registry_path,
            r#"
types:
  - fullname: .echo.Ping
    package: echo
    file: echo.proto
    package_identifier: Ping
files:
  - name: echo.proto
    package: echo
    messages:
      - name: Ping
        fields:
          - name: message_id
            type_ref: { type_name: string }
"#,
        )
        .await?;

        let mut config = Config::new(&registry_path, dir.path().join("out"));
        config.use_proto_names = Some(true);
        let files = run(&config).await?;

        assert_eq!(files.len(), 2);
        let written = fs::read_to_string(dir.path().join("out/echo.pb.ts")).await?;
        assert!(written.contains("message_id?: string"));
        Ok(())
    }
}
