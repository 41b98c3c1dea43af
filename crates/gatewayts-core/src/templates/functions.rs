//! Functions bound into the template engine for one registry.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use serde::de::DeserializeOwned;
use tera::{Context, Tera, Value};

use crate::init_req::build_init_req;
use crate::registry::{Method, Registry, TypeRef};
use crate::resolve::resolve;
use crate::url_template::render_url;

type Args = HashMap<String, Value>;

/// Register `ts_type`, `render_url`, `build_init_req`, `field_name` and
/// `partial` on `tera`.
///
/// `this` must point at the engine being configured; `partial` renders other
/// templates through it.
pub(crate) fn register(tera: &mut Tera, registry: &Arc<Registry>, this: Weak<Tera>) {
    let namer = registry.field_namer();

    let types = Arc::clone(registry);
    tera.register_function("ts_type", move |args: &Args| -> tera::Result<Value> {
        let type_ref: TypeRef = required_arg(args, "ts_type", "ty")?;
        let resolved = resolve(&types, &type_ref);
        match resolved.unmapped() {
            Some(name) => Err(tera::Error::msg(format!("unmapped type `{name}`"))),
            None => Ok(Value::String(resolved.to_string())),
        }
    });

    tera.register_function("render_url", move |args: &Args| -> tera::Result<Value> {
        let method: Method = required_arg(args, "render_url", "method")?;
        render_url(&method, &namer)
            .map(|url| Value::String(url.to_string()))
            .map_err(|e| {
                tera::Error::chain(format!("bad path pattern on method `{}`", method.name), e)
            })
    });

    tera.register_function("build_init_req", |args: &Args| -> tera::Result<Value> {
        let method: Method = required_arg(args, "build_init_req", "method")?;
        Ok(Value::String(build_init_req(&method).to_string()))
    });

    tera.register_function("field_name", move |args: &Args| -> tera::Result<Value> {
        let name: String = required_arg(args, "field_name", "name")?;
        Ok(Value::String(namer.apply(&name)))
    });

    tera.register_function("partial", move |args: &Args| -> tera::Result<Value> {
        let name: String = required_arg(args, "partial", "name")?;
        let data = args.get("data").cloned().unwrap_or(Value::Null);
        let engine = this
            .upgrade()
            .ok_or_else(|| tera::Error::msg("template engine is no longer alive"))?;
        let context = Context::from_value(data)?;
        engine
            .render(&name, &context)
            .map(Value::String)
            .map_err(|e| tera::Error::chain(format!("failed to render partial `{name}`"), e))
    });
}

fn required_arg<T: DeserializeOwned>(args: &Args, function: &str, key: &str) -> tera::Result<T> {
    let value = args
        .get(key)
        .ok_or_else(|| tera::Error::msg(format!("`{function}` requires a `{key}` argument")))?;
    serde_json::from_value(value.clone()).map_err(|e| {
        tera::Error::chain(format!("`{function}` got an invalid `{key}` argument"), e)
    })
}
