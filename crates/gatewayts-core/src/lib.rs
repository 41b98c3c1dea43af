//! gatewayts Core Library
//!
//! This library turns a protobuf schema registry with HTTP bindings into
//! TypeScript client modules plus the fetch helper module they import.

pub mod config;
pub mod error;
pub mod field_name;
pub mod generate;
pub mod init_req;
pub mod registry;
pub mod resolve;
pub mod templates;
pub mod url_template;
pub mod utils;

pub use crate::{
    config::Config,
    error::{Error, Result},
    field_name::FieldNamer,
    generate::{generate, run, write_files, GeneratedFile},
    init_req::{build_init_req, RequestInit},
    registry::{Registry, TypeInfo, TypeRef},
    resolve::{resolve, TsType},
    templates::Renderer,
    url_template::{render_url, UrlTemplate},
};
