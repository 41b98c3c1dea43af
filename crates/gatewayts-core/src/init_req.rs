//! Request-options object literal for a method call.

use std::fmt;

use crate::registry::{HttpMethod, Method};

/// Selector value meaning "the whole request is the body"
const WHOLE_REQUEST: &str = "*";

/// What gets serialized into the HTTP body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    WholeRequest,
    /// Only the named request field, used as given in the binding
    Field(String),
}

/// Field list of the `RequestInit` literal passed to the fetch helper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInit {
    pub method: HttpMethod,
    pub body: Option<Body>,
}

impl fmt::Display for RequestInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "method: \"{}\"", self.method)?;
        match &self.body {
            Some(Body::WholeRequest) => f.write_str(", body: JSON.stringify(req)"),
            Some(Body::Field(name)) => write!(f, ", body: JSON.stringify(req[\"{name}\"])"),
            None => Ok(()),
        }
    }
}

pub fn build_init_req(method: &Method) -> RequestInit {
    let body = match method.http_request_body.as_deref() {
        None | Some(WHOLE_REQUEST) => Some(Body::WholeRequest),
        Some("") => None,
        Some(field) => Some(Body::Field(field.to_string())),
    };
    RequestInit {
        method: method.http_method,
        body,
    }
}
