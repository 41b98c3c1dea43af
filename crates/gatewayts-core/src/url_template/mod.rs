//! Rewriting of HTTP path patterns into TypeScript template-literal URLs.
//!
//! Placeholders become `${req["field"]}` lookups on the request object. For
//! unary-or-server-streaming GET methods the remaining request fields are
//! appended as a query string through the fetch helper.
//!
//! # Examples
//!
//! ```
//! use gatewayts_core::field_name::FieldNamer;
//! use gatewayts_core::registry::{HttpMethod, Method, TypeRef};
//! use gatewayts_core::url_template::render_url;
//!
//! let method = Method::new(
//!     "GetUser",
//!     TypeRef::named(".pkg.GetUserRequest"),
//!     TypeRef::named(".pkg.User"),
//!     HttpMethod::Get,
//!     "/v1/users/{id}",
//! );
//! let url = render_url(&method, &FieldNamer::default()).unwrap();
//! assert_eq!(
//!     url.to_string(),
//!     r#"/v1/users/${req["id"]}?${fm.renderURLSearchParams(req, ["id"])}"#
//! );
//! ```

mod tokenizer;

pub use tokenizer::{tokenize, PathTemplateError, Segment};

use std::fmt;

use ::url::Url;

use crate::field_name::FieldNamer;
use crate::registry::{HttpMethod, Method};

/// Base the substituted path is resolved against to look for a query string
const PARSE_BASE: &str = "http://localhost/";

/// How the query-string helper call is joined onto the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryJoin {
    /// No literal query in the pattern, start one with `?`
    Start,
    /// Pattern already has a literal query, continue it with `&`
    Extend,
}

impl QueryJoin {
    fn separator(&self) -> char {
        match self {
            Self::Start => '?',
            Self::Extend => '&',
        }
    }
}

/// A URL expression ready to be placed inside a TypeScript template literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    /// Pattern with every placeholder replaced by a request field lookup
    pub path: String,
    /// Normalized names of the fields consumed by the path, in order
    pub path_params: Vec<String>,
    /// Query-string helper call to append, if any
    pub query: Option<QueryJoin>,
}

impl UrlTemplate {
    /// The path parameter names as a TypeScript string array literal
    pub fn path_param_list(&self) -> String {
        let quoted: Vec<String> = self
            .path_params
            .iter()
            .map(|name| format!("\"{name}\""))
            .collect();
        format!("[{}]", quoted.join(", "))
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(join) = self.query {
            write!(
                f,
                "{}${{fm.renderURLSearchParams(req, {})}}",
                join.separator(),
                self.path_param_list()
            )?;
        }
        Ok(())
    }
}

/// Build the URL expression for `method`.
///
/// Placeholder names go through `namer` so they match the property names of
/// the generated request type. A pattern that does not parse as a URL after
/// substitution is returned without a query-string append.
pub fn render_url(method: &Method, namer: &FieldNamer) -> Result<UrlTemplate, PathTemplateError> {
    let mut path = String::with_capacity(method.url.len());
    let mut path_params = Vec::new();

    for segment in tokenize(&method.url)? {
        match segment {
            Segment::Literal(text) => path.push_str(text),
            Segment::Placeholder(raw) => {
                let name = namer.apply(raw);
                path.push_str(&format!("${{req[\"{name}\"]}}"));
                path_params.push(name);
            }
        }
    }

    if !path_params.is_empty() {
        log::debug!("url {} consumes path params {:?}", method.url, path_params);
    }

    let mut template = UrlTemplate {
        path,
        path_params,
        query: None,
    };

    if method.client_streaming || method.http_method != HttpMethod::Get {
        return Ok(template);
    }

    match literal_query(&template.path) {
        None => {
            log::debug!(
                "url {} does not parse, leaving it without query parameters",
                template.path
            );
        }
        Some(true) => {
            let trimmed = template.path.trim_end_matches('&').len();
            template.path.truncate(trimmed);
            template.query = Some(QueryJoin::Extend);
        }
        Some(false) => template.query = Some(QueryJoin::Start),
    }

    Ok(template)
}

/// Whether `url` already carries a non-empty query; `None` if it is not a valid URL.
///
/// The `url` crate repairs control bytes and stray `%` signs instead of
/// rejecting them, so both are treated as malformed before parsing.
fn literal_query(url: &str) -> Option<bool> {
    if url.bytes().any(|b| b.is_ascii_control()) || has_bad_escape(url) {
        return None;
    }
    let base = Url::parse(PARSE_BASE).ok()?;
    let parsed = base.join(url).ok()?;
    Some(parsed.query().is_some_and(|query| !query.is_empty()))
}

/// A `%` not followed by two hex digits.
fn has_bad_escape(url: &str) -> bool {
    let bytes = url.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !matches!(
                bytes.get(i + 1..i + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRef;

    fn method(verb: HttpMethod, url: &str) -> Method {
        Method::new(
            "Call",
            TypeRef::named(".pkg.Request"),
            TypeRef::named(".pkg.Response"),
            verb,
            url,
        )
    }

    fn render(method: &Method) -> String {
        render_url(method, &FieldNamer::default()).unwrap().to_string()
    }

    #[test]
    fn test_get_appends_query_helper() {
        assert_eq!(
            render(&method(HttpMethod::Get, "/v1/users/{id}")),
            r#"/v1/users/${req["id"]}?${fm.renderURLSearchParams(req, ["id"])}"#
        );
    }

    #[test]
    fn test_get_extends_literal_query() {
        assert_eq!(
            render(&method(HttpMethod::Get, "/v1/users/{id}?active=true")),
            r#"/v1/users/${req["id"]}?active=true&${fm.renderURLSearchParams(req, ["id"])}"#
        );
        assert_eq!(
            render(&method(HttpMethod::Get, "/v1/users?active=true&&")),
            r#"/v1/users?active=true&${fm.renderURLSearchParams(req, [])}"#
        );
    }

    #[test]
    fn test_empty_query_marker_is_not_a_query() {
        assert_eq!(
            render(&method(HttpMethod::Get, "/v1/users?")),
            r#"/v1/users??${fm.renderURLSearchParams(req, [])}"#
        );
    }

    #[test]
    fn test_pattern_without_placeholders_is_unchanged() {
        for verb in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch, HttpMethod::Delete] {
            assert_eq!(render(&method(verb, "/v1/users:batch")), "/v1/users:batch");
        }
        let template = render_url(&method(HttpMethod::Get, "/v1/users"), &FieldNamer::default())
            .unwrap();
        assert_eq!(template.path, "/v1/users");
        assert!(template.path_params.is_empty());
        assert_eq!(template.query, Some(QueryJoin::Start));
    }

    #[test]
    fn test_non_get_only_substitutes() {
        assert_eq!(
            render(&method(HttpMethod::Post, "/v1/{parent}/items/{item_id}")),
            r#"/v1/${req["parent"]}/items/${req["itemId"]}"#
        );
    }

    #[test]
    fn test_field_name_normalization() {
        let get = method(HttpMethod::Get, "/v1/users/{user_id}");
        let camel = render_url(&get, &FieldNamer::new(false)).unwrap();
        assert_eq!(camel.path, r#"/v1/users/${req["userId"]}"#);
        assert_eq!(camel.path_param_list(), r#"["userId"]"#);

        let verbatim = render_url(&get, &FieldNamer::new(true)).unwrap();
        assert_eq!(verbatim.path, r#"/v1/users/${req["user_id"]}"#);
        assert_eq!(verbatim.path_param_list(), r#"["user_id"]"#);
    }

    #[test]
    fn test_client_streaming_get_has_no_query() {
        let streaming = method(HttpMethod::Get, "/v1/users/{id}").client_streaming();
        assert_eq!(render(&streaming), r#"/v1/users/${req["id"]}"#);

        let streaming = method(HttpMethod::Get, "/v1/users").client_streaming();
        assert_eq!(render(&streaming), "/v1/users");
    }

    #[test]
    fn test_server_streaming_get_keeps_query() {
        let streaming = method(HttpMethod::Get, "/v1/feed/{topic}").server_streaming();
        assert_eq!(
            render(&streaming),
            r#"/v1/feed/${req["topic"]}?${fm.renderURLSearchParams(req, ["topic"])}"#
        );
    }

    #[test]
    fn test_multiple_params_are_listed_in_order() {
        assert_eq!(
            render(&method(HttpMethod::Get, "/v1/{shelf}/books/{book_id}")),
            r#"/v1/${req["shelf"]}/books/${req["bookId"]}?${fm.renderURLSearchParams(req, ["shelf", "bookId"])}"#
        );
    }

    #[test]
    fn test_unparseable_url_falls_back() {
        assert_eq!(
            render(&method(HttpMethod::Get, "//[oops/{id}")),
            r#"//[oops/${req["id"]}"#
        );
    }

    #[test]
    fn test_bad_escape_falls_back() {
        assert_eq!(
            render(&method(HttpMethod::Get, "/v1/100%zz/{id}")),
            r#"/v1/100%zz/${req["id"]}"#
        );
        assert_eq!(
            render(&method(HttpMethod::Get, "/v1/100%/{id}")),
            r#"/v1/100%/${req["id"]}"#
        );
    }

    #[test]
    fn test_control_byte_falls_back() {
        assert_eq!(
            render(&method(HttpMethod::Get, "/v1/a\tb/{id}")),
            "/v1/a\tb/${req[\"id\"]}"
        );
    }

    #[test]
    fn test_valid_escape_keeps_query() {
        assert_eq!(
            render(&method(HttpMethod::Get, "/v1/a%2Fb/{id}")),
            r#"/v1/a%2Fb/${req["id"]}?${fm.renderURLSearchParams(req, ["id"])}"#
        );
    }

    #[test]
    fn test_bad_braces_are_errors() {
        let err = render_url(&method(HttpMethod::Get, "/v1/{}"), &FieldNamer::default());
        assert!(matches!(err, Err(PathTemplateError::EmptyPlaceholder { .. })));
    }
}
