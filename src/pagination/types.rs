//! Pagination types
//!
//! Describes where a list response keeps its items and its continuation token.

use serde_json::Value;
use url::Url;

/// Where the next continuation token is found in a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Literal token at a dotted path (e.g. `next.start`)
    Field(String),

    /// URL or URL fragment at a dotted path carrying the token as a query parameter
    HrefQuery {
        /// Dotted path to the href
        path: String,
        /// Query parameter holding the token
        param: String,
    },
}

impl TokenSource {
    /// Token read verbatim from a field
    pub fn field(path: impl Into<String>) -> Self {
        Self::Field(path.into())
    }

    /// Token read from a query parameter of an href
    pub fn href_query(path: impl Into<String>, param: impl Into<String>) -> Self {
        Self::HrefQuery {
            path: path.into(),
            param: param.into(),
        }
    }

    /// Extract the token from a page body
    pub fn extract(&self, body: &Value) -> Option<String> {
        match self {
            Self::Field(path) => extract_path(body, path).and_then(scalar_to_string),
            Self::HrefQuery { path, param } => {
                let href = extract_path(body, path)?.as_str()?;
                query_param(href, param)
            }
        }
    }
}

/// How to page through one list operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    /// Dotted path to the array of items in each page
    pub items_field: String,
    /// Caller-facing name of the parameter that carries the token
    pub token_param: String,
    /// Where the next token comes from
    pub token_source: TokenSource,
}

impl PageSpec {
    /// Create a page spec
    pub fn new(
        items_field: impl Into<String>,
        token_param: impl Into<String>,
        token_source: TokenSource,
    ) -> Self {
        Self {
            items_field: items_field.into(),
            token_param: token_param.into(),
            token_source,
        }
    }
}

/// Lifecycle of a pager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagerState {
    /// More pages are believed to exist
    #[default]
    Active,
    /// The last page has been returned
    Exhausted,
}

/// Follow a dotted path (optionally prefixed with `$.`) through nested objects
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => current = map.get(part)?,
            _ => return None,
        }
    }
    Some(current)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn query_param(href: &str, param: &str) -> Option<String> {
    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://localhost/").ok()?;
            base.join(href).ok()?
        }
        Err(_) => return None,
    };

    url.query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
}
