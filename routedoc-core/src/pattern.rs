//! Route pattern to OpenAPI path template translation.
//!
//! Route patterns are `/`-delimited. A segment declares a parameter with
//! `:name`, optionally followed by a parenthesised matcher (`:id(\d+)`, only
//! meaningful when matching requests) and a trailing `?` marking it optional.
//!
//! OpenAPI has no notion of an optional path segment, so an optional
//! parameter forks the pattern into two templates: one that stops before the
//! parameter and one that carries it.
//!
//! ```
//! use routedoc_core::pattern::translate;
//!
//! let variants = translate("/users/:id?");
//! assert_eq!(variants[0].template, "/users");
//! assert_eq!(variants[1].template, "/users/{id}");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static PARAM_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([A-Za-z0-9_]+)(\([^/)]+\))?(\?)?").expect("parameter pattern is valid")
});

/// A path parameter extracted from a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteParam {
    pub name: String,
    pub required: bool,
}

impl RouteParam {
    pub fn required(name: &str) -> Self {
        Self { name: name.to_string(), required: true }
    }

    pub fn optional(name: &str) -> Self {
        Self { name: name.to_string(), required: false }
    }
}

/// One OpenAPI path template derived from a route pattern, with the
/// parameters it contains in left-to-right order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathVariant {
    pub template: String,
    pub params: Vec<RouteParam>,
}

/// A single segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Param(RouteParam),
}

/// Classify one segment. Anything that does not contain a `:name` match is a
/// literal, including malformed parameter syntax.
pub fn parse_segment(segment: &str) -> Segment<'_> {
    match PARAM_SEGMENT.captures(segment) {
        Some(caps) => Segment::Param(RouteParam {
            name: caps[1].to_string(),
            required: caps.get(3).is_none(),
        }),
        None => Segment::Literal(segment),
    }
}

#[derive(Clone, Default)]
struct PathBuilder {
    segments: Vec<String>,
    params: Vec<RouteParam>,
}

impl PathBuilder {
    fn push_param(&mut self, param: RouteParam) {
        self.segments.push(format!("{{{}}}", param.name));
        self.params.push(param);
    }

    fn finish(self) -> PathVariant {
        PathVariant {
            template: self.segments.join("/"),
            params: self.params,
        }
    }
}

/// Translate a route pattern into its OpenAPI path templates.
///
/// Only the most recently created builder is open. An optional parameter
/// freezes it as the "omitted" variant and opens a copy that carries the
/// parameter, so `k` optional segments yield `k + 1` variants, ordered from
/// shortest to longest.
pub fn translate(pattern: &str) -> Vec<PathVariant> {
    let mut frozen: Vec<PathBuilder> = Vec::new();
    let mut open = PathBuilder::default();

    for segment in pattern.split('/') {
        match parse_segment(segment) {
            Segment::Literal(literal) => open.segments.push(literal.to_string()),
            Segment::Param(param) if param.required => open.push_param(param),
            Segment::Param(param) => {
                let mut present = open.clone();
                present.push_param(param);
                frozen.push(std::mem::replace(&mut open, present));
            }
        }
    }
    frozen.push(open);

    frozen.into_iter().map(PathBuilder::finish).collect()
}
