//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse patterns such as `/pacijenti/:id/pregledi` into segments
//! - Match a location path against a pattern, capturing named parameters
//! - Render a pattern back into a path for link generation
//!
//! # Design Decisions
//! - Static segments compare case-sensitively
//! - A parameter captures exactly one non-empty segment
//! - Query string and fragment are ignored when matching
//! - One trailing slash on the location is tolerated
//! - No regex; matching is a single pass over the segments

use crate::routing::router::RouteError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// Named parameters captured from a matched path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// A compiled route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. It must start with `/`; parameters are `:name`.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let mut segments = Vec::new();
        for part in split_segments(pattern) {
            if part.is_empty() {
                return Err(invalid("empty segment"));
            }
            match part.strip_prefix(':') {
                Some("") => return Err(invalid("parameter without a name")),
                Some(name) => {
                    if segments.contains(&Segment::Param(name.to_string())) {
                        return Err(invalid("duplicate parameter name"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(part.to_string())),
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the parameters in pattern order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Structural key: segments joined with every parameter name erased.
    ///
    /// Two patterns with the same shape match exactly the same locations.
    pub fn shape(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Static(s) => format!("/{s}"),
                Segment::Param(_) => "/:".to_string(),
            })
            .collect()
    }

    /// Match a location, returning the captured parameters.
    pub fn matches(&self, location: &str) -> Option<Params> {
        let path = strip_query_and_fragment(location);
        if !path.starts_with('/') {
            return None;
        }

        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) => {
                    if expected != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let value = urlencoding::decode(part).ok()?;
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }
        Some(params)
    }

    /// Build a concrete path from parameter values. Extra values are ignored.
    pub fn render(&self, params: &Params) -> Result<String, RouteError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| RouteError::MissingParam {
                            pattern: self.raw.clone(),
                            param: name.clone(),
                        })?;
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }
        Ok(path)
    }
}

fn strip_query_and_fragment(location: &str) -> &str {
    match location.find(['?', '#']) {
        Some(idx) => &location[..idx],
        None => location,
    }
}

/// Segments after the leading slash; `/` has none and one trailing slash is dropped.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pattern() {
        let p = PathPattern::parse("/").unwrap();
        assert_eq!(p.matches("/"), Some(Params::new()));
        assert_eq!(p.matches("/?tab=2"), Some(Params::new()));
        assert_eq!(p.matches("/pacijenti"), None);
    }

    #[test]
    fn test_param_capture() {
        let p = PathPattern::parse("/pacijenti/:id/pregledi").unwrap();
        let params = p.matches("/pacijenti/42/pregledi").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.len(), 1);

        assert!(p.matches("/pacijenti/42/pregledi/").is_some());
        assert!(p.matches("/pacijenti/42/pregledi#top").is_some());
        assert_eq!(p.matches("/pacijenti//pregledi"), None);
        assert_eq!(p.matches("/pacijenti/42/recepti"), None);
        assert_eq!(p.matches("/pacijenti/42"), None);
        assert_eq!(p.matches("pacijenti/42/pregledi"), None);
    }

    #[test]
    fn test_static_segments_are_case_sensitive() {
        let p = PathPattern::parse("/pacijenti/:id/recepti").unwrap();
        assert_eq!(p.matches("/Pacijenti/1/recepti"), None);
    }

    #[test]
    fn test_param_is_percent_decoded() {
        let p = PathPattern::parse("/pacijenti/:id/recepti").unwrap();
        let params = p.matches("/pacijenti/a%20b/recepti").unwrap();
        assert_eq!(params.get("id"), Some("a b"));
    }

    #[test]
    fn test_invalid_patterns() {
        for bad in ["pacijenti", "/a//b", "/a/:", "/:id/x/:id"] {
            assert!(
                matches!(PathPattern::parse(bad), Err(RouteError::InvalidPattern { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_render() {
        let p = PathPattern::parse("/pacijenti/:id/povijest-bolesti").unwrap();
        let params: Params = [("id", "7")].into_iter().collect();
        assert_eq!(p.render(&params).unwrap(), "/pacijenti/7/povijest-bolesti");

        let params: Params = [("id", "a/b")].into_iter().collect();
        assert_eq!(p.render(&params).unwrap(), "/pacijenti/a%2Fb/povijest-bolesti");

        let err = p.render(&Params::new()).unwrap_err();
        assert!(matches!(err, RouteError::MissingParam { ref param, .. } if param == "id"));

        assert_eq!(PathPattern::parse("/").unwrap().render(&Params::new()).unwrap(), "/");
    }

    #[test]
    fn test_render_then_match() {
        let p = PathPattern::parse("/pacijenti/:id/recepti").unwrap();
        let params: Params = [("id", "Ana Horvat")].into_iter().collect();
        let path = p.render(&params).unwrap();
        assert_eq!(p.matches(&path), Some(params));
    }

    #[test]
    fn test_shape_ignores_param_names_and_trailing_slash() {
        let shape = |p: &str| PathPattern::parse(p).unwrap().shape();
        assert_eq!(shape("/pacijenti/:id/recepti"), "/pacijenti/:/recepti");
        assert_eq!(shape("/pacijenti/:pid/recepti"), "/pacijenti/:/recepti");
        assert_eq!(shape("/pacijenti/:id/recepti/"), "/pacijenti/:/recepti");
        assert_ne!(shape("/pacijenti/novi/recepti"), "/pacijenti/:/recepti");
        assert_eq!(shape("/"), "/");
    }

    #[test]
    fn test_params_insert_replaces() {
        let mut params = Params::new();
        params.insert("id", "1");
        params.insert("id", "2");
        assert_eq!(params.get("id"), Some("2"));
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("id", "2")]);
    }
}
