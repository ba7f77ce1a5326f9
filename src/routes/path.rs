use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern a `{name}` path component must match in full.
pub const DYNAMIC_SEGMENT_PATTERN: &str = r"^\{[a-z]\w*\}$";

static DYNAMIC_SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DYNAMIC_SEGMENT_PATTERN).expect("dynamic segment pattern compiles"));

/// A declared path classified into its static prefix and trailing dynamic run.
///
/// `dynamic_offset` is the index of the first dynamic component within the
/// slash-trimmed segment list, which by construction equals the static prefix
/// length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    pub static_segments: Vec<String>,
    pub dynamic_params: Vec<String>,
    pub dynamic_offset: usize,
}

impl PathPattern {
    /// The path this route is registered under with the HTTP listener: the
    /// static prefix only, trailing-slash-terminated when the route has
    /// dynamic components, otherwise the full normalized path.
    ///
    /// `/foo/bar/{baz}/{biff}` -> `/foo/bar/`, `/foo/bar` -> `/foo/bar`,
    /// `/` -> `/`.
    #[must_use]
    pub fn mount_path(&self) -> String {
        if self.static_segments.is_empty() {
            return "/".to_string();
        }
        if self.dynamic_params.is_empty() {
            format!("/{}", self.static_segments.join("/"))
        } else {
            format!("/{}/", self.static_segments.join("/"))
        }
    }
}

/// Classify a declared path into static and dynamic components.
///
/// A component of the form `{name}` is dynamic; its inner name must start
/// with a lowercase letter. Dynamic components are only legal as a trailing
/// run: a static component after a dynamic one is malformed. Empty components
/// from leading, trailing or doubled slashes are skipped.
pub fn analyze(path: &str) -> Result<PathPattern, ConfigError> {
    let mut static_segments: Vec<String> = Vec::new();
    let mut dynamic_params: Vec<String> = Vec::new();
    for segment in path.split('/') {
        if segment.is_empty() {
            continue;
        }
        if segment.starts_with('{') && segment.ends_with('}') {
            if !DYNAMIC_SEGMENT_RE.is_match(segment) {
                return Err(ConfigError::MalformedPath {
                    path: path.to_string(),
                    reason: format!(
                        "dynamic segments must match pattern '{}'",
                        DYNAMIC_SEGMENT_PATTERN
                    ),
                });
            }
            let name = segment.trim_start_matches('{').trim_end_matches('}');
            dynamic_params.push(name.to_string());
        } else if !dynamic_params.is_empty() {
            return Err(ConfigError::MalformedPath {
                path: path.to_string(),
                reason: format!("static segment '{}' follows a dynamic segment", segment),
            });
        } else {
            static_segments.push(segment.to_string());
        }
    }
    let dynamic_offset = static_segments.len();
    Ok(PathPattern {
        static_segments,
        dynamic_params,
        dynamic_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_static_only() {
        let p = analyze("/foo/bar").unwrap();
        assert_eq!(p.static_segments, vec!["foo", "bar"]);
        assert!(p.dynamic_params.is_empty());
        assert_eq!(p.mount_path(), "/foo/bar");
    }

    #[test]
    fn test_analyze_trailing_dynamics() {
        let p = analyze("/foo/bar/{baz}/{biff}").unwrap();
        assert_eq!(p.static_segments, vec!["foo", "bar"]);
        assert_eq!(p.dynamic_params, vec!["baz", "biff"]);
        assert_eq!(p.dynamic_offset, 2);
        assert_eq!(p.mount_path(), "/foo/bar/");
    }

    #[test]
    fn test_analyze_rejects_static_after_dynamic() {
        assert!(analyze("/foo/{bar}/baz").is_err());
    }

    #[test]
    fn test_analyze_rejects_bad_dynamic_name() {
        assert!(analyze("/foo/{9adf}").is_err());
        assert!(analyze("/foo/{*&4adf}").is_err());
    }

    #[test]
    fn test_root_mount_path() {
        assert_eq!(analyze("/").unwrap().mount_path(), "/");
    }
}
