use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One route descriptor as it appears in the YAML route source.
///
/// Every field is optional in the source; defaults are resolved by the
/// compiler, not here, so that "unspecified" stays distinguishable from an
/// explicit empty value.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDoc {
    #[serde(default)]
    pub methods: Vec<String>,
    /// Parameter bodies may be null (`bar:`), which means "all defaults".
    #[serde(default)]
    pub params: HashMap<String, Option<ParamDoc>>,
    #[serde(default)]
    pub callbacks: Vec<String>,
}

/// One parameter declaration. `source` is a `|`-delimited list of
/// `url`/`form`/`query` tokens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParamDoc {
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub regex: Option<String>,
    pub required: Option<bool>,
    pub source: Option<String>,
}

/// Deserialize a route source document: a mapping from declared path to
/// [`RouteDoc`]. Path and route validation happen later, at table build.
pub fn load_routes_str(yaml: &str) -> Result<HashMap<String, RouteDoc>, ConfigError> {
    let docs: HashMap<String, RouteDoc> = serde_yaml::from_str(yaml)?;
    Ok(docs)
}

/// Read and deserialize a route source file.
pub fn load_routes_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, RouteDoc>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_routes_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_route() {
        let docs = load_routes_str("/:\n  callbacks:\n    - single\n").unwrap();
        assert_eq!(docs.len(), 1);
        let doc = &docs["/"];
        assert!(doc.methods.is_empty());
        assert!(doc.params.is_empty());
        assert_eq!(doc.callbacks, vec!["single"]);
    }

    #[test]
    fn test_load_null_param_body() {
        let docs =
            load_routes_str("/bazz/biff:\n  params:\n    bar:\n  callbacks:\n    - yolo\n").unwrap();
        let doc = &docs["/bazz/biff"];
        assert!(doc.params.contains_key("bar"));
        assert!(doc.params["bar"].is_none());
    }

    #[test]
    fn test_load_rejects_non_mapping_document() {
        assert!(load_routes_str("- just\n- a\n- list\n").is_err());
    }
}
