use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// HTTP methods a route may accept.
///
/// This is a closed set: anything else is a [`ConfigError::UnknownMethod`] at
/// compile time and a 405 at request time. A route that declares no methods
/// defaults to `[Get]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Head,
    Put,
}

impl HttpMethod {
    /// Parse a lowercase method token as it appears in the route source.
    ///
    /// Request methods must be case-normalized by the caller before parsing.
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        match token {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "head" => Ok(HttpMethod::Head),
            "put" => Ok(HttpMethod::Put),
            other => Err(ConfigError::UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Head => "head",
            HttpMethod::Put => "put",
        };
        write!(f, "{}", s)
    }
}

static STRING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("default string pattern compiles"));
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+-]?([0-9]*[.])?[0-9]+").expect("default number pattern compiles"));
static BOOLEAN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)((true)|(false))").expect("default boolean pattern compiles"));

/// Scalar parameter types and their default validation patterns.
///
/// Matching is unanchored substring search (`Regex::is_match`), so a user
/// pattern can be supplied per parameter to narrow the default further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    Number,
    Boolean,
}

impl ParameterType {
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        match token {
            "string" => Ok(ParameterType::String),
            "number" => Ok(ParameterType::Number),
            "boolean" => Ok(ParameterType::Boolean),
            other => Err(ConfigError::UnknownParameterType(other.to_string())),
        }
    }

    /// The compiled default pattern for this type.
    #[must_use]
    pub fn default_pattern(&self) -> &'static Regex {
        match self {
            ParameterType::String => &STRING_PATTERN,
            ParameterType::Number => &NUMBER_PATTERN,
            ParameterType::Boolean => &BOOLEAN_PATTERN,
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
        };
        write!(f, "{}", s)
    }
}

/// Where a parameter value may legally come from in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSource {
    Url,
    Form,
    Query,
}

impl fmt::Display for ParameterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterSource::Url => "url",
            ParameterSource::Form => "form",
            ParameterSource::Query => "query",
        };
        write!(f, "{}", s)
    }
}

/// OR-combined set of [`ParameterSource`] flags.
///
/// Merge precedence when the same name arrives from several sources is fixed
/// at FORM < URL < QUERY and lives in the dispatcher; this type only answers
/// membership questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceSet {
    url: bool,
    form: bool,
    query: bool,
}

impl SourceSet {
    pub const URL: SourceSet = SourceSet {
        url: true,
        form: false,
        query: false,
    };
    pub const FORM: SourceSet = SourceSet {
        url: false,
        form: true,
        query: false,
    };
    /// The default source for parameters that do not declare one.
    pub const QUERY: SourceSet = SourceSet {
        url: false,
        form: false,
        query: true,
    };

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: ParameterSource) {
        match source {
            ParameterSource::Url => self.url = true,
            ParameterSource::Form => self.form = true,
            ParameterSource::Query => self.query = true,
        }
    }

    #[must_use]
    pub fn contains(&self, source: ParameterSource) -> bool {
        match source {
            ParameterSource::Url => self.url,
            ParameterSource::Form => self.form,
            ParameterSource::Query => self.query,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.url || self.form || self.query)
    }

    /// Parse a `|`-delimited source list as it appears in the route source,
    /// e.g. `url|query`. Every accepted token sets a flag, so a successfully
    /// parsed set is never empty.
    pub fn parse(list: &str) -> Result<Self, ConfigError> {
        let mut set = SourceSet::empty();
        for token in list.split('|') {
            match token.trim() {
                "url" => set.insert(ParameterSource::Url),
                "form" => set.insert(ParameterSource::Form),
                "query" => set.insert(ParameterSource::Query),
                other => return Err(ConfigError::UnknownParameterSource(other.to_string())),
            }
        }
        Ok(set)
    }
}

/// A compiled route parameter: type, optional narrowing pattern, required
/// flag and the set of request sources it may arrive from.
#[derive(Debug, Clone)]
pub struct RouteParameter {
    pub ty: ParameterType,
    /// User-supplied pattern narrowing the type's default pattern.
    pub pattern: Option<Regex>,
    pub required: bool,
    pub sources: SourceSet,
}

impl RouteParameter {
    /// A value is valid iff it is empty and the parameter is optional, or it
    /// matches the type's default pattern and, when present, the user pattern.
    #[must_use]
    pub fn is_valid(&self, value: &str) -> bool {
        if value.is_empty() && !self.required {
            return true;
        }
        if !self.ty.default_pattern().is_match(value) {
            return false;
        }
        match &self.pattern {
            Some(re) => re.is_match(value),
            None => true,
        }
    }
}

/// An immutable compiled route: accepted methods, declared parameters keyed
/// by name, and the ordered callback-name chain.
#[derive(Debug, Clone)]
pub struct Route {
    pub methods: Vec<HttpMethod>,
    pub parameters: HashMap<String, RouteParameter>,
    pub callbacks: Vec<String>,
}

impl Route {
    #[must_use]
    pub fn allows(&self, method: HttpMethod) -> bool {
        self.methods.contains(&method)
    }
}
