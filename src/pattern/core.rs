use regex::Regex;
use std::sync::Arc;

/// One capture key of a compiled pattern, in group order.
///
/// Names come from `{name}` template segments or named regex groups; wildcard
/// and unnamed groups get decimal positional names starting at `"0"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub name: Arc<str>,
}

/// Compilation options for a path expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// When true the match must consume the whole path; when false a prefix
    /// match stopping at a `/` boundary is enough.
    pub end: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { end: true }
    }
}

/// A path expression accepted by [`PathPattern::compile`].
#[derive(Debug, Clone)]
pub enum PathExpression {
    /// A literal template, e.g. `/pets/{id}`.
    Path(String),
    /// A prebuilt regex, used verbatim; keys are recovered from its capture
    /// groups.
    Pattern(Regex),
    /// A list of expressions matched as alternatives, keys concatenated in
    /// order.
    List(Vec<PathExpression>),
}

impl From<&str> for PathExpression {
    fn from(value: &str) -> Self {
        PathExpression::Path(value.to_string())
    }
}

impl From<String> for PathExpression {
    fn from(value: String) -> Self {
        PathExpression::Path(value)
    }
}

impl From<Regex> for PathExpression {
    fn from(value: Regex) -> Self {
        PathExpression::Pattern(value)
    }
}

impl From<Vec<PathExpression>> for PathExpression {
    fn from(value: Vec<PathExpression>) -> Self {
        PathExpression::List(value)
    }
}

/// A compiled path pattern: anchored regex, ordered capture keys, and the
/// precomputed fast-path flags.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
    keys: Vec<Key>,
    end: bool,
    fast_slash: bool,
    fast_star: bool,
}

impl PathPattern {
    /// Compile a path expression.
    ///
    /// Literal templates and lists are anchored at the start and, when
    /// `options.end` is set, at the end (with an optional trailing slash).
    /// Prebuilt regexes are used verbatim.
    #[must_use]
    pub fn compile(expr: impl Into<PathExpression>, options: MatchOptions) -> Self {
        let expr = expr.into();

        if let PathExpression::Pattern(regex) = &expr {
            let mut keys = Vec::new();
            Self::adopt_keys(regex, &mut keys);
            return Self {
                regex: regex.clone(),
                keys,
                end: options.end,
                fast_slash: false,
                fast_star: false,
            };
        }

        let mut keys = Vec::new();
        let mut wildcards = 0usize;
        let source = Self::render(&expr, &mut keys, &mut wildcards);
        let anchored = if options.end {
            format!("^(?:{source})/?$")
        } else {
            format!("^(?:{source})")
        };
        let regex = Regex::new(&anchored).expect("failed to compile path pattern");

        let (fast_slash, fast_star) = match &expr {
            PathExpression::Path(path) => {
                (path.as_str() == "/" && !options.end, path.as_str() == "*")
            }
            _ => (false, false),
        };

        Self {
            regex,
            keys,
            end: options.end,
            fast_slash,
            fast_star,
        }
    }

    /// Ordered capture keys, one per capture group.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Whether the match must consume the whole path.
    #[must_use]
    pub fn end(&self) -> bool {
        self.end
    }

    /// Fast path: literal `"/"` with prefix matching, matches any path.
    #[must_use]
    pub fn fast_slash(&self) -> bool {
        self.fast_slash
    }

    /// Fast path: literal `"*"`, captures the whole path.
    #[must_use]
    pub fn fast_star(&self) -> bool {
        self.fast_star
    }

    /// Execute the pattern against a path.
    ///
    /// Returns the matched substring and one raw capture per key (in key
    /// order; groups that did not participate yield `None`). Prefix matches
    /// that end mid-segment are rejected.
    #[must_use]
    pub fn exec<'p>(&self, path: &'p str) -> Option<(&'p str, Vec<Option<&'p str>>)> {
        let caps = self.regex.captures(path)?;
        let matched = caps.get(0)?;
        if !self.end {
            let rest = &path[matched.end()..];
            if !rest.is_empty() && !rest.starts_with('/') {
                return None;
            }
        }
        let groups = (1..caps.len())
            .map(|i| caps.get(i).map(|m| m.as_str()))
            .collect();
        Some((matched.as_str(), groups))
    }

    fn render(expr: &PathExpression, keys: &mut Vec<Key>, wildcards: &mut usize) -> String {
        match expr {
            PathExpression::Path(path) => Self::render_path(path, keys, wildcards),
            PathExpression::Pattern(regex) => {
                Self::adopt_keys(regex, keys);
                regex.as_str().to_string()
            }
            PathExpression::List(items) => items
                .iter()
                .map(|item| format!("(?:{})", Self::render(item, keys, wildcards)))
                .collect::<Vec<_>>()
                .join("|"),
        }
    }

    fn render_path(path: &str, keys: &mut Vec<Key>, wildcards: &mut usize) -> String {
        if path == "/" {
            return "/".to_string();
        }
        if path == "*" {
            keys.push(Key {
                name: Self::wildcard_key(wildcards),
            });
            return "(.*)".to_string();
        }

        let mut pattern = String::with_capacity(path.len() + 8);
        for segment in path.split('/') {
            if segment.is_empty() {
                continue;
            }
            if let Some(name) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                keys.push(Key {
                    name: Arc::from(name),
                });
                pattern.push_str("/([^/]+)");
            } else if segment == "*" {
                keys.push(Key {
                    name: Self::wildcard_key(wildcards),
                });
                pattern.push_str("/(.*)");
            } else {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }
        if pattern.is_empty() {
            pattern.push('/');
        }
        pattern
    }

    fn adopt_keys(regex: &Regex, keys: &mut Vec<Key>) {
        for (index, name) in regex.capture_names().skip(1).enumerate() {
            let name: Arc<str> = match name {
                Some(name) => Arc::from(name),
                None => Arc::from(index.to_string()),
            };
            keys.push(Key { name });
        }
    }

    fn wildcard_key(wildcards: &mut usize) -> Arc<str> {
        let name = Arc::from(wildcards.to_string());
        *wildcards += 1;
        name
    }
}
