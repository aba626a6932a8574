//! Shell-style wildcard matching for exclude patterns

use regex::Regex;

/// Check whether `name` matches the wildcard `pattern`.
///
/// `*` matches any run of characters and `?` exactly one. Everything else is
/// literal and the match must cover the whole name. Case-sensitive.
pub fn matches(name: &str, pattern: &str) -> bool {
    GlobPattern::new(pattern).matches(name)
}

/// A wildcard pattern compiled once for repeated matching.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Any,
    Regex(Regex),
    Literal,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Self {
        let matcher = if pattern == "*" {
            Matcher::Any
        } else {
            // Every literal is escaped, so the only way to fail is a size limit.
            match Regex::new(&translate(pattern)) {
                Ok(re) => Matcher::Regex(re),
                Err(e) => {
                    tracing::debug!("pattern {:?} falls back to literal match: {}", pattern, e);
                    Matcher::Literal
                }
            }
        };
        Self {
            source: pattern.to_string(),
            matcher,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Regex(re) => re.is_match(name),
            Matcher::Literal => name == self.source,
        }
    }
}

/// Translate a wildcard pattern into an anchored regular expression.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("(?s)^");
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    out.push('$');
    out
}

/// A comma-separated list of exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<GlobPattern>,
}

impl ExcludeSet {
    /// Parse `"*.tmp, build ,.git"` into its trimmed, non-empty patterns.
    pub fn parse(list: &str) -> Self {
        let mut set = Self::default();
        set.extend_from_list(list);
        set
    }

    /// Add every pattern of another comma-separated list.
    pub fn extend_from_list(&mut self, list: &str) {
        self.patterns.extend(
            list.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(GlobPattern::new),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Return the first pattern that matches `name`, if any.
    pub fn matching(&self, name: &str) -> Option<&GlobPattern> {
        self.patterns.iter().find(|p| p.matches(name))
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.matching(name).is_some()
    }
}
