// SPDX-License-Identifier: MIT OR Apache-2.0
//! Diff paths: where in the document a difference was found.
//!
//! Two renderings of the same path exist:
//!
//! - [`DiffPath::to_string`] pinpoints one location in one comparison run,
//!   including array indices and join-key matches: `users[id=42].name`,
//!   `tags[3]`.
//! - [`DiffPath::config_key`] is the canonical location-independent form
//!   used to look up per-path join-key configuration: array hops collapse
//!   to `[]`, so every row of `users` shares the key `$.users`.

/// One hop in a diff path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object field access.
    Key(String),
    /// Positional array access.
    Index(usize),
    /// Join-key array access: the row whose `field` equals `value`.
    KeyMatch {
        /// Join key field name.
        field: String,
        /// Stringified join key value of the matched row.
        value: String,
    },
}

/// Ordered sequence of path segments from the document root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffPath {
    segments: Vec<PathSegment>,
}

impl DiffPath {
    /// Path of the document root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// The segments of this path, root first.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// A new path with `segment` appended. The receiver is unchanged; the
    /// differ hands child paths down while keeping its own.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Canonical form for join-key configuration lookup.
    ///
    /// Key segments join with `.` under a `$` root anchor; index and
    /// key-match segments collapse to `[]` since configuration addresses
    /// the array location, not a particular row.
    #[must_use]
    pub fn config_key(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.segments {
            match segment {
                PathSegment::Key(k) => {
                    out.push('.');
                    out.push_str(k);
                }
                PathSegment::Index(_) | PathSegment::KeyMatch { .. } => out.push_str("[]"),
            }
        }
        out
    }

    /// Object key names appearing anywhere in this path, in order.
    pub fn key_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Key(k) => Some(k.as_str()),
            _ => None,
        })
    }
}

impl std::fmt::Display for DiffPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(k) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(k)?;
                }
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
                PathSegment::KeyMatch { field, value } => write!(f, "[{field}={value}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_string())
    }

    #[test]
    fn displays_like_a_json_accessor() {
        let path = DiffPath::root()
            .child(key("users"))
            .child(PathSegment::Index(3))
            .child(key("name"));
        assert_eq!(path.to_string(), "users[3].name");
    }

    #[test]
    fn displays_join_key_matches() {
        let path = DiffPath::root().child(key("users")).child(PathSegment::KeyMatch {
            field: "id".to_string(),
            value: "42".to_string(),
        });
        assert_eq!(path.to_string(), "users[id=42]");
    }

    #[test]
    fn root_renders_as_dollar() {
        assert_eq!(DiffPath::root().to_string(), "$");
        assert_eq!(DiffPath::root().config_key(), "$");
    }

    #[test]
    fn config_key_collapses_array_hops() {
        let path = DiffPath::root()
            .child(key("data"))
            .child(key("users"))
            .child(PathSegment::Index(0))
            .child(key("addresses"));
        assert_eq!(path.config_key(), "$.data.users[].addresses");
    }

    #[test]
    fn key_names_skip_array_segments() {
        let path = DiffPath::root()
            .child(key("users"))
            .child(PathSegment::Index(1))
            .child(key("email"));
        let names: Vec<&str> = path.key_names().collect();
        assert_eq!(names, vec!["users", "email"]);
    }
}
