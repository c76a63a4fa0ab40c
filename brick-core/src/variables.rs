use indexmap::IndexMap;

/// Ordered key-to-string bindings supplied to a scaffold invocation.
///
/// Keys are unique: inserting an existing key replaces its value but keeps
/// its original position. Rendering only ever borrows a `Variables`, so the
/// bindings cannot change while a pass is running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: IndexMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Builder-style [`Variables::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        vars.extend(iter);
        vars
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Variables {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// Check that `name` can be used as a variable name.
///
/// Returns `Some(reason)` if it is not an identifier: a letter or
/// underscore followed by letters, digits and underscores.
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        Some(_) => return Some("must start with a letter or underscore"),
        None => return Some("cannot be empty"),
    }
    if chars.all(|c| c.is_alphanumeric() || c == '_') {
        None
    } else {
        Some("must contain only letters, numbers, and underscores")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let vars = Variables::new()
            .with("project_name", "My App")
            .with("organization", "com.example");

        assert_eq!(
            vars.keys().collect::<Vec<_>>(),
            ["project_name", "organization"]
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut vars = Variables::from_iter([("a", "1"), ("b", "2")]);
        assert_eq!(vars.insert("a", "3").as_deref(), Some("1"));

        assert_eq!(vars.len(), 2);
        assert_eq!(vars.iter().collect::<Vec<_>>(), [("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("project_name").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("v2").is_none());

        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("2fast").is_some());
        assert!(validate_identifier("my-app").is_some());
        assert!(validate_identifier("a.b").is_some());
    }
}
