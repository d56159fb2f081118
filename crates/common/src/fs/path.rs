use std::fmt;

use serde::Serialize;
use store::ObjectRef;

const SEPARATOR: char = '/';

/// A path in the virtual filesystem: a container and a key within it.
///
/// The key never carries a leading or trailing separator. The empty key
/// is the container root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VirtualPath {
    pub container: String,
    pub key: String,
}

impl VirtualPath {
    pub fn new(container: impl Into<String>, key: impl AsRef<str>) -> Self {
        Self {
            container: container.into(),
            key: key.as_ref().trim_matches(SEPARATOR).to_string(),
        }
    }

    /// The root of `container`.
    pub fn root(container: impl Into<String>) -> Self {
        Self::new(container, "")
    }

    /// Split a `container/key...` string.
    ///
    /// Leading and trailing separators are dropped; a string without a
    /// separator names a container root. Performs no store access and
    /// does not reject an empty container.
    pub fn resolve(uri: &str) -> Self {
        let uri = uri.trim_start_matches(SEPARATOR);
        match uri.split_once(SEPARATOR) {
            Some((container, key)) => Self::new(container, key),
            None => Self::root(uri),
        }
    }

    pub fn is_root(&self) -> bool {
        self.key.is_empty()
    }

    /// Last segment of the key, empty for the root.
    pub fn name(&self) -> &str {
        self.key.rsplit(SEPARATOR).next().unwrap_or_default()
    }

    /// Prefix used to list the children of this path.
    ///
    /// Always the key followed by a separator, so the root lists with `"/"`.
    pub fn listing_prefix(&self) -> String {
        format!("{}{}", self.key, SEPARATOR)
    }

    /// A child path one level below this one.
    pub fn join(&self, name: &str) -> Self {
        if self.is_root() {
            Self::new(self.container.clone(), name)
        } else {
            Self::new(self.container.clone(), format!("{}/{}", self.key, name))
        }
    }

    /// This path as the source of a store-side copy.
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef::new(self.container.clone(), self.key.clone())
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.key)
    }
}
