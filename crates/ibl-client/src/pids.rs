//! Programme / episode identifiers.

/// One pid or an ordered list of pids.
///
/// Multi-pid requests join the ids with commas in the given order, with no
/// reordering or de-duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pids {
    /// A single identifier.
    Single(String),
    /// An ordered sequence of identifiers.
    Many(Vec<String>),
}

impl Pids {
    /// The ids as a sequence; a single id is a one-element sequence.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Self::Single(id) => vec![id.as_str()],
            Self::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }

    /// Path segment form: `id1,id2,...`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.ids().join(",")
    }
}

impl From<&str> for Pids {
    fn from(id: &str) -> Self {
        Self::Single(String::from(id))
    }
}

impl From<String> for Pids {
    fn from(id: String) -> Self {
        Self::Single(id)
    }
}

impl From<&String> for Pids {
    fn from(id: &String) -> Self {
        Self::Single(id.clone())
    }
}

impl From<Vec<String>> for Pids {
    fn from(ids: Vec<String>) -> Self {
        Self::Many(ids)
    }
}

impl From<Vec<&str>> for Pids {
    fn from(ids: Vec<&str>) -> Self {
        Self::Many(ids.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for Pids {
    fn from(ids: &[&str]) -> Self {
        Self::Many(ids.iter().copied().map(String::from).collect())
    }
}

impl From<&[String]> for Pids {
    fn from(ids: &[String]) -> Self {
        Self::Many(ids.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Pids {
    fn from(ids: [&str; N]) -> Self {
        Self::Many(ids.into_iter().map(String::from).collect())
    }
}

/// Returns the id if it can address a single resource.
///
/// An empty id does not; callers fall back to the collection.
#[must_use]
pub fn valid_id(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty())
}
