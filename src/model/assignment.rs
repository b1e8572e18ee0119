//! Solution records.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Variable names paired with their assigned values, in assignment order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment<V> {
    entries: Vec<(String, V)>,
}

impl<V> Assignment<V> {
    pub(crate) fn new(entries: Vec<(String, V)>) -> Self {
        Self { entries }
    }

    /// Value assigned to `name`.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V> IntoIterator for Assignment<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let a = Assignment::new(vec![("x".to_owned(), 1), ("y".to_owned(), 2)]);
        assert_eq!(a.get("y"), Some(&2));
        assert_eq!(a.get("z"), None);
        assert_eq!(a.len(), 2);
        assert_eq!(a.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["x", "y"]);
    }
}
