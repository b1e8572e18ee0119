//! CSP variable type.

use super::domain::{Domain, Value};
use crate::error::{CspError, Result};

/// A decision variable with a finite domain.
///
/// A variable is owned by exactly one search state. Branching clones the
/// state, and with it every variable, so the domain and the assigned-value
/// slot of a clone are independent of the original.
///
/// # Examples
///
/// ```
/// use u_csp::model::Variable;
///
/// let mut x = Variable::new("x", [1, 2, 3]);
/// let snapshot = x.clone();
///
/// x.reduce_domain(&2).unwrap();
/// assert_eq!(x.domain(), vec![1, 3]);
/// assert_eq!(snapshot.domain_size(), 3);
/// assert!(x.reduce_domain(&2).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Variable<V: Value> {
    name: String,
    domain: Domain<V>,
    assigned: Option<V>,
}

impl<V: Value> Variable<V> {
    /// Creates a variable with an explicit domain.
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::with_domain(name, Domain::new(values))
    }

    /// Creates a variable whose domain is produced by `generator`.
    pub fn generated(
        name: impl Into<String>,
        generator: impl Fn() -> Vec<V> + Send + Sync + 'static,
    ) -> Self {
        Self::with_domain(name, Domain::generated(generator))
    }

    /// Creates a variable around an existing domain.
    pub fn with_domain(name: impl Into<String>, domain: Domain<V>) -> Self {
        Self {
            name: name.into(),
            domain,
            assigned: None,
        }
    }

    /// Pre-assigns a value, fixing the variable for the whole search.
    ///
    /// The domain is left untouched. The search driver branches on this
    /// value alone, and only while it is still in the domain.
    pub fn with_assigned(mut self, value: V) -> Self {
        self.assigned = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remaining candidates in enumeration order.
    pub fn domain(&self) -> Vec<V> {
        self.domain.values()
    }

    pub fn domain_size(&self) -> usize {
        self.domain.len()
    }

    /// Whether `value` is still a candidate.
    pub fn contains(&self, value: &V) -> bool {
        self.domain.contains(value)
    }

    /// Removes exactly one candidate.
    ///
    /// # Errors
    ///
    /// [`CspError::NotInDomain`] if `value` is not a candidate.
    pub fn reduce_domain(&mut self, value: &V) -> Result<()> {
        if self.domain.remove(value) {
            Ok(())
        } else {
            Err(CspError::NotInDomain {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            })
        }
    }

    /// Removes one occurrence of each of `values`.
    ///
    /// # Errors
    ///
    /// [`CspError::NotInDomain`] if any of them is not a candidate, in
    /// which case nothing is removed.
    pub fn reduce_domain_all(&mut self, values: &[V]) -> Result<()> {
        if self.domain.remove_all(values) {
            Ok(())
        } else {
            Err(CspError::NotInDomain {
                variable: self.name.clone(),
                value: format!("{values:?}"),
            })
        }
    }

    /// Values the search driver branches on when this variable is next.
    ///
    /// The whole domain for a free variable. For a pre-assigned one, just
    /// its value, or nothing once that value has left the domain.
    pub fn candidates(&self) -> Vec<V> {
        match &self.assigned {
            Some(fixed) if self.contains(fixed) => vec![fixed.clone()],
            Some(_) => Vec::new(),
            None => self.domain(),
        }
    }

    pub fn assigned_value(&self) -> Option<&V> {
        self.assigned.as_ref()
    }

    pub fn set_assigned_value(&mut self, value: V) {
        self.assigned = Some(value);
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    /// Sole remaining candidate, if the domain is a singleton.
    pub fn singleton_value(&self) -> Option<V> {
        let mut values = self.domain.values();
        if values.len() == 1 {
            values.pop()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_variable() {
        let v = Variable::new("x", [1, 2, 3]);
        assert_eq!(v.name(), "x");
        assert_eq!(v.domain_size(), 3);
        assert!(!v.is_assigned());
        assert!(v.assigned_value().is_none());
    }

    #[test]
    fn test_assignment_keeps_domain() {
        let mut v = Variable::new("x", [1, 2]);
        v.set_assigned_value(2);
        assert_eq!(v.assigned_value(), Some(&2));
        assert_eq!(v.domain(), vec![1, 2]);

        let pre = Variable::new("y", [5]).with_assigned(5);
        assert!(pre.is_assigned());
    }

    #[test]
    fn test_reduce_domain_missing_value() {
        let mut v = Variable::new("x", [1, 2]);
        let err = v.reduce_domain(&3).unwrap_err();
        assert_eq!(
            err,
            CspError::NotInDomain {
                variable: "x".into(),
                value: "3".into()
            }
        );
    }

    #[test]
    fn test_candidates() {
        let free = Variable::new("x", [1, 2, 3]);
        assert_eq!(free.candidates(), vec![1, 2, 3]);

        let mut fixed = Variable::new("y", [1, 2, 3]).with_assigned(2);
        assert_eq!(fixed.candidates(), vec![2]);
        fixed.reduce_domain(&2).unwrap();
        assert!(fixed.candidates().is_empty());
    }

    #[test]
    fn test_reduce_domain_all() {
        let mut v = Variable::new("x", [1, 2, 3]);
        assert!(v.reduce_domain_all(&[1, 9]).is_err());
        assert_eq!(v.domain_size(), 3);
        v.reduce_domain_all(&[1, 3]).unwrap();
        assert_eq!(v.domain(), vec![2]);
    }

    #[test]
    fn test_copy_assigned_slot_is_independent() {
        let mut a = Variable::new("x", [1, 2]);
        let b = a.clone();
        a.set_assigned_value(1);
        assert!(!b.is_assigned());
    }

    #[test]
    fn test_singleton_value() {
        let mut v = Variable::new("x", ["a", "b"]);
        assert_eq!(v.singleton_value(), None);
        v.reduce_domain(&"a").unwrap();
        assert_eq!(v.singleton_value(), Some("b"));
    }

    #[test]
    fn test_generated_variable() {
        let mut v = Variable::generated("g", || (0..4).collect());
        v.reduce_domain(&0).unwrap();
        assert_eq!(v.domain(), vec![1, 2, 3]);
    }

    proptest! {
        #[test]
        fn prop_reduce_shrinks_by_one(
            values in proptest::collection::hash_set(0i32..1000, 1..40),
            pick in any::<proptest::sample::Index>(),
        ) {
            let values: Vec<i32> = values.into_iter().collect();
            let target = values[pick.index(values.len())];
            let mut v = Variable::new("x", values.clone());
            let before = v.domain_size();

            v.reduce_domain(&target).unwrap();

            prop_assert_eq!(v.domain_size(), before - 1);
            prop_assert!(!v.domain().contains(&target));
        }

        #[test]
        fn prop_copy_is_independent(
            values in proptest::collection::hash_set(0i32..1000, 2..40),
            pick in any::<proptest::sample::Index>(),
        ) {
            let values: Vec<i32> = values.into_iter().collect();
            let target = values[pick.index(values.len())];
            let mut original = Variable::new("x", values.clone());
            let mut copy = original.clone();

            copy.reduce_domain(&target).unwrap();
            prop_assert_eq!(original.domain_size(), values.len());

            original.reduce_domain(&target).unwrap();
            original.reduce_domain(&values[(pick.index(values.len()) + 1) % values.len()]).unwrap();
            prop_assert_eq!(copy.domain_size(), values.len() - 1);
        }
    }
}
