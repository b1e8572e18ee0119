//! Candidate-value collections.

use std::fmt;
use std::sync::Arc;

/// Bound required of every value a variable can take.
///
/// Blanket-implemented for any type that is cloneable, comparable,
/// printable and thread-safe.
pub trait Value: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> Value for T where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

type Generator<V> = Arc<dyn Fn() -> Vec<V> + Send + Sync>;

/// The remaining candidates of one variable.
///
/// Two representations share one interface:
///
/// - **explicit**: a persistent vector. Cloning shares structure, and a
///   removal copies only the touched chunk, so a cloned domain is never
///   affected by edits to the original (or the other way round).
/// - **generated**: a closure producing the full candidate sequence plus the
///   values removed so far. The sequence is rebuilt on every query; nothing
///   is cached between a removal and the next enumeration.
///
/// Enumeration order is deterministic: insertion order for explicit
/// domains, generator order for generated ones.
///
/// # Examples
///
/// ```
/// use u_csp::model::Domain;
///
/// let mut d = Domain::new([1, 2, 3]);
/// assert!(d.remove(&2));
/// assert_eq!(d.values(), vec![1, 3]);
/// assert!(!d.remove(&2));
/// ```
#[derive(Clone)]
pub struct Domain<V: Value> {
    repr: Repr<V>,
}

#[derive(Clone)]
enum Repr<V: Value> {
    Explicit(im::Vector<V>),
    Generated {
        generator: Generator<V>,
        removed: im::Vector<V>,
    },
}

impl<V: Value> Domain<V> {
    /// Creates an explicit domain holding `values` in the given order.
    pub fn new(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            repr: Repr::Explicit(values.into_iter().collect()),
        }
    }

    /// Creates a domain whose candidates are produced on demand.
    ///
    /// `generator` must be deterministic: it is called again on every
    /// enumeration and the removed values are filtered out of its output.
    pub fn generated(generator: impl Fn() -> Vec<V> + Send + Sync + 'static) -> Self {
        Self {
            repr: Repr::Generated {
                generator: Arc::new(generator),
                removed: im::Vector::new(),
            },
        }
    }

    /// Whether candidates come from a generator.
    pub fn is_generated(&self) -> bool {
        matches!(self.repr, Repr::Generated { .. })
    }

    /// Snapshot of the remaining candidates, in enumeration order.
    pub fn values(&self) -> Vec<V> {
        match &self.repr {
            Repr::Explicit(values) => values.iter().cloned().collect(),
            Repr::Generated { generator, removed } => {
                // Each removal cancels exactly one occurrence.
                let mut pending: Vec<&V> = removed.iter().collect();
                generator()
                    .into_iter()
                    .filter(|v| match pending.iter().position(|r| *r == v) {
                        Some(p) => {
                            pending.swap_remove(p);
                            false
                        }
                        None => true,
                    })
                    .collect()
            }
        }
    }

    /// Number of remaining candidates.
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Explicit(values) => values.len(),
            Repr::Generated { .. } => self.values().len(),
        }
    }

    /// Whether no candidate remains.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `value` is still a candidate.
    pub fn contains(&self, value: &V) -> bool {
        match &self.repr {
            Repr::Explicit(values) => values.contains(value),
            Repr::Generated { .. } => self.values().contains(value),
        }
    }

    /// Removes one occurrence of each of `values`, enumerating a generated
    /// domain once for the whole batch.
    ///
    /// All or nothing: returns `false` and leaves the domain untouched if
    /// any value is absent.
    pub fn remove_all(&mut self, values: &[V]) -> bool {
        match &mut self.repr {
            Repr::Explicit(current) => {
                let mut next = current.clone();
                for value in values {
                    match next.index_of(value) {
                        Some(idx) => {
                            next.remove(idx);
                        }
                        None => return false,
                    }
                }
                *current = next;
                true
            }
            Repr::Generated { generator, removed } => {
                let mut available = generator();
                for r in removed.iter() {
                    if let Some(p) = available.iter().position(|v| v == r) {
                        available.swap_remove(p);
                    }
                }
                for value in values {
                    match available.iter().position(|v| v == value) {
                        Some(p) => {
                            available.swap_remove(p);
                        }
                        None => return false,
                    }
                }
                removed.extend(values.iter().cloned());
                true
            }
        }
    }

    /// Removes one occurrence of `value`. Returns `false` if it was absent.
    pub fn remove(&mut self, value: &V) -> bool {
        if !self.contains(value) {
            return false;
        }
        match &mut self.repr {
            Repr::Explicit(values) => match values.index_of(value) {
                Some(idx) => {
                    values.remove(idx);
                    true
                }
                None => false,
            },
            Repr::Generated { removed, .. } => {
                removed.push_back(value.clone());
                true
            }
        }
    }
}

impl<V: Value> fmt::Debug for Domain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values()).finish()
    }
}

impl<V: Value> From<Vec<V>> for Domain<V> {
    fn from(values: Vec<V>) -> Self {
        Self::new(values)
    }
}

impl<V: Value> FromIterator<V> for Domain<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_explicit_order_is_insertion_order() {
        let d = Domain::new([3, 1, 2]);
        assert_eq!(d.values(), vec![3, 1, 2]);
        assert_eq!(d.len(), 3);
        assert!(!d.is_generated());
    }

    #[test]
    fn test_remove_absent_value() {
        let mut d = Domain::new([1, 2]);
        assert!(!d.remove(&5));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn test_remove_duplicate_removes_one() {
        let mut d = Domain::new([7, 7, 8]);
        assert!(d.remove(&7));
        assert_eq!(d.values(), vec![7, 8]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = Domain::new(0..100);
        let b = a.clone();
        assert!(a.remove(&50));
        assert_eq!(a.len(), 99);
        assert_eq!(b.len(), 100);
        assert!(b.contains(&50));
    }

    #[test]
    fn test_generated_recomputes_after_removal() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut d = Domain::generated(move || {
            counter.fetch_add(1, Ordering::Relaxed);
            vec!['a', 'b', 'c']
        });
        assert!(d.is_generated());
        assert_eq!(d.values(), vec!['a', 'b', 'c']);
        assert!(d.remove(&'b'));
        assert_eq!(d.values(), vec!['a', 'c']);
        assert_eq!(d.len(), 2);
        assert!(calls.load(Ordering::Relaxed) >= 3);
    }

    #[test]
    fn test_remove_all_is_all_or_nothing() {
        let mut d = Domain::new([1, 2, 2, 3]);
        assert!(!d.remove_all(&[1, 4]));
        assert_eq!(d.values(), vec![1, 2, 2, 3]);
        assert!(d.remove_all(&[2, 1]));
        assert_eq!(d.values(), vec![2, 3]);

        let mut g = Domain::generated(|| vec![1, 2, 2, 3]);
        assert!(g.remove(&2));
        assert!(!g.remove_all(&[2, 2]));
        assert_eq!(g.values(), vec![1, 2, 3]);
        assert!(g.remove_all(&[3, 2]));
        assert_eq!(g.values(), vec![1]);
    }

    #[test]
    fn test_remove_all_enumerates_generator_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut d = Domain::generated(move || {
            counter.fetch_add(1, Ordering::Relaxed);
            (0..100).collect()
        });
        let doomed: Vec<i32> = (0..99).collect();
        assert!(d.remove_all(&doomed));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(d.values(), vec![99]);
    }

    #[test]
    fn test_generated_clone_is_independent() {
        let mut a = Domain::generated(|| vec![1, 2, 3]);
        let b = a.clone();
        assert!(a.remove(&1));
        assert_eq!(a.values(), vec![2, 3]);
        assert_eq!(b.values(), vec![1, 2, 3]);
    }

    #[test]
    fn test_generated_duplicates_cancel_one_at_a_time() {
        let mut d = Domain::generated(|| vec![1, 1, 2]);
        assert!(d.remove(&1));
        assert_eq!(d.values(), vec![1, 2]);
        assert!(d.remove(&1));
        assert_eq!(d.values(), vec![2]);
        assert!(!d.remove(&1));
    }

    #[test]
    fn test_debug_lists_values() {
        let d = Domain::new([1, 2]);
        assert_eq!(format!("{d:?}"), "{1, 2}");
    }
}
