//! Lazily generated domains built from two categories of base items.
//!
//! A typical use is staffing: a shift needs one manager and three sales
//! clerks, so each candidate value is one combination of managers joined
//! with one combination of clerks. Listing those combinations up front is
//! wasteful; [`PartitionedCombinations`] enumerates them on demand.

use super::domain::{Domain, Value};
use crate::error::{CspError, Result};
use itertools::Itertools;

/// Category of a base item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    First,
    Second,
}

/// Candidate values formed by `first_count` items of the first category
/// followed by `second_count` items of the second.
///
/// Items keep their input order inside each category, and combinations are
/// produced in lexicographic order of those positions with the
/// first-category combination varying slowest.
///
/// # Examples
///
/// ```
/// use u_csp::model::{Category, PartitionedCombinations};
///
/// let staff = vec!["ann:m", "bob:s", "cid:s", "dan:s"];
/// let gen = PartitionedCombinations::new(
///     staff,
///     |s: &&str| match s.split(':').nth(1) {
///         Some("m") => Some(Category::First),
///         Some("s") => Some(Category::Second),
///         _ => None,
///     },
///     1,
///     2,
/// )
/// .unwrap();
///
/// assert_eq!(gen.len(), 3);
/// assert_eq!(gen.values()[0], vec!["ann:m", "bob:s", "cid:s"]);
/// ```
#[derive(Debug, Clone)]
pub struct PartitionedCombinations<T: Value> {
    first: Vec<T>,
    second: Vec<T>,
    first_count: usize,
    second_count: usize,
}

impl<T: Value> PartitionedCombinations<T> {
    /// Classifies every item up front.
    ///
    /// # Errors
    ///
    /// [`CspError::UnknownCategory`] for the first item `classify` maps to
    /// `None`.
    pub fn new(
        items: impl IntoIterator<Item = T>,
        classify: impl Fn(&T) -> Option<Category>,
        first_count: usize,
        second_count: usize,
    ) -> Result<Self> {
        let mut first = Vec::new();
        let mut second = Vec::new();
        for item in items {
            match classify(&item) {
                Some(Category::First) => first.push(item),
                Some(Category::Second) => second.push(item),
                None => {
                    return Err(CspError::UnknownCategory {
                        item: format!("{item:?}"),
                    })
                }
            }
        }
        Ok(Self {
            first,
            second,
            first_count,
            second_count,
        })
    }

    /// Every combination, in enumeration order.
    pub fn values(&self) -> Vec<Vec<T>> {
        let tails: Vec<Vec<T>> = self
            .second
            .iter()
            .cloned()
            .combinations(self.second_count)
            .collect();
        let seconds = &tails;
        self.first
            .iter()
            .cloned()
            .combinations(self.first_count)
            .flat_map(move |head| {
                seconds.iter().map(move |tail| {
                    let mut value = head.clone();
                    value.extend(tail.iter().cloned());
                    value
                })
            })
            .collect()
    }

    /// Number of combinations, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        binomial(self.first.len(), self.first_count)
            .saturating_mul(binomial(self.second.len(), self.second_count))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy with one base item withdrawn from its category.
    ///
    /// # Errors
    ///
    /// [`CspError::UnknownItem`] if `item` is not a base item.
    pub fn without(&self, item: &T) -> Result<Self> {
        let mut next = self.clone();
        if let Some(pos) = next.first.iter().position(|x| x == item) {
            next.first.remove(pos);
        } else if let Some(pos) = next.second.iter().position(|x| x == item) {
            next.second.remove(pos);
        } else {
            return Err(CspError::UnknownItem {
                item: format!("{item:?}"),
            });
        }
        Ok(next)
    }

    /// A generated domain enumerating these combinations.
    pub fn into_domain(self) -> Domain<Vec<T>> {
        Domain::generated(move || self.values())
    }
}

/// `n choose k`, saturating at `usize::MAX`.
fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    // Every prefix product is itself a binomial, so the division is exact.
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = match acc.checked_mul((n - i) as u128) {
            Some(product) => product / (i as u128 + 1),
            None => return usize::MAX,
        };
    }
    usize::try_from(acc).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Staff {
        name: &'static str,
        title: &'static str,
    }

    const fn staff(name: &'static str, title: &'static str) -> Staff {
        Staff { name, title }
    }

    fn by_title(s: &Staff) -> Option<Category> {
        match s.title {
            "Manager" => Some(Category::First),
            "Sales" => Some(Category::Second),
            _ => None,
        }
    }

    fn crew() -> Vec<Staff> {
        vec![
            staff("John", "Manager"),
            staff("AA", "Sales"),
            staff("BB", "Sales"),
            staff("CC", "Sales"),
            staff("DD", "Sales"),
        ]
    }

    fn names(v: &[Staff]) -> Vec<&'static str> {
        v.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_enumeration_order() {
        let gen = PartitionedCombinations::new(crew(), by_title, 1, 3).unwrap();
        let values: Vec<Vec<&str>> = gen.values().iter().map(|v| names(v)).collect();
        assert_eq!(
            values,
            vec![
                vec!["John", "AA", "BB", "CC"],
                vec!["John", "AA", "BB", "DD"],
                vec!["John", "AA", "CC", "DD"],
                vec!["John", "BB", "CC", "DD"],
            ]
        );
        assert_eq!(gen.len(), 4);
    }

    #[test]
    fn test_every_first_combination_is_paired() {
        let mut people = crew();
        people.push(staff("Joe", "Manager"));
        let gen = PartitionedCombinations::new(people, by_title, 1, 3).unwrap();
        assert_eq!(gen.len(), 8);
        assert_eq!(gen.values().len(), 8);
        assert_eq!(names(&gen.values()[4])[0], "Joe");
    }

    #[test]
    fn test_unknown_category() {
        let mut people = crew();
        people.push(staff("Eve", "Intern"));
        let err = PartitionedCombinations::new(people, by_title, 1, 3).unwrap_err();
        assert!(matches!(err, CspError::UnknownCategory { item } if item.contains("Intern")));
    }

    #[test]
    fn test_without_base_item() {
        let gen = PartitionedCombinations::new(crew(), by_title, 1, 3).unwrap();
        let smaller = gen.without(&staff("AA", "Sales")).unwrap();
        assert_eq!(smaller.len(), 1);
        assert_eq!(names(&smaller.values()[0]), vec!["John", "BB", "CC", "DD"]);
        assert_eq!(gen.len(), 4);
        assert_eq!(
            gen.without(&staff("Zed", "Sales")).unwrap_err(),
            CspError::UnknownItem {
                item: format!("{:?}", staff("Zed", "Sales")),
            }
        );
    }

    #[test]
    fn test_into_domain() {
        let gen = PartitionedCombinations::new(crew(), by_title, 1, 3).unwrap();
        let mut domain = gen.into_domain();
        assert!(domain.is_generated());
        assert_eq!(domain.len(), 4);

        let first = domain.values()[0].clone();
        assert!(domain.remove(&first));
        assert_eq!(domain.len(), 3);
    }

    #[test]
    fn test_too_few_items() {
        let gen = PartitionedCombinations::new(crew(), by_title, 2, 1).unwrap();
        assert!(gen.is_empty());
        assert!(gen.values().is_empty());
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(4, 4), 1);
        assert_eq!(binomial(3, 4), 0);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_binomial_large() {
        assert_eq!(binomial(64, 32), 1_832_624_140_942_590_534);
        // 112_186_277_816_662_845_432 does not fit in 64 bits.
        assert_eq!(binomial(70, 35), usize::MAX);
        assert_eq!(binomial(200, 1), 200);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_len_saturates() {
        let items: Vec<u32> = (0..140).collect();
        let gen = PartitionedCombinations::new(
            items,
            |i: &u32| Some(if *i < 70 { Category::First } else { Category::Second }),
            35,
            35,
        )
        .unwrap();
        assert_eq!(gen.len(), usize::MAX);
        assert!(!gen.is_empty());
    }
}
