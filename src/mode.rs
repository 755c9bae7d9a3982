//! Statistical mode of a slice, computed with a [`ChainingHashMap`].
//!
//! Example client of the chaining table rather than part of the table
//! core: it exercises borrowed keys (the counting map keys are `&T`
//! into the input slice) and the bucket-order `pairs` traversal.

use std::hash::Hash;

use crate::chaining_hash_map::ChainingHashMap;

/// Returns every value attaining the maximum occurrence count,
/// together with that count.
///
/// Ties are all returned; the order follows the counting table's
/// bucket traversal, not the input. The reported frequency starts at
/// 1, so an empty slice yields `(vec![], 1)`.
pub fn find_mode<T>(values: &[T]) -> (Vec<T>, usize)
where
    T: Hash + Eq + Clone,
{
    let mut counts: ChainingHashMap<&T, usize> = ChainingHashMap::new();
    for value in values {
        let count = match counts.get(value) {
            Some(c) => c + 1,
            None => 1,
        };
        counts.insert(value, count);
    }

    let mut modes: Vec<&T> = Vec::new();
    let mut frequency = 1;
    for (value, count) in counts.pairs() {
        if *count > frequency {
            frequency = *count;
            modes = vec![*value];
        } else if *count == frequency {
            modes.push(*value);
        }
    }

    (modes.into_iter().cloned().collect(), frequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    /// Invariant: a single most-frequent value is returned alone with
    /// its count.
    #[test]
    fn single_mode() {
        let input = strings(&["apple", "apple", "grape", "melon", "peach"]);
        let (modes, frequency) = find_mode(&input);
        assert_eq!(modes, vec!["apple".to_string()]);
        assert_eq!(frequency, 2);
    }

    /// Invariant: every value sharing the maximum count is returned.
    #[test]
    fn tied_modes() {
        let input = strings(&[
            "Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu",
        ]);
        let (modes, frequency) = find_mode(&input);
        assert_eq!(sorted(modes), strings(&["Mint", "Ubuntu"]));
        assert_eq!(frequency, 3);

        let input = strings(&[
            "2", "4", "2", "6", "8", "4", "1", "3", "4", "5", "7", "3", "3", "2",
        ]);
        let (modes, frequency) = find_mode(&input);
        assert_eq!(sorted(modes), strings(&["2", "3", "4"]));
        assert_eq!(frequency, 3);
    }

    /// Invariant: when every value occurs once, all of them are modes
    /// at frequency 1.
    #[test]
    fn all_distinct_all_modes() {
        let input = strings(&["one", "two", "three", "four", "five"]);
        let (modes, frequency) = find_mode(&input);
        assert_eq!(
            sorted(modes),
            sorted(strings(&["one", "two", "three", "four", "five"]))
        );
        assert_eq!(frequency, 1);
    }

    /// Invariant: an empty slice reports no modes at the initial
    /// frequency of 1.
    #[test]
    fn empty_input() {
        let (modes, frequency) = find_mode::<String>(&[]);
        assert!(modes.is_empty());
        assert_eq!(frequency, 1);
    }

    /// Invariant: the input order never changes the result.
    #[test]
    fn input_order_irrelevant() {
        let forward = strings(&["x", "y", "x", "z", "x", "y"]);
        let mut backward = forward.clone();
        backward.reverse();

        let (modes_a, freq_a) = find_mode(&forward);
        let (modes_b, freq_b) = find_mode(&backward);
        assert_eq!(sorted(modes_a), sorted(modes_b));
        assert_eq!(freq_a, freq_b);
        assert_eq!(freq_a, 3);
    }

    /// Invariant: any hashable, comparable value type works.
    #[test]
    fn integer_values() {
        let (modes, frequency) = find_mode(&[1, 2, 2, 3]);
        assert_eq!(modes, vec![2]);
        assert_eq!(frequency, 2);
    }
}
