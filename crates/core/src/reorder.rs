//! Category ordering.
//!
//! A reorder is the admin's full desired order of category ids; each id gets
//! `sequence = position + 1`. The same splice rule is used client-side for
//! the optimistic view, so both sides agree on the resulting order.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Pair every id with its 1-based position.
///
/// Duplicate ids are rejected: a category cannot occupy two positions.
pub fn assign_sequences(ids: &[DbId]) -> Result<Vec<(DbId, i32)>, CoreError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(CoreError::Validation(format!(
                "Category {id} appears more than once in the new order"
            )));
        }
    }
    let max = i32::try_from(ids.len())
        .map_err(|_| CoreError::Validation("Too many categories to reorder".into()))?;
    Ok(ids.iter().copied().zip(1..=max).collect())
}

/// Sequence for a newly created category: one past the current maximum.
pub fn next_sequence(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0).max(0) + 1
}

/// Move the element at `from` so it ends up at index `to`.
///
/// Out-of-range indices are rejected rather than clamped.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), CoreError> {
    if from >= items.len() || to >= items.len() {
        return Err(CoreError::Validation(format!(
            "Cannot move position {from} to {to} in a list of {}",
            items.len()
        )));
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::new_id;
    use assert_matches::assert_matches;

    #[test]
    fn sequences_follow_submitted_order() {
        let ids = vec![new_id(), new_id(), new_id()];
        let assigned = assign_sequences(&ids).unwrap();
        assert_eq!(
            assigned,
            vec![(ids[0], 1), (ids[1], 2), (ids[2], 3)]
        );
    }

    #[test]
    fn empty_order_is_a_no_op() {
        assert!(assign_sequences(&[]).unwrap().is_empty());
    }

    #[test]
    fn duplicates_are_rejected() {
        let id = new_id();
        assert_matches!(
            assign_sequences(&[id, new_id(), id]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn next_sequence_starts_at_one() {
        assert_eq!(next_sequence(None), 1);
        assert_eq!(next_sequence(Some(0)), 1);
        assert_eq!(next_sequence(Some(7)), 8);
    }

    #[test]
    fn move_down_and_up() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        move_item(&mut v, 0, 2).unwrap();
        assert_eq!(v, vec!['b', 'c', 'a', 'd']);
        move_item(&mut v, 3, 0).unwrap();
        assert_eq!(v, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn move_out_of_range_fails() {
        let mut v = vec![1, 2];
        assert_matches!(move_item(&mut v, 2, 0), Err(CoreError::Validation(_)));
        assert_eq!(v, vec![1, 2]);
    }
}
