//! Priority-ordered queue of pending actions.

use std::collections::VecDeque;

use crate::types::Action;

/// Pending corrective actions, kept sorted by `(priority, insertion order)`.
///
/// Insertion uses a partition point so actions with equal priority stay in
/// the order they were queued.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    entries: VecDeque<Action>,
}

impl ActionQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `action` unless an identical edit is already pending.
    ///
    /// Returns `true` if the action was inserted.
    pub fn push(&mut self, action: Action) -> bool {
        if self.contains(&action) {
            return false;
        }
        let at = self
            .entries
            .partition_point(|queued| queued.priority <= action.priority);
        self.entries.insert(at, action);
        true
    }

    /// Removes and returns the action with the lowest priority value.
    pub fn pop(&mut self) -> Option<Action> {
        self.entries.pop_front()
    }

    /// Returns the next action without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Action> {
        self.entries.front()
    }

    /// Returns `true` if an action describing the same edit is queued.
    #[must_use]
    pub fn contains(&self, action: &Action) -> bool {
        self.entries.iter().any(|queued| queued.same_edit(action))
    }

    /// Pending actions in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.entries.iter()
    }

    /// Number of pending actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending action.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops actions aimed at `removed` and shifts later indices down by one.
    ///
    /// Returns the number of dropped actions.
    pub fn reindex_after_remove(&mut self, removed: usize) -> usize {
        let before = self.entries.len();
        self.entries.retain_mut(|action| super::shift_index(&mut action.details, removed));
        before - self.entries.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::Category;
    use crate::types::Subtype;

    fn modify(index: usize, priority: u32) -> Action {
        Action::modify(Category::Whitespace, index, "a ", "a", "trim").with_priority(priority)
    }

    #[test]
    fn test_lower_priority_first() {
        let mut queue = ActionQueue::new();
        queue.push(modify(0, 3));
        queue.push(Action::remove(Category::EmptyPart, 1, "", "drop").with_priority(1));

        assert_eq!(queue.pop().unwrap().subtype, Subtype::Remove);
        assert_eq!(queue.pop().unwrap().subtype, Subtype::Modify);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut queue = ActionQueue::new();
        queue.push(modify(2, 2));
        queue.push(modify(0, 2));
        queue.push(modify(1, 2));

        let order: Vec<_> = queue.iter().map(|a| a.index().unwrap()).collect();
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn test_duplicate_not_enqueued() {
        let mut queue = ActionQueue::new();
        assert!(queue.push(modify(0, 2)));
        assert!(!queue.push(modify(0, 2)));
        assert!(!queue.push(modify(0, 5)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_reindex_drops_and_shifts() {
        let mut queue = ActionQueue::new();
        queue.push(modify(0, 2));
        queue.push(modify(1, 2));
        queue.push(modify(2, 2));
        queue.push(Action::add(Category::Other("X".into()), "new", "append").with_priority(2));

        let dropped = queue.reindex_after_remove(1);
        assert_eq!(dropped, 1);

        let indices: Vec<_> = queue.iter().map(Action::index).collect();
        assert_eq!(indices, vec![Some(0), Some(1), None]);
    }
}
