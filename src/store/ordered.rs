//! Dense-ranked ordered collections (FAQ items).
//!
//! Maintains a 1-based `order` field with no gaps or duplicates across
//! the collection. After every completed mutation the set of order
//! values is exactly `{1, ..., N}`; this holds even when a caller
//! requests an out-of-range rank (clamped to append).
//!
//! # Atomicity
//!
//! Every operation takes the interior write lock exactly once and
//! performs all its shifts inside that critical section, so no
//! intermediate state with duplicate ranks is externally observable and
//! two concurrent reorders cannot interleave. This module is the only
//! writer permitted to touch `order` fields.

use crate::error::{PublishError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Items
// ============================================================================

/// One entry of an ordered collection (an FAQ).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    /// Dense 1-based rank, unique within the collection.
    pub order: u32,
    pub is_active: bool,
}

/// Input for [`OrderedCollection::insert`]; the rank is assigned by the
/// maintainer, never by the caller directly.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFaqItem {
    pub question: String,
    pub answer: String,
    #[serde(default = "crate::config::defaults::r#true")]
    pub is_active: bool,
}

// ============================================================================
// Collection
// ============================================================================

/// Maintainer of one dense-ranked collection scope.
#[derive(Debug, Default)]
pub struct OrderedCollection {
    items: RwLock<Vec<FaqItem>>,
}

impl OrderedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new item.
    ///
    /// `requested_order` of `None` or `Some(0)` appends at the end
    /// (`max(order) + 1`). Otherwise every existing item with
    /// `order >= requested_order` shifts up by one and the new item
    /// takes the requested rank. Requests beyond the end are clamped to
    /// append, so no gap can appear.
    pub fn insert(&self, new: NewFaqItem, requested_order: Option<u32>) -> Result<FaqItem> {
        if new.question.trim().is_empty() {
            return Err(PublishError::validation("question", "must not be empty"));
        }
        if new.answer.trim().is_empty() {
            return Err(PublishError::validation("answer", "must not be empty"));
        }

        let mut items = self.items.write();
        let append_rank = items.len() as u32 + 1;

        let order = match requested_order {
            None | Some(0) => append_rank,
            Some(r) => r.min(append_rank),
        };

        for item in items.iter_mut() {
            if item.order >= order {
                item.order += 1;
            }
        }

        let item = FaqItem {
            id: Uuid::new_v4(),
            question: new.question,
            answer: new.answer,
            order,
            is_active: new.is_active,
        };
        items.push(item.clone());
        Ok(item)
    }

    /// Move an item to a new rank, shifting the items in between.
    ///
    /// Moving up (`new_order > old`): items in `(old, new_order]` shift
    /// down by one. Moving down (`new_order < old`): items in
    /// `[new_order, old)` shift up by one. Equal is a no-op. Unknown ids
    /// fail with `NotFound` before any shifting happens.
    pub fn update_order(&self, id: Uuid, new_order: u32) -> Result<FaqItem> {
        let mut items = self.items.write();
        let len = items.len() as u32;

        let idx = items
            .iter()
            .position(|i| i.id == id)
            .ok_or(PublishError::NotFound(id))?;
        let old = items[idx].order;

        let new_order = new_order.clamp(1, len);
        if new_order == old {
            return Ok(items[idx].clone());
        }

        for (i, item) in items.iter_mut().enumerate() {
            if i == idx {
                item.order = new_order;
            } else if new_order > old && item.order > old && item.order <= new_order {
                item.order -= 1;
            } else if new_order < old && item.order >= new_order && item.order < old {
                item.order += 1;
            }
        }

        Ok(items[idx].clone())
    }

    /// Remove an item and close the rank gap it leaves behind.
    pub fn delete(&self, id: Uuid) -> Result<FaqItem> {
        let mut items = self.items.write();

        let pos = items
            .iter()
            .position(|i| i.id == id)
            .ok_or(PublishError::NotFound(id))?;
        let removed = items.swap_remove(pos);

        for item in items.iter_mut() {
            if item.order > removed.order {
                item.order -= 1;
            }
        }

        Ok(removed)
    }

    /// Flip an item's active flag without touching any rank.
    pub fn set_active(&self, id: Uuid, is_active: bool) -> Result<FaqItem> {
        let mut items = self.items.write();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(PublishError::NotFound(id))?;
        item.is_active = is_active;
        Ok(item.clone())
    }

    /// All items in rank order.
    pub fn list(&self) -> Vec<FaqItem> {
        let mut items = self.items.read().clone();
        items.sort_by_key(|i| i.order);
        items
    }

    /// Active items in rank order.
    pub fn list_active(&self) -> Vec<FaqItem> {
        let mut items: Vec<_> = self
            .items
            .read()
            .iter()
            .filter(|i| i.is_active)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.order);
        items
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(question: &str) -> NewFaqItem {
        NewFaqItem {
            question: question.into(),
            answer: format!("answer to {question}"),
            is_active: true,
        }
    }

    /// The §-invariant every test leans on: orders are exactly {1..N}.
    fn assert_dense(collection: &OrderedCollection) {
        let mut orders: Vec<u32> = collection.list().iter().map(|i| i.order).collect();
        orders.sort_unstable();
        let expected: Vec<u32> = (1..=orders.len() as u32).collect();
        assert_eq!(orders, expected, "ranks must be dense 1..=N");
    }

    #[test]
    fn test_insert_appends_by_default() {
        let faqs = OrderedCollection::new();
        let a = faqs.insert(new_item("a"), None).unwrap();
        let b = faqs.insert(new_item("b"), None).unwrap();
        let c = faqs.insert(new_item("c"), Some(0)).unwrap();

        assert_eq!(a.order, 1);
        assert_eq!(b.order, 2);
        assert_eq!(c.order, 3);
        assert_dense(&faqs);
    }

    #[test]
    fn test_insert_at_rank_shifts_up() {
        // Scenario: insert at rank 2 into [1, 2]
        let faqs = OrderedCollection::new();
        faqs.insert(new_item("first"), None).unwrap();
        let former_second = faqs.insert(new_item("second"), None).unwrap();

        let inserted = faqs.insert(new_item("between"), Some(2)).unwrap();
        assert_eq!(inserted.order, 2);

        let list = faqs.list();
        assert_eq!(list[0].question, "first");
        assert_eq!(list[1].question, "between");
        assert_eq!(list[2].question, "second");
        assert_eq!(list[2].id, former_second.id);
        assert_eq!(list[2].order, 3);
        assert_dense(&faqs);
    }

    #[test]
    fn test_insert_out_of_range_clamps_to_append() {
        let faqs = OrderedCollection::new();
        faqs.insert(new_item("a"), None).unwrap();
        let b = faqs.insert(new_item("b"), Some(99)).unwrap();

        assert_eq!(b.order, 2);
        assert_dense(&faqs);
    }

    #[test]
    fn test_insert_rejects_empty_question() {
        let faqs = OrderedCollection::new();
        let err = faqs.insert(new_item(" "), None).unwrap_err();
        assert!(matches!(err, PublishError::Validation { field: "question", .. }));
        assert!(faqs.is_empty());
    }

    #[test]
    fn test_delete_closes_gap() {
        // Scenario: [1, 2, 3], delete order 2 -> former 3 now at 2
        let faqs = OrderedCollection::new();
        faqs.insert(new_item("a"), None).unwrap();
        let b = faqs.insert(new_item("b"), None).unwrap();
        let c = faqs.insert(new_item("c"), None).unwrap();

        faqs.delete(b.id).unwrap();

        let list = faqs.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].id, c.id);
        assert_eq!(list[1].order, 2);
        assert_dense(&faqs);
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let faqs = OrderedCollection::new();
        faqs.insert(new_item("a"), None).unwrap();

        let err = faqs.delete(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, PublishError::NotFound(_)));
        // no partial shifting happened
        assert_eq!(faqs.list()[0].order, 1);
    }

    #[test]
    fn test_move_up_shifts_range_down() {
        let faqs = OrderedCollection::new();
        let a = faqs.insert(new_item("a"), None).unwrap();
        faqs.insert(new_item("b"), None).unwrap();
        faqs.insert(new_item("c"), None).unwrap();
        faqs.insert(new_item("d"), None).unwrap();

        // a: 1 -> 3; b and c shift down
        faqs.update_order(a.id, 3).unwrap();

        let questions: Vec<_> = faqs.list().into_iter().map(|i| i.question).collect();
        assert_eq!(questions, vec!["b", "c", "a", "d"]);
        assert_dense(&faqs);
    }

    #[test]
    fn test_move_down_shifts_range_up() {
        let faqs = OrderedCollection::new();
        faqs.insert(new_item("a"), None).unwrap();
        faqs.insert(new_item("b"), None).unwrap();
        faqs.insert(new_item("c"), None).unwrap();
        let d = faqs.insert(new_item("d"), None).unwrap();

        // d: 4 -> 2; b and c shift up
        faqs.update_order(d.id, 2).unwrap();

        let questions: Vec<_> = faqs.list().into_iter().map(|i| i.question).collect();
        assert_eq!(questions, vec!["a", "d", "b", "c"]);
        assert_dense(&faqs);
    }

    #[test]
    fn test_move_to_same_rank_is_noop() {
        let faqs = OrderedCollection::new();
        let a = faqs.insert(new_item("a"), None).unwrap();
        faqs.insert(new_item("b"), None).unwrap();

        let moved = faqs.update_order(a.id, 1).unwrap();
        assert_eq!(moved.order, 1);
        assert_dense(&faqs);
    }

    #[test]
    fn test_move_out_of_range_clamps() {
        let faqs = OrderedCollection::new();
        let a = faqs.insert(new_item("a"), None).unwrap();
        faqs.insert(new_item("b"), None).unwrap();

        faqs.update_order(a.id, 99).unwrap();
        let questions: Vec<_> = faqs.list().into_iter().map(|i| i.question).collect();
        assert_eq!(questions, vec!["b", "a"]);
        assert_dense(&faqs);
    }

    #[test]
    fn test_update_order_unknown_id_no_shifting() {
        let faqs = OrderedCollection::new();
        faqs.insert(new_item("a"), None).unwrap();
        faqs.insert(new_item("b"), None).unwrap();
        let before = faqs.list();

        let err = faqs.update_order(Uuid::new_v4(), 1).unwrap_err();
        assert!(matches!(err, PublishError::NotFound(_)));
        assert_eq!(faqs.list(), before);
    }

    #[test]
    fn test_set_active_keeps_ranks() {
        let faqs = OrderedCollection::new();
        faqs.insert(new_item("a"), None).unwrap();
        let b = faqs.insert(new_item("b"), None).unwrap();
        faqs.insert(new_item("c"), None).unwrap();

        faqs.set_active(b.id, false).unwrap();

        assert_eq!(faqs.list().len(), 3);
        assert_eq!(faqs.list_active().len(), 2);
        assert_dense(&faqs);
    }

    #[test]
    fn test_dense_after_mixed_operation_sequence() {
        let faqs = OrderedCollection::new();
        let mut ids = Vec::new();
        for i in 0..8 {
            ids.push(faqs.insert(new_item(&format!("q{i}")), None).unwrap().id);
            assert_dense(&faqs);
        }

        faqs.update_order(ids[0], 5).unwrap();
        assert_dense(&faqs);
        faqs.update_order(ids[7], 1).unwrap();
        assert_dense(&faqs);
        faqs.delete(ids[3]).unwrap();
        assert_dense(&faqs);
        faqs.insert(new_item("late"), Some(2)).unwrap();
        assert_dense(&faqs);
        faqs.delete(ids[1]).unwrap();
        faqs.delete(ids[6]).unwrap();
        assert_dense(&faqs);
        assert_eq!(faqs.len(), 6);
    }
}
