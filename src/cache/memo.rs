use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;
use parking_lot::RwLock;

use crate::handicap::{IndexValue, PlayerId};

/// Identifies one index computation. A changed revision or formula simply misses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoKey {
    pub player_id: PlayerId,
    pub cutoff: Option<NaiveDate>,
    pub revision: i64,
    pub tee: String,
    pub formula_version: String,
}

/// In-memory memo of settled indexes (`None` = no qualifying rounds).
pub struct IndexMemo {
    entries: RwLock<HashMap<MemoKey, Option<IndexValue>>>,
    capacity: usize,
}

impl IndexMemo {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &MemoKey) -> Option<Option<IndexValue>> {
        self.entries.read().get(key).copied()
    }

    pub fn insert(&self, key: MemoKey, value: Option<IndexValue>) {
        let mut entries = self.entries.write();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            debug!("Index memo full ({} entries), clearing", entries.len());
            entries.clear();
        }
        entries.insert(key, value);
    }

    pub fn get_or_try_insert<E>(
        &self,
        key: MemoKey,
        compute: impl FnOnce() -> Result<Option<IndexValue>, E>,
    ) -> Result<Option<IndexValue>, E> {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let value = compute()?;
        self.insert(key, value);
        Ok(value)
    }

    /// Drops every entry of a player, whatever its revision.
    pub fn invalidate_player(&self, player_id: PlayerId) {
        self.entries.write().retain(|key, _| key.player_id != player_id);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(player_id: PlayerId, revision: i64) -> MemoKey {
        MemoKey {
            player_id,
            cutoff: NaiveDate::from_ymd_opt(2024, 5, 1),
            revision,
            tee: "regular".to_string(),
            formula_version: "v1".to_string(),
        }
    }

    #[test]
    fn test_memo_hit_skips_compute() {
        let memo = IndexMemo::new(16);
        let first: Result<_, ()> = memo.get_or_try_insert(key(1, 0), || Ok(Some(8.5)));
        assert_eq!(first, Ok(Some(8.5)));

        let second: Result<_, ()> = memo.get_or_try_insert(key(1, 0), || panic!("should be cached"));
        assert_eq!(second, Ok(Some(8.5)));
    }

    #[test]
    fn test_new_revision_misses() {
        let memo = IndexMemo::new(16);
        memo.insert(key(1, 0), Some(8.5));
        assert_eq!(memo.get(&key(1, 1)), None);
        assert_eq!(memo.get(&key(1, 0)), Some(Some(8.5)));
    }

    #[test]
    fn test_errors_are_not_cached() {
        let memo = IndexMemo::new(16);
        let failed: Result<_, &str> = memo.get_or_try_insert(key(1, 0), || Err("unreachable"));
        assert!(failed.is_err());
        assert!(memo.is_empty());
    }

    #[test]
    fn test_invalidate_player() {
        let memo = IndexMemo::new(16);
        memo.insert(key(1, 0), Some(8.5));
        memo.insert(key(1, 1), None);
        memo.insert(key(2, 0), Some(12.0));

        memo.invalidate_player(1);
        assert_eq!(memo.len(), 1);
        assert_eq!(memo.get(&key(2, 0)), Some(Some(12.0)));
    }

    #[test]
    fn test_capacity_bound() {
        let memo = IndexMemo::new(2);
        memo.insert(key(1, 0), Some(1.0));
        memo.insert(key(2, 0), Some(2.0));
        memo.insert(key(3, 0), Some(3.0));
        assert_eq!(memo.len(), 1);
        assert_eq!(memo.get(&key(3, 0)), Some(Some(3.0)));
    }
}
