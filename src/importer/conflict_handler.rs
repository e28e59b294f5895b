// ==========================================
// IGM Loader - Conflict handler
// ==========================================
// Rows sharing a (talent, date, campaign, product) key are
// ambiguous: every member of the group is reported, the first
// occurrence included.
// ==========================================

use crate::domain::RawRow;
use crate::importer::importer_trait::ConflictHandler as ConflictHandlerTrait;
use std::collections::HashMap;

pub struct ConflictHandler;

impl ConflictHandler {
    fn display_key(key: &[String; 4]) -> String {
        key.join("|")
    }
}

impl ConflictHandlerTrait for ConflictHandler {
    fn detect_duplicates(&self, rows: &[RawRow]) -> Vec<(usize, String)> {
        let mut group_sizes: HashMap<[String; 4], usize> = HashMap::new();
        let keys: Vec<[String; 4]> = rows.iter().map(RawRow::uniqueness_key).collect();

        for key in &keys {
            *group_sizes.entry(key.clone()).or_insert(0) += 1;
        }

        keys.iter()
            .enumerate()
            .filter(|(_, key)| group_sizes.get(*key).copied().unwrap_or(0) > 1)
            .map(|(pos, key)| (pos, Self::display_key(key)))
            .collect()
    }
}
