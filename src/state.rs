//! 表示中の在庫
//!
//! 書き換えるのは更新ループだけ。更新は新しい `Inventory` を丸ごと作ってから差し替え、
//! 作りかけのものを載せることはない。

use std::sync::Arc;
use tool_library_common::Inventory;

#[derive(Debug, Default)]
pub struct InventoryState {
    current: Arc<Inventory>,
    generation: u64,
}

impl InventoryState {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            current: Arc::new(inventory),
            generation: 1,
        }
    }

    /// 現在の在庫（差し替え後も手元の参照は古いまま使える）
    pub fn current(&self) -> Arc<Inventory> {
        Arc::clone(&self.current)
    }

    /// 在庫を差し替え、新しい世代番号を返す
    pub fn replace(&mut self, inventory: Inventory) -> u64 {
        self.current = Arc::new(inventory);
        self.generation += 1;
        self.generation
    }

    /// 差し替え回数（0 は未ロード）
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loaded(&self) -> bool {
        self.generation > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tool_library_common::{InventoryRecord, LastChecked, Provenance};

    fn inventory(names: &[&str]) -> Inventory {
        Inventory::build(
            names
                .iter()
                .map(|name| InventoryRecord {
                    provenance: Provenance::Material,
                    name: name.to_string(),
                    specific_name: String::new(),
                    category: String::new(),
                    quantity: String::new(),
                    last_checked: LastChecked::NotAvailable,
                    location: String::new(),
                    condition: "NA".to_string(),
                    index: 0,
                })
                .collect(),
        )
    }

    #[test]
    fn test_default_is_unloaded_and_empty() {
        let state = InventoryState::default();
        assert!(!state.is_loaded());
        assert!(state.current().is_empty());
    }

    #[test]
    fn test_replace_swaps_whole_inventory() {
        let mut state = InventoryState::new(inventory(&["Tape"]));
        let before = state.current();

        let generation = state.replace(inventory(&["Glue", "Wood"]));
        assert_eq!(generation, 2);
        assert_eq!(state.current().len(), 2);
        // 差し替え前に取った参照は古い在庫のまま
        assert_eq!(before.len(), 1);
        assert_eq!(before.records()[0].name, "Tape");
    }
}
