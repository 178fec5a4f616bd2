//! Document tables

use indexmap::IndexMap;

pub mod layer;

pub use layer::Layer;

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's name
    fn name(&self) -> &str;

    /// Set the entry's name
    fn set_name(&mut self, name: String);

    /// Position of the entry in its table
    fn index(&self) -> usize;

    /// Record the entry's position; called by the owning table
    fn set_index(&mut self, index: usize);
}

/// Insertion-ordered table of named entries
///
/// Names are unique ignoring case. An entry's index is its insertion
/// position, which is what model objects refer to.
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    /// Entries stored by name (case-insensitive)
    entries: IndexMap<String, T>,
}

fn key(name: &str) -> String {
    name.to_uppercase()
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add an entry; returns its index
    pub fn add(&mut self, mut entry: T) -> Result<usize, String> {
        let name = key(entry.name());
        if self.entries.contains_key(&name) {
            return Err(format!("Entry '{}' already exists in table", entry.name()));
        }
        let index = self.entries.len();
        entry.set_index(index);
        self.entries.insert(name, entry);
        Ok(index)
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&key(name))
    }

    /// Get a mutable entry by name (case-insensitive)
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&key(name))
    }

    /// Get an entry by index
    pub fn get_by_index(&self, index: usize) -> Option<&T> {
        self.entries.get_index(index).map(|(_, e)| e)
    }

    /// Index of the entry called `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(&key(name))
    }

    /// Remove an entry by name; later entries move up one index
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let removed = self.entries.shift_remove(&key(name))?;
        for (i, entry) in self.entries.values_mut().enumerate() {
            entry.set_index(i);
        }
        Some(removed)
    }

    /// Check if an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&key(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in index order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    /// Get all entry names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_add_and_get() {
        let mut table = Table::new();
        assert_eq!(table.add(Layer::new("Walls")), Ok(0));
        assert_eq!(table.add(Layer::new("Slabs")), Ok(1));

        assert!(table.contains("walls")); // Case-insensitive
        assert_eq!(table.index_of("SLABS"), Some(1));
        assert_eq!(table.get_by_index(1).map(|l| l.name.as_str()), Some("Slabs"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_duplicate_entry() {
        let mut table = Table::new();
        assert!(table.add(Layer::new("Test")).is_ok());
        assert!(table.add(Layer::new("test")).is_err()); // Same name, different case
    }

    #[test]
    fn test_table_remove_reindexes() {
        let mut table = Table::new();
        for name in ["a", "b", "c"] {
            table.add(Layer::new(name)).unwrap();
        }

        let removed = table.remove("A");
        assert!(removed.is_some());
        assert_eq!(table.get("c").map(|l| l.index), Some(1));
        assert_eq!(table.len(), 2);
    }
}
