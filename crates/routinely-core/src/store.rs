//! In-memory entity store.
//!
//! Holds the authoritative todo and routine collections. A dumb container:
//! O(1) lookup by id, insertion-order iteration for display, no validation.
//! Uses IndexMap so display order survives updates and removals.

use indexmap::IndexMap;

use crate::routines::Routine;
use crate::todo::TodoItem;

/// The two entity collections, in display order (most-recent-first).
#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    todos: IndexMap<String, TodoItem>,
    routines: IndexMap<String, Routine>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Todos ---

    pub fn list_todos(&self) -> impl Iterator<Item = &TodoItem> {
        self.todos.values()
    }

    pub fn todo(&self, id: &str) -> Option<&TodoItem> {
        self.todos.get(id)
    }

    pub fn todo_mut(&mut self, id: &str) -> Option<&mut TodoItem> {
        self.todos.get_mut(id)
    }

    /// Insert at the front of display order (newest first).
    pub fn insert_todo(&mut self, todo: TodoItem) {
        self.todos.shift_insert(0, todo.id.clone(), todo);
    }

    /// Replace an existing todo in place, keeping its display position.
    /// Returns false if the id is unknown.
    pub fn update_todo(&mut self, todo: TodoItem) -> bool {
        match self.todos.get_mut(&todo.id) {
            Some(slot) => {
                *slot = todo;
                true
            }
            None => false,
        }
    }

    /// Remove preserving the order of the remaining entries.
    pub fn remove_todo(&mut self, id: &str) -> Option<TodoItem> {
        self.todos.shift_remove(id)
    }

    pub fn todo_count(&self) -> usize {
        self.todos.len()
    }

    // --- Routines ---

    pub fn list_routines(&self) -> impl Iterator<Item = &Routine> {
        self.routines.values()
    }

    pub fn routine(&self, id: &str) -> Option<&Routine> {
        self.routines.get(id)
    }

    /// Insert at the front of display order (newest first).
    pub fn insert_routine(&mut self, routine: Routine) {
        self.routines.shift_insert(0, routine.id.clone(), routine);
    }

    /// Replace an existing routine in place, keeping its display position.
    /// Returns false if the id is unknown.
    pub fn update_routine(&mut self, routine: Routine) -> bool {
        match self.routines.get_mut(&routine.id) {
            Some(slot) => {
                *slot = routine;
                true
            }
            None => false,
        }
    }

    pub fn remove_routine(&mut self, id: &str) -> Option<Routine> {
        self.routines.shift_remove(id)
    }

    pub fn routine_count(&self) -> usize {
        self.routines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todos_iterate_newest_first() {
        let mut store = EntityStore::new();
        let first = TodoItem::new("Draft project proposal").unwrap();
        let second = TodoItem::new("Schedule team meeting").unwrap();
        store.insert_todo(first.clone());
        store.insert_todo(second.clone());

        let ids: Vec<&str> = store.list_todos().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[test]
    fn update_keeps_display_position() {
        let mut store = EntityStore::new();
        let a = TodoItem::new("a").unwrap();
        let b = TodoItem::new("b").unwrap();
        store.insert_todo(a.clone());
        store.insert_todo(b.clone());

        let mut edited = a.clone();
        edited.set_text("a, edited").unwrap();
        assert!(store.update_todo(edited));

        let texts: Vec<&str> = store.list_todos().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a, edited"]);
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut store = EntityStore::new();
        let a = TodoItem::new("a").unwrap();
        let b = TodoItem::new("b").unwrap();
        let c = TodoItem::new("c").unwrap();
        store.insert_todo(a.clone());
        store.insert_todo(b.clone());
        store.insert_todo(c.clone());

        assert!(store.remove_todo(&b.id).is_some());
        let ids: Vec<&str> = store.list_todos().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![c.id.as_str(), a.id.as_str()]);
        assert!(store.remove_todo("missing").is_none());
    }
}
