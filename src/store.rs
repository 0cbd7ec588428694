use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::seed::SeedError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub completed: bool,
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn list_all(&self) -> Vec<Todo>;
    async fn get_by_id(&self, id: i32) -> Result<Todo, AppError>;
    async fn create(&self, title: String) -> Result<Todo, AppError>;
    async fn update(&self, id: i32, title: String, completed: bool) -> Result<Todo, AppError>;
    async fn delete(&self, id: i32) -> Result<String, AppError>;
}

#[derive(Debug)]
struct TodoCollection {
    todos: Vec<Todo>,
    // Never decreases, so a deleted id is never handed out again.
    next_id: Option<i32>,
}

impl TodoCollection {
    fn position(&self, id: i32) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }
}

/// Todo collection held in process memory for the lifetime of the server.
///
/// Reads share the lock; create, update and delete hold it exclusively for the
/// whole scan-and-mutate step.
#[derive(Debug)]
pub struct InMemoryTodoStore {
    inner: RwLock<TodoCollection>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TodoCollection {
                todos: Vec::new(),
                next_id: Some(1),
            }),
        }
    }

    /// Builds a store from decoded seed records, keeping their order.
    pub fn from_seed(todos: Vec<Todo>) -> Result<Self, SeedError> {
        let mut seen = std::collections::HashSet::with_capacity(todos.len());
        for todo in &todos {
            if !seen.insert(todo.id) {
                return Err(SeedError::DuplicateId(todo.id));
            }
        }

        let next_id = match todos.iter().map(|todo| todo.id).max() {
            Some(max_id) => max_id.checked_add(1),
            None => Some(1),
        };

        Ok(Self {
            inner: RwLock::new(TodoCollection { todos, next_id }),
        })
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn list_all(&self) -> Vec<Todo> {
        self.inner.read().await.todos.clone()
    }

    async fn get_by_id(&self, id: i32) -> Result<Todo, AppError> {
        let collection = self.inner.read().await;
        collection
            .todos
            .iter()
            .find(|todo| todo.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(id))
    }

    async fn create(&self, title: String) -> Result<Todo, AppError> {
        let mut collection = self.inner.write().await;
        let id = collection
            .next_id
            .ok_or_else(|| AppError::internal("todo id space exhausted"))?;

        let todo = Todo {
            id,
            title,
            completed: false,
        };
        collection.todos.push(todo.clone());
        collection.next_id = id.checked_add(1);
        Ok(todo)
    }

    async fn update(&self, id: i32, title: String, completed: bool) -> Result<Todo, AppError> {
        let mut collection = self.inner.write().await;
        let index = collection.position(id).ok_or_else(|| AppError::not_found(id))?;

        let todo = &mut collection.todos[index];
        todo.title = title;
        todo.completed = completed;
        Ok(todo.clone())
    }

    async fn delete(&self, id: i32) -> Result<String, AppError> {
        let mut collection = self.inner.write().await;
        let index = collection.position(id).ok_or_else(|| AppError::not_found(id))?;

        collection.todos.remove(index);
        Ok(format!("todo with id {id} deleted"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn todo(id: i32, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            completed,
        }
    }

    #[tokio::test]
    async fn creates_on_empty_store_assign_sequential_ids() {
        let store = InMemoryTodoStore::new();

        let mut ids = Vec::new();
        for title in ["a", "b", "c", "d"] {
            ids.push(store.create(title.to_string()).await.expect("create").id);
        }

        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn created_todo_is_readable_and_not_completed() {
        let store = InMemoryTodoStore::new();
        let created = store.create("write docs".to_string()).await.expect("create");

        let fetched = store.get_by_id(created.id).await.expect("get");
        assert_eq!(fetched.title, "write docs");
        assert!(!fetched.completed);
    }

    #[tokio::test]
    async fn empty_title_is_accepted() {
        let store = InMemoryTodoStore::new();
        let created = store.create(String::new()).await.expect("create");
        assert_eq!(created.title, "");
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_position() {
        let store = InMemoryTodoStore::from_seed(vec![
            todo(1, "a", false),
            todo(2, "b", false),
            todo(3, "c", false),
        ])
        .expect("valid seed");

        let updated = store
            .update(2, "bee".to_string(), true)
            .await
            .expect("update");
        assert_eq!(updated, todo(2, "bee", true));

        let all = store.list_all().await;
        assert_eq!(
            all,
            vec![todo(1, "a", false), todo(2, "bee", true), todo(3, "c", false)]
        );
        assert_eq!(store.get_by_id(2).await.expect("get"), todo(2, "bee", true));
    }

    #[tokio::test]
    async fn delete_removes_record_and_shifts_rest() {
        let store = InMemoryTodoStore::from_seed(vec![
            todo(1, "a", false),
            todo(2, "b", true),
            todo(3, "c", false),
        ])
        .expect("valid seed");

        let message = store.delete(2).await.expect("delete");
        assert_eq!(message, "todo with id 2 deleted");

        let all = store.list_all().await;
        assert_eq!(all, vec![todo(1, "a", false), todo(3, "c", false)]);
        assert!(matches!(
            store.get_by_id(2).await,
            Err(AppError::NotFound { id: 2 })
        ));
    }

    #[tokio::test]
    async fn missing_id_fails_and_leaves_collection_unchanged() {
        let seed = vec![todo(1, "a", false), todo(2, "b", true)];
        let store = InMemoryTodoStore::from_seed(seed.clone()).expect("valid seed");

        assert!(matches!(
            store.get_by_id(9).await,
            Err(AppError::NotFound { id: 9 })
        ));
        assert!(matches!(
            store.update(9, "x".to_string(), true).await,
            Err(AppError::NotFound { id: 9 })
        ));
        assert!(matches!(
            store.delete(9).await,
            Err(AppError::NotFound { id: 9 })
        ));

        assert_eq!(store.list_all().await, seed);
    }

    #[tokio::test]
    async fn deleted_last_id_is_not_reused() {
        let store = InMemoryTodoStore::from_seed(vec![todo(1, "a", false), todo(5, "e", false)])
            .expect("valid seed");

        store.delete(5).await.expect("delete");
        let created = store.create("f".to_string()).await.expect("create");

        assert_eq!(created.id, 6);
    }

    #[tokio::test]
    async fn next_id_follows_highest_seed_id_not_last() {
        let store = InMemoryTodoStore::from_seed(vec![todo(7, "g", false), todo(3, "c", false)])
            .expect("valid seed");

        let created = store.create("h".to_string()).await.expect("create");
        assert_eq!(created.id, 8);
    }

    #[tokio::test]
    async fn exhausted_id_space_is_an_internal_error() {
        let store = InMemoryTodoStore::from_seed(vec![todo(i32::MAX, "last", false)])
            .expect("valid seed");

        let err = store
            .create("overflow".to_string())
            .await
            .expect_err("no id left");
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(store.list_all().await.len(), 1);
    }

    #[test]
    fn duplicate_seed_ids_are_rejected() {
        let err = InMemoryTodoStore::from_seed(vec![todo(1, "a", false), todo(1, "b", false)])
            .expect_err("duplicate ids");
        assert!(matches!(err, SeedError::DuplicateId(1)));
    }

    #[tokio::test]
    async fn concurrent_creates_assign_unique_ids() {
        let store = Arc::new(InMemoryTodoStore::new());

        let handles = (0..32)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(format!("task {n}")).await })
            })
            .collect::<Vec<_>>();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("join").expect("create").id);
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=32).collect::<Vec<_>>());
    }
}
