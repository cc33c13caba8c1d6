use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document, oid::ObjectId};
use tokio::sync::RwLock;

use crate::database::store::{DocumentStore, InsertAck, UpdateAck, bson_to_json};
use crate::error::AppResult;

/// 进程内文档存储，路由用到的操作与 Mongo 后端行为一致
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match document.get(key) {
        Some(actual) => actual == expected,
        None => matches!(expected, Bson::Null),
    })
}

fn with_id(id: Bson, document: Document) -> Document {
    let mut stored = Document::new();
    stored.insert("_id", id);
    for (key, value) in document {
        stored.insert(key, value);
    }
    stored
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches_filter(doc, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(&self, collection: &str, document: Document) -> AppResult<InsertAck> {
        let id = document
            .get("_id")
            .cloned()
            .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));

        let mut document = document;
        document.remove("_id");
        let stored = with_id(id.clone(), document);

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        Ok(InsertAck {
            acknowledged: true,
            inserted_id: bson_to_json(id),
        })
    }

    async fn upsert_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> AppResult<UpdateAck> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = docs.iter_mut().find(|doc| matches_filter(doc, &filter)) {
            let mut modified = false;
            for (key, value) in fields {
                // `_id` 不可修改
                if key == "_id" {
                    continue;
                }
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
                upserted_count: 0,
            });
        }

        let id = Bson::ObjectId(ObjectId::new());
        let mut inserted = filter;
        for (key, value) in fields {
            inserted.insert(key, value);
        }
        inserted.remove("_id");
        docs.push(with_id(id.clone(), inserted));

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(bson_to_json(id)),
            upserted_count: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_find_preserves_insertion_order_and_filters() {
        let store = MemoryStore::new();
        store.insert_one("posts", doc! { "email": "a@x.io", "n": 1 }).await.unwrap();
        store.insert_one("posts", doc! { "email": "b@x.io", "n": 2 }).await.unwrap();
        store.insert_one("posts", doc! { "email": "a@x.io", "n": 3 }).await.unwrap();

        let all = store.find("posts", doc! {}).await.unwrap();
        let ns: Vec<i32> = all.iter().map(|d| d.get_i32("n").unwrap()).collect();
        assert_eq!(ns, vec![1, 2, 3]);

        let mine = store.find("posts", doc! { "email": "a@x.io" }).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(store.find("users", doc! {}).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_object_id_first() {
        let store = MemoryStore::new();
        let ack = store.insert_one("users", doc! { "email": "a@x.io" }).await.unwrap();
        assert!(ack.acknowledged);

        let users = store.find("users", doc! {}).await.unwrap();
        let (first_key, first_value) = users[0].iter().next().unwrap();
        assert_eq!(first_key, "_id");
        assert_eq!(bson_to_json(first_value.clone()), ack.inserted_id);
    }

    #[tokio::test]
    async fn test_null_filter_matches_missing_field() {
        let store = MemoryStore::new();
        store.insert_one("users", doc! { "name": "anon" }).await.unwrap();
        store.insert_one("users", doc! { "email": "a@x.io" }).await.unwrap();

        let found = store.find("users", doc! { "email": Bson::Null }).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("name").unwrap(), "anon");
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_updates_in_place() {
        let store = MemoryStore::new();

        let first = store
            .upsert_one("users", doc! { "email": "a@x.io" }, doc! { "name": "Ann" })
            .await
            .unwrap();
        assert_eq!(first.upserted_count, 1);
        assert_eq!(first.matched_count, 0);

        let second = store
            .upsert_one("users", doc! { "email": "a@x.io" }, doc! { "name": "Anna" })
            .await
            .unwrap();
        assert_eq!(second.matched_count, 1);
        assert_eq!(second.modified_count, 1);
        assert!(second.upserted_id.is_none());

        let unchanged = store
            .upsert_one("users", doc! { "email": "a@x.io" }, doc! { "name": "Anna" })
            .await
            .unwrap();
        assert_eq!(unchanged.modified_count, 0);

        let users = store.find("users", doc! {}).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].get_str("name").unwrap(), "Anna");
        assert_eq!(users[0].get_str("email").unwrap(), "a@x.io");
    }

    #[tokio::test]
    async fn test_upsert_keeps_existing_id() {
        let store = MemoryStore::new();
        let created = store
            .upsert_one("users", doc! { "email": "a@x.io" }, doc! { "name": "Ann" })
            .await
            .unwrap();
        let first_id = created.upserted_id.unwrap();

        let ack = store
            .upsert_one(
                "users",
                doc! { "email": "a@x.io" },
                doc! { "_id": "replaced", "name": "Anna" },
            )
            .await
            .unwrap();
        assert_eq!(ack.matched_count, 1);
        assert_eq!(ack.modified_count, 1);

        let users = store.find("users", doc! {}).await.unwrap();
        assert_eq!(bson_to_json(users[0].get("_id").unwrap().clone()), first_id);
        assert_eq!(users[0].get_str("name").unwrap(), "Anna");

        let id_only = store
            .upsert_one("users", doc! { "email": "a@x.io" }, doc! { "_id": "replaced" })
            .await
            .unwrap();
        assert_eq!(id_only.modified_count, 0);
    }
}
