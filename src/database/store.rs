use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::AppResult;

pub const POSTS: &str = "posts";
pub const USERS: &str = "users";

/// 插入文档后的确认结果
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    #[schema(value_type = String)]
    pub inserted_id: Value,
}

/// upsert 更新后的确认结果
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<Value>,
    pub upserted_count: u64,
}

/// 路由所需的最小文档集合接口
///
/// `find` 按插入顺序返回文档。过滤条件为字段相等，值为 `null` 时也匹配缺失该字段的文档
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: Document) -> AppResult<Vec<Document>>;

    async fn insert_one(&self, collection: &str, document: Document) -> AppResult<InsertAck>;

    /// 以 `$set` 方式更新第一条匹配 `filter` 的文档，没有匹配时插入 `filter + fields`
    async fn upsert_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> AppResult<UpdateAck>;
}

/// 存储值转为响应 JSON，ObjectId 转为十六进制字符串
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

pub fn json_to_document(body: Map<String, Value>) -> AppResult<Document> {
    Ok(mongodb::bson::to_document(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_object_ids_render_as_hex() {
        let oid = ObjectId::new();
        let value = document_to_json(doc! {
            "_id": oid,
            "email": "a@example.com",
            "tags": [ { "ref": oid } ],
        });

        assert_eq!(value["_id"], json!(oid.to_hex()));
        assert_eq!(value["tags"][0]["ref"], json!(oid.to_hex()));
        assert_eq!(value["email"], json!("a@example.com"));
    }

    #[test]
    fn test_json_body_converts_to_document() {
        let body = json!({ "email": "a@example.com", "likes": 3, "nested": { "ok": true } });
        let Value::Object(map) = body else {
            unreachable!()
        };
        let doc = json_to_document(map).unwrap();
        assert_eq!(doc.get_str("email").unwrap(), "a@example.com");
        assert!(doc.get_document("nested").unwrap().get_bool("ok").unwrap());
    }

    #[test]
    fn test_update_ack_uses_driver_field_names() {
        let ack = UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(json!("abc")),
            upserted_count: 1,
        };
        let value = serde_json::to_value(ack).unwrap();
        assert_eq!(value["upsertedId"], json!("abc"));
        assert_eq!(value["matchedCount"], json!(0));
    }
}
