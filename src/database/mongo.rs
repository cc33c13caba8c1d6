use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection, Database};

use crate::config::DatabaseConfig;
use crate::database::store::{DocumentStore, InsertAck, UpdateAck, bson_to_json};
use crate::error::AppResult;

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let client = Client::with_uri_str(&config.url).await?;
        let db = client.database(&config.name);

        // ping 失败只记录日志，不阻止启动
        match db.run_command(doc! { "ping": 1 }).await {
            Ok(_) => log::info!("Pinged MongoDB deployment, database '{}' ready", config.name),
            Err(e) => log::error!("MongoDB ping failed: {e}"),
        }

        Ok(Self { db })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: Document) -> AppResult<Vec<Document>> {
        let cursor = self.collection(collection).find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> AppResult<InsertAck> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: bson_to_json(result.inserted_id),
        })
    }

    async fn upsert_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> AppResult<UpdateAck> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .upsert(true)
            .await?;

        let upserted_count = u64::from(result.upserted_id.is_some());
        Ok(UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(bson_to_json),
            upserted_count,
        })
    }
}
