use mongodb::bson::{Document, doc};

use crate::database::{DbHandle, InsertAck, USERS, UpdateAck};
use crate::error::AppResult;
use crate::services::post_service::email_filter;

#[derive(Clone)]
pub struct UserService {
    store: DbHandle,
}

impl UserService {
    pub fn new(store: DbHandle) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> AppResult<Vec<Document>> {
        self.store.find(USERS, doc! {}).await
    }

    /// 按 `email` 查询用户。注册不做唯一性校验，可能返回多条
    pub async fn find_by_email(&self, email: Option<&str>) -> AppResult<Vec<Document>> {
        self.store.find(USERS, email_filter(email)).await
    }

    pub async fn register(&self, user: Document) -> AppResult<InsertAck> {
        self.store.insert_one(USERS, user).await
    }

    /// 更新 `email` 对应用户的资料字段，不存在时创建
    pub async fn upsert_profile(&self, email: &str, profile: Document) -> AppResult<UpdateAck> {
        self.store
            .upsert_one(USERS, doc! { "email": email }, profile)
            .await
    }
}
