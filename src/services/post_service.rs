use mongodb::bson::{Bson, Document, doc};

use crate::database::{DbHandle, InsertAck, POSTS};
use crate::error::AppResult;

/// 按 `email` 字段过滤，未提供时匹配没有 email 的文档
pub(crate) fn email_filter(email: Option<&str>) -> Document {
    match email {
        Some(email) => doc! { "email": email },
        None => doc! { "email": Bson::Null },
    }
}

#[derive(Clone)]
pub struct PostService {
    store: DbHandle,
}

impl PostService {
    pub fn new(store: DbHandle) -> Self {
        Self { store }
    }

    /// 全部帖子，最新的在前
    pub async fn list_posts(&self) -> AppResult<Vec<Document>> {
        let mut posts = self.store.find(POSTS, doc! {}).await?;
        posts.reverse();
        Ok(posts)
    }

    /// `email` 发布的帖子，最新的在前
    pub async fn list_user_posts(&self, email: Option<&str>) -> AppResult<Vec<Document>> {
        let mut posts = self.store.find(POSTS, email_filter(email)).await?;
        posts.reverse();
        Ok(posts)
    }

    pub async fn create_post(&self, post: Document) -> AppResult<InsertAck> {
        self.store.insert_one(POSTS, post).await
    }
}
