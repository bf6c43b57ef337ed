use async_trait::async_trait;
use chrono_tz::Tz;
use std::collections::HashMap;

use crate::clients::notion_client;
use crate::models::page::{AssignmentPage, ExistingPage};

#[async_trait]
pub trait NotionClient: Send + Sync {
    async fn existing_pages(
        &self,
    ) -> Result<HashMap<String, ExistingPage>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_page(
        &self,
        page: &AssignmentPage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn mark_completed(
        &self,
        page_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub struct NotionService {
    api_key: String,
    database_id: String,
    timezone: Tz,
}

impl NotionService {
    pub fn new(api_key: String, database_id: String, timezone: Tz) -> Self {
        Self {
            api_key,
            database_id,
            timezone,
        }
    }
}

#[async_trait]
impl NotionClient for NotionService {
    async fn existing_pages(
        &self,
    ) -> Result<HashMap<String, ExistingPage>, Box<dyn std::error::Error + Send + Sync>> {
        notion_client::query_existing_pages(&self.api_key, &self.database_id).await
    }

    async fn create_page(
        &self,
        page: &AssignmentPage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        notion_client::create_assignment_page(&self.api_key, &self.database_id, page, self.timezone)
            .await
    }

    async fn mark_completed(
        &self,
        page_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        notion_client::mark_page_completed(&self.api_key, page_id).await
    }
}
