use async_trait::async_trait;

use crate::clients::canvas_client;
use crate::models::assignment::{Assignment, Course, Submission};

#[async_trait]
pub trait CanvasClient: Send + Sync {
    async fn favorite_courses(
        &self,
    ) -> Result<Vec<Course>, Box<dyn std::error::Error + Send + Sync>>;

    async fn assignments(
        &self,
        course_id: u64,
    ) -> Result<Vec<Assignment>, Box<dyn std::error::Error + Send + Sync>>;

    async fn own_submission(
        &self,
        course_id: u64,
        assignment_id: u64,
    ) -> Result<Submission, Box<dyn std::error::Error + Send + Sync>>;
}

pub struct CanvasService {
    base_url: String,
    api_key: String,
}

impl CanvasService {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self { base_url, api_key }
    }
}

#[async_trait]
impl CanvasClient for CanvasService {
    async fn favorite_courses(
        &self,
    ) -> Result<Vec<Course>, Box<dyn std::error::Error + Send + Sync>> {
        canvas_client::list_favorite_courses(&self.base_url, &self.api_key).await
    }

    async fn assignments(
        &self,
        course_id: u64,
    ) -> Result<Vec<Assignment>, Box<dyn std::error::Error + Send + Sync>> {
        canvas_client::list_assignments(&self.base_url, &self.api_key, course_id).await
    }

    async fn own_submission(
        &self,
        course_id: u64,
        assignment_id: u64,
    ) -> Result<Submission, Box<dyn std::error::Error + Send + Sync>> {
        canvas_client::get_own_submission(&self.base_url, &self.api_key, course_id, assignment_id)
            .await
    }
}
