use reqwest;
use serde::de::DeserializeOwned;

use crate::models::assignment::{Assignment, Course, Submission};

const COURSES_PER_PAGE: &str = "50";
const ASSIGNMENTS_PER_PAGE: &str = "100";

pub async fn list_favorite_courses(
    base_url: &str,
    api_key: &str,
) -> Result<Vec<Course>, Box<dyn std::error::Error + Send + Sync>> {
    let url = format!("{}/api/v1/users/self/favorites/courses", base_url);
    fetch_json(&url, &[("per_page", COURSES_PER_PAGE)], api_key).await
}

pub async fn list_assignments(
    base_url: &str,
    api_key: &str,
    course_id: u64,
) -> Result<Vec<Assignment>, Box<dyn std::error::Error + Send + Sync>> {
    let url = format!("{}/api/v1/courses/{}/assignments", base_url, course_id);
    fetch_json(
        &url,
        &[("per_page", ASSIGNMENTS_PER_PAGE), ("order_by", "due_at")],
        api_key,
    )
    .await
}

pub async fn get_own_submission(
    base_url: &str,
    api_key: &str,
    course_id: u64,
    assignment_id: u64,
) -> Result<Submission, Box<dyn std::error::Error + Send + Sync>> {
    let url = format!(
        "{}/api/v1/courses/{}/assignments/{}/submissions/self",
        base_url, course_id, assignment_id
    );
    fetch_json(&url, &[], api_key).await
}

async fn fetch_json<T: DeserializeOwned>(
    url: &str,
    query: &[(&str, &str)],
    api_key: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .query(query)
        .header("Authorization", format!("Bearer {}", api_key))
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?; // read the body once

    if !status.is_success() {
        return Err(format!("Canvas request {} failed with status {}: {}", url, status, text).into());
    }

    serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse Canvas response: {}\nRaw body: {}", e, text).into())
}
