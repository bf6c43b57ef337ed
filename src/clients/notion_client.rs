use chrono_tz::Tz;
use reqwest;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::page::{localize_due_date, AssignmentPage, ExistingPage};

const NOTION_API: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Serialize)]
struct CreatePageRequest {
    parent: DatabaseParent,
    properties: PageProperties,
}

#[derive(Debug, Serialize)]
struct DatabaseParent {
    database_id: String,
}

// Property names match the target database schema: Assignment (title),
// Course (select), Completed (checkbox), Due Date (date).
#[derive(Debug, Serialize)]
struct PageProperties {
    #[serde(rename = "Assignment")]
    assignment: TitleProperty,
    #[serde(rename = "Course")]
    course: SelectProperty,
    #[serde(rename = "Completed")]
    completed: CheckboxProperty,
    #[serde(rename = "Due Date", skip_serializing_if = "Option::is_none")]
    due_date: Option<DateProperty>,
}

#[derive(Debug, Serialize)]
struct TitleProperty {
    title: Vec<RichTextChunk>,
}

#[derive(Debug, Serialize)]
struct RichTextChunk {
    text: TextContent,
}

#[derive(Debug, Serialize)]
struct TextContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct SelectProperty {
    select: SelectOption,
}

#[derive(Debug, Serialize)]
struct SelectOption {
    name: String,
}

#[derive(Debug, Serialize)]
struct CheckboxProperty {
    checkbox: bool,
}

#[derive(Debug, Serialize)]
struct DateProperty {
    date: DateValue,
}

#[derive(Debug, Serialize)]
struct DateValue {
    start: String,
    time_zone: String,
}

#[derive(Debug, Serialize)]
struct MarkCompletedRequest {
    properties: CompletedOnly,
}

#[derive(Debug, Serialize)]
struct CompletedOnly {
    #[serde(rename = "Completed")]
    completed: CheckboxProperty,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<PageObject>,
}

#[derive(Debug, Deserialize)]
struct PageObject {
    id: String,
    #[serde(default)]
    properties: StoredProperties,
}

#[derive(Debug, Deserialize, Default)]
struct StoredProperties {
    #[serde(rename = "Assignment", default)]
    assignment: StoredTitle,
    #[serde(rename = "Completed", default)]
    completed: StoredCheckbox,
}

#[derive(Debug, Deserialize, Default)]
struct StoredTitle {
    #[serde(default)]
    title: Vec<StoredRichText>,
}

#[derive(Debug, Deserialize)]
struct StoredRichText {
    #[serde(default)]
    plain_text: String,
}

#[derive(Debug, Deserialize, Default)]
struct StoredCheckbox {
    #[serde(default)]
    checkbox: bool,
}

// Rows already in the database, keyed by title. Pages whose title property
// is empty cannot be matched against Canvas and are ignored.
pub async fn query_existing_pages(
    api_key: &str,
    database_id: &str,
) -> Result<HashMap<String, ExistingPage>, Box<dyn std::error::Error + Send + Sync>> {
    let url = format!("{}/databases/{}/query", NOTION_API, database_id);
    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .header("Notion-Version", NOTION_VERSION)
        .json(&serde_json::json!({}))
        .send()
        .await?;

    let body = read_success_body(response, "database query").await?;
    let parsed: QueryResponse = serde_json::from_str(&body)
        .map_err(|e| format!("Failed to parse Notion query response: {}\nRaw body: {}", e, body))?;

    let mut existing = HashMap::new();
    for page in parsed.results {
        if let Some(chunk) = page.properties.assignment.title.first() {
            existing.insert(
                chunk.plain_text.clone(),
                ExistingPage {
                    page_id: Some(page.id),
                    completed: page.properties.completed.checkbox,
                },
            );
        }
    }
    Ok(existing)
}

pub async fn create_assignment_page(
    api_key: &str,
    database_id: &str,
    page: &AssignmentPage,
    timezone: Tz,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let request = CreatePageRequest {
        parent: DatabaseParent {
            database_id: database_id.to_string(),
        },
        properties: build_properties(page, timezone),
    };

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/pages", NOTION_API))
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .header("Notion-Version", NOTION_VERSION)
        .json(&request)
        .send()
        .await?;

    read_success_body(response, "page create").await?;
    Ok(())
}

pub async fn mark_page_completed(
    api_key: &str,
    page_id: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let request = MarkCompletedRequest {
        properties: CompletedOnly {
            completed: CheckboxProperty { checkbox: true },
        },
    };

    let client = reqwest::Client::new();
    let response = client
        .patch(format!("{}/pages/{}", NOTION_API, page_id))
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .header("Notion-Version", NOTION_VERSION)
        .json(&request)
        .send()
        .await?;

    read_success_body(response, "page update").await?;
    Ok(())
}

fn build_properties(page: &AssignmentPage, timezone: Tz) -> PageProperties {
    PageProperties {
        assignment: TitleProperty {
            title: vec![RichTextChunk {
                text: TextContent {
                    content: page.title.clone(),
                },
            }],
        },
        course: SelectProperty {
            select: SelectOption {
                name: page.course.clone(),
            },
        },
        completed: CheckboxProperty {
            checkbox: page.completed,
        },
        due_date: page.due_at.as_ref().map(|due| DateProperty {
            date: DateValue {
                start: localize_due_date(due, timezone),
                time_zone: timezone.name().to_string(),
            },
        }),
    }
}

async fn read_success_body(
    response: reqwest::Response,
    what: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let status = response.status();
    let text = response.text().await?; // read the body once
    if !status.is_success() {
        return Err(format!("Notion {} failed with status {}: {}", what, status, text).into());
    }
    Ok(text)
}
