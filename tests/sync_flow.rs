use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use canvasSync::models::assignment::{Assignment, Course, Submission};
use canvasSync::models::page::{AssignmentPage, ExistingPage};
use canvasSync::service::canvas_service::CanvasClient;
use canvasSync::service::course_mapping::CourseMappings;
use canvasSync::service::notion_service::NotionClient;
use canvasSync::service::sync_flow::sync_tick;
use chrono::{TimeZone, Utc};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Default)]
struct FakeCanvas {
    courses_error: Option<String>,
    courses: Vec<Course>,
    assignments: HashMap<u64, Vec<Assignment>>,
    submitted: HashSet<(u64, u64)>,
    submission_error: bool,
}

#[async_trait]
impl CanvasClient for FakeCanvas {
    async fn favorite_courses(&self) -> Result<Vec<Course>, BoxError> {
        match &self.courses_error {
            Some(err) => Err(err.clone().into()),
            None => Ok(self.courses.clone()),
        }
    }

    async fn assignments(&self, course_id: u64) -> Result<Vec<Assignment>, BoxError> {
        Ok(self.assignments.get(&course_id).cloned().unwrap_or_default())
    }

    async fn own_submission(
        &self,
        course_id: u64,
        assignment_id: u64,
    ) -> Result<Submission, BoxError> {
        if self.submission_error {
            return Err("submission lookup failed".to_string().into());
        }
        let state = if self.submitted.contains(&(course_id, assignment_id)) {
            "submitted"
        } else {
            "unsubmitted"
        };
        Ok(Submission {
            workflow_state: Some(state.to_string()),
        })
    }
}

#[derive(Default)]
struct FakeNotion {
    existing: HashMap<String, ExistingPage>,
    fail_titles: Vec<String>,
    created: Mutex<Vec<AssignmentPage>>,
    completed: Mutex<Vec<String>>,
}

impl FakeNotion {
    fn created_pages(&self) -> Vec<AssignmentPage> {
        self.created.lock().unwrap().clone()
    }

    fn completed_pages(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotionClient for FakeNotion {
    async fn existing_pages(&self) -> Result<HashMap<String, ExistingPage>, BoxError> {
        Ok(self.existing.clone())
    }

    async fn create_page(&self, page: &AssignmentPage) -> Result<(), BoxError> {
        if self.fail_titles.contains(&page.title) {
            return Err("status 500".to_string().into());
        }
        self.created.lock().unwrap().push(page.clone());
        Ok(())
    }

    async fn mark_completed(&self, page_id: &str) -> Result<(), BoxError> {
        self.completed.lock().unwrap().push(page_id.to_string());
        Ok(())
    }
}

fn one_course_canvas(assignments: Vec<Assignment>) -> FakeCanvas {
    FakeCanvas {
        courses: vec![Course {
            id: 1,
            name: Some("CS 101 - Intro to Programming".to_string()),
        }],
        assignments: HashMap::from([(1, assignments)]),
        ..Default::default()
    }
}

fn intro_mappings() -> CourseMappings {
    CourseMappings::parse("cs 101 - intro to programming = CS101").expect("should parse")
}

#[tokio::test]
async fn creates_one_row_per_assignment_with_normalized_course() {
    let canvas = one_course_canvas(vec![Assignment {
        id: 10,
        name: Some("Problem Set 3".to_string()),
        due_at: Some(Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 0).unwrap()),
    }]);
    let notion = FakeNotion::default();

    let summary = sync_tick(&canvas, &notion, &intro_mappings())
        .await
        .expect("sync should succeed");

    assert_eq!(summary.added, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(
        notion.created_pages(),
        vec![AssignmentPage {
            title: "Problem Set 3".to_string(),
            course: "CS101".to_string(),
            due_at: Some(Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 0).unwrap()),
            completed: false,
        }]
    );
}

#[tokio::test]
async fn zero_assignments_writes_nothing() {
    let canvas = one_course_canvas(vec![]);
    let notion = FakeNotion::default();

    let summary = sync_tick(&canvas, &notion, &intro_mappings())
        .await
        .expect("sync should succeed");

    assert_eq!(summary, Default::default());
    assert!(notion.created_pages().is_empty());
    assert!(notion.completed_pages().is_empty());
}

#[tokio::test]
async fn canvas_failure_aborts_run_without_writes() {
    let canvas = FakeCanvas {
        courses_error: Some("Canvas request failed with status 401 Unauthorized".to_string()),
        ..Default::default()
    };
    let notion = FakeNotion::default();

    let err = sync_tick(&canvas, &notion, &CourseMappings::default())
        .await
        .expect_err("sync should fail");

    assert!(err.contains("401"));
    assert!(notion.created_pages().is_empty());
    assert!(notion.completed_pages().is_empty());
}

#[tokio::test]
async fn submitted_existing_page_is_marked_complete() {
    let mut canvas = one_course_canvas(vec![Assignment {
        id: 10,
        name: Some("Problem Set 3".to_string()),
        due_at: None,
    }]);
    canvas.submitted.insert((1, 10));

    let notion = FakeNotion {
        existing: HashMap::from([(
            "Problem Set 3".to_string(),
            ExistingPage {
                page_id: Some("page-1".to_string()),
                completed: false,
            },
        )]),
        ..Default::default()
    };

    let summary = sync_tick(&canvas, &notion, &intro_mappings())
        .await
        .expect("sync should succeed");

    assert_eq!(summary.marked_complete, 1);
    assert_eq!(summary.added, 0);
    assert!(notion.created_pages().is_empty());
    assert_eq!(notion.completed_pages(), vec!["page-1".to_string()]);
}

#[tokio::test]
async fn rerun_with_existing_rows_does_not_duplicate() {
    let canvas = one_course_canvas(vec![
        Assignment {
            id: 10,
            name: Some("Problem Set 3".to_string()),
            due_at: None,
        },
        Assignment {
            id: 11,
            name: Some("Problem Set 4".to_string()),
            due_at: None,
        },
    ]);

    // Both rows were written by an earlier run.
    let notion = FakeNotion {
        existing: HashMap::from([
            (
                "Problem Set 3".to_string(),
                ExistingPage {
                    page_id: Some("page-1".to_string()),
                    completed: true,
                },
            ),
            (
                "Problem Set 4".to_string(),
                ExistingPage {
                    page_id: Some("page-2".to_string()),
                    completed: false,
                },
            ),
        ]),
        ..Default::default()
    };

    let summary = sync_tick(&canvas, &notion, &intro_mappings())
        .await
        .expect("sync should succeed");

    assert_eq!(summary.added, 0);
    assert_eq!(summary.skipped, 2);
    assert!(notion.created_pages().is_empty());
    assert!(notion.completed_pages().is_empty());
}

#[tokio::test]
async fn create_failure_does_not_block_remaining_assignments() {
    let canvas = one_course_canvas(vec![
        Assignment {
            id: 10,
            name: Some("Broken one".to_string()),
            due_at: None,
        },
        Assignment {
            id: 11,
            name: Some("Good one".to_string()),
            due_at: None,
        },
    ]);
    let notion = FakeNotion {
        fail_titles: vec!["Broken one".to_string()],
        ..Default::default()
    };

    let summary = sync_tick(&canvas, &notion, &intro_mappings())
        .await
        .expect("per-item failures are not fatal");

    assert_eq!(summary.added, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(notion.created_pages()[0].title, "Good one");
}

#[tokio::test]
async fn failed_submission_lookup_counts_as_unsubmitted() {
    let mut canvas = one_course_canvas(vec![Assignment {
        id: 10,
        name: Some("Quiz 1".to_string()),
        due_at: None,
    }]);
    canvas.submission_error = true;

    let notion = FakeNotion::default();

    let summary = sync_tick(&canvas, &notion, &intro_mappings())
        .await
        .expect("sync should succeed");

    assert_eq!(summary.added, 1);
    assert!(!notion.created_pages()[0].completed);
}

#[tokio::test]
async fn unmapped_course_name_passes_through_to_notion() {
    let canvas = FakeCanvas {
        courses: vec![Course {
            id: 2,
            name: Some("MATH 0220 Analytic Geometry".to_string()),
        }],
        assignments: HashMap::from([(
            2,
            vec![Assignment {
                id: 20,
                name: Some("Homework 1".to_string()),
                due_at: None,
            }],
        )]),
        ..Default::default()
    };
    let notion = FakeNotion::default();

    sync_tick(&canvas, &notion, &intro_mappings())
        .await
        .expect("sync should succeed");

    assert_eq!(
        notion.created_pages()[0].course,
        "MATH 0220 Analytic Geometry"
    );
}
