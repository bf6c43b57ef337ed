use crate::models::page::{AssignmentPage, ExistingPage};
use crate::service::canvas_service::CanvasClient;
use crate::service::course_mapping::CourseMappings;
use crate::service::notion_service::NotionClient;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub added: usize,
    pub marked_complete: usize,
    pub skipped: usize,
    pub failed: usize,
}

// One full sync pass. Config errors never reach this point; a failure to
// read either API aborts the pass, while individual write failures are
// counted and the pass moves on to the next assignment.
pub async fn sync_tick<C: CanvasClient + ?Sized, N: NotionClient + ?Sized>(
    canvas: &C,
    notion: &N,
    mappings: &CourseMappings,
) -> Result<SyncSummary, String> {
    println!("Fetching existing Notion assignments...");
    let mut existing = notion
        .existing_pages()
        .await
        .map_err(|e| format!("Failed to query the Notion database: {}", e))?;
    println!("   Found {} existing assignments", existing.len());

    println!("Fetching favorited Canvas courses...");
    let courses = canvas
        .favorite_courses()
        .await
        .map_err(|e| format!("Failed to list Canvas courses: {}", e))?;
    println!("   Found {} favorited courses", courses.len());

    let mut summary = SyncSummary::default();

    for course in &courses {
        let course_name = course.display_name();
        let notion_course = mappings.normalize(course_name);
        println!("{} -> {}", course_name, notion_course);

        let assignments = canvas
            .assignments(course.id)
            .await
            .map_err(|e| format!("Failed to list assignments for {}: {}", course_name, e))?;

        for assignment in &assignments {
            let name = assignment.display_name();

            // Advisory lookup; a failed check just leaves the row unchecked.
            let is_submitted = match canvas.own_submission(course.id, assignment.id).await {
                Ok(submission) => submission.is_submitted(),
                Err(_) => false,
            };

            if let Some(page) = existing.get(name) {
                match (&page.page_id, is_submitted && !page.completed) {
                    (Some(page_id), true) => match notion.mark_completed(page_id).await {
                        Ok(()) => {
                            println!("   Marked complete: {}", name);
                            summary.marked_complete += 1;
                        }
                        Err(e) => {
                            eprintln!("   Failed to mark complete: {} - {}", name, e);
                            summary.failed += 1;
                        }
                    },
                    _ => summary.skipped += 1,
                }
                continue;
            }

            let page = AssignmentPage {
                title: name.to_string(),
                course: notion_course.clone(),
                due_at: assignment.due_at,
                completed: is_submitted,
            };
            match notion.create_page(&page).await {
                Ok(()) => {
                    println!("   Added: {}", name);
                    summary.added += 1;
                    // Guards against a same-named assignment later in the run.
                    existing.insert(
                        name.to_string(),
                        ExistingPage {
                            page_id: None,
                            completed: is_submitted,
                        },
                    );
                }
                Err(e) => {
                    eprintln!("   Failed: {} - {}", name, e);
                    summary.failed += 1;
                }
            }
        }
    }

    Ok(summary)
}
