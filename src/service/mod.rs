pub mod canvas_service;
pub mod course_mapping;
pub mod notion_service;
pub mod sync_flow;
