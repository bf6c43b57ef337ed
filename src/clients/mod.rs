pub mod canvas_client;
pub mod notion_client;
