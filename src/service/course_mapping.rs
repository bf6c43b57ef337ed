use std::fs;
use std::io::Write;

use crate::config::parse_kv_lines;

// Hand-edited keyword -> Notion select label table, e.g.
//   1652 = CS 1652 DATA COM
//   data comm = CS 1652 DATA COM
// A raw Canvas course name matches the first entry whose keyword it
// contains, case-insensitively. Unmapped names pass through unchanged.
#[derive(Debug, Default, Clone)]
pub struct CourseMappings {
    entries: Vec<(String, String)>,
}

impl CourseMappings {
    // A missing file is an empty table; every course name passes through.
    pub fn from_file(path: &str) -> Result<Self, String> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content)
                .map_err(|e| format!("Invalid course mapping file {}: {}", path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(format!("Failed to read course mapping file {}: {}", path, e)),
        }
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let entries = parse_kv_lines(content)?
            .into_iter()
            .map(|(keyword, label)| (keyword.to_lowercase(), label))
            .collect();
        Ok(Self { entries })
    }

    pub fn normalize(&self, raw_name: &str) -> String {
        let lower = raw_name.to_lowercase();
        for (keyword, label) in &self.entries {
            if lower.contains(keyword.as_str()) {
                return label.clone();
            }
        }
        raw_name.to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append_to_file(path: &str, keyword: &str, label: &str) -> Result<(), String> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("Failed to open course mapping file {}: {}", path, e))?;
        writeln!(file, "{} = {}", keyword.trim().to_lowercase(), label.trim())
            .map_err(|e| format!("Failed to write course mapping file {}: {}", path, e))
    }
}
