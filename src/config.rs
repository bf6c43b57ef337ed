use chrono_tz::Tz;
use std::collections::HashMap;
use std::fs;

pub const DEFAULT_COURSE_MAP_FILE: &str = "./mappings.conf";

// Parses "key = value" lines; blank lines and # comments are skipped,
// an optional "export " prefix and surrounding quotes are stripped.
// Shared by the config file and the course mapping file.
pub fn parse_kv_lines(content: &str) -> Result<Vec<(String, String)>, String> {
    let mut entries = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(format!("Invalid line {}: {}", idx + 1, line));
        };
        let key = key.trim();
        let mut value = value.trim().to_string();
        if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
            || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
        {
            value = value[1..value.len() - 1].to_string();
        }
        entries.push((key.to_string(), value));
    }
    Ok(entries)
}

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let values = parse_kv_lines(&content)?.into_iter().collect();
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

// Fully resolved run configuration. Secrets have no defaults; resolution
// fails before any network call when one is missing.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub canvas_key: String,
    pub notion_key: String,
    pub notion_db: String,
    pub canvas_url: String,
    pub course_map_file: String,
    pub timezone: Tz,
}

impl SyncConfig {
    pub fn resolve<F>(get: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, String> {
            match get(key) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(format!(
                    "{} is not set. Add it to the environment or the CONFIG_FILE file.",
                    key
                )),
            }
        };

        let canvas_key = required("CANVAS_KEY")?;
        let notion_key = required("NOTION_KEY")?;
        let notion_db = required("NOTION_DB")?;
        let canvas_url = required("CANVAS_URL")?.trim_end_matches('/').to_string();

        let timezone = match get("TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| format!("TIMEZONE {} is not a valid IANA timezone name", name))?,
            None => chrono_tz::America::New_York,
        };

        Ok(Self {
            canvas_key,
            notion_key,
            notion_db,
            canvas_url,
            course_map_file: get("COURSE_MAP_FILE")
                .unwrap_or_else(|| DEFAULT_COURSE_MAP_FILE.to_string()),
            timezone,
        })
    }
}
