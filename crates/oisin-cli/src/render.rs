// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rendering diff results for terminal and export consumption.

use anyhow::{Context, Result};
use oisin_diff::{DiffEntry, distinct_keys, suggested_exclusions};

/// Output format for a comparison report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of entries.
    #[default]
    Json,
    /// Comma-separated rows of path/status/left/right.
    Csv,
}

/// Render a diff in the requested format.
pub fn render(entries: &[DiffEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(entries).context("serializing diff to JSON")
        }
        OutputFormat::Csv => render_csv(entries),
    }
}

fn render_csv(entries: &[DiffEntry]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["path", "status", "left", "right"])
        .context("writing CSV header")?;
    for entry in entries {
        writer
            .write_record([
                entry.path.to_string(),
                entry.status.to_string(),
                entry.left.as_ref().map(cell).unwrap_or_default(),
                entry.right.as_ref().map(cell).unwrap_or_default(),
            ])
            .context("writing CSV row")?;
    }
    let bytes = writer.into_inner().context("flushing CSV output")?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

/// Compact cell rendering: bare strings stay bare, everything else is
/// compact JSON, so spreadsheet cells do not fill with quote noise.
fn cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One-line hint naming volatile-looking keys seen in a diff, ready to
/// feed back through `--exclude-key`. `None` when nothing looks volatile.
#[must_use]
pub fn render_exclusion_hints(entries: &[DiffEntry]) -> Option<String> {
    let volatile = suggested_exclusions(&distinct_keys(entries));
    if volatile.is_empty() {
        return None;
    }
    Some(format!(
        "hint: volatile-looking keys in this diff: {} (drop them with --exclude-key)",
        volatile.join(", ")
    ))
}

/// Render the candidate join keys found per array path, one line each.
#[must_use]
pub fn render_candidates(candidates: &[(String, Vec<String>)]) -> String {
    if candidates.is_empty() {
        return "no arrays of objects found on both sides\n".to_string();
    }
    let mut out = String::new();
    for (path, keys) in candidates {
        out.push_str(path);
        out.push_str(": ");
        out.push_str(&keys.join(", "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use oisin_diff::{DiffOptions, diff_values};
    use serde_json::json;

    fn sample() -> Vec<DiffEntry> {
        diff_values(
            &json!({"a": 1, "gone": "x"}),
            &json!({"a": 2, "new": {"n": true}}),
            &DiffOptions::new(),
        )
        .unwrap()
    }

    #[test]
    fn json_rendering_is_an_array_of_entries() {
        let text = render(&sample(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);
        assert_eq!(parsed[0]["path"], "a");
        assert_eq!(parsed[0]["status"], "changed");
    }

    #[test]
    fn csv_rendering_has_header_and_one_row_per_entry() {
        let text = render(&sample(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "path,status,left,right");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "a,changed,1,2");
        // Bare string on the left, absent right side.
        assert_eq!(lines[2], "gone,removed,x,");
        // Structured values render as compact JSON.
        assert!(lines[3].starts_with("new,added,,"));
        assert!(lines[3].contains("n"));
    }

    #[test]
    fn exclusion_hints_name_volatile_keys_only() {
        let entries = diff_values(
            &json!({"name": "a", "updated_at": 1, "run_id": 7}),
            &json!({"name": "b", "updated_at": 2, "run_id": 8}),
            &DiffOptions::new(),
        )
        .unwrap();
        let hint = render_exclusion_hints(&entries).unwrap();
        assert!(hint.contains("run_id, updated_at"));
        assert!(!hint.contains("name,"));

        assert_eq!(render_exclusion_hints(&sample()), None);
    }

    #[test]
    fn candidate_rendering_lists_paths() {
        let text = render_candidates(&[
            ("$.users".to_string(), vec!["id".to_string(), "name".to_string()]),
        ]);
        assert_eq!(text, "$.users: id, name\n");
    }
}
