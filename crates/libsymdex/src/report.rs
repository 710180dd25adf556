use std::fmt::Write;

use crate::search::{ResultEntry, SearchResponse};

/// Render a response as plain text for terminals.
///
/// The first line is a comment summarising the query; each group follows with its entries
/// indented beneath it and every occurrence on its own line.
pub fn render_report(response: &SearchResponse) -> String {
    let mut output = String::new();

    let Some(query) = &response.query else {
        output.push_str("// no query\n");
        return output;
    };

    let more = if response.has_more {
        ", more available"
    } else {
        ""
    };
    writeln!(
        output,
        "// query=\"{}\"; {} {}{}",
        query,
        response.total,
        if response.total == 1 { "match" } else { "matches" },
        more
    )
    .expect("write report header");

    for group in &response.groups {
        let indent = if group.scope_label.is_empty() {
            ""
        } else {
            writeln!(output, "{}", group.scope_label).expect("write report group");
            "  "
        };
        for entry in &group.entries {
            write_entry(&mut output, entry, indent);
        }
    }
    output
}

fn write_entry(buffer: &mut String, entry: &ResultEntry, indent: &str) {
    writeln!(buffer, "{indent}{} ({})", entry.label, entry.category).expect("write report entry");
    for occurrence in &entry.occurrences {
        writeln!(
            buffer,
            "{indent}  - {} [{}]",
            occurrence.reference, occurrence.scope_label
        )
        .expect("write report occurrence");
    }
}
