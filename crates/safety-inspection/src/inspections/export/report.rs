use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::rows::{checklist_rows, ChecklistRow};
use crate::inspections::catalog::{ChecklistCatalog, ChecklistCategory};
use crate::inspections::domain::{HeaderField, InspectionRecord};

const TITLE: &str = "Workplace Safety Inspection Report";

const STYLESHEET: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; line-height: 1.4; }
.header { text-align: center; margin-bottom: 30px; }
.header h1 { color: #2563eb; margin-bottom: 5px; }
.info-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 10px; margin-bottom: 30px; }
.info-item { margin-bottom: 8px; }
.info-label { font-weight: bold; }
.section { margin-bottom: 30px; }
.section h2 { color: #059669; border-bottom: 2px solid #059669; padding-bottom: 5px; }
.fire-section h2 { color: #dc2626; border-bottom: 2px solid #dc2626; }
.checklist-item { margin-bottom: 15px; padding: 10px; border: 1px solid #e5e7eb; border-radius: 5px; page-break-inside: avoid; }
.item-number { background: #2563eb; color: white; border-radius: 50%; width: 25px; height: 25px; display: inline-flex; align-items: center; justify-content: center; font-size: 12px; margin-right: 10px; }
.fire-item .item-number { background: #dc2626; }
.response { margin: 8px 0; font-weight: bold; }
.response.yes { color: #059669; }
.response.no { color: #dc2626; }
.response.na { color: #6b7280; }
.response.not-answered { color: #9ca3af; font-style: italic; }
.comments { margin-top: 8px; font-style: italic; color: #4b5563; }
.footer { margin-top: 40px; text-align: center; font-size: 12px; color: #6b7280; }
";

/// Renders the printable HTML report. Every interpolated value is escaped, and
/// the output depends only on the arguments.
pub fn render_report(
    record: &InspectionRecord,
    catalog: &ChecklistCatalog,
    generated_at: DateTime<Utc>,
) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(html, "<title>{TITLE}</title>").expect("write title");
    writeln!(html, "<style>\n{STYLESHEET}</style>\n</head>\n<body>").expect("write head");

    writeln!(
        html,
        "<div class=\"header\">\n<h1>{TITLE}</h1>\n<p>Generated on {}</p>\n</div>",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    )
    .expect("write banner");

    html.push_str("<div class=\"info-grid\">\n");
    for field in HeaderField::ordered() {
        write_info_item(&mut html, field.label(), record.header.value(field));
    }
    write_info_item(&mut html, "Status", record.status_label());
    html.push_str("</div>\n");

    for category in ChecklistCategory::ordered() {
        write_section(&mut html, category, &checklist_rows(record, catalog, category));
    }

    html.push_str(
        "<div class=\"footer\">\n<p>Report generated from Workplace Safety Inspection System</p>\n</div>\n",
    );
    html.push_str("</body>\n</html>\n");
    html
}

fn write_info_item(html: &mut String, label: &str, value: &str) {
    writeln!(
        html,
        "<div class=\"info-item\"><span class=\"info-label\">{}:</span> {}</div>",
        escape_html(label),
        escape_html(value)
    )
    .expect("write info item");
}

fn write_section(html: &mut String, category: ChecklistCategory, rows: &[ChecklistRow<'_>]) {
    let (section_class, item_class) = match category {
        ChecklistCategory::General => ("section", "checklist-item"),
        ChecklistCategory::Fire => ("section fire-section", "checklist-item fire-item"),
    };

    writeln!(
        html,
        "<div class=\"{section_class}\">\n<h2>{}</h2>",
        escape_html(category.label())
    )
    .expect("write section heading");

    for row in rows {
        let response_class = row.response.map_or("not-answered", |response| response.css_class());
        writeln!(
            html,
            "<div class=\"{item_class}\">\n<span class=\"item-number\">{}</span>\n<div>{}</div>\n<div class=\"response {response_class}\">{}</div>",
            row.item_number,
            escape_html(row.description),
            escape_html(&row.display_response().to_uppercase())
        )
        .expect("write checklist item");

        if !row.comments.is_empty() {
            writeln!(
                html,
                "<div class=\"comments\">Comments: {}</div>",
                escape_html(row.comments)
            )
            .expect("write comments");
        }

        html.push_str("</div>\n");
    }

    html.push_str("</div>\n");
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }
}
