//! Print-view renderer
//!
//! Builds a small self-contained HTML document that prints itself once loaded.
//! Every user-supplied string is escaped, so row content cannot inject markup.

use crate::core::projection::ProjectedTable;

const PRINT_STYLE: &str = "body{font-family:Arial,Helvetica,sans-serif;font-size:12px;margin:24px;color:#212121}\
h1{font-size:18px;margin:0 0 12px}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:4px 6px;text-align:left;vertical-align:top}\
th{background:#f0f0f0}\
@media print{body{margin:0}}";

/// Escapes `& < > " '` for safe inclusion in HTML text and attributes
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
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

/// Renders the print view of a table
///
/// # Examples
///
/// ```
/// use tabex::core::encode::print::render_printable;
/// use tabex::core::projection::ProjectedTable;
/// use tabex::domain::CellValue;
///
/// let table = ProjectedTable {
///     headers: vec!["Note".to_string()],
///     values: vec![vec![CellValue::from("<b>bold</b>")]],
/// };
/// let html = render_printable(&table, Some("Notes"));
/// assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
/// assert!(html.contains("window.print()"));
/// ```
pub fn render_printable(table: &ProjectedTable, title: Option<&str>) -> String {
    let page_title = escape_html(title.unwrap_or("Export"));

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{page_title}</title>\n"));
    html.push_str(&format!("<style>{PRINT_STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n");

    if let Some(title) = title {
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
    }

    html.push_str("<table>\n<thead>\n<tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in table.string_rows() {
        html.push_str("<tr>");
        for cell in &row {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html.push_str("<script>window.onload=function(){window.focus();window.print();};</script>\n");
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellValue;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_structure() {
        let table = ProjectedTable {
            headers: vec!["Name".to_string(), "Amount".to_string()],
            values: vec![
                vec![CellValue::from("Ada"), CellValue::from(12.5)],
                vec![CellValue::Empty, CellValue::from(3.0)],
            ],
        };
        let html = render_printable(&table, Some("Q1 <Payroll>"));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Q1 &lt;Payroll&gt;</title>"));
        assert!(html.contains("<h1>Q1 &lt;Payroll&gt;</h1>"));
        assert!(html.contains("<tr><th>Name</th><th>Amount</th></tr>"));
        assert!(html.contains("<tr><td>Ada</td><td>12.5</td></tr>"));
        assert!(html.contains("<tr><td></td><td>3</td></tr>"));
    }

    #[test]
    fn test_script_injection_is_neutralized() {
        let table = ProjectedTable {
            headers: vec!["<script>".to_string()],
            values: vec![vec![CellValue::from("</td><script>alert(1)</script>")]],
        };
        let html = render_printable(&table, None);
        assert_eq!(html.matches("<script>").count(), 1);
        assert!(!html.contains("<h1>"));
        assert!(html.contains("<title>Export</title>"));
    }
}
