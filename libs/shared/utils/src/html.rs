/// HTML entity encoding for values interpolated into server-rendered pages.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
        .replace('/', "&#x2F;")
}

/// Unstyled table dump used by the admin pages. Cells are escaped here.
pub fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut html = vec![
        format!("<h2>{}</h2>", escape_html(title)),
        "<table border=1 cellpadding=6>".to_string(),
    ];

    let header_cells: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape_html(h)))
        .collect();
    html.push(format!("<tr>{}</tr>", header_cells));

    for row in rows {
        let cells: String = row
            .iter()
            .map(|cell| format!("<td>{}</td>", escape_html(cell)))
            .collect();
        html.push(format!("<tr>{}</tr>", cells));
    }

    html.push("</table>".to_string());
    html.concat()
}

/// First `max_chars` characters followed by `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}
