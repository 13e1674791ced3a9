//! The one place user text is escaped for markup.
//!
//! Every preview field goes through `escape_html` exactly once on its way
//! into the fragment. Nothing upstream escapes, nothing downstream should.

use std::fmt::Write;

use crate::preview::PreviewDocument;

/// Escape text for interpolation into HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the preview modal body as an HTML fragment.
pub fn render_preview_html(doc: &PreviewDocument) -> String {
    let mut html = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(html, "<h4>{}</h4>", escape_html(&doc.subject));
    for (label, value) in doc.labeled_rows() {
        let _ = writeln!(
            html,
            "<p><strong>{label}:</strong> {}</p>",
            escape_html(value)
        );
    }
    let _ = writeln!(html, "<hr><p>{}</p>", escape_html(&doc.additional_info));
    html
}
