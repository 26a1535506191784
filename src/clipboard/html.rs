//! The HTML clipboard flavor: a table whose cells carry their full JSON
//! payload, so a copy inside the grid pastes back identical cells.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Result;
use crate::types::Cell;

/// Attribute holding the payloads; on the `<table>` it marks our content.
pub(crate) const DATA_ATTRIBUTE: &str = "data-cellgrid";
pub(crate) const CONTENT_MARKER: &str = "cellgrid-content";

const CELL_STYLE: &str = "border: 1px solid #D3D3D3";

pub(crate) fn write_table(rows: &[Vec<Cell>]) -> Result<String> {
    let mut out = String::with_capacity(64 + rows.len() * 128);
    out.push_str(&format!(
        r#"<table empty-cells="show" {DATA_ATTRIBUTE}="{CONTENT_MARKER}"><tbody>"#
    ));
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            let payload = serde_json::to_string(cell)?;
            let text = if cell.text.is_empty() { " " } else { cell.text.as_str() };
            out.push_str(&format!(
                r#"<td {DATA_ATTRIBUTE}="{}" style="{CELL_STYLE}">{}</td>"#,
                escape(&payload),
                escape(text)
            ));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    Ok(out)
}

/// Cells of the first marked table in `html`, or `None` when the markup
/// did not come from a grid.
pub(crate) fn read_table(html: &str) -> Result<Option<Vec<Vec<Cell>>>> {
    let mut xml = Reader::from_str(html);
    xml.trim_text(false);
    xml.check_end_names(false);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut in_table = false;
    let mut current: Option<PendingCell> = None;

    loop {
        match xml.read_event()? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"table" if is_marked_table(e) => in_table = true,
                b"tr" if in_table => rows.push(Vec::new()),
                b"td" if in_table => current = Some(PendingCell::new(e)),
                _ => {}
            },
            Event::Empty(ref e) if in_table && e.local_name().as_ref() == b"td" => {
                if let Some(row) = rows.last_mut() {
                    row.push(PendingCell::new(e).finish());
                }
            }
            Event::Text(ref t) => {
                if let Some(cell) = current.as_mut() {
                    cell.text.push_str(&t.unescape()?);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"td" => {
                    if let (Some(cell), Some(row)) = (current.take(), rows.last_mut()) {
                        row.push(cell.finish());
                    }
                }
                b"table" if in_table => break,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(in_table.then_some(rows))
}

fn is_marked_table(e: &BytesStart<'_>) -> bool {
    e.attributes()
        .flatten()
        .any(|a| a.key.as_ref() == DATA_ATTRIBUTE.as_bytes() && a.value.as_ref() == CONTENT_MARKER.as_bytes())
}

struct PendingCell {
    payload: Option<String>,
    text: String,
}

impl PendingCell {
    fn new(e: &BytesStart<'_>) -> Self {
        let payload = e
            .attributes()
            .flatten()
            .find(|a| a.key.as_ref() == DATA_ATTRIBUTE.as_bytes())
            .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()));
        Self {
            payload,
            text: String::new(),
        }
    }

    /// The embedded payload, or a text cell coerced from the cell's content.
    fn finish(self) -> Cell {
        match self.payload.as_deref().map(serde_json::from_str::<Cell>) {
            Some(Ok(cell)) => cell,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "unreadable cell payload in clipboard");
                Cell::text(self.text)
            }
            None => Cell::text(self.text),
        }
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_survives_markup() {
        let rows = vec![vec![Cell::text(r#"a < "b" & 'c'"#).with_group("g"), Cell::empty()]];
        let html = write_table(&rows).unwrap();
        assert!(html.contains("&quot;"));
        let parsed = read_table(&html).unwrap().unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_foreign_table_is_ignored() {
        let html = "<table><tr><td>1</td></tr></table>";
        assert!(read_table(html).unwrap().is_none());
    }

    #[test]
    fn test_cells_without_payload_become_text() {
        let html = format!(
            r#"<html><body><table {DATA_ATTRIBUTE}="{CONTENT_MARKER}"><tr><td>12</td><td/></tr></table></body></html>"#
        );
        let parsed = read_table(&html).unwrap().unwrap();
        assert_eq!(parsed[0].len(), 2);
        assert_eq!(parsed[0][0].text, "12");
        assert_eq!(parsed[0][1].text, "");
    }
}
