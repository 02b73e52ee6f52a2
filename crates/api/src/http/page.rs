//! Server-rendered tile page.
//!
//! One box per sector laid out on a CSS grid, one colored square per SKU
//! showing its quantity. Clicking a square reloads the page with the
//! selection in the query string and opens the detail panel.

use std::fmt::Write;

use sectorgrid_core::InventoryView;
use sectorgrid_domain::{GridCell, SectorCell, SectorGridError, SelectionState, SkuTile};
use uuid::Uuid;

const STYLE: &str = r#"
.grilla {
    display: grid;
    gap: 15px;
    margin-top: 20px;
    justify-items: center;
}
.sector {
    width: 120px;
    height: 120px;
    border: 2px solid black;
    border-radius: 6px;
    padding: 8px 5px 5px 5px;
    background-color: white;
    display: flex;
    flex-direction: column;
    justify-content: flex-start;
    align-items: center;
}
.sector.blank {
    border-color: transparent;
    background-color: transparent;
}
.sector-label {
    font-weight: bold;
    font-size: 13px;
    margin-bottom: 6px;
    text-align: center;
    width: 100%;
}
.sku-container {
    display: flex;
    flex-wrap: wrap;
    gap: 6px;
    overflow-y: auto;
    justify-content: center;
}
.sku {
    width: 40px;
    height: 40px;
    border-radius: 4px;
    display: flex;
    align-items: center;
    justify-content: center;
    font-weight: bold;
    font-size: 13px;
    color: white;
    text-decoration: none;
}
.sku.selected {
    outline: 3px solid black;
}
.detail {
    margin-top: 20px;
    padding: 10px;
    border: 1px solid #888;
    border-radius: 6px;
}
.error {
    color: #a40000;
    font-weight: bold;
}
"#;

/// Links emitted by the page, bound to one session.
#[derive(Debug, Clone, Copy)]
pub struct PageLinks {
    session: Uuid,
}

impl PageLinks {
    pub fn new(session: Uuid) -> Self {
        Self { session }
    }

    /// Link that selects a tile.
    pub fn tile(&self, sector: &str, code: &str) -> String {
        format!(
            "/?session={}&sector={}&code={}",
            self.session,
            urlencoding::encode(sector),
            urlencoding::encode(code)
        )
    }

    /// Link that closes the detail panel.
    pub fn close(&self) -> String {
        format!("/?session={}&close=true", self.session)
    }
}

/// Render the full page for a loaded view.
pub fn render_page(view: &InventoryView, selection: &SelectionState, links: &PageLinks) -> String {
    let mut body = String::new();
    render_grid(&mut body, view, selection, links);
    render_detail(&mut body, view, selection, links);
    document(&body)
}

/// Render the page shown when the view cannot be built.
pub fn render_error_page(error: &SectorGridError) -> String {
    document(&format!(r#"<p class="error">{}</p>"#, escape(&error.user_message())))
}

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Warehouse sectors</title>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn render_grid(out: &mut String, view: &InventoryView, selection: &SelectionState, links: &PageLinks) {
    let grid = &view.grid;
    let _ = writeln!(
        out,
        r#"<div class="grilla" style="grid-template-columns: repeat({}, 120px);">"#,
        grid.cols.max(1)
    );
    for cell in grid.cells.iter().flatten() {
        render_cell(out, cell, selection, links);
    }
    out.push_str("</div>\n");

    if !grid.unmapped.is_empty() {
        let names: Vec<String> = grid.unmapped.iter().map(|u| escape(&u.sector_id)).collect();
        let _ = writeln!(
            out,
            r#"<p class="unmapped">Sectors without a grid position: {}</p>"#,
            names.join(", ")
        );
    }
}

fn render_cell(out: &mut String, cell: &GridCell, selection: &SelectionState, links: &PageLinks) {
    let Some(sector) = &cell.sector else {
        out.push_str(r#"<div class="sector blank"></div>"#);
        out.push('\n');
        return;
    };

    let _ = write!(
        out,
        r#"<div class="sector"><div class="sector-label">{}</div><div class="sku-container">"#,
        escape(sector.label())
    );
    for tile in &sector.tiles {
        render_tile(out, sector, tile, selection, links);
    }
    out.push_str("</div></div>\n");
}

fn render_tile(
    out: &mut String,
    sector: &SectorCell,
    tile: &SkuTile,
    selection: &SelectionState,
    links: &PageLinks,
) {
    let selected = selection.target() == Some((sector.sector_id.as_str(), tile.code.as_str()));
    let _ = write!(
        out,
        r#"<a class="sku{}" style="background-color:{};" title="{}" href="{}">{}</a>"#,
        if selected { " selected" } else { "" },
        tile.color.as_str(),
        escape(&tile.code),
        escape(&links.tile(&sector.sector_id, &tile.code)),
        tile.quantity
    );
}

fn render_detail(
    out: &mut String,
    view: &InventoryView,
    selection: &SelectionState,
    links: &PageLinks,
) {
    let Some((sector, code)) = selection.target() else {
        return;
    };

    let records = view.detail(selection);
    let _ = writeln!(
        out,
        r#"<div class="detail"><h3>{} in {}</h3><a class="close" href="{}">Close</a>"#,
        escape(code),
        escape(sector),
        escape(&links.close())
    );

    if records.is_empty() {
        out.push_str("<p>No records for this tile.</p>\n");
    } else {
        out.push_str(
            "<table>\n<tr><th>Sector</th><th>Code</th><th>Quantity</th><th>Description</th></tr>\n",
        );
        for record in records {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(record.sector_id().unwrap_or_default()),
                escape(&record.code),
                record.quantity,
                escape(record.description.as_deref().unwrap_or_default())
            );
        }
        out.push_str("</table>\n");
    }
    out.push_str("</div>\n");
}

/// Escape text for HTML element and attribute content.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
