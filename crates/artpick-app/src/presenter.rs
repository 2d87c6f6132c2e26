//! 테이블 프레젠터.
//!
//! 뷰 스냅샷 → comfy-table 텍스트. 페이지 행, 체크 상태, 페이지네이터,
//! 상태 메시지를 그린다.

use artpick_core::models::artwork::Artwork;
use artpick_core::models::page::PageSize;
use artpick_selection::controller::{ViewPhase, ViewSnapshot};
use artpick_selection::status::StatusLevel;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

const COLUMNS: [&str; 8] = [
    "",
    "ID",
    "Title",
    "Place of Origin",
    "Artist Display",
    "Inscriptions",
    "Start Year",
    "End Year",
];

/// 현재 페이지 전체 화면
pub fn render(snapshot: &ViewSnapshot) -> String {
    let mut out = String::new();

    if let Some(status) = &snapshot.status {
        let marker = match status.level {
            StatusLevel::Success => "OK",
            StatusLevel::Error => "ERROR",
        };
        out.push_str(&format!("[{marker}] {}\n", status.text));
    }

    let mut table = new_table();
    table.set_header(COLUMNS.iter().map(|c| header_cell(c)));
    for record in &snapshot.rows {
        let checkbox = if snapshot.is_checked(record.id) {
            "[x]"
        } else {
            "[ ]"
        };
        table.add_row(record_cells(checkbox, record));
    }
    align_year_columns(&mut table);
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(&paginator_line(snapshot));
    out.push('\n');
    out
}

/// 선택 요약 화면
pub fn render_selected(records: &[Artwork], unresolved: usize) -> String {
    if records.is_empty() && unresolved == 0 {
        return "No items selected\n".to_string();
    }

    let mut table = new_table();
    table.set_header(COLUMNS.iter().skip(1).map(|c| header_cell(c)));
    for record in records {
        let mut cells = record_cells("", record);
        cells.remove(0);
        table.add_row(cells);
    }

    let mut out = table.to_string();
    out.push('\n');
    out.push_str(&format!("{} selected", records.len() + unresolved));
    if unresolved > 0 {
        out.push_str(&format!(" ({unresolved} not loaded yet)"));
    }
    out.push('\n');
    out
}

fn paginator_line(snapshot: &ViewSnapshot) -> String {
    let first = snapshot.cursor.first;
    let range = if snapshot.rows.is_empty() {
        "no rows".to_string()
    } else {
        format!("rows {}-{}", first + 1, first + snapshot.rows.len() as u64)
    };
    let sizes: Vec<String> = PageSize::ALL
        .iter()
        .map(|size| {
            if *size == snapshot.cursor.size {
                format!("[{size}]")
            } else {
                size.to_string()
            }
        })
        .collect();

    let mut line = format!(
        "Page {} of {} | {range} of {} | per page {} | {} selected",
        snapshot.cursor.page_number(),
        snapshot.page_count,
        snapshot.total,
        sizes.join(" "),
        snapshot.selected_count
    );
    if snapshot.phase == ViewPhase::Loading {
        line.push_str(" | loading...");
    }
    line
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn record_cells(checkbox: &str, record: &Artwork) -> Vec<Cell> {
    vec![
        Cell::new(checkbox),
        Cell::new(record.id),
        Cell::new(text(&record.title)),
        Cell::new(text(&record.place_of_origin)),
        Cell::new(text(&record.artist_display)),
        Cell::new(text(&record.inscriptions)),
        Cell::new(year(record.date_start)),
        Cell::new(year(record.date_end)),
    ]
}

fn align_year_columns(table: &mut Table) {
    for index in [6, 7] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("-").replace('\n', " ")
}

fn year(value: Option<i32>) -> String {
    value.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}
