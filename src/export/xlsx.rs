use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{event_to_row, get_headers};
use crate::export::{EventExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Column index of the duty status in the export row.
const STATUS_COL: usize = 4;

/// Fill color per duty status, echoing the terminal grid colors.
fn status_fill(status: &str) -> Option<Color> {
    match status {
        "DRIVING" => Some(Color::RGB(0xDCEFDC)),
        "ON_DUTY" => Some(Color::RGB(0xFCF3D4)),
        "OFF_DUTY" | "SLEEPER" => Some(Color::RGB(0xEDEDED)),
        _ => None,
    }
}

fn cell_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

/// XLSX export: one row per duty event, status-tinted, auto column widths.
pub(crate) fn export_xlsx(events: &[EventExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    if events.is_empty() {
        worksheet
            .write(0, 0, "No data available")
            .map_err(to_export_error)?;
        workbook.save(path_str(path)?).map_err(to_export_error)?;
        notify_export_success("XLSX (empty dataset)", path);
        return Ok(());
    }

    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F5233))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    let mut col_widths: Vec<usize> = Vec::with_capacity(headers.len());
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
        col_widths.push(UnicodeWidthStr::width(*header));
    }

    worksheet.set_freeze_panes(1, 0).ok();

    for (row_index, ev) in events.iter().enumerate() {
        let row = (row_index + 1) as u32;

        let values = event_to_row(ev);
        let row_fill = status_fill(&ev.status).unwrap_or(Color::RGB(0xFFFFFF));

        for (col, value) in values.iter().enumerate() {
            let v = value.as_str();
            let bg = if col == STATUS_COL {
                row_fill
            } else {
                Color::RGB(0xFFFFFF)
            };

            // Dates and numbers get typed cells; everything else is text.
            if let Some((num_format, serial)) = parse_to_excel_date(v) {
                let fmt = cell_format(bg).set_num_format(num_format);
                worksheet
                    .write_with_format(row, col as u16, serial, &fmt)
                    .map_err(to_export_error)?;
            } else if let Ok(num) = v.parse::<f64>() {
                let fmt = cell_format(bg).set_align(FormatAlign::Right);
                worksheet
                    .write_with_format(row, col as u16, num, &fmt)
                    .map_err(to_export_error)?;
            } else {
                worksheet
                    .write_with_format(row, col as u16, v, &cell_format(bg))
                    .map_err(to_export_error)?;
            }

            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(v));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path_str(path)?).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}

fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str().ok_or_else(|| AppError::Export("invalid path".into()))
}
