use crate::analysis::WinnerTable;
use crate::error::Result;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::collections::BTreeMap;
use std::path::Path;

/// Write an election report workbook: a Winners sheet, an optional Flips
/// sheet (flip analysis is not produced for the senate dataset), and a
/// Turnout sheet.
pub fn write_report_to_xlsx(
    winners: &WinnerTable,
    flips: Option<&[(String, u32)]>,
    turnout: &BTreeMap<u16, u64>,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    write_winners_sheet(worksheet, winners)?;

    if let Some(ranked) = flips {
        let worksheet = workbook.add_worksheet();
        write_flips_sheet(worksheet, ranked)?;
    }

    let worksheet = workbook.add_worksheet();
    write_turnout_sheet(worksheet, turnout)?;

    workbook.save(path)?;
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

/// Write the per-(state, year) winner table
fn write_winners_sheet(sheet: &mut Worksheet, winners: &WinnerTable) -> Result<()> {
    sheet.set_column_width(0, 8)?; // Year
    sheet.set_column_width(1, 8)?; // State
    sheet.set_column_width(2, 16)?; // Party
    sheet.set_column_width(3, 28)?; // Candidate
    sheet.set_column_width(4, 12)?; // Votes

    let header = header_format();
    for (col, name) in ["Year", "State", "Party", "Candidate", "Votes"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    let center = Format::new().set_align(FormatAlign::Center);

    // Reading order is by year then state; the table itself is keyed
    // (state, year).
    let mut records: Vec<_> = winners.iter().collect();
    records.sort_by_key(|((state, year), _)| (*year, state.clone()));

    for (row_idx, ((state, year), record)) in records.into_iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_number_with_format(row, 0, *year as f64, &center)?;
        sheet.write_string_with_format(row, 1, state, &center)?;
        sheet.write_string(row, 2, record.party.label())?;
        if let Some(ref candidate) = record.candidate {
            sheet.write_string(row, 3, candidate)?;
        }
        sheet.write_number(row, 4, record.votes as f64)?;
    }

    sheet.set_name("Winners")?;
    Ok(())
}

/// Write the ranked flip counts
fn write_flips_sheet(sheet: &mut Worksheet, ranked: &[(String, u32)]) -> Result<()> {
    sheet.set_column_width(0, 8)?; // State
    sheet.set_column_width(1, 12)?; // Flips

    let header = header_format();
    sheet.write_string_with_format(0, 0, "State", &header)?;
    sheet.write_string_with_format(0, 1, "Flips", &header)?;

    let center = Format::new().set_align(FormatAlign::Center);
    for (row_idx, (state, count)) in ranked.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string_with_format(row, 0, state, &center)?;
        sheet.write_number_with_format(row, 1, *count as f64, &center)?;
    }

    sheet.set_name("Flips")?;
    Ok(())
}

/// Write national turnout per year
fn write_turnout_sheet(sheet: &mut Worksheet, turnout: &BTreeMap<u16, u64>) -> Result<()> {
    sheet.set_column_width(0, 8)?; // Year
    sheet.set_column_width(1, 14)?; // Total votes

    let header = header_format();
    sheet.write_string_with_format(0, 0, "Year", &header)?;
    sheet.write_string_with_format(0, 1, "Total Votes", &header)?;

    let center = Format::new().set_align(FormatAlign::Center);
    for (row_idx, (year, total)) in turnout.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_number_with_format(row, 0, *year as f64, &center)?;
        sheet.write_number(row, 1, *total as f64)?;
    }

    sheet.set_name("Turnout")?;
    Ok(())
}
