use super::RosterRow;
use std::io::Read;

/// The roster contract is positional: column meaning comes from the rule
/// table, not from header names, so rows are read as raw records. Ragged
/// rows are tolerated; missing trailing cells simply read as absent.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RosterRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let cells = record
            .iter()
            .map(|cell| scrub_cell(cell).to_string())
            .collect();
        rows.push(RosterRow::from_cells(cells));
    }

    Ok(rows)
}

fn scrub_cell(value: &str) -> &str {
    value.trim_matches(|c| c == '\u{feff}' || c == '\u{200b}').trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn ragged_rows_parse_without_error() {
        let csv = "Name,Contact,Physical\nAlice\nBob,555-0101,2025-02-01,extra\n";
        let rows = parse_rows(Cursor::new(csv)).expect("flexible parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].width(), 1);
        assert_eq!(rows[1].width(), 4);
    }

    #[test]
    fn cells_are_trimmed_and_scrubbed_of_zero_width_markers() {
        let csv = "Name,Contact\n\u{feff} Alice ,  555-0100\n";
        let rows = parse_rows(Cursor::new(csv)).expect("parse");
        assert_eq!(rows[0].cell(0), Some("Alice"));
        assert_eq!(rows[0].cell(1), Some("555-0100"));
    }
}
