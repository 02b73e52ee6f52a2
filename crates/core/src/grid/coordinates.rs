//! Sector-name coordinate parsing.
//!
//! `<Letter><Number>` maps to `row = letter index`, `col = number - 1`, so
//! "A1" is the top-left cell and "C3" is (2, 2).

use sectorgrid_domain::constants::DEFAULT_MAX_COLUMN_NUMBER;
use sectorgrid_domain::{GridCoordinate, SectorParseError};

/// Parse a sector name into a zero-based grid coordinate.
///
/// Surrounding whitespace is ignored and the letter is case-insensitive.
/// Column numbers up to [`DEFAULT_MAX_COLUMN_NUMBER`] are accepted; use
/// [`parse_sector_within`] for a different limit.
///
/// # Errors
/// Returns the [`SectorParseError`] describing which part of the name did
/// not fit the `<Letter><Number>` shape.
pub fn parse_sector(name: &str) -> Result<GridCoordinate, SectorParseError> {
    parse_sector_within(name, DEFAULT_MAX_COLUMN_NUMBER)
}

/// Parse a sector name, accepting column numbers up to `max_column`.
///
/// # Errors
/// As [`parse_sector`]; a column number above `max_column` is
/// [`SectorParseError::ColumnOutOfRange`].
pub fn parse_sector_within(
    name: &str,
    max_column: u64,
) -> Result<GridCoordinate, SectorParseError> {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();

    let first = chars.next().ok_or(SectorParseError::Empty)?;
    if !first.is_ascii_alphabetic() {
        return Err(SectorParseError::InvalidRow { found: first });
    }
    let row = usize::from(first.to_ascii_uppercase() as u8 - b'A');

    let suffix = chars.as_str();
    if suffix.is_empty() {
        return Err(SectorParseError::MissingColumn);
    }
    if !suffix.chars().all(|c| c.is_ascii_digit()) {
        return Err(SectorParseError::InvalidColumn { suffix: suffix.to_string() });
    }

    let number: u64 = suffix
        .parse()
        .map_err(|_| SectorParseError::InvalidColumn { suffix: suffix.to_string() })?;
    if number == 0 || number > max_column {
        return Err(SectorParseError::ColumnOutOfRange { value: number });
    }

    let col = usize::try_from(number - 1)
        .map_err(|_| SectorParseError::ColumnOutOfRange { value: number })?;

    Ok(GridCoordinate::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letter_number_names() {
        assert_eq!(parse_sector("A1"), Ok(GridCoordinate::new(0, 0)));
        assert_eq!(parse_sector("C3"), Ok(GridCoordinate::new(2, 2)));
        assert_eq!(parse_sector("B12"), Ok(GridCoordinate::new(1, 11)));
        assert_eq!(parse_sector("Z1"), Ok(GridCoordinate::new(25, 0)));
    }

    #[test]
    fn letter_is_case_insensitive_and_whitespace_trimmed() {
        assert_eq!(parse_sector("c3"), parse_sector("C3"));
        assert_eq!(parse_sector("  b2 "), Ok(GridCoordinate::new(1, 1)));
    }

    #[test]
    fn leading_zeros_are_accepted() {
        assert_eq!(parse_sector("A01"), Ok(GridCoordinate::new(0, 0)));
    }

    #[test]
    fn malformed_names_are_unmapped() {
        assert_eq!(parse_sector(""), Err(SectorParseError::Empty));
        assert_eq!(parse_sector("   "), Err(SectorParseError::Empty));
        assert_eq!(parse_sector("7X"), Err(SectorParseError::InvalidRow { found: '7' }));
        assert_eq!(parse_sector("A"), Err(SectorParseError::MissingColumn));
        assert_eq!(
            parse_sector("A-1"),
            Err(SectorParseError::InvalidColumn { suffix: "-1".into() })
        );
        assert_eq!(
            parse_sector("A+3"),
            Err(SectorParseError::InvalidColumn { suffix: "+3".into() })
        );
        assert_eq!(
            parse_sector("AB1"),
            Err(SectorParseError::InvalidColumn { suffix: "B1".into() })
        );
        assert_eq!(parse_sector("Ñ1"), Err(SectorParseError::InvalidRow { found: 'Ñ' }));
    }

    #[test]
    fn column_zero_and_huge_columns_are_out_of_range() {
        assert_eq!(parse_sector("A0"), Err(SectorParseError::ColumnOutOfRange { value: 0 }));
        assert_eq!(
            parse_sector("A10001"),
            Err(SectorParseError::ColumnOutOfRange { value: 10_001 })
        );
        assert!(matches!(
            parse_sector("A99999999999999999999999"),
            Err(SectorParseError::InvalidColumn { .. })
        ));
    }

    #[test]
    fn four_digit_columns_parse() {
        assert_eq!(parse_sector("A1000"), Ok(GridCoordinate::new(0, 999)));
        assert_eq!(parse_sector("b10000"), Ok(GridCoordinate::new(1, 9_999)));
    }

    #[test]
    fn column_limit_is_adjustable() {
        assert_eq!(parse_sector_within("A50", 50), Ok(GridCoordinate::new(0, 49)));
        assert_eq!(
            parse_sector_within("A51", 50),
            Err(SectorParseError::ColumnOutOfRange { value: 51 })
        );
    }

    #[test]
    fn failure_is_distinct_from_origin() {
        assert_ne!(parse_sector("7X"), parse_sector("A1"));
    }
}
