//! Parser for the partition table in an IQ-TREE run log.
//!
//! IQ-TREE prints one row per locus when run on a partitioned alignment:
//!
//! ```text
//! Subset  Type  Seqs  Sites  Infor  Invar  Const  Model     Name
//! 1       DNA   40    812    211    498    12     GTR+F+G4  p1_uce-100
//! 2       DNA   38    640    155    420    9      HKY+F+I   p2_uce-101
//! Column meanings:
//! ```
//!
//! Only rows before the `Column meanings` line are considered.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::LocusIndexMap;
use crate::parsing::lines::UniversalLines;

/// Phrase opening the section that follows the partition table
pub const TABLE_TERMINATOR: &str = "Column meanings";

/// Sequence type token a locus row must carry
pub const ROW_TYPE: &str = "DNA";

/// Index, type, five statistics, model, name
const MIN_ROW_TOKENS: usize = 9;
const STAT_COLUMNS: usize = 5;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error while reading log: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse an IQ-TREE log file into a locus index map
///
/// # Errors
///
/// Returns `ParseError::Open` if the file cannot be opened, or `ParseError::Io`
/// if reading fails part way through.
pub fn parse_log_file(path: &Path) -> Result<LocusIndexMap, ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Open {
        path: path.display().to_string(),
        source,
    })?;
    parse_log_reader(BufReader::new(file))
}

/// Parse log text already held in memory
#[must_use]
pub fn parse_log_text(text: &str) -> LocusIndexMap {
    let mut loci = LocusIndexMap::new();
    // Reading from a byte slice cannot fail
    for line in UniversalLines::new(text.as_bytes()).map_while(Result::ok) {
        if !scan_line(&String::from_utf8_lossy(&line), &mut loci) {
            break;
        }
    }
    loci
}

/// Parse a log from any buffered reader, stopping at the table terminator.
///
/// Lines after the terminator are never read. Bytes that are not valid UTF-8
/// (e.g. Latin-1 paths echoed in the preamble) are replaced, not rejected.
///
/// # Errors
///
/// Returns `ParseError::Io` if the underlying reader fails.
pub fn parse_log_reader<R: BufRead>(reader: R) -> Result<LocusIndexMap, ParseError> {
    let mut loci = LocusIndexMap::new();
    for line in UniversalLines::new(reader) {
        if !scan_line(&String::from_utf8_lossy(&line?), &mut loci) {
            break;
        }
    }
    Ok(loci)
}

/// Feed one line into the map. Returns `false` once the terminator is reached.
fn scan_line(line: &str, loci: &mut LocusIndexMap) -> bool {
    if is_terminator(line) {
        debug!("Reached '{TABLE_TERMINATOR}', {} loci parsed", loci.len());
        return false;
    }

    if is_header(line) {
        debug!("Found partition table header");
        return true;
    }

    if let Some((index, name)) = parse_row(line) {
        if let Some(previous) = loci.insert(index, name) {
            warn!("Duplicate locus index {index} in log; '{previous}' replaced");
        }
    }
    true
}

fn is_terminator(line: &str) -> bool {
    line.trim_start().starts_with(TABLE_TERMINATOR)
}

/// Column header row, e.g. `ID  Type  Seq  ...  Name` or `Subset  Type  ...  Name`
fn is_header(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    matches!(tokens.next(), Some("ID" | "Subset"))
        && matches!(tokens.next(), Some("Type"))
        && tokens.any(|t| t == "Name")
}

/// Parse a partition row into `(index, cleaned name)`.
///
/// Returns `None` for anything that does not match the row layout, including
/// short rows, a zero index, and names that are empty once the prefix is removed.
#[must_use]
pub fn parse_row(line: &str) -> Option<(usize, String)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_ROW_TOKENS {
        return None;
    }

    if !is_unsigned_integer(tokens[0]) {
        return None;
    }
    let index: usize = tokens[0].parse().ok()?;
    if index == 0 || tokens[1] != ROW_TYPE {
        return None;
    }

    let stats_are_integers = tokens[2..2 + STAT_COLUMNS]
        .iter()
        .all(|t| is_unsigned_integer(t));
    if !stats_are_integers {
        return None;
    }

    let raw_name = tokens[tokens.len() - 1];
    let name = strip_partition_prefix(raw_name);
    if name.is_empty() {
        debug!("Ignoring row {index}: empty name after prefix removal");
        return None;
    }

    Some((index, name.to_string()))
}

/// Plain run of ASCII digits; no sign, no separators
fn is_unsigned_integer(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Remove a leading `p<digits>_` partition prefix, if present.
///
/// # Examples
///
/// ```
/// use locus_splitter::parsing::iqtree_log::strip_partition_prefix;
///
/// assert_eq!(strip_partition_prefix("p12_uce-100"), "uce-100");
/// assert_eq!(strip_partition_prefix("uce-100"), "uce-100");
/// assert_eq!(strip_partition_prefix("p_uce"), "p_uce");
/// ```
#[must_use]
pub fn strip_partition_prefix(name: &str) -> &str {
    let Some(rest) = name.strip_prefix('p') else {
        return name;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return name;
    }
    rest[digits..].strip_prefix('_').unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "IQ-TREE multicore version 2.2.0
Reading partition model file loci.nex ...

Subset	Type	Seqs	Sites	Infor	Invar	Const	Model	Name
1	DNA	40	812	211	498	12	GTR+F+G4	p1_uce-100
2	DNA	38	640	155	420	9	HKY+F+I	p2_uce-101
3	DNA	41	700	180	430	11	TIM2+F+R3	uce-102
Column meanings:
  Sites: number of alignment sites
4	DNA	40	812	211	498	12	GTR+F+G4	p4_uce-103
";

    #[test]
    fn test_parse_log_text() {
        let loci = parse_log_text(LOG);
        assert_eq!(loci.len(), 3);
        assert_eq!(loci.get(1), Some("uce-100"));
        assert_eq!(loci.get(2), Some("uce-101"));
        assert_eq!(loci.get(3), Some("uce-102"));
    }

    #[test]
    fn test_rows_after_terminator_are_ignored() {
        let loci = parse_log_text(LOG);
        assert!(!loci.contains(4));
    }

    #[test]
    fn test_indented_terminator() {
        let log = "1 DNA 1 2 3 4 5 GTR a\n   Column meanings:\n2 DNA 1 2 3 4 5 GTR b\n";
        let loci = parse_log_text(log);
        assert_eq!(loci.len(), 1);
    }

    #[test]
    fn test_table_without_header() {
        let log = "  12  DNA  100  500  50  10  5  GTR  p3_uce100\n";
        let loci = parse_log_text(log);
        assert_eq!(loci.get(12), Some("uce100"));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let log = "\
1 DNA 40 812 211 498 GTR p1_short
2 AA 40 812 211 498 12 LG p2_protein
3 DNA 40 81x 211 498 12 GTR p3_badstat
x DNA 40 812 211 498 12 GTR p4_badindex
0 DNA 40 812 211 498 12 GTR p0_zero
5 DNA 40 812 211 498 12 GTR p5_
6 DNA 40 812 211 498 12 GTR p6_good
";
        let loci = parse_log_text(log);
        assert_eq!(loci.len(), 1);
        assert_eq!(loci.get(6), Some("good"));
    }

    #[test]
    fn test_signed_numbers_are_not_rows() {
        assert!(parse_row("+3 DNA 40 812 211 498 12 GTR p3_uce1").is_none());
        assert!(parse_row("3 DNA +40 812 211 498 12 GTR p3_uce1").is_none());
        assert!(parse_row("3 DNA 40 812 211 498 12 GTR p3_uce1").is_some());
    }

    #[test]
    fn test_non_utf8_preamble_is_tolerated() {
        let log: &[u8] =
            b"IQ-TREE run on /data/caf\xe9/loci.nex\n1 DNA 40 812 211 498 12 GTR p1_uce1\nColumn meanings:\n";
        let loci = parse_log_reader(log).unwrap();
        assert_eq!(loci.len(), 1);
        assert_eq!(loci.get(1), Some("uce1"));
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let log = "1 DNA 1 2 3 4 5 GTR p1_a\r2 DNA 1 2 3 4 5 GTR p2_b\rColumn meanings:\r3 DNA 1 2 3 4 5 GTR c\r";
        let loci = parse_log_reader(log.as_bytes()).unwrap();
        assert_eq!(loci.len(), 2);
        assert_eq!(loci.get(2), Some("b"));
    }

    #[test]
    fn test_name_is_last_token() {
        let (index, name) = parse_row("7 DNA 1 2 3 4 5 GTR extra p7_locus").unwrap();
        assert_eq!(index, 7);
        assert_eq!(name, "locus");
    }

    #[test]
    fn test_duplicate_index_last_write_wins() {
        let log = "1 DNA 1 2 3 4 5 GTR first\n1 DNA 1 2 3 4 5 GTR second\n";
        let loci = parse_log_text(log);
        assert_eq!(loci.len(), 1);
        assert_eq!(loci.get(1), Some("second"));
    }

    #[test]
    fn test_no_table_yields_empty_map() {
        let loci = parse_log_text("nothing to see here\nColumn meanings:\n");
        assert!(loci.is_empty());
    }

    #[test]
    fn test_header_detection() {
        assert!(is_header("Subset\tType\tSeqs\tSites\tInfor\tInvar\tConst\tModel\tName"));
        assert!(is_header("  ID  Type  Seq  Site  Unique  Infor  Invar  Const  Name"));
        assert!(!is_header("1 DNA 1 2 3 4 5 GTR Name"));
    }

    #[test]
    fn test_strip_partition_prefix() {
        assert_eq!(strip_partition_prefix("p3_uce100"), "uce100");
        assert_eq!(strip_partition_prefix("p3uce100"), "p3uce100");
        assert_eq!(strip_partition_prefix("pX_uce100"), "pX_uce100");
        assert_eq!(strip_partition_prefix("uce_p3_100"), "uce_p3_100");
        assert_eq!(strip_partition_prefix("p3_p4_x"), "p4_x");
    }

    #[test]
    fn test_parse_log_reader_matches_text() {
        let loci = parse_log_reader(LOG.as_bytes()).unwrap();
        assert_eq!(loci, parse_log_text(LOG));
    }

    #[test]
    fn test_parse_log_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_log_file(&dir.path().join("missing.log"));
        assert!(matches!(result, Err(ParseError::Open { .. })));
    }

    #[test]
    fn test_parse_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        std::fs::write(&path, LOG).unwrap();
        let loci = parse_log_file(&path).unwrap();
        assert_eq!(loci.len(), 3);
    }
}
