//! Beam position catalog loader.
//!
//! Catalogs are plain text, one beam per line, with the `x` and `y`
//! offsets in the first two tab- or space-separated columns. Further
//! columns are ignored. Blank lines and `#` comments are skipped and do
//! not consume a beam id.

use std::path::Path;

use crate::error::{PackError, PackResult};
use crate::types::{Beam, BeamId};

/// Beams in file order, with ids `1..=N`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeamCatalog {
    beams: Vec<Beam>,
}

impl BeamCatalog {
    /// Build a catalog from coordinates, numbering beams from 1.
    pub fn from_coordinates(coords: &[(f64, f64)]) -> Self {
        let beams = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Beam::new(i + 1, x, y))
            .collect();
        Self { beams }
    }

    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    pub fn len(&self) -> usize {
        self.beams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }

    pub fn get(&self, id: BeamId) -> Option<&Beam> {
        id.checked_sub(1).and_then(|i| self.beams.get(i))
    }
}

/// Load a beam catalog from a file.
pub fn load_catalog(path: &Path) -> PackResult<BeamCatalog> {
    let bytes = std::fs::read(path).map_err(|source| PackError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog_bytes(&bytes)?;
    tracing::info!(path = %path.display(), beams = catalog.len(), "Loaded beam catalog");
    Ok(catalog)
}

/// Parse catalog text. Fails on the first malformed record; no partial
/// catalog is returned.
pub fn parse_catalog(content: &str) -> PackResult<BeamCatalog> {
    parse_catalog_bytes(content.as_bytes())
}

/// Parse raw catalog bytes. A line that is not valid UTF-8 is a parse
/// error on that line.
pub fn parse_catalog_bytes(bytes: &[u8]) -> PackResult<BeamCatalog> {
    let mut beams = Vec::new();

    for (idx, raw) in bytes.split(|&b| b == b'\n').enumerate() {
        let line_no = idx + 1;
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = std::str::from_utf8(raw).map_err(|e| PackError::Parse {
            line: line_no,
            message: format!("invalid UTF-8 at byte {}", e.valid_up_to()),
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(PackError::Parse {
                line: line_no,
                message: format!("expected at least 2 fields, found {}", fields.len()),
            });
        }

        let x = parse_coordinate(fields[0], "x", line_no)?;
        let y = parse_coordinate(fields[1], "y", line_no)?;
        beams.push(Beam::new(beams.len() + 1, x, y));
    }

    Ok(BeamCatalog { beams })
}

fn parse_coordinate(field: &str, axis: &str, line: usize) -> PackResult<f64> {
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PackError::Parse {
            line,
            message: format!("invalid {axis} coordinate `{field}`"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_tab_separated_records() {
        let catalog = parse_catalog("0.5\t-1.25\n3\t4\n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.beams()[0], Beam::new(1, 0.5, -1.25));
        assert_eq!(catalog.beams()[1], Beam::new(2, 3.0, 4.0));
    }

    #[test]
    fn ignores_trailing_columns_and_mixed_whitespace() {
        let catalog = parse_catalog("1.0  2.0\tbeam_a\textra\n  -3 \t 4e-1 \n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.beams()[0], Beam::new(1, 1.0, 2.0));
        assert_eq!(catalog.beams()[1], Beam::new(2, -3.0, 0.4));
    }

    #[test]
    fn skips_blank_and_comment_lines_without_consuming_ids() {
        let catalog = parse_catalog("# x\ty\n\n1\t1\n\n# mid\n2\t2\n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.beams()[1].id, 2);
        assert_eq!(catalog.get(2).unwrap().x, 2.0);
    }

    #[test]
    fn empty_input_is_empty_catalog() {
        let catalog = parse_catalog("").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.get(1).is_none());
    }

    #[test]
    fn non_numeric_field_reports_line() {
        let err = parse_catalog("0\t0\n1\t1\nabc\t1.0\n").unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn short_record_reports_physical_line() {
        let err = parse_catalog("# header\n\n0\t0\n5.0\n").unwrap_err();
        assert_eq!(err.line(), Some(4));
        assert!(err.to_string().contains("expected at least 2 fields"));
    }

    #[test]
    fn non_finite_coordinates_rejected() {
        for input in ["nan\t0", "0\tinf", "-inf\t1"] {
            let err = parse_catalog(input).unwrap_err();
            assert_eq!(err.line(), Some(1), "input {input:?}");
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.1\t0.2").unwrap();
        writeln!(file, "0.3\t0.4").unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.beams()[1], Beam::new(2, 0.3, 0.4));
    }

    #[test]
    fn crlf_line_endings() {
        let catalog = parse_catalog("1\t2\r\n3\t4\r\n").unwrap();
        assert_eq!(catalog.beams()[1], Beam::new(2, 3.0, 4.0));
    }

    #[test]
    fn invalid_utf8_is_parse_error_on_its_line() {
        let err = parse_catalog_bytes(b"0\t0\n\xff\xfe\t1\n2\t2\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().contains("invalid UTF-8"));
    }

    #[test]
    fn load_non_utf8_file_reports_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0.1\t0.2\n\xff\xfe\n").unwrap();

        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, PackError::Parse { line: 2, .. }), "got {err}");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.dat");

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, PackError::NotFound { .. }));
        assert!(err.to_string().contains("missing.dat"));
    }
}
