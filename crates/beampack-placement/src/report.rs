//! Rendering of an assignment for people and for downstream tools.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use beampack_core::{Assignment, BeamCatalog, PackError, PackResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table, one row per node.
    #[default]
    Text,
    /// Pretty-printed JSON of the whole assignment.
    Json,
    /// One tab-separated row per beam.
    Tsv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Tsv => "tsv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(PackError::Config(format!(
                "unknown output format `{s}` (expected text, json or tsv)"
            ))),
        }
    }
}

/// Render `assignment` in the requested format.
///
/// `catalog` supplies beam coordinates for the per-beam TSV listing.
pub fn render(
    assignment: &Assignment,
    catalog: &BeamCatalog,
    format: OutputFormat,
) -> PackResult<String> {
    match format {
        OutputFormat::Text => Ok(format_table(assignment)),
        OutputFormat::Json => to_json(assignment),
        OutputFormat::Tsv => Ok(format_beam_table(assignment, catalog)),
    }
}

pub fn format_table(assignment: &Assignment) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Beam assignment: {} beams on {} nodes",
        assignment.beam_count(),
        assignment.node_count()
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>6}  {:>9}  {:>12}  {:>10}  beams",
        "node", "multicast", "spread", "diameter"
    );

    for row in &assignment.rows {
        let beams: Vec<String> = row.beams.iter().map(|b| b.to_string()).collect();
        let _ = writeln!(
            out,
            "{:>6}  {:>9}  {:>12.4}  {:>10.4}  {}",
            row.node_index,
            row.multicast_group,
            row.spread.total,
            row.spread.diameter,
            beams.join(" ")
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total spread: {:.4}  Max diameter: {:.4}",
        assignment.total_spread, assignment.max_diameter
    );

    out
}

pub fn to_json(assignment: &Assignment) -> PackResult<String> {
    serde_json::to_string_pretty(assignment).map_err(|e| PackError::Serialize(e.to_string()))
}

/// Per-beam listing sorted by node, then beam id.
pub fn format_beam_table(assignment: &Assignment, catalog: &BeamCatalog) -> String {
    let mut out = String::from("beam\tx\ty\tnode\tmulticast\n");

    for row in &assignment.rows {
        for beam in row.beams.iter().filter_map(|&id| catalog.get(id)) {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                beam.id, beam.x, beam.y, row.node_index, row.multicast_group
            );
        }
    }

    out
}
