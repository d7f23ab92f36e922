//! Plain-text rendering of a pedigree
//!
//! One block per generation with one line per slot, then the duplicate
//! ancestors and any build diagnostics. Geometry is appended on request.

use std::fmt;

use crate::layout::Point;
use crate::pedigree::{Slot, SlotCoord};
use crate::PedigreeResult;

/// What to include in a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportConfig {
    /// Append columns, slot rectangles and connector polylines
    pub geometry: bool,
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geometry(mut self, geometry: bool) -> Self {
        self.geometry = geometry;
        self
    }
}

/// A pedigree result formatted for a terminal
pub struct Report<'a> {
    result: &'a PedigreeResult,
    config: ReportConfig,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a PedigreeResult, config: ReportConfig) -> Self {
        Self { result, config }
    }
}

/// Render a result with the given options
pub fn render_report(result: &PedigreeResult, config: ReportConfig) -> String {
    Report::new(result, config).to_string()
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.result.grid();
        let root = grid.root();
        writeln!(
            f,
            "Pedigree of {} ({}), {} generations",
            root.display_name(),
            root.id,
            grid.max_generations()
        )?;

        for generation in 1..=grid.max_generations() {
            writeln!(f)?;
            writeln!(f, "Generation {generation}")?;
            for (index, slot) in grid.generation(generation).iter().enumerate() {
                self.write_slot(f, SlotCoord::new(generation, index), slot)?;
            }
        }

        writeln!(f)?;
        let groups = self.result.groups();
        if groups.is_empty() {
            writeln!(f, "Common ancestors: none")?;
        } else {
            writeln!(f, "Common ancestors")?;
            for group in groups {
                let name = group
                    .first_occurrence()
                    .and_then(|coord| grid.slot(coord))
                    .and_then(Slot::individual)
                    .map(|i| i.display_name())
                    .unwrap_or("Unnamed");
                let coords: Vec<String> =
                    group.occurrences.iter().map(|c| c.to_string()).collect();
                let token = self
                    .result
                    .highlights()
                    .get(group.id)
                    .map(|t| t.as_str())
                    .unwrap_or("-");
                writeln!(f, "  {} {}: {} [{}]", group.id, name, coords.join(", "), token)?;
            }
        }

        let diagnostics = self.result.diagnostics();
        if !diagnostics.is_empty() {
            writeln!(f)?;
            writeln!(f, "Diagnostics")?;
            for diagnostic in diagnostics {
                writeln!(f, "  {diagnostic}")?;
            }
        }

        if self.config.geometry {
            self.write_geometry(f)?;
        }
        Ok(())
    }
}

impl Report<'_> {
    fn write_slot(
        &self,
        f: &mut fmt::Formatter<'_>,
        coord: SlotCoord,
        slot: &Slot,
    ) -> fmt::Result {
        let role = coord
            .role()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "self".to_string());
        write!(f, "  {coord}  {role:<4}  ")?;

        let Some(individual) = slot.individual() else {
            return writeln!(f, "Unknown");
        };
        let name = individual.display_name();
        write!(f, "{name}")?;
        if let Some(ring) = individual.ring.as_deref().map(str::trim) {
            if !ring.is_empty() && ring != name {
                write!(f, " ({ring})")?;
            }
        }
        if let Some(details) = individual.details() {
            write!(f, " - {details}")?;
        }
        if let Some(token) = self.result.highlight_at(coord) {
            write!(f, " [{token}]")?;
        }
        writeln!(f)
    }

    fn write_geometry(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let geometry = self.result.geometry();
        writeln!(f)?;
        writeln!(f, "Geometry")?;
        for column in &geometry.columns {
            writeln!(
                f,
                "  column {}: x={:.1} width={:.1}",
                column.generation, column.x, column.width
            )?;
        }
        for (g, slots) in geometry.slots.iter().enumerate() {
            for (index, rect) in slots.iter().enumerate() {
                writeln!(
                    f,
                    "  slot {}: x={:.1} y={:.1} w={:.1} h={:.1}",
                    SlotCoord::new((g + 1) as u8, index),
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height
                )?;
            }
        }
        for connector in &geometry.connectors {
            let points: Vec<String> = connector.path.iter().map(format_point).collect();
            writeln!(
                f,
                "  {} -> {} ({}): {}",
                connector.child,
                connector.parent,
                connector.role,
                points.join(" ")
            )?;
        }
        Ok(())
    }
}

fn format_point(point: &Point) -> String {
    format!("({:.1},{:.1})", point.x, point.y)
}
