//! Newest-first textual changelog.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use log::{debug, info};

use umlapse_core::drawable::ElementKind;

use crate::timeline::Timeslice;

const HEADER: &str = "NEWEST CHANGES";
const FOOTER: &str = "OLDEST CHANGES";
const SEPARATOR_WIDTH: usize = 80;

/// Kinds whose lines are grouped first, in this order.
const GROUP_ORDER: [ElementKind; 4] = [
    ElementKind::Package,
    ElementKind::Class,
    ElementKind::Association,
    ElementKind::Interface,
];

/// Generates the changelog of timeslices `from..=to` (1-based).
///
/// Both bounds default to the full span and are clamped into it. Blocks are
/// separated by a line of dashes and read newest first. Within a block,
/// removal lines come first, then added and changed lines grouped by kind.
pub fn generate_log(timeslices: &[Timeslice], from: Option<usize>, to: Option<usize>) -> String {
    let len = timeslices.len();
    let from = from.unwrap_or(1).max(1);
    let to = to.unwrap_or(len).min(len);
    info!(from, to, timeslices = len; "Generating changelog");

    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut created: IndexSet<String> = IndexSet::new();
    let mut known: HashMap<String, (ElementKind, String)> = HashMap::new();
    let mut blocks: Vec<Vec<String>> = Vec::new();

    let selected = if from <= to { &timeslices[from - 1..to] } else { &[][..] };
    for timeslice in selected {
        // Lines in processing order; reversed when the block is assembled.
        let mut lines = Vec::new();

        let mut groups: IndexMap<ElementKind, Vec<String>> =
            GROUP_ORDER.iter().map(|kind| (*kind, Vec::new())).collect();
        for drawable in timeslice {
            let entry = drawable.describe(created.contains(drawable.id()));
            if entry.is_unchanged() {
                continue;
            }
            groups.entry(entry.kind()).or_default().push(entry.text().to_string());
            known.insert(entry.id().to_string(), (entry.kind(), entry.name().to_string()));
            created.insert(entry.id().to_string());
        }
        lines.extend(groups.into_values().flatten());

        let removed: Vec<String> = created
            .iter()
            .filter(|id| !timeslice.contains(id))
            .cloned()
            .collect();
        for id in removed {
            created.shift_remove(&id);
            if let Some((kind, name)) = known.get(&id) {
                lines.push(format!("The {kind} [{name}] has been removed."));
            }
        }

        debug!(lines = lines.len(); "Changelog block assembled");
        lines.reverse();
        blocks.push(lines);
    }

    let mut log = String::new();
    log.push_str(HEADER);
    log.push('\n');
    for block in blocks.iter().rev() {
        log.push_str(&separator);
        log.push('\n');
        for line in block {
            log.push_str(line);
            log.push('\n');
        }
    }
    log.push_str(&separator);
    log.push('\n');
    log.push_str(FOOTER);
    log.push('\n');
    log
}
