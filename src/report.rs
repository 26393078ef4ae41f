//! Diagnostic records of a finished search, for offline inspection.
//!
//! Reporting is separate from the search itself: nothing here feeds back into selection.

use crate::item::Catalog;
use crate::mcts_node::MctsNode;
use serde::Serialize;
use std::io::Write;

/// Statistics of one node, with its selection flattened into a single string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "Benefit")]
    pub benefit: f64,
    /// Item identifiers joined with `;`, empty for the root.
    #[serde(rename = "Selection")]
    pub selection: String,
    #[serde(rename = "Visits")]
    pub visits: u32,
    #[serde(rename = "Total Reward")]
    pub total_reward: f64,
}

impl NodeReport {
    pub fn from_node(node: &MctsNode, catalog: &Catalog) -> Self {
        let selection = node
            .items(catalog)
            .iter()
            .map(|item| item.id())
            .collect::<Vec<_>>()
            .join(";");
        Self {
            cost: node.cost,
            benefit: node.benefit,
            selection,
            visits: node.visits,
            total_reward: node.total_reward,
        }
    }
}

/// Writes the reports as CSV with a header row.
pub fn write_csv<W: Write>(reports: &[NodeReport], writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for report in reports {
        writer.serialize(report)?;
    }
    writer.flush()?;
    Ok(())
}
