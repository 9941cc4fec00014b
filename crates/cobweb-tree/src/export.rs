//! One-way tree export: indented pretty-print for debugging and the JSON
//! shape consumed by the d3 visualization.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use cobweb_core::ConceptId;
use serde::Serialize;

use crate::tree::CobwebTree;

/// JSON export of one concept and its subtree.
///
/// `counts` flattens the attribute/value tables into `"attr = value"` keys,
/// matching the shape the visualization expects. Export only; there is no
/// corresponding import.
#[derive(Debug, Clone, Serialize)]
pub struct ConceptDump {
    pub name: String,
    pub size: u64,
    pub children: Vec<ConceptDump>,
    pub counts: BTreeMap<String, u64>,
}

impl CobwebTree {
    /// Export the whole tree.
    pub fn export(&self) -> ConceptDump {
        self.dump(self.root())
    }

    fn dump(&self, id: ConceptId) -> ConceptDump {
        let node = self.arena.node(id);
        let counts = node
            .stats
            .iter()
            .flat_map(|(attr, values)| {
                values
                    .iter()
                    .map(move |(value, &n)| (format!("{attr} = {value}"), n))
            })
            .collect();
        ConceptDump {
            name: id.to_string(),
            size: node.count(),
            children: node.children.iter().map(|&c| self.dump(c)).collect(),
            counts,
        }
    }

    /// Serialize the export shape to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.export())
    }

    /// Indented-by-depth listing of each node's counts, for debugging.
    pub fn pretty_print(&self) -> String {
        let mut out = String::new();
        self.pretty_node(self.root(), 0, &mut out);
        out
    }

    fn pretty_node(&self, id: ConceptId, depth: usize, out: &mut String) {
        let node = self.arena.node(id);
        for _ in 0..depth {
            out.push('\t');
        }
        out.push_str("|-{");
        let mut first_attr = true;
        for (attr, values) in node.stats.iter() {
            if !first_attr {
                out.push_str(", ");
            }
            first_attr = false;
            let _ = write!(out, "{attr}: {{");
            let mut first_value = true;
            for (value, n) in values {
                if !first_value {
                    out.push_str(", ");
                }
                first_value = false;
                let _ = write!(out, "{value}: {n}");
            }
            out.push('}');
        }
        let _ = writeln!(out, "}}:{}", node.count());
        for &child in &node.children {
            self.pretty_node(child, depth + 1, out);
        }
    }
}
