//! Purpose: Summarize the shape of a decoded value tree for `boundjson inspect`.
//! Exports: `Summary`, `summarize`.
//! Role: Small, pure walker used by CLI emission paths.
//! Invariants: Depth counts composites only; a scalar document has depth 0.
use std::collections::BTreeSet;

use boundjson::api::Value;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Summary {
    pub kind: &'static str,
    pub depth: usize,
    pub nodes: usize,
    /// Distinct object keys seen anywhere in the tree, sorted.
    pub keys: Vec<String>,
    pub consumed: usize,
}

pub(crate) fn summarize(value: &Value, consumed: usize) -> Summary {
    let mut walk = Walk::default();
    walk.visit(value, 0);
    Summary {
        kind: value.kind_name(),
        depth: walk.depth,
        nodes: walk.nodes,
        keys: walk.keys.into_iter().collect(),
        consumed,
    }
}

#[derive(Default)]
struct Walk {
    depth: usize,
    nodes: usize,
    keys: BTreeSet<String>,
}

impl Walk {
    fn visit(&mut self, value: &Value, level: usize) {
        self.nodes += 1;
        match value {
            Value::Array(items) => {
                self.depth = self.depth.max(level + 1);
                for item in items {
                    self.visit(item, level + 1);
                }
            }
            Value::Object(map) => {
                self.depth = self.depth.max(level + 1);
                for (key, item) in map {
                    self.keys.insert(key.clone());
                    self.visit(item, level + 1);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use boundjson::api::parse;

    #[test]
    fn summary_counts_nodes_depth_and_keys() {
        let value = parse(r#"{"b":[1,{"a":null}],"a":true}"#).unwrap();
        let summary = summarize(&value, 28);
        assert_eq!(summary.kind, "object");
        assert_eq!(summary.depth, 3);
        assert_eq!(summary.nodes, 6);
        assert_eq!(summary.keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(summary.consumed, 28);
    }

    #[test]
    fn scalar_summary_has_zero_depth() {
        let value = parse("\"x\"").unwrap();
        let summary = summarize(&value, 3);
        assert_eq!(summary.depth, 0);
        assert_eq!(summary.nodes, 1);
        assert!(summary.keys.is_empty());
    }
}
