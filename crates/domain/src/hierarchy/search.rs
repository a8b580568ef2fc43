//! Sibling-list search
//!
//! Case-insensitive substring match over code and name. Filters one list of
//! siblings; it does not descend into children.

use crate::entities::LocationNode;

/// Whether `node` matches `query`. A blank query matches everything.
pub fn matches_query<T: LocationNode>(node: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    node.node_code().to_lowercase().contains(&needle)
        || node.node_name().to_lowercase().contains(&needle)
}

/// Siblings matching `query`, in their original order.
pub fn filter_nodes<'a, T: LocationNode>(nodes: &'a [T], query: &str) -> Vec<&'a T> {
    nodes.iter().filter(|n| matches_query(*n, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Rack, Zone};

    fn zones() -> Vec<Zone> {
        vec![
            Zone::new("Z-01", "Good Condition").with_rack(Rack::new("R-01", "damaged rack")),
            Zone::new("Z-02", "Damaged"),
            Zone::new("Z-03", "Returns"),
        ]
    }

    #[test]
    fn matches_code_or_name_case_insensitively() {
        let zones = zones();
        let hits = filter_nodes(&zones, "DAMAGED");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "Z-02");

        let hits = filter_nodes(&zones, "z-0");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn blank_query_keeps_order() {
        let zones = zones();
        let codes: Vec<&str> = filter_nodes(&zones, "  ").iter().map(|z| z.code.as_str()).collect();
        assert_eq!(codes, vec!["Z-01", "Z-02", "Z-03"]);
    }
}
