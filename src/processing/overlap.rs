//! Overlapping block detection.
//!
//! The dividers cannot overlap each other by construction, but the serial
//! link pool is configured separately and may land inside the LANs.

use crate::models::Subnet;

/// An allocated block with a label for messages.
#[derive(Debug, Clone)]
pub struct LabeledBlock {
    pub label: String,
    pub subnet: Subnet,
}

impl LabeledBlock {
    pub fn new(label: impl Into<String>, subnet: Subnet) -> Self {
        LabeledBlock {
            label: label.into(),
            subnet,
        }
    }
}

impl std::fmt::Display for LabeledBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.label, self.subnet.cidr())
    }
}

/// Two blocks sharing addresses.
#[derive(Debug)]
pub struct OverlapConflict {
    pub first: LabeledBlock,
    pub second: LabeledBlock,
}

/// Find every pair of intersecting blocks.
///
/// Blocks are swept in address order; each block is compared against the
/// still-open blocks before it.
pub fn find_overlaps(blocks: &[LabeledBlock]) -> Vec<OverlapConflict> {
    let mut sorted: Vec<&LabeledBlock> = blocks.iter().collect();
    sorted.sort_by_key(|b| (b.subnet.network, b.subnet.broadcast));

    let mut conflicts = Vec::new();
    let mut open: Vec<&LabeledBlock> = Vec::new();
    for block in sorted {
        open.retain(|o| o.subnet.overlaps(&block.subnet));
        for o in &open {
            conflicts.push(OverlapConflict {
                first: (*o).clone(),
                second: block.clone(),
            });
        }
        open.push(block);
    }
    conflicts
}

/// Log overlapping blocks as warnings.
pub fn log_overlaps(conflicts: &[OverlapConflict]) {
    if conflicts.is_empty() {
        log::debug!("No overlapping blocks found.");
        return;
    }
    log::warn!("Found {} overlapping block pair(s):", conflicts.len());
    for conflict in conflicts {
        log::warn!("  {} overlaps {}", conflict.first, conflict.second);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(label: &str, network: u32, prefix: u8) -> LabeledBlock {
        LabeledBlock::new(label, Subnet::new(network, prefix).unwrap())
    }

    #[test]
    fn test_no_overlap() {
        let blocks = vec![
            block("a", 0x0A000000, 26),
            block("b", 0x0A000040, 26),
            block("c", 0x0A0A0A00, 30),
        ];
        assert!(find_overlaps(&blocks).is_empty());
    }

    #[test]
    fn test_overlap_found() {
        let blocks = vec![
            block("serial link 0", 0x0A0A0A00, 30),
            block("LAN 1", 0x0A0A0A00, 26),
            block("LAN 2", 0x0A0A0A40, 26),
            block("serial link 1", 0x0A0A0A04, 30),
        ];
        let conflicts = find_overlaps(&blocks);
        let pairs: Vec<(&str, &str)> = conflicts
            .iter()
            .map(|c| (c.first.label.as_str(), c.second.label.as_str()))
            .collect();
        // Smaller block first when two blocks start at the same address.
        assert_eq!(
            pairs,
            vec![("serial link 0", "LAN 1"), ("LAN 1", "serial link 1")]
        );
    }

    #[test]
    fn test_display() {
        let b = block("LAN 3", 0x0A000150, 30);
        assert_eq!(b.to_string(), "LAN 3 10.0.1.80/30");
    }
}
