use serde::{Deserialize, Serialize};

use super::{CostTable, PlanBracket};

/// The three lookup tables a cost calculation reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub real_estate: CostTable,
    pub it_infra: CostTable,
    pub plan_brackets: Vec<PlanBracket>,
}

impl ReferenceTables {
    /// Index pairs `(earlier, later)` of brackets sharing at least one
    /// headcount. Lookups always resolve to the earlier bracket. Inverted
    /// brackets match nothing and never appear here.
    pub fn overlapping_brackets(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.plan_brackets.iter().enumerate() {
            for (j, b) in self.plan_brackets.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}
