//! Integer interpretation of a production-planning solution.

use std::fmt;

/// A solution rounded to whole units, with the total.
///
/// Display-only: the rounded values are not fed back into any computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionPlan {
    /// Each component rounded to the nearest integer, saturating at the `i64` range
    pub quantities: Vec<i64>,
    /// Sum of the rounded quantities, saturating at the `i64` range
    pub total: i64,
}

impl ProductionPlan {
    /// Round every component of `solution` to the nearest integer.
    pub fn from_solution(solution: &[f64]) -> Self {
        let quantities: Vec<i64> = solution.iter().map(|v| v.round() as i64).collect();
        let total = quantities.iter().fold(0i64, |acc, &q| acc.saturating_add(q));
        Self { quantities, total }
    }
}

impl fmt::Display for ProductionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, q) in self.quantities.iter().enumerate() {
            writeln!(f, "Component {} (x{}): {} units", i + 1, i + 1, q)?;
        }
        write!(f, "Total components produced: {} units", self.total)
    }
}
