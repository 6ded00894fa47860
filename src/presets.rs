//! Built-in worked examples.
//!
//! Each front-end offers these as its "example" run: a production-planning
//! system for the direct solver, a Wheatstone bridge for Gauss-Seidel, a
//! decaying series for curve fitting and a river cross-section for
//! quadrature.

use crate::error::{NumkitError, Result};
use crate::linalg::{LinearSystem, Matrix};
use crate::series::SampleSeries;

/// Component production problem.
///
/// Unknowns are the quantities of three components; rows are the grams of
/// metal, plastic and rubber each unit consumes, and `b` holds the stock.
pub fn production_system() -> Result<LinearSystem> {
    let a = Matrix::from_rows(&[
        [15.0, 17.0, 19.0],
        [0.30, 0.40, 0.55],
        [1.0, 1.2, 1.5],
    ])?;
    LinearSystem::new(a, vec![3890.0, 95.0, 282.0])
}

/// Wheatstone bridge driven by a DC source, solved by mesh analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheatstoneBridge {
    /// Source voltage E (volts)
    pub source_voltage: f64,
    /// Resistances R1..R5 (ohms)
    pub resistances: [f64; 5],
}

impl Default for WheatstoneBridge {
    fn default() -> Self {
        Self {
            source_voltage: 30.0,
            resistances: [20.0, 120.0, 120.0, 120.0, 120.0],
        }
    }
}

impl WheatstoneBridge {
    /// Create a bridge from E and R1..R5.
    pub fn new(source_voltage: f64, resistances: [f64; 5]) -> Result<Self> {
        if !(source_voltage.is_finite() && source_voltage > 0.0) {
            return Err(NumkitError::invalid_parameter(format!(
                "source voltage must be positive, got {}",
                source_voltage
            )));
        }
        if let Some((i, r)) = resistances
            .iter()
            .enumerate()
            .find(|(_, r)| !(r.is_finite() && **r > 0.0))
        {
            return Err(NumkitError::invalid_parameter(format!(
                "R{} must be positive, got {}",
                i + 1,
                r
            )));
        }
        Ok(Self {
            source_voltage,
            resistances,
        })
    }

    /// Mesh equations for the three loop currents `i1, i2, i3`.
    pub fn mesh_system(&self) -> Result<LinearSystem> {
        let [r1, r2, r3, r4, r5] = self.resistances;
        let a = Matrix::from_rows(&[
            [r1 + r4 + r5, -r5, -r4],
            [-r5, r2 + r3 + r5, -r3],
            [-r4, -r3, r3 + r4],
        ])?;
        LinearSystem::new(a, vec![self.source_voltage, 0.0, 0.0])
    }
}

/// Branch currents derived from the mesh currents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchCurrents {
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub r4: f64,
    pub r5: f64,
    /// Current drawn from the source
    pub total: f64,
}

impl BranchCurrents {
    /// Derive branch currents from mesh currents `[i1, i2, i3]`.
    pub fn from_mesh(mesh: &[f64]) -> Result<Self> {
        let &[i1, i2, i3] = mesh else {
            return Err(NumkitError::dimension_mismatch("mesh currents", 3, mesh.len()));
        };
        let r1 = i1;
        let r4 = i1 - i3;
        Ok(Self {
            r1,
            r2: i2,
            r3: i2 - i3,
            r4,
            r5: i1 - i2,
            total: r1 + r4,
        })
    }
}

/// Observations used by the curve fitting example.
pub fn regression_sample() -> Result<SampleSeries> {
    SampleSeries::new(
        vec![0.0, 1.5, 2.6, 4.2, 6.0, 8.2, 10.0, 11.4],
        vec![18.0, 13.0, 11.0, 9.0, 6.0, 4.0, 2.0, 1.0],
    )
}

/// Depth soundings across a river, every 2 m from the left bank.
pub fn river_cross_section() -> Result<SampleSeries> {
    SampleSeries::new(
        (0..=10).map(|i| 2.0 * i as f64).collect(),
        vec![0.0, 1.8, 4.0, 4.0, 5.0, 6.0, 4.0, 3.6, 3.4, 2.8, 0.0],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::{solve, ProductionPlan};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_production_plan() {
        let system = production_system().unwrap();
        let x = system.solve().unwrap();
        let plan = ProductionPlan::from_solution(&x);
        assert_eq!(plan.quantities, vec![90, 60, 80]);
        assert_eq!(plan.total, 230);
    }

    #[test]
    fn test_default_bridge_matrix() {
        let system = WheatstoneBridge::default().mesh_system().unwrap();
        assert_eq!(system.a.row(0), &[260.0, -120.0, -120.0]);
        assert_eq!(system.a.row(1), &[-120.0, 360.0, -120.0]);
        assert_eq!(system.a.row(2), &[-120.0, -120.0, 240.0]);
        assert_eq!(system.b, vec![30.0, 0.0, 0.0]);
    }

    #[test]
    fn test_branch_currents() {
        let system = WheatstoneBridge::default().mesh_system().unwrap();
        let mesh = solve(&system.a, &system.b).unwrap();
        let currents = BranchCurrents::from_mesh(&mesh).unwrap();
        assert_abs_diff_eq!(currents.r1, mesh[0]);
        assert_abs_diff_eq!(currents.r3, mesh[1] - mesh[2]);
        assert_abs_diff_eq!(currents.total, currents.r1 + currents.r4);
        assert_abs_diff_eq!(currents.total, 2.0 * mesh[0] - mesh[2], epsilon = 1e-12);

        assert!(BranchCurrents::from_mesh(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_bridge_validation() {
        assert!(WheatstoneBridge::new(30.0, [20.0, 120.0, 0.0, 120.0, 120.0]).is_err());
        assert!(WheatstoneBridge::new(-1.0, [1.0; 5]).is_err());
        assert!(WheatstoneBridge::new(10.0, [1.0; 5]).is_ok());
    }

    #[test]
    fn test_sample_series_presets() {
        assert_eq!(regression_sample().unwrap().len(), 8);
        let river = river_cross_section().unwrap();
        assert_eq!(river.len(), 11);
        assert_abs_diff_eq!(river.step().unwrap(), 2.0);
    }
}
