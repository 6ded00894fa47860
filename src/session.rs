//! Presenter-side state between interactions.
//!
//! A front-end that shows a summary first and a detailed view later keeps
//! the last bridge run here instead of in global state.

use crate::error::Result;
use crate::linalg::{GaussSeidel, GaussSeidelConfig, GaussSeidelRun};
use crate::presets::{BranchCurrents, WheatstoneBridge};

/// A solved Wheatstone bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeRun {
    /// Bridge parameters
    pub bridge: WheatstoneBridge,
    /// Gauss-Seidel settings used
    pub config: GaussSeidelConfig,
    /// Iteration record
    pub run: GaussSeidelRun,
    /// Branch currents from the final mesh currents
    pub currents: BranchCurrents,
}

/// Explicit presenter session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    last_bridge: Option<BridgeRun>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve the bridge mesh equations from a zero initial guess and keep the result.
    pub fn solve_bridge(
        &mut self,
        bridge: WheatstoneBridge,
        config: GaussSeidelConfig,
    ) -> Result<&BridgeRun> {
        let system = bridge.mesh_system()?;
        let x0 = vec![0.0; system.size()];
        let run = GaussSeidel::with_config(config).solve(&system.a, &system.b, &x0)?;
        let currents = BranchCurrents::from_mesh(&run.solution)?;

        let stored = self.last_bridge.insert(BridgeRun {
            bridge,
            config,
            run,
            currents,
        });
        Ok(&*stored)
    }

    /// The most recent bridge run, if any.
    pub fn last_bridge(&self) -> Option<&BridgeRun> {
        self.last_bridge.as_ref()
    }

    /// Forget stored results.
    pub fn clear(&mut self) {
        self.last_bridge = None;
    }
}
