//! Curve ownership and handle-based evaluation.

use crate::curve::Curve;
use pf_core::CurveId;
use serde::{Deserialize, Serialize};

/// Owns the authored curves of a model and mints the handles equipment
/// stores in its configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CurveBank {
    curves: Vec<Curve>,
}

impl CurveBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a curve, returning its handle.
    pub fn add(&mut self, curve: Curve) -> CurveId {
        let id = CurveId::from_index(self.curves.len() as u32);
        self.curves.push(curve);
        id
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Evaluate a one-variable curve by handle.
    pub fn value(&self, id: CurveId, x: f64) -> f64 {
        self.curves[id.index() as usize].value(x)
    }

    /// Evaluate a two-variable curve by handle.
    pub fn value2(&self, id: CurveId, x: f64, y: f64) -> f64 {
        self.curves[id.index() as usize].value2(x, y)
    }

    pub fn get(&self, id: CurveId) -> &Curve {
        &self.curves[id.index() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveForm;
    use proptest::prelude::*;

    fn bank_with_linear() -> (CurveBank, CurveId) {
        let mut bank = CurveBank::new();
        let id = bank.add(
            Curve::new("unit", CurveForm::Linear { c: [0.0, 1.0] }, 0.0, 1.0).unwrap(),
        );
        (bank, id)
    }

    #[test]
    fn handle_round_trip() {
        let (bank, id) = bank_with_linear();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.get(id).name, "unit");
        assert_eq!(bank.value(id, 0.25), 0.25);
    }

    proptest! {
        // With an output clip present, no input can escape the clip.
        #[test]
        fn output_always_within_clip(x in -1e3_f64..1e3) {
            let mut bank = CurveBank::new();
            let id = bank.add(
                Curve::new("clip", CurveForm::Cubic { c: [0.0, 3.0, -2.0, 0.5] }, -10.0, 10.0)
                    .unwrap()
                    .with_output_limits(0.1, 1.2)
                    .unwrap(),
            );
            let v = bank.value(id, x);
            prop_assert!((0.1..=1.2).contains(&v));
        }
    }
}
