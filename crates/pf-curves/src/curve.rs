//! Curve forms and the domain-clamped evaluator.

use crate::error::{CurveError, CurveResult};
use pf_core::clamp;
use serde::{Deserialize, Serialize};

/// Polynomial form of a performance curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CurveForm {
    /// c0 + c1·x
    Linear { c: [f64; 2] },
    /// c0 + c1·x + c2·x²
    Quadratic { c: [f64; 3] },
    /// c0 + c1·x + c2·x² + c3·x³
    Cubic { c: [f64; 4] },
    /// c0 + c1·x + c2·x² + c3·y + c4·y² + c5·x·y
    Biquadratic { c: [f64; 6] },
}

impl CurveForm {
    fn is_two_variable(&self) -> bool {
        matches!(self, CurveForm::Biquadratic { .. })
    }

    fn eval(&self, x: f64, y: f64) -> f64 {
        match self {
            CurveForm::Linear { c } => c[0] + c[1] * x,
            CurveForm::Quadratic { c } => c[0] + x * (c[1] + x * c[2]),
            CurveForm::Cubic { c } => c[0] + x * (c[1] + x * (c[2] + x * c[3])),
            CurveForm::Biquadratic { c } => {
                c[0] + x * (c[1] + x * c[2]) + y * (c[3] + y * c[4]) + c[5] * x * y
            }
        }
    }
}

/// An authored performance curve with input-domain bounds and an
/// optional output clip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub name: String,
    pub form: CurveForm,
    pub x_min: f64,
    pub x_max: f64,
    /// Second-variable bounds; ignored by one-variable forms.
    pub y_min: f64,
    pub y_max: f64,
    pub out_min: Option<f64>,
    pub out_max: Option<f64>,
}

impl Curve {
    /// Author a one-variable curve.
    pub fn new(name: impl Into<String>, form: CurveForm, x_min: f64, x_max: f64) -> CurveResult<Self> {
        if form.is_two_variable() {
            return Err(CurveError::InvalidDefinition {
                what: "biquadratic curves need bounds for both variables",
            });
        }
        Self::build(name.into(), form, x_min, x_max, 0.0, 0.0)
    }

    /// Author a two-variable curve.
    pub fn new_two_variable(
        name: impl Into<String>,
        form: CurveForm,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> CurveResult<Self> {
        if !form.is_two_variable() {
            return Err(CurveError::InvalidDefinition {
                what: "one-variable forms take a single bounds pair",
            });
        }
        if y_min >= y_max {
            return Err(CurveError::InvalidDefinition {
                what: "y_min must be below y_max",
            });
        }
        Self::build(name.into(), form, x_min, x_max, y_min, y_max)
    }

    fn build(
        name: String,
        form: CurveForm,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> CurveResult<Self> {
        if !x_min.is_finite() || !x_max.is_finite() || x_min >= x_max {
            return Err(CurveError::InvalidDefinition {
                what: "x_min must be finite and below x_max",
            });
        }
        Ok(Self {
            name,
            form,
            x_min,
            x_max,
            y_min,
            y_max,
            out_min: None,
            out_max: None,
        })
    }

    /// Attach an output clip.
    pub fn with_output_limits(mut self, out_min: f64, out_max: f64) -> CurveResult<Self> {
        if out_min >= out_max {
            return Err(CurveError::InvalidDefinition {
                what: "out_min must be below out_max",
            });
        }
        self.out_min = Some(out_min);
        self.out_max = Some(out_max);
        Ok(self)
    }

    /// Evaluate a one-variable curve. For two-variable forms the second
    /// variable is pinned to its lower bound.
    pub fn value(&self, x: f64) -> f64 {
        self.value2(x, self.y_min)
    }

    /// Evaluate with both independent variables, clamping each into its
    /// authored domain and clipping the output if limits are present.
    pub fn value2(&self, x: f64, y: f64) -> f64 {
        let x = clamp(x, self.x_min, self.x_max);
        let y = if self.form.is_two_variable() {
            clamp(y, self.y_min, self.y_max)
        } else {
            y
        };
        let mut out = self.form.eval(x, y);
        if let Some(lo) = self.out_min {
            out = out.max(lo);
        }
        if let Some(hi) = self.out_max {
            out = out.min(hi);
        }
        out
    }
}
