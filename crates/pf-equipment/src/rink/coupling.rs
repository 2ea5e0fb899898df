//! CTF coefficient closure between the slab source plane and the
//! surface heat balance.
//!
//! The raw coefficients (Ca…Cj) and the surface area come from the heat
//! balance once per timestep and are constant within it; the composite
//! pair (Ck, Cl) relating source-plane temperature to the source term,
//!
//! ```text
//! Tsrc = Ck + Cl·q
//! ```
//!
//! is re-derived on every call. The elimination shares the
//! `1 − Ce·Cb` denominator with the surface closure and is guarded the
//! same way.

use crate::error::{ComponentError, ComponentResult};
use pf_core::SurfaceId;
use pf_plant::HeatBalance;
use serde::{Deserialize, Serialize};

const CLOSURE_DENOMINATOR_MIN: f64 = 1e-12;

/// Per-timestep snapshot of the raw heat-balance coefficients.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RawCoefficients {
    pub ca: f64,
    pub cb: f64,
    pub cc: f64,
    pub cd: f64,
    pub ce: f64,
    pub cf: f64,
    pub cg: f64,
    pub ch: f64,
    pub ci: f64,
    pub cj: f64,
    pub area_m2: f64,
}

impl RawCoefficients {
    /// Fetch the current coefficients for a surface.
    pub fn fetch(heat_balance: &HeatBalance, surface: SurfaceId) -> Self {
        let ctf = heat_balance.ctf(surface);
        Self {
            ca: ctf.inside_const,
            cb: ctf.inside_outside_temp,
            cc: ctf.inside_source,
            cd: ctf.outside_const,
            ce: ctf.outside_inside_temp,
            cf: ctf.outside_source,
            cg: ctf.source_const,
            ch: ctf.source_flux,
            ci: ctf.source_inside,
            cj: ctf.source_outside,
            area_m2: heat_balance.surface(surface).area_m2,
        }
    }

    /// Derive the per-call composite pair (Ck, Cl).
    pub fn composites(&self) -> ComponentResult<(f64, f64)> {
        let denom = 1.0 - self.ce * self.cb;
        if denom.abs() < CLOSURE_DENOMINATOR_MIN {
            return Err(ComponentError::NonPhysical {
                what: "slab coefficient closure denominator (1 - Ce*Cb) is singular",
            });
        }
        let ck = self.cg
            + (self.ci * (self.ca + self.cb * self.cd) + self.cj * (self.cd + self.ce * self.ca))
                / denom;
        let cl = self.ch
            + (self.ci * (self.cc + self.cb * self.cf) + self.cj * (self.cf + self.ce * self.cc))
                / denom;
        Ok((ck, cl))
    }
}
