//! Building heat-balance services for radiant components.
//!
//! The global heat-balance solver is an external collaborator; this
//! module exposes the slice of it radiant equipment consumes: the
//! per-surface CTF coefficients, the shared heat-source array (one
//! writer per surface), and synchronous recompute of the surface
//! temperatures from the current source term.
//!
//! The linear closure between inside surface temperature `Ti`, outside
//! surface temperature `To` and source `q`:
//!
//! ```text
//! Ti = Ca + Cb·To + Cc·q
//! To = Cd + Ce·Ti + Cf·q
//! Tsrc = Cg + Ch·q + Ci·Ti + Cj·To
//! ```
//!
//! Eliminating the cross terms requires `1 − Cb·Ce != 0`; that is a
//! modeling assumption inherited from the radiant-system algebra and is
//! guarded here.

use crate::error::{PlantError, PlantResult};
use pf_core::SurfaceId;

const CLOSURE_DENOMINATOR_MIN: f64 = 1e-12;

/// Raw CTF/heat-balance coefficients for one surface, constant within a
/// timestep once fetched.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceCtf {
    /// Ca: inside-balance constant part.
    pub inside_const: f64,
    /// Cb: inside-balance coefficient on the outside temperature.
    pub inside_outside_temp: f64,
    /// Cc: inside-balance coefficient on the source.
    pub inside_source: f64,
    /// Cd: outside-balance constant part.
    pub outside_const: f64,
    /// Ce: outside-balance coefficient on the inside temperature.
    pub outside_inside_temp: f64,
    /// Cf: outside-balance coefficient on the source.
    pub outside_source: f64,
    /// Cg: source-plane constant part (flux history).
    pub source_const: f64,
    /// Ch: source-plane coefficient on the current source.
    pub source_flux: f64,
    /// Ci: source-plane coefficient on the inside temperature.
    pub source_inside: f64,
    /// Cj: source-plane coefficient on the outside temperature.
    pub source_outside: f64,
}

impl SurfaceCtf {
    fn closure_denominator(&self) -> PlantResult<f64> {
        let d = 1.0 - self.inside_outside_temp * self.outside_inside_temp;
        if d.abs() < CLOSURE_DENOMINATOR_MIN {
            return Err(PlantError::Invariant {
                what: "surface heat-balance closure denominator (1 - Ce*Cb) is singular",
            });
        }
        Ok(d)
    }
}

/// One heat-balance surface a radiant component can couple to.
#[derive(Clone, Debug)]
pub struct Surface {
    pub area_m2: f64,
    pub ctf: SurfaceCtf,
    pub inside_temp_c: f64,
    pub outside_temp_c: f64,
    pub source_temp_c: f64,
    /// Inside temperature committed at the previous timestep boundary.
    pub prev_inside_temp_c: f64,
}

impl Surface {
    pub fn new(area_m2: f64, ctf: SurfaceCtf, initial_temp_c: f64) -> Self {
        Self {
            area_m2,
            ctf,
            inside_temp_c: initial_temp_c,
            outside_temp_c: initial_temp_c,
            source_temp_c: initial_temp_c,
            prev_inside_temp_c: initial_temp_c,
        }
    }
}

/// Heat-balance state shared across radiant equipment.
#[derive(Clone, Debug, Default)]
pub struct HeatBalance {
    surfaces: Vec<Surface>,
    /// Shared heat-source array [W], indexed by surface. Each radiant
    /// component owns its assigned surface index exclusively for the
    /// duration of its call.
    source_w: Vec<f64>,
}

impl HeatBalance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_surface(&mut self, surface: Surface) -> SurfaceId {
        let id = SurfaceId::from_index(self.surfaces.len() as u32);
        self.surfaces.push(surface);
        self.source_w.push(0.0);
        id
    }

    pub fn surface(&self, id: SurfaceId) -> &Surface {
        &self.surfaces[id.index() as usize]
    }

    pub fn ctf(&self, id: SurfaceId) -> SurfaceCtf {
        self.surface(id).ctf
    }

    pub fn source(&self, id: SurfaceId) -> f64 {
        self.source_w[id.index() as usize]
    }

    /// Write the heat source for a surface (single-writer contract).
    pub fn set_source(&mut self, id: SurfaceId, q_w: f64) {
        self.source_w[id.index() as usize] = q_w;
    }

    /// Roll the inside-temperature history at a timestep boundary.
    pub fn begin_timestep(&mut self, id: SurfaceId) {
        let s = &mut self.surfaces[id.index() as usize];
        s.prev_inside_temp_c = s.inside_temp_c;
        self.source_w[id.index() as usize] = 0.0;
    }

    /// Re-solve the outside-face temperature from the current source.
    pub fn recompute_outside_surface(&mut self, id: SurfaceId) -> PlantResult<()> {
        let q = self.source_w[id.index() as usize];
        let s = &mut self.surfaces[id.index() as usize];
        let c = s.ctf;
        let d = c.closure_denominator()?;
        s.outside_temp_c = (c.outside_const
            + c.outside_inside_temp * c.inside_const
            + q * (c.outside_source + c.outside_inside_temp * c.inside_source))
            / d;
        Ok(())
    }

    /// Re-solve the inside-face and source-plane temperatures from the
    /// current source.
    pub fn recompute_inside_surface(&mut self, id: SurfaceId) -> PlantResult<()> {
        let q = self.source_w[id.index() as usize];
        let s = &mut self.surfaces[id.index() as usize];
        let c = s.ctf;
        let d = c.closure_denominator()?;
        s.inside_temp_c = (c.inside_const
            + c.inside_outside_temp * c.outside_const
            + q * (c.inside_source + c.inside_outside_temp * c.outside_source))
            / d;
        s.source_temp_c = c.source_const
            + c.source_flux * q
            + c.source_inside * s.inside_temp_c
            + c.source_outside * s.outside_temp_c;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn slab_ctf() -> SurfaceCtf {
        SurfaceCtf {
            inside_const: 4.0,
            inside_outside_temp: 0.3,
            inside_source: 1.0e-5,
            outside_const: 6.0,
            outside_inside_temp: 0.25,
            outside_source: 4.0e-6,
            source_const: 5.0,
            source_flux: 8.0e-6,
            source_inside: 0.45,
            source_outside: 0.35,
        }
    }

    #[test]
    fn zero_source_closure_is_consistent() {
        let mut hb = HeatBalance::new();
        let id = hb.add_surface(Surface::new(1500.0, slab_ctf(), 10.0));
        hb.recompute_outside_surface(id).unwrap();
        hb.recompute_inside_surface(id).unwrap();

        let s = hb.surface(id);
        let c = slab_ctf();
        // both balance equations must hold simultaneously
        assert_relative_eq!(
            s.inside_temp_c,
            c.inside_const + c.inside_outside_temp * s.outside_temp_c,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            s.outside_temp_c,
            c.outside_const + c.outside_inside_temp * s.inside_temp_c,
            max_relative = 1e-12
        );
    }

    #[test]
    fn extraction_lowers_inside_temperature() {
        let mut hb = HeatBalance::new();
        let id = hb.add_surface(Surface::new(1500.0, slab_ctf(), 10.0));
        hb.recompute_inside_surface(id).unwrap();
        let warm = hb.surface(id).inside_temp_c;

        hb.set_source(id, -50_000.0);
        hb.recompute_outside_surface(id).unwrap();
        hb.recompute_inside_surface(id).unwrap();
        assert!(hb.surface(id).inside_temp_c < warm);
    }

    #[test]
    fn singular_closure_is_guarded() {
        let ctf = SurfaceCtf {
            inside_outside_temp: 2.0,
            outside_inside_temp: 0.5,
            ..SurfaceCtf::default()
        };
        let mut hb = HeatBalance::new();
        let id = hb.add_surface(Surface::new(100.0, ctf, 0.0));
        assert!(hb.recompute_inside_surface(id).is_err());
    }

    #[test]
    fn begin_timestep_rolls_history_and_clears_source() {
        let mut hb = HeatBalance::new();
        let id = hb.add_surface(Surface::new(100.0, slab_ctf(), 10.0));
        hb.set_source(id, -1000.0);
        hb.recompute_inside_surface(id).unwrap();
        let committed = hb.surface(id).inside_temp_c;
        hb.begin_timestep(id);
        assert_eq!(hb.surface(id).prev_inside_temp_c, committed);
        assert_eq!(hb.source(id), 0.0);
    }
}
