// pf-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Energy as UomEnergy, Length as UomLength, Mass as UomMass,
    MassDensity as UomMassDensity, MassRate as UomMassRate, Power as UomPower, Ratio as UomRatio,
    Time as UomTime, Velocity as UomVelocity, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Energy = UomEnergy;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Ratio = UomRatio;
pub type Time = UomTime;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

// Temperatures are not wrapped: solver state carries f64 degrees
// Celsius (`_c` suffix) because the performance-curve algebra is
// authored in degrees C and temperature differences are unit-agnostic.

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn j(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}
