//! Environment model: surface temperatures and the simulated calendar clock.
//!
//! Temperatures use the equilibrium approximation
//! `T = T0 * sqrt((1 - albedo) / 0.7) / sqrt(d_AU) + greenhouse`, normalized
//! so that a body with albedo 0.3 at 1 AU sits at `T0`.
//! Only planets carry a temperature.

use std::collections::HashMap;
use std::fmt;

use crate::bodies::{SolarSystem, ThermalCoefficients};
use crate::settings::EnvironmentSettings;
use crate::types::{BodyId, TAU};

/// Albedo at which the equilibrium formula reduces to `T0`.
const REFERENCE_ABSORPTION: f64 = 0.7;

/// A surface temperature in degrees Celsius, rounded to one decimal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Temperature {
    pub celsius: f64,
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.celsius)
    }
}

/// Temperature of a body `distance` scene units from the central body.
///
/// Returns `None` at zero or non-finite distance, where the formula diverges.
pub fn surface_temperature(
    settings: &EnvironmentSettings,
    distance: f64,
    thermal: ThermalCoefficients,
) -> Option<Temperature> {
    let distance_au = distance / settings.units_per_au;
    if !distance_au.is_finite() || distance_au <= 0.0 {
        return None;
    }

    let kelvin = settings.base_temperature
        * ((1.0 - thermal.albedo) / REFERENCE_ABSORPTION).sqrt()
        / distance_au.sqrt()
        + thermal.greenhouse;
    let celsius = ((kelvin - settings.kelvin_offset) * 10.0).round() / 10.0;
    celsius.is_finite().then_some(Temperature { celsius })
}

/// Calendar reading derived from one body's spin and orbit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockReading {
    pub hours: u32,
    pub minutes: u32,
    pub days: i64,
    pub years: i64,
}

impl ClockReading {
    /// One full spin is a day, one full orbit is a year.
    pub fn from_rotation(spin: f64, orbit_angle: f64) -> Self {
        let total_days = spin / TAU;
        let days = total_days.floor();
        let day_hours = (total_days - days) * 24.0;
        let hours = day_hours.floor();
        let minutes = ((day_hours - hours) * 60.0).floor();
        let years = (orbit_angle / TAU).floor();

        Self {
            hours: hours.clamp(0.0, 23.0) as u32,
            minutes: minutes.clamp(0.0, 59.0) as u32,
            days: days as i64,
            years: years as i64,
        }
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {:02}:{:02}, {} days, {} years",
            self.hours, self.minutes, self.days, self.years
        )
    }
}

/// Environment outputs recomputed every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvironmentReadout {
    pub temperatures: HashMap<BodyId, Temperature>,
    /// `None` when the clock body is absent.
    pub clock: Option<ClockReading>,
}

impl EnvironmentReadout {
    pub fn temperature(&self, id: BodyId) -> Option<Temperature> {
        self.temperatures.get(&id).copied()
    }

    /// Recompute all readings from the current body positions.
    pub fn update(&mut self, system: &SolarSystem, settings: &EnvironmentSettings) {
        self.temperatures.clear();
        let center = system.central().map(|c| c.position()).unwrap_or_default();

        for body in system.iter().filter(|b| b.kind.has_temperature()) {
            let thermal = body.thermal.unwrap_or_default();
            let distance = body.position().distance(center);
            if let Some(temperature) = surface_temperature(settings, distance, thermal) {
                self.temperatures.insert(body.id, temperature);
            }
        }

        self.clock = system
            .find(&settings.clock_body)
            .and_then(|id| system.get(id))
            .map(|body| ClockReading::from_rotation(body.spin(), body.angle()));
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::bodies::BodyDefinition;
    use crate::types::BodyKind;

    #[test]
    fn test_one_au_reference_albedo() {
        let settings = EnvironmentSettings::default();
        let t = surface_temperature(&settings, 100.0, ThermalCoefficients::default()).unwrap();
        assert_relative_eq!(t.celsius, 6.0);
        assert_eq!(t.to_string(), "6.0°C");
    }

    #[test]
    fn test_greenhouse_and_distance() {
        let settings = EnvironmentSettings::default();
        let thermal = ThermalCoefficients {
            albedo: 0.3,
            greenhouse: 33.0,
        };
        // 4 AU halves the equilibrium temperature.
        let t = surface_temperature(&settings, 400.0, thermal).unwrap();
        assert_relative_eq!(t.celsius, 279.0 / 2.0 + 33.0 - 273.0);
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        let settings = EnvironmentSettings::default();
        let thermal = ThermalCoefficients {
            albedo: 0.5,
            greenhouse: 0.0,
        };
        let t = surface_temperature(&settings, 152.0, thermal).unwrap();
        assert_relative_eq!(t.celsius * 10.0, (t.celsius * 10.0).round(), epsilon = 1e-9);
    }

    #[test]
    fn test_zero_distance_has_no_temperature() {
        let settings = EnvironmentSettings::default();
        assert!(surface_temperature(&settings, 0.0, ThermalCoefficients::default()).is_none());
    }

    #[test]
    fn test_clock_reading() {
        // Just past 2.5 days of spin: day 2, 12:00.
        let reading = ClockReading::from_rotation((2.5 + 1e-9) * TAU, 1.2 * TAU);
        assert_eq!(
            reading,
            ClockReading {
                hours: 12,
                minutes: 0,
                days: 2,
                years: 1
            }
        );
        assert_eq!(reading.to_string(), "Time: 12:00, 2 days, 1 years");
    }

    #[test]
    fn test_clock_minutes() {
        // 6h45m into day 0.
        let fraction = (6.0 + 45.5 / 60.0) / 24.0;
        let reading = ClockReading::from_rotation(fraction * TAU, 0.0);
        assert_eq!((reading.hours, reading.minutes, reading.days), (6, 45, 0));
    }

    #[test]
    fn test_readout_covers_planets_only() {
        let system = SolarSystem::from_definitions(vec![
            BodyDefinition::new("Sun", BodyKind::Star, 0.0, 0.0),
            BodyDefinition::new("Earth", BodyKind::Planet, 100.0, 0.0).with_thermal(0.3, 0.0),
            BodyDefinition::new("Moon", BodyKind::Moon, 10.0, 0.0).with_parent("Earth"),
            BodyDefinition::new("Rock", BodyKind::Asteroid, 200.0, 0.0),
        ])
        .unwrap();

        let mut readout = EnvironmentReadout::default();
        readout.update(&system, &EnvironmentSettings::default());

        assert_eq!(readout.temperatures.len(), 1);
        let earth = system.find("Earth").unwrap();
        assert_eq!(readout.temperature(earth).unwrap().celsius, 6.0);
        assert!(readout.temperature(system.find("Moon").unwrap()).is_none());
        assert!(readout.clock.is_some());
    }

    #[test]
    fn test_missing_clock_body() {
        let system = SolarSystem::from_definitions(vec![BodyDefinition::new(
            "Sun",
            BodyKind::Star,
            0.0,
            0.0,
        )])
        .unwrap();
        let mut readout = EnvironmentReadout::default();
        readout.update(&system, &EnvironmentSettings::default());
        assert!(readout.clock.is_none());
        assert!(readout.temperatures.is_empty());
    }
}
