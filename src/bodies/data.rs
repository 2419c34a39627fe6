//! Stock solar system scene: the Sun, eight planets with their major moons,
//! an asteroid belt and a station orbiting Earth.
//! Distances are in scene units (100 units = 1 AU), compressed for display.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::BodyDefinition;
use crate::settings::SceneSettings;
use crate::types::{BodyKind, TAU};

/// Static data for a planet of the stock scene.
struct PlanetData {
    name: &'static str,
    /// Orbit radius (scene units).
    distance: f64,
    /// Legacy per-frame orbital speed.
    speed: f64,
    /// Self-rotation per tick.
    spin: f64,
    radius: f64,
    albedo: f64,
    greenhouse: f64,
    moons: &'static [MoonData],
}

struct MoonData {
    name: &'static str,
    distance: f64,
    speed: f64,
    radius: f64,
}

const SUN_RADIUS: f64 = 20.0;
const SUN_SPIN: f64 = 0.001;

const PLANETS: &[PlanetData] = &[
    PlanetData {
        name: "Mercury",
        distance: 39.0,
        speed: 4.15,
        spin: 0.0003,
        radius: 1.5,
        albedo: 0.088,
        greenhouse: 0.0,
        moons: &[],
    },
    PlanetData {
        name: "Venus",
        distance: 72.0,
        speed: 1.62,
        spin: -0.0001,
        radius: 3.7,
        albedo: 0.76,
        greenhouse: 500.0,
        moons: &[],
    },
    PlanetData {
        name: "Earth",
        distance: 100.0,
        speed: 1.0,
        spin: 0.02,
        radius: 4.0,
        albedo: 0.306,
        greenhouse: 33.0,
        moons: &[MoonData {
            name: "Moon",
            distance: 10.0,
            speed: 6.5,
            radius: 1.1,
        }],
    },
    PlanetData {
        name: "Mars",
        distance: 152.0,
        speed: 0.53,
        spin: 0.0195,
        radius: 2.1,
        albedo: 0.25,
        greenhouse: 5.0,
        moons: &[
            MoonData {
                name: "Phobos",
                distance: 4.0,
                speed: 10.0,
                radius: 0.3,
            },
            MoonData {
                name: "Deimos",
                distance: 6.0,
                speed: 6.0,
                radius: 0.2,
            },
        ],
    },
    PlanetData {
        name: "Jupiter",
        distance: 520.0,
        speed: 0.084,
        spin: 0.048,
        radius: 11.0,
        albedo: 0.503,
        greenhouse: 0.0,
        moons: &[
            MoonData {
                name: "Io",
                distance: 16.0,
                speed: 8.0,
                radius: 1.0,
            },
            MoonData {
                name: "Europa",
                distance: 20.0,
                speed: 6.0,
                radius: 0.9,
            },
            MoonData {
                name: "Ganymede",
                distance: 25.0,
                speed: 4.5,
                radius: 1.5,
            },
            MoonData {
                name: "Callisto",
                distance: 32.0,
                speed: 3.0,
                radius: 1.4,
            },
        ],
    },
    PlanetData {
        name: "Saturn",
        distance: 954.0,
        speed: 0.034,
        spin: 0.045,
        radius: 9.5,
        albedo: 0.342,
        greenhouse: 0.0,
        moons: &[
            MoonData {
                name: "Enceladus",
                distance: 14.0,
                speed: 7.0,
                radius: 0.4,
            },
            MoonData {
                name: "Titan",
                distance: 22.0,
                speed: 4.0,
                radius: 1.5,
            },
        ],
    },
    PlanetData {
        name: "Uranus",
        distance: 1920.0,
        speed: 0.012,
        spin: 0.028,
        radius: 5.0,
        albedo: 0.3,
        greenhouse: 0.0,
        moons: &[MoonData {
            name: "Titania",
            distance: 10.0,
            speed: 4.0,
            radius: 0.5,
        }],
    },
    PlanetData {
        name: "Neptune",
        distance: 3006.0,
        speed: 0.006,
        spin: 0.03,
        radius: 4.8,
        albedo: 0.29,
        greenhouse: 0.0,
        moons: &[MoonData {
            name: "Triton",
            distance: 9.0,
            speed: 4.0,
            radius: 0.8,
        }],
    },
];

/// Name of the station body.
pub const STATION_NAME: &str = "ISS";

/// Name of the station's parent body.
pub const STATION_PARENT: &str = "Earth";

/// Build the stock scene. The same settings always yield the same scene.
pub fn stock_scene(settings: &SceneSettings) -> Vec<BodyDefinition> {
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut bodies = vec![
        BodyDefinition::new("Sun", BodyKind::Star, 0.0, 0.0)
            .with_spin(SUN_SPIN)
            .with_radius(SUN_RADIUS),
    ];

    for planet in PLANETS {
        bodies.push(
            BodyDefinition::new(
                planet.name,
                BodyKind::Planet,
                planet.distance,
                planet.speed * BodyKind::Planet.frame_rate_factor(),
            )
            .with_spin(planet.spin)
            .with_angle(rng.gen_range(0.0..TAU))
            .with_radius(planet.radius)
            .with_thermal(planet.albedo, planet.greenhouse),
        );

        for moon in planet.moons {
            bodies.push(
                BodyDefinition::new(
                    moon.name,
                    BodyKind::Moon,
                    moon.distance,
                    moon.speed * BodyKind::Moon.frame_rate_factor(),
                )
                .with_parent(planet.name)
                .with_angle(rng.gen_range(0.0..TAU))
                .with_radius(moon.radius),
            );
        }
    }

    for index in 0..settings.asteroid_count {
        let distance = rng.gen_range(settings.belt_inner_radius..settings.belt_outer_radius);
        let speed = rng.gen_range(settings.asteroid_speed.0..settings.asteroid_speed.1);
        bodies.push(
            BodyDefinition::new(
                format!("Asteroid {:03}", index + 1),
                BodyKind::Asteroid,
                distance,
                speed * BodyKind::Asteroid.frame_rate_factor(),
            )
            .with_angle(rng.gen_range(0.0..TAU))
            .with_radius(rng.gen_range(0.2..0.7)),
        );
    }

    bodies.push(
        BodyDefinition::new(
            STATION_NAME,
            BodyKind::Station,
            settings.station_radius,
            settings.station_speed * BodyKind::Station.frame_rate_factor(),
        )
        .with_parent(STATION_PARENT)
        .with_angle(rng.gen_range(0.0..TAU))
        .with_radius(0.5)
        .facing_parent(),
    );

    bodies
}
