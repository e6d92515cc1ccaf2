//! Text HUD.
//!
//! Computes level, health, fuel, speed, altitude and thrust mode from the
//! session state and formats them as a single status line.

use lander_physics::{Planet, Ship, ThrustMode};

/// HUD telemetry values computed each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct HudState {
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    /// Remaining fuel as a percentage of a full tank.
    pub fuel_pct: f64,
    /// Units per tick.
    pub speed: f64,
    /// Distance from the ship to the planet surface.
    pub altitude: f64,
    pub thrust: ThrustMode,
    /// Whether the point under the ship lies in the landing area.
    pub over_landing_area: bool,
    /// Most recent damage reason or win/lose text.
    pub message: Option<String>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            level: 1,
            health: 0,
            max_health: 0,
            fuel_pct: 100.0,
            speed: 0.0,
            altitude: 0.0,
            thrust: ThrustMode::None,
            over_landing_area: false,
            message: None,
        }
    }
}

/// Update HUD values from the current ship and planet.
///
/// Call once per simulation tick. The message is left untouched.
pub fn update_hud(hud: &mut HudState, ship: &Ship, planet: &Planet, level: u32) {
    let config = ship.config();

    hud.level = level;
    hud.health = ship.health();
    hud.max_health = config.max_health;
    hud.fuel_pct = if config.max_fuel > 0.0 {
        ship.fuel() / config.max_fuel * 100.0
    } else {
        0.0
    };
    hud.speed = ship.speed();
    hud.altitude = (ship.position.distance(planet.position) - planet.radius()).max(0.0);
    hud.thrust = ship.thrust_mode();

    // Project the ship onto the surface to ask about the patch beneath it.
    let radial = ship.position - planet.position;
    hud.over_landing_area = radial.length() > 0.0
        && planet.is_in_landing_area(planet.position + radial.normalize() * planet.radius());
}

impl HudState {
    /// Format HUD values as a compact status line.
    ///
    /// Example: `LVL: 2 | HP: 3/3 | FUEL: 98% | SPD: 0.040 | ALT: 112.5 | THR: brake | PAD: yes`
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "LVL: {} | HP: {}/{} | FUEL: {:.0}% | SPD: {:.3} | ALT: {:.1} | THR: {} | PAD: {}",
            self.level,
            self.health,
            self.max_health,
            self.fuel_pct,
            self.speed,
            self.altitude,
            self.thrust,
            if self.over_landing_area { "yes" } else { "no" },
        );
        if let Some(message) = &self.message {
            line.push_str(" | ");
            line.push_str(message);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use lander_config::{PlanetConfig, ShipConfig};

    fn planet() -> Planet {
        Planet::new(
            DVec3::new(100.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
            &PlanetConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_altitude_and_speed() {
        let mut ship = Ship::new(DVec3::ZERO, &ShipConfig::default()).unwrap();
        ship.velocity = DVec3::new(0.3, 0.4, 0.0);
        let mut hud = HudState::default();
        update_hud(&mut hud, &ship, &planet(), 2);
        assert_eq!(hud.level, 2);
        assert!((hud.altitude - 80.0).abs() < 1e-12);
        assert!((hud.speed - 0.5).abs() < 1e-12);
        assert_eq!(hud.health, 3);
        assert!((hud.fuel_pct - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_landing_area_beneath_ship() {
        let ship = Ship::new(DVec3::ZERO, &ShipConfig::default()).unwrap();
        let mut hud = HudState::default();
        update_hud(&mut hud, &ship, &planet(), 1);
        // Ship is on the -X side of the planet, away from the landing-plane point.
        assert!(hud.over_landing_area);

        let far_side = Ship::new(DVec3::new(200.0, 0.0, 0.0), &ShipConfig::default()).unwrap();
        update_hud(&mut hud, &far_side, &planet(), 1);
        assert!(!hud.over_landing_area);
    }

    #[test]
    fn test_status_line() {
        let hud = HudState {
            level: 4,
            health: 2,
            max_health: 3,
            fuel_pct: 57.5,
            speed: 0.0421,
            altitude: 12.25,
            thrust: ThrustMode::Brake,
            over_landing_area: true,
            message: Some("Hit an asteroid".to_string()),
        };
        let line = hud.status_line();
        assert!(line.contains("LVL: 4"));
        assert!(line.contains("HP: 2/3"));
        assert!(line.contains("FUEL: 58%") || line.contains("FUEL: 57%"));
        assert!(line.contains("SPD: 0.042"));
        assert!(line.contains("ALT: 12.2") || line.contains("ALT: 12.3"));
        assert!(line.contains("THR: brake"));
        assert!(line.contains("PAD: yes"));
        assert!(line.ends_with("| Hit an asteroid"));
    }

    #[test]
    fn test_status_line_without_message() {
        let line = HudState::default().status_line();
        assert!(line.ends_with("PAD: no"));
    }
}
