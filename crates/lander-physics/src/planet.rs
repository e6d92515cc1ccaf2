//! Target planet and landing judgment.
//!
//! The landing area is bounded by the plane through the landing-plane point
//! `L` (relative to the planet center) with normal `L`. A world point `p` is
//! in the area iff `dot(L, p - center) < |L|²`, i.e. it lies strictly on the
//! center's side of that plane. Points on the plane are outside.

use std::fmt;

use glam::DVec3;
use lander_config::PlanetConfig;
use lander_math::{angle_between, try_normalize};

use crate::PhysicsError;
use crate::collision::{Collidable, validate_radius};

/// Slack on the angle comparison so a ship at exactly the tolerance lands.
const ANGLE_EPSILON: f64 = 1e-9;

/// Why a landing attempt was rejected. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingFailure {
    WrongArea,
    TooFast,
    BadAngle,
}

impl fmt::Display for LandingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            LandingFailure::WrongArea => "Landed outside the landing area",
            LandingFailure::TooFast => "Landed too fast",
            LandingFailure::BadAngle => "Landed at a bad angle",
        };
        f.write_str(reason)
    }
}

/// Outcome of a planet contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingVerdict {
    Success,
    Failure(LandingFailure),
}

impl LandingVerdict {
    pub fn is_success(self) -> bool {
        matches!(self, LandingVerdict::Success)
    }
}

/// Every landing criterion, evaluated independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingAssessment {
    pub in_landing_area: bool,
    pub slow_enough: bool,
    /// Angle between the ship's up vector and the direction to the planet
    /// center. `None` when either vector is degenerate.
    pub angle: Option<f64>,
    pub angle_good: bool,
}

impl LandingAssessment {
    /// First failed criterion wins: area, then speed, then angle.
    pub fn verdict(&self) -> LandingVerdict {
        if !self.in_landing_area {
            LandingVerdict::Failure(LandingFailure::WrongArea)
        } else if !self.slow_enough {
            LandingVerdict::Failure(LandingFailure::TooFast)
        } else if !self.angle_good {
            LandingVerdict::Failure(LandingFailure::BadAngle)
        } else {
            LandingVerdict::Success
        }
    }
}

/// A planet with one landing area.
#[derive(Debug, Clone)]
pub struct Planet {
    pub position: DVec3,
    radius: f64,
    landing_point: DVec3,
    landing_normal: DVec3,
    max_landing_speed: f64,
    angle_tolerance: f64,
    eject_margin: f64,
}

impl Planet {
    /// Creates a planet at `position`.
    ///
    /// `landing_point` is relative to the planet center; it must be nonzero and
    /// strictly inside the sphere so the landing plane cuts it.
    pub fn new(
        position: DVec3,
        landing_point: DVec3,
        config: &PlanetConfig,
    ) -> Result<Self, PhysicsError> {
        let radius = validate_radius("planet radius", config.radius)?;
        let landing_normal = try_normalize(landing_point)?;
        if landing_point.length() >= radius {
            return Err(PhysicsError::PreconditionViolation(format!(
                "landing point {landing_point} lies outside planet of radius {radius}"
            )));
        }

        Ok(Self {
            position,
            radius,
            landing_point,
            landing_normal,
            max_landing_speed: config.max_landing_speed,
            angle_tolerance: config.landing_angle_tolerance,
            eject_margin: config.eject_margin,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Landing-plane point relative to the planet center.
    pub fn landing_point(&self) -> DVec3 {
        self.landing_point
    }

    /// Unit normal of the landing plane, pointing away from the center.
    pub fn landing_normal(&self) -> DVec3 {
        self.landing_normal
    }

    /// Landing-plane point in world space.
    pub fn landing_point_world(&self) -> DVec3 {
        self.position + self.landing_point
    }

    pub fn is_in_landing_area(&self, point: DVec3) -> bool {
        let l = self.landing_point;
        l.dot(point - self.position) < l.length_squared()
    }

    /// Evaluates all three landing criteria for a ship touching the planet.
    pub fn assess_landing(
        &self,
        ship_position: DVec3,
        ship_velocity: DVec3,
        ship_up: DVec3,
    ) -> LandingAssessment {
        let in_landing_area = self.is_in_landing_area(ship_position);
        let slow_enough =
            ship_velocity.length_squared() <= self.max_landing_speed * self.max_landing_speed;
        let angle = angle_between(ship_up, self.position - ship_position);
        let angle_good = angle.is_some_and(|a| a <= self.angle_tolerance + ANGLE_EPSILON);

        LandingAssessment {
            in_landing_area,
            slow_enough,
            angle,
            angle_good,
        }
    }

    pub fn is_good_landing(
        &self,
        ship_position: DVec3,
        ship_velocity: DVec3,
        ship_up: DVec3,
    ) -> LandingVerdict {
        self.assess_landing(ship_position, ship_velocity, ship_up)
            .verdict()
    }

    /// Point on the landing-plane normal, `eject_margin` above the surface,
    /// where a ship is put back after a failed landing.
    pub fn eject_point(&self) -> DVec3 {
        self.position + self.landing_normal * (self.radius + self.eject_margin)
    }
}

impl Collidable for Planet {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn collision_radius(&self) -> f64 {
        self.radius
    }
}
