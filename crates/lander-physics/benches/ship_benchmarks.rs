use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::{DQuat, DVec3};
use lander_config::{PlanetConfig, ShipConfig};
use lander_physics::{Axis, Direction, Planet, Ship, ThrustMode, is_colliding};

fn flying_ship() -> Ship {
    let mut ship = Ship::new(DVec3::ZERO, &ShipConfig::default()).unwrap();
    ship.set_rotate(Axis::Roll, Direction::Left);
    ship.set_rotate(Axis::Pitch, Direction::Right);
    ship.set_rotate(Axis::Yaw, Direction::Left);
    ship.set_thrust_mode(ThrustMode::Forward);
    ship
}

fn bench_ship_step(c: &mut Criterion) {
    let mut ship = flying_ship();
    let mut on_lose = |_: &str| {};
    c.bench_function("ship_step", |bencher| {
        bencher.iter(|| black_box(ship.step(&mut on_lose)))
    });
}

fn bench_landing_judgment(c: &mut Criterion) {
    let planet = Planet::new(
        DVec3::ZERO,
        DVec3::new(10.0, 0.0, 0.0),
        &PlanetConfig::default(),
    )
    .unwrap();
    let position = black_box(DVec3::new(-21.0, 0.5, 0.0));
    let velocity = black_box(DVec3::new(0.05, 0.0, 0.0));
    let up = black_box(DQuat::from_rotation_z(0.1) * DVec3::X);
    c.bench_function("assess_landing", |bencher| {
        bencher.iter(|| black_box(planet.assess_landing(position, velocity, up)))
    });
}

fn bench_tick_with_collisions(c: &mut Criterion) {
    let mut ship = flying_ship();
    let planet = Planet::new(
        DVec3::new(250.0, 0.0, 0.0),
        DVec3::new(-10.0, 0.0, 0.0),
        &PlanetConfig::default(),
    )
    .unwrap();
    let mut on_lose = |_: &str| {};
    c.bench_function("ship_tick_with_planet_check", |bencher| {
        bencher.iter(|| {
            ship.step(&mut on_lose);
            black_box(is_colliding(&ship, &planet))
        })
    });
}

criterion_group!(
    benches,
    bench_ship_step,
    bench_landing_judgment,
    bench_tick_with_collisions,
);
criterion_main!(benches);
