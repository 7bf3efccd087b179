//! Headless симуляция Sentinel
//!
//! Патрульный агент на квадратном маршруте, стена посередине и цель,
//! которая ходит туда-обратно через поле зрения. Заканчивается на
//! TargetCaught или по лимиту тиков.

use bevy::prelude::*;
use sentinel_simulation::{
    create_headless_app, log_info, spawn_chase_target, spawn_obstacle, spawn_patrol_agent, spawn_patrol_route,
    AgentConfig, AgentMode, ObstacleShape, SimulationPlugin, TargetCaught,
};

const SEED: u64 = 42;
const MAX_TICKS: u32 = 3600;

/// Цель ходит вдоль X между -limit и +limit
#[derive(Component)]
struct Wander {
    speed: f32,
    limit: f32,
}

fn drive_target(mut targets: Query<(&mut Transform, &mut Wander)>, time: Res<Time<Fixed>>) {
    for (mut transform, mut wander) in targets.iter_mut() {
        transform.translation.x += wander.speed * time.delta_secs();
        if transform.translation.x.abs() > wander.limit {
            transform.translation.x = transform.translation.x.clamp(-wander.limit, wander.limit);
            wander.speed = -wander.speed;
        }
    }
}

fn main() {
    println!("Starting Sentinel headless simulation (seed: {})", SEED);

    let mut app = create_headless_app(SEED);
    app.add_plugins(SimulationPlugin)
        .add_systems(FixedUpdate, drive_target.before(sentinel_simulation::ai::patrol_agent_tick));

    let agent = {
        let mut commands = app.world_mut().commands();

        spawn_patrol_route(
            &mut commands,
            Vec3::ZERO,
            [
                Vec3::new(-6.0, 0.0, -6.0),
                Vec3::new(6.0, 0.0, -6.0),
                Vec3::new(6.0, 0.0, 6.0),
                Vec3::new(-6.0, 0.0, 6.0),
                Vec3::new(0.0, 0.0, 9.0),
            ],
        );
        spawn_obstacle(
            &mut commands,
            Vec3::new(0.0, 0.5, 0.0),
            ObstacleShape::Cuboid {
                half_extents: Vec3::new(2.0, 1.0, 0.3),
            },
        );

        let target = spawn_chase_target(&mut commands, Vec3::new(0.0, 0.0, -3.0));
        commands.entity(target).insert(Wander { speed: 1.5, limit: 8.0 });

        match spawn_patrol_agent(&mut commands, Vec3::ZERO, AgentConfig::default(), Some(target)) {
            Ok(agent) => agent,
            Err(err) => {
                eprintln!("Invalid agent config: {}", err);
                return;
            }
        }
    };

    app.world_mut().flush();
    let mut caught_reader = app.world().resource::<Events<TargetCaught>>().get_cursor();

    for tick in 0..MAX_TICKS {
        app.update();

        let events = app.world().resource::<Events<TargetCaught>>();
        if let Some(caught) = caught_reader.read(events).next() {
            log_info(&format!("Tick {}: {:?} caught {:?}", tick, caught.agent, caught.target));
            println!("Target caught after {} ticks", tick);
            return;
        }

        if tick % 120 == 0 {
            let world = app.world();
            let mode = world.get::<AgentMode>(agent).map(|mode| mode.label()).unwrap_or("?");
            let position = world.get::<Transform>(agent).map(|t| t.translation).unwrap_or_default();
            println!(
                "Tick {}: agent {} at ({:.2}, {:.2}, {:.2})",
                tick, mode, position.x, position.y, position.z
            );
        }
    }

    println!("Simulation complete: target not caught in {} ticks", MAX_TICKS);
}
