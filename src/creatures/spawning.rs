//! Wild creature population of the den.

use bevy::prelude::*;
use rand::prelude::*;

use crate::shared::*;
use crate::world::{ActiveMap, MapKind};

use super::genetics::{species_name, wild_genome};

/// Wild creatures spawned per den build, floor space permitting.
pub const WILD_PER_DEN: usize = 6;

const Z_CREATURE: f32 = 8.0;

/// A wild creature roaming the den, tamed on contact.
#[derive(Component, Debug, Clone)]
pub struct WildCreature {
    pub creature: Creature,
}

fn creature_color(genome: &str) -> Color {
    // Hue from the genome so siblings look related.
    let sum: u32 = genome.bytes().map(u32::from).sum();
    Color::hsl((sum % 36) as f32 * 10.0, 0.6, 0.55)
}

/// Populate a freshly built den with wild creatures on distinct floor
/// tiles, keeping the start and warp tiles clear.
pub fn spawn_wild_creatures(
    mut commands: Commands,
    mut events: EventReader<DenRebuiltEvent>,
    existing: Query<Entity, With<WildCreature>>,
    active_map: Res<ActiveMap>,
    mut rng: ResMut<DenRng>,
) {
    if events.read().next().is_none() {
        return;
    }
    events.clear();

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let MapKind::Procedural { den } = &active_map.kind else {
        return;
    };

    let mut open: Vec<(i32, i32)> = den
        .floor_tiles
        .iter()
        .copied()
        .filter(|&t| t != den.start && t != den.warp)
        .collect();
    open.shuffle(&mut rng.0);

    for &(x, y) in open.iter().take(WILD_PER_DEN) {
        let genome = wild_genome(&mut rng.0);
        let creature = Creature {
            name: species_name(&genome),
            genome,
        };
        let center = grid_to_world(x, y);
        commands.spawn((
            Sprite {
                color: creature_color(&creature.genome),
                custom_size: Some(Vec2::new(TILE_SIZE * 0.7, TILE_SIZE * 0.7)),
                ..default()
            },
            Transform::from_translation(center.extend(Z_CREATURE)),
            GridPosition::new(x, y),
            WildCreature { creature },
        ));
    }
}

/// Wild creatures don't follow the player out of the den.
pub fn despawn_on_map_change(
    mut commands: Commands,
    mut events: EventReader<MapTransitionEvent>,
    creatures: Query<Entity, With<WildCreature>>,
) {
    if events.read().next().is_none() {
        return;
    }
    events.clear();
    for entity in creatures.iter() {
        commands.entity(entity).despawn();
    }
}
