//! Creatures domain plugin: wild spawns in the den, taming on contact, and
//! breeding at the hut.

use bevy::prelude::*;

use crate::shared::*;

pub mod genetics;
pub mod spawning;

use genetics::{breed, species_name};
use spawning::WildCreature;

pub struct CreaturesPlugin;

impl Plugin for CreaturesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Party>().add_systems(
            Update,
            (
                spawning::spawn_wild_creatures,
                spawning::despawn_on_map_change,
                tame_on_contact,
                breed_at_hut,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Stepping onto a wild creature's tile tames it into the party.
fn tame_on_contact(
    mut commands: Commands,
    player_query: Query<&GridPosition, With<Player>>,
    creature_query: Query<(Entity, &GridPosition, &WildCreature), Without<Player>>,
    mut party: ResMut<Party>,
    mut tamed: EventWriter<CreatureTamedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let Ok(player_pos) = player_query.get_single() else {
        return;
    };

    for (entity, pos, wild) in creature_query.iter() {
        if pos != player_pos {
            continue;
        }
        commands.entity(entity).despawn();
        party.members.push(wild.creature.clone());
        tamed.send(CreatureTamedEvent {
            creature: wild.creature.clone(),
        });
        toasts.send(ToastEvent {
            message: format!("{} joins you!", wild.creature.name),
            duration_secs: 2.0,
        });
    }
}

/// Interacting on the breeding pen with at least two party members breeds
/// the two most recently tamed into a new offspring.
fn breed_at_hut(
    input: Res<PlayerInput>,
    player_state: Res<PlayerState>,
    player_query: Query<&GridPosition, With<Player>>,
    mut party: ResMut<Party>,
    mut rng: ResMut<DenRng>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if !input.interact || player_state.current_map != MapId::BreedersHut {
        return;
    }
    let Ok(pos) = player_query.get_single() else {
        return;
    };
    // The pen occupies the dirt strip along the back wall.
    if !(2..9).contains(&pos.x) || !(6..8).contains(&pos.y) {
        return;
    }

    if party.members.len() < 2 {
        toasts.send(ToastEvent {
            message: "You need two creatures to breed.".to_string(),
            duration_secs: 2.0,
        });
        return;
    }

    let a = &party.members[party.members.len() - 1];
    let b = &party.members[party.members.len() - 2];
    let genome = breed(&a.genome, &b.genome, &mut rng.0);
    let child = Creature {
        name: species_name(&genome),
        genome,
    };
    toasts.send(ToastEvent {
        message: format!("An egg hatches: {}!", child.name),
        duration_secs: 3.0,
    });
    party.members.push(child);
}
