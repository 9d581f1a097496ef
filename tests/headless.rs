//! Headless integration tests: run the real plugins on MinimalPlugins and
//! drive the game through events and the PlayerInput resource.
//!
//! Pixel interpolation depends on wall-clock delta time, so these tests
//! assert on tile-level state (active map, grid positions, party) rather
//! than on in-flight pixel positions.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use mossvale::creatures::genetics::{GENE_POOL, GENOME_LEN};
use mossvale::creatures::spawning::{WildCreature, WILD_PER_DEN};
use mossvale::player::MovementPlanner;
use mossvale::shared::*;
use mossvale::world::{ActiveMap, MapKind};
use mossvale::{CreaturesPlugin, DenPlugin, PlayerPlugin, SharedPlugin, WorldPlugin};

fn build_test_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    // Inserted before SharedPlugin so init_resource keeps the seeded rng.
    app.insert_resource(DenRng::seeded(seed));
    app.add_plugins((
        SharedPlugin,
        WorldPlugin,
        DenPlugin,
        PlayerPlugin,
        CreaturesPlugin,
    ));
    // First update flips Loading -> Playing; second runs OnEnter(Playing)
    // and delivers the initial relocate.
    for _ in 0..3 {
        app.update();
    }
    app
}

fn player_pos(app: &mut App) -> (i32, i32) {
    let pos = app
        .world_mut()
        .query_filtered::<&GridPosition, With<Player>>()
        .single(app.world());
    (pos.x, pos.y)
}

fn active_map_id(app: &App) -> Option<MapId> {
    app.world().resource::<ActiveMap>().id()
}

fn go_to(app: &mut App, to_map: MapId, to_x: i32, to_y: i32) {
    app.world_mut().send_event(MapTransitionEvent { to_map, to_x, to_y });
    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn game_starts_in_town_with_the_player_on_the_plaza() {
    let mut app = build_test_app(1);
    assert_eq!(active_map_id(&app), Some(MapId::Town));
    assert_eq!(player_pos(&mut app), (12, 11));
    assert!(app.world().resource::<ActiveMap>().is_walkable(12, 11));
}

#[test]
fn transition_moves_player_and_swaps_the_map() {
    let mut app = build_test_app(2);
    go_to(&mut app, MapId::Meadow, 1, 7);

    assert_eq!(active_map_id(&app), Some(MapId::Meadow));
    assert_eq!(
        app.world().resource::<PlayerState>().current_map,
        MapId::Meadow
    );
    assert_eq!(player_pos(&mut app), (1, 7));
}

#[test]
fn transition_to_the_current_map_is_ignored() {
    let mut app = build_test_app(3);
    go_to(&mut app, MapId::Town, 0, 0);
    // Still on the town, still at the spawn tile.
    assert_eq!(active_map_id(&app), Some(MapId::Town));
    assert_eq!(player_pos(&mut app), (12, 11));
}

#[test]
fn entering_the_den_lands_on_its_generated_start() {
    let mut app = build_test_app(4);
    go_to(&mut app, MapId::Den, 0, 0);

    assert_eq!(active_map_id(&app), Some(MapId::Den));
    let start = app
        .world()
        .resource::<ActiveMap>()
        .den_start()
        .expect("den has a start tile");
    assert_eq!(player_pos(&mut app), start);

    let map = app.world().resource::<ActiveMap>();
    assert!(map.is_walkable(start.0, start.1));
    assert!(map.warp().is_some());
}

#[test]
fn entering_the_den_spawns_wild_creatures() {
    let mut app = build_test_app(5);
    go_to(&mut app, MapId::Den, 0, 0);

    let count = app
        .world_mut()
        .query::<&WildCreature>()
        .iter(app.world())
        .count();
    assert_eq!(count, WILD_PER_DEN);
}

#[test]
fn warp_rebuild_replaces_the_den_and_relocates_the_player() {
    let mut app = build_test_app(6);
    go_to(&mut app, MapId::Den, 0, 0);

    let before = match &app.world().resource::<ActiveMap>().kind {
        MapKind::Procedural { den } => (den.blueprint.clone(), den.start, den.warp),
        other => panic!("expected a den, got {other:?}"),
    };

    app.world_mut().send_event(DenRebuildEvent);
    for _ in 0..3 {
        app.update();
    }

    assert_eq!(active_map_id(&app), Some(MapId::Den));
    let map = app.world().resource::<ActiveMap>();
    let MapKind::Procedural { den } = &map.kind else {
        panic!("den unloaded by rebuild");
    };
    let after = (den.blueprint.clone(), den.start, den.warp);
    assert_ne!(before, after, "rebuild produced an identical den");

    let start = map.den_start().unwrap();
    assert_eq!(player_pos(&mut app), start);
}

#[test]
fn stepping_onto_a_wild_creature_tames_it() {
    let mut app = build_test_app(7);
    go_to(&mut app, MapId::Den, 0, 0);

    let (target, expected) = {
        let mut query = app.world_mut().query::<(&GridPosition, &WildCreature)>();
        let (pos, wild) = query.iter(app.world()).next().expect("wild creature");
        ((pos.x, pos.y), wild.creature.clone())
    };

    let mut players = app
        .world_mut()
        .query_filtered::<&mut GridPosition, With<Player>>();
    let mut pos = players.single_mut(app.world_mut());
    pos.x = target.0;
    pos.y = target.1;
    app.update();

    let party = app.world().resource::<Party>();
    assert_eq!(party.members, vec![expected]);

    let remaining = app
        .world_mut()
        .query::<&WildCreature>()
        .iter(app.world())
        .count();
    assert_eq!(remaining, WILD_PER_DEN - 1);
}

#[test]
fn interacting_on_the_den_start_returns_to_the_meadow() {
    let mut app = build_test_app(8);
    go_to(&mut app, MapId::Den, 0, 0);

    app.world_mut().resource_mut::<PlayerInput>().interact = true;
    for _ in 0..3 {
        app.update();
    }
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();

    assert_eq!(active_map_id(&app), Some(MapId::Meadow));
    assert_eq!(player_pos(&mut app), (18, 5));
}

fn set_player_pos(app: &mut App, x: i32, y: i32) {
    let mut players = app
        .world_mut()
        .query_filtered::<&mut GridPosition, With<Player>>();
    let mut pos = players.single_mut(app.world_mut());
    pos.x = x;
    pos.y = y;
}

#[test]
fn breeding_on_the_pen_adds_an_offspring_to_the_party() {
    let mut app = build_test_app(10);
    app.world_mut().resource_mut::<Party>().members = vec![
        Creature {
            name: "Bramlet".to_string(),
            genome: "bbbbbb".to_string(),
        },
        Creature {
            name: "Zephmote".to_string(),
            genome: "zzzzzz".to_string(),
        },
    ];

    go_to(&mut app, MapId::BreedersHut, 5, 1);
    set_player_pos(&mut app, 4, 6); // on the pen
    app.world_mut().resource_mut::<PlayerInput>().interact = true;
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();

    let party = app.world().resource::<Party>();
    assert_eq!(party.members.len(), 3);
    let child = party.members.last().unwrap();
    assert_eq!(child.genome.len(), GENOME_LEN);
    assert!(
        child.genome.bytes().all(|g| GENE_POOL.contains(&g)),
        "offspring genome '{}' has genes outside the pool",
        child.genome
    );
    assert!(!child.name.is_empty());
}

#[test]
fn breeding_requires_standing_on_the_pen() {
    let mut app = build_test_app(11);
    app.world_mut().resource_mut::<Party>().members = vec![
        Creature {
            name: "Bramlet".to_string(),
            genome: "bbbbbb".to_string(),
        },
        Creature {
            name: "Zephmote".to_string(),
            genome: "zzzzzz".to_string(),
        },
    ];

    go_to(&mut app, MapId::BreedersHut, 5, 1);
    // Interacting on the hut floor away from the pen does nothing.
    set_player_pos(&mut app, 5, 3);
    app.world_mut().resource_mut::<PlayerInput>().interact = true;
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
    assert_eq!(app.world().resource::<Party>().members.len(), 2);
}

#[test]
fn breeding_outside_the_hut_does_nothing() {
    let mut app = build_test_app(12);
    app.world_mut().resource_mut::<Party>().members = vec![
        Creature {
            name: "Bramlet".to_string(),
            genome: "bbbbbb".to_string(),
        },
        Creature {
            name: "Zephmote".to_string(),
            genome: "zzzzzz".to_string(),
        },
    ];

    // Same tile coordinates as the pen, but on the town map.
    set_player_pos(&mut app, 4, 6);
    app.world_mut().resource_mut::<PlayerInput>().interact = true;
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
    assert_eq!(app.world().resource::<Party>().members.len(), 2);
}

#[test]
fn breeding_with_fewer_than_two_creatures_is_refused() {
    let mut app = build_test_app(13);
    app.world_mut().resource_mut::<Party>().members = vec![Creature {
        name: "Bramlet".to_string(),
        genome: "bbbbbb".to_string(),
    }];

    go_to(&mut app, MapId::BreedersHut, 5, 1);
    set_player_pos(&mut app, 4, 6);
    app.world_mut().resource_mut::<PlayerInput>().interact = true;
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();

    assert_eq!(app.world().resource::<Party>().members.len(), 1);
}

#[test]
fn clicking_water_plans_nothing_but_clicking_ground_does() {
    let mut app = build_test_app(9);

    // Fountain tile is water.
    app.world_mut().resource_mut::<PlayerInput>().click_tile = Some((12, 9));
    app.update();
    {
        let planner = app
            .world_mut()
            .query_filtered::<&MovementPlanner, With<Player>>()
            .single(app.world());
        assert!(planner.is_idle());
        assert!(!planner.walking);
    }

    app.world_mut().resource_mut::<PlayerInput>().click_tile = Some((2, 10));
    app.update();
    let planner = app
        .world_mut()
        .query_filtered::<&MovementPlanner, With<Player>>()
        .single(app.world());
    assert!(planner.walking);
}
