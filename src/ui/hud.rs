//! Always-on HUD: current area name and party size.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct AreaNameText;

#[derive(Component)]
pub struct PartyText;

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            padding: UiRect::all(Val::Px(6.0)),
            ..default()
        })
        .insert(BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)))
        .with_children(|parent| {
            parent.spawn((
                AreaNameText,
                Text::new(MapId::Town.display_name()),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                PartyText,
                Text::new("Party: 0"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.7)),
            ));
        });
}

pub fn update_area_name(
    player_state: Res<PlayerState>,
    mut query: Query<&mut Text, With<AreaNameText>>,
) {
    if !player_state.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        **text = player_state.current_map.display_name().to_string();
    }
}

pub fn update_party_count(party: Res<Party>, mut query: Query<&mut Text, With<PartyText>>) {
    if !party.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        **text = format!("Party: {}", party.members.len());
    }
}
