//! # Save Encoder
//!
//! Writes a dungeon and its player in the line-based save format.

use crate::config::{FIELD_DELIMITER, PLAYER_TAG, ROOM_TERMINATOR};
use crate::game::{ConcreteEntity, Dungeon, Entity, Mob, Player, RoomId};
use crate::utils::BoundsMapper;
use crate::{CrawlError, CrawlResult};
use log::debug;
use std::collections::HashMap;
use std::fmt::Write;

/// Encodes everything reachable from `start`, plus the player.
///
/// Rooms are written in the bounds mapper's discovery order, so the start
/// room is always room 0. The player marker is never written into a room.
///
/// # Examples
///
/// ```
/// use crawl::{encode, Dungeon, Player, Room};
///
/// let mut dungeon = Dungeon::new();
/// let start = dungeon.add_room(Room::new("Entrance").unwrap());
/// let player = Player::new("Adventurer", 4).unwrap();
///
/// let text = encode(&dungeon, start, &player).unwrap();
/// assert_eq!(text, "Player:Player:4:Adventurer\n\nEntrance\n---\n\n");
/// ```
pub fn encode(dungeon: &Dungeon, start: RoomId, player: &Player) -> CrawlResult<String> {
    if dungeon.room(start).is_none() {
        return Err(CrawlError::InvalidAttribute(format!(
            "start room {} is not in the dungeon",
            start
        )));
    }

    let order = BoundsMapper::new(dungeon, start).walk().room_order();
    let positions: HashMap<RoomId, usize> = order
        .iter()
        .enumerate()
        .map(|(index, room)| (*room, index))
        .collect();

    let d = FIELD_DELIMITER;
    let mut out = String::new();

    writeln!(
        out,
        "{PLAYER_TAG}{d}{}{d}{}{d}{}",
        player.short_name(),
        player.damage(),
        player.long_description()
    )
    .ok();
    for entity in player.inventory() {
        if let Some(record) = entity_record(entity) {
            out.push_str(&record);
            out.push('\n');
        }
    }
    out.push('\n');

    for id in &order {
        let Some(room) = dungeon.room(*id) else {
            continue;
        };
        out.push_str(room.description());
        out.push('\n');
        for entity in room.contents() {
            if let Some(record) = entity_record(entity) {
                out.push_str(&record);
                out.push('\n');
            }
        }
        out.push_str(ROOM_TERMINATOR);
        out.push('\n');
    }
    out.push('\n');

    let mut exit_count = 0;
    for (from, id) in order.iter().enumerate() {
        let Some(room) = dungeon.room(*id) else {
            continue;
        };
        for (direction, target) in room.exits() {
            if let Some(to) = positions.get(&target) {
                writeln!(out, "{} {} {}", from, direction, to).ok();
                exit_count += 1;
            }
        }
    }

    debug!(
        "Encoded {} rooms, {} exits, {} inventory entries",
        order.len(),
        exit_count,
        player.inventory().len()
    );
    Ok(out)
}

/// One `I|V|C` record, or None for the player marker.
pub fn entity_record(entity: &ConcreteEntity) -> Option<String> {
    let d = FIELD_DELIMITER;
    match entity {
        ConcreteEntity::Item(item) => Some(format!(
            "I{d}{}{d}{}",
            item.short_name(),
            item.long_description()
        )),
        ConcreteEntity::Valuable(valuable) => Some(format!(
            "V{d}{}{d}{}{d}{}",
            valuable.value(),
            valuable.short_name(),
            valuable.long_description()
        )),
        ConcreteEntity::Creature(creature) => Some(format!(
            "C{d}{}{d}{}{d}{}{d}{}",
            creature.short_name(),
            creature.damage(),
            u8::from(creature.is_alive()),
            creature.long_description()
        )),
        ConcreteEntity::Player => None,
    }
}
