//! # Save Decoder
//!
//! Reads the line-based save format back into a [`Dungeon`] and [`Player`].
//!
//! Decoding runs in two passes. The first reads the player header, the
//! inventory and every room block, building rooms with no exits. The second
//! reads the exit records and links rooms by their position in the first
//! pass, so any number of exits naming the same room share one room.

use crate::config::{FIELD_DELIMITER, PLAYER_NAME, PLAYER_TAG, ROOM_TERMINATOR};
use crate::game::{ConcreteEntity, Creature, Direction, Dungeon, Item, Player, Room, RoomId, Valuable};
use crate::{CrawlError, CrawlResult};
use log::debug;

/// A decoded save: the player, the dungeon and the room the game starts in.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveGame {
    pub player: Player,
    pub dungeon: Dungeon,
    pub start: RoomId,
}

/// Decodes a complete save document.
///
/// Any parse failure yields [`CrawlError::MalformedSave`] carrying the
/// 1-based line number; no partial state is returned.
///
/// # Examples
///
/// ```
/// use crawl::{decode, Entity};
///
/// let save = decode("Player:Player:4:Adventurer\n\nHall\n---\nCrypt\n---\n\n0 East 1\n1 West 0\n").unwrap();
/// assert_eq!(save.dungeon.len(), 2);
/// assert_eq!(save.dungeon.room(save.start).unwrap().description(), "Hall");
/// assert_eq!(save.player.long_description(), "Adventurer");
/// ```
pub fn decode(text: &str) -> CrawlResult<SaveGame> {
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));
    let eof = text.lines().count() + 1;

    // Pass 1: header, inventory, room blocks.
    let mut player = parse_header(&mut lines)?;
    for entity in parse_inventory(&mut lines, eof)? {
        player.add(entity);
    }
    let mut dungeon = parse_rooms(&mut lines, eof)?;

    // Pass 2: exits, by index into the rooms built above.
    let exits = parse_exits(&mut lines, &mut dungeon)?;

    debug!(
        "Decoded {} rooms, {} exits, {} inventory entries",
        dungeon.len(),
        exits,
        player.inventory().len()
    );
    Ok(SaveGame {
        player,
        dungeon,
        start: RoomId(0),
    })
}

fn parse_header<'a, I>(lines: &mut I) -> CrawlResult<Player>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let (line_no, line) = lines
        .next()
        .ok_or_else(|| CrawlError::malformed(1, "empty save file"))?;
    let fields: Vec<&str> = line.splitn(4, FIELD_DELIMITER).collect();
    let [tag, short_name, damage, description] = fields[..] else {
        return Err(CrawlError::malformed(line_no, "player header needs 4 fields"));
    };
    if tag != PLAYER_TAG {
        return Err(CrawlError::malformed(
            line_no,
            format!("expected '{}' header, found '{}'", PLAYER_TAG, tag),
        ));
    }
    if short_name != PLAYER_NAME {
        return Err(CrawlError::malformed(
            line_no,
            format!("player must be named '{}', found '{}'", PLAYER_NAME, short_name),
        ));
    }
    let damage = parse_damage(damage).map_err(|reason| CrawlError::malformed(line_no, reason))?;
    Player::new(description, damage).map_err(|e| CrawlError::malformed(line_no, e.to_string()))
}

fn parse_inventory<'a, I>(lines: &mut I, eof: usize) -> CrawlResult<Vec<ConcreteEntity>>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut inventory = Vec::new();
    loop {
        match lines.next() {
            None => return Err(CrawlError::malformed(eof, "missing room section")),
            Some((_, "")) => return Ok(inventory),
            Some((line_no, line)) => inventory.push(parse_entity(line_no, line)?),
        }
    }
}

fn parse_rooms<'a, I>(lines: &mut I, eof: usize) -> CrawlResult<Dungeon>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut dungeon = Dungeon::new();
    loop {
        let (line_no, description) = match lines.next() {
            Some((line_no, "")) if dungeon.is_empty() => {
                return Err(CrawlError::malformed(line_no, "save defines no rooms"));
            }
            None if dungeon.is_empty() => {
                return Err(CrawlError::malformed(eof, "save defines no rooms"));
            }
            // The exit section may be missing entirely after the last room.
            Some((_, "")) | None => return Ok(dungeon),
            Some(entry) => entry,
        };

        let mut room = Room::new(description)
            .map_err(|e| CrawlError::malformed(line_no, e.to_string()))?;
        loop {
            match lines.next() {
                None => {
                    return Err(CrawlError::malformed(
                        line_no,
                        format!("room '{}' is missing its '{}' line", description, ROOM_TERMINATOR),
                    ));
                }
                Some((_, line)) if line == ROOM_TERMINATOR => break,
                Some((entity_line, line)) => room.enter(parse_entity(entity_line, line)?),
            }
        }
        dungeon.add_room(room);
    }
}

fn parse_exits<'a, I>(lines: &mut I, dungeon: &mut Dungeon) -> CrawlResult<usize>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut count = 0;
    while let Some((line_no, line)) = lines.next() {
        if line.is_empty() {
            // Only trailing blank lines may follow.
            if let Some((stray, _)) = lines.find(|(_, rest)| !rest.is_empty()) {
                return Err(CrawlError::malformed(stray, "unexpected record after exit section"));
            }
            break;
        }

        let fields: Vec<&str> = line.split(' ').collect();
        let [from, direction, to] = fields[..] else {
            return Err(CrawlError::malformed(
                line_no,
                "exit record must read '<from> <direction> <to>'",
            ));
        };
        let from = parse_room_index(from, dungeon).map_err(|r| CrawlError::malformed(line_no, r))?;
        let to = parse_room_index(to, dungeon).map_err(|r| CrawlError::malformed(line_no, r))?;
        let direction: Direction = direction
            .parse()
            .map_err(|e: crate::game::ParseDirectionError| CrawlError::malformed(line_no, e.to_string()))?;

        let room = dungeon
            .room_mut(from)
            .ok_or_else(|| CrawlError::malformed(line_no, format!("no room {}", from)))?;
        if room.exit(direction).is_some() {
            return Err(CrawlError::malformed(
                line_no,
                format!("room {} already has a {} exit", from, direction),
            ));
        }
        room.set_exit(direction, to);
        count += 1;
    }
    Ok(count)
}

/// Parses one `I|V|C` entity record.
pub fn parse_entity(line_no: usize, line: &str) -> CrawlResult<ConcreteEntity> {
    let malformed = |reason: String| CrawlError::malformed(line_no, reason);
    let attribute = |e: CrawlError| CrawlError::malformed(line_no, e.to_string());

    let (tag, rest) = line
        .split_once(FIELD_DELIMITER)
        .ok_or_else(|| malformed(format!("'{}' is not an entity record", line)))?;

    match tag {
        "I" => {
            let (short_name, long) = rest
                .split_once(FIELD_DELIMITER)
                .ok_or_else(|| malformed("item record needs a short name and description".into()))?;
            Ok(Item::new(short_name, long).map_err(attribute)?.into())
        }
        "V" => {
            let fields: Vec<&str> = rest.splitn(3, FIELD_DELIMITER).collect();
            let [value, short_name, long] = fields[..] else {
                return Err(malformed("valuable record needs value, short name and description".into()));
            };
            let value = parse_value(value).map_err(malformed)?;
            Ok(Valuable::new(short_name, long, value).map_err(attribute)?.into())
        }
        "C" => {
            let fields: Vec<&str> = rest.splitn(4, FIELD_DELIMITER).collect();
            let [short_name, damage, alive, long] = fields[..] else {
                return Err(malformed(
                    "creature record needs short name, damage, alive flag and description".into(),
                ));
            };
            let damage = parse_damage(damage).map_err(malformed)?;
            let alive = match alive {
                "1" => true,
                "0" => false,
                other => return Err(malformed(format!("alive flag must be 0 or 1, found '{}'", other))),
            };
            Ok(Creature::with_liveness(short_name, long, damage, alive)
                .map_err(attribute)?
                .into())
        }
        other => Err(malformed(format!("unknown entity tag '{}'", other))),
    }
}

fn parse_digits<T: std::str::FromStr>(field: &str, what: &str) -> Result<T, String> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{} must be a decimal integer, found '{}'", what, field));
    }
    field
        .parse()
        .map_err(|_| format!("{} '{}' is out of range", what, field))
}

fn parse_damage(field: &str) -> Result<u32, String> {
    let damage: u32 = parse_digits(field, "damage")?;
    if damage == 0 {
        return Err("damage must be positive".to_string());
    }
    Ok(damage)
}

fn parse_value(field: &str) -> Result<f64, String> {
    let digits = field.bytes().filter(u8::is_ascii_digit).count();
    let dots = field.bytes().filter(|b| *b == b'.').count();
    if digits == 0 || dots > 1 || digits + dots != field.len() {
        return Err(format!("value must be a non-negative decimal, found '{}'", field));
    }
    field
        .parse()
        .map_err(|_| format!("value '{}' is not a number", field))
}

fn parse_room_index(field: &str, dungeon: &Dungeon) -> Result<RoomId, String> {
    let index: usize = parse_digits(field, "room index")?;
    if index >= dungeon.len() {
        return Err(format!(
            "room index {} is out of range (save has {} rooms)",
            index,
            dungeon.len()
        ));
    }
    Ok(RoomId(index))
}
