//! Integration tests for save files on disk and the command-line shell.

use crawl::{
    load_map, messages, ActionType, CrawlError, CrawlResult, Creature, Direction, Dungeon, Entity,
    GameState, Item, Player, Room, RoomId, Valuable,
};
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const AUTHORED: &str = "Player:Player:5:A weary adventurer\n\
    V:2:ring:a tarnished ring\n\
    \n\
    Gatehouse\n\
    I:lantern:a rusty lantern\n\
    ---\n\
    Courtyard\n\
    C:rat:2:1:a scruffy rat\n\
    ---\n\
    Chapel\n\
    V:10:chalice:a silver chalice\n\
    ---\n\
    \n\
    0 North 1\n\
    1 East 2\n\
    1 South 0\n\
    2 West 1\n";

fn write_map(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("write map");
    path
}

#[test]
fn test_play_and_save_round_trip() -> CrawlResult<()> {
    let dir = TempDir::new()?;
    let path = write_map(&dir, "castle.map", AUTHORED);

    let mut state = GameState::new(load_map(&path)?)?;
    state.take("lantern");
    state.move_player(Direction::North);
    state.fight("rat");
    state.move_player(Direction::East);
    state.take("chalice");

    let saved = dir.path().join("saved.map");
    let events = ActionType::Save(saved.clone()).execute(&mut state);
    assert_eq!(messages(&events), vec!["Saved"]);

    let reloaded = load_map(&saved)?;
    let names: Vec<&str> = reloaded
        .player
        .inventory()
        .iter()
        .map(|entity| entity.short_name())
        .collect();
    assert_eq!(names, vec!["ring", "lantern", "chalice"]);
    assert_eq!(reloaded.player.worth(), 12.0);

    let courtyard = reloaded.dungeon.room(RoomId(1)).expect("courtyard");
    assert_eq!(courtyard.description(), "Courtyard");
    assert_eq!(courtyard.contents()[0].is_alive(), Some(false));
    assert!(reloaded
        .dungeon
        .rooms()
        .all(|(_, room)| room.contents().iter().all(|e| !e.is_player())));
    Ok(())
}

#[test]
fn test_saved_text_is_canonical() -> CrawlResult<()> {
    let dir = TempDir::new()?;
    let path = write_map(&dir, "castle.map", AUTHORED);
    let state = GameState::new(load_map(&path)?)?;

    let copy = dir.path().join("copy.map");
    assert_eq!(messages(&state.save(&copy)), vec!["Saved"]);
    assert_eq!(fs::read_to_string(&copy)?, AUTHORED);
    Ok(())
}

#[test]
fn test_shared_room_identity_survives_reload() -> CrawlResult<()> {
    let mut dungeon = Dungeon::new();
    let hub = dungeon.add_room(Room::new("Hub")?);
    let north = dungeon.add_room(Room::new("North wing")?);
    let east = dungeon.add_room(Room::new("East wing")?);
    dungeon.connect_both(hub, Direction::North, north)?;
    dungeon.connect_both(hub, Direction::East, east)?;
    dungeon.connect(north, Direction::East, east)?;
    dungeon.connect(east, Direction::North, north)?;
    let state = GameState::from_parts(dungeon, Player::new("Adventurer", 3)?, hub)?;

    let dir = TempDir::new()?;
    let path = dir.path().join("wings.map");
    state.save(&path);
    let save = load_map(&path)?;

    let hub = save.dungeon.room(save.start).expect("hub");
    let north = hub.exit(Direction::North).expect("north exit");
    let east = hub.exit(Direction::East).expect("east exit");
    let east_room = save.dungeon.room(east).expect("east room");
    let north_room = save.dungeon.room(north).expect("north room");
    assert_eq!(east_room.exit(Direction::North), Some(north));
    assert_eq!(north_room.exit(Direction::East), Some(east));
    assert_eq!(north_room.exit(Direction::South), Some(save.start));
    Ok(())
}

#[test]
fn test_failed_save_leaves_nothing_behind() -> CrawlResult<()> {
    let dir = TempDir::new()?;
    let path = write_map(&dir, "castle.map", AUTHORED);
    let state = GameState::new(load_map(&path)?)?;

    let target = dir.path().join("missing").join("out.map");
    assert_eq!(messages(&state.save(&target)), vec!["Unable to save"]);
    assert!(!target.exists());
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_load_errors() {
    let dir = TempDir::new().expect("temp dir");
    let missing = load_map(dir.path().join("nope.map"));
    assert!(matches!(missing, Err(CrawlError::Io(_))));

    let bad = write_map(&dir, "bad.map", "Player:Player:5:x\n\nHall\n---\n\n0 Up 0\n");
    assert!(matches!(
        load_map(&bad),
        Err(CrawlError::MalformedSave { line: 6, .. })
    ));
}

#[test]
fn test_inventory_order_survives_save() -> CrawlResult<()> {
    let mut dungeon = Dungeon::new();
    let cell = dungeon.add_room(Room::new("Cell")?);
    let mut player = Player::new("Adventurer", 3)?;
    player.add(Item::new("rope", "a rope")?.into());
    player.add(Valuable::new("gem", "a gem", 0.5)?.into());
    player.add(Creature::with_liveness("bat", "a dead bat", 1, false)?.into());
    player.add(Item::new("rope", "a second rope")?.into());
    let state = GameState::from_parts(dungeon, player.clone(), cell)?;

    let dir = TempDir::new()?;
    let path = dir.path().join("pack.map");
    state.save(&path);
    assert_eq!(load_map(&path)?.player, player);
    Ok(())
}

fn crawl_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_crawl"))
}

#[test]
fn test_cli_usage_exit_code() {
    let output = crawl_binary().output().expect("run crawl");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Usage:"));

    let output = crawl_binary().args(["a.map", "b.map"]).output().expect("run crawl");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_load_failure_exit_code() {
    let dir = TempDir::new().expect("temp dir");
    let bad = write_map(&dir, "bad.map", "not a save\n");
    let output = crawl_binary().arg(&bad).output().expect("run crawl");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unable to load file"));
}

#[test]
fn test_cli_scripted_session() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_map(&dir, "castle.map", AUTHORED);
    let saved = dir.path().join("after.map");

    let mut child = crawl_binary()
        .arg(&path)
        .arg("--no-map")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn crawl");
    let script = format!("west\nnorth\nfight\nrat\ntake\n\nsave {}\nquit\n", saved.display());
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(script.as_bytes())
        .expect("write script");
    let output = child.wait_with_output().expect("wait for crawl");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.starts_with("You find yourself in Gatehouse"));
    assert!(stdout.contains("No door that way"));
    assert!(stdout.contains("You enter"));
    assert!(stdout.contains("You won"));
    assert!(stdout.contains("Saved"));
    assert!(saved.exists());
}

#[test]
fn test_cli_map_json() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_map(&dir, "castle.map", AUTHORED);
    let output = crawl_binary().arg(&path).arg("--map-json").output().expect("run crawl");
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["rooms"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["bounds"]["y_min"], -1);
    assert_eq!(value["bounds"]["x_max"], 1);
}
