use crate::models::item::{Item, ItemEffect};
use crate::models::room::{Room, RoomKind};
use crate::models::types::Direction;
use rand::seq::IndexedRandom;
use std::collections::HashMap;

/// The room arena of one session. Built once at session creation and only
/// ever referenced, never copied; transporter rooms sample destinations
/// from it instead of holding private room lists.
#[derive(Debug, Clone)]
pub struct World {
    rooms: HashMap<String, Room>,
    start: String,
}

impl World {
    pub fn new(start: &str) -> Self {
        Self {
            rooms: HashMap::new(),
            start: start.to_string(),
        }
    }

    pub fn add_room(&mut self, room: Room) {
        self.rooms.insert(room.key().to_string(), room);
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn room(&self, key: &str) -> Option<&Room> {
        self.rooms.get(key)
    }

    pub fn room_mut(&mut self, key: &str) -> Option<&mut Room> {
        self.rooms.get_mut(key)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Resolves travel out of `from`. For plain and gated rooms this looks
    /// up the direction and then refuses if the destination is a gated room
    /// that is still barred (gates protect entry, never departure). For a
    /// transporter the direction is ignored entirely and a random room is
    /// drawn instead; every call redraws.
    pub fn exit_from(&self, from: &str, dir: &Direction) -> Option<String> {
        let room = self.rooms.get(from)?;
        if matches!(room.kind, RoomKind::Transporter) {
            return self.random_destination(Some(from));
        }
        let target = room.exit_key(dir)?;
        if self.rooms.get(target)?.entry_barred() {
            return None;
        }
        Some(target.to_string())
    }

    /// Raw existence check, ignoring gating. Lets callers tell "no passage"
    /// apart from "barred passage".
    pub fn has_exit(&self, from: &str, dir: &Direction) -> bool {
        self.rooms.get(from).is_some_and(|r| r.has_exit(dir))
    }

    /// Uniform draw from the whole arena, excluding `exclude` whenever more
    /// than one candidate exists. Independent per call; nothing is memoized.
    pub fn random_destination(&self, exclude: Option<&str>) -> Option<String> {
        let keys: Vec<&String> = if self.rooms.len() > 1 {
            self.rooms
                .keys()
                .filter(|k| Some(k.as_str()) != exclude)
                .collect()
        } else {
            self.rooms.keys().collect()
        };
        let mut rng = rand::rng();
        keys.choose(&mut rng).map(|k| k.to_string())
    }

    /// Finds the room currently holding a named item, if any.
    pub fn find_item_room(&self, name: &str) -> Option<&str> {
        self.rooms
            .values()
            .find(|r| r.item(name).is_some())
            .map(|r| r.key())
    }

    /// The campus world: six rooms around a university entrance, a gated
    /// admin office and a transporter room. The magic cookie lands in a
    /// random ordinary room each time the world is built.
    pub fn campus() -> Self {
        let outside = "outside the main entrance of the university";
        let theater = "in a lecture theater";
        let pub_ = "in the campus pub";
        let lab = "in a computing lab";
        let office = "in the computing admin office";
        let transporter = "in a mysterious transporter room";

        let mut world = Self::new(outside);

        let mut r = Room::new(outside);
        r.set_exit(Direction::East, theater);
        r.set_exit(Direction::South, lab);
        r.set_exit(Direction::West, pub_);
        r.set_exit(Direction::North, transporter);
        r.add_item(Item::with_effect("key", "a rusty old key", 0.1, ItemEffect::Key));
        r.add_item(Item::with_effect("map", "a campus map", 0.2, ItemEffect::Map));
        world.add_room(r);

        let mut r = Room::new(theater);
        r.set_exit(Direction::West, outside);
        r.add_item(Item::new("book", "a programming textbook", 1.5));
        world.add_room(r);

        let mut r = Room::new(pub_);
        r.set_exit(Direction::East, outside);
        r.add_item(Item::new("coin", "a golden coin", 0.05));
        r.add_item(Item::new("bottle", "an empty bottle", 0.3));
        world.add_room(r);

        let mut r = Room::new(lab);
        r.set_exit(Direction::North, outside);
        r.set_exit(Direction::East, office);
        r.add_item(Item::new("computer", "a laptop computer", 2.5));
        r.add_item(Item::new("cable", "a USB cable", 0.1));
        world.add_room(r);

        let mut r = Room::gated(office, "key");
        r.set_exit(Direction::West, lab);
        world.add_room(r);

        // The transporter has exit tokens so movement commands find a door,
        // but resolution ignores them and teleports instead.
        let mut r = Room::transporter(transporter);
        r.set_exit(Direction::North, outside);
        r.set_exit(Direction::South, outside);
        r.set_exit(Direction::East, outside);
        r.set_exit(Direction::West, outside);
        world.add_room(r);

        let cookie_rooms = [outside, theater, pub_, lab, office];
        let mut rng = rand::rng();
        let chosen = cookie_rooms.choose(&mut rng).copied().unwrap_or(outside);
        if let Some(room) = world.room_mut(chosen) {
            room.add_item(Item::new(
                "cookie",
                "a magic cookie that increases carrying capacity",
                0.1,
            ));
        }

        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTSIDE: &str = "outside the main entrance of the university";
    const OFFICE: &str = "in the computing admin office";
    const LAB: &str = "in a computing lab";
    const TRANSPORTER: &str = "in a mysterious transporter room";

    #[test]
    fn campus_has_six_rooms_and_a_cookie() {
        let world = World::campus();
        assert_eq!(world.rooms().count(), 6);
        assert_eq!(world.start(), OUTSIDE);
        assert!(world.find_item_room("cookie").is_some());
    }

    #[test]
    fn gated_room_blocks_entry_until_unlocked() {
        let mut world = World::campus();
        assert_eq!(world.exit_from(LAB, &Direction::East), None);
        assert!(world.has_exit(LAB, &Direction::East));

        world.room_mut(OFFICE).unwrap().unlock("key");
        assert_eq!(
            world.exit_from(LAB, &Direction::East),
            Some(OFFICE.to_string())
        );
    }

    #[test]
    fn gated_room_never_blocks_departure() {
        let world = World::campus();
        // The office is still locked, but leaving it works.
        assert_eq!(
            world.exit_from(OFFICE, &Direction::West),
            Some(LAB.to_string())
        );
    }

    #[test]
    fn transporter_ignores_direction_and_excludes_itself() {
        let world = World::campus();
        for _ in 0..50 {
            let dest = world
                .exit_from(TRANSPORTER, &Direction::Custom("sideways".into()))
                .unwrap();
            assert_ne!(dest, TRANSPORTER);
            assert!(world.room(&dest).is_some());
        }
    }

    #[test]
    fn random_destination_with_single_room_returns_it() {
        let mut world = World::new("somewhere");
        world.add_room(Room::new("somewhere"));
        assert_eq!(
            world.random_destination(Some("somewhere")),
            Some("somewhere".to_string())
        );
    }

    #[test]
    fn missing_exit_resolves_to_none() {
        let world = World::campus();
        assert_eq!(world.exit_from(OUTSIDE, &Direction::Up), None);
        assert!(!world.has_exit(OUTSIDE, &Direction::Up));
    }
}
