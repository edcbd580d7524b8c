use crate::models::item::Item;
use std::collections::{BTreeSet, HashMap};

pub const STARTING_MAX_WEIGHT: f64 = 10.0;

/// One player's mutable state: position, carried items, the monotonic
/// exploration/collection sets and the one-shot cookie flag.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    current_room: String,
    inventory: HashMap<String, Item>,
    max_weight: f64,
    visited_rooms: BTreeSet<String>,
    collected_items: BTreeSet<String>,
    cookie_eaten: bool,
}

impl Player {
    pub fn new(name: &str, max_weight: f64, start_room: &str) -> Self {
        let mut visited_rooms = BTreeSet::new();
        visited_rooms.insert(start_room.to_string());
        Self {
            name: name.to_string(),
            current_room: start_room.to_string(),
            inventory: HashMap::new(),
            max_weight,
            visited_rooms,
            collected_items: BTreeSet::new(),
            cookie_eaten: false,
        }
    }

    pub fn current_room(&self) -> &str {
        &self.current_room
    }

    /// Unconditional relocation. Gating is the command engine's business;
    /// this only updates the position and the visited set.
    pub fn move_to(&mut self, room_key: &str) {
        self.current_room = room_key.to_string();
        self.visited_rooms.insert(room_key.to_string());
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn set_max_weight(&mut self, max_weight: f64) {
        self.max_weight = max_weight;
    }

    pub fn raise_max_weight(&mut self, amount: f64) {
        self.max_weight += amount;
    }

    pub fn total_weight(&self) -> f64 {
        self.inventory.values().map(|i| i.weight).sum()
    }

    pub fn can_carry(&self, item: &Item) -> bool {
        self.total_weight() + item.weight <= self.max_weight
    }

    /// Picks an item up. Refuses without mutation when it would break the
    /// weight ceiling; otherwise the name also joins the (never shrinking)
    /// collected set.
    pub fn take(&mut self, item: Item) -> bool {
        if !self.can_carry(&item) {
            return false;
        }
        let key = item.key();
        self.collected_items.insert(key.clone());
        self.inventory.insert(key, item);
        true
    }

    /// Removes and returns a carried item. Collected-item history is
    /// untouched; dropping never un-collects.
    pub fn drop_item(&mut self, name: &str) -> Option<Item> {
        self.inventory.remove(&name.to_ascii_lowercase())
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.inventory.get(&name.to_ascii_lowercase())
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.contains_key(&name.to_ascii_lowercase())
    }

    pub fn inventory(&self) -> impl Iterator<Item = &Item> {
        self.inventory.values()
    }

    pub fn inventory_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inventory.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn visited_rooms(&self) -> &BTreeSet<String> {
        &self.visited_rooms
    }

    pub fn set_visited_rooms(&mut self, rooms: BTreeSet<String>) {
        self.visited_rooms = rooms;
        // Position and visited set must never disagree.
        self.visited_rooms.insert(self.current_room.clone());
    }

    pub fn collected_items(&self) -> &BTreeSet<String> {
        &self.collected_items
    }

    pub fn set_collected_items(&mut self, items: BTreeSet<String>) {
        self.collected_items = items;
        for name in self.inventory.keys() {
            self.collected_items.insert(name.clone());
        }
    }

    pub fn cookie_eaten(&self) -> bool {
        self.cookie_eaten
    }

    pub fn set_cookie_eaten(&mut self, eaten: bool) {
        self.cookie_eaten = eaten;
    }

    pub fn inventory_string(&self) -> String {
        if self.inventory.is_empty() {
            return "You are not carrying anything.".to_string();
        }
        let mut items: Vec<&Item> = self.inventory.values().collect();
        items.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        let mut out = String::from("You are carrying:");
        for item in items {
            out.push_str(&format!("\n  {item}"));
        }
        out.push_str(&format!(
            "\nTotal weight: {:.2}kg / {:.2}kg",
            self.total_weight(),
            self.max_weight
        ));
        out
    }
}
