use crate::models::player::Player;
use crate::models::world::World;
use serde::Serialize;

/// Rooms a run must have visited to count as complete.
pub const ALL_ROOMS: &[&str] = &[
    "outside the main entrance of the university",
    "in a lecture theater",
    "in the campus pub",
    "in a computing lab",
    "in the computing admin office",
    "in a mysterious transporter room",
];

/// Items a run must have collected (at some point; dropping doesn't undo it).
pub const ALL_ITEMS: &[&str] = &[
    "key", "map", "book", "coin", "bottle", "computer", "cable", "cookie",
];

/// Snapshot of how far a player has come. Serializable so structured
/// clients can render it without parsing narrative text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: bool,
    pub at_start_room: bool,
    pub rooms_explored: usize,
    pub total_rooms: usize,
    pub items_collected: usize,
    pub total_items: usize,
    pub cookie_eaten: bool,
}

/// Pure evaluation of the win condition; never mutates anything and can be
/// called after every command.
pub fn evaluate(player: &Player, world: &World) -> Progress {
    let rooms_explored = ALL_ROOMS
        .iter()
        .filter(|r| player.visited_rooms().contains(**r))
        .count();
    let items_collected = ALL_ITEMS
        .iter()
        .filter(|i| player.collected_items().contains(**i))
        .count();
    let at_start_room = player.current_room() == world.start();
    let cookie_eaten = player.cookie_eaten();

    Progress {
        completed: at_start_room
            && rooms_explored >= ALL_ROOMS.len()
            && items_collected >= ALL_ITEMS.len()
            && cookie_eaten,
        at_start_room,
        rooms_explored,
        total_rooms: ALL_ROOMS.len(),
        items_collected,
        total_items: ALL_ITEMS.len(),
        cookie_eaten,
    }
}

impl Progress {
    pub fn report(&self) -> String {
        let tick = |done: bool| if done { " [done]" } else { "" };
        let mut out = String::from("========== Progress ==========\n");
        out.push_str(&format!(
            "Rooms explored: {}/{}{}\n",
            self.rooms_explored,
            self.total_rooms,
            tick(self.rooms_explored >= self.total_rooms)
        ));
        out.push_str(&format!(
            "Items collected: {}/{}{}\n",
            self.items_collected,
            self.total_items,
            tick(self.items_collected >= self.total_items)
        ));
        out.push_str(&format!(
            "Magic cookie: {}\n",
            if self.cookie_eaten { "eaten" } else { "not eaten" }
        ));
        out.push_str(&format!(
            "Position: {}\n",
            if self.at_start_room {
                "back at the entrance"
            } else {
                "out exploring"
            }
        ));
        out.push_str("==============================\n");
        if self.completed {
            out.push_str("Congratulations! You have finished the game.");
        } else {
            out.push_str("Keep going; finish every task to win.");
        }
        out
    }
}
