use crate::commands::CommandOutput;
use crate::models::item::Item;
use crate::state::session::GameSession;
use crate::{failure, success};

pub fn items(sess: &mut GameSession) -> CommandOutput {
    let Some(room) = sess.world.room(sess.player.current_room()) else {
        return failure!("You are nowhere; there is nothing here.");
    };

    let mut out = String::from("Items in this room:");
    let mut in_room: Vec<&Item> = room.items().collect();
    if in_room.is_empty() {
        out.push_str("\n  (none)");
    } else {
        in_room.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        for item in in_room {
            out.push_str(&format!("\n  {item}"));
        }
    }
    out.push_str(&format!(
        "\nTotal weight in room: {:.2}kg\n\n",
        room.total_weight()
    ));
    out.push_str(&sess.player.inventory_string());
    success!(out)
}
