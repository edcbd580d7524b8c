//! End-to-end command flow over the in-memory store: guest play, accounts,
//! save/load, session replacement and record teardown.

use std::sync::Arc;

use mudlark::commands::{CmdCtx, CommandError, CommandOutput, process_command};
use mudlark::config::Config;
use mudlark::db::repo::{GameStore, MemoryStore};
use mudlark::models::types::RecordId;
use mudlark::state::registry::Registry;

fn setup() -> (Arc<Registry>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(Registry::new(
        Arc::new(Config::default()),
        store.clone() as Arc<dyn GameStore>,
    ));
    (registry, store)
}

fn connect(registry: &Arc<Registry>) -> Arc<CmdCtx> {
    Arc::new(CmdCtx::new(registry.clone(), registry.create_guest()))
}

async fn run(ctx: &Arc<CmdCtx>, line: &str) -> CommandOutput {
    process_command(line, ctx.clone())
        .await
        .unwrap_or_else(|e| panic!("command '{line}' failed: {e}"))
}

/// Puts the magic cookie in the start room so walkthroughs are
/// deterministic regardless of where world building dropped it.
fn plant_cookie_at_start(registry: &Arc<Registry>, ctx: &Arc<CmdCtx>) {
    let sess = registry.get(ctx.session_id()).unwrap();
    let mut sess = sess.lock();
    let from = sess.world.find_item_room("cookie").unwrap().to_string();
    let cookie = sess.world.room_mut(&from).unwrap().remove_item("cookie").unwrap();
    let start = sess.world.start().to_string();
    sess.world.room_mut(&start).unwrap().add_item(cookie);
}

#[tokio::test]
async fn guest_walkthrough_to_completion() {
    let (registry, _) = setup();
    let ctx = connect(&registry);
    plant_cookie_at_start(&registry, &ctx);

    // Gather everything around the entrance.
    for line in ["take key", "take map", "take cookie", "eat cookie"] {
        let out = run(&ctx, line).await;
        assert!(!out.is_error, "'{line}' narrated an error: {}", out.message);
    }

    // Theater, pub: grab the loot and walk back.
    for line in ["go east", "take book", "back", "go west", "take coin", "take bottle", "back"] {
        let out = run(&ctx, line).await;
        assert!(!out.is_error, "'{line}' narrated an error: {}", out.message);
    }

    // Lab, then the locked office next door.
    run(&ctx, "go south").await;
    run(&ctx, "take computer").await;
    run(&ctx, "take cable").await;
    let locked = run(&ctx, "go east").await;
    assert!(locked.is_error, "office should refuse entry while barred");
    assert!(locked.message.contains("locked"));
    let unlock = run(&ctx, "use key").await;
    assert!(unlock.message.contains("unlock"));
    run(&ctx, "go east").await;
    run(&ctx, "back").await;
    run(&ctx, "back").await;

    // Ride the transporter; `back` returns to the entrance wherever it led.
    let hop = run(&ctx, "go north").await;
    assert!(hop.message.contains("teleported"));
    run(&ctx, "back").await;

    let status = run(&ctx, "status").await;
    assert!(status.message.contains("Congratulations"));
    let progress = status.progress.expect("gameplay verbs report progress");
    assert!(progress.completed);
    assert_eq!(progress.rooms_explored, progress.total_rooms);
    assert_eq!(progress.items_collected, progress.total_items);
}

#[tokio::test]
async fn narrative_errors_do_not_break_the_session() {
    let (registry, _) = setup();
    let ctx = connect(&registry);

    let out = run(&ctx, "go nowhere-real").await;
    assert!(out.is_error);
    let out = run(&ctx, "take unicorn").await;
    assert!(out.is_error);
    let out = run(&ctx, "frobnicate").await;
    assert!(out.is_error);
    assert!(out.message.contains("I don't know what you mean"));

    // The session is still perfectly usable.
    let out = run(&ctx, "look").await;
    assert!(!out.is_error);
    assert!(out.message.contains("outside the main entrance"));
}

#[tokio::test]
async fn register_save_load_round_trip() {
    let (registry, _) = setup();
    let ctx = connect(&registry);

    let out = run(&ctx, "save").await;
    assert!(out.is_error, "guests cannot save");

    let out = run(&ctx, "register alice Sup3rSecret").await;
    assert!(!out.is_error, "{}", out.message);

    run(&ctx, "take key").await;
    run(&ctx, "go south").await;
    let out = run(&ctx, "save").await;
    assert!(!out.is_error);

    // Wander off and drop the key somewhere else.
    run(&ctx, "drop key").await;
    run(&ctx, "back").await;

    let out = run(&ctx, "load").await;
    assert!(!out.is_error, "{}", out.message);
    let sess = registry.get(ctx.session_id()).unwrap();
    let sess = sess.lock();
    assert_eq!(sess.player.current_room(), "in a computing lab");
    assert!(sess.player.has_item("key"), "inventory is re-acquired from the world");
    assert!(sess.player.visited_rooms().contains("in a computing lab"));
}

#[tokio::test]
async fn relogin_invalidates_the_old_connection() {
    let (registry, _) = setup();
    let first = connect(&registry);
    let out = run(&first, "register bob hunter2").await;
    assert!(!out.is_error, "{}", out.message);
    let bound = first.session_id();

    // Same user logs in from a second connection.
    let second = connect(&registry);
    let out = run(&second, "login bob hunter2").await;
    assert!(!out.is_error, "{}", out.message);

    // The first connection's session was replaced; commands addressed to it
    // surface the distinct invalid-session error, not gameplay narrative.
    assert_eq!(first.session_id(), bound);
    let err = process_command("look", first.clone()).await.unwrap_err();
    assert!(matches!(err, CommandError::InvalidSession));

    // Wrong password never logs in.
    let third = connect(&registry);
    let out = run(&third, "login bob wrong").await;
    assert!(out.is_error);
}

#[tokio::test]
async fn quit_closes_the_game_record() {
    let (registry, store) = setup();
    let ctx = connect(&registry);
    run(&ctx, "register carol pw").await;
    run(&ctx, "take key").await;

    let out = run(&ctx, "quit").await;
    assert!(out.terminate);
    assert!(registry.get(ctx.session_id()).is_none());

    let record = store.record(RecordId(1)).expect("record was created at login");
    assert!(record.closed);
    assert!(!record.completed);
    assert_eq!(record.items_collected, 1);

    // The session id is dead for good.
    let err = process_command("look", ctx.clone()).await.unwrap_err();
    assert!(matches!(err, CommandError::InvalidSession));
}

#[tokio::test]
async fn who_lists_logged_in_users() {
    let (registry, _) = setup();
    let a = connect(&registry);
    let b = connect(&registry);
    run(&a, "register dave pw").await;
    run(&b, "register erin pw").await;

    let out = run(&a, "who").await;
    assert!(out.message.contains("dave"));
    assert!(out.message.contains("erin"));

    run(&b, "logout").await;
    let out = run(&a, "who").await;
    assert!(out.message.contains("dave"));
    assert!(!out.message.contains("erin"));
}
