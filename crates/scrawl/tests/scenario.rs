//! End-to-end tests driving the engine exactly the way a transport
//! layer would: nothing but `(caller, ClientAction)` pairs in, gateway
//! events out.

use std::sync::Arc;
use std::time::Duration;

use scrawl::{
    ClientAction, Engine, PlayerId, RecordingGateway, RoomId, RoomSettings, ServerEvent,
    Stroke, StrokeKind, WordPool,
};

fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

fn engine_with(pool: WordPool) -> (Arc<RecordingGateway>, Engine<RecordingGateway>) {
    let gateway = Arc::new(RecordingGateway::new());
    let engine = Engine::new(Arc::clone(&gateway), pool);
    (gateway, engine)
}

fn created_room(gateway: &RecordingGateway, creator: PlayerId) -> RoomId {
    gateway
        .sent_to(creator)
        .into_iter()
        .find_map(|ev| match ev {
            ServerEvent::RoomCreated { room_id, .. } => Some(room_id),
            _ => None,
        })
        .expect("creator never got a room_created event")
}

fn errors_for(gateway: &RecordingGateway, player: PlayerId) -> Vec<String> {
    gateway
        .sent_to(player)
        .into_iter()
        .filter_map(|ev| match ev {
            ServerEvent::Error { reason } => Some(reason),
            _ => None,
        })
        .collect()
}

/// Lets the room actors drain their queues. 10 ms of virtual time is
/// far below any game deadline, so nothing else fires.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

async fn create(engine: &Engine<RecordingGateway>, caller: PlayerId, settings: RoomSettings) {
    engine
        .handle(caller, ClientAction::CreateRoom { player_name: format!("p{}", caller.0), settings })
        .await;
}

async fn join(engine: &Engine<RecordingGateway>, caller: PlayerId, room: &RoomId) {
    engine
        .handle(
            caller,
            ClientAction::JoinRoom {
                room_id: room.as_str().into(),
                player_name: format!("p{}", caller.0),
            },
        )
        .await;
}

// =========================================================================
// The full game
// =========================================================================

/// Two players, two rounds: a guessed round, then a timed-out round,
/// then the final standings.
#[tokio::test(start_paused = true)]
async fn test_full_two_round_game() {
    let pool = WordPool::new(["casa", "gatto", "sole"]);
    let (gateway, engine) = engine_with(pool);
    let (a, b) = (pid(1), pid(2));

    let settings = RoomSettings {
        rounds: 2,
        draw_time_secs: 60,
        word_choice_count: 3,
        letter_hint_count: 2,
        ..RoomSettings::default()
    };
    create(&engine, a, settings).await;
    let room = created_room(&gateway, a);
    join(&engine, b, &room).await;

    // Host starts: round 1, drawer is the host, candidates go to A only.
    engine.handle(a, ClientAction::StartGame).await;
    settle().await;

    let candidates = gateway
        .sent_to(a)
        .into_iter()
        .find_map(|ev| match ev {
            ServerEvent::WordCandidates { words } => Some(words),
            _ => None,
        })
        .expect("drawer got no candidates");
    assert_eq!(candidates.len(), 3);
    assert!(
        !gateway
            .sent_to(b)
            .iter()
            .any(|ev| matches!(ev, ServerEvent::WordCandidates { .. })),
        "candidates leaked to a guesser"
    );

    // A picks "casa": everyone sees a 4-character mask.
    engine.handle(a, ClientAction::SelectWord { word: "casa".into() }).await;
    settle().await;
    let masked = gateway
        .sent_to_room(&room)
        .into_iter()
        .find_map(|ev| match ev {
            ServerEvent::WordSelected { masked, length } => Some((masked, length)),
            _ => None,
        });
    assert_eq!(masked, Some(("____".into(), 4)));

    // B guesses right: +100 guesser, +50 drawer.
    engine.handle(b, ClientAction::Chat { text: "casa".into() }).await;
    settle().await;
    let ended = gateway
        .sent_to_room(&room)
        .into_iter()
        .find_map(|ev| match ev {
            ServerEvent::TurnEnded { winner, scores, .. } => Some((winner, scores)),
            _ => None,
        });
    let (winner, scores) = ended.expect("round did not settle after the winning guess");
    assert_eq!(winner, Some(b));
    assert_eq!(scores[0].score, 50);
    assert_eq!(scores[1].score, 100);

    // Grace delay, then round 2 with the rotation moved to B.
    tokio::time::sleep(Duration::from_secs(4)).await;
    let round_two = gateway
        .sent_to_room(&room)
        .into_iter()
        .filter_map(|ev| match ev {
            ServerEvent::RoundStarted { drawer, round, .. } => Some((drawer, round)),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(round_two, vec![(a, 1), (b, 2)]);

    // B draws but nobody guesses; the timer settles round 2.
    let word = gateway
        .sent_to(b)
        .into_iter()
        .rev()
        .find_map(|ev| match ev {
            ServerEvent::WordCandidates { words } => Some(words[0].clone()),
            _ => None,
        })
        .unwrap();
    engine.handle(b, ClientAction::SelectWord { word }).await;
    engine
        .handle(
            b,
            ClientAction::Draw {
                stroke: Stroke { x: 3.0, y: 4.0, kind: StrokeKind::Start, color: None, size: None },
            },
        )
        .await;
    tokio::time::sleep(Duration::from_secs(61)).await;

    // Final standings: B kept the lead.
    let finished = gateway
        .sent_to_room(&room)
        .into_iter()
        .find_map(|ev| match ev {
            ServerEvent::GameFinished { winner, scores } => Some((winner, scores)),
            _ => None,
        });
    let (champion, final_scores) = finished.expect("game never finished");
    assert_eq!(champion, b);
    assert_eq!(final_scores[0].score, 50);
    assert_eq!(final_scores[1].score, 100);
    assert_eq!(engine.room_count().await, 1);
}

// =========================================================================
// Routing and rejection paths
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_join_with_malformed_or_unknown_code() {
    let (gateway, engine) = engine_with(WordPool::builtin());

    engine
        .handle(pid(1), ClientAction::JoinRoom { room_id: "nope".into(), player_name: "p1".into() })
        .await;
    engine
        .handle(
            pid(1),
            ClientAction::JoinRoom { room_id: "ZZZZZZ".into(), player_name: "p1".into() },
        )
        .await;

    let errors = errors_for(&gateway, pid(1));
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|reason| reason.contains("not found")));
}

#[tokio::test(start_paused = true)]
async fn test_join_codes_are_case_insensitive() {
    let (gateway, engine) = engine_with(WordPool::builtin());
    create(&engine, pid(1), RoomSettings::default()).await;
    let room = created_room(&gateway, pid(1));

    engine
        .handle(
            pid(2),
            ClientAction::JoinRoom {
                room_id: room.as_str().to_lowercase(),
                player_name: "p2".into(),
            },
        )
        .await;

    assert!(
        gateway
            .sent_to(pid(2))
            .iter()
            .any(|ev| matches!(ev, ServerEvent::RoomJoined { .. }))
    );
}

#[tokio::test(start_paused = true)]
async fn test_create_while_already_in_a_room_leaves_no_orphan() {
    let (gateway, engine) = engine_with(WordPool::builtin());
    create(&engine, pid(1), RoomSettings::default()).await;
    assert_eq!(engine.room_count().await, 1);

    create(&engine, pid(1), RoomSettings::default()).await;

    assert!(!errors_for(&gateway, pid(1)).is_empty());
    assert_eq!(engine.room_count().await, 1, "failed create must clean up after itself");
}

#[tokio::test(start_paused = true)]
async fn test_start_game_routes_by_host() {
    let (gateway, engine) = engine_with(WordPool::builtin());
    create(&engine, pid(1), RoomSettings::default()).await;
    let room = created_room(&gateway, pid(1));
    join(&engine, pid(2), &room).await;

    // A member who isn't the host is told so; an outsider is told they
    // aren't in a room at all.
    engine.handle(pid(2), ClientAction::StartGame).await;
    engine.handle(pid(9), ClientAction::StartGame).await;

    assert!(errors_for(&gateway, pid(2))[0].contains("host"));
    assert!(errors_for(&gateway, pid(9))[0].contains("not in a room"));
}

#[tokio::test(start_paused = true)]
async fn test_select_and_draw_route_by_drawer() {
    let (gateway, engine) = engine_with(WordPool::builtin());
    create(&engine, pid(1), RoomSettings::default()).await;
    let room = created_room(&gateway, pid(1));
    join(&engine, pid(2), &room).await;
    engine.handle(pid(1), ClientAction::StartGame).await;

    engine.handle(pid(2), ClientAction::SelectWord { word: "casa".into() }).await;
    assert!(errors_for(&gateway, pid(2))[0].contains("drawer"));

    engine
        .handle(
            pid(2),
            ClientAction::Draw {
                stroke: Stroke { x: 0.0, y: 0.0, kind: StrokeKind::Start, color: None, size: None },
            },
        )
        .await;
    assert_eq!(errors_for(&gateway, pid(2)).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_chat_outside_any_room_is_rejected() {
    let (gateway, engine) = engine_with(WordPool::builtin());

    engine.handle(pid(1), ClientAction::Chat { text: "hello?".into() }).await;

    assert!(errors_for(&gateway, pid(1))[0].contains("not in a room"));
}

#[tokio::test(start_paused = true)]
async fn test_disconnect_tears_down_an_emptied_room() {
    let (gateway, engine) = engine_with(WordPool::builtin());
    create(&engine, pid(1), RoomSettings::default()).await;
    let room = created_room(&gateway, pid(1));
    join(&engine, pid(2), &room).await;

    engine.handle(pid(1), ClientAction::Disconnect).await;
    assert_eq!(engine.room_count().await, 1);

    engine.handle(pid(2), ClientAction::Disconnect).await;
    assert_eq!(engine.room_count().await, 0);

    // The code is dead now.
    join(&engine, pid(3), &room).await;
    assert!(errors_for(&gateway, pid(3))[0].contains("not found"));

    // Disconnecting again is harmless.
    engine.handle(pid(2), ClientAction::Disconnect).await;
}

#[tokio::test(start_paused = true)]
async fn test_pending_timers_die_with_the_room() {
    let pool = WordPool::new(["casa"]);
    let (gateway, engine) = engine_with(pool);
    create(
        &engine,
        pid(1),
        RoomSettings { rounds: 1, draw_time_secs: 60, ..RoomSettings::default() },
    )
    .await;
    let room = created_room(&gateway, pid(1));
    join(&engine, pid(2), &room).await;
    engine.handle(pid(1), ClientAction::StartGame).await;
    engine.handle(pid(1), ClientAction::SelectWord { word: "casa".into() }).await;
    settle().await;

    // Everyone leaves mid-round with the draw timer still pending.
    engine.handle(pid(1), ClientAction::Disconnect).await;
    engine.handle(pid(2), ClientAction::Disconnect).await;
    assert_eq!(engine.room_count().await, 0);
    let before = gateway.sent_to_room(&room).len();

    // If any timer survived teardown it would fire in this window.
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(gateway.sent_to_room(&room).len(), before, "dead room kept broadcasting");
}
