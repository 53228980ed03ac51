//! Three bots play a full game against each other, locally.
//!
//! This wires the engine to a `ChannelGateway` the way a real transport
//! would, then scripts the participants: the drawer picks the first
//! offered word and scribbles, a guesser "solves" it (the orchestrator
//! knows the word — the bots are not clever, just thorough).
//!
//! Run with `RUST_LOG=debug` to watch every guard and timer decision.

use std::sync::Arc;
use std::time::Duration;

use scrawl::{
    ChannelGateway, ClientAction, Engine, EventReceiver, PlayerId, RoomSettings, ServerEvent,
    Stroke, StrokeKind, WordPool,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const BOT_NAMES: [&str; 3] = ["ada", "bruno", "carla"];

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let gateway = Arc::new(ChannelGateway::new());
    let engine = Engine::new(Arc::clone(&gateway), WordPool::builtin());

    let players: Vec<PlayerId> = (1..=3u64).map(PlayerId).collect();
    let mut inboxes: Vec<EventReceiver> =
        players.iter().map(|&p| gateway.register(p)).collect();

    // Ada opens the room, the others join by code.
    engine
        .handle(
            players[0],
            ClientAction::CreateRoom {
                player_name: BOT_NAMES[0].into(),
                settings: RoomSettings {
                    rounds: 3,
                    draw_time_secs: 40,
                    ..RoomSettings::default()
                },
            },
        )
        .await;
    let room_id = loop {
        match inboxes[0].recv().await {
            Some(ServerEvent::RoomCreated { room_id, .. }) => break room_id,
            Some(_) => continue,
            None => return,
        }
    };
    info!(%room_id, "room open");

    for (i, &player) in players.iter().enumerate().skip(1) {
        engine
            .handle(
                player,
                ClientAction::JoinRoom {
                    room_id: room_id.as_str().into(),
                    player_name: BOT_NAMES[i].into(),
                },
            )
            .await;
    }
    engine.handle(players[0], ClientAction::StartGame).await;

    let mut drawer: Option<PlayerId> = None;
    let mut secret: Option<String> = None;

    'game: loop {
        for i in 0..players.len() {
            let me = players[i];
            while let Ok(event) = inboxes[i].try_recv() {
                // Broadcasts land in every inbox; narrate ada's view only.
                let narrate = i == 0;
                match event {
                    ServerEvent::RoundStarted { drawer: d, round, total_rounds } => {
                        drawer = Some(d);
                        if narrate {
                            info!(round, total_rounds, drawer = %d, "round started");
                        }
                    }
                    // Only the drawer's inbox ever sees candidates.
                    ServerEvent::WordCandidates { words } => {
                        let word = words[0].clone();
                        info!(drawer = %me, choices = words.len(), "picking a word");
                        secret = Some(word.clone());
                        engine.handle(me, ClientAction::SelectWord { word }).await;
                    }
                    ServerEvent::WordSelected { masked, .. } if narrate => {
                        info!(%masked, "canvas is live");
                        if let (Some(d), Some(word)) = (drawer, secret.clone()) {
                            engine
                                .handle(
                                    d,
                                    ClientAction::Draw {
                                        stroke: Stroke {
                                            x: 42.0,
                                            y: 17.0,
                                            kind: StrokeKind::Start,
                                            color: Some("#222222".into()),
                                            size: Some(3.0),
                                        },
                                    },
                                )
                                .await;
                            let guesser = players.iter().copied().find(|&p| Some(p) != drawer);
                            if let Some(guesser) = guesser {
                                engine.handle(guesser, ClientAction::Chat { text: word }).await;
                            }
                        }
                    }
                    ServerEvent::Chat { name, text, correct, .. } if narrate => {
                        info!(%name, %text, correct, "chat");
                    }
                    ServerEvent::TurnEnded { word, winner, .. } if narrate => {
                        info!(%word, ?winner, "turn over");
                    }
                    ServerEvent::GameFinished { scores, winner } if narrate => {
                        for entry in &scores {
                            info!(player = %entry.player, score = entry.score, "final score");
                        }
                        info!(winner = %winner, "game finished");
                        break 'game;
                    }
                    _ => {}
                }
            }
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }

    for &player in &players {
        engine.handle(player, ClientAction::Disconnect).await;
    }
    info!(rooms = engine.room_count().await, "all bots left");
}
