mod config;
mod pegel;
mod responder;

use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc;
use tracing::{info, warn};
use xmpp::parsers::message::MessageType;
use xmpp::{Agent, BareJid, ClientBuilder, ClientFeature, ClientType, Event, Jid};

use config::{Config, ConfigError};
use pegel::PegelClient;
use responder::{Action, respond};

/// Room message produced by a finished lookup task, waiting to be sent.
struct Outbound {
    room: BareJid,
    text: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            if !matches!(e, ConfigError::WrongArgCount) {
                eprintln!("{e}");
            }
            eprintln!("Parameters: <my-jid> <my-password> <full-muc-jid>");
            std::process::exit(1);
        }
    };

    let mut agent = ClientBuilder::new(config.jid.clone(), &config.password)
        .set_client(ClientType::Bot, "pegelbot")
        .set_default_nick(&config.nick)
        .enable_feature(ClientFeature::JoinRooms)
        .build();

    let pegel = PegelClient::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Outbound>();

    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");

    info!("Connecting as {}", config.jid);

    loop {
        tokio::select! {
            events = agent.wait_for_events() => {
                let Some(events) = events else {
                    warn!("Event stream ended");
                    break;
                };
                for event in events {
                    handle_event(event, &mut agent, &config, &pegel, &tx).await;
                }
            }
            Some(out) = rx.recv() => {
                agent
                    .send_message(Jid::Bare(out.room), MessageType::Groupchat, "de", &out.text)
                    .await;
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down");
                return;
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down");
                return;
            }
        }
    }
}

async fn handle_event(
    event: Event,
    agent: &mut Agent,
    config: &Config,
    pegel: &PegelClient,
    tx: &mpsc::UnboundedSender<Outbound>,
) {
    match event {
        Event::Online => {
            info!("Connected, joining {}", config.room);
            agent
                .join_room(config.room.clone(), Some(config.nick.clone()), None, "de", "")
                .await;
        }
        Event::Disconnected => {
            warn!("Disconnected");
        }
        Event::RoomJoined(room) => {
            info!("Joined {room}");
        }
        Event::RoomMessage(_id, room, nick, body) => {
            if room != config.room {
                return;
            }
            match respond(&nick, &body.0) {
                Some(Action::Reply(text)) => {
                    agent
                        .send_message(Jid::Bare(room), MessageType::Groupchat, "de", &text)
                        .await;
                }
                Some(Action::FetchLevel) => {
                    info!("Level lookup requested by {nick}");
                    let pegel = pegel.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let text = pegel.level_message().await;
                        // Loop may be gone on shutdown; the reply is abandoned then.
                        let _ = tx.send(Outbound { room, text });
                    });
                }
                None => {}
            }
        }
        _ => {}
    }
}
