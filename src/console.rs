//! Line-oriented stdin driver for the channel core.
//!
//! ```text
//! login <id> <name> [security] [team] [rank] [guild]
//! logout <id>
//! ignore <who-id> <whom-id>
//! static <channel> on|off
//! channels
//! <player-id> <command> <channel> [args...]
//! ```
//!
//! Player commands: `join [password]`, `leave`, `kick <name>`,
//! `ban <name>`, `unban <name>`, `password [password]`,
//! `moderator <name> on|off`, `mute <name> on|off`, `owner <name>`,
//! `whoowner`, `list`, `announce`, `moderate`, `say <text...>`,
//! `invite <name>`.
//!
//! Every delivery is printed to stdout as one JSON object per line.

use std::io::Write;
use std::sync::Arc;

use channeld_proto::{PlayerId, SecurityLevel, ServerMessage, Team};
use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::config::Config;
use crate::services::{
    AsciiLanguageFilter, Collaborators, MemoryDirectory, MemorySocial, PlayerDirectory, PlayerInfo,
    Transport,
};
use crate::state::{ChannelCommand, ChannelRegistry};

/// Console input errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty line")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("missing argument: {0}")]
    Missing(&'static str),
    #[error("invalid {what}: '{value}'")]
    Invalid { what: &'static str, value: String },
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
}

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Login(PlayerInfo),
    Logout(PlayerId),
    Ignore { who: PlayerId, whom: PlayerId },
    Static { channel: String, want_static: bool },
    Channels,
    Player {
        actor: PlayerId,
        channel: String,
        command: ChannelCommand,
    },
}

fn number<T: std::str::FromStr>(what: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::Invalid {
        what,
        value: value.to_string(),
    })
}

fn switch(value: Option<&str>) -> Result<bool, ParseError> {
    match value {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        Some(other) => Err(ParseError::Invalid {
            what: "switch",
            value: other.to_string(),
        }),
        None => Err(ParseError::Missing("on|off")),
    }
}

fn parse_login<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<ConsoleCommand, ParseError> {
    let id: u64 = number("player id", args.next().ok_or(ParseError::Missing("id"))?)?;
    let name = args.next().ok_or(ParseError::Missing("name"))?;

    let security = match args.next() {
        Some(raw) => SecurityLevel::try_from(number::<u8>("security level", raw)?).map_err(|_| {
            ParseError::Invalid {
                what: "security level",
                value: raw.to_string(),
            }
        })?,
        None => SecurityLevel::Player,
    };
    let team = match args.next() {
        Some(raw) => Team::try_from(number::<u8>("team", raw)?).map_err(|_| ParseError::Invalid {
            what: "team",
            value: raw.to_string(),
        })?,
        None => Team::Alliance,
    };

    let mut info = PlayerInfo::new(PlayerId(id), name, team);
    info.security = security;
    if let Some(raw) = args.next() {
        info.honor_rank = number("rank", raw)?;
    }
    if let Some(raw) = args.next() {
        info.guild_id = Some(number::<u32>("guild", raw)?).filter(|g| *g != 0);
    }
    Ok(ConsoleCommand::Login(info))
}

fn parse_player_command(verb: &str, rest: &str) -> Result<ChannelCommand, ParseError> {
    let mut args = rest.split_whitespace();
    let target = |arg: Option<&str>| arg.map(str::to_string).ok_or(ParseError::Missing("player name"));

    let command = match verb {
        "join" => ChannelCommand::Join {
            password: args.next().map(str::to_string),
        },
        "leave" => ChannelCommand::Leave { notify: true },
        "kick" => ChannelCommand::KickOrBan {
            target: target(args.next())?,
            ban: false,
        },
        "ban" => ChannelCommand::KickOrBan {
            target: target(args.next())?,
            ban: true,
        },
        "unban" => ChannelCommand::UnBan {
            target: target(args.next())?,
        },
        "password" => ChannelCommand::SetPassword {
            password: args.next().unwrap_or_default().to_string(),
        },
        "moderator" => {
            let name = target(args.next())?;
            ChannelCommand::moderator(name, switch(args.next())?)
        }
        "mute" => {
            let name = target(args.next())?;
            ChannelCommand::mute(name, switch(args.next())?)
        }
        "owner" => ChannelCommand::SetOwner {
            target: target(args.next())?,
        },
        "whoowner" => ChannelCommand::QueryOwner,
        "list" => ChannelCommand::List,
        "announce" => ChannelCommand::ToggleAnnounce,
        "moderate" => ChannelCommand::ToggleModerate,
        "say" => ChannelCommand::say(rest.trim()),
        "invite" => ChannelCommand::Invite {
            target: target(args.next())?,
        },
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}

/// Parse one console line.
pub fn parse_line(line: &str) -> Result<ConsoleCommand, ParseError> {
    let line = line.trim();
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    match head {
        "" => Err(ParseError::Empty),
        "login" => parse_login(rest.split_whitespace()),
        "logout" => {
            let id = rest.split_whitespace().next().ok_or(ParseError::Missing("id"))?;
            Ok(ConsoleCommand::Logout(PlayerId(number("player id", id)?)))
        }
        "ignore" => {
            let mut args = rest.split_whitespace();
            let who = number("player id", args.next().ok_or(ParseError::Missing("who"))?)?;
            let whom = number("player id", args.next().ok_or(ParseError::Missing("whom"))?)?;
            Ok(ConsoleCommand::Ignore {
                who: PlayerId(who),
                whom: PlayerId(whom),
            })
        }
        "static" => {
            let mut args = rest.split_whitespace();
            let channel = args.next().ok_or(ParseError::Missing("channel"))?;
            Ok(ConsoleCommand::Static {
                channel: channel.to_string(),
                want_static: switch(args.next())?,
            })
        }
        "channels" => Ok(ConsoleCommand::Channels),
        id => {
            let actor = PlayerId(number("player id", id)?);
            let rest = rest.trim_start();
            let (verb, rest) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if verb.is_empty() {
                return Err(ParseError::Missing("command"));
            }
            let rest = rest.trim_start();
            let (channel, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if channel.is_empty() {
                return Err(ParseError::Missing("channel"));
            }
            Ok(ConsoleCommand::Player {
                actor,
                channel: channel.to_string(),
                command: parse_player_command(verb, args)?,
            })
        }
    }
}

/// One delivered message, as printed.
#[derive(Serialize)]
struct Delivery<'a> {
    at: String,
    to: PlayerId,
    #[serde(flatten)]
    message: &'a ServerMessage,
}

/// Transport that prints every delivery as a JSON line on stdout.
#[derive(Debug, Default)]
pub struct JsonLinesTransport;

impl Transport for JsonLinesTransport {
    fn deliver(&self, to: PlayerId, message: Arc<ServerMessage>) {
        let delivery = Delivery {
            at: chrono::Utc::now().to_rfc3339(),
            to,
            message: &message,
        };
        match serde_json::to_string(&delivery) {
            Ok(line) => {
                let mut out = std::io::stdout().lock();
                let _ = writeln!(out, "{line}");
            }
            Err(e) => debug!(error = %e, "failed to encode delivery"),
        }
    }
}

/// Console session: in-memory players around a live registry.
pub struct Console {
    registry: ChannelRegistry,
    directory: Arc<MemoryDirectory>,
    social: Arc<MemorySocial>,
}

impl Console {
    /// Build a console that prints deliveries to stdout.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, Arc::new(JsonLinesTransport))
    }

    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let directory = Arc::new(MemoryDirectory::new());
        let social = Arc::new(MemorySocial::new());
        let services = Collaborators {
            directory: directory.clone(),
            social: social.clone(),
            language: Arc::new(AsciiLanguageFilter),
            transport,
        };
        Self {
            registry: ChannelRegistry::new(config, services),
            directory,
            social,
        }
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// Apply one parsed command. Returns a status line for the operator.
    pub async fn apply(&self, command: ConsoleCommand) -> Result<String, ParseError> {
        match command {
            ConsoleCommand::Login(info) => {
                let line = format!("logged in {} as {}", info.id, info.name);
                self.directory.insert(info);
                Ok(line)
            }
            ConsoleCommand::Logout(id) => {
                let info = self.resolve(id)?;
                let left = self.registry.part_all(&info).await;
                self.directory.remove(id);
                Ok(format!("logged out {id}, left {left} channel(s)"))
            }
            ConsoleCommand::Ignore { who, whom } => {
                self.social.ignore(who, whom);
                Ok(format!("{who} now ignores {whom}"))
            }
            ConsoleCommand::Static {
                channel,
                want_static,
            } => {
                let changed = self.registry.set_static(&channel, want_static).await;
                Ok(format!("static {channel}: changed={changed}"))
            }
            ConsoleCommand::Channels => Ok(self.registry.names().join(" ")),
            ConsoleCommand::Player {
                actor,
                channel,
                command,
            } => {
                let info = self.resolve(actor)?;
                let label = command.name();
                let status = match self.registry.execute(&info, &channel, command).await {
                    Ok(outcome) => format!("{label} {channel}: {outcome:?}"),
                    Err(err) => format!("{label} {channel}: {}", err.error_code()),
                };
                Ok(status)
            }
        }
    }

    fn resolve(&self, id: PlayerId) -> Result<PlayerInfo, ParseError> {
        self.directory.player(id).ok_or(ParseError::UnknownPlayer(id))
    }

    /// Read commands until end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&self, reader: R) -> std::io::Result<()> {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let result = match parse_line(&line) {
                Ok(command) => self.apply(command).await,
                Err(ParseError::Empty) => continue,
                Err(e) => Err(e),
            };
            match result {
                Ok(status) => info!("{status}"),
                Err(e) => info!(error = %e, "console: {line}"),
            }
        }
        Ok(())
    }
}
