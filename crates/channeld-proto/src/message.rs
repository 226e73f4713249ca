//! Outbound messages handed to the transport.

use std::fmt;

use crate::flags::{ChannelFlags, MemberFlags};
use crate::ids::{Language, PlayerId};
use crate::notification::Notification;

/// One member row of a channel list reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListedMember {
    /// Member identity.
    pub player: PlayerId,
    /// Member role byte.
    pub flags: MemberFlags,
}

/// Reply to a channel list request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChannelList {
    /// Channel name.
    pub channel: String,
    /// Channel classification.
    pub flags: ChannelFlags,
    /// Visible members in table order.
    pub members: Vec<ListedMember>,
}

/// A line of channel speech.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChatLine {
    /// Channel name.
    pub channel: String,
    /// Speaker identity.
    pub sender: PlayerId,
    /// Speaker display name.
    pub sender_name: String,
    /// Message text.
    pub text: String,
    /// Language the text is spoken in.
    pub language: Language,
    /// Speaker's honor rank.
    pub honor_rank: u8,
}

/// Everything a channel can hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ServerMessage {
    /// Channel notice.
    Notify(Notification),
    /// Channel member list.
    ChannelList(ChannelList),
    /// Channel speech.
    Chat(ChatLine),
}

impl ServerMessage {
    /// The notification, if this is one.
    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            Self::Notify(n) => Some(n),
            _ => None,
        }
    }

    /// Channel this message concerns.
    pub fn channel(&self) -> &str {
        match self {
            Self::Notify(n) => &n.channel,
            Self::ChannelList(l) => &l.channel,
            Self::Chat(c) => &c.channel,
        }
    }
}

impl From<Notification> for ServerMessage {
    fn from(n: Notification) -> Self {
        Self::Notify(n)
    }
}

impl From<ChannelList> for ServerMessage {
    fn from(list: ChannelList) -> Self {
        Self::ChannelList(list)
    }
}

impl From<ChatLine> for ServerMessage {
    fn from(line: ChatLine) -> Self {
        Self::Chat(line)
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notify(n) => write!(f, "{}", n),
            Self::ChannelList(l) => {
                write!(f, "[{}] LIST flags={}", l.channel, l.flags)?;
                for m in &l.members {
                    write!(f, " {}:{}", m.player, m.flags)?;
                }
                Ok(())
            }
            Self::Chat(c) => write!(f, "[{}] <{}> {}", c.channel, c.sender_name, c.text),
        }
    }
}
