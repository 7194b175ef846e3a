//! Host store channel records

use serde::{Deserialize, Serialize};
use strum::Display;

/// Channel kinds as the host store encodes them on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ChannelType {
    /// A public channel
    #[serde(rename = "O")]
    #[strum(serialize = "O")]
    Open,
    /// A private channel
    #[serde(rename = "P")]
    #[strum(serialize = "P")]
    Private,
    /// A one on one conversation
    #[serde(rename = "D")]
    #[strum(serialize = "D")]
    DirectMessage,
    /// A conversation between a small ad-hoc group of users
    #[serde(rename = "G")]
    #[strum(serialize = "G")]
    GroupMessage,
}

/// A channel as read from the host document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// The channel id
    pub id: String,
    /// The channel kind
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    /// The display name, empty for direct and group messages
    pub display_name: String,
}

impl Channel {
    /// The conversation label shown in the preview header.
    ///
    /// Direct and group messages have no display name of their own, so they
    /// get a generic label instead.
    pub fn conversation_label(&self) -> &str {
        match self.channel_type {
            ChannelType::DirectMessage => "Direct Message",
            ChannelType::GroupMessage => "Group Message",
            ChannelType::Open | ChannelType::Private => &self.display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(channel_type: ChannelType, display_name: &str) -> Channel {
        Channel {
            id: "channelid".to_string(),
            channel_type,
            display_name: display_name.to_string(),
        }
    }

    #[test]
    fn it_labels_direct_and_group_conversations() {
        assert_eq!(
            channel(ChannelType::DirectMessage, "").conversation_label(),
            "Direct Message"
        );
        assert_eq!(
            channel(ChannelType::GroupMessage, "").conversation_label(),
            "Group Message"
        );
    }

    #[test]
    fn it_labels_named_channels_by_display_name() {
        assert_eq!(
            channel(ChannelType::Open, "Town Square").conversation_label(),
            "Town Square"
        );
        assert_eq!(
            channel(ChannelType::Private, "Staff").conversation_label(),
            "Staff"
        );
    }

    #[test]
    fn it_reads_the_single_letter_wire_encoding() {
        let raw = r#"{"id": "channelid", "type": "D", "display_name": ""}"#;
        let channel: Channel = serde_json::from_str(raw).unwrap();
        assert_eq!(channel.channel_type, ChannelType::DirectMessage);
    }
}
