//! Discord gateway and REST client.

mod client;
mod error;
mod gateway;
mod types;

pub use client::{parse_channel_id, ChatClient, DiscordClient, PresenceSink, ShardPresence};
pub use error::DiscordError;
pub use gateway::Gateway;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use serenity::all::ActivityType;

    mock! {
        pub Chat {}

        #[async_trait]
        impl ChatClient for Chat {
            async fn send(&self, channel_id: &str, text: &str) -> Result<(), DiscordError>;
            async fn text_channels(&self) -> Result<Vec<ChannelSummary>, DiscordError>;
        }
    }

    fn test_message() -> BotMessage {
        BotMessage {
            message_id: "900".into(),
            channel_id: "42".into(),
            guild_id: Some("7".into()),
            author_id: "1234".into(),
            author_name: "yuki".into(),
            author_is_bot: false,
            content: "!ping".into(),
        }
    }

    #[test]
    fn test_parse_channel_id() {
        let id = parse_channel_id("123456789012345678").unwrap();
        assert_eq!(id.get(), 123456789012345678);
    }

    #[test]
    fn test_parse_channel_id_rejects_garbage() {
        assert!(matches!(
            parse_channel_id("general"),
            Err(DiscordError::InvalidChannelId(_))
        ));
        assert!(matches!(
            parse_channel_id("0"),
            Err(DiscordError::InvalidChannelId(_))
        ));
        assert!(parse_channel_id("").is_err());
    }

    #[test]
    fn test_author_mention() {
        assert_eq!(test_message().author_mention(), "<@1234>");
    }

    #[test]
    fn test_streaming_activity_data() {
        let activity = StreamingActivity::new(
            "[EN] Room tour!",
            "https://www.twitch.tv/heyimyuki_",
            "Heyimyuki_ on Twitch",
        );
        let data = activity.to_activity_data().unwrap();

        assert_eq!(data.name, "[EN] Room tour!");
        assert_eq!(data.kind, ActivityType::Streaming);
        assert_eq!(data.state.as_deref(), Some("Heyimyuki_ on Twitch"));
        assert!(data.url.is_some());
    }

    #[test]
    fn test_streaming_activity_invalid_url() {
        let activity = StreamingActivity::new("live", "not a url", "me");
        assert!(matches!(
            activity.to_activity_data(),
            Err(DiscordError::InvalidActivity(_))
        ));
    }

    #[tokio::test]
    async fn test_reply_mentions_author_in_origin_channel() {
        let mut chat = MockChat::new();
        chat.expect_send()
            .withf(|channel, text| {
                channel.to_string() == "42" && text.to_string() == "<@1234>, Pong!"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        chat.reply(&test_message(), "Pong!").await.unwrap();
    }

    #[tokio::test]
    async fn test_find_text_channel() {
        let mut chat = MockChat::new();
        chat.expect_text_channels().returning(|| {
            Ok(vec![
                ChannelSummary {
                    id: "1".into(),
                    name: "general".into(),
                },
                ChannelSummary {
                    id: "2".into(),
                    name: "art".into(),
                },
            ])
        });

        let found = chat.find_text_channel("2").await.unwrap();
        assert_eq!(found.map(|c| c.name), Some("art".to_string()));
        assert!(chat.find_text_channel("3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_client_without_guild() {
        let client =
            DiscordClient::new(std::sync::Arc::new(serenity::all::Http::new("token")), None);
        assert!(client.guild_id().await.is_none());
        assert!(matches!(
            client.text_channels().await,
            Err(DiscordError::NoGuild)
        ));
    }

    #[tokio::test]
    async fn test_client_with_configured_guild() {
        let client = DiscordClient::new(
            std::sync::Arc::new(serenity::all::Http::new("token")),
            Some(555),
        );
        assert_eq!(client.guild_id().await.as_deref(), Some("555"));
    }
}
