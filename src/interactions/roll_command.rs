use async_trait::async_trait;
use serenity::all::{
    CommandInteraction, CommandType, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use url::Url;

use crate::cards;
use crate::server::AppState;

use super::{CommandError, SlashCommand, NOT_FOUND_MESSAGE};

const COMMAND_NAME: &str = "ccroll";

/// `/ccroll`: reply with the scan of a random card.
pub struct RollCommand;

#[async_trait]
impl SlashCommand for RollCommand {
    fn name(&self) -> &'static str {
        COMMAND_NAME
    }

    fn definition(&self) -> CreateCommand {
        CreateCommand::new(COMMAND_NAME)
            .kind(CommandType::ChatInput)
            .description("Obter uma carta aleatória da base de dados do Custom Commander.")
    }

    async fn run(
        &self,
        state: &AppState,
        _interaction: &CommandInteraction,
    ) -> Result<CreateInteractionResponse, CommandError> {
        let catalog = state.catalog.card_names().await?;
        Ok(roll_response(&catalog, &state.media_base))
    }
}

// An empty catalog still gets an answer; the request must not go unanswered.
fn roll_response(catalog: &[String], media_base: &Url) -> CreateInteractionResponse {
    let content = match cards::pick_random(catalog) {
        Some(card) => cards::media_url(media_base, card),
        None => NOT_FOUND_MESSAGE.to_string(),
    };
    CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(content))
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{roll_response, NOT_FOUND_MESSAGE};

    fn base() -> Url {
        Url::parse("https://storage.example/o/").unwrap()
    }

    #[test]
    fn replies_with_the_media_url_of_some_catalog_card() {
        let catalog = vec!["Fireball".to_string(), "Ice Shard".to_string()];
        let response = roll_response(&catalog, &base());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["type"], 4);
        let content = value["data"]["content"].as_str().unwrap();
        assert!(
            content == "https://storage.example/o/CC1%2FFireball.jpg?alt=media"
                || content == "https://storage.example/o/CC1%2FIce%20Shard.jpg?alt=media"
        );
    }

    #[test]
    fn replies_with_the_not_found_message_on_an_empty_catalog() {
        let response = roll_response(&[], &base());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["type"], 4);
        assert_eq!(value["data"]["content"], NOT_FOUND_MESSAGE);
    }
}
