use async_trait::async_trait;
use serenity::all::{
    CommandInteraction, CommandOptionType, CommandType, CreateCommand, CreateCommandOption,
    CreateInteractionResponse, CreateInteractionResponseMessage,
};
use url::Url;

use crate::cards;
use crate::server::AppState;

use super::{CommandError, SlashCommand, NOT_FOUND_MESSAGE};

const COMMAND_NAME: &str = "cc";
const NAME_OPTION: &str = "nome";

/// `/cc <nome>`: look up a card by name and reply with its scan.
pub struct CardCommand;

#[async_trait]
impl SlashCommand for CardCommand {
    fn name(&self) -> &'static str {
        COMMAND_NAME
    }

    fn definition(&self) -> CreateCommand {
        CreateCommand::new(COMMAND_NAME)
            .kind(CommandType::ChatInput)
            .description("Pesquisar uma carta na base de dados do Custom Commander.")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, NAME_OPTION, "Nome da carta.")
                    .required(true),
            )
    }

    async fn run(
        &self,
        state: &AppState,
        interaction: &CommandInteraction,
    ) -> Result<CreateInteractionResponse, CommandError> {
        let query = interaction
            .data
            .options
            .first()
            .and_then(|option| option.value.as_str())
            .ok_or(CommandError::MissingOption(NAME_OPTION))?;

        let catalog = state.catalog.card_names().await?;
        Ok(lookup_response(query, &catalog, &state.media_base))
    }
}

fn lookup_response(query: &str, catalog: &[String], media_base: &Url) -> CreateInteractionResponse {
    let content = match cards::resolve(query, catalog) {
        Some(card) => cards::media_url(media_base, card),
        None => NOT_FOUND_MESSAGE.to_string(),
    };
    CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(content))
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{lookup_response, NOT_FOUND_MESSAGE};

    fn base() -> Url {
        Url::parse("https://storage.example/o/").unwrap()
    }

    fn catalog(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn replies_with_the_media_url_of_the_resolved_card() {
        let response = lookup_response("fire", &catalog(&["Fireball", "Fire Wall"]), &base());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["type"], 4);
        assert_eq!(
            value["data"]["content"],
            "https://storage.example/o/CC1%2FFireball.jpg?alt=media"
        );
    }

    #[test]
    fn replies_with_the_not_found_message_for_unknown_cards() {
        let response = lookup_response("Lightning", &catalog(&["Fireball"]), &base());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["type"], 4);
        assert_eq!(value["data"]["content"], NOT_FOUND_MESSAGE);
    }
}
