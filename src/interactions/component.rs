use std::sync::Arc;

use serenity::all::{
    ComponentInteraction, CreateActionRow, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption,
};
use tracing::warn;

use crate::game;
use crate::server::AppState;

use super::fallback_response;

const ACCEPT_BUTTON_PREFIX: &str = "accept_button_";
const SELECT_CHOICE_PREFIX: &str = "select_choice_";
const CHOICE_PROMPT: &str = "What is your object of choice?";

pub(super) fn dispatch_component(
    state: &Arc<AppState>,
    interaction: &ComponentInteraction,
) -> CreateInteractionResponse {
    let custom_id = interaction.data.custom_id.as_str();
    match custom_id.strip_prefix(ACCEPT_BUTTON_PREFIX) {
        Some(game_id) => {
            // Reply first; the originating challenge message goes away on a
            // best-effort basis and must not hold up the response.
            let response = choice_prompt_response(game_id);
            spawn_delete_original(state, interaction);
            response
        }
        None => {
            warn!(custom_id, "no handler for message component");
            fallback_response()
        }
    }
}

/// Ephemeral prompt asking the accepting player for their object, with the
/// game id threaded through the select menu's custom id.
fn choice_prompt_response(game_id: &str) -> CreateInteractionResponse {
    let options = game::shuffled_choices()
        .into_iter()
        .map(|choice| CreateSelectMenuOption::new(game::capitalize(choice), choice))
        .collect();
    let menu = CreateSelectMenu::new(
        format!("{SELECT_CHOICE_PREFIX}{game_id}"),
        CreateSelectMenuKind::String { options },
    );

    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(CHOICE_PROMPT)
            .ephemeral(true)
            .components(vec![CreateActionRow::SelectMenu(menu)]),
    )
}

/// Deletes the challenge message the button lived on, off the request path.
///
/// The task may run before the transport has written our response; that is
/// fine, since it touches the earlier challenge message and never the pending
/// reply. Failures are logged and never reach the response path.
fn spawn_delete_original(state: &Arc<AppState>, interaction: &ComponentInteraction) {
    let state = Arc::clone(state);
    let token = interaction.token.clone();
    let message_id = interaction.message.id;
    tokio::spawn(async move {
        if let Err(err) = state.http.delete_followup_message(&token, message_id).await {
            warn!(error = %err, "failed to delete challenge message");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::{choice_prompt_response, CHOICE_PROMPT};
    use crate::game::CHOICES;

    #[test]
    fn choice_prompt_is_ephemeral_and_carries_the_game_id() {
        let response = choice_prompt_response("abc123");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["type"], 4);
        assert_eq!(value["data"]["content"], CHOICE_PROMPT);
        // 64 is Discord's EPHEMERAL message flag.
        assert_eq!(value["data"]["flags"], 64);

        let menu = &value["data"]["components"][0]["components"][0];
        assert_eq!(menu["custom_id"], "select_choice_abc123");
        assert_eq!(menu["options"].as_array().unwrap().len(), CHOICES.len());
    }
}
