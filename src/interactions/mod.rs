use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    CommandInteraction, CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
    Interaction,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::cards::catalog::CatalogError;
use crate::server::AppState;

mod card_command;
mod component;
mod roll_command;

pub use card_command::CardCommand;
pub use roll_command::RollCommand;

pub(crate) const NOT_FOUND_MESSAGE: &str = "Carta não encontrada!";
const UNAVAILABLE_MESSAGE: &str =
    "Não foi possível aceder à base de dados de cartas. Tenta novamente mais tarde.";
const FALLBACK_MESSAGE: &str = "Não sei responder a essa interação.";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("interaction is missing the required `{0}` option")]
    MissingOption(&'static str),
}

/// A slash command: its registration payload plus the webhook-side handler.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    fn name(&self) -> &'static str;

    fn definition(&self) -> CreateCommand;

    async fn run(
        &self,
        state: &AppState,
        interaction: &CommandInteraction,
    ) -> Result<CreateInteractionResponse, CommandError>;
}

/// Maps one inbound interaction to exactly one response payload.
///
/// Sending is the transport's job; handlers only return a value, so no
/// branch can respond twice or not at all.
pub async fn dispatch(
    state: &Arc<AppState>,
    interaction: Interaction,
) -> CreateInteractionResponse {
    match interaction {
        Interaction::Ping(_) => CreateInteractionResponse::Pong,
        Interaction::Command(command) => dispatch_command(state, &command).await,
        Interaction::Component(component) => component::dispatch_component(state, &component),
        other => {
            warn!(kind = ?other.kind(), "no handler for interaction");
            fallback_response()
        }
    }
}

async fn dispatch_command(
    state: &AppState,
    interaction: &CommandInteraction,
) -> CreateInteractionResponse {
    let name = interaction.data.name.as_str();
    for command in &state.commands {
        if command.name() != name {
            continue;
        }
        return match command.run(state, interaction).await {
            Ok(response) => response,
            Err(CommandError::Catalog(err)) => {
                error!(command = name, error = %err, "failed to fetch card catalog");
                ephemeral_message(UNAVAILABLE_MESSAGE)
            }
            Err(err @ CommandError::MissingOption(_)) => {
                warn!(command = name, error = %err, "malformed command interaction");
                fallback_response()
            }
        };
    }

    warn!(command = name, "no handler for slash command");
    fallback_response()
}

fn fallback_response() -> CreateInteractionResponse {
    ephemeral_message(FALLBACK_MESSAGE)
}

fn ephemeral_message(content: &str) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}
