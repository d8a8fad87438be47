use anyhow::Result;
use entropy_core::flow::{Action, InboundEvent, MenuButton, RenderInstruction};
use serde_json::{Value, json};
use tracing::warn;

use crate::bot::context::BotContext;
use crate::telegram::Update;

/// One unit of work for a participant's queue worker.
#[derive(Debug)]
pub(crate) struct BotEvent {
    pub participant_id: i64,
    pub chat_id: i64,
    /// Set for button presses; acknowledged before dispatch.
    pub callback_id: Option<String>,
    pub kind: BotEventKind,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BotEventKind {
    /// `/start` command; renders the welcome menu without touching
    /// the session.
    Start,
    Flow(InboundEvent),
}

/// Maps a Telegram update to a flow event. Returns `None` for updates
/// the flow should never see: bot senders, empty messages, unknown or
/// stale callback data.
pub(crate) fn parse_update(update: Update) -> Option<BotEvent> {
    if let Some(query) = update.callback_query {
        let chat_id = query.message.as_ref().map_or(query.from.id, |m| m.chat.id);
        let Some(action) = query.data.as_deref().and_then(Action::parse) else {
            warn!(chat_id, data = ?query.data, "ignoring unknown callback data");
            return None;
        };
        return Some(BotEvent {
            participant_id: query.from.id,
            chat_id,
            callback_id: Some(query.id),
            kind: BotEventKind::Flow(InboundEvent::ButtonPress(action)),
        });
    }

    let message = update.message?;
    let from = message.from.as_ref()?;
    if from.is_bot {
        return None;
    }
    let text = message
        .text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())?
        .to_string();

    let kind = if text == "/start" {
        BotEventKind::Start
    } else {
        BotEventKind::Flow(InboundEvent::TextMessage(text))
    };

    Some(BotEvent {
        participant_id: from.id,
        chat_id: message.chat.id,
        callback_id: None,
        kind,
    })
}

pub(crate) async fn handle_event(context: &BotContext, event: BotEvent) -> Result<()> {
    if let Some(callback_id) = event.callback_id.as_deref() {
        // Ack first so the client spinner stops; a failed ack is only
        // cosmetic.
        let _ = context.client().answer_callback_query(callback_id).await;
    }

    let render = match event.kind {
        BotEventKind::Start => context.flow().welcome(),
        BotEventKind::Flow(inbound) => {
            context.flow().dispatch(event.participant_id, inbound).await
        }
    };

    send_render(context, event.chat_id, render).await
}

async fn send_render(context: &BotContext, chat_id: i64, render: RenderInstruction) -> Result<()> {
    if let Some(attachment) = render.attachment {
        context
            .client()
            .send_photo(chat_id, attachment.bytes, &attachment.caption)
            .await?;
    }
    let markup = keyboard(&render.menu);
    context
        .client()
        .send_message(chat_id, &render.text, markup)
        .await
}

fn keyboard(menu: &[Vec<MenuButton>]) -> Option<Value> {
    if menu.is_empty() {
        return None;
    }
    let rows: Vec<Value> = menu
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| {
                    json!({
                        "text": button.label,
                        "callback_data": button.action.as_str(),
                    })
                })
                .collect()
        })
        .collect();
    Some(json!({ "inline_keyboard": rows }))
}
