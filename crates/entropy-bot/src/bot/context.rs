use entropy_core::flow::ConversationFlow;
use entropy_core::oracle::CoingeckoOracle;
use entropy_core::qr::QrServerRenderer;

use crate::telegram::TelegramClient;

/// The flow with its production collaborators wired in.
pub(crate) type Flow = ConversationFlow<CoingeckoOracle, QrServerRenderer>;

pub(crate) struct BotContext {
    client: TelegramClient,
    flow: Flow,
}

impl BotContext {
    pub(crate) fn new(client: TelegramClient, flow: Flow) -> Self {
        Self { client, flow }
    }

    pub(crate) fn client(&self) -> &TelegramClient {
        &self.client
    }

    pub(crate) fn flow(&self) -> &Flow {
        &self.flow
    }
}
