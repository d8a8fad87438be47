pub(crate) mod context;
pub(crate) mod queue;

pub(crate) use context::BotContext;
pub(crate) use queue::{dispatch_event, new_participant_queues};
