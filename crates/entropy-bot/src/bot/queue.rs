use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::bot::context::BotContext;
use crate::handlers::event::{BotEvent, handle_event};

/// Queue key: the participant. Events for one participant are
/// processed strictly in order because the flow reads then writes the
/// whole session non-atomically; two interleaved events would corrupt
/// the pending transfer fields. Different participants run fully in
/// parallel since sessions share nothing.
pub(crate) type ParticipantQueueMap = Arc<Mutex<HashMap<i64, mpsc::UnboundedSender<BotEvent>>>>;

pub(crate) fn new_participant_queues() -> ParticipantQueueMap {
    Arc::new(Mutex::new(HashMap::new()))
}

pub(crate) async fn dispatch_event(
    queues: &ParticipantQueueMap,
    context: &Arc<BotContext>,
    event: BotEvent,
) {
    let key = event.participant_id;
    let sender = {
        let mut queues = queues.lock().await;
        if let Some(sender) = queues.get(&key) {
            sender.clone()
        } else {
            let (sender, receiver) = mpsc::unbounded_channel();
            spawn_queue_worker(key, receiver, Arc::clone(context));
            queues.insert(key, sender.clone());
            sender
        }
    };

    if let Err(err) = sender.send(event) {
        // Worker died; respawn it and requeue the event.
        let event = err.0;
        let (sender, receiver) = mpsc::unbounded_channel();
        spawn_queue_worker(key, receiver, Arc::clone(context));
        {
            let mut queues = queues.lock().await;
            queues.insert(key, sender.clone());
        }
        let _ = sender.send(event);
    }
}

fn spawn_queue_worker(
    key: i64,
    mut receiver: mpsc::UnboundedReceiver<BotEvent>,
    context: Arc<BotContext>,
) {
    tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            if let Err(err) = handle_event(context.as_ref(), event).await {
                eprintln!("Event handling error for participant {}: {}", key, err);
            }
        }
    });
}
