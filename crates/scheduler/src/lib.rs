use std::sync::Arc;
use std::time::Duration;

use actors::actor::Actor;
use actors::actor_ref::ActorRef;
use actors::handler::{Handler, Message};
use async_trait::async_trait;
use routing::Planner;

/// Wraps the query-side [`Planner`] behind the actor mailbox so dataset
/// reloads are serialized through a single queue instead of racing on the
/// planner's own write lock directly (§5, §6 admin surface).
pub struct GraphActor {
    planner: Arc<Planner>,
}

impl GraphActor {
    pub fn new(planner: Arc<Planner>) -> Self {
        Self { planner }
    }
}

impl Actor for GraphActor {}

#[derive(Clone)]
pub struct Reload;

impl Message for Reload {
    type Response = Result<(), String>;
}

#[async_trait]
impl Handler<Reload> for GraphActor {
    async fn handle(&mut self, _message: Reload) -> Result<(), String> {
        self.planner.reload_dataset().map_err(|why| why.to_string())
    }
}

/// Starts a `GraphActor` and a background tick loop that sends it a
/// `Reload` message every `interval`. There is no persisted collector
/// state to restart from here, so the loop only needs the one steady-state
/// "wait, then reload" case.
pub fn spawn_periodic_reload(planner: Arc<Planner>, interval: Duration) -> ActorRef<GraphActor> {
    let actor_ref = actors::run(move || GraphActor::new(planner.clone()));

    let ticker = actor_ref.clone();
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        timer.tick().await;
        loop {
            timer.tick().await;
            match ticker.ask(Reload).await {
                Ok(Ok(())) => log::info!("dataset reload tick completed"),
                Ok(Err(why)) => log::warn!("dataset reload failed: {why}"),
                Err(why) => {
                    log::error!("could not deliver reload message: {:?}", why);
                    break;
                }
            }
        }
    });

    actor_ref
}
