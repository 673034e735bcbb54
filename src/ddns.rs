use log::{debug, info};

use crate::api::{models::SessionState, DdnsApiClient};
use crate::error::Result;
use crate::state::StateStore;

/// What a single invocation ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Registered(SessionState),
    Updated,
}

pub struct Ddns<C, S> {
    client: C,
    store: S,
    access_salt: String,
}

impl<C, S> Ddns<C, S>
where
    C: DdnsApiClient + Send + Sync,
    S: StateStore + Send + Sync,
{
    pub fn new(client: C, store: S, access_salt: String) -> Self {
        Self {
            client,
            store,
            access_salt,
        }
    }

    /// Register when no state is stored yet, otherwise refresh the stored record.
    pub async fn run(&self) -> Result<Outcome> {
        match self.store.load().await? {
            None => self.register().await.map(Outcome::Registered),
            Some(state) => self.update(&state).await.map(|_| Outcome::Updated),
        }
    }

    async fn register(&self) -> Result<SessionState> {
        info!("Initializing record...");
        let state = self.client.register(&self.access_salt).await?;
        self.store.save(&state).await?;

        let record = state.record();
        info!(
            "Registered {} {} -> {}",
            record.record_type, record.record_name, record.record_content
        );
        Ok(state)
    }

    async fn update(&self, state: &SessionState) -> Result<()> {
        info!("Sending record update...");
        debug!("Stored record id: {}", state.record().id);
        self.client.update(state.token()).await?;
        Ok(())
    }
}
