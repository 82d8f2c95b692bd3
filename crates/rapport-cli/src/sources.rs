//! `rapport sources`: drive the simulated connectors from the terminal.

use anyhow::{Context, Result};
use rapport_sources::{ConnectorId, SimulationConfig, SourceError, SourceHub};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::{SourcesAction, display};

pub async fn run(action: SourcesAction) -> Result<()> {
    let hub = SourceHub::new(SimulationConfig::default());
    match action {
        SourcesAction::List => {
            display::print_connectors(&hub.connectors().await);
            Ok(())
        }
        SourcesAction::Connect {
            connector,
            client,
            syncs,
        } => {
            let id: ConnectorId = connector.parse()?;
            let printer = spawn_printer(&hub);
            let outcome = connect_and_sync(&hub, id, &client, syncs).await;
            let state = hub.connector(id).await;
            drop(hub);
            printer.await.context("event printer")?;
            println!();
            display::print_connector_state(&state);
            outcome
        }
        SourcesAction::Upload { files, client } => {
            let printer = spawn_printer(&hub);
            let count = hub.upload_documents(&client, &files).await?;
            let state = hub.connector(ConnectorId::Documents).await;
            drop(hub);
            printer.await.context("event printer")?;
            println!("Uploaded {count} file(s) for client {client}.");
            display::print_connector_state(&state);
            Ok(())
        }
    }
}

async fn connect_and_sync(
    hub: &SourceHub,
    id: ConnectorId,
    client: &str,
    syncs: u32,
) -> Result<()> {
    hub.connect(id, client).await?;
    for _ in 0..syncs {
        match hub.sync(id, client).await {
            Ok(_) => {}
            // A failed sync leaves the connector retryable; keep going.
            Err(SourceError::Failed { message, .. }) => println!("{message}"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Prints events until every hub handle is dropped.
fn spawn_printer(hub: &SourceHub) -> tokio::task::JoinHandle<()> {
    let mut rx = hub.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => display::print_event(&event),
                Err(RecvError::Lagged(n)) => warn!(skipped = n, "event printer fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    })
}
