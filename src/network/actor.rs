//! Network actor - runs API calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::form::FieldValues;
use crate::messages::{NetworkCommand, NetworkResponse, Operation};
use crate::models::{Curator, Museum, Record, RecordId, Resource, ResourceKind};
use crate::network::client::ApiClient;
use crate::network::ApiError;

/// Network actor that processes API commands
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            // In-flight calls are not cancellable; let them finish quietly
                            self.active_requests.detach_all();
                            break;
                        }
                        Some(cmd) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                if let Some(response) = execute_command(&client, cmd).await {
                                    let _ = response_tx.send(response);
                                }
                            });
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Run one command against the services and describe the outcome
pub async fn execute_command(client: &ApiClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::FetchAll { id, kind } => {
            let result = match kind {
                ResourceKind::Museum => fetch_records::<Museum>(client).await,
                ResourceKind::Curator => fetch_records::<Curator>(client).await,
            };
            match result {
                Ok(records) => NetworkResponse::Fetched { id, kind, records },
                Err(error) => failed(id, kind, Operation::Fetch, error),
            }
        }

        NetworkCommand::Create { id, kind, values } => {
            let result = match kind {
                ResourceKind::Museum => create_record::<Museum>(client, &values).await,
                ResourceKind::Curator => create_record::<Curator>(client, &values).await,
            };
            match result {
                Ok(record) => NetworkResponse::Created { id, kind, record },
                Err(error) => failed(id, kind, Operation::Create, error),
            }
        }

        NetworkCommand::Update { id, kind, record_id, values } => {
            let result = match kind {
                ResourceKind::Museum => update_record::<Museum>(client, record_id, &values).await,
                ResourceKind::Curator => update_record::<Curator>(client, record_id, &values).await,
            };
            match result {
                Ok(record) => NetworkResponse::Updated { id, kind, record },
                Err(error) => failed(id, kind, Operation::Update, error),
            }
        }

        NetworkCommand::Remove { id, kind, record_id } => {
            let result = match kind {
                ResourceKind::Museum => client.remove::<Museum>(record_id).await,
                ResourceKind::Curator => client.remove::<Curator>(record_id).await,
            };
            match result {
                Ok(()) => NetworkResponse::Removed { id, kind, record_id },
                Err(error) => failed(id, kind, Operation::Remove, error),
            }
        }

        NetworkCommand::FetchCuratorMuseums { id, curator_id } => {
            match client.museums_by_curator(curator_id).await {
                Ok(museums) => NetworkResponse::CuratorMuseums {
                    id,
                    museums: into_records(&museums),
                },
                Err(error) => failed(id, ResourceKind::Curator, Operation::CuratorMuseums, error),
            }
        }

        NetworkCommand::AssignCurator { id, museum_id, curator_id } => {
            match client.assign_curator(museum_id, curator_id).await {
                Ok(()) => NetworkResponse::CuratorAssigned { id, museum_id, curator_id },
                Err(error) => failed(id, ResourceKind::Museum, Operation::AssignCurator, error),
            }
        }

        NetworkCommand::UnassignCurator { id, museum_id, curator_id } => {
            match client.unassign_curator(museum_id, curator_id).await {
                Ok(()) => NetworkResponse::CuratorUnassigned { id, museum_id, curator_id },
                Err(error) => failed(id, ResourceKind::Museum, Operation::UnassignCurator, error),
            }
        }

        NetworkCommand::Shutdown => return None,
    };

    Some(response)
}

fn failed(id: u64, kind: ResourceKind, operation: Operation, error: ApiError) -> NetworkResponse {
    tracing::warn!(id, resource = %kind, ?operation, error = %error, "Call failed");
    NetworkResponse::Failed { id, kind, operation, error }
}

fn into_records<R: Resource>(items: &[R]) -> Vec<Record> {
    items
        .iter()
        .filter_map(|item| {
            let record = item.to_record();
            if record.is_none() {
                tracing::warn!(resource = %R::KIND, ?item, "Skipping record without id");
            }
            record
        })
        .collect()
}

async fn fetch_records<R: Resource>(client: &ApiClient) -> Result<Vec<Record>, ApiError> {
    let items = client.fetch_all::<R>().await?;
    Ok(into_records(&items))
}

async fn create_record<R: Resource>(client: &ApiClient, values: &FieldValues) -> Result<Record, ApiError> {
    let created = client.create(&R::from_values(values)).await?;
    created
        .to_record()
        .ok_or_else(|| ApiError::Decode(format!("created {} came back without an id", R::KIND)))
}

async fn update_record<R: Resource>(
    client: &ApiClient,
    record_id: RecordId,
    values: &FieldValues,
) -> Result<Record, ApiError> {
    let updated = client.update(record_id, &R::from_values(values)).await?;
    Ok(Record::new(updated.id().unwrap_or(record_id), updated.field_values()))
}
