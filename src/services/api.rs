use anyhow::Result;
use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::api::{CatalogClient, Draft, ImageUpload, Listing};
use crate::config::EndpointGroup;
use crate::log_debug;
use crate::model::Route;
use crate::Entity;

/// Screen a request belongs to; a screen has at most one request in flight
/// per login session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RequestKey {
    session: u64,
    route: Route,
}

/// API request types
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// Create a record from an add screen
    Create {
        draft: Draft,
        image: PathBuf,
    },

    /// Look up a record by ID for a modify or delete screen
    Fetch {
        entity: Entity,
        group: EndpointGroup,
        id: String,
    },

    /// Replace a record from a modify screen
    Update {
        id: String,
        draft: Draft,
        image: Option<PathBuf>,
    },

    Delete {
        entity: Entity,
        id: String,
    },

    /// Load a listing for the data browser
    List {
        entity: Entity,
        page: Option<(u32, u32)>,
    },
}

impl ApiRequest {
    /// Screen that issued this request
    pub fn route(&self) -> Route {
        match self {
            ApiRequest::Create { draft, .. } => Route::Add(draft.entity()),
            ApiRequest::Fetch {
                entity,
                group: EndpointGroup::Delete,
                ..
            } => Route::Delete(*entity),
            ApiRequest::Fetch { entity, .. } => Route::Modify(*entity),
            ApiRequest::Update { draft, .. } => Route::Modify(draft.entity()),
            ApiRequest::Delete { entity, .. } => Route::Delete(*entity),
            ApiRequest::List { .. } => Route::DataBrowser,
        }
    }

}

/// Request tagged with the login session that issued it
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub session: u64,
    pub request: ApiRequest,
}

impl SessionRequest {
    fn key(&self) -> RequestKey {
        RequestKey {
            session: self.session,
            route: self.request.route(),
        }
    }
}

/// Response carrying the session of the request it answers
#[derive(Debug)]
pub struct SessionResponse {
    pub session: u64,
    pub response: ApiResponse,
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    CreateResult {
        entity: Entity,
        result: Result<u16>,
    },

    FetchResult {
        entity: Entity,
        group: EndpointGroup,
        id: String,
        record: Result<Option<Value>>,
    },

    UpdateResult {
        entity: Entity,
        id: String,
        result: Result<u16>,
    },

    DeleteResult {
        entity: Entity,
        id: String,
        result: Result<u16>,
    },

    ListResult {
        entity: Entity,
        listing: Result<Listing>,
    },
}

/// Internal message for tracking completed requests
pub(crate) enum InternalMessage {
    Completed(RequestKey),
}

/// API service worker that processes requests in the background
pub struct ApiService {
    client: CatalogClient,
    request_queue: VecDeque<SessionRequest>,
    in_flight: HashSet<RequestKey>,
    response_tx: mpsc::UnboundedSender<SessionResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
}

impl ApiService {
    pub(crate) fn new(
        client: CatalogClient,
        response_tx: mpsc::UnboundedSender<SessionResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            response_tx,
            completion_tx,
        }
    }

    /// Queue a request unless its screen already has one pending
    fn enqueue(&mut self, request: SessionRequest) {
        let key = request.key();
        let queued = self.request_queue.iter().any(|r| r.key() == key);
        if self.in_flight.contains(&key) || queued {
            log_debug(&format!(
                "DEBUG [API Service]: Dropping request for busy screen {:?} (session {})",
                key.route, key.session
            ));
            return;
        }
        self.request_queue.push_back(request);
    }

    /// Start the next queued request
    fn process_next(&mut self) {
        let Some(request) = self.request_queue.pop_front() else {
            return;
        };

        let key = request.key();
        self.in_flight.insert(key);

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        // No per-request retries; the user resubmits
        tokio::spawn(async move {
            let response = Self::execute_request(&client, request.request).await;
            let _ = response_tx.send(SessionResponse {
                session: request.session,
                response,
            });
            let _ = completion_tx.send(InternalMessage::Completed(key));
        });
    }

    /// Execute an API request and return the response
    pub(crate) async fn execute_request(client: &CatalogClient, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::Create { draft, image } => {
                let entity = draft.entity();
                log_debug(&format!(
                    "DEBUG [API Service Create]: START entity={} image={}",
                    entity.as_str(),
                    image.display()
                ));
                let result = match ImageUpload::load(&image).await {
                    Ok(upload) => client.create(&draft, upload).await,
                    Err(e) => Err(e),
                };
                log_debug(&format!(
                    "DEBUG [API Service Create]: END entity={} result={:?}",
                    entity.as_str(),
                    result.as_ref().map_err(|e| format!("{:#}", e))
                ));

                ApiResponse::CreateResult { entity, result }
            }

            ApiRequest::Fetch { entity, group, id } => {
                log_debug(&format!(
                    "DEBUG [API Service Fetch]: entity={} group={:?} id={}",
                    entity.as_str(),
                    group,
                    id
                ));
                let record = client.fetch(entity, group, &id).await.map_err(|e| {
                    log_debug(&format!(
                        "DEBUG [API Service Fetch]: ERROR entity={} id={} error={:#}",
                        entity.as_str(),
                        id,
                        e
                    ));
                    e
                });

                ApiResponse::FetchResult {
                    entity,
                    group,
                    id,
                    record,
                }
            }

            ApiRequest::Update { id, draft, image } => {
                let entity = draft.entity();
                let upload = match image {
                    Some(path) => match ImageUpload::load(&path).await {
                        Ok(upload) => Ok(Some(upload)),
                        Err(e) => Err(e),
                    },
                    None => Ok(None),
                };
                let result = match upload {
                    Ok(upload) => client.update(&id, &draft, upload).await,
                    Err(e) => Err(e),
                };
                log_debug(&format!(
                    "DEBUG [API Service Update]: entity={} id={} result={:?}",
                    entity.as_str(),
                    id,
                    result.as_ref().map_err(|e| format!("{:#}", e))
                ));

                ApiResponse::UpdateResult { entity, id, result }
            }

            ApiRequest::Delete { entity, id } => {
                let result = client.delete(entity, &id).await;
                log_debug(&format!(
                    "DEBUG [API Service Delete]: entity={} id={} result={:?}",
                    entity.as_str(),
                    id,
                    result.as_ref().map_err(|e| format!("{:#}", e))
                ));

                ApiResponse::DeleteResult { entity, id, result }
            }

            ApiRequest::List { entity, page } => {
                let listing = client.list(entity, page).await;
                log_debug(&format!(
                    "DEBUG [API Service List]: entity={} page={:?} rows={:?}",
                    entity.as_str(),
                    page,
                    listing.as_ref().map(|l| l.items.len()).map_err(|e| format!("{:#}", e))
                ));

                ApiResponse::ListResult { entity, listing }
            }
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: CatalogClient,
) -> (
    mpsc::UnboundedSender<SessionRequest>,
    mpsc::UnboundedReceiver<SessionResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<SessionRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<SessionResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);

        // Ticker for processing queue
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(request) => service.enqueue(request),
                        // UI side is gone
                        None => break,
                    }
                }

                Some(InternalMessage::Completed(key)) = completion_rx.recv() => {
                    service.in_flight.remove(&key);
                }

                _ = tick.tick() => {
                    while !service.request_queue.is_empty() {
                        service.process_next();
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}
