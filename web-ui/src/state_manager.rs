// Catalog State Manager - owns store, edit session and search inputs.
// The app renders from it and calls into it; no egui types in here.

use std::sync::{Arc, Mutex};

use catalog_core::session::SaveTicket;
use catalog_core::{
    CatalogConfig, CatalogError, CatalogStore, Category, CollectionClient, CollectionService,
    EditSession, Product, ProductFilter, ProductId, ProductRow, SubmitError,
};

use crate::wasm_utils;

/// Results of background requests, applied on the next frame.
#[derive(Debug)]
pub enum AsyncEvent {
    ProductsFetched {
        request: u64,
        fetched: Result<Vec<Product>, CatalogError>,
    },
    CategoriesFetched {
        request: u64,
        fetched: Result<Vec<Category>, CatalogError>,
    },
    SaveFinished {
        ticket: SaveTicket,
        outcome: Result<(), CatalogError>,
    },
}

type Inbox = Arc<Mutex<Vec<AsyncEvent>>>;

/// Fetches of one collection that may overlap (manual reload plus the
/// refresh after a save). Counts replies still out and drops replies older
/// than the newest one already applied.
#[derive(Debug, Clone, Default)]
pub struct FetchTracker {
    issued: u64,
    applied: u64,
    in_flight: usize,
}

impl FetchTracker {
    /// Registers a new request and returns its number.
    pub fn start(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight += 1;
        self.issued
    }

    /// Registers the reply to `request`. Returns false when a newer reply has
    /// already been applied.
    pub fn finish(&mut self, request: u64) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        if request <= self.applied {
            return false;
        }
        self.applied = request;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

pub struct CatalogStateManager {
    // ---- Core state ----
    pub store: CatalogStore,
    pub session: EditSession,
    pub filter: ProductFilter,

    // ---- Request tracking ----
    pub product_fetches: FetchTracker,
    pub category_fetches: FetchTracker,

    // ---- Internal ----
    client: CollectionClient,
    inbox: Inbox,
}

impl CatalogStateManager {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            store: CatalogStore::new(),
            session: EditSession::from_config(&config.ui),
            filter: ProductFilter::default(),
            product_fetches: FetchTracker::default(),
            category_fetches: FetchTracker::default(),
            client: CollectionClient::from_config(&config.service),
            inbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn service_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn rows(&self) -> Vec<ProductRow<'_>> {
        self.store.rows(&self.filter)
    }

    pub fn is_loading(&self) -> bool {
        self.product_fetches.is_loading()
            || self.category_fetches.is_loading()
            || self.session.is_submitting()
    }

    // ============================================
    // PUBLIC API - UI calls these methods
    // ============================================

    pub fn load_all(&mut self) {
        self.load_products();
        self.load_categories();
    }

    pub fn load_products(&mut self) {
        let request = self.product_fetches.start();
        let client = self.client.clone();
        let inbox = self.inbox.clone();

        wasm_utils::spawn_async(async move {
            let fetched = client.list_products().await;
            post(&inbox, AsyncEvent::ProductsFetched { request, fetched });
        });
    }

    pub fn load_categories(&mut self) {
        let request = self.category_fetches.start();
        let client = self.client.clone();
        let inbox = self.inbox.clone();

        wasm_utils::spawn_async(async move {
            let fetched = client.list_categories().await;
            post(&inbox, AsyncEvent::CategoriesFetched { request, fetched });
        });
    }

    pub fn add_product(&mut self) {
        if let Err(e) = self.session.open_new() {
            log::warn!("Cannot add product: {}", e);
        }
    }

    pub fn edit_product(&mut self, id: &ProductId) {
        let Some(product) = self.store.product(id) else {
            log::warn!("Cannot edit product {}: no longer in the catalog", id);
            return;
        };
        if let Err(e) = self.session.open_existing(product) {
            log::warn!("Cannot edit product {}: {}", id, e);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    pub fn dismiss_notice(&mut self) {
        self.session.dismiss_notice();
    }

    pub fn clear_filter(&mut self) {
        self.filter = ProductFilter::default();
    }

    /// Validate the draft and, if it passes, send it in the background.
    pub fn submit(&mut self) {
        let request =
            match self.session.begin_submit(wasm_utils::today(), wasm_utils::now_timestamp()) {
                Ok(request) => request,
                Err(SubmitError::Invalid(_)) => return,
                Err(e) => {
                    log::debug!("Submit ignored: {}", e);
                    return;
                }
            };

        let client = self.client.clone();
        let inbox = self.inbox.clone();

        wasm_utils::spawn_async(async move {
            let outcome = request.send(&client).await;
            post(
                &inbox,
                AsyncEvent::SaveFinished {
                    ticket: request.ticket,
                    outcome,
                },
            );
        });
    }

    // ============================================
    // INTERNAL - async results
    // ============================================

    /// Drain finished requests and run the notice timer. Called every frame.
    pub fn update_from_async(&mut self, now_ms: u64) {
        let events = match self.inbox.lock() {
            Ok(mut inbox) => std::mem::take(&mut *inbox),
            Err(e) => {
                log::error!("Async inbox poisoned: {}", e);
                Vec::new()
            }
        };

        for event in events {
            self.handle_event(event, now_ms);
        }

        self.session.tick(now_ms);
    }

    pub fn handle_event(&mut self, event: AsyncEvent, now_ms: u64) {
        match event {
            AsyncEvent::ProductsFetched { request, fetched } => {
                if self.product_fetches.finish(request) {
                    self.store.apply_products(fetched);
                } else {
                    log::debug!("Dropping stale product fetch #{}", request);
                }
            }
            AsyncEvent::CategoriesFetched { request, fetched } => {
                if self.category_fetches.finish(request) {
                    self.store.apply_categories(fetched);
                } else {
                    log::debug!("Dropping stale category fetch #{}", request);
                }
            }
            AsyncEvent::SaveFinished { ticket, outcome } => {
                if self.session.complete_submit(ticket, outcome, now_ms).is_ok() {
                    self.load_products();
                }
            }
        }
    }
}

fn post(inbox: &Inbox, event: AsyncEvent) {
    match inbox.lock() {
        Ok(mut events) => events.push(event),
        Err(e) => log::error!("Dropping async result, inbox poisoned: {}", e),
    }
}
