use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::backend::Backend;
use crate::catalog_actor::{CatalogActor, CatalogError, CatalogSnapshot};
use crate::clients::{CatalogSync, FetchOutcome};
use crate::domain::{Bill, ProductDraft, ProductId};
use crate::view::{
    render, BillPopup, DeleteModal, DeletePrompt, EditModal, RenderedTable, TableSurface, ViewError,
};

/// The catalog page: state, synchronizer, rendered table and popups.
///
/// Every user action follows the same path: backend call, full refetch,
/// re-render. Operations on rows or popups that are not there are logged and
/// ignored; the page keeps showing its last good state.
pub struct CatalogApp<S: TableSurface> {
    sync: CatalogSync,
    updates: watch::Receiver<CatalogSnapshot>,
    surface: S,
    table: RenderedTable,
    add_form: ProductDraft,
    edit_modal: EditModal,
    delete_modal: DeleteModal,
    bill_popup: BillPopup,
    actor_handle: JoinHandle<()>,
}

impl<S: TableSurface> CatalogApp<S> {
    /// Starts the catalog actor and performs the initial fetch.
    pub async fn start(backend: Arc<dyn Backend>, surface: S) -> Result<Self, CatalogError> {
        let (actor, catalog) = CatalogActor::new(32);
        let actor_handle = tokio::spawn(actor.run());
        let updates = catalog.subscribe().await?;

        let mut app = Self {
            sync: CatalogSync::new(backend, catalog),
            updates,
            surface,
            table: RenderedTable::default(),
            add_form: ProductDraft::default(),
            edit_modal: EditModal::default(),
            delete_modal: DeleteModal::default(),
            bill_popup: BillPopup::default(),
            actor_handle,
        };
        app.refresh().await;
        Ok(app)
    }

    /// Re-renders if the catalog moved on since the last render.
    fn render_if_changed(&mut self) {
        if !self.updates.has_changed().unwrap_or(false) {
            return;
        }
        let snapshot = self.updates.borrow_and_update().clone();
        self.table = render(&snapshot, &mut self.surface);
    }

    fn log_view_error(e: ViewError) {
        warn!(error = %e, "View target missing");
    }

    /// Refetches the full list and re-renders.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> FetchOutcome {
        let outcome = self.sync.fetch_all().await;
        self.render_if_changed();
        outcome
    }

    pub fn sync(&self) -> &CatalogSync {
        &self.sync
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn table(&self) -> &RenderedTable {
        &self.table
    }

    // --- Add form ---

    pub fn add_form(&self) -> &ProductDraft {
        &self.add_form
    }

    pub fn add_form_mut(&mut self) -> &mut ProductDraft {
        &mut self.add_form
    }

    /// Submits the add form. The form is reset whatever the outcome.
    #[instrument(skip(self))]
    pub async fn submit_product(&mut self) -> FetchOutcome {
        let draft = std::mem::take(&mut self.add_form);
        let outcome = self.sync.create(draft).await;
        self.render_if_changed();
        outcome
    }

    // --- Quantity selection ---

    /// Shows or hides the quantity input of a row. Returns the new visibility.
    pub fn toggle_quantity(&mut self, id: ProductId) -> Option<bool> {
        match self.table.row_mut(id) {
            Ok(row) => Some(row.quantity_mut().toggle()),
            Err(e) => {
                Self::log_view_error(e);
                None
            }
        }
    }

    /// Writes raw text into a row's quantity input. Returns whether the row exists.
    pub fn set_quantity(&mut self, id: ProductId, raw: &str) -> bool {
        match self.table.row_mut(id) {
            Ok(row) => {
                row.quantity_mut().set_input(raw);
                true
            }
            Err(e) => {
                Self::log_view_error(e);
                false
            }
        }
    }

    // --- Edit popup ---

    /// Opens the edit form pre-filled from the product's current fields.
    pub fn open_edit(&mut self, id: ProductId) -> bool {
        let draft = match self.table.row(id) {
            Ok(row) => ProductDraft::from(row.product()),
            Err(e) => {
                Self::log_view_error(e);
                return false;
            }
        };
        self.edit_modal.open(id, draft);
        true
    }

    pub fn edit_modal(&self) -> &EditModal {
        &self.edit_modal
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut ProductDraft> {
        self.edit_modal.content_mut()
    }

    /// Sends the edited fields for the bound product and closes the popup.
    #[instrument(skip(self))]
    pub async fn confirm_edit(&mut self) -> Option<FetchOutcome> {
        let Some((id, draft)) = self.edit_modal.confirm() else {
            Self::log_view_error(ViewError::NotOpen("Edit"));
            return None;
        };
        let outcome = self.sync.update(id, draft).await;
        self.render_if_changed();
        Some(outcome)
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.edit_modal.cancel()
    }

    // --- Delete popup ---

    pub fn open_delete(&mut self, id: ProductId) -> bool {
        let prompt = match self.table.row(id) {
            Ok(row) => DeletePrompt::for_product(row.product()),
            Err(e) => {
                Self::log_view_error(e);
                return false;
            }
        };
        self.delete_modal.open(id, prompt);
        true
    }

    pub fn delete_modal(&self) -> &DeleteModal {
        &self.delete_modal
    }

    /// Deletes the bound product and closes the popup.
    #[instrument(skip(self))]
    pub async fn confirm_delete(&mut self) -> Option<FetchOutcome> {
        let Some((id, _)) = self.delete_modal.confirm() else {
            Self::log_view_error(ViewError::NotOpen("Delete"));
            return None;
        };
        let outcome = self.sync.remove(id).await;
        self.render_if_changed();
        Some(outcome)
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.delete_modal.cancel()
    }

    // --- Bill ---

    /// Computes the bill from the quantities on screen and opens the bill popup.
    pub fn generate_bill(&mut self) -> &Bill {
        let bill = self.table.bill();
        info!(lines = bill.lines().len(), total = %bill.total_text(), "Bill generated");
        self.bill_popup.open(bill)
    }

    pub fn bill_popup(&self) -> &BillPopup {
        &self.bill_popup
    }

    pub fn close_bill(&mut self) -> bool {
        self.bill_popup.close()
    }

    /// Stops the catalog actor and waits for it to finish.
    ///
    /// Clones of [`CatalogSync`] taken through [`CatalogApp::sync`] do not keep
    /// the actor alive; their later fetches keep a stale list.
    pub async fn shutdown(self) -> Result<(), CatalogError> {
        info!("Shutting down catalog...");
        if let Err(e) = self.sync.catalog().shutdown().await {
            warn!(error = %e, "Catalog actor already stopped");
        }
        drop(self.sync);
        drop(self.updates);

        if let Err(e) = self.actor_handle.await {
            error!("Catalog actor failed: {:?}", e);
            return Err(CatalogError::TaskFailed(e.to_string()));
        }
        info!("Catalog shutdown complete.");
        Ok(())
    }
}
