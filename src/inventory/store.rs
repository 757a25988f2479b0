use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use scopeguard::ScopeGuard;

use crate::inventory::error::SubmitError;
use crate::inventory::intent::InventoryIntent;
use crate::inventory::reducer::InventoryReducer;
use crate::inventory::state::InventoryState;
use crate::mvi::Reducer;
use crate::record::{FormMode, NewRecord, Record, RecordForm, RecordPatch};
use crate::remote::{RecordStore, StoreError};
use crate::view::{StatusCounts, StatusFilter};

/// View-model over a [`RecordStore`].
///
/// Each action makes one remote call and folds its outcome into
/// [`InventoryState`]. Failures are recorded as the current error and then
/// returned to the caller.
///
/// Actions take `&self`, so several may be in flight at once. List requests
/// (`refresh`, `search`) carry a token and only the latest one may replace
/// the list; writes always reconcile their own record.
pub struct Inventory<S> {
    store: Arc<S>,
    state: Mutex<InventoryState>,
}

impl<S: RecordStore> Inventory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            state: Mutex::new(InventoryState::default()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> InventoryState {
        self.state.lock().clone()
    }

    pub fn visible_items(&self) -> Vec<Record> {
        self.state.lock().visible_items()
    }

    pub fn counts(&self) -> StatusCounts {
        self.state.lock().counts()
    }

    fn dispatch(&self, intent: InventoryIntent) {
        let mut state = self.state.lock();
        let current = std::mem::take(&mut *state);
        *state = InventoryReducer::reduce(current, intent);
    }

    fn fail(&self, message: String) {
        self.dispatch(InventoryIntent::ActionFailed { message });
    }

    /// Issues the next list token and marks the list as loading.
    fn begin_listing(&self, query: Option<String>) -> u64 {
        let mut state = self.state.lock();
        let token = state.listing_token + 1;
        let current = std::mem::take(&mut *state);
        *state = InventoryReducer::reduce(
            current,
            InventoryIntent::ListingStarted { token, query },
        );
        token
    }

    async fn run_listing<F>(
        &self,
        query: Option<String>,
        request: F,
        context: &str,
    ) -> Result<(), StoreError>
    where
        F: Future<Output = Result<Vec<Record>, StoreError>>,
    {
        let token = self.begin_listing(query);
        // Clears `loading` if this future is dropped mid-request
        let pending = scopeguard::guard(token, |token| {
            self.dispatch(InventoryIntent::ListingAbandoned { token })
        });

        let result = request.await;
        let token = ScopeGuard::into_inner(pending);

        match result {
            Ok(items) => {
                tracing::debug!(token, count = items.len(), "List loaded");
                self.dispatch(InventoryIntent::ListingLoaded { token, items });
                Ok(())
            }
            Err(err) => {
                tracing::warn!(token, error = %err, "{context}");
                self.dispatch(InventoryIntent::ListingFailed {
                    token,
                    message: format!("{context}: {err}"),
                });
                Err(err)
            }
        }
    }

    /// Reloads the full list, newest first, and leaves search mode.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        self.run_listing(None, self.store.list_all(), "Failed to load records")
            .await
    }

    /// Replaces the list with search results and resets the status filter.
    ///
    /// Blank text returns to the full list.
    pub async fn search(&self, text: &str) -> Result<(), StoreError> {
        self.dispatch(InventoryIntent::FilterSelected {
            filter: StatusFilter::All,
        });

        let text = text.trim();
        if text.is_empty() {
            return self.refresh().await;
        }
        self.run_listing(
            Some(text.to_string()),
            self.store.search(text),
            "Search failed",
        )
        .await
    }

    /// Selects a status filter. An active search is dropped and the full
    /// list reloaded.
    pub async fn select_filter(&self, filter: StatusFilter) -> Result<(), StoreError> {
        let searching = self.state.lock().is_searching();
        self.dispatch(InventoryIntent::FilterSelected { filter });
        if searching {
            self.refresh().await
        } else {
            Ok(())
        }
    }

    pub async fn add(&self, payload: NewRecord) -> Result<Record, StoreError> {
        match self.store.create(&payload).await {
            Ok(record) => {
                self.dispatch(InventoryIntent::Created {
                    record: record.clone(),
                });
                Ok(record)
            }
            Err(err) => {
                self.fail(format!("Failed to add record: {err}"));
                Err(err)
            }
        }
    }

    pub async fn modify(&self, id: &str, patch: RecordPatch) -> Result<Record, StoreError> {
        match self.store.update(id, &patch).await {
            Ok(record) => {
                self.dispatch(InventoryIntent::Updated {
                    record: record.clone(),
                });
                Ok(record)
            }
            Err(err) => {
                self.fail(format!("Failed to update record: {err}"));
                Err(err)
            }
        }
    }

    /// Deletes a record. A record that is already gone is an error
    /// ([`StoreError::NotFound`]) and the local list is left as is.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        match self.store.delete(id).await {
            Ok(()) => {
                self.dispatch(InventoryIntent::Deleted { id: id.to_string() });
                Ok(())
            }
            Err(err) => {
                self.fail(format!("Failed to delete record: {err}"));
                Err(err)
            }
        }
    }

    /// Fetches one record for the detail view.
    pub async fn detail(&self, id: &str) -> Result<Record, StoreError> {
        self.store.get_by_id(id).await.inspect_err(|err| {
            self.fail(format!("Failed to load record: {err}"));
        })
    }

    /// Validates the form, then creates or updates.
    ///
    /// An invalid form never reaches the store. Editing sends every editable
    /// field.
    pub async fn submit(&self, mode: FormMode, form: &RecordForm) -> Result<Record, SubmitError> {
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.fail(format!("Invalid form: {errors}"));
                return Err(SubmitError::Invalid(errors));
            }
        };

        let record = match mode {
            FormMode::Create => self.add(payload).await?,
            FormMode::Edit { id } => self.modify(&id, RecordPatch::from(payload)).await?,
        };
        Ok(record)
    }
}
