//! Category ordering board with optimistic-then-reconcile updates.
//!
//! The board keeps the server-confirmed order and, while a reorder is in
//! flight, a provisional order shown instead. A successful write promotes the
//! provisional order; a failed write discards it and re-fetches the
//! authoritative order from the server.

use tourbook_core::reorder::move_item;
use tourbook_core::types::DbId;
use tourbook_db::models::category::Category;

use crate::client::CatalogApi;
use crate::error::ClientError;

#[derive(Debug, Clone, Default)]
pub struct CategoryBoard {
    confirmed: Vec<Category>,
    provisional: Option<Vec<Category>>,
}

impl CategoryBoard {
    pub fn new(confirmed: Vec<Category>) -> Self {
        Self {
            confirmed,
            provisional: None,
        }
    }

    /// Fetch the current order from the server.
    pub async fn load(api: &dyn CatalogApi) -> Result<Self, ClientError> {
        Ok(Self::new(api.list_categories().await?))
    }

    /// What the screen shows: the provisional order if one is pending.
    pub fn view(&self) -> &[Category] {
        self.provisional.as_deref().unwrap_or(&self.confirmed)
    }

    pub fn confirmed(&self) -> &[Category] {
        &self.confirmed
    }

    pub fn is_provisional(&self) -> bool {
        self.provisional.is_some()
    }

    /// Apply a drag from `from` to `to` locally and return the id order to
    /// send to the server.
    pub fn propose(&mut self, from: usize, to: usize) -> Result<Vec<DbId>, ClientError> {
        let mut next = self.view().to_vec();
        move_item(&mut next, from, to)?;
        renumber(&mut next);
        let ids = next.iter().map(|c| c.id).collect();
        self.provisional = Some(next);
        Ok(ids)
    }

    /// Send the provisional order and settle the board on the outcome.
    ///
    /// On failure the provisional order is dropped and the confirmed order
    /// is re-fetched; the write error is returned either way.
    pub async fn commit(&mut self, api: &dyn CatalogApi) -> Result<u64, ClientError> {
        let Some(pending) = self.provisional.as_ref() else {
            return Ok(0);
        };
        let ids: Vec<DbId> = pending.iter().map(|c| c.id).collect();

        match api.reorder_categories(&ids).await {
            Ok(updated) => {
                if let Some(pending) = self.provisional.take() {
                    self.confirmed = pending;
                }
                tracing::debug!(updated, "Category order confirmed");
                Ok(updated)
            }
            Err(write_err) => {
                self.provisional = None;
                tracing::warn!(error = %write_err, "Reorder failed, reloading categories");
                match api.list_categories().await {
                    Ok(fresh) => self.confirmed = fresh,
                    Err(e) => {
                        tracing::warn!(error = %e, "Could not reload categories after failed reorder");
                    }
                }
                Err(write_err)
            }
        }
    }

    /// [`propose`](Self::propose) followed by [`commit`](Self::commit).
    pub async fn move_category(
        &mut self,
        api: &dyn CatalogApi,
        from: usize,
        to: usize,
    ) -> Result<u64, ClientError> {
        self.propose(from, to)?;
        self.commit(api).await
    }
}

fn renumber(categories: &mut [Category]) {
    for (position, category) in (1..).zip(categories.iter_mut()) {
        category.sequence = position;
    }
}
