//! Tab and form state of the admin panel.
//!
//! None of this is persisted. It drives which table is shown and what the
//! add/edit form submits.

use crate::catalog::DraftInput;
use crate::error::Result;
use crate::persistence::StorageBackend;
use crate::store::Store;
use crate::types::{Product, ProductId};

/// Which table is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Inventory,
    Sales,
}

/// Transient panel state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub tab: Tab,
    pub form_open: bool,
    /// Product being edited; `None` means the form adds a new one.
    pub editing: Option<ProductId>,
    pub fields: DraftInput,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Show or hide the form. Hiding it discards whatever was typed.
    pub fn toggle_form(&mut self) {
        if self.form_open {
            self.reset_form();
        } else {
            self.form_open = true;
        }
    }

    /// Open the form pre-filled with `product`.
    pub fn start_edit(&mut self, product: &Product) {
        self.editing = Some(product.id.clone());
        self.fields = DraftInput::from_product(product);
        self.form_open = true;
    }

    pub fn reset_form(&mut self) {
        self.fields = DraftInput::default();
        self.form_open = false;
        self.editing = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Send the form to the store: update when editing, add otherwise.
    ///
    /// The form closes once the change is in the catalog, including when
    /// only its write failed. A rejected change leaves the form open with
    /// its fields intact.
    pub fn submit<B: StorageBackend>(&mut self, store: &Store<B>) -> Result<Product> {
        let result = match self.editing {
            Some(ref id) => store.update(id, &self.fields),
            None => store.add(&self.fields),
        };
        match result {
            Ok(product) => {
                self.reset_form();
                Ok(product)
            }
            Err(e) => {
                if e.committed_product().is_some() {
                    self.reset_form();
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::persistence::MemoryStorage;
    use crate::types::Category;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Memory storage whose next `failures` writes fail.
    struct FlakyStorage {
        inner: MemoryStorage,
        failures: AtomicUsize,
    }

    impl StorageBackend for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            let pending = self.failures.load(Ordering::SeqCst);
            if pending > 0 {
                self.failures.store(pending - 1, Ordering::SeqCst);
                return Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            self.inner.set(key, value)
        }
    }

    fn store() -> Store<MemoryStorage> {
        Store::with_backend(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let view = ViewState::new();
        assert_eq!(view.tab, Tab::Inventory);
        assert!(!view.form_open);
        assert!(!view.is_editing());
        assert_eq!(view.fields.category, "Classic");
    }

    #[test]
    fn test_toggle_form_discards_fields() {
        let mut view = ViewState::new();
        view.toggle_form();
        assert!(view.form_open);
        view.fields.name = "Draft".into();

        view.toggle_form();
        assert!(!view.form_open);
        assert!(view.fields.name.is_empty());
    }

    #[test]
    fn test_submit_add_closes_form() {
        let store = store();
        let mut view = ViewState::new();
        view.toggle_form();
        view.fields = DraftInput::default()
            .name("Dot Grid")
            .category(Category::Cahier)
            .color("White")
            .price("11.00")
            .stock("40");

        let product = view.submit(&store).unwrap();
        assert_eq!(product.name, "Dot Grid");
        assert!(!view.form_open);
        assert_eq!(view.fields, DraftInput::default());
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_failed_submit_keeps_form_open() {
        let store = store();
        let mut view = ViewState::new();
        view.toggle_form();
        view.fields.name = "Half filled".into();

        assert!(view.submit(&store).is_err());
        assert!(view.form_open);
        assert_eq!(view.fields.name, "Half filled");
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_edit_flow() {
        let store = store();
        let mut view = ViewState::new();
        let product = store.get(&ProductId::from("2")).unwrap();

        view.start_edit(&product);
        assert!(view.form_open);
        assert_eq!(view.fields.price, "12.99");
        assert_eq!(view.fields.stock, "78");

        view.fields.stock = "10".into();
        let updated = view.submit(&store).unwrap();

        assert_eq!(updated.stock_quantity, 10);
        assert_eq!(updated.units_sold, 56);
        assert!(!view.is_editing());
    }

    #[test]
    fn test_edit_of_deleted_product_fails() {
        let store = store();
        let mut view = ViewState::new();
        let product = store.get(&ProductId::from("1")).unwrap();
        view.start_edit(&product);
        store.remove(&product.id).unwrap();

        let err = view.submit(&store).unwrap_err();
        assert!(err.is_no_op());
        assert!(view.form_open);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_failed_write_closes_form_and_resubmit_does_not_duplicate() {
        let storage = FlakyStorage {
            inner: MemoryStorage::new(),
            failures: AtomicUsize::new(0),
        };
        let store = Store::with_backend(storage).unwrap();
        let mut view = ViewState::new();
        view.toggle_form();
        view.fields = DraftInput::default()
            .name("Once Only")
            .color("Plum")
            .price("8")
            .stock("5");

        store.backend().failures.store(1, Ordering::SeqCst);
        let err = view.submit(&store).unwrap_err();
        let created = err.committed_product().unwrap().clone();
        assert_eq!(created.name, "Once Only");
        assert!(!view.form_open);
        assert_eq!(view.fields, DraftInput::default());
        assert_eq!(store.len(), 5);

        // A second submit sends the now-empty form and is rejected
        assert!(view.submit(&store).unwrap_err().is_no_op());
        let copies = store
            .catalog()
            .iter()
            .filter(|p| p.name == "Once Only")
            .count();
        assert_eq!(copies, 1);
        assert_eq!(store.get(&created.id), Some(created));
    }
}
