//! Application State Stores
//!
//! Each store is a plain, explicitly owned state value. Actions reach it
//! through [`StoreCell`] and never hold a borrow across an `.await`, so
//! overlapping calls are allowed and the last one to settle wins.

mod todo;
mod broker;
mod view;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

pub use todo::*;
pub use broker::*;
pub use view::*;

/// Single-writer access to a state value
pub trait StoreCell<T> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;

    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> R;
}

/// Reactive cell used by the UI
impl<T: Send + Sync + 'static> StoreCell<T> for RwSignal<T> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.write();
        f(&mut guard)
    }

    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.with_untracked(f)
    }
}

/// Non-reactive cell for tests and headless hosts
impl<T> StoreCell<T> for Rc<RefCell<T>> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.borrow())
    }
}
