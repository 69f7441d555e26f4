//! Scoped value overrides that unwind in any order.
//!
//! [`OrderedGuard`] holds a value that callers temporarily override. Each
//! override returns a [`GuardHolder`]; dropping it undoes that override even
//! when holders are dropped out of order. The value only returns to its
//! pre-override state once every holder is gone.
//!
//! The widget layer uses one of these as the global "UI interaction enabled"
//! switch so that, for example, a modal dialog and a teleport can both disable
//! interaction without stepping on each other.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct HolderEntry<T> {
    id: u64,
    original: T,
}

struct GuardState<T> {
    value: T,
    holders: Vec<HolderEntry<T>>,
    next_id: u64,
}

/// A value with stacked, order-insensitive scoped overrides.
///
/// Clones share the same state.
pub struct OrderedGuard<T> {
    state: Rc<RefCell<GuardState<T>>>,
}

impl<T> Clone for OrderedGuard<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Clone> OrderedGuard<T> {
    /// Create a guard with an initial value and no overrides.
    pub fn new(value: T) -> Self {
        Self {
            state: Rc::new(RefCell::new(GuardState {
                value,
                holders: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Current value.
    pub fn value(&self) -> T {
        self.state.borrow().value.clone()
    }

    /// Number of live overrides.
    pub fn depth(&self) -> usize {
        self.state.borrow().holders.len()
    }

    /// Override the value until the returned holder is dropped.
    #[must_use = "the override is undone as soon as the holder is dropped"]
    pub fn set_value(&self, value: T) -> GuardHolder<T> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let original = std::mem::replace(&mut state.value, value);
        state.holders.push(HolderEntry { id, original });
        GuardHolder {
            state: Rc::clone(&self.state),
            id,
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for OrderedGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedGuard")
            .field("value", &self.value())
            .field("depth", &self.depth())
            .finish()
    }
}

/// Live override of an [`OrderedGuard`].
pub struct GuardHolder<T> {
    state: Rc<RefCell<GuardState<T>>>,
    id: u64,
}

impl<T> Drop for GuardHolder<T> {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        let Some(index) = state.holders.iter().position(|h| h.id == self.id) else {
            return;
        };
        let entry = state.holders.remove(index);
        if index < state.holders.len() {
            // A later override is still live: it now owns our saved value.
            state.holders[index].original = entry.original;
        } else {
            state.value = entry.original;
        }
    }
}

impl<T> fmt::Debug for GuardHolder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardHolder").field("id", &self.id).finish()
    }
}
