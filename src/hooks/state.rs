use std::fmt;
use std::marker::PhantomData;
use std::rc::Weak;

use super::Instance;

/// Setter returned by [`Hooks::use_state`](super::Hooks::use_state).
///
/// Setters are plain values: clone them into event listeners freely. A
/// setter outliving its root, or its slot (the root rendered a different
/// component or was unmounted), does nothing.
pub struct SetState<T> {
    instance: Weak<Instance>,
    index: usize,
    epoch: u64,
    _marker: PhantomData<fn(T)>,
}

impl<T> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            instance: self.instance.clone(),
            index: self.index,
            epoch: self.epoch,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for SetState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetState")
            .field("index", &self.index)
            .field("epoch", &self.epoch)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> SetState<T> {
    pub(super) fn new(instance: Weak<Instance>, index: usize, epoch: u64) -> Self {
        Self {
            instance,
            index,
            epoch,
            _marker: PhantomData,
        }
    }

    /// Replace the value. Re-renders unless `value` equals the current one.
    pub fn set(&self, value: T) {
        self.update(move |_| value);
    }

    /// Compute the next value from the current one. Re-renders unless the
    /// result equals the current value.
    ///
    /// `f` always sees the latest stored value, so consecutive updates fold:
    /// two `update(|n| n + 1)` calls add two.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let Some(instance) = self.instance.upgrade() else {
            log::warn!("state slot {} updated after its root was dropped", self.index);
            return;
        };
        if instance.epoch.get() != self.epoch {
            log::debug!("ignoring update to discarded state slot {}", self.index);
            return;
        }

        let Some(current) = self.read(&instance) else {
            return;
        };
        let next = f(&current);
        if next == current {
            log::trace!("state slot {} unchanged", self.index);
            return;
        }

        let replaced = instance
            .slots
            .borrow_mut()
            .get_mut(self.index)
            .map(|slot| std::mem::replace(&mut slot.value, Box::new(next)));
        drop(replaced);
        instance.request_render();
    }

    /// Current value of the slot, or `None` when the setter is stale.
    pub fn get(&self) -> Option<T> {
        let instance = self.instance.upgrade()?;
        if instance.epoch.get() != self.epoch {
            return None;
        }
        self.read(&instance)
    }

    fn read(&self, instance: &Instance) -> Option<T> {
        let slots = instance.slots.borrow();
        let value = slots
            .get(self.index)
            .and_then(|slot| slot.value.downcast_ref::<T>())
            .cloned();
        if value.is_none() {
            log::warn!(
                "state slot {} no longer holds `{}`",
                self.index,
                std::any::type_name::<T>()
            );
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use crate::hooks::Hooks;

    #[test]
    fn test_update_folds_in_call_order() {
        let hooks = Hooks::new();
        let set = {
            let _pass = hooks.begin_render();
            hooks.use_state(1).1
        };
        set.update(|n| n * 10);
        set.update(|n| n + 2);
        set.set(7);
        set.update(|n| n - 1);
        assert_eq!(set.get(), Some(6));
    }

    #[test]
    fn test_equal_value_does_not_queue_a_pass() {
        let hooks = Hooks::new();
        let _pass = hooks.begin_render();
        let (_, set) = hooks.use_state(String::from("same"));
        set.set(String::from("same"));
        assert!(!hooks.take_pending());
        set.update(|s| format!("{s}!"));
        assert!(hooks.take_pending());
    }

    #[test]
    fn test_stale_setter_is_ignored_after_reset() {
        let hooks = Hooks::new();
        let set = {
            let _pass = hooks.begin_render();
            hooks.use_state(1).1
        };
        hooks.reset();
        set.set(2);
        assert_eq!(set.get(), None);

        let _pass = hooks.begin_render();
        let (value, _) = hooks.use_state(10);
        assert_eq!(value, 10);
    }

    #[test]
    fn test_setter_survives_dropped_hooks() {
        let set = {
            let hooks = Hooks::new();
            let _pass = hooks.begin_render();
            hooks.use_state(0).1
        };
        set.set(1);
        assert_eq!(set.get(), None);
    }
}
