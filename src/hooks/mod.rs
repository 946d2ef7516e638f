//! Hook state for a mounted component.
//!
//! Each root owns one component instance record: an ordered list of typed
//! slots, a cursor counting `use_state` calls in the current pass and a few
//! state flags. The root hands the component a [`Hooks`] handle to that
//! record on every pass.
//!
//! ## Slot identity
//!
//! A slot is addressed purely by call order. The `n`-th `use_state` call of a
//! pass always reads and writes slot `n`, whatever initial value it passes.
//! Calling hooks conditionally breaks that mapping; when the types no longer
//! line up it is reported as [`HookError::SlotTypeMismatch`].
//!
//! ## Updates during rendering
//!
//! A setter called while the component is rendering stores the new value and
//! queues one more pass, which the root runs once the current pass is done.

mod shared;
mod state;

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use bitflags::bitflags;

pub use shared::Shared;
pub use state::SetState;

use crate::error::HookError;

bitflags! {
    /// Render state of a component instance
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct HookFlags: u8 {
        /// A render pass is running; `use_state` is allowed
        const RENDERING      = 0b01;
        /// State changed during the running pass; another pass is owed
        const UPDATE_PENDING = 0b10;
    }
}

/// Something that can run a render pass on request.
pub(crate) trait Schedule {
    fn schedule_render(&self);
}

struct Slot {
    value: Box<dyn Any>,
    type_name: &'static str,
}

pub(crate) struct Instance {
    slots: RefCell<Vec<Slot>>,
    cursor: Cell<usize>,
    flags: Cell<HookFlags>,
    /// Type of the component the slots belong to
    identity: Cell<Option<TypeId>>,
    /// Bumped whenever the slots are discarded, invalidating old setters
    epoch: Cell<u64>,
    scheduler: RefCell<Option<Weak<dyn Schedule>>>,
}

impl Instance {
    fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            cursor: Cell::new(0),
            flags: Cell::new(HookFlags::empty()),
            identity: Cell::new(None),
            epoch: Cell::new(0),
            scheduler: RefCell::new(None),
        }
    }

    fn insert_flags(&self, flags: HookFlags) {
        self.flags.set(self.flags.get() | flags);
    }

    fn remove_flags(&self, flags: HookFlags) {
        self.flags.set(self.flags.get() - flags);
    }

    /// Ask for a new pass after an accepted state change.
    fn request_render(&self) {
        if self.flags.get().contains(HookFlags::RENDERING) {
            log::debug!("state changed while rendering; queueing another pass");
            self.insert_flags(HookFlags::UPDATE_PENDING);
            return;
        }

        let attached = self.scheduler.borrow().clone();
        match attached {
            Some(weak) => match weak.upgrade() {
                Some(scheduler) => scheduler.schedule_render(),
                None => log::warn!("state changed after its root was dropped; nothing to re-render"),
            },
            None => log::debug!("state changed on a detached component; nothing to re-render"),
        }
    }
}

/// Handle to a component's hook state, passed to the component on every render.
///
/// Cloning is cheap and yields a handle to the same record.
#[derive(Clone)]
pub struct Hooks {
    instance: Rc<Instance>,
}

impl Hooks {
    pub(crate) fn new() -> Self {
        Self {
            instance: Rc::new(Instance::new()),
        }
    }

    pub(crate) fn attach(&self, scheduler: Weak<dyn Schedule>) {
        *self.instance.scheduler.borrow_mut() = Some(scheduler);
    }

    /// Take ownership of the slots for component type `identity`.
    ///
    /// Returns `true` when the slots were discarded because a different
    /// component type is now being rendered.
    pub(crate) fn adopt(&self, identity: TypeId) -> bool {
        if self.instance.identity.get() == Some(identity) {
            return false;
        }
        let had_component = self.instance.identity.get().is_some();
        self.reset();
        self.instance.identity.set(Some(identity));
        had_component
    }

    /// Drop every slot and forget the component identity.
    pub(crate) fn reset(&self) {
        let discarded = std::mem::take(&mut *self.instance.slots.borrow_mut());
        self.instance.identity.set(None);
        self.instance.epoch.set(self.instance.epoch.get() + 1);
        self.instance.cursor.set(0);
        self.instance.remove_flags(HookFlags::UPDATE_PENDING);
        // State values are arbitrary user types; drop them outside the borrow.
        drop(discarded);
    }

    /// Enter the rendering state. Leaves it when the guard is dropped.
    pub(crate) fn begin_render(&self) -> RenderGuard<'_> {
        self.instance.cursor.set(0);
        self.instance.insert_flags(HookFlags::RENDERING);
        RenderGuard { hooks: self }
    }

    /// Whether a pass was requested while the last one was running. Clears the request.
    pub(crate) fn take_pending(&self) -> bool {
        let pending = self.instance.flags.get().contains(HookFlags::UPDATE_PENDING);
        self.instance.remove_flags(HookFlags::UPDATE_PENDING);
        pending
    }

    /// Whether the component is currently rendering.
    pub fn is_rendering(&self) -> bool {
        self.instance.flags.get().contains(HookFlags::RENDERING)
    }

    /// Number of slots seeded so far.
    pub fn slot_count(&self) -> usize {
        self.instance.slots.borrow().len()
    }

    /// Declare a piece of state.
    ///
    /// The first pass stores `initial` in this call's slot; later passes
    /// return the stored value and ignore `initial`. The returned
    /// [`SetState`] changes the slot and re-renders.
    ///
    /// # Errors
    ///
    /// [`HookError::OutsideRender`] when no pass is running, and
    /// [`HookError::SlotTypeMismatch`] when this call's slot was seeded with a
    /// different type (the hook call order changed between passes).
    pub fn try_use_state<T>(&self, initial: T) -> Result<(T, SetState<T>), HookError>
    where
        T: Clone + PartialEq + 'static,
    {
        if !self.is_rendering() {
            return Err(HookError::OutsideRender);
        }

        let index = self.instance.cursor.get();
        self.instance.cursor.set(index + 1);

        let mut slots = self.instance.slots.borrow_mut();
        if index >= slots.len() {
            log::trace!("seeding hook slot {index} with `{}`", std::any::type_name::<T>());
            slots.push(Slot {
                value: Box::new(initial),
                type_name: std::any::type_name::<T>(),
            });
        }

        let slot = &slots[index];
        let value = slot
            .value
            .downcast_ref::<T>()
            .ok_or(HookError::SlotTypeMismatch {
                index,
                expected: std::any::type_name::<T>(),
                found: slot.type_name,
            })?
            .clone();

        Ok((
            value,
            SetState::new(Rc::downgrade(&self.instance), index, self.instance.epoch.get()),
        ))
    }

    /// Declare a piece of state. See [`Hooks::try_use_state`].
    ///
    /// # Panics
    ///
    /// Panics when called outside a render pass or when the hook call order
    /// changed between passes.
    pub fn use_state<T>(&self, initial: T) -> (T, SetState<T>)
    where
        T: Clone + PartialEq + 'static,
    {
        self.try_use_state(initial)
            .unwrap_or_else(|err| panic!("{err}"))
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("slots", &self.slot_count())
            .field("flags", &self.instance.flags.get())
            .finish()
    }
}

/// Keeps the instance in the rendering state for the duration of a pass.
pub(crate) struct RenderGuard<'a> {
    hooks: &'a Hooks,
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        self.hooks.instance.cursor.set(0);
        self.hooks.instance.remove_flags(HookFlags::RENDERING);
    }
}
