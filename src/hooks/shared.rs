use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// A reference-counted state value compared by identity.
///
/// `use_state` skips a re-render when the new value equals the old one. For
/// plain values that is structural equality; `Shared` switches it to pointer
/// identity. Storing a freshly allocated `Shared` always re-renders, even if
/// its contents are equal. Mutating the contents through interior mutability
/// and storing the same `Shared` again does not.
///
/// ```
/// use sprig::Shared;
///
/// let a = Shared::new(vec![1, 2]);
/// let b = Shared::new(vec![1, 2]);
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
pub struct Shared<T: ?Sized>(Rc<T>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(value))
    }
}

impl<T: ?Sized> Shared<T> {
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Eq for Shared<T> {}

impl<T: ?Sized> Deref for Shared<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> From<Rc<T>> for Shared<T> {
    fn from(value: Rc<T>) -> Self {
        Self(value)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
