//! Event values passed between nodes.
//!
//! An [`Event`] is a numeric [`Kind`] tag plus an optional, type-erased [`Payload`]. The relay
//! never looks inside a payload: it is cloned by reference along with the event, and its type
//! is a contract between whoever produces the event and whoever consumes it.
//!
//! # Payload Identity
//!
//! Payloads are shared, not copied. Every clone of an event points at the same value, so a
//! listener observes exactly the value the producer attached:
//!
//! ```rust,ignore
//! let reading = Payload::new(42_i32);
//! let event = Event::with_shared(7, reading.clone());
//!
//! assert!(event.payload().unwrap().ptr_eq(&reading));
//! assert_eq!(event.downcast_payload::<i32>(), Some(&42));
//! ```

use std::{any::Any, fmt, rc::Rc};

/// The numeric tag identifying what an event means.
pub type Kind = i32;

/// A shared, type-erased value attached to an event.
///
/// Equality is identity: two payloads are equal only if they point at the same allocation.
#[derive(Clone)]
pub struct Payload(Rc<dyn Any>);

impl Payload {
    /// Wrap a value in a new payload.
    pub fn new<T: 'static>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Share an already reference counted value. The caller keeps its own handle to the value.
    pub fn from_rc<T: 'static>(value: Rc<T>) -> Self {
        Self(value)
    }

    /// Get the payload as a `T`, if that is what it holds.
    #[inline]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        (*self.0).downcast_ref::<T>()
    }

    /// Determine if the payload holds a `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        (*self.0).is::<T>()
    }

    /// Determine if both payloads point at the same value.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }

    /// The address of the shared value.
    #[inline]
    pub fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Payload {}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload({:p})", self.as_ptr())
    }
}

/// An immutable event: a kind tag and an optional payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: Kind,
    payload: Option<Payload>,
}

impl Event {
    /// Construct an event with no payload.
    #[inline]
    pub const fn new(kind: Kind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    /// Construct an event carrying a freshly wrapped value.
    pub fn with_payload<T: 'static>(kind: Kind, value: T) -> Self {
        Self::with_shared(kind, Payload::new(value))
    }

    /// Construct an event carrying an existing payload.
    pub fn with_shared(kind: Kind, payload: Payload) -> Self {
        Self {
            kind,
            payload: Some(payload),
        }
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Get the payload as a `T`. Returns `None` if there is no payload or it holds another type.
    pub fn downcast_payload<T: 'static>(&self) -> Option<&T> {
        self.payload.as_ref()?.downcast_ref::<T>()
    }
}

impl From<Kind> for Event {
    fn from(kind: Kind) -> Self {
        Self::new(kind)
    }
}
