use std::{
    rc::{Rc, Weak},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A single-threaded, reference-counted resource with interior mutability.
///
/// Chunks are shared between the world index and whatever is currently
/// meshing or drawing them. `StResource` gives every holder a cheap handle to
/// the same value; the chunk lives until the last handle is dropped.
///
/// # Examples
///
/// ```
/// use voxel_terrain::core::StResource;
///
/// let resource = StResource::new(vec![1, 2, 3]);
/// let clone = resource.clone();
///
/// clone.get_mut().push(4);
/// assert_eq!(resource.get().len(), 4);
/// assert!(resource.ptr_eq(&clone));
/// ```
pub struct StResource<T> {
    resource: Rc<RwLock<T>>,
}

impl<T> StResource<T> {
    /// Creates a new `StResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read guard for the contained value. A poisoned lock is
    /// recovered.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a write guard for the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if both handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.resource, &other.resource)
    }

    /// Number of live handles to the contained value.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.resource)
    }

    /// Creates a non-owning handle that does not keep the value alive.
    pub fn downgrade(&self) -> Weak<RwLock<T>> {
        Rc::downgrade(&self.resource)
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for StResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StResource").field(&*self.get()).finish()
    }
}
