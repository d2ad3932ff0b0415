use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

/// Single threaded shared ownership, used to hand the same simulated
/// hardware to the loop and to whoever inspects it afterwards.
pub type SharableRef<T> = Rc<RefCell<T>>;

pub trait SharableRefExt<T> {
    fn new_sharable(inner: T) -> SharableRef<T>;

    fn deref(&self) -> Ref<T>;

    fn deref_mut(&self) -> RefMut<T>;
}

impl<T> SharableRefExt<T> for SharableRef<T> {
    fn new_sharable(inner: T) -> SharableRef<T> {
        Rc::new(RefCell::new(inner))
    }

    fn deref_mut(&self) -> RefMut<T> {
        self.borrow_mut()
    }

    fn deref(&self) -> Ref<T> {
        self.borrow()
    }
}
