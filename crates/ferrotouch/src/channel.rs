//! The one-value seam between the controller and whatever it animates.

use std::cell::Cell;
use std::rc::Rc;

/// A single numeric value the controller reads and writes.
///
/// Implement this over anything with one `f64` worth of state, such as a
/// scroll offset or a layout translation. The controller only ever writes
/// finite values; what the host does with them is its own business.
pub trait MotionChannel {
    fn get(&self) -> f64;
    fn set(&self, value: f64);
}

/// Cell-backed channel for hosts that just want a shared number.
#[derive(Debug)]
pub struct SharedValue {
    value: Cell<f64>,
}

impl SharedValue {
    pub fn new(initial: f64) -> Rc<Self> {
        Rc::new(Self {
            value: Cell::new(initial),
        })
    }
}

impl MotionChannel for SharedValue {
    fn get(&self) -> f64 {
        self.value.get()
    }

    fn set(&self, value: f64) {
        self.value.set(value);
    }
}
