use std::cell::Cell;

/// Fire-and-forget redraw hook invoked by the capture controller after every change.
///
/// Hosts wire this to their own invalidation mechanism; the controller never waits on it.
pub trait RepaintRequester {
    fn request_repaint(&self);
}

/// Ignores repaint requests. Useful for headless capture.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRepaint;

impl RepaintRequester for NoRepaint {
    fn request_repaint(&self) {}
}

/// Counts repaint requests.
#[derive(Debug, Default)]
pub struct RepaintCounter {
    count: Cell<u64>,
}

impl RepaintCounter {
    pub fn count(&self) -> u64 {
        self.count.get()
    }
}

impl RepaintRequester for RepaintCounter {
    fn request_repaint(&self) {
        self.count.set(self.count.get() + 1);
    }
}

impl<F: Fn()> RepaintRequester for F {
    fn request_repaint(&self) {
        self()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/repaint.rs"]
mod tests;
