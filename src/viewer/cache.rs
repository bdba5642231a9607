//! Rendered slides, kept around as long as the viewport keeps its size.

use std::collections::HashMap;

use tracing::debug;

/// Memoize rendered frames by slide index.
///
/// Every frame was rendered at the current viewport size: changing the size
/// throws away every frame, there is no partial invalidation and no
/// eviction.
#[derive(Debug)]
pub struct FrameCache<T> {
    viewport: (u32, u32),
    frames: HashMap<usize, T>,
}

impl<T> FrameCache<T> {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        FrameCache {
            viewport: (width, height),
            frames: HashMap::new(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Update the viewport size, invalidating everything if it changed.
    /// Returns whether the cache was invalidated.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if self.viewport == (width, height) {
            return false;
        }
        debug!("Viewport {:?} -> {:?}", self.viewport, (width, height));
        self.viewport = (width, height);
        self.invalidate_all();
        true
    }

    /// Drop every frame.
    pub fn invalidate_all(&mut self) {
        self.frames.clear();
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.frames.contains_key(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Get the frame for slide `index`, calling `render` with the viewport
    /// size if it is not there yet. A failed render leaves the cache as is.
    pub fn get_or_render<E, F>(&mut self, index: usize, render: F) -> Result<&T, E>
    where
        F: FnOnce(u32, u32) -> Result<T, E>,
    {
        use std::collections::hash_map::Entry;
        match self.frames.entry(index) {
            Entry::Occupied(frame) => Ok(frame.into_mut()),
            Entry::Vacant(slot) => {
                let (width, height) = self.viewport;
                debug!("Rendering slide {} at {}x{}", index, width, height);
                let frame = render(width, height)?;
                Ok(slot.insert(frame))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    /// A fake frame: which render call produced it and at what size.
    #[derive(Debug, PartialEq)]
    struct Frame {
        call: usize,
        size: (u32, u32),
    }

    fn counting(calls: &Cell<usize>) -> impl FnOnce(u32, u32) -> Result<Frame, ()> + '_ {
        move |w, h| {
            calls.set(calls.get() + 1);
            Ok(Frame {
                call: calls.get(),
                size: (w, h),
            })
        }
    }

    #[test]
    fn test_hit_does_not_render_again() {
        let calls = Cell::new(0);
        let mut cache = FrameCache::new(800, 600);
        let first = cache.get_or_render(1, counting(&calls)).unwrap() as *const Frame;
        let second = cache.get_or_render(1, counting(&calls)).unwrap() as *const Frame;
        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(
            cache.get_or_render(1, counting(&calls)).unwrap(),
            &Frame {
                call: 1,
                size: (800, 600)
            }
        );
    }

    #[test]
    fn test_invalidate_all_renders_again() {
        let calls = Cell::new(0);
        let mut cache = FrameCache::new(800, 600);
        for idx in 0..3 {
            cache.get_or_render(idx, counting(&calls)).unwrap();
        }
        assert_eq!(calls.get(), 3);
        cache.invalidate_all();
        assert!(cache.is_empty());
        for idx in 0..3 {
            let frame = cache.get_or_render(idx, counting(&calls)).unwrap();
            assert_eq!(frame.call, 4 + idx);
        }
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn test_resize_invalidates() {
        let calls = Cell::new(0);
        let mut cache = FrameCache::new(800, 600);
        cache.get_or_render(0, counting(&calls)).unwrap();
        assert!(!cache.set_viewport(800, 600));
        assert!(cache.contains(0));
        assert!(cache.set_viewport(1024, 768));
        assert!(!cache.contains(0));
        let frame = cache.get_or_render(0, counting(&calls)).unwrap();
        assert_eq!(frame.size, (1024, 768));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_failed_render_is_not_cached() {
        let mut cache: FrameCache<Frame> = FrameCache::new(10, 10);
        let r = cache.get_or_render(0, |_, _| Err("boom"));
        assert_eq!(r.unwrap_err(), "boom");
        assert!(!cache.contains(0));
        let calls = Cell::new(0);
        cache.get_or_render(0, counting(&calls)).unwrap();
        assert_eq!(calls.get(), 1);
    }
}
