// Sliding window of per-visible-line render artifacts.

/// One optional slot per line inside the viewport's vertical bounds. An
/// empty slot means "render fresh on the next draw", not "blank line".
/// Scrolling shifts the window in O(|dy|) instead of rebuilding it, so
/// lines that stay visible keep their artifacts.
pub struct RenderCache<T> {
    slots: Vec<Option<T>>,
}

impl<T> RenderCache<T> {
    pub fn new(size: usize) -> Self {
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, || None);
        RenderCache { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_filled(&self, i: usize) -> bool {
        matches!(self.slots.get(i), Some(Some(_)))
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.slots.get(i).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.slots.get_mut(i).and_then(Option::as_mut)
    }

    /// Store a freshly rendered artifact. Any artifact already in the
    /// slot is released.
    pub fn fill(&mut self, i: usize, artifact: T) {
        if let Some(slot) = self.slots.get_mut(i) {
            *slot = Some(artifact);
        }
    }

    /// Mark slot `i` to be re-rendered on the next draw.
    pub fn invalidate(&mut self, i: usize) {
        if let Some(slot) = self.slots.get_mut(i) {
            *slot = None;
        }
    }

    /// Slide the window by `dy` lines: evict `|dy|` slots at the edge
    /// scrolled away from and open `|dy|` empty slots at the edge
    /// scrolled towards. Positive `dy` scrolls the content up.
    pub fn shift(&mut self, dy: i32) {
        let n = dy.unsigned_abs() as usize;
        if n == 0 {
            return;
        }
        if n >= self.slots.len() {
            let len = self.slots.len();
            self.rebuild(len);
            return;
        }
        if dy > 0 {
            self.slots.drain(..n);
            self.slots.extend((0..n).map(|_| None));
        } else {
            let keep = self.slots.len() - n;
            self.slots.truncate(keep);
            for _ in 0..n {
                self.slots.insert(0, None);
            }
        }
    }

    /// Discard every slot and reallocate `size` empty ones.
    pub fn rebuild(&mut self, size: usize) {
        self.slots.clear();
        self.slots.resize_with(size, || None);
    }

    /// Drop slot `i`; the slots below slide up one row, staying aligned
    /// with their lines after a line deletion.
    pub fn remove_slot(&mut self, i: usize) {
        if i < self.slots.len() {
            self.slots.remove(i);
        }
    }

    /// Open a fresh slot at the bottom edge.
    pub fn append_slot(&mut self) {
        self.slots.push(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: &[i32]) -> RenderCache<i32> {
        let mut cache = RenderCache::new(values.len());
        for (i, v) in values.iter().enumerate() {
            cache.fill(i, *v);
        }
        cache
    }

    #[test]
    fn test_new_slots_are_empty() {
        let cache: RenderCache<i32> = RenderCache::new(3);
        assert_eq!(cache.len(), 3);
        assert!(!cache.is_filled(0));
    }

    #[test]
    fn test_fill_and_invalidate() {
        let mut cache = filled(&[10, 11, 12]);
        assert_eq!(cache.get(1), Some(&11));
        cache.invalidate(1);
        assert!(!cache.is_filled(1));
        assert!(cache.is_filled(0));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_fill_overwrites() {
        let mut cache = filled(&[10]);
        cache.fill(0, 20);
        assert_eq!(cache.get(0), Some(&20));
    }

    #[test]
    fn test_shift_down_evicts_top() {
        // scroll content up by 2: slots 0 and 1 evicted, two fresh at
        // the bottom, the survivor keeps its artifact
        let mut cache = filled(&[10, 11, 12]);
        cache.shift(2);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(0), Some(&12));
        assert!(!cache.is_filled(1));
        assert!(!cache.is_filled(2));
    }

    #[test]
    fn test_shift_up_evicts_bottom() {
        let mut cache = filled(&[10, 11, 12]);
        cache.shift(-1);
        assert_eq!(cache.len(), 3);
        assert!(!cache.is_filled(0));
        assert_eq!(cache.get(1), Some(&10));
        assert_eq!(cache.get(2), Some(&11));
    }

    #[test]
    fn test_shift_past_window_clears_all() {
        let mut cache = filled(&[10, 11, 12]);
        cache.shift(5);
        assert_eq!(cache.len(), 3);
        assert!((0..3).all(|i| !cache.is_filled(i)));
    }

    #[test]
    fn test_remove_slot_slides_rest_up() {
        let mut cache = filled(&[10, 11, 12]);
        cache.remove_slot(0);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(0), Some(&11));
    }

    #[test]
    fn test_append_slot_is_empty() {
        let mut cache = filled(&[10]);
        cache.append_slot();
        assert_eq!(cache.len(), 2);
        assert!(!cache.is_filled(1));
    }

    #[test]
    fn test_rebuild() {
        let mut cache = filled(&[10, 11]);
        cache.rebuild(4);
        assert_eq!(cache.len(), 4);
        assert!((0..4).all(|i| !cache.is_filled(i)));
    }
}
