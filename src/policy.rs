//! Bucket-table sizing rules.
//!
//! Capacities stay odd: growth maps `c` to `2c + 1` and shrink maps it back
//! with `c / 2`, so a grow followed by a shrink returns to the same bucket
//! count. Growth fires above load 1 and shrink below load 1/4; the gap
//! between the two thresholds keeps alternating insert/erase from
//! flip-flopping the table.

/// Bucket count of a fresh map, and the floor below which it never shrinks.
pub const DEFAULT_MIN_CAPACITY: usize = 13;

/// Shrink once `len * SHRINK_LOAD_DIVISOR < capacity`.
pub const SHRINK_LOAD_DIVISOR: usize = 4;

/// Resize thresholds for a [`LinkedHashMap`](crate::LinkedHashMap).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResizePolicy {
    min_capacity: usize,
}

impl ResizePolicy {
    /// Policy with the given floor. A zero floor is raised to one bucket.
    pub const fn new(min_capacity: usize) -> Self {
        let min_capacity = if min_capacity == 0 { 1 } else { min_capacity };
        Self { min_capacity }
    }

    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// True when holding `len_after` entries in `capacity` buckets needs a
    /// bigger table.
    #[inline]
    pub fn should_grow(&self, len_after: usize, capacity: usize) -> bool {
        len_after > capacity
    }

    #[inline]
    pub fn grown(&self, capacity: usize) -> usize {
        capacity.saturating_mul(2).saturating_add(1)
    }

    /// True when `len` entries leave `capacity` buckets under-used and the
    /// table is still above its floor.
    #[inline]
    pub fn should_shrink(&self, len: usize, capacity: usize) -> bool {
        capacity > self.min_capacity && len.saturating_mul(SHRINK_LOAD_DIVISOR) < capacity
    }

    #[inline]
    pub fn shrunk(&self, capacity: usize) -> usize {
        (capacity / 2).max(self.min_capacity)
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_floor_is_clamped() {
        assert_eq!(ResizePolicy::new(0).min_capacity(), 1);
        assert_eq!(ResizePolicy::default().min_capacity(), DEFAULT_MIN_CAPACITY);
    }

    /// Growth happens only once the table would be over-full.
    #[test]
    fn grow_threshold() {
        let p = ResizePolicy::default();
        assert!(!p.should_grow(13, 13));
        assert!(p.should_grow(14, 13));
        assert_eq!(p.grown(13), 27);
        assert_eq!(p.grown(27), 55);
    }

    /// Shrink waits for load under one quarter and never crosses the floor.
    #[test]
    fn shrink_threshold_and_floor() {
        let p = ResizePolicy::default();
        assert!(!p.should_shrink(0, 13), "never shrink at the floor");
        assert!(!p.should_shrink(7, 27));
        assert!(p.should_shrink(6, 27));
        assert_eq!(p.shrunk(27), 13);
        assert_eq!(p.shrunk(55), 27);

        let small = ResizePolicy::new(20);
        assert_eq!(small.shrunk(27), 20);
    }

    /// Grow then shrink returns to the starting capacity.
    #[test]
    fn grow_shrink_are_inverse() {
        let p = ResizePolicy::default();
        let mut c = p.min_capacity();
        for _ in 0..8 {
            let g = p.grown(c);
            assert_eq!(p.shrunk(g), c);
            c = g;
        }
    }
}
