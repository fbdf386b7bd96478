//! Fixed-capacity circular history of the most recent samples
//!
//! The buffer is written exactly once per incoming sample and never grows.
//! Reads return the latest `n` samples in chronological order without copying,
//! as a pair of contiguous slices (older part, newer part).
//!
//! # Example
//!
//! ```
//! use stratum_trig::io::rolling_buffer::RollingBuffer;
//!
//! let mut buffer = RollingBuffer::new(8);
//! for x in 1..=5 {
//!     buffer.push(x as f32);
//! }
//! let window: Vec<f32> = buffer.window_ending_at_latest(3).iter().collect();
//! assert_eq!(window, vec![3.0, 4.0, 5.0]);
//! ```

/// Circular store of the `capacity` most recently pushed samples
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    data: Box<[f32]>,
    /// Index the next sample will be written to
    cursor: usize,
}

impl RollingBuffer {
    /// Create a zero-filled buffer
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RollingBuffer capacity must be > 0");
        Self {
            data: vec![0.0; capacity].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Number of samples retained
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Write position of the next sample
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Append one sample, overwriting the oldest
    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.data[self.cursor] = sample;
        self.cursor += 1;
        if self.cursor == self.data.len() {
            self.cursor = 0;
        }
    }

    /// Sample written `age` pushes ago (`age == 1` is the latest)
    ///
    /// `age` must be in `1..=capacity`.
    #[inline]
    pub fn sample_at_age(&self, age: usize) -> f32 {
        let capacity = self.data.len();
        debug_assert!(age >= 1 && age <= capacity);
        self.data[(self.cursor + capacity - age) % capacity]
    }

    /// View of the most recent `length` samples, oldest first
    ///
    /// `length` must not exceed the capacity; the engine guarantees this when it
    /// validates its configuration, so it is only checked in debug builds.
    pub fn window_ending_at_latest(&self, length: usize) -> WindowView<'_> {
        let capacity = self.data.len();
        debug_assert!(length <= capacity, "window longer than buffer");

        let start = (self.cursor + capacity - length) % capacity;
        if start + length <= capacity {
            WindowView {
                head: &self.data[start..start + length],
                tail: &[],
            }
        } else {
            WindowView {
                head: &self.data[start..],
                tail: &self.data[..start + length - capacity],
            }
        }
    }

    /// Copy the most recent `dest.len()` samples into `dest`, oldest first
    pub fn copy_window_into(&self, dest: &mut [f32]) {
        let view = self.window_ending_at_latest(dest.len());
        let (head, tail) = view.as_slices();
        dest[..head.len()].copy_from_slice(head);
        dest[head.len()..].copy_from_slice(tail);
    }

    /// Zero the history and rewind the cursor
    pub fn clear(&mut self) {
        self.data.fill(0.0);
        self.cursor = 0;
    }
}

/// Read-only chronological view into a [`RollingBuffer`]
#[derive(Debug, Clone, Copy)]
pub struct WindowView<'a> {
    head: &'a [f32],
    tail: &'a [f32],
}

impl<'a> WindowView<'a> {
    /// Number of samples in the view
    pub fn len(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    /// Whether the view is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The view as (older, newer) contiguous slices
    pub fn as_slices(&self) -> (&'a [f32], &'a [f32]) {
        (self.head, self.tail)
    }

    /// Iterate the samples oldest first
    pub fn iter(&self) -> impl Iterator<Item = f32> + 'a {
        let (head, tail) = (self.head, self.tail);
        head.iter().chain(tail.iter()).copied()
    }
}
