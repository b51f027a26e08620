use std::collections::VecDeque;

/*
Automated Parameters
====================

A channel parameter (frequency, duty, volume, noise mode) is not a plain
field: the control side schedules jumps "effective at frame T" and the render
side must apply each jump at exactly the right sample. `AutomatedParam` is a
step-function timeline:

  value
    │        ┌──────────┐
    │        │          └────────────
    │────────┘
    └────────┬──────────┬────────────→ frame
             T1         T2

No ramps, no interpolation. Between jumps the value holds.


Rendering
---------

`process()` answers "what is the value for each sample of this block?":

  - no jump inside the block  →  1-element slice (broadcast)
  - jumps inside the block    →  block-length slice, one value per sample

That is the same broadcast/per-sample contract the oscillator kernels read
through `param_at`, so a constant parameter costs nothing per sample.


Ordering
--------

Pending jumps are kept sorted by frame. A jump scheduled at the same frame as
a pending one replaces it: the later arrival wins. Jumps whose frame is
already in the past take effect at the first sample of the next block.

The queue has a fixed capacity reserved up front so scheduling never
allocates. If it fills up, the jump with the latest frame is overwritten.
*/

pub const AUTOMATION_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduledValue<T> {
    frame: u64,
    value: T,
}

#[derive(Debug, Clone)]
pub struct AutomatedParam<T: Copy = f32> {
    current: T,
    pending: VecDeque<ScheduledValue<T>>,
}

impl<T: Copy> AutomatedParam<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            pending: VecDeque::with_capacity(AUTOMATION_CAPACITY),
        }
    }

    /// Schedule an instantaneous jump to `value` at `frame`.
    pub fn set_value_at(&mut self, value: T, frame: u64) {
        let index = self.pending.partition_point(|event| event.frame < frame);

        if let Some(existing) = self.pending.get_mut(index) {
            if existing.frame == frame {
                existing.value = value;
                return;
            }
        }

        if self.pending.len() >= AUTOMATION_CAPACITY {
            if index >= self.pending.len() {
                if let Some(last) = self.pending.back_mut() {
                    *last = ScheduledValue { frame, value };
                }
                return;
            }
            self.pending.pop_back();
        }

        self.pending.insert(index, ScheduledValue { frame, value });
    }

    /// Value in force at `frame`, taking pending jumps into account.
    pub fn value_at(&self, frame: u64) -> T {
        self.pending
            .iter()
            .take_while(|event| event.frame <= frame)
            .last()
            .map_or(self.current, |event| event.value)
    }

    /// Value in force before any pending jump.
    pub fn value(&self) -> T {
        self.current
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Resolve the values for a block starting at `block_start`.
    ///
    /// `scratch` must be the block length. The returned slice has length 1
    /// when the value is constant over the block, otherwise one entry per
    /// sample. Jumps inside the block are consumed.
    pub fn process<'a>(&'a mut self, block_start: u64, scratch: &'a mut [T]) -> &'a [T] {
        let block_end = block_start + scratch.len() as u64;

        // Jumps already due apply from the first sample
        while let Some(event) = self.pending.front() {
            if event.frame > block_start {
                break;
            }
            self.current = event.value;
            self.pending.pop_front();
        }

        let changes_in_block = self
            .pending
            .front()
            .is_some_and(|event| event.frame < block_end);

        if !changes_in_block || scratch.is_empty() {
            return std::slice::from_ref(&self.current);
        }

        for (offset, slot) in scratch.iter_mut().enumerate() {
            let frame = block_start + offset as u64;
            while let Some(event) = self.pending.front() {
                if event.frame > frame {
                    break;
                }
                self.current = event.value;
                self.pending.pop_front();
            }
            *slot = self.current;
        }

        scratch
    }
}

impl<T: Copy + Default> Default for AutomatedParam<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
