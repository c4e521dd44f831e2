#![cfg_attr(not(test), no_std)]

pub mod error;
pub mod queue;

pub use error::QueueError;
pub use queue::Queue;

/// Builds a [`Queue`] from a list of elements, front first.
///
/// The capacity comes from the target type; listing more elements than it allows is a
/// compile error.
///
/// ```
/// use ringq_common::{queue, Queue};
///
/// let q: Queue<u8, 4> = queue![1, 2, 3];
/// assert_eq!(*q.front(), 1);
/// assert_eq!(*q.back(), 3);
/// ```
#[macro_export]
macro_rules! queue {
    () => {
        $crate::Queue::new()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Queue::from_array([$($item),+])
    };
}
