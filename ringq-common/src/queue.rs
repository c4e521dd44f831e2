use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem::{self, MaybeUninit},
};

use crate::QueueError;

/// Fixed-capacity FIFO queue over a ring of `N` inline slots.
///
/// A slot is either empty (`None`) or holds a live element. The live elements occupy the
/// logical range `head..head + len`, wrapping around the end of the ring, and `len` alone
/// decides emptiness and fullness.
///
/// Every operation that does not call back into `T` (`Clone`, `PartialEq`, `Drop`, ...) is a
/// `const fn`, so queues of trivially droppable elements can be built and consumed inside
/// `const` items:
///
/// ```
/// use ringq_common::Queue;
///
/// const LAST: i32 = {
///     let mut queue = Queue::<i32, 3>::new();
///     queue.push(1);
///     queue.push(2);
///     queue.pop();
///     queue.push(3);
///     queue.push(4);
///     *queue.back()
/// };
///
/// assert_eq!(LAST, 4);
/// ```
///
/// `front`, `back`, `pop`, `push` and `emplace` treat a violated precondition as a bug and
/// panic. The `try_*` variants report the same conditions as values instead.
pub struct Queue<T, const N: usize> {
    head: usize,
    tail: usize,
    len: usize,
    data: [Option<T>; N],
}

impl<T, const N: usize> Queue<T, N> {
    pub const CAPACITY: usize = N;

    #[inline(always)]
    pub const fn new() -> Self {
        Queue {
            head: 0,
            tail: 0,
            len: 0,
            data: [const { None }; N],
        }
    }

    /// Builds a queue whose front is `items[0]` and whose back is `items[M - 1]`.
    ///
    /// Passing more than `N` items fails to compile.
    pub const fn from_array<const M: usize>(items: [T; M]) -> Self {
        const { assert!(M <= N, "more initial elements than the queue capacity") };

        let items = MaybeUninit::new(items);
        let src = items.as_ptr().cast::<T>();
        let mut data = MaybeUninit::<[Option<T>; N]>::uninit();
        let dst = data.as_mut_ptr().cast::<Option<T>>();

        let mut i = 0;
        while i < N {
            // SAFETY: `i < N` keeps `dst` inside `data`, and each of the first `M` items is
            // read exactly once. `items` is never dropped, so ownership moves into the ring.
            unsafe {
                if i < M {
                    dst.add(i).write(Some(src.add(i).read()));
                } else {
                    dst.add(i).write(None);
                }
            }
            i += 1;
        }

        Queue {
            head: 0,
            tail: if M == N { 0 } else { M },
            len: M,
            // SAFETY: the loop above wrote all `N` slots.
            data: unsafe { data.assume_init() },
        }
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A capacity-zero queue is both empty and full.
    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Number of elements that can still be pushed.
    #[inline(always)]
    pub const fn remaining(&self) -> usize {
        N - self.len
    }

    /// Oldest element.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub const fn front(&self) -> &T {
        assert!(!self.is_empty(), "front() called on an empty queue");
        self.live(self.head)
    }

    /// Newest element.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub const fn back(&self) -> &T {
        assert!(!self.is_empty(), "back() called on an empty queue");
        self.live(self.back_index())
    }

    pub const fn try_front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(self.live(self.head))
    }

    pub const fn try_back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(self.live(self.back_index()))
    }

    /// Element at logical position `index`, counted from the front.
    pub const fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        Some(self.live(self.slot(index)))
    }

    /// Appends `value` at the back.
    ///
    /// # Panics
    ///
    /// Panics if the queue is full.
    pub const fn push(&mut self, value: T) {
        assert!(!self.is_full(), "push() called on a full queue");
        // The slot at `tail` is outside the live range, so the replaced value is `None`.
        mem::forget(self.data[self.tail].replace(value));
        self.tail = Self::increase(self.tail);
        self.len += 1;
    }

    /// Appends `value` at the back and returns the stored element.
    ///
    /// # Panics
    ///
    /// Panics if the queue is full.
    pub const fn emplace(&mut self, value: T) -> &mut T {
        assert!(!self.is_full(), "emplace() called on a full queue");
        let index = self.tail;
        mem::forget(self.data[index].replace(value));
        self.tail = Self::increase(self.tail);
        self.len += 1;
        self.live_mut(index)
    }

    /// Removes the oldest element and hands it to the caller.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub const fn pop(&mut self) -> T {
        assert!(!self.is_empty(), "pop() called on an empty queue");
        let value = self.data[self.head].take();
        self.head = Self::increase(self.head);
        self.len -= 1;
        value.expect("slot inside the live range is empty")
    }

    pub const fn try_push(&mut self, value: T) -> Result<(), QueueError<T>> {
        if self.is_full() {
            return Err(QueueError::Full(value));
        }
        self.push(value);
        Ok(())
    }

    pub const fn try_emplace(&mut self, value: T) -> Result<&mut T, QueueError<T>> {
        if self.is_full() {
            return Err(QueueError::Full(value));
        }
        Ok(self.emplace(value))
    }

    pub const fn try_pop(&mut self) -> Result<T, QueueError<T>> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        Ok(self.pop())
    }

    /// Exchanges the whole state of two queues without touching any element.
    #[inline(always)]
    pub const fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves every element into the returned queue and leaves `self` empty.
    #[inline(always)]
    pub const fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Drops every live element and rewinds the cursors.
    pub fn clear(&mut self) {
        let mut index = self.head;
        let len = self.len;
        self.head = 0;
        self.tail = 0;
        self.len = 0;
        for _ in 0..len {
            self.data[index] = None;
            index = Self::increase(index);
        }
    }

    #[inline(always)]
    const fn increase(i: usize) -> usize {
        if i + 1 == N {
            0
        } else {
            i + 1
        }
    }

    #[inline(always)]
    const fn back_index(&self) -> usize {
        if self.tail == 0 {
            N - 1
        } else {
            self.tail - 1
        }
    }

    /// Ring index of the element `offset` positions behind the front.
    #[inline(always)]
    const fn slot(&self, offset: usize) -> usize {
        let index = self.head + offset;
        if index >= N {
            index - N
        } else {
            index
        }
    }

    const fn live(&self, index: usize) -> &T {
        match &self.data[index] {
            Some(value) => value,
            None => panic!("slot inside the live range is empty"),
        }
    }

    const fn live_mut(&mut self, index: usize) -> &mut T {
        match &mut self.data[index] {
            Some(value) => value,
            None => panic!("slot inside the live range is empty"),
        }
    }
}

impl<T, const N: usize> Default for Queue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize, const M: usize> From<[T; M]> for Queue<T, N> {
    fn from(items: [T; M]) -> Self {
        Self::from_array(items)
    }
}

/// Clones the live elements only; the copy keeps the source's ring layout.
impl<T: Clone, const N: usize> Clone for Queue<T, N> {
    fn clone(&self) -> Self {
        let mut data: [Option<T>; N] = [const { None }; N];
        let mut index = self.head;
        for _ in 0..self.len {
            data[index] = Some(self.live(index).clone());
            index = Self::increase(index);
        }
        Queue {
            head: self.head,
            tail: self.tail,
            len: self.len,
            data,
        }
    }
}

impl<T: Copy, const N: usize> Copy for Queue<T, N> {}

impl<T: PartialEq, const N: usize> PartialEq for Queue<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && (0..self.len).all(|i| self.live(self.slot(i)) == other.live(other.slot(i)))
    }
}

impl<T: Eq, const N: usize> Eq for Queue<T, N> {}

/// Lexicographic over the logical sequences; a strict prefix orders first.
impl<T: PartialOrd, const N: usize> PartialOrd for Queue<T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        for i in 0..self.len.min(other.len) {
            match self.live(self.slot(i)).partial_cmp(other.live(other.slot(i))) {
                Some(Ordering::Equal) => {}
                non_eq => return non_eq,
            }
        }
        self.len.partial_cmp(&other.len)
    }
}

impl<T: Ord, const N: usize> Ord for Queue<T, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in 0..self.len.min(other.len) {
            match self.live(self.slot(i)).cmp(other.live(other.slot(i))) {
                Ordering::Equal => {}
                non_eq => return non_eq,
            }
        }
        self.len.cmp(&other.len)
    }
}

impl<T: Hash, const N: usize> Hash for Queue<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for i in 0..self.len {
            self.live(self.slot(i)).hash(state);
        }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Queue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len).map(|i| self.live(self.slot(i))))
            .finish()
    }
}

mod test {

    #[test]
    fn test_push() {
        use super::Queue;

        let mut queue = Queue::<i32, 5>::new();
        queue.push(55);
        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 1);
        assert_eq!(*queue.front(), 55);
        assert_eq!(*queue.back(), 55);

        queue.push(66);
        assert_eq!(queue.len(), 2);
        assert_eq!(*queue.front(), 55);
        assert_eq!(*queue.back(), 66);
        assert_eq!(queue.remaining(), 3);
    }

    #[test]
    fn test_pop() {
        use super::Queue;

        let mut queue = Queue::<i32, 5>::new();
        queue.push(55);
        queue.push(66);

        assert_eq!(queue.pop(), 55);
        assert_eq!(queue.len(), 1);
        assert_eq!(*queue.front(), 66);
        assert_eq!(*queue.back(), 66);

        assert_eq!(queue.pop(), 66);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_emplace_returns_stored_element() {
        use super::Queue;

        let mut queue = Queue::<i32, 5>::new();
        queue.emplace(77);
        *queue.emplace(88) += 1;

        assert_eq!(queue.len(), 2);
        assert_eq!(*queue.front(), 77);
        assert_eq!(*queue.back(), 89);
    }

    #[test]
    fn test_fifo_round_trip() {
        use super::Queue;

        let mut queue = Queue::<u32, 8>::new();
        let mut pushed = 0;
        let mut popped = 0;
        for round in 0..5u32 {
            for v in 0..6 {
                queue.push(round * 10 + v);
                pushed += 1;
                assert_eq!(queue.len(), pushed - popped);
            }
            for v in 0..6 {
                assert_eq!(queue.pop(), round * 10 + v);
                popped += 1;
                assert_eq!(queue.len(), pushed - popped);
            }
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_wrap_around() {
        use super::Queue;

        let mut queue = Queue::<i32, 3>::new();
        queue.push(1);
        queue.push(2);
        queue.pop();
        queue.push(3);
        queue.push(4);

        assert!(queue.is_full());
        assert_eq!(queue.len(), 3);
        assert_eq!(*queue.front(), 2);
        assert_eq!(*queue.back(), 4);
        assert_eq!(queue.get(0), Some(&2));
        assert_eq!(queue.get(1), Some(&3));
        assert_eq!(queue.get(2), Some(&4));
        assert_eq!(queue.get(3), None);
    }

    #[test]
    #[should_panic(expected = "push() called on a full queue")]
    fn test_push_full_after_wrap_around() {
        use super::Queue;

        let mut queue = Queue::<i32, 3>::new();
        queue.push(1);
        queue.push(2);
        queue.pop();
        queue.push(3);
        queue.push(4);
        queue.push(5);
    }

    #[test]
    #[should_panic(expected = "emplace() called on a full queue")]
    fn test_emplace_full() {
        use super::Queue;

        let mut queue = Queue::<i32, 1>::new();
        queue.emplace(1);
        queue.emplace(2);
    }

    #[test]
    #[should_panic(expected = "pop() called on an empty queue")]
    fn test_pop_empty() {
        use super::Queue;

        let mut queue = Queue::<i32, 5>::new();
        queue.pop();
    }

    #[test]
    #[should_panic(expected = "front() called on an empty queue")]
    fn test_front_after_clear() {
        use super::Queue;

        let mut queue = Queue::<i32, 5>::new();
        queue.push(1);
        queue.push(2);
        queue.clear();
        queue.front();
    }

    #[test]
    #[should_panic(expected = "back() called on an empty queue")]
    fn test_back_after_clear() {
        use super::Queue;

        let mut queue = Queue::<i32, 5>::new();
        queue.push(1);
        queue.clear();
        queue.back();
    }

    #[test]
    fn test_clear_after_wrap_around() {
        use super::Queue;

        let mut queue = Queue::<i32, 3>::new();
        queue.push(1);
        queue.push(2);
        queue.pop();
        queue.push(3);
        queue.push(4);
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.try_front(), None);

        queue.clear();
        assert!(queue.is_empty());

        queue.push(9);
        assert_eq!(*queue.front(), 9);
        assert_eq!(*queue.back(), 9);
    }

    #[test]
    fn test_checked_operations() {
        use super::Queue;
        use crate::QueueError;

        let mut queue = Queue::<&str, 2>::new();
        assert_eq!(queue.try_pop(), Err(QueueError::Empty));
        assert_eq!(queue.try_front(), None);
        assert_eq!(queue.try_back(), None);

        assert_eq!(queue.try_push("a"), Ok(()));
        assert_eq!(queue.try_emplace("b").map(|v| *v), Ok("b"));
        assert_eq!(queue.try_push("c"), Err(QueueError::Full("c")));
        assert_eq!(queue.try_emplace("d").map(|v| *v), Err(QueueError::Full("d")));

        assert_eq!(queue.try_front(), Some(&"a"));
        assert_eq!(queue.try_back(), Some(&"b"));
        assert_eq!(queue.try_pop(), Ok("a"));
        assert_eq!(queue.try_pop(), Ok("b"));
        assert_eq!(queue.try_pop(), Err(QueueError::Empty));
    }

    #[test]
    fn test_swap() {
        use super::Queue;

        let mut queue1 = Queue::<i32, 5>::new();
        queue1.push(1);
        queue1.push(2);
        let mut queue2 = Queue::<i32, 5>::new();
        queue2.push(3);
        queue2.push(4);

        queue1.swap(&mut queue2);

        assert_eq!(queue1.len(), 2);
        assert_eq!(*queue1.front(), 3);
        assert_eq!(*queue1.back(), 4);
        assert_eq!(queue2.len(), 2);
        assert_eq!(*queue2.front(), 1);
        assert_eq!(*queue2.back(), 2);
    }

    #[test]
    fn test_swap_different_head_tail() {
        use super::Queue;

        let mut q1 = Queue::<i32, 3>::new();
        q1.push(1);
        q1.push(2);
        q1.pop();
        q1.push(3);
        q1.push(4);
        let mut q2 = Queue::<i32, 3>::new();
        q2.push(5);
        q2.push(6);

        q1.swap(&mut q2);
        assert_eq!(q1.len(), 2);
        assert_eq!(*q1.front(), 5);
        assert_eq!(*q1.back(), 6);
        assert_eq!(q2.len(), 3);
        assert_eq!(*q2.front(), 2);
        assert_eq!(*q2.back(), 4);

        q1.swap(&mut q2);
        assert_eq!(q1, Queue::from([2, 3, 4]));
        assert_eq!(q2, Queue::from([5, 6]));
    }

    #[test]
    fn test_equality() {
        use super::Queue;

        let mut queue1 = Queue::<i32, 5>::new();
        queue1.push(1);
        queue1.push(2);
        let mut queue2 = Queue::<i32, 5>::new();
        queue2.push(1);
        queue2.push(2);

        assert!(queue1 == queue2);
        assert!(!(queue1 != queue2));

        queue2.push(3);
        assert!(queue1 != queue2);
    }

    #[test]
    fn test_equality_ignores_rotation() {
        use super::Queue;

        let mut wrapped = Queue::<i32, 3>::new();
        wrapped.push(1);
        wrapped.push(2);
        wrapped.pop();
        wrapped.push(3);
        wrapped.push(4);

        let fresh = Queue::<i32, 3>::from_array([2, 3, 4]);

        assert_eq!(wrapped, fresh);
        assert_eq!(wrapped.cmp(&fresh), core::cmp::Ordering::Equal);
    }

    #[test]
    fn test_ordering() {
        use super::Queue;

        let mut queue1 = Queue::<i32, 5>::new();
        queue1.push(1);
        queue1.push(2);
        let mut queue2 = Queue::<i32, 5>::new();
        queue2.push(1);
        queue2.push(3);

        assert!(queue1 < queue2);
        assert!(queue1 <= queue2);
        assert!(!(queue1 > queue2));
        assert!(!(queue1 >= queue2));

        // [1, 2] against [3]
        queue2.pop();
        assert!(queue1 < queue2);
        assert!(queue1 <= queue2);

        // [1, 2] against its strict prefix [1]
        let prefix = Queue::<i32, 5>::from_array([1]);
        assert!(queue1 > prefix);
        assert!(queue1 >= prefix);
        assert!(prefix < queue1);

        // [2] against [1, 3]
        let mut queue3 = Queue::<i32, 5>::from_array([1, 2]);
        let queue4 = Queue::<i32, 5>::from_array([1, 3]);
        queue3.pop();
        assert!(queue3 > queue4);
        assert!(queue3 >= queue4);
    }

    #[test]
    fn test_ordering_with_different_head_tail() {
        use super::Queue;

        let mut queue1 = Queue::<i32, 3>::new();
        queue1.push(1);
        queue1.push(2);
        queue1.pop();
        queue1.push(3);
        queue1.push(4);
        let queue2 = Queue::<i32, 3>::from_array([4, 5]);

        assert!(queue1 != queue2);
        assert!(queue1 < queue2);
        assert!(queue1 <= queue2);
        assert!(!(queue1 > queue2));
        assert!(!(queue1 >= queue2));

        let full1 = Queue::<i32, 3>::from_array([1, 2, 3]);
        let full2 = Queue::<i32, 3>::from_array([4, 5, 6]);
        assert!(full1 < full2);
        assert!(full1 != full2);
    }

    #[test]
    fn test_partial_ordering_of_unordered_elements() {
        use super::Queue;

        let nan = Queue::<f64, 2>::from_array([f64::NAN]);
        let one = Queue::<f64, 2>::from_array([1.0]);

        let same_nan = nan;

        assert_eq!(nan.partial_cmp(&one), None);
        assert!(nan != same_nan);
        assert!(!(nan < one));
        assert!(!(nan > one));
    }

    #[test]
    fn test_clone_is_independent() {
        use super::Queue;

        let mut original = Queue::<String, 4>::new();
        original.push("x".to_string());
        original.push("y".to_string());
        original.pop();
        original.push("z".to_string());

        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.push("w".to_string());
        *copy.emplace("v".to_string()) += "!";
        assert_eq!(copy.len(), 4);
        assert_eq!(original.len(), 2);
        assert_eq!(original.front(), "y");
        assert_eq!(original.back(), "z");

        let mut assigned = Queue::<String, 4>::new();
        assigned.clone_from(&original);
        assert_eq!(assigned, original);
    }

    #[test]
    fn test_take_leaves_source_empty() {
        use super::Queue;

        let mut original = Queue::<i32, 5>::from_array([10, 20]);

        let moved = original.take();
        assert!(original.is_empty());
        assert_eq!(moved.len(), 2);
        assert_eq!(*moved.front(), 10);
        assert_eq!(*moved.back(), 20);

        let mut another = moved;
        let again = core::mem::take(&mut another);
        assert!(another.is_empty());
        assert_eq!(again, Queue::from([10, 20]));
    }

    #[test]
    fn test_list_construction() {
        use super::Queue;
        use crate::queue;

        let queue: Queue<i32, 5> = queue![1, 2, 3];
        assert_eq!(queue.len(), 3);
        assert_eq!(*queue.front(), 1);
        assert_eq!(*queue.back(), 3);

        let partial: Queue<i32, 5> = queue![1, 2];
        assert_eq!(partial.len(), 2);
        assert_eq!(*partial.back(), 2);

        let empty: Queue<i32, 5> = queue![];
        assert!(empty.is_empty());

        let mut full: Queue<i32, 3> = queue![7, 8, 9];
        assert!(full.is_full());
        assert_eq!(full.pop(), 7);
        full.push(10);
        assert_eq!(full, Queue::from([8, 9, 10]));
    }

    #[test]
    fn test_zero_capacity() {
        use super::Queue;
        use crate::QueueError;

        let mut queue = Queue::<i32, 0>::new();
        assert!(queue.is_empty());
        assert!(queue.is_full());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), 0);
        assert_eq!(queue.try_push(1), Err(QueueError::Full(1)));
        assert_eq!(queue.try_pop(), Err(QueueError::Empty));
        queue.clear();
        assert_eq!(queue, Queue::default());
    }

    #[test]
    #[should_panic(expected = "push() called on a full queue")]
    fn test_zero_capacity_push() {
        use super::Queue;

        let mut queue = Queue::<i32, 0>::new();
        queue.push(1);
    }

    #[test]
    fn test_element_types() {
        use super::Queue;

        struct NoDefault(u8);

        let queue = Queue::<String, 5>::new();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 5);

        let mut queue = Queue::<NoDefault, 5>::new();
        queue.push(NoDefault(3));
        assert_eq!(queue.pop().0, 3);
        assert_eq!(Queue::<NoDefault, 5>::CAPACITY, 5);
    }

    #[test]
    fn test_drop_accounting() {
        use core::cell::Cell;

        use super::Queue;

        struct Tracked<'a>(&'a Cell<usize>);

        impl Drop for Tracked<'_> {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Cell::new(0);
        {
            let mut queue = Queue::<Tracked, 3>::new();
            queue.push(Tracked(&drops));
            queue.push(Tracked(&drops));
            queue.push(Tracked(&drops));

            let popped = queue.pop();
            assert_eq!(drops.get(), 0);
            drop(popped);
            assert_eq!(drops.get(), 1);

            queue.push(Tracked(&drops));
            queue.clear();
            assert_eq!(drops.get(), 4);

            queue.clear();
            assert_eq!(drops.get(), 4);

            queue.push(Tracked(&drops));
            queue.push(Tracked(&drops));
            queue.pop();
            assert_eq!(drops.get(), 5);
        }
        assert_eq!(drops.get(), 6);
    }

    #[test]
    fn test_drop_accounting_from_array_and_clone() {
        use core::cell::Cell;

        use super::Queue;

        #[derive(Clone)]
        struct Tracked<'a>(&'a Cell<usize>);

        impl Drop for Tracked<'_> {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Cell::new(0);
        {
            let mut queue = Queue::<Tracked, 3>::from_array([
                Tracked(&drops),
                Tracked(&drops),
                Tracked(&drops),
            ]);
            assert_eq!(drops.get(), 0);
            assert_eq!(queue.len(), 3);

            queue.pop();
            assert_eq!(drops.get(), 1);

            // tail is back at slot 0, so the ring wraps here
            queue.push(Tracked(&drops));
            assert!(queue.is_full());
            assert_eq!(drops.get(), 1);

            let copy = queue.clone();
            assert_eq!(copy.len(), 3);
            assert_eq!(drops.get(), 1);

            drop(copy);
            assert_eq!(drops.get(), 4);
            assert_eq!(queue.len(), 3);
        }
        assert_eq!(drops.get(), 7);
    }

    #[test]
    fn test_debug_and_hash_follow_logical_order() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        use super::Queue;

        let mut wrapped = Queue::<i32, 3>::from_array([1, 2]);
        wrapped.pop();
        wrapped.push(3);
        wrapped.push(4);
        let fresh = Queue::<i32, 3>::from_array([2, 3, 4]);

        assert_eq!(format!("{:?}", wrapped), "[2, 3, 4]");

        let hash = |q: &Queue<i32, 3>| {
            let mut hasher = DefaultHasher::new();
            q.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&wrapped), hash(&fresh));
    }

    #[test]
    fn test_const_evaluation() {
        use super::Queue;

        const BUILT: Queue<i32, 3> = {
            let queue = Queue::new();
            let mut copy = queue;
            copy.push(1);
            copy.push(2);
            copy
        };
        const _: () = assert!(BUILT.len() == 2);
        const _: () = assert!(*BUILT.front() == 1);
        const _: () = assert!(*BUILT.back() == 2);

        const FRONT: i32 = {
            let mut queue = Queue::<i32, 5>::new();
            queue.push(1);
            queue.push(2);
            queue.pop();
            *queue.emplace(3) += 10;

            let mut other = Queue::<i32, 5>::new();
            other.push(4);
            queue.swap(&mut other);
            *queue.front()
        };
        assert_eq!(FRONT, 4);

        const CLEARED: bool = {
            let mut queue = Queue::<i32, 5>::from_array([1, 2]);
            let moved = queue.take();
            queue.is_empty() && moved.len() == 2
        };
        assert!(CLEARED);

        const WRAPPED: (usize, i32, i32) = {
            let mut queue = Queue::<i32, 3>::new();
            queue.push(1);
            queue.push(2);
            queue.pop();
            queue.push(3);
            queue.push(4);
            (queue.len(), *queue.front(), *queue.back())
        };
        assert_eq!(WRAPPED, (3, 2, 4));

        const CHECKED: bool = {
            let mut queue = Queue::<u8, 1>::new();
            queue.try_push(1).is_ok() && queue.try_push(2).is_err() && queue.try_pop().is_ok()
        };
        assert!(CHECKED);

        const EMPTY: Queue<i32, 0> = Queue::new();
        const _: () = assert!(EMPTY.is_empty() && EMPTY.capacity() == 0);
    }
}
