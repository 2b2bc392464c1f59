use crossbeam::utils::CachePadded;
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A bounded, wait-free single-producer single-consumer ring buffer.
///
/// One slot is sacrificed to disambiguate full from empty, so a ring built
/// with `capacity` slots holds at most `capacity - 1` items at a time.
///
/// `head` and `tail` are padded onto separate cache lines so the producer's
/// writes to `tail` never cause a false-sharing stall on the consumer's reads
/// of `head`, and vice versa.
///
/// This type must never be used with more than one producer or more than one
/// consumer. `channel()` enforces that by handing out exactly one
/// [`Producer`] and one [`Consumer`], neither of which implements `Clone`.
struct Inner<T> {
    buffer: Box<[UnsafeCell<MaybeUninit<T>>]>,
    capacity: usize,
    head: CachePadded<AtomicUsize>,
    tail: CachePadded<AtomicUsize>,
}

// SAFETY: access to `buffer` slots is serialized by the SPSC head/tail
// protocol below. The producer only ever writes the slot at `tail` and the
// consumer only ever reads the slot at `head`, and the two never overlap.
unsafe impl<T: Send> Send for Inner<T> {}
unsafe impl<T: Send> Sync for Inner<T> {}

impl<T> Inner<T> {
    fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "ring capacity must be at least 2");
        let buffer = (0..capacity)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            buffer,
            capacity,
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
        }
    }
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        let mut head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        while head != tail {
            // SAFETY: every slot strictly between head and tail is initialized
            // and has not yet been read out.
            unsafe {
                (*self.buffer[head].get()).assume_init_drop();
            }
            head = (head + 1) % self.capacity;
        }
    }
}

/// The producer half of a ring buffer. Callable from exactly one thread.
pub struct Producer<T> {
    inner: Arc<Inner<T>>,
}

/// The consumer half of a ring buffer. Callable from exactly one thread.
pub struct Consumer<T> {
    inner: Arc<Inner<T>>,
}

unsafe impl<T: Send> Send for Producer<T> {}
unsafe impl<T: Send> Send for Consumer<T> {}

/// Creates a fresh ring buffer of the given capacity and splits it into its
/// producer and consumer endpoints. There is no way to obtain a second handle
/// to either endpoint. Each is move-only.
pub fn channel<T>(capacity: usize) -> (Producer<T>, Consumer<T>) {
    let inner = Arc::new(Inner::new(capacity));
    (
        Producer {
            inner: inner.clone(),
        },
        Consumer { inner },
    )
}

impl<T> Producer<T> {
    /// Enqueues `item` by value. Returns `Err(item)`, handing the item back,
    /// if the ring is full; this is normal backpressure, not an error.
    #[inline]
    pub fn push(&self, item: T) -> Result<(), T> {
        let tail = self.inner.tail.load(Ordering::Relaxed);
        let next = (tail + 1) % self.inner.capacity;

        if next == self.inner.head.load(Ordering::Acquire) {
            return Err(item);
        }

        // SAFETY: slot `tail` is not visible to the consumer until the
        // `tail` store below, and only the producer ever writes this slot.
        unsafe {
            (*self.inner.buffer[tail].get()).write(item);
        }
        self.inner.tail.store(next, Ordering::Release);
        Ok(())
    }

    /// Approximate fullness check. May be stale by the time the caller acts
    /// on it (only `push`'s return value is authoritative).
    pub fn is_full(&self) -> bool {
        let tail = self.inner.tail.load(Ordering::Relaxed);
        let next = (tail + 1) % self.inner.capacity;
        next == self.inner.head.load(Ordering::Acquire)
    }
}

impl<T> Consumer<T> {
    /// Dequeues the oldest item, or `None` if the ring is currently empty.
    #[inline]
    pub fn pop(&self) -> Option<T> {
        let head = self.inner.head.load(Ordering::Relaxed);
        if head == self.inner.tail.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: slot `head` was published by the producer's `tail` store
        // and has not yet been read; only the consumer ever reads this slot.
        let item = unsafe { (*self.inner.buffer[head].get()).assume_init_read() };
        self.inner
            .head
            .store((head + 1) % self.inner.capacity, Ordering::Release);
        Some(item)
    }

    /// `true` if the ring currently holds no items. Approximate, since a
    /// concurrent producer may push between the check and the caller's next
    /// action.
    pub fn is_empty(&self) -> bool {
        self.inner.head.load(Ordering::Relaxed) == self.inner.tail.load(Ordering::Acquire)
    }
}
