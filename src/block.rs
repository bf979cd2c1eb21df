/// Read-side view of a logical block of FIFO data.
///
/// A block covers a single logically contiguous region of the FIFO that may
/// be physically split into two disjoint views when it wraps past the end of
/// the backing buffer. The views alias the owning
/// [`RingFifo`](crate::RingFifo)'s storage, so the block borrows the FIFO and
/// cannot outlive its next mutating call.
///
/// Treat the two views as one sequence: every element of [`first`] precedes
/// every element of [`second`].
///
/// [`first`]: DataBlock::first
/// [`second`]: DataBlock::second
#[derive(Debug)]
pub struct DataBlock<'a, T> {
    first: &'a [T],
    second: &'a [T],
}

impl<'a, T> DataBlock<'a, T> {
    pub(crate) fn new(first: &'a [T], second: &'a [T]) -> Self {
        Self { first, second }
    }

    /// Returns true if the block holds any data (the first view is non-empty).
    ///
    /// A zero-length request yields an invalid (empty) block.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.first.is_empty()
    }

    /// Returns true if the block wrapped past the end of the buffer and is
    /// split across two views.
    #[inline]
    pub fn is_split(&self) -> bool {
        !self.second.is_empty()
    }

    /// Combined length of both views; equals the requested size.
    #[inline]
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    /// Returns true if the block holds no data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// The view starting at the block's logical beginning.
    #[inline]
    pub fn first(&self) -> &[T] {
        self.first
    }

    /// The wrapped remainder, empty unless [`is_split`](Self::is_split).
    #[inline]
    pub fn second(&self) -> &[T] {
        self.second
    }

    /// Iterates the block in logical order, first view then second.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.first.iter().chain(self.second.iter())
    }

    /// Copies the block's contents into `dst` in logical order.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len() != self.len()`, like `slice::copy_from_slice`.
    pub fn copy_to_slice(&self, dst: &mut [T])
    where
        T: Copy,
    {
        assert_eq!(
            dst.len(),
            self.len(),
            "destination length {} does not match block length {}",
            dst.len(),
            self.len()
        );
        let split = self.first.len();
        dst[..split].copy_from_slice(self.first);
        dst[split..].copy_from_slice(self.second);
    }

    /// Collects the block's contents into a `Vec` in logical order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(self.first);
        out.extend_from_slice(self.second);
        out
    }
}

/// Write-side view of a reserved block, returned by
/// [`RingFifo::reserve`](crate::RingFifo::reserve).
///
/// The producer writes directly into the views, drops the block, then calls
/// [`commit`](crate::RingFifo::commit) to make the data readable. Like
/// [`DataBlock`], the two views are one logical sequence that may wrap.
#[derive(Debug)]
pub struct DataBlockMut<'a, T> {
    first: &'a mut [T],
    second: &'a mut [T],
}

impl<'a, T> DataBlockMut<'a, T> {
    pub(crate) fn new(first: &'a mut [T], second: &'a mut [T]) -> Self {
        Self { first, second }
    }

    /// Returns true if the block holds any writable space.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.first.is_empty()
    }

    /// Returns true if the reservation wrapped and is split across two views.
    #[inline]
    pub fn is_split(&self) -> bool {
        !self.second.is_empty()
    }

    /// Combined length of both views; equals the reserved size.
    #[inline]
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    /// Returns true if the block holds no writable space.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// The view starting at the block's logical beginning.
    #[inline]
    pub fn first(&self) -> &[T] {
        &*self.first
    }

    /// The wrapped remainder, empty unless [`is_split`](Self::is_split).
    #[inline]
    pub fn second(&self) -> &[T] {
        &*self.second
    }

    /// Mutable access to the first view.
    #[inline]
    pub fn first_mut(&mut self) -> &mut [T] {
        &mut *self.first
    }

    /// Mutable access to the wrapped remainder.
    #[inline]
    pub fn second_mut(&mut self) -> &mut [T] {
        &mut *self.second
    }

    /// Iterates the block mutably in logical order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.first.iter_mut().chain(self.second.iter_mut())
    }

    /// Fills the block from `src` in logical order.
    ///
    /// # Panics
    ///
    /// Panics if `src.len() != self.len()`, like `slice::copy_from_slice`.
    pub fn copy_from_slice(&mut self, src: &[T])
    where
        T: Copy,
    {
        assert_eq!(
            src.len(),
            self.len(),
            "source length {} does not match block length {}",
            src.len(),
            self.len()
        );
        let split = self.first.len();
        self.first.copy_from_slice(&src[..split]);
        self.second.copy_from_slice(&src[split..]);
    }
}
