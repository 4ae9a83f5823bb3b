//! Fixed-capacity operand stack.
//!
//! The evaluator sizes one of these to the token count of the expression it
//! is working on. Postfix evaluation pushes at most one item per token, so a
//! push past capacity can only come from an evaluator bug and panics.

/// A last-in-first-out container whose capacity is fixed at construction.
#[derive(Debug)]
pub struct BoundedStack<T> {
    items: Box<[Option<T>]>,
    len: usize,
}

impl<T> BoundedStack<T> {
    /// Create an empty stack holding at most `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: (0..capacity).map(|_| None).collect(),
            len: 0,
        }
    }

    /// Push an item on the stack.
    ///
    /// # Panics
    ///
    /// Panics if the stack is already full.
    pub fn push(&mut self, item: T) {
        assert!(
            self.len < self.items.len(),
            "BoundedStack overflow: capacity is {}",
            self.items.len()
        );
        self.items[self.len] = Some(item);
        self.len += 1;
    }

    /// Pop the top item, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.items[self.len].take()
    }

    /// Borrow the top item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.len
            .checked_sub(1)
            .and_then(|top| self.items[top].as_ref())
    }

    /// Discard everything on the stack. Capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in &mut self.items[..self.len] {
            *slot = None;
        }
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }
}
