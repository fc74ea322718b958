use crate::Vec;
use alloc::fmt;
use alloc::vec::Drain;

/// The operand stack, with maximum size enforcement in debug mode.
///
/// The compiler computes the exact maximum depth of every program, so
/// exceeding it means the compiler and the VM disagree. That is only checked
/// in debug builds.
///
/// # Examples
///
/// ```ignore
/// use stellar_core::vm::Stack;
///
/// let mut stack = Stack::new(100);
/// stack.push(42);
/// stack.push(17);
/// assert_eq!(stack.pop(), Some(17));
/// assert_eq!(stack.peek(), Some(&42));
/// assert_eq!(stack.len(), 1);
/// ```
pub struct Stack<T> {
    items: Vec<T>,
    /// Maximum allowed stack size (enforced in debug mode only).
    max_size: usize,
}

impl<T> Stack<T> {
    pub fn new(max_size: usize) -> Self {
        // Pre-allocate a reasonable amount (min of max_size or 256)
        let initial_capacity = max_size.min(256);

        Self {
            items: Vec::with_capacity(initial_capacity),
            max_size,
        }
    }

    /// Pushes a value onto the stack.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the stack is already at maximum capacity.
    #[inline]
    pub fn push(&mut self, value: T) {
        debug_assert!(
            self.items.len() < self.max_size,
            "Stack overflow: attempted to push beyond maximum size of {}",
            self.max_size
        );
        self.items.push(value);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the maximum capacity of the stack.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Removes the top `n` elements and yields them from bottom to top, so
    /// the first item is the oldest of the `n` and the last item was the top.
    ///
    /// Returns `None`, leaving the stack untouched, if there are fewer than
    /// `n` elements.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut stack = Stack::new(100);
    /// stack.push(10);
    /// stack.push(20);
    /// stack.push(30);
    ///
    /// let top: Vec<_> = stack.pop_n(2).unwrap().collect();
    /// assert_eq!(top, [20, 30]);
    /// assert_eq!(stack.len(), 1);
    /// ```
    #[inline]
    pub fn pop_n(&mut self, n: usize) -> Option<Drain<'_, T>> {
        let len = self.items.len();
        if n > len {
            None
        } else {
            Some(self.items.drain(len - n..))
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("items", &self.items)
            .field("len", &self.items.len())
            .field("capacity", &self.max_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stack() {
        let stack: Stack<i32> = Stack::new(100);
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.capacity(), 100);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_push_pop() {
        let mut stack = Stack::new(100);
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.peek(), Some(&2));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_pop_n_keeps_push_order() {
        let mut stack = Stack::new(100);
        for i in 1..=4 {
            stack.push(i);
        }

        let top: Vec<_> = stack.pop_n(3).unwrap().collect();
        assert_eq!(top, [2, 3, 4]);
        assert_eq!(stack.len(), 1);

        assert!(stack.pop_n(2).is_none());
        assert_eq!(stack.len(), 1);

        assert_eq!(stack.pop_n(0).map(|d| d.count()), Some(0));
    }

    #[test]
    #[should_panic(expected = "Stack overflow")]
    #[cfg(debug_assertions)]
    fn test_overflow_debug() {
        let mut stack = Stack::new(2);
        stack.push(1);
        stack.push(2);
        stack.push(3); // Should panic in debug mode
    }
}
