use crate::{Error, Result};

/// A last-in, first-out stack kept as a singly linked list of cells, with the
/// top of the stack at the head of the list.
pub struct Stack<T> {
    list: Option<Box<Cell<T>>>,
    count: usize,
}

struct Cell<T> {
    data: T,
    link: Option<Box<Cell<T>>>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: None,
            count: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        let mut link = self.list.take();
        while let Some(mut cell) = link {
            link = cell.link.take();
        }
        self.count = 0;
    }

    pub fn push(&mut self, value: T) {
        self.list = Some(Box::new(Cell {
            data: value,
            link: self.list.take(),
        }));
        self.count += 1;
    }

    /// ## Errors
    ///
    /// Returns [`Error::Empty`] if the stack has no elements.
    pub fn pop(&mut self) -> Result<T> {
        let cell = self.list.take().ok_or(Error::Empty {
            op: "pop",
            container: "stack",
        })?;

        let Cell { data, link } = *cell;
        self.list = link;
        self.count -= 1;
        Ok(data)
    }

    /// ## Errors
    ///
    /// Returns [`Error::Empty`] if the stack has no elements.
    pub fn peek(&self) -> Result<&T> {
        self.list.as_deref().map(|cell| &cell.data).ok_or(Error::Empty {
            op: "peek",
            container: "stack",
        })
    }

    /// Iterates from the top of the stack to the bottom.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.list.as_deref(),
        }
    }
}

pub struct Iter<'a, T> {
    cursor: Option<&'a Cell<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cursor?;
        self.cursor = cell.link.as_deref();
        Some(&cell.data)
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Copies every cell, preserving the order of the stack.
impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        let items: Vec<&T> = self.iter().collect();

        let mut copy = Self::new();
        for value in items.into_iter().rev() {
            copy.push(value.clone());
        }
        copy
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_peek() {
        let mut stack = Stack::new();
        assert_eq!(stack.len(), 0);
        assert!(stack.is_empty());

        stack.push('A');
        assert!(!stack.is_empty());
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek(), Ok(&'A'));

        stack.push('B');
        assert_eq!(stack.peek(), Ok(&'B'));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Ok('B'));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek(), Ok(&'A'));

        stack.push('C');
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Ok('C'));
        assert_eq!(stack.peek(), Ok(&'A'));
        assert_eq!(stack.pop(), Ok('A'));
        assert_eq!(stack.len(), 0);

        for ch in 'A'..='Z' {
            stack.push(ch);
        }
        assert_eq!(stack.len(), 26);
        for ch in ('A'..='Z').rev() {
            assert_eq!(stack.pop(), Ok(ch));
        }
        assert!(stack.is_empty());
    }

    #[test]
    fn empty_stack_errors() {
        let mut stack = Stack::<u8>::new();

        assert_eq!(
            stack.pop(),
            Err(Error::Empty {
                op: "pop",
                container: "stack"
            })
        );
        assert_eq!(
            stack.peek(),
            Err(Error::Empty {
                op: "peek",
                container: "stack"
            })
        );
    }

    #[test]
    fn clone_preserves_order() {
        let mut stack = Stack::new();
        for i in 0..5 {
            stack.push(i);
        }

        let mut copy = stack.clone();
        stack.clear();

        assert_eq!(copy.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);
        assert_eq!(copy.pop(), Ok(4));
        assert!(stack.is_empty());
    }

    #[test]
    fn long_chain_drops() {
        let mut stack = Stack::new();
        for i in 0..200_000 {
            stack.push(i);
        }
        drop(stack);
    }
}
