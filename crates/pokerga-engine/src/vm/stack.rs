use arrayvec::ArrayVec;

/// Upper bound on the configurable stack size.
pub const STACK_CAPACITY: usize = 64;

/// Fixed-capacity LIFO stack of signed bytes.
///
/// Storage is preallocated inline; `limit` further restricts how many values
/// may be held. A push onto a full stack is refused and reported by the
/// return value, never an error.
#[derive(Debug, Clone)]
pub(crate) struct Stack {
    values: ArrayVec<i8, STACK_CAPACITY>,
    limit: usize,
}

impl Stack {
    pub(crate) fn new(limit: usize) -> Self {
        debug_assert!(limit <= STACK_CAPACITY);
        Self {
            values: ArrayVec::new(),
            limit: limit.min(STACK_CAPACITY),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.values.len() >= self.limit
    }

    pub(crate) fn push(&mut self, value: i8) -> bool {
        if self.is_full() {
            return false;
        }
        self.values.push(value);
        true
    }

    pub(crate) fn pop(&mut self) -> Option<i8> {
        self.values.pop()
    }

    pub(crate) fn peek(&self) -> Option<i8> {
        self.values.last().copied()
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[i8] {
        &self.values
    }
}
