use core::fmt;

/// Precondition violation reported by the checked queue operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError<T> {
    /// The queue is full. Carries the element that was rejected.
    Full(T),
    /// The queue holds no element.
    Empty,
}

impl<T> QueueError<T> {
    /// Hands back the rejected element, if the error carries one.
    pub fn into_item(self) -> Option<T> {
        match self {
            QueueError::Full(item) => Some(item),
            QueueError::Empty => None,
        }
    }
}

impl<T> fmt::Display for QueueError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Full(_) => f.write_str("queue is full"),
            QueueError::Empty => f.write_str("queue is empty"),
        }
    }
}

impl<T: fmt::Debug> core::error::Error for QueueError<T> {}

mod test {

    #[test]
    fn test_into_item() {
        use super::QueueError;

        assert_eq!(QueueError::Full(42).into_item(), Some(42));
        assert_eq!(QueueError::<i32>::Empty.into_item(), None);
    }

    #[test]
    fn test_display() {
        use super::QueueError;

        assert_eq!(QueueError::Full("x").to_string(), "queue is full");
        assert_eq!(QueueError::<u8>::Empty.to_string(), "queue is empty");
    }
}
