//! Tests for the deduplicating propagation stack

#[cfg(test)]
mod tests {
    use wavetile::algorithm::stack::PropagationStack;

    // Tests a waiting cell is not pushed twice
    // Verified by removing the queued flag check
    #[test]
    fn test_push_deduplicates() {
        let mut stack = PropagationStack::new(4);
        stack.push(1);
        stack.push(2);
        stack.push(1);

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    // Tests a popped cell may be pushed again
    // Verified by leaving the queued flag set on pop
    #[test]
    fn test_repush_after_pop() {
        let mut stack = PropagationStack::new(2);
        stack.push(0);
        assert_eq!(stack.pop(), Some(0));

        stack.push(0);
        assert_eq!(stack.len(), 1);
    }

    // Tests reset clears queued flags as well as items
    // Verified by clearing items without touching flags
    #[test]
    fn test_reset_clears_flags() {
        let mut stack = PropagationStack::new(3);
        stack.push(0);
        stack.push(2);
        stack.reset().push(2);

        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop(), Some(2));
        assert!(stack.is_empty());
    }

    // Tests cells outside the capacity are ignored
    // Verified by flagging cells without a bounds check
    #[test]
    fn test_push_out_of_range_ignored() {
        let mut stack = PropagationStack::new(2);
        stack.push(5);

        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }
}
