//! Tests for patrol history.

#[cfg(test)]
mod tests {
    use super::super::history::RecentHistory;

    #[test]
    fn test_default_limit() {
        let history = RecentHistory::default();
        assert_eq!(history.limit(), 4);
        assert!(history.is_empty());
    }

    #[test]
    fn test_evicts_oldest() {
        let mut history = RecentHistory::default();
        for index in 0..6 {
            history.push(index);
        }

        assert_eq!(history.len(), 4);
        assert_eq!(history.to_vec(), vec![2, 3, 4, 5]);
        assert!(!history.contains(1));
        assert_eq!(history.last(), Some(5));
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let mut history = RecentHistory::new(3);
        history.push(1);
        history.push(1);
        history.push(2);
        history.push(1);

        assert_eq!(history.to_vec(), vec![1, 2, 1]);
    }

    #[test]
    fn test_huge_limit_does_not_preallocate() {
        let mut history = RecentHistory::new(usize::MAX);
        history.push(7);

        assert_eq!(history.limit(), usize::MAX);
        assert_eq!(history.to_vec(), vec![7]);
    }
}
