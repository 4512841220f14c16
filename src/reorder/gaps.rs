use crate::order::OrderIndex;

/// Report fillable gaps in an ascending sequence of order values.
///
/// A gap is a pair of consecutive values more than two units apart. Each gap
/// yields a single candidate, `lower + 1`, no matter how wide it is.
pub fn find_gaps<T: OrderIndex>(sorted: &[T]) -> Vec<T> {
    sorted
        .windows(2)
        .filter_map(|pair| match pair {
            [lower, upper] => {
                let candidate = lower.checked_add_one()?;
                let limit = candidate.checked_add_one()?;
                (limit < *upper).then_some(candidate)
            }
            _ => None,
        })
        .collect()
}
