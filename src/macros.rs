//! Macros for writing counter states the way they appear on the diagram.

/// Build a `CounterState` from four 0/1 literals, most significant first.
///
/// # Example
///
/// ```
/// use ripple::counter_state;
///
/// let ten = counter_state![1, 0, 1, 0];
/// assert_eq!(ten.value(), 10);
/// ```
#[macro_export]
macro_rules! counter_state {
    ($d:expr, $c:expr, $b:expr, $a:expr $(,)?) => {
        $crate::core::CounterState::from_bits([$d != 0, $c != 0, $b != 0, $a != 0])
    };
}
