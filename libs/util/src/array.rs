/// Pushes `value` unless it is absent or already present.
///
/// Returns the new length, or `0` when nothing was pushed.
pub fn dedupe_append<T: PartialEq>(set: &mut Vec<T>, value: Option<T>) -> usize {
    let Some(value) = value else {
        return 0;
    };
    if set.contains(&value) {
        return 0;
    }

    set.push(value);
    set.len()
}
