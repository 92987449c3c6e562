/// Maps a 1-based navigation distance onto a zero-based slot of a stack
/// holding `size` entries, counting from the end of the stack.
///
/// Distance 1 is the entry adjacent to the current value, which always sits
/// in the last slot. Returns `None` for an empty stack, a zero distance, or a
/// distance past the oldest entry.
pub fn resolve(size: usize, distance: usize) -> Option<usize> {
    if size == 0 || distance == 0 {
        return None;
    }
    size.checked_sub(distance)
}
