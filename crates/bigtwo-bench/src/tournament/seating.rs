/// Every way of seating agents `0..4`, in lexicographic order.
pub const ALL_SEATINGS: usize = 24;

/// The first `count` seatings; `[0, 1, 2, 3]` always comes first.
pub fn seatings(count: usize) -> Vec<[usize; 4]> {
    (0..256usize)
        .map(|code| [code >> 6 & 3, code >> 4 & 3, code >> 2 & 3, code & 3])
        .filter(|seating| (0..4).all(|agent| seating.contains(&agent)))
        .take(count.min(ALL_SEATINGS))
        .collect()
}
