use crate::cards::Rank;

/// Whether five ranks form a straight and, if so, its top rank.
/// Aces only play high: A-2-3-4-5 is not a straight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    pub fn detect(ranks: &[Rank; 5]) -> Self {
        let mut sorted_ranks = *ranks;
        sorted_ranks.sort_by(|a, b| b.cmp(a));

        let is_consecutive =
            (0..4).all(|i| sorted_ranks[i].value() == sorted_ranks[i + 1].value() + 1);

        if is_consecutive {
            StraightInfo { is_straight: true, top_rank: Some(sorted_ranks[0]) }
        } else {
            StraightInfo { is_straight: false, top_rank: None }
        }
    }
}
