use crate::cards::Rank;

/// Groups ranks by their frequency in a hand, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Create RankGroups from counts indexed by rank value (0-12).
    pub fn from_counts(rank_counts: &[u8; 13]) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .map(|&rank| (rank, rank_counts[rank.value() as usize]))
            .filter(|&(_, count)| count > 0)
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    /// Returns the rank of a four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.with_count(4).next()
    }

    /// Returns the rank of a three-of-a-kind, if present.
    pub fn trips(&self) -> Option<Rank> {
        self.with_count(3).next()
    }

    /// Returns all pair ranks, in descending order.
    pub fn pairs(&self) -> Vec<Rank> {
        self.with_count(2).collect()
    }

    /// Returns all singleton (kicker) ranks, in descending order.
    pub fn kickers(&self) -> Vec<Rank> {
        self.with_count(1).collect()
    }

    fn with_count(&self, n: u8) -> impl Iterator<Item = Rank> + '_ {
        self.groups.iter().filter(move |(_, count)| *count == n).map(|(rank, _)| *rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_counts(pairs: &[(Rank, u8)]) -> [u8; 13] {
        let mut counts = [0u8; 13];
        for &(rank, count) in pairs {
            counts[rank.value() as usize] = count;
        }
        counts
    }

    #[test]
    fn quad() {
        let groups = RankGroups::from_counts(&make_counts(&[(Rank::Ace, 4), (Rank::King, 1)]));
        assert_eq!(groups.quad(), Some(Rank::Ace));
        assert_eq!(groups.trips(), None);
        assert_eq!(groups.kickers(), vec![Rank::King]);
    }

    #[test]
    fn two_pair() {
        let groups = RankGroups::from_counts(&make_counts(&[
            (Rank::Ace, 2),
            (Rank::King, 2),
            (Rank::Ten, 1),
        ]));
        assert_eq!(groups.pairs(), vec![Rank::Ace, Rank::King]);
        assert_eq!(groups.kickers(), vec![Rank::Ten]);
    }

    #[test]
    fn kickers_sorted_descending() {
        let groups = RankGroups::from_counts(&make_counts(&[
            (Rank::Eight, 2),
            (Rank::Five, 1),
            (Rank::Ace, 1),
            (Rank::Queen, 1),
        ]));
        assert_eq!(groups.pairs(), vec![Rank::Eight]);
        assert_eq!(groups.kickers(), vec![Rank::Ace, Rank::Queen, Rank::Five]);
    }
}
