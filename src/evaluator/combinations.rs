/// Iterator over every way to choose 5 indices from `0..n`, in lexicographic order.
///
/// Yields C(n,5) items: 1, 6 and 21 for n = 5, 6 and 7.
pub struct FiveCardCombinations {
    n: usize,
    indices: [usize; 5],
    done: bool,
}

impl FiveCardCombinations {
    pub fn new(n: usize) -> Self {
        Self { n, indices: [0, 1, 2, 3, 4], done: n < 5 }
    }
}

impl Iterator for FiveCardCombinations {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find the rightmost index that can still move right
        let mut i = 5;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.n - (5 - i) {
                self.indices[i] += 1;
                for j in (i + 1)..5 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(result)
    }
}
