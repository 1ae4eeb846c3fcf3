//! Partial-ratio similarity scoring
//!
//! The shorter string is aligned against every substring of the longer one
//! (a semi-global alignment: the window in the longer string may start and
//! end anywhere for free). Insertions and deletions cost 1; a mismatch is
//! handled as one of each. For the best window the score is
//!
//! ```text
//! 100 * (len_short + len_window - distance) / (len_short + len_window)
//! ```
//!
//! rounded to the nearest integer, the indel similarity familiar from
//! Levenshtein-ratio tooling.

/// One cell of the alignment table: cost so far and where in the longer
/// string the aligned window started
#[derive(Debug, Clone, Copy)]
struct Cell {
    cost: usize,
    start: usize,
}

impl Cell {
    /// Lower cost wins; on a tie the later start gives a shorter window
    fn beats(&self, other: &Cell) -> bool {
        self.cost < other.cost || (self.cost == other.cost && self.start > other.start)
    }
}

/// Scores how well the shorter of `a` and `b` appears inside the longer one
///
/// Returns a value between 0 and 100. Comparison is exact on characters;
/// callers lowercase beforehand when case should not matter.
///
/// # Examples
///
/// ```
/// use smart_inspector::matcher::partial_ratio;
///
/// assert_eq!(partial_ratio("guide", "the go with guide site"), 100);
/// assert!(partial_ratio("gowithguide", "visit go with guide today") >= 85);
/// assert!(partial_ratio("gowithguide", "completely unrelated text") < 50);
/// ```
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }

    let m = short.len();

    // Row i holds the best alignment of short[..i] ending at each position
    // of `long`; row 0 lets a window open anywhere at zero cost.
    let mut prev: Vec<Cell> = (0..=long.len())
        .map(|j| Cell { cost: 0, start: j })
        .collect();

    for (i, &sc) in short.iter().enumerate() {
        let mut row = Vec::with_capacity(long.len() + 1);
        row.push(Cell {
            cost: i + 1,
            start: 0,
        });

        for (j, &lc) in long.iter().enumerate() {
            // Skip a character of the shorter string
            let mut best = Cell {
                cost: prev[j + 1].cost + 1,
                start: prev[j + 1].start,
            };

            // Absorb a character of the longer string into the window
            let left: Cell = row[j];
            let absorb = Cell {
                cost: left.cost + 1,
                start: left.start,
            };
            if absorb.beats(&best) {
                best = absorb;
            }

            if sc == lc && prev[j].beats(&best) {
                best = prev[j];
            }

            row.push(best);
        }

        prev = row;
    }

    let mut best_score = 0.0_f64;
    for (end, cell) in prev.iter().enumerate() {
        let window = end - cell.start;
        let total = m + window;
        let matched = total.saturating_sub(cell.cost);
        let score = matched as f64 / total as f64;
        if score > best_score {
            best_score = score;
        }
    }

    (best_score * 100.0).round() as u8
}
