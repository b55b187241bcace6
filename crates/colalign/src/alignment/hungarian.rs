//! Linear assignment (Hungarian algorithm) over integer costs.
//!
//! Dense O(n^3) potentials formulation. Rectangular inputs are padded to a
//! square matrix with a constant cost.

/// Minimum-cost assignment for a square cost matrix: `result[row] = column`.
fn solve_square(costs: &[Vec<i64>]) -> Vec<usize> {
    let n = costs.len();
    if n == 0 {
        return Vec::new();
    }
    debug_assert!(costs.iter().all(|row| row.len() == n));

    let inf = i64::MAX / 4;
    // Potentials and matching are 1-based; index 0 is the virtual source.
    let mut row_pot = vec![0i64; n + 1];
    let mut col_pot = vec![0i64; n + 1];
    let mut owner = vec![0usize; n + 1];
    let mut prev = vec![0usize; n + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut col = 0usize;
        let mut slack = vec![inf; n + 1];
        let mut visited = vec![false; n + 1];

        loop {
            visited[col] = true;
            let current_row = owner[col];
            let mut delta = inf;
            let mut next_col = 0usize;

            for j in 1..=n {
                if visited[j] {
                    continue;
                }
                let reduced = costs[current_row - 1][j - 1] - row_pot[current_row] - col_pot[j];
                if reduced < slack[j] {
                    slack[j] = reduced;
                    prev[j] = col;
                }
                if slack[j] < delta {
                    delta = slack[j];
                    next_col = j;
                }
            }

            for j in 0..=n {
                if visited[j] {
                    row_pot[owner[j]] += delta;
                    col_pot[j] -= delta;
                } else {
                    slack[j] -= delta;
                }
            }

            col = next_col;
            if owner[col] == 0 {
                break;
            }
        }

        // Augment along the alternating path back to the source.
        loop {
            let back = prev[col];
            owner[col] = owner[back];
            col = back;
            if col == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; n];
    for j in 1..=n {
        if owner[j] > 0 {
            assignment[owner[j] - 1] = j - 1;
        }
    }
    assignment
}

/// Minimum-cost assignment for a rectangular matrix.
///
/// Returns one entry per input row: `Some(column)`, or `None` when the row
/// was matched to a padding column.
pub(crate) fn solve_rect(costs: &[Vec<i64>], cols: usize, pad_cost: i64) -> Vec<Option<usize>> {
    let rows = costs.len();
    let size = rows.max(cols);
    if size == 0 {
        return Vec::new();
    }

    let mut square = vec![vec![pad_cost; size]; size];
    for (i, row) in costs.iter().enumerate() {
        square[i][..row.len()].copy_from_slice(row);
    }

    solve_square(&square)
        .into_iter()
        .take(rows)
        .map(|j| (j < cols).then_some(j))
        .collect()
}
