//! Minimum-cost rectangular assignment.
//!
//! Solves the linear sum assignment problem for a dense real cost matrix:
//! a one-to-one pairing between rows and columns that minimizes the total
//! assigned cost. With unequal side lengths, every element of the shorter
//! side is matched and the surplus of the longer side stays unmatched.
//!
//! The implementation is the shortest-augmenting-path method with dual
//! potentials: one Dijkstra-like sweep per row, O(n³) overall, exact for
//! any finite cost matrix. The grid solver feeds it |peak − grid line|
//! distances, where matrices are small and exactness matters more than
//! asymptotics.
use nalgebra::DMatrix;

/// An optimal matching: `pairs[k] = (row, column)`, ordered by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub pairs: Vec<(usize, usize)>,
    pub total_cost: f64,
}

/// Find a minimum-cost one-to-one matching for `cost`.
///
/// All entries must be finite.
pub fn min_cost_assignment(cost: &DMatrix<f64>) -> Assignment {
    let (nrows, ncols) = cost.shape();
    if nrows == 0 || ncols == 0 {
        return Assignment {
            pairs: Vec::new(),
            total_cost: 0.0,
        };
    }
    debug_assert!(cost.iter().all(|c| c.is_finite()));

    // The augmenting sweep wants rows <= cols; transpose and swap back.
    if nrows > ncols {
        let transposed = cost.transpose();
        let mut solution = solve(&transposed);
        for pair in solution.pairs.iter_mut() {
            *pair = (pair.1, pair.0);
        }
        solution.pairs.sort_unstable();
        return solution;
    }
    solve(cost)
}

fn solve(cost: &DMatrix<f64>) -> Assignment {
    let (nr, nc) = cost.shape();

    // Dual potentials for rows and columns.
    let mut u = vec![0.0f64; nr];
    let mut v = vec![0.0f64; nc];
    let mut col4row: Vec<Option<usize>> = vec![None; nr];
    let mut row4col: Vec<Option<usize>> = vec![None; nc];

    let mut shortest = vec![f64::INFINITY; nc];
    let mut pred = vec![0usize; nc];
    let mut visited_rows = vec![false; nr];
    let mut visited_cols = vec![false; nc];

    for cur_row in 0..nr {
        shortest.fill(f64::INFINITY);
        visited_rows.fill(false);
        visited_cols.fill(false);

        let mut min_val = 0.0;
        let mut i = cur_row;
        let sink;
        loop {
            visited_rows[i] = true;

            let mut lowest = f64::INFINITY;
            let mut next_col = usize::MAX;
            for j in 0..nc {
                if visited_cols[j] {
                    continue;
                }
                let reduced = min_val + cost[(i, j)] - u[i] - v[j];
                if reduced < shortest[j] {
                    shortest[j] = reduced;
                    pred[j] = i;
                }
                // Prefer an unassigned column on ties to reach a sink sooner.
                if shortest[j] < lowest || (shortest[j] == lowest && row4col[j].is_none()) {
                    lowest = shortest[j];
                    next_col = j;
                }
            }

            // Finite costs guarantee some unvisited column remains reachable.
            debug_assert!(next_col != usize::MAX);
            min_val = lowest;
            visited_cols[next_col] = true;
            match row4col[next_col] {
                None => {
                    sink = next_col;
                    break;
                }
                Some(assigned) => i = assigned,
            }
        }

        // Update the duals along the alternating tree.
        u[cur_row] += min_val;
        for (ip, visited) in visited_rows.iter().enumerate() {
            if *visited && ip != cur_row {
                let j = col4row[ip].expect("visited row is assigned");
                u[ip] += min_val - shortest[j];
            }
        }
        for j in 0..nc {
            if visited_cols[j] {
                v[j] -= min_val - shortest[j];
            }
        }

        // Augment: flip assignments back along the predecessor chain.
        let mut j = sink;
        loop {
            let ip = pred[j];
            row4col[j] = Some(ip);
            let previous = col4row[ip].replace(j);
            if ip == cur_row {
                break;
            }
            j = previous.expect("interior rows on the path were assigned");
        }
    }

    let mut pairs = Vec::with_capacity(nr);
    let mut total_cost = 0.0;
    for (row, assigned) in col4row.iter().enumerate() {
        let col = assigned.expect("every row is matched when rows <= cols");
        pairs.push((row, col));
        total_cost += cost[(row, col)];
    }
    Assignment { pairs, total_cost }
}
