//! Rolling maximum: highest close over a trailing window.
//!
//! `out[i] = max(values[i+1-window..=i])`, undefined for the first
//! `window - 1` entries. Computed in O(n) with a monotonic deque of indices
//! whose values are strictly decreasing from front to back.
//!
//! Inputs are expected to be finite; the fetch layer drops non-finite closes.

use std::collections::VecDeque;

/// Trailing window used by the trading signal.
pub const DEFAULT_WINDOW: usize = 99;

pub fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    let mut deque: VecDeque<usize> = VecDeque::with_capacity(window);
    for (i, &value) in values.iter().enumerate() {
        while let Some(&back) = deque.back() {
            if values[back] <= value {
                deque.pop_back();
            } else {
                break;
            }
        }
        deque.push_back(i);

        if let Some(&front) = deque.front() {
            if front + window <= i {
                deque.pop_front();
            }
        }

        if i + 1 >= window {
            out[i] = deque.front().map(|&idx| values[idx]);
        }
    }

    out
}
