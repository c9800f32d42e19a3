//! Нечёткий поиск по строкам (approximate substring matching).
//!
//! Оценка совпадения: `errors / pattern_len + start / distance`, где
//! `errors` - редакционное расстояние между шаблоном и лучшей подстрокой
//! текста, `start` - позиция начала этой подстроки. Ноль означает точное
//! совпадение в начале строки. Записи с оценкой выше порога отбрасываются.

use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct FuzzySearch {
    pattern: Vec<char>,
    threshold: f64,
    distance: usize,
}

impl FuzzySearch {
    pub fn with_options(pattern: &str, threshold: f64, distance: usize) -> Self {
        Self {
            pattern: pattern.trim().to_lowercase().chars().collect(),
            threshold,
            distance,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Оценка совпадения текста с шаблоном; `None`, если хуже порога
    pub fn score(&self, text: &str) -> Option<f64> {
        if self.pattern.is_empty() {
            return Some(0.0);
        }

        let text: Vec<char> = text.to_lowercase().chars().collect();
        let m = self.pattern.len();

        let mut best = f64::INFINITY;
        for (errors, start) in best_substring_matches(&text, &self.pattern) {
            if errors >= m {
                continue;
            }
            let score = errors as f64 / m as f64 + self.location_penalty(start);
            if score < best {
                best = score;
            }
        }

        (best <= self.threshold).then_some(best)
    }

    /// Отбирает совпавшие элементы, лучшие совпадения первыми.
    /// При равной оценке сохраняется исходный порядок.
    pub fn search<T, F>(&self, items: &[T], key: F) -> Vec<T>
    where
        T: Clone,
        F: Fn(&T) -> &str,
    {
        if self.is_empty() {
            return items.to_vec();
        }

        let mut scored: Vec<(f64, &T)> = items
            .iter()
            .filter_map(|item| self.score(key(item)).map(|score| (score, item)))
            .collect();

        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|(_, item)| item.clone()).collect()
    }

    fn location_penalty(&self, start: usize) -> f64 {
        if self.distance == 0 {
            return if start == 0 { 0.0 } else { 1.0 };
        }
        start as f64 / self.distance as f64
    }
}

/// Для каждой конечной позиции текста - минимальное число правок,
/// превращающих шаблон в подстроку, заканчивающуюся в ней, и начало
/// этой подстроки.
fn best_substring_matches(text: &[char], pattern: &[char]) -> Vec<(usize, usize)> {
    // (cost, start)
    let mut prev: Vec<(usize, usize)> = (0..=text.len()).map(|j| (0, j)).collect();
    let mut cur: Vec<(usize, usize)> = vec![(0, 0); text.len() + 1];

    for (i, pc) in pattern.iter().enumerate() {
        cur[0] = (i + 1, 0);
        for j in 1..=text.len() {
            let substitution = if text[j - 1] == *pc { 0 } else { 1 };
            let candidates = [
                (prev[j - 1].0 + substitution, prev[j - 1].1),
                (prev[j].0 + 1, prev[j].1),
                (cur[j - 1].0 + 1, cur[j - 1].1),
            ];
            cur[j] = candidates
                .into_iter()
                .min()
                .unwrap_or((usize::MAX, j));
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev.into_iter().skip(1).collect()
}
