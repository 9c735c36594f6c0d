//! あいまい一致（fuzzy match）
//!
//! 検索語と対象文字列を小文字化して比較し、一致の良さをスコアにする。
//! スコアは 0 が最良で、悪い一致ほど小さい（負の値）。
//!
//! ## 一致の段階
//! 1. 連続した部分文字列として含む
//! 2. 順序を保った部分列として含む（間に別の文字が挟まる）
//! 3. 隣り合う2文字を入れ替えれば 1 か 2 になる（打ち間違い）
//!
//! 小文字化は検索語・対象とも1文字ずつ行う（文脈で変わる小文字化をしない）

/// スコア下限の既定値。実質的に足切りしない
pub const DEFAULT_THRESHOLD: f64 = -10_000.0;

const NOT_WORD_START_PENALTY: f64 = 10.0;
const UNMATCHED_CHAR_PENALTY: f64 = 0.1;
const SUBSEQUENCE_BASE: f64 = -30.0;
const GAP_PENALTY: f64 = 5.0;
const TYPO_BASE: f64 = -100.0;
/// 誤字扱いする検索語の最小文字数
const TYPO_MIN_TERM_LEN: usize = 3;

/// 検索対象として前処理した文字列
#[derive(Debug, Clone, Default)]
pub struct Prepared {
    chars: Vec<char>,
    word_starts: Vec<bool>,
    /// (開始位置, 小文字の単語)
    words: Vec<(usize, String)>,
}

impl Prepared {
    pub fn new(target: &str) -> Self {
        let mut chars = Vec::with_capacity(target.len());
        let mut word_starts = Vec::with_capacity(target.len());
        let mut prev: Option<char> = None;

        for c in target.chars() {
            let is_start = c.is_alphanumeric()
                && match prev {
                    None => true,
                    Some(p) => !p.is_alphanumeric() || (p.is_lowercase() && c.is_uppercase()),
                };
            for (i, lower) in c.to_lowercase().enumerate() {
                chars.push(lower);
                word_starts.push(is_start && i == 0);
            }
            prev = Some(c);
        }

        let mut words = Vec::new();
        let mut current: Option<(usize, String)> = None;
        for (i, &c) in chars.iter().enumerate() {
            if c.is_alphanumeric() {
                current.get_or_insert_with(|| (i, String::new())).1.push(c);
            } else if let Some(word) = current.take() {
                words.push(word);
            }
        }
        words.extend(current);

        Self {
            chars,
            word_starts,
            words,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn unmatched_penalty(&self, matched: usize) -> f64 {
        self.chars.len().saturating_sub(matched) as f64 * UNMATCHED_CHAR_PENALTY
    }

    fn start_penalty(&self, pos: usize) -> f64 {
        let not_word_start = if self.word_starts[pos] {
            0.0
        } else {
            NOT_WORD_START_PENALTY
        };
        pos as f64 + not_word_start
    }
}

/// 前処理した検索語
#[derive(Debug, Clone)]
pub struct Term {
    chars: Vec<char>,
}

impl Term {
    pub fn new(term: &str) -> Self {
        let chars = term.trim().chars().flat_map(char::to_lowercase).collect();
        Self { chars }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// 検索語を対象文字列に当ててスコアを返す。一致しなければ None
pub fn score(term: &Term, target: &Prepared, allow_typo: bool) -> Option<f64> {
    if term.is_empty() || target.is_empty() {
        return None;
    }

    substring_score(term, target)
        .or_else(|| subsequence_score(term, target))
        .or_else(|| {
            if allow_typo {
                typo_score(term, target)
            } else {
                None
            }
        })
}

fn substring_score(term: &Term, target: &Prepared) -> Option<f64> {
    let n = term.chars.len();
    if n > target.chars.len() {
        return None;
    }

    (0..=target.chars.len() - n)
        .filter(|&pos| target.chars[pos..pos + n] == term.chars[..])
        .map(|pos| -target.start_penalty(pos) - target.unmatched_penalty(n))
        .max_by(f64::total_cmp)
}

fn subsequence_score(term: &Term, target: &Prepared) -> Option<f64> {
    let mut positions = Vec::with_capacity(term.chars.len());
    let mut from = 0;

    for &c in &term.chars {
        let offset = target.chars[from..].iter().position(|&t| t == c)?;
        positions.push(from + offset);
        from += offset + 1;
    }

    let gaps = positions.windows(2).filter(|w| w[1] != w[0] + 1).count();
    let first = positions[0];

    Some(
        SUBSEQUENCE_BASE
            - gaps as f64 * GAP_PENALTY
            - target.start_penalty(first)
            - target.unmatched_penalty(positions.len()),
    )
}

fn typo_score(term: &Term, target: &Prepared) -> Option<f64> {
    if term.chars.len() < TYPO_MIN_TERM_LEN {
        return None;
    }

    (0..term.chars.len() - 1)
        .filter(|&i| term.chars[i] != term.chars[i + 1])
        .filter_map(|i| {
            let mut chars = term.chars.clone();
            chars.swap(i, i + 1);
            let swapped = Term { chars };
            substring_score(&swapped, target).or_else(|| subsequence_score(&swapped, target))
        })
        .map(|score| TYPO_BASE + score)
        .max_by(f64::total_cmp)
}
