//! Top-K 완성 시퀀스 추출
//!
//! 마지막 레이어의 각 항목에서 역포인터를 따라가 전체 문자열을 복원합니다.

use std::collections::HashMap;

use super::state::{backtrack, Layer};

/// 순위가 매겨진 완성 시퀀스
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// 복원된 문자열
    pub sequence: String,
    /// 누적 로그 스코어 (마지막 레이어에 기록된 값)
    pub score: f64,
}

/// 레이어 기록에서 상위 `min(k, beam_size)`개 시퀀스 추출
///
/// 같은 문자열이 여러 경로에서 나오면 최고 스코어만 남김.
/// 스코어 내림차순, 동점은 문자열 사전순.
pub fn extract_top_k(layers: &[Layer], k: usize, beam_size: usize) -> Vec<Candidate> {
    let Some(last) = layers.last() else {
        return Vec::new();
    };

    let limit = k.min(beam_size);
    if limit == 0 {
        return Vec::new();
    }

    let mut best: HashMap<String, f64> = HashMap::with_capacity(last.len());
    for (index, entry) in last.entries().iter().enumerate() {
        let sequence = backtrack(layers, index);
        best.entry(sequence)
            .and_modify(|s| *s = s.max(entry.score))
            .or_insert(entry.score);
    }

    let mut ranked: Vec<Candidate> = best
        .into_iter()
        .map(|(sequence, score)| Candidate { sequence, score })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.sequence.cmp(&b.sequence))
    });
    ranked.truncate(limit);
    ranked
}
