//! Viterbi 한 단계 확장과 빔 가지치기
//!
//! 증분 디코더, 전방 탐색, 일괄 디코딩이 모두 이 모듈의 함수로 레이어를 만듭니다.

use std::cmp::Ordering;

use crate::hmm::ParameterStore;

use super::state::{Entry, Layer};

/// 두 항목의 순위 비교 (앞설수록 Less)
///
/// 1. 스코어 내림차순
/// 2. 문자 빈도 내림차순
/// 3. 코드포인트 오름차순
pub(crate) fn rank(params: &ParameterStore, a: &Entry, b: &Entry) -> Ordering {
    rank_scored(params, (a.score, a.character), (b.score, b.character))
}

/// `(스코어, 문자)` 쌍의 순위 비교. 레이어 정렬과 전방 탐색 결과 정렬이 공유.
pub(crate) fn rank_scored(params: &ParameterStore, a: (f64, char), b: (f64, char)) -> Ordering {
    let ((a_score, a_char), (b_score, b_char)) = (a, b);
    b_score
        .total_cmp(&a_score)
        .then_with(|| {
            params
                .char_frequency(b_char)
                .cmp(&params.char_frequency(a_char))
        })
        .then_with(|| a_char.cmp(&b_char))
}

/// 이전 레이어에서 `c`로 넘어가는 스코어 (방출 제외)
///
/// 이전 항목이 대체 문자이면 문맥이 끊긴 것으로 보고 초기 확률을 사용.
fn step_score(params: &ParameterStore, prev: &Entry, c: char) -> f64 {
    if prev.placeholder {
        prev.score + params.initial_log_prob(c)
    } else {
        prev.score
            + params.transition_log_prob(prev.character, c)
            + params.bigram_bonus(prev.character, c)
    }
}

/// 음절 하나만큼 확장한 가지치기 전 항목 목록
///
/// 후보가 없는 음절이면 대체 문자 하나를 만들어 넣음. 대체 문자의 모든 조회는
/// 실패하므로 스코어에 하한값이 더해짐.
pub(crate) fn expand(
    params: &ParameterStore,
    prev: Option<&Layer>,
    syllable: &str,
    placeholder: char,
) -> Vec<Entry> {
    let candidates = params.candidates_for(syllable);

    if candidates.is_empty() {
        return vec![score_candidate(params, prev, syllable, placeholder, true)];
    }

    candidates
        .iter()
        .map(|&c| score_candidate(params, prev, syllable, c, false))
        .collect()
}

fn score_candidate(
    params: &ParameterStore,
    prev: Option<&Layer>,
    syllable: &str,
    c: char,
    placeholder: bool,
) -> Entry {
    let emit = params.emission_log_prob(syllable, c);

    let (score, back) = match prev {
        None => (params.initial_log_prob(c) + emit, None),
        Some(layer) => {
            // 순위 순서로 순회하고 strict `>` 비교: 동점이면 앞선 항목이 이김
            let mut best: Option<(f64, usize)> = None;
            for (i, p) in layer.entries().iter().enumerate() {
                let s = step_score(params, p, c) + emit;
                if best.map_or(true, |(b, _)| s > b) {
                    best = Some((s, i));
                }
            }
            match best {
                Some((s, i)) => (s, Some(i)),
                None => (params.initial_log_prob(c) + emit, None),
            }
        }
    };

    Entry {
        character: c,
        score,
        back,
        placeholder,
    }
}

/// 상위 `beam_size`개만 남기고 순위 순서로 정렬
///
/// 후보가 빔보다 많으면 전체 정렬 대신 부분 선택 후 남은 것만 정렬.
pub(crate) fn prune(params: &ParameterStore, mut entries: Vec<Entry>, beam_size: usize) -> Layer {
    let cmp = |a: &Entry, b: &Entry| rank(params, a, b);

    if entries.len() > beam_size && beam_size > 0 {
        entries.select_nth_unstable_by(beam_size - 1, cmp);
        entries.truncate(beam_size);
    }
    entries.sort_by(cmp);

    Layer::from_ranked(entries)
}
