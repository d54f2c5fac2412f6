//! 전체 음절 시퀀스 일괄 디코딩
//!
//! 빔 제한 없이 Viterbi를 끝까지 수행합니다. 증분 디코더의 결과를 검증하는
//! 기준값이자 명령행에서 한 번에 변환할 때 사용합니다.

use crate::hmm::ParameterStore;

use super::config::DecoderConfig;
use super::state::Layer;
use super::step::{expand, prune};
use super::topk::{extract_top_k, Candidate};

/// 가지치기 없이 모든 레이어 계산
fn full_lattice<S: AsRef<str>>(
    params: &ParameterStore,
    syllables: &[S],
    placeholder: char,
) -> Vec<Layer> {
    let mut layers: Vec<Layer> = Vec::with_capacity(syllables.len());
    for syllable in syllables {
        let entries = expand(params, layers.last(), syllable.as_ref(), placeholder);
        let width = entries.len();
        layers.push(prune(params, entries, width));
    }
    layers
}

/// 최적 시퀀스 하나와 스코어
///
/// # Examples
/// ```
/// use pinyin_ime::decoder::viterbi_decode;
/// use pinyin_ime::hmm::ParameterStore;
///
/// let params = ParameterStore::builder()
///     .candidates("ni", ['你', '尼'])
///     .initial('你', -0.5)
///     .build();
/// let (sequence, _) = viterbi_decode(&params, &["ni"]).unwrap();
/// assert_eq!(sequence, "你");
/// ```
pub fn viterbi_decode<S: AsRef<str>>(
    params: &ParameterStore,
    syllables: &[S],
) -> Option<(String, f64)> {
    viterbi_top_k(params, syllables, 1)
        .into_iter()
        .next()
        .map(|c| (c.sequence, c.score))
}

/// 상위 `k`개 시퀀스
///
/// 빈 입력이면 빈 목록. 모르는 음절은 기본 대체 문자(U+FFFD)로 처리.
pub fn viterbi_top_k<S: AsRef<str>>(
    params: &ParameterStore,
    syllables: &[S],
    k: usize,
) -> Vec<Candidate> {
    viterbi_top_k_with_placeholder(params, syllables, k, DecoderConfig::default().placeholder)
}

/// 모르는 음절의 대체 문자를 지정하는 `viterbi_top_k`
///
/// 증분 디코더와 같은 `DecoderConfig::placeholder`를 넘기면 두 결과가 일치함.
pub fn viterbi_top_k_with_placeholder<S: AsRef<str>>(
    params: &ParameterStore,
    syllables: &[S],
    k: usize,
    placeholder: char,
) -> Vec<Candidate> {
    let layers = full_lattice(params, syllables, placeholder);
    extract_top_k(&layers, k, usize::MAX)
}
