//! 증분 Viterbi 디코더
//!
//! 음절을 하나씩 추가/삭제하면서 이미 계산된 레이어는 다시 계산하지 않습니다.
//! 음절 하나를 추가하는 비용은 `beam_size × 후보 수`로 제한되며 입력 길이와 무관합니다.

use std::collections::HashMap;
use std::sync::Arc;

use crate::hmm::ParameterStore;

use super::config::{ConfigError, DecoderConfig};
use super::state::{backtrack, DecoderPhase, DecoderState, Layer};
use super::step::{expand, prune, rank_scored};
use super::topk::{extract_top_k, Candidate};

/// 전방 탐색 결과 항목
#[derive(Debug, Clone, PartialEq)]
pub struct Lookahead {
    /// 후보 문자
    pub character: char,
    /// 가상 확장 시의 누적 로그 스코어
    pub score: f64,
    /// 이 후보를 만든 완전한 음절
    pub syllable: String,
    /// 확정된 최적 경로 + 후보 문자
    pub sequence: String,
}

/// 증분 디코더
///
/// 파라미터 저장소는 `Arc`로 공유하고, 상태는 인스턴스마다 따로 가짐.
/// 한 인스턴스를 여러 스레드에서 동시에 변경하려면 호출자가 직렬화해야 함.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use pinyin_ime::decoder::{DecoderConfig, IncrementalDecoder};
/// use pinyin_ime::hmm::ParameterStore;
///
/// let params = Arc::new(
///     ParameterStore::builder()
///         .candidates("ni", ['你', '尼'])
///         .initial('你', -0.5)
///         .initial('尼', -0.9)
///         .build(),
/// );
/// let mut decoder = IncrementalDecoder::new(params, DecoderConfig::default()).unwrap();
/// let result = decoder.append("ni");
/// assert_eq!(result[0].sequence, "你");
/// ```
#[derive(Debug)]
pub struct IncrementalDecoder {
    params: Arc<ParameterStore>,
    config: DecoderConfig,
    state: DecoderState,
}

impl IncrementalDecoder {
    /// 설정을 검증하고 빈 상태의 디코더 생성
    pub fn new(params: Arc<ParameterStore>, config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            params,
            config,
            state: DecoderState::new(),
        })
    }

    /// 음절 하나를 확정하고 현재 Top-K 반환
    ///
    /// 사전에 없는 음절은 대체 문자로 처리하며 실패하지 않음.
    /// 빈 문자열은 무시.
    pub fn append(&mut self, syllable: &str) -> Vec<Candidate> {
        if syllable.is_empty() {
            log::warn!("빈 음절 무시");
            return self.top_k();
        }

        if !self.params.contains_syllable(syllable) {
            log::warn!(
                "사전에 없는 음절 '{}' → 대체 문자 '{}' 사용",
                syllable,
                self.config.placeholder
            );
        }

        let entries = expand(
            &self.params,
            self.state.last_layer(),
            syllable,
            self.config.placeholder,
        );
        let expanded = entries.len();
        let layer = prune(&self.params, entries, self.config.beam_size);

        log::debug!(
            "append '{}': 위치 {}, 후보 {}개 중 {}개 유지",
            syllable,
            self.state.len(),
            expanded,
            layer.len()
        );

        self.state.push(syllable.to_string(), layer);
        self.top_k()
    }

    /// 마지막 음절 삭제 후 현재 Top-K 반환 (비어 있으면 아무것도 하지 않음)
    pub fn delete_last(&mut self) -> Vec<Candidate> {
        if let Some(syllable) = self.state.pop() {
            log::debug!("delete_last: '{}' 삭제, 남은 음절 {}개", syllable, self.state.len());
        }
        self.top_k()
    }

    /// 입력 중인 음절 접두어로 다음 문자 후보를 미리 계산
    ///
    /// `prefix`로 시작하는 모든 음절에 대해 `append`와 같은 확장 + 가지치기를
    /// 가상으로 수행한 뒤 문자별 최고 스코어로 병합. 결과는 최대
    /// `min(top_k, beam_size)`개이며 상태는 변경하지 않음.
    pub fn prefix_lookahead(&self, prefix: &str) -> Vec<Lookahead> {
        if prefix.is_empty() {
            return Vec::new();
        }

        let prev = self.state.last_layer();
        let mut merged: HashMap<char, Lookahead> = HashMap::new();

        for (syllable, _) in self.params.syllables_with_prefix(prefix) {
            let entries = expand(&self.params, prev, syllable, self.config.placeholder);
            let layer = prune(&self.params, entries, self.config.beam_size);
            for entry in layer.entries().iter().filter(|e| !e.placeholder) {
                let better = merged
                    .get(&entry.character)
                    .map_or(true, |existing| entry.score > existing.score);
                if !better {
                    continue;
                }

                let mut sequence = match entry.back {
                    Some(i) => backtrack(self.state.layers(), i),
                    None => String::new(),
                };
                sequence.push(entry.character);

                merged.insert(
                    entry.character,
                    Lookahead {
                        character: entry.character,
                        score: entry.score,
                        syllable: syllable.to_string(),
                        sequence,
                    },
                );
            }
        }

        let mut ranked: Vec<Lookahead> = merged.into_values().collect();
        ranked.sort_by(|a, b| {
            rank_scored(&self.params, (a.score, a.character), (b.score, b.character))
        });
        ranked.truncate(self.config.top_k.min(self.config.beam_size));

        log::debug!("prefix_lookahead '{}': 후보 {}개", prefix, ranked.len());
        ranked
    }

    /// 상태 초기화
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// 상위 `k`개 완성 시퀀스 (최대 `beam_size`개)
    pub fn get_top_k(&self, k: usize) -> Vec<Candidate> {
        extract_top_k(self.state.layers(), k, self.config.beam_size)
    }

    /// 설정된 `top_k`개 완성 시퀀스
    pub fn top_k(&self) -> Vec<Candidate> {
        self.get_top_k(self.config.top_k)
    }

    /// 현재 최적 시퀀스
    pub fn best(&self) -> Option<Candidate> {
        self.get_top_k(1).into_iter().next()
    }

    pub fn phase(&self) -> DecoderPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// 확정된 음절 목록
    pub fn syllables(&self) -> &[String] {
        self.state.syllables()
    }

    pub fn layers(&self) -> &[Layer] {
        self.state.layers()
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn params(&self) -> &Arc<ParameterStore> {
        &self.params
    }
}
