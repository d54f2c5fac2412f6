//! HMM 파라미터 저장소
//!
//! 초기/전이/방출 로그 확률과 음절 → 후보 한자 사전을 보관합니다.
//! 한 번 생성되면 변경되지 않으며, `Arc`로 여러 디코더가 공유합니다.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

/// 조회 실패 시 사용하는 로그 확률 하한
///
/// `f64::NEG_INFINITY` 대신 유한한 값을 써서 덧셈/비교가 항상 정의되도록 함.
/// 정상적인 로그 확률 합으로는 도달할 수 없을 만큼 작은 값.
pub const LOG_FLOOR: f64 = -1e9;

/// 읽기 전용 HMM 파라미터 + 사전
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    /// 초기 상태 로그 확률: 문자 -> log P(c0)
    initial: HashMap<char, f64>,
    /// 전이 로그 확률: (이전 문자, 현재 문자) -> log P(c_i | c_{i-1})
    transitions: HashMap<(char, char), f64>,
    /// 방출 로그 확률: 문자 -> (음절 -> log P(음절 | 문자))
    emissions: HashMap<char, HashMap<String, f64>>,
    /// 음절 -> 후보 문자 (순서 유지, 중복 없음)
    lexicon: BTreeMap<String, Vec<char>>,
    /// 문자 빈도 사전 (동점 처리용)
    char_frequency: HashMap<char, u64>,
    /// 인접 문자쌍 보너스 (로그 영역, 가산)
    bigram_bonus: HashMap<(char, char), f64>,
}

impl ParameterStore {
    /// 빌더 생성
    pub fn builder() -> ParameterStoreBuilder {
        ParameterStoreBuilder::default()
    }

    /// 음절의 후보 문자 목록 (모르는 음절이면 빈 슬라이스)
    pub fn candidates_for(&self, syllable: &str) -> &[char] {
        self.lexicon
            .get(syllable)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 사전에 등록된 음절인지 확인
    pub fn contains_syllable(&self, syllable: &str) -> bool {
        self.lexicon.contains_key(syllable)
    }

    /// `prefix`로 시작하는 모든 음절 (사전순)
    pub fn syllables_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [char])> + 'a {
        self.lexicon
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(syllable, _)| syllable.starts_with(prefix))
            .map(|(syllable, chars)| (syllable.as_str(), chars.as_slice()))
    }

    /// 초기 로그 확률
    pub fn initial_log_prob(&self, c: char) -> f64 {
        self.initial.get(&c).copied().unwrap_or(LOG_FLOOR)
    }

    /// 전이 로그 확률
    pub fn transition_log_prob(&self, prev: char, curr: char) -> f64 {
        self.transitions
            .get(&(prev, curr))
            .copied()
            .unwrap_or(LOG_FLOOR)
    }

    /// 방출 로그 확률
    pub fn emission_log_prob(&self, syllable: &str, c: char) -> f64 {
        self.emissions
            .get(&c)
            .and_then(|by_syllable| by_syllable.get(syllable))
            .copied()
            .unwrap_or(LOG_FLOOR)
    }

    /// 문자쌍 보너스 (없으면 0)
    pub fn bigram_bonus(&self, prev: char, curr: char) -> f64 {
        self.bigram_bonus.get(&(prev, curr)).copied().unwrap_or(0.0)
    }

    /// 문자 빈도 (없으면 0)
    pub fn char_frequency(&self, c: char) -> u64 {
        self.char_frequency.get(&c).copied().unwrap_or(0)
    }

    /// 등록된 음절 수
    pub fn syllable_count(&self) -> usize {
        self.lexicon.len()
    }

    /// 전이 항목 수
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// 사전이 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }
}

/// `ParameterStore` 빌더
///
/// 로더와 테스트에서 사용. `build()` 이후에는 수정할 수 없음.
#[derive(Debug, Default)]
pub struct ParameterStoreBuilder {
    store: ParameterStore,
}

impl ParameterStoreBuilder {
    /// 초기 로그 확률 설정
    pub fn initial(mut self, c: char, log_prob: f64) -> Self {
        self.store.initial.insert(c, log_prob);
        self
    }

    /// 전이 로그 확률 설정
    pub fn transition(mut self, prev: char, curr: char, log_prob: f64) -> Self {
        self.store.transitions.insert((prev, curr), log_prob);
        self
    }

    /// 방출 로그 확률 설정
    pub fn emission(mut self, syllable: &str, c: char, log_prob: f64) -> Self {
        self.store
            .emissions
            .entry(c)
            .or_default()
            .insert(syllable.to_string(), log_prob);
        self
    }

    /// 음절의 후보 문자 추가 (기존 순서 유지, 중복 무시)
    pub fn candidates<I>(mut self, syllable: &str, chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let entry = self.store.lexicon.entry(syllable.to_string()).or_default();
        for c in chars {
            if !entry.contains(&c) {
                entry.push(c);
            }
        }
        self
    }

    /// 문자 빈도 설정
    pub fn frequency(mut self, c: char, count: u64) -> Self {
        self.store.char_frequency.insert(c, count);
        self
    }

    /// 문자쌍 보너스 설정 (로그 영역)
    pub fn bonus(mut self, prev: char, curr: char, bonus: f64) -> Self {
        self.store.bigram_bonus.insert((prev, curr), bonus);
        self
    }

    pub fn build(self) -> ParameterStore {
        self.store
    }
}
