//! HMM 파라미터 / 사전 JSON 로드
//!
//! 외부 전처리 단계가 만든 두 파일을 읽어 `ParameterStore`를 생성합니다.
//! 디코딩 세션 시작 전에 한 번만 호출됩니다.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::params::{ParameterStore, ParameterStoreBuilder};
use super::syllable::{is_base_syllable, normalize_syllable};

/// 파라미터 로드/파싱 에러
#[derive(Debug)]
pub enum ParamsError {
    /// 파일 읽기 실패
    IoError(std::io::Error),
    /// JSON 파싱 실패
    ParseError(String),
    /// 파일 형식 오류
    FormatError(String),
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamsError::IoError(e) => write!(f, "파일 읽기 오류: {}", e),
            ParamsError::ParseError(s) => write!(f, "JSON 파싱 오류: {}", s),
            ParamsError::FormatError(s) => write!(f, "파라미터 형식 오류: {}", s),
        }
    }
}

impl std::error::Error for ParamsError {}

impl From<std::io::Error> for ParamsError {
    fn from(e: std::io::Error) -> Self {
        ParamsError::IoError(e)
    }
}

/// HMM 파라미터 파일 구조
///
/// ```json
/// {
///   "init":  { "你": -0.51 },
///   "trans": { "你": { "好": -0.36 } },
///   "emit":  { "你": { "ni": 0.0 } }
/// }
/// ```
#[derive(Debug, Deserialize)]
struct RawHmm {
    #[serde(default)]
    init: HashMap<String, f64>,
    #[serde(default)]
    trans: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    emit: HashMap<String, HashMap<String, f64>>,
}

/// 키가 정확히 한 글자인지 확인하고 그 문자를 반환
fn single_char(key: &str, what: &str) -> Result<char, ParamsError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParamsError::FormatError(format!(
            "{}는 한 글자여야 합니다: '{}'",
            what, key
        ))),
    }
}

impl ParameterStore {
    /// HMM 파라미터 파일과 사전 파일에서 로드
    pub fn load(
        hmm_path: impl AsRef<Path>,
        lexicon_path: impl AsRef<Path>,
    ) -> Result<Self, ParamsError> {
        let hmm: serde_json::Value = read_json(hmm_path.as_ref())?;
        let lexicon: serde_json::Value = read_json(lexicon_path.as_ref())?;

        let store = Self::from_json_values(hmm, &lexicon)?;
        log::info!(
            "파라미터 로드 완료: 음절 {}개, 전이 {}개",
            store.syllable_count(),
            store.transition_count()
        );
        Ok(store)
    }

    /// JSON 문자열에서 로드
    pub fn from_json(hmm_json: &str, lexicon_json: &str) -> Result<Self, ParamsError> {
        let hmm: serde_json::Value =
            serde_json::from_str(hmm_json).map_err(|e| ParamsError::ParseError(e.to_string()))?;
        let lexicon: serde_json::Value = serde_json::from_str(lexicon_json)
            .map_err(|e| ParamsError::ParseError(e.to_string()))?;

        Self::from_json_values(hmm, &lexicon)
    }

    fn from_json_values(
        hmm: serde_json::Value,
        lexicon: &serde_json::Value,
    ) -> Result<Self, ParamsError> {
        let raw: RawHmm =
            serde_json::from_value(hmm).map_err(|e| ParamsError::FormatError(e.to_string()))?;

        let builder = apply_hmm(ParameterStore::builder(), &raw)?;
        let builder = apply_lexicon(builder, lexicon)?;
        Ok(builder.build())
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value, ParamsError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| ParamsError::ParseError(e.to_string()))
}

fn apply_hmm(
    mut builder: ParameterStoreBuilder,
    raw: &RawHmm,
) -> Result<ParameterStoreBuilder, ParamsError> {
    for (key, &log_prob) in &raw.init {
        builder = builder.initial(single_char(key, "초기 확률 키")?, log_prob);
    }

    for (prev_key, next_map) in &raw.trans {
        let prev = single_char(prev_key, "전이 이전 문자")?;
        for (curr_key, &log_prob) in next_map {
            let curr = single_char(curr_key, "전이 다음 문자")?;
            builder = builder.transition(prev, curr, log_prob);
        }
    }

    for (char_key, by_syllable) in &raw.emit {
        let c = single_char(char_key, "방출 문자")?;
        for (syllable, log_prob) in merge_tone_variants(by_syllable) {
            builder = builder.emission(&syllable, c, log_prob);
        }
    }

    Ok(builder)
}

/// 성조 제거 후 같은 음절이 되는 방출 키 병합
///
/// 성조별 확률을 더함 (로그 영역에서 log-sum-exp). 키를 정렬한 순서로 합산하므로
/// 입력 맵의 순회 순서와 무관하게 같은 값이 나옴.
fn merge_tone_variants(by_syllable: &HashMap<String, f64>) -> BTreeMap<String, f64> {
    let mut keys: Vec<(&String, f64)> = by_syllable.iter().map(|(k, &v)| (k, v)).collect();
    keys.sort_by(|a, b| a.0.cmp(b.0));

    let mut merged: BTreeMap<String, f64> = BTreeMap::new();
    for (syllable, log_prob) in keys {
        merged
            .entry(normalize_syllable(syllable))
            .and_modify(|acc| *acc = log_add(*acc, log_prob))
            .or_insert(log_prob);
    }
    merged
}

/// log(exp(a) + exp(b))
fn log_add(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    hi + (lo - hi).exp().ln_1p()
}

/// 사전 JSON 적용
///
/// 두 가지 형식을 지원:
/// - 집계 형식: `{ "base_pinyin_to_chars": {...}, "char_frequency": {...}, "word_bigram_bonus": {...} }`
/// - 단순 형식: `{ "ni": ["你", "尼"], ... }`
fn apply_lexicon(
    mut builder: ParameterStoreBuilder,
    lexicon: &serde_json::Value,
) -> Result<ParameterStoreBuilder, ParamsError> {
    let root = lexicon
        .as_object()
        .ok_or_else(|| ParamsError::FormatError("사전은 JSON 객체여야 합니다".into()))?;

    let syllable_map = match root.get("base_pinyin_to_chars") {
        Some(inner) => inner.as_object().ok_or_else(|| {
            ParamsError::FormatError("base_pinyin_to_chars 필드가 객체가 아닙니다".into())
        })?,
        None => root,
    };

    for (key, val) in syllable_map {
        let syllable = normalize_syllable(key);
        if !is_base_syllable(&syllable) {
            log::warn!("음절 형식이 아닌 사전 키 무시: '{}'", key);
            continue;
        }

        let list = val.as_array().ok_or_else(|| {
            ParamsError::FormatError(format!("후보 목록이 배열이 아닙니다: {}", key))
        })?;

        let mut chars = Vec::with_capacity(list.len());
        for item in list {
            let s = item.as_str().ok_or_else(|| {
                ParamsError::FormatError(format!("후보가 문자열이 아닙니다: {}", key))
            })?;
            chars.push(single_char(s, "후보 문자")?);
        }
        builder = builder.candidates(&syllable, chars);
    }

    if let Some(freq) = root.get("char_frequency").and_then(|v| v.as_object()) {
        for (key, val) in freq {
            let c = single_char(key, "빈도 키")?;
            let count = val.as_u64().ok_or_else(|| {
                ParamsError::FormatError(format!("유효하지 않은 빈도값: {}", key))
            })?;
            builder = builder.frequency(c, count);
        }
    }

    if let Some(bonus) = root.get("word_bigram_bonus").and_then(|v| v.as_object()) {
        for (key, val) in bonus {
            let pair: Vec<char> = key.chars().collect();
            if pair.len() != 2 {
                return Err(ParamsError::FormatError(format!(
                    "잘못된 보너스 키: {} (expected 'XY')",
                    key
                )));
            }
            let value = val.as_f64().ok_or_else(|| {
                ParamsError::FormatError(format!("유효하지 않은 보너스 값: {}", key))
            })?;
            builder = builder.bonus(pair[0], pair[1], value);
        }
    }

    Ok(builder)
}
