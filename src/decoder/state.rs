//! 디코더 상태 (DP 레이어 + 확정된 음절 버퍼)
//!
//! 순수 데이터. 변경은 `IncrementalDecoder`를 통해서만 일어납니다.

/// DP 레이어의 한 항목
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// 후보 문자
    pub character: char,
    /// 누적 최고 로그 스코어
    pub score: f64,
    /// 이전 레이어에서의 인덱스 (첫 레이어면 None)
    pub back: Option<usize>,
    /// 모르는 음절 대신 들어간 대체 문자인지 여부
    pub placeholder: bool,
}

/// 한 위치의 DP 레이어
///
/// 항목은 순위 순서(스코어 내림차순, 동점은 빈도 → 코드포인트)로 정렬되어 있음.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    entries: Vec<Entry>,
}

impl Layer {
    pub(crate) fn from_ranked(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// 최고 순위 항목
    pub fn best(&self) -> Option<&Entry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 디코더 상태 머신의 현재 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderPhase {
    /// 확정된 음절 없음
    Empty,
    /// t개의 음절이 확정됨 (t >= 1)
    Committed(usize),
}

/// 레이어 목록과 음절 목록
///
/// 불변식: `layers.len() == syllables.len()`,
/// 레이어 t의 역포인터는 레이어 t-1의 항목만 가리킴.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecoderState {
    layers: Vec<Layer>,
    syllables: Vec<String>,
}

impl DecoderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn phase(&self) -> DecoderPhase {
        match self.layers.len() {
            0 => DecoderPhase::Empty,
            t => DecoderPhase::Committed(t),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn syllables(&self) -> &[String] {
        &self.syllables
    }

    pub fn last_layer(&self) -> Option<&Layer> {
        self.layers.last()
    }

    pub(crate) fn push(&mut self, syllable: String, layer: Layer) {
        debug_assert!(layer
            .entries()
            .iter()
            .all(|e| match (e.back, self.layers.last()) {
                (None, None) => true,
                (Some(i), Some(prev)) => i < prev.len(),
                _ => false,
            }));
        self.layers.push(layer);
        self.syllables.push(syllable);
    }

    pub(crate) fn pop(&mut self) -> Option<String> {
        self.layers.pop()?;
        self.syllables.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.layers.clear();
        self.syllables.clear();
    }
}

/// 레이어 목록에서 `index` 항목까지의 경로를 문자열로 복원
///
/// `layers`의 마지막 레이어에서 시작해 역포인터를 따라 첫 레이어까지 이동.
pub(crate) fn backtrack(layers: &[Layer], index: usize) -> String {
    let mut chars = Vec::with_capacity(layers.len());
    let mut cursor = Some(index);
    for layer in layers.iter().rev() {
        let Some(i) = cursor else { break };
        let Some(entry) = layer.get(i) else { break };
        chars.push(entry.character);
        cursor = entry.back;
    }
    chars.iter().rev().collect()
}
