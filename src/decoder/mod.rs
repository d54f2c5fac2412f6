//! 증분 Viterbi 디코더
//!
//! 병음 음절을 하나씩 입력받아 가장 그럴듯한 한자 시퀀스를 유지합니다.
//!
//! # 개요
//!
//! 1. **확장**: 새 음절의 후보마다 이전 레이어의 최적 선행 문자를 찾음
//!    (`이전 스코어 + 전이 + 방출 + 문자쌍 보너스`)
//! 2. **가지치기**: 상위 `beam_size`개만 유지 (동점은 빈도 → 코드포인트)
//! 3. **Top-K**: 마지막 레이어에서 역포인터를 따라 완성 시퀀스 복원
//!
//! 사전에 없는 음절은 대체 문자(`DecoderConfig::placeholder`) 하나로 채우며 모든 조회가
//! 하한값(`LOG_FLOOR`)이 됩니다. 대체 문자 바로 다음 위치는 문맥이 끊긴 것으로 보고
//! `이전 스코어 + 초기 확률 + 방출`로 계산합니다 (전이와 문자쌍 보너스는 적용하지 않음).
//!
//! 상태 머신: `Empty` → `Committed(1)` → `Committed(2)` → ...
//! `append`는 한 단계 전진, `delete_last`는 한 단계 후퇴, `reset`은 `Empty`로.
//!
//! # 사용 예시
//!
//! ```
//! use std::sync::Arc;
//! use pinyin_ime::decoder::{DecoderConfig, IncrementalDecoder};
//! use pinyin_ime::hmm::ParameterStore;
//!
//! let params = Arc::new(
//!     ParameterStore::builder()
//!         .candidates("ni", ['你', '尼'])
//!         .candidates("hao", ['好', '号'])
//!         .initial('你', -0.5)
//!         .transition('你', '好', -0.3)
//!         .build(),
//! );
//! let mut decoder = IncrementalDecoder::new(params, DecoderConfig::new().with_top_k(3)).unwrap();
//! decoder.append("ni");
//! let result = decoder.append("hao");
//! assert_eq!(result[0].sequence, "你好");
//!
//! // 입력 중인 접두어로 다음 글자 미리보기 (상태 변경 없음)
//! let preview = decoder.prefix_lookahead("h");
//! assert_eq!(decoder.syllables().len(), 2);
//! # let _ = preview;
//! ```

mod batch;
mod config;
mod incremental;
mod state;
mod step;
mod topk;

// 공개 인터페이스
pub use batch::{viterbi_decode, viterbi_top_k, viterbi_top_k_with_placeholder};
pub use config::{ConfigError, DecoderConfig};
pub use incremental::{IncrementalDecoder, Lookahead};
pub use state::{DecoderPhase, DecoderState, Entry, Layer};
pub use topk::{extract_top_k, Candidate};
