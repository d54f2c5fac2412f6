//! HMM 파라미터 저장소
//!
//! 병음 → 한자 디코딩에 필요한 모든 확률을 로그 영역으로 보관합니다.
//!
//! # 구성
//!
//! - **초기 확률** `log P(c0)`
//! - **전이 확률** `log P(c_i | c_{i-1})`
//! - **방출 확률** `log P(음절 | c)`
//! - **사전**: 음절 → 후보 문자 목록, 문자 빈도, 문자쌍 보너스
//!
//! 조회에 실패하면 [`LOG_FLOOR`]를 반환합니다 (보너스는 0).
//!
//! # 사용 예시
//!
//! ```
//! use pinyin_ime::hmm::ParameterStore;
//!
//! let store = ParameterStore::builder()
//!     .candidates("ni", ['你', '尼'])
//!     .initial('你', -0.5)
//!     .build();
//! assert_eq!(store.candidates_for("ni"), &['你', '尼']);
//! ```

mod loader;
mod params;
mod syllable;

// 공개 인터페이스
pub use loader::ParamsError;
pub use params::{ParameterStore, ParameterStoreBuilder, LOG_FLOOR};
pub use syllable::{is_base_syllable, normalize_syllable};
