//! 병음 음절 정규화
//!
//! 사전 키와 사용자 입력을 같은 형태(소문자, 성조 숫자 제거)로 맞춥니다.

/// 병음 음절을 기본형으로 정규화
///
/// - 앞뒤 공백 제거
/// - 소문자 변환
/// - 끝에 붙은 성조 숫자(1~5) 제거
///
/// # Examples
/// ```
/// use pinyin_ime::hmm::normalize_syllable;
/// assert_eq!(normalize_syllable("Hao3"), "hao");
/// assert_eq!(normalize_syllable(" ni "), "ni");
/// ```
pub fn normalize_syllable(raw: &str) -> String {
    let mut syllable = raw.trim().to_lowercase();
    if let Some(last) = syllable.chars().last() {
        // 숫자만 있는 토큰은 그대로 둠
        if matches!(last, '1'..='5') && syllable.len() > 1 {
            syllable.pop();
        }
    }
    syllable
}

/// 정규화된 음절인지 확인 (비어 있지 않은 ASCII 소문자)
pub fn is_base_syllable(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase())
}
