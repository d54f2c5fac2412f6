//! 디코더 설정
//!
//! 빔 크기, 반환 후보 수 등 생성 시점에 고정되는 값 정의

use serde::{Deserialize, Serialize};

/// 설정 검증 에러
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// beam_size가 0
    ZeroBeamSize,
    /// top_k가 0
    ZeroTopK,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroBeamSize => write!(f, "beam_size는 1 이상이어야 합니다"),
            ConfigError::ZeroTopK => write!(f, "top_k는 1 이상이어야 합니다"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// 증분 디코더 설정
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// 단계마다 남길 최대 후보 수
    #[serde(default = "default_beam_size")]
    pub beam_size: usize,

    /// append/delete_last가 반환하는 완성 시퀀스 수
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// 사전에 없는 음절 대신 넣는 문자
    #[serde(default = "default_placeholder")]
    pub placeholder: char,
}

fn default_beam_size() -> usize {
    100
}

fn default_top_k() -> usize {
    5
}

fn default_placeholder() -> char {
    '\u{FFFD}'
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            beam_size: default_beam_size(),
            top_k: default_top_k(),
            placeholder: default_placeholder(),
        }
    }
}

impl DecoderConfig {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 빔 크기 설정
    pub fn with_beam_size(mut self, beam_size: usize) -> Self {
        self.beam_size = beam_size;
        self
    }

    /// 반환 후보 수 설정
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// 대체 문자 설정
    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.beam_size == 0 {
            return Err(ConfigError::ZeroBeamSize);
        }
        if self.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DecoderConfig::default();
        assert_eq!(config.beam_size, 100);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.placeholder, '\u{FFFD}');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = DecoderConfig::new()
            .with_beam_size(8)
            .with_top_k(3)
            .with_placeholder('?');

        assert_eq!(config.beam_size, 8);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.placeholder, '?');
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = DecoderConfig::new().with_beam_size(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroBeamSize));

        let config = DecoderConfig::new().with_top_k(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTopK));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: DecoderConfig = serde_json::from_str(r#"{"beam_size": 20}"#).unwrap();
        assert_eq!(config.beam_size, 20);
        assert_eq!(config.top_k, 5);
    }
}
