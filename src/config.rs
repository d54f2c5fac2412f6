//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::decoder::DecoderConfig;

/// 설정 파일 경로를 지정하는 환경 변수
pub const CONFIG_ENV: &str = "PINYIN_IME_CONFIG";

/// 입력기 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImeConfig {
    /// HMM 파라미터 JSON 경로
    #[serde(default = "default_params_path")]
    pub params_path: PathBuf,
    /// 사전 JSON 경로
    #[serde(default = "default_lexicon_path")]
    pub lexicon_path: PathBuf,
    /// 디코더 설정
    #[serde(default)]
    pub decoder: DecoderConfig,
}

fn default_params_path() -> PathBuf {
    PathBuf::from("resources/hmm_params.json")
}

fn default_lexicon_path() -> PathBuf {
    PathBuf::from("resources/lexicon_aggregate.json")
}

impl Default for ImeConfig {
    fn default() -> Self {
        Self {
            params_path: default_params_path(),
            lexicon_path: default_lexicon_path(),
            decoder: DecoderConfig::default(),
        }
    }
}

/// 설정 파일 경로: $PINYIN_IME_CONFIG 또는 ~/.config/pinyin-ime/config.json
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| {
            // HOME 미설정이거나 유효하지 않으면 /var/tmp 폴백
            PathBuf::from("/var/tmp")
        });
    home.join(".config").join("pinyin-ime").join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config_from(path: &Path) -> ImeConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파싱 실패, 기본값 사용: {}", e);
            ImeConfig::default()
        }),
        Err(_) => ImeConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config_to(config: &ImeConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("설정 디렉토리 생성 실패: {}", e))?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|e| format!("직렬화 실패: {}", e))?;
    fs::write(path, json).map_err(|e| format!("설정 파일 저장 실패: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ImeConfig::default();
        assert_eq!(config.params_path, PathBuf::from("resources/hmm_params.json"));
        assert_eq!(config.decoder.beam_size, 100);
        assert_eq!(config.decoder.top_k, 5);
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = ImeConfig {
            params_path: PathBuf::from("a.json"),
            lexicon_path: PathBuf::from("b.json"),
            decoder: DecoderConfig::new().with_beam_size(20).with_top_k(9),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ImeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_backward_compat_missing_field() {
        // decoder 섹션이 없는 이전 설정 파일
        let json = r#"{"params_path": "hmm.json"}"#;
        let config: ImeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.params_path, PathBuf::from("hmm.json"));
        assert_eq!(config.lexicon_path, default_lexicon_path());
        assert_eq!(config.decoder, DecoderConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = ImeConfig {
            decoder: DecoderConfig::new().with_beam_size(7),
            ..ImeConfig::default()
        };
        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn test_load_missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config_from(&dir.path().join("none.json")), ImeConfig::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(load_config_from(&broken), ImeConfig::default());
    }
}
