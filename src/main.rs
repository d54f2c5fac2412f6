//! pinyin-ime - 증분 병음 → 한자 변환 콘솔

use pinyin_ime::config::{config_path, load_config_from, save_config_to};
use pinyin_ime::hmm::{normalize_syllable, ParameterStore};
use pinyin_ime::{Candidate, IncrementalDecoder};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// 한 줄 입력에서 나온 명령
enum Command {
    /// 음절 확정
    Append(String),
    /// 마지막 음절 삭제
    Delete,
    /// 접두어 미리보기
    Lookahead(String),
    /// 초기화
    Reset,
    /// 종료
    Quit,
}

fn parse_token(token: &str) -> Command {
    match token {
        "<" => Command::Delete,
        "!" => Command::Reset,
        ":q" => Command::Quit,
        t if t.starts_with('?') => Command::Lookahead(normalize_syllable(&t[1..])),
        t => Command::Append(normalize_syllable(t)),
    }
}

fn print_candidates(out: &mut impl Write, candidates: &[Candidate]) -> io::Result<()> {
    if candidates.is_empty() {
        writeln!(out, "  (후보 없음)")?;
    }
    for (i, c) in candidates.iter().enumerate() {
        writeln!(out, "  {}. {} ({:.2})", i + 1, c.sequence, c.score)?;
    }
    Ok(())
}

fn run(decoder: &mut IncrementalDecoder) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();

    writeln!(out, "병음을 입력하세요. '<' 삭제, '?접두어' 미리보기, '!' 초기화, ':q' 종료")?;
    out.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        for token in line.split_whitespace() {
            match parse_token(token) {
                Command::Append(syllable) => {
                    let result = decoder.append(&syllable);
                    writeln!(out, "[{}]", decoder.syllables().join(" "))?;
                    print_candidates(&mut out, &result)?;
                }
                Command::Delete => {
                    let result = decoder.delete_last();
                    writeln!(out, "[{}]", decoder.syllables().join(" "))?;
                    print_candidates(&mut out, &result)?;
                }
                Command::Lookahead(prefix) => {
                    for (i, l) in decoder.prefix_lookahead(&prefix).iter().enumerate() {
                        writeln!(
                            out,
                            "  {}. {} [{}] {} ({:.2})",
                            i + 1,
                            l.character,
                            l.syllable,
                            l.sequence,
                            l.score
                        )?;
                    }
                }
                Command::Reset => {
                    decoder.reset();
                    writeln!(out, "초기화됨")?;
                }
                Command::Quit => return Ok(()),
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // 설정 로드 (인자로 경로 지정 가능)
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config_path);
    if !path.exists() {
        match save_config_to(&Default::default(), &path) {
            Ok(()) => log::info!("기본 설정 파일 생성: {}", path.display()),
            Err(e) => log::warn!("기본 설정 파일 생성 실패: {}", e),
        }
    }
    let config = load_config_from(&path);

    // 파라미터는 세션 시작 전에 한 번만 로드
    let params = match ParameterStore::load(&config.params_path, &config.lexicon_path) {
        Ok(params) => Arc::new(params),
        Err(e) => {
            log::error!("파라미터 로드 실패: {}", e);
            eprintln!("파라미터 로드 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut decoder = match IncrementalDecoder::new(params, config.decoder) {
        Ok(decoder) => decoder,
        Err(e) => {
            eprintln!("디코더 설정 오류: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&mut decoder) {
        log::error!("입출력 오류: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
