//! 통합 테스트 - 증분 디코더 시나리오와 성질

use pinyin_ime::decoder::{
    viterbi_decode, viterbi_top_k_with_placeholder, DecoderConfig, DecoderPhase, IncrementalDecoder,
};
use pinyin_ime::hmm::ParameterStore;
use std::sync::Arc;
use std::thread;

const HMM_JSON: &str = r#"{
    "init": { "你": -0.51, "尼": -0.92, "我": -0.7, "哈": -2.3, "还": -1.6, "海": -1.9, "含": -2.5 },
    "trans": {
        "你": { "好": -0.36, "号": -1.2, "们": -0.9, "还": -1.4, "海": -3.0 },
        "尼": { "好": -0.92, "号": -0.51 },
        "好": { "吗": -0.4, "的": -1.1 },
        "号": { "吗": -2.0, "的": -1.6 },
        "我": { "们": -0.6, "好": -1.8 },
        "们": { "好": -1.0 }
    },
    "emit": {
        "你": { "ni": 0.0 }, "尼": { "ni": 0.0 }, "我": { "wo": 0.0 },
        "好": { "hao": -0.1 }, "号": { "hao": -0.2 }, "毫": { "hao": -2.0 },
        "吗": { "ma": 0.0 }, "的": { "de": 0.0 }, "们": { "men": 0.0 },
        "哈": { "ha": 0.0 }, "还": { "hai": -0.3 }, "海": { "hai": -0.5 }, "含": { "han": 0.0 }
    }
}"#;

const LEXICON_JSON: &str = r#"{
    "base_pinyin_to_chars": {
        "ni": ["你", "尼"],
        "hao": ["好", "号", "毫"],
        "ma": ["吗"],
        "de": ["的"],
        "wo": ["我"],
        "men": ["们"],
        "ha": ["哈"],
        "hai": ["还", "海"],
        "han": ["含"]
    },
    "char_frequency": { "你": 900, "尼": 40, "好": 700, "号": 120 },
    "word_bigram_bonus": { "你好": 0.2 }
}"#;

fn params() -> Arc<ParameterStore> {
    Arc::new(ParameterStore::from_json(HMM_JSON, LEXICON_JSON).unwrap())
}

fn decoder_with(beam_size: usize, top_k: usize) -> IncrementalDecoder {
    let config = DecoderConfig::new().with_beam_size(beam_size).with_top_k(top_k);
    IncrementalDecoder::new(params(), config).unwrap()
}

#[test]
fn test_scenario_a_ni_hao() {
    let mut decoder = decoder_with(100, 5);

    let result = decoder.append("ni");
    assert_eq!(result[0].sequence, "你");

    let result = decoder.append("hao");
    assert_eq!(result[0].sequence, "你好");
}

#[test]
fn test_scenario_b_delete_restores_prefix_scores() {
    let mut decoder = decoder_with(100, 5);
    let alone = decoder.append("ni");

    decoder.append("hao");
    decoder.delete_last();

    let top = decoder.get_top_k(1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].sequence, "你");
    assert_eq!(top[0].score, alone[0].score);
}

#[test]
fn test_scenario_c_beam_one_is_greedy() {
    let mut decoder = decoder_with(1, 5);
    for syllable in ["ni", "hao", "ma"] {
        let result = decoder.append(syllable);
        assert_eq!(result.len(), 1);
    }
    assert!(decoder.layers().iter().all(|layer| layer.len() == 1));
    assert_eq!(decoder.best().unwrap().sequence, "你好吗");
}

#[test]
fn test_scenario_d_prefix_lookahead_merges_syllables() {
    let mut decoder = decoder_with(100, 10);
    decoder.append("ni");
    let syllables_before = decoder.syllables().len();
    let layers_before = decoder.layers().len();

    let result = decoder.prefix_lookahead("ha");

    // ha, hai, han, hao 모두에서 후보가 나옴
    let mut syllables: Vec<&str> = result.iter().map(|l| l.syllable.as_str()).collect();
    syllables.sort_unstable();
    syllables.dedup();
    assert_eq!(syllables, vec!["ha", "hai", "han", "hao"]);

    // 문자 중복 없음
    let mut chars: Vec<char> = result.iter().map(|l| l.character).collect();
    let total = chars.len();
    chars.sort_unstable();
    chars.dedup();
    assert_eq!(chars.len(), total);

    assert_eq!(result[0].character, '好');
    assert!(result.windows(2).all(|w| w[0].score >= w[1].score));

    assert_eq!(decoder.syllables().len(), syllables_before);
    assert_eq!(decoder.layers().len(), layers_before);
}

#[test]
fn test_result_never_exceeds_top_k() {
    let mut decoder = decoder_with(100, 2);
    for syllable in ["ni", "hao", "hai", "de"] {
        assert!(decoder.append(syllable).len() <= 2);
    }
}

#[test]
fn test_incremental_matches_full_decode() {
    let sequences: [&[&str]; 4] = [
        &["ni", "hao"],
        &["ni", "hao", "ma"],
        &["wo", "men", "hao"],
        &["ni", "hai", "hao", "de"],
    ];

    for syllables in sequences {
        let mut decoder = decoder_with(1000, 5);
        for s in syllables {
            decoder.append(s);
        }
        let incremental = decoder.best().unwrap();
        let (full, score) = viterbi_decode(decoder.params(), syllables).unwrap();

        assert_eq!(incremental.sequence, full, "입력 {:?}", syllables);
        assert!((incremental.score - score).abs() < 1e-9);
    }
}

#[test]
fn test_reset_is_idempotent() {
    let mut fresh = decoder_with(100, 5);
    let expected = fresh.append("hao");

    let mut used = decoder_with(100, 5);
    used.append("ni");
    used.append("hai");
    used.reset();
    assert_eq!(used.phase(), DecoderPhase::Empty);
    assert_eq!(used.append("hao"), expected);
}

#[test]
fn test_delete_then_append_is_inverse() {
    let mut decoder = decoder_with(100, 5);
    decoder.append("ni");

    let first = decoder.append("hao");
    decoder.delete_last();
    let second = decoder.append("hao");

    assert_eq!(first, second);
}

#[test]
fn test_top_k_scores_non_increasing() {
    let mut decoder = decoder_with(100, 10);
    for syllable in ["ni", "hai", "hao"] {
        decoder.append(syllable);
    }
    let result = decoder.get_top_k(10);
    assert!(result.len() >= 2);
    assert!(result.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_unknown_syllable_keeps_session_alive() {
    let mut decoder = decoder_with(100, 5);
    decoder.append("ni");
    let result = decoder.append("xyzzy");
    assert!(!result.is_empty());
    assert_eq!(decoder.phase(), DecoderPhase::Committed(2));

    let result = decoder.append("hao");
    assert!(result[0].sequence.ends_with('好'));
    assert!(result[0].score.is_finite());
}

#[test]
fn test_custom_placeholder_matches_full_decode() {
    let config = DecoderConfig::new().with_placeholder('?');
    let mut decoder = IncrementalDecoder::new(params(), config).unwrap();
    let syllables = ["ni", "xyzzy", "hao"];
    for s in syllables {
        decoder.append(s);
    }

    let incremental = decoder.best().unwrap();
    let full = viterbi_top_k_with_placeholder(decoder.params(), &syllables, 1, '?');
    assert_eq!(incremental.sequence, full[0].sequence);
    assert_eq!(incremental.sequence, "你?好");
    assert!((incremental.score - full[0].score).abs() < 1e-9);
}

#[test]
fn test_prefix_lookahead_agrees_with_append_under_narrow_beam() {
    let mut decoder = decoder_with(1, 5);
    decoder.append("ni");

    let preview = decoder.prefix_lookahead("hao");
    assert_eq!(preview.len(), 1);

    let result = decoder.append("hao");
    assert_eq!(preview[0].sequence, result[0].sequence);
}

#[test]
fn test_shared_params_across_threads() {
    let params = params();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let params = Arc::clone(&params);
            thread::spawn(move || {
                let mut decoder = IncrementalDecoder::new(params, DecoderConfig::default()).unwrap();
                decoder.append("ni");
                decoder.append("hao")[0].sequence.clone()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "你好");
    }
}
