//! Integration tests for the corpus normalizer
//!
//! Tests the full pipeline from raw corpus text to rewritten corpus text.

use folknorm::{normalize, normalize_default, remove_meters, MeterStripper, NormalizerConfig};

const CORPUS: &str = "\
1
[M:6/8]
[K:Gmaj]
G A B | ^c d e

2
[M:4/4]
[K:Ador]
A B c

3
[M:3/4]
[K:Amin]
A B c
";

#[test]
fn test_normalize_strips_meters_and_transposes() {
    let result = normalize_default(CORPUS);
    assert_eq!(result.report.tunes_read, 3);
    assert_eq!(result.report.tunes_retained, 3);
    assert_eq!(
        result.text,
        "1\n[K:Gmaj]\nC D E | _G G A\n\n2\n[K:Ador]\nD, E, F,\n\n3\n[K:Amin]\nA, B, C\n"
    );
}

#[test]
fn test_dorian_on_a_wraps_into_lower_register() {
    // A is index 9, Dorian adds 10: every note moves down 19 semitones
    let result = normalize_default("x\n[K:Ador]\nA B c\n");
    assert_eq!(result.text, "x\n[K:Ador]\nD, E, F,\n");
}

#[test]
fn test_minor_on_a_moves_down_an_octave() {
    let result = normalize_default("x\n[K:Amin]\nA B c\n");
    assert_eq!(result.text, "x\n[K:Amin]\nA, B, C\n");
}

#[test]
fn test_key_lines_are_never_modified() {
    let corpus = "a\n[K:Ebmaj]\n_E F G\n\nb\n[K:F#min]\n^F ^G A\n\nc\n[K:Cmaj]\nC\n";
    let result = normalize_default(corpus);
    let keys: Vec<&str> = result
        .text
        .split("\n\n")
        .map(|tune| tune.lines().nth(1).unwrap())
        .collect();
    assert_eq!(keys, vec!["[K:Ebmaj]", "[K:F#min]", "[K:Cmaj]"]);
}

#[test]
fn test_c_major_body_is_untouched() {
    let corpus = "1\n[K:Cmaj]\nC  ^D |  E2\n";
    let result = normalize_default(corpus);
    assert_eq!(result.text, corpus);
}

#[test]
fn test_malformed_tune_is_filtered() {
    let corpus = "1\n[K:Dmaj]\nD E F\n\n2\n[K:Dmaj]\nD\nE\nF\nG\nA\n";
    let result = normalize_default(corpus);
    assert_eq!(result.report.tunes_read, 2);
    assert_eq!(result.report.tunes_retained, 1);
    assert_eq!(result.report.malformed_tunes, 1);
    assert_eq!(result.text.split("\n\n").count(), 1);
    assert!(result.text.starts_with("1\n"));
}

#[test]
fn test_bad_keys_are_filtered_without_aborting() {
    let corpus = "1\n[K:Hmaj]\nC\n\n2\n[K:Cfoo]\nC\n\n3\n[K:Gmaj]\nG\n";
    let result = normalize_default(corpus);
    assert_eq!(result.report.malformed_keys, 1);
    assert_eq!(result.report.unknown_modes, 1);
    assert_eq!(result.text, "3\n[K:Gmaj]\nC\n");
}

#[test]
fn test_empty_and_garbage_corpus() {
    assert_eq!(normalize_default("").text, "");
    assert_eq!(normalize_default("\n\n\n").text, "");
    let result = normalize_default("not a tune at all");
    assert_eq!(result.text, "");
    assert_eq!(result.report.tunes_read, 1);
}

#[test]
fn test_parallel_output_matches_sequential() {
    let mut corpus = String::new();
    let keys = ["Gmaj", "Ador", "Emin", "Dmix", "Bbmaj", "Xmaj", "F#dor"];
    for i in 0..200 {
        let key = keys[i % keys.len()];
        corpus.push_str(&format!("{}\n[K:{}]\nG A B c d | e f g\n\n", i, key));
    }

    let sequential = normalize(&corpus, &NormalizerConfig::default()).unwrap();
    let parallel_config = NormalizerConfig {
        parallel: true,
        ..NormalizerConfig::default()
    };
    let parallel = normalize(&corpus, &parallel_config).unwrap();
    assert_eq!(sequential, parallel);
    // "Xmaj" sits at every seventh position starting from 5
    assert_eq!(sequential.report.malformed_keys, 28);
}

#[test]
fn test_keep_meters_leaves_meter_lines() {
    let config = NormalizerConfig {
        strip_meters: false,
        ..NormalizerConfig::default()
    };
    // meter line makes the tune four lines long
    let result = normalize("1\n[M:4/4]\n[K:Gmaj]\nG\n", &config).unwrap();
    assert_eq!(result.report.malformed_tunes, 1);
    assert_eq!(result.text, "");
}

#[test]
fn test_meter_stripping_is_total_over_corpus() {
    let stripped = remove_meters(CORPUS);
    assert!(!MeterStripper::default().contains_meter(&stripped));
    assert!(!stripped.contains("[M:"));
}

#[test]
fn test_compare_shows_original_and_transposed() {
    let before = remove_meters(CORPUS);
    let after = normalize_default(CORPUS).text;
    let comparisons = folknorm::compare_tunes(&before, &after, &[1]);
    assert_eq!(comparisons[0].original.as_deref(), Some("A B c"));
    assert_eq!(comparisons[0].transposed.as_deref(), Some("D, E, F,"));
}
