use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mert_core::scorer::{create_scorer, PerScorer, Scorer, ScorerError, ScorerKind, WerScorer};
use mert_core::types::{Diff, ScoreStats};
use tempfile::tempdir;

fn write_refs(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn prepare(scorer: &mut dyn Scorer, sentence: usize, text: &str) -> ScoreStats {
    let mut entry = ScoreStats::zeros(scorer.number_of_scores());
    scorer.prepare_stats(sentence, text, &mut entry).unwrap();
    entry
}

#[test]
fn golden_per_statistics_and_trajectory() {
    let dir = tempdir().unwrap();
    let refs = write_refs(dir.path(), "ref.0", &["the cat sat on the mat", "hello world"]);

    let mut scorer = PerScorer::new("").unwrap();
    scorer.set_reference_files(&[refs]).unwrap();

    let nbest = [
        (0, "the cat sat on mat"),
        (0, "the the the cat"),
        (1, "hello world"),
        (1, "hello big world !"),
    ];
    let mut data = scorer.empty_score_data();
    let mut prepared = Vec::new();
    for (sentence, text) in nbest {
        let entry = prepare(&mut scorer, sentence, text);
        prepared.push(entry.as_slice().to_vec());
        data.add(sentence, entry).unwrap();
    }

    assert_eq!(
        prepared,
        vec![
            vec![5.0, 5.0, 6.0],
            vec![3.0, 4.0, 6.0],
            vec![2.0, 2.0, 2.0],
            vec![2.0, 4.0, 2.0],
        ]
    );

    scorer.set_score_data(Arc::new(data));
    assert_eq!(scorer.score(&[0, 0]).unwrap(), 0.875);
    let scores = scorer
        .score_diffs(&[0, 0], &[Diff::new(1, 1), Diff::new(0, 1)])
        .unwrap();
    assert_eq!(scores, vec![0.875, 0.75, 0.625]);
}

#[test]
fn golden_wer_statistics_and_score() {
    let dir = tempdir().unwrap();
    let refs = write_refs(dir.path(), "ref.0", &["the cat sat on the mat", "hello world"]);

    let mut scorer = WerScorer::new("").unwrap();
    scorer.set_reference_files(&[refs]).unwrap();

    let mut data = scorer.empty_score_data();
    let first = prepare(&mut scorer, 0, "the cat sat on mat");
    let second = prepare(&mut scorer, 1, "hello there world");
    let perfect = prepare(&mut scorer, 1, "hello world");
    assert_eq!(first.as_slice(), &[1.0, 6.0]);
    assert_eq!(second.as_slice(), &[1.0, 2.0]);
    assert_eq!(perfect.as_slice(), &[0.0, 2.0]);

    data.add(0, first).unwrap();
    data.add(1, second).unwrap();
    data.add(1, perfect).unwrap();
    scorer.set_score_data(Arc::new(data));

    let scores = scorer.score_diffs(&[0, 0], &[Diff::new(1, 1)]).unwrap();
    assert_eq!(scores, vec![0.75, 1.0 - 1.0 / 8.0]);
}

#[test]
fn best_reference_is_chosen_per_hypothesis() {
    let dir = tempdir().unwrap();
    let first = write_refs(dir.path(), "ref.0", &["hello world"]);
    let second = write_refs(dir.path(), "ref.1", &["hi world"]);

    let mut per = PerScorer::new("").unwrap();
    per.set_reference_files(&[first.clone(), second.clone()]).unwrap();
    assert_eq!(prepare(&mut per, 0, "hi world").as_slice(), &[2.0, 2.0, 2.0]);

    let mut wer = WerScorer::new("").unwrap();
    wer.set_reference_files(&[first, second]).unwrap();
    assert_eq!(prepare(&mut wer, 0, "hi world").as_slice(), &[0.0, 2.0]);
}

#[test]
fn case_folding_applies_to_references_and_hypotheses() {
    let dir = tempdir().unwrap();
    let refs = write_refs(dir.path(), "ref.0", &["The Cat"]);

    let mut folding = PerScorer::new("case:false").unwrap();
    folding.set_reference_files(&[refs.clone()]).unwrap();
    assert_eq!(prepare(&mut folding, 0, "the CAT").as_slice(), &[2.0, 2.0, 2.0]);

    let mut preserving = PerScorer::new("case:true").unwrap();
    preserving.set_reference_files(&[refs]).unwrap();
    assert_eq!(prepare(&mut preserving, 0, "the CAT").as_slice(), &[0.0, 2.0, 2.0]);
}

#[test]
fn factors_apply_to_references_and_hypotheses() {
    let dir = tempdir().unwrap();
    let refs = write_refs(dir.path(), "ref.0", &["dogs|NNS bark|VBP"]);

    let mut scorer = WerScorer::new("").unwrap();
    scorer.set_factors("1").unwrap();
    scorer.set_reference_files(&[refs]).unwrap();

    // Surface forms differ, tags agree.
    assert_eq!(prepare(&mut scorer, 0, "cats|NNS meow|VBP").as_slice(), &[0.0, 2.0]);
    assert!(matches!(scorer.set_factors("0"), Err(ScorerError::AlreadyPreprocessing)));
}

#[test]
fn invariant_references_precede_preparation() {
    let mut scorer = PerScorer::new("").unwrap();
    let mut entry = ScoreStats::zeros(3);
    assert!(matches!(
        scorer.prepare_stats(0, "text", &mut entry),
        Err(ScorerError::ReferencesNotLoaded)
    ));
    assert!(matches!(
        scorer.set_reference_files(&[]),
        Err(ScorerError::NoReferenceFiles)
    ));
}

#[test]
fn rejected_preparation_leaves_scorer_untouched() {
    let mut wer = WerScorer::new("").unwrap();
    let mut entry = ScoreStats::zeros(2);
    assert!(matches!(
        wer.prepare_stats(0, "some text", &mut entry),
        Err(ScorerError::ReferencesNotLoaded)
    ));
    assert!(wer.base().vocabulary().is_empty());
    wer.set_factors("0").unwrap();

    let dir = tempdir().unwrap();
    let refs = write_refs(dir.path(), "ref.0", &["one line"]);
    let mut per = PerScorer::new("").unwrap();
    per.set_reference_files(&[refs]).unwrap();
    let known = per.base().vocabulary().len();

    let mut entry = ScoreStats::zeros(3);
    assert!(matches!(
        per.prepare_stats(5, "brand new tokens", &mut entry),
        Err(ScorerError::SentenceOutOfRange { sentence: 5, len: 1 })
    ));
    assert_eq!(per.base().vocabulary().len(), known);
}

#[test]
fn reference_files_must_align() {
    let dir = tempdir().unwrap();
    let first = write_refs(dir.path(), "ref.0", &["a b", "c d"]);
    let second = write_refs(dir.path(), "ref.1", &["a b"]);

    let mut scorer = WerScorer::new("").unwrap();
    match scorer.set_reference_files(&[first, second.clone()]) {
        Err(ScorerError::ReferenceLengthMismatch { path, expected, found }) => {
            assert_eq!(path, second);
            assert_eq!((expected, found), (2, 1));
        }
        other => panic!("expected reference length mismatch, got {other:?}"),
    }

    let missing = dir.path().join("missing");
    assert!(matches!(
        scorer.set_reference_files(&[missing]),
        Err(ScorerError::Io(_))
    ));
}

#[test]
fn sentence_index_strings_are_parsed_strictly() {
    let dir = tempdir().unwrap();
    let refs = write_refs(dir.path(), "ref.0", &["a b", "c d"]);

    let mut scorer = PerScorer::new("").unwrap();
    scorer.set_reference_files(&[refs]).unwrap();

    let mut entry = ScoreStats::zeros(3);
    scorer.prepare_stats_str("1", "c d", &mut entry).unwrap();
    assert_eq!(entry.as_slice(), &[2.0, 2.0, 2.0]);
    scorer.prepare_stats_str(" 0 ", "a", &mut entry).unwrap();
    assert_eq!(entry.as_slice(), &[1.0, 1.0, 2.0]);

    for bad in ["", "abc", "-1", "1.5", "2x"] {
        assert!(
            matches!(
                scorer.prepare_stats_str(bad, "a b", &mut entry),
                Err(ScorerError::InvalidSentenceIndex(_))
            ),
            "index '{bad}' should be rejected"
        );
    }
    assert!(matches!(
        scorer.prepare_stats(2, "a b", &mut entry),
        Err(ScorerError::SentenceOutOfRange { sentence: 2, len: 2 })
    ));
}

#[test]
fn scorers_are_built_by_name() {
    let per = create_scorer("per", "").unwrap();
    assert_eq!(per.name(), "PER");
    assert_eq!(per.number_of_scores(), 3);

    let wer = create_scorer(" WER ", "case:false").unwrap();
    assert_eq!(wer.name(), "WER");
    assert_eq!(wer.number_of_scores(), 2);
    assert_eq!(wer.config_value("case", "true"), "false");

    assert!(matches!(create_scorer("BLEU", ""), Err(ScorerError::UnknownScorer(_))));
    assert!(matches!(create_scorer("PER", "broken"), Err(ScorerError::Config(_))));

    let names: Vec<String> = ScorerKind::all().iter().map(|kind| kind.to_string()).collect();
    assert_eq!(names, vec!["PER", "WER"]);
}

#[test]
fn invariant_number_of_scores_is_constant() {
    let dir = tempdir().unwrap();
    let refs = write_refs(dir.path(), "ref.0", &["x y z"]);

    for kind in ScorerKind::all() {
        let mut scorer = kind.build("").unwrap();
        let width = scorer.number_of_scores();
        scorer.set_reference_files(&[refs.clone()]).unwrap();
        let entry = prepare(scorer.as_mut(), 0, "x z");
        assert_eq!(entry.len(), width);
        assert_eq!(scorer.number_of_scores(), width);
    }
}

#[test]
fn scorers_run_on_separate_threads() {
    let dir = tempdir().unwrap();
    let refs = write_refs(dir.path(), "ref.0", &["a b c"]);

    let handles: Vec<_> = ScorerKind::all()
        .iter()
        .map(|kind| {
            let mut scorer = kind.build("").unwrap();
            let refs = refs.clone();
            std::thread::spawn(move || {
                scorer.set_reference_files(&[refs]).unwrap();
                let mut data = scorer.empty_score_data();
                let entry = prepare(scorer.as_mut(), 0, "a b c");
                data.add(0, entry).unwrap();
                scorer.set_score_data(Arc::new(data));
                scorer.score(&[0]).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1.0);
    }
}
