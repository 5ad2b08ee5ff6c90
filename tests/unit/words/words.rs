use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

#[test]
fn from_lines_keeps_nine_letter_words_uppercased() {
    let list = WordList::from_lines(["carthorse", "", "  orchestra  ", "cat", "half-baked", "nine9nine"]).unwrap();
    assert_eq!(list.words(), &["CARTHORSE".to_string(), "ORCHESTRA".to_string()]);
    assert_eq!(list.len(), 2);
    assert!(!list.is_empty());
}

#[test]
fn empty_word_list_is_word_source_error() {
    let err = WordList::from_lines(["cat", "dog", ""]).unwrap_err();
    assert!(matches!(err, WheelError::WordSource(_)));
}

#[test]
fn missing_word_file_is_word_source_error() {
    let path = std::env::temp_dir().join(format!("wordwheel_no_words_{}.txt", std::process::id()));
    let err = WordList::load(&path).unwrap_err();
    assert!(err.to_string().contains("read word list"));
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("wordwheel_words_{}.txt", std::process::id()));
    std::fs::write(&path, "carthorse\norchestra\n").unwrap();
    let list = WordList::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(list.len(), 2);
}

#[test]
fn choose_returns_listed_words() {
    let list = WordList::from_lines(["carthorse", "orchestra", "education"]).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..200 {
        let w = list.choose(&mut rng);
        assert!(list.words().iter().any(|x| x == w));
        seen.insert(w.to_string());
    }
    assert_eq!(seen.len(), 3);
}

#[test]
fn verbatim_keeps_order() {
    let mut rng = StdRng::seed_from_u64(1);
    let letters = word_to_letters("catsdogre", true, &mut rng).unwrap();
    assert_eq!(letters.joined(), "CATSDOGRE");
}

#[test]
fn shuffle_is_a_permutation() {
    let mut rng = StdRng::seed_from_u64(42);
    let letters = word_to_letters("carthorse", false, &mut rng).unwrap();
    let mut got: Vec<char> = letters.as_slice().to_vec();
    let mut want: Vec<char> = "CARTHORSE".chars().collect();
    got.sort_unstable();
    want.sort_unstable();
    assert_eq!(got, want);
}

#[test]
fn shuffle_is_reproducible_for_a_seed() {
    let a = word_to_letters("education", false, &mut StdRng::seed_from_u64(9)).unwrap();
    let b = word_to_letters("education", false, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn wrong_length_words_are_rejected_not_truncated() {
    let mut rng = StdRng::seed_from_u64(3);
    let err = word_to_letters("catsdogr", true, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        WheelError::InvalidLetterCount {
            expected: 9,
            got: 8
        }
    ));
    let err = word_to_letters("overlapping", false, &mut rng).unwrap_err();
    assert!(matches!(err, WheelError::InvalidLetterCount { got: 11, .. }));
}

#[test]
fn load_skips_lines_that_are_not_nine_letters() {
    let path = std::env::temp_dir().join(format!("wordwheel_mixed_{}.txt", std::process::id()));
    std::fs::write(&path, "cat\n  carthorse \nhalf-baked\n\nnine9nine\neducation\n").unwrap();
    let list = WordList::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(list.words(), &["CARTHORSE".to_string(), "EDUCATION".to_string()]);
}
