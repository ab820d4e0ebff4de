//! Bucket ordering stays intact across arbitrary add/promote sequences.

use pinyin_ime_core::{Dict, DictEntry, Lexicon};

fn is_sorted(dict: &Dict) -> bool {
    let entries = dict.entries();
    entries.windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        for (x, y) in a.syllables().iter().zip(b.syllables()) {
            if x == y {
                continue;
            }
            if x.len() != y.len() {
                return x.len() < y.len();
            }
            return x < y;
        }
        a.freq() >= b.freq()
    })
}

#[test]
fn adds_and_promotes_keep_the_bucket_sorted() {
    let mut dict = Dict::new();
    dict.add(DictEntry::new("沙人", "sha'ren", 4)).unwrap();
    dict.add(DictEntry::new("山人", "shan'ren", 9)).unwrap();
    dict.add(DictEntry::new("输入", "shu'ru", 2)).unwrap();
    dict.add(DictEntry::new("书入", "shu'ru", 7)).unwrap();
    assert!(is_sorted(&dict));

    dict.promote(&[3, 3, 0], 2);
    assert!(is_sorted(&dict));
    dict.promote(&[1], 50);
    assert!(is_sorted(&dict));

    // Every entry still shares the bucket acronym.
    assert!(dict.iter().all(|e| e.acronym() == dict.acronym()));
}

#[test]
fn lexicon_buckets_stay_sorted_through_ingestion() {
    let mut lexicon = Lexicon::new();
    for (chinese, pinyin, freq) in [
        ("输入", "shu'ru", 10),
        ("山人", "shan'ren", 1),
        ("沙人", "sha'ren", 30),
        ("输入法", "shu'ru'fa", 5),
    ] {
        lexicon.add_entry(chinese, pinyin, freq).unwrap();
    }
    assert!(is_sorted(lexicon.dict("sr").unwrap()));
    assert_eq!(lexicon.dict("sr").unwrap().len(), 3);
    assert_eq!(lexicon.dict("srf").unwrap().len(), 1);
}
