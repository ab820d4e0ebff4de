//! The standard Mandarin syllable inventory.
//!
//! Dictionary ingestion registers whatever syllables its entries use, so a
//! loaded lexicon needs nothing from here. This table exists for sessions
//! that want a full segmenter vocabulary up front (demos, tests, empty
//! user dictionaries). The ü vowel is spelled `v`, as pinyin input schemes
//! conventionally do.

use pinyin_ime_core::Lexicon;

/// Every standard pinyin syllable, grouped by initial.
pub const STANDARD_SYLLABLES: &[&str] = &[
    // zero initial
    "a", "o", "e", "ai", "ei", "ao", "ou", "an", "en", "ang", "eng", "er",
    // b
    "ba", "bo", "bai", "bei", "bao", "ban", "ben", "bang", "beng", "bi", "bie", "biao", "bian",
    "bin", "bing", "bu",
    // p
    "pa", "po", "pai", "pei", "pao", "pou", "pan", "pen", "pang", "peng", "pi", "pie", "piao",
    "pian", "pin", "ping", "pu",
    // m
    "ma", "mo", "me", "mai", "mei", "mao", "mou", "man", "men", "mang", "meng", "mi", "mie",
    "miao", "miu", "mian", "min", "ming", "mu",
    // f
    "fa", "fo", "fei", "fou", "fan", "fen", "fang", "feng", "fu",
    // d
    "da", "de", "dai", "dei", "dao", "dou", "dan", "dang", "deng", "dong", "di", "die", "diao",
    "diu", "dian", "ding", "du", "duo", "dui", "duan", "dun",
    // t
    "ta", "te", "tai", "tao", "tou", "tan", "tang", "teng", "tong", "ti", "tie", "tiao", "tian",
    "ting", "tu", "tuo", "tui", "tuan", "tun",
    // n
    "na", "ne", "nai", "nei", "nao", "nou", "nan", "nen", "nang", "neng", "nong", "ni", "nie",
    "niao", "niu", "nian", "nin", "niang", "ning", "nu", "nuo", "nuan", "nv", "nve",
    // l
    "la", "le", "lai", "lei", "lao", "lou", "lan", "lang", "leng", "long", "li", "lia", "lie",
    "liao", "liu", "lian", "lin", "liang", "ling", "lu", "luo", "luan", "lun", "lv", "lve",
    // g
    "ga", "ge", "gai", "gei", "gao", "gou", "gan", "gen", "gang", "geng", "gong", "gu", "gua",
    "guo", "guai", "gui", "guan", "gun", "guang",
    // k
    "ka", "ke", "kai", "kao", "kou", "kan", "ken", "kang", "keng", "kong", "ku", "kua", "kuo",
    "kuai", "kui", "kuan", "kun", "kuang",
    // h
    "ha", "he", "hai", "hei", "hao", "hou", "han", "hen", "hang", "heng", "hong", "hu", "hua",
    "huo", "huai", "hui", "huan", "hun", "huang",
    // j
    "ji", "jia", "jie", "jiao", "jiu", "jian", "jin", "jiang", "jing", "jiong", "ju", "jue",
    "juan", "jun",
    // q
    "qi", "qia", "qie", "qiao", "qiu", "qian", "qin", "qiang", "qing", "qiong", "qu", "que",
    "quan", "qun",
    // x
    "xi", "xia", "xie", "xiao", "xiu", "xian", "xin", "xiang", "xing", "xiong", "xu", "xue",
    "xuan", "xun",
    // zh
    "zha", "zhe", "zhi", "zhai", "zhao", "zhou", "zhan", "zhen", "zhang", "zheng", "zhong",
    "zhu", "zhua", "zhuo", "zhuai", "zhui", "zhuan", "zhun", "zhuang",
    // ch
    "cha", "che", "chi", "chai", "chao", "chou", "chan", "chen", "chang", "cheng", "chong",
    "chu", "chuo", "chuai", "chui", "chuan", "chun", "chuang",
    // sh
    "sha", "she", "shi", "shai", "shao", "shou", "shan", "shen", "shang", "sheng", "shu",
    "shua", "shuo", "shuai", "shui", "shuan", "shun", "shuang",
    // r
    "re", "ri", "rao", "rou", "ran", "ren", "rang", "reng", "rong", "ru", "ruo", "rui", "ruan",
    "run",
    // z
    "za", "ze", "zi", "zai", "zei", "zao", "zou", "zan", "zen", "zang", "zeng", "zong", "zu",
    "zuo", "zui", "zuan", "zun",
    // c
    "ca", "ce", "ci", "cai", "cao", "cou", "can", "cen", "cang", "ceng", "cong", "cu", "cuo",
    "cui", "cuan", "cun",
    // s
    "sa", "se", "si", "sai", "sao", "sou", "san", "sen", "sang", "seng", "song", "su", "suo",
    "sui", "suan", "sun",
    // y
    "ya", "yo", "ye", "yao", "you", "yan", "yin", "yang", "ying", "yong", "yi", "yu", "yue",
    "yuan", "yun",
    // w
    "wa", "wo", "wai", "wei", "wan", "wen", "wang", "weng", "wu",
];

/// Register the whole standard inventory into a lexicon's syllable set.
pub fn register_standard(lexicon: &mut Lexicon) {
    for syllable in STANDARD_SYLLABLES {
        let _ = lexicon.add_syllable(syllable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinyin_ime_core::MatchKind;

    #[test]
    fn table_is_lowercase_and_duplicate_free() {
        let mut seen = std::collections::HashSet::new();
        for syllable in STANDARD_SYLLABLES {
            assert!(syllable.bytes().all(|b| b.is_ascii_lowercase()), "{syllable}");
            assert!(seen.insert(syllable), "duplicate {syllable}");
        }
    }

    #[test]
    fn registration_populates_the_syllable_set() {
        let mut lexicon = Lexicon::new();
        register_standard(&mut lexicon);
        assert!(lexicon.is_syllable("zhuang"));
        assert!(lexicon.is_syllable("a"));
        // "xian" extends to "xiang"; bare "i" starts nothing.
        assert_eq!(lexicon.syllable_match("xian"), MatchKind::Extendible);
        assert_eq!(lexicon.syllable_match("i"), MatchKind::Miss);
    }
}
