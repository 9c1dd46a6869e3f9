//! Hand-authored semantic tables.
//!
//! Everything here is static configuration. The lookup indices are built
//! once, on first use, and never change afterwards.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// A named group of words believed to share meaning.
pub type Group = (&'static str, &'static [&'static str]);

/// The broad categories that wide exploration spreads its first guesses over.
pub static CATEGORIES: [Group; 8] = [
    ("abstract", &["생각", "마음", "정신", "의식", "감정", "느낌"]),
    ("physical", &["사물", "물건", "물체", "존재", "실체", "형태"]),
    ("relation", &["관계", "연결", "결합", "만남", "소통", "교류"]),
    ("process", &["변화", "과정", "발전", "성장", "진행", "흐름"]),
    ("space", &["공간", "장소", "위치", "지역", "영역", "범위"]),
    ("time", &["시간", "순간", "시기", "때", "기간", "순서"]),
    ("action", &["행동", "활동", "움직임", "작업", "노력", "실행"]),
    ("state", &["상태", "조건", "상황", "환경", "분위기", "기분"]),
];

/// Words tried on the very first attempt of a game.
pub static OPENING_WORDS: [&str; 10] = [
    "사람", "시간", "사랑", "자연", "음식", "기술", "감정", "장소", "행동", "생각",
];

/// Groups of words that stand in for one another. The first element is the
/// head word, which belongs to its group as well.
pub static RELATED_GROUPS: [Group; 17] = [
    ("사람", &["인간", "개인", "타인", "누군가", "사람들", "인물", "인사"]),
    ("시간", &["때", "순간", "시기", "시절", "기간", "시점", "시대"]),
    ("장소", &["곳", "지역", "위치", "공간", "영역", "범위", "영토"]),
    ("방법", &["수단", "방식", "기법", "절차", "과정", "단계"]),
    ("상태", &["조건", "상황", "환경", "분위기", "느낌", "기분"]),
    ("행동", &["활동", "움직임", "작업", "행위", "실행", "진행"]),
    ("문제", &["과제", "쟁점", "이슈", "고민", "걱정", "난제"]),
    ("해결", &["처리", "해답", "방안", "대안", "극복", "완료"]),
    ("중요", &["핵심", "주요", "필수", "기본", "근본", "본질"]),
    ("변화", &["전환", "개선", "발전", "진보", "성장", "혁신"]),
    ("관계", &["연결", "결합", "소통", "교류", "상호작용", "협력"]),
    ("사회", &["정치", "경제", "문화", "교육", "복지", "제도"]),
    ("국민", &["시민", "주민", "인민", "국가", "정부", "공동체"]),
    ("학습", &["교육", "공부", "연구", "지식", "이해", "습득"]),
    ("지식", &["정보", "학문", "경험", "기술", "능력", "실력"]),
    ("감정", &["마음", "기분", "느낌", "정서", "심리", "의식"]),
    ("행복", &["기쁨", "만족", "즐거움", "웃음", "평화", "사랑"]),
];

/// Semantic fields that focused search looks for among the top guesses.
pub static FIELDS: [Group; 5] = [
    (
        "politics-society",
        &[
            "정치", "사회", "국가", "정부", "국민", "시민", "공동체", "사회적", "정책", "제도",
        ],
    ),
    (
        "education-learning",
        &["교육", "학습", "공부", "지식", "학문", "연구", "이해", "습득", "경험"],
    ),
    (
        "emotion-psychology",
        &["감정", "마음", "기분", "느낌", "정서", "심리", "사랑", "행복", "슬픔"],
    ),
    (
        "time-space",
        &["시간", "공간", "장소", "위치", "때", "순간", "지역", "영역", "범위"],
    ),
    (
        "action-activity",
        &["행동", "활동", "움직임", "작업", "실행", "진행", "과정", "방법"],
    ),
];

/// Endings substituted for the last character of a word to produce
/// morphological relatives.
pub static SUFFIXES: [&str; 9] = ["다", "하다", "되다", "이다", "적", "의", "로", "을", "를"];

lazy_static! {
    /// Word to the indices of the [`CATEGORIES`] it belongs to.
    static ref CATEGORY_INDEX: HashMap<&'static str, Vec<usize>> = index(&CATEGORIES, false);

    /// Word to the indices of the [`RELATED_GROUPS`] it belongs to, heads
    /// included.
    static ref RELATED_INDEX: HashMap<&'static str, Vec<usize>> = index(&RELATED_GROUPS, true);
}

fn index(groups: &[Group], with_heads: bool) -> HashMap<&'static str, Vec<usize>> {
    let mut map: HashMap<&'static str, Vec<usize>> = HashMap::new();
    for (i, (head, words)) in groups.iter().enumerate() {
        let heads = with_heads.then(|| *head);
        for word in heads.into_iter().chain(words.iter().copied()) {
            let entry = map.entry(word).or_default();
            if !entry.contains(&i) {
                entry.push(i);
            }
        }
    }
    map
}

/// The indices of the exploration categories that contain `word`.
pub fn categories_of(word: &str) -> &'static [usize] {
    CATEGORY_INDEX
        .get(word)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Every word sharing a related group with `word`, excluding `word` itself.
///
/// Words come out in table order and without duplicates.
pub fn related_words(word: &str) -> Vec<&'static str> {
    let mut mates = Vec::new();
    for &i in RELATED_INDEX.get(word).map(Vec::as_slice).unwrap_or_default() {
        let (head, words) = RELATED_GROUPS[i];
        for mate in std::iter::once(head).chain(words.iter().copied()) {
            if mate != word && !mates.contains(&mate) {
                mates.push(mate);
            }
        }
    }
    mates
}

/// The first field (in table order) that contains every one of `words`.
///
/// Membership is an exact lookup. An empty `words` never matches.
pub fn common_field(words: &[&str]) -> Option<Group> {
    if words.is_empty() {
        return None;
    }
    FIELDS
        .iter()
        .find(|(_, members)| words.iter().all(|w| members.contains(w)))
        .copied()
}

/// Every word mentioned anywhere in the tables. Words in several tables
/// appear more than once.
pub fn all_words() -> impl Iterator<Item = &'static str> {
    let grouped = |groups: &'static [Group]| {
        groups
            .iter()
            .flat_map(|(head, words)| std::iter::once(*head).chain(words.iter().copied()))
    };

    CATEGORIES
        .iter()
        .flat_map(|(_, words)| words.iter().copied())
        .chain(OPENING_WORDS.iter().copied())
        .chain(grouped(&RELATED_GROUPS))
        .chain(FIELDS.iter().flat_map(|(_, words)| words.iter().copied()))
}
