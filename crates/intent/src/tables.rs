//! The authoritative grade / subject / theme tables.
//!
//! Order matters: rules are most-specific first and the first rule that
//! matches decides the slot, even if a later rule would also match.

use std::sync::LazyLock;

use edu_lesson_types::{Grade, Subject, Theme};
use regex::Captures;

use crate::rules::{Rule, cardinal_alternation, number_at, ordinal_alternation, ordinal_value};

fn grade_from_number(caps: &Captures<'_>) -> Option<Grade> {
    let level = number_at(caps, 1)?;
    u8::try_from(level).ok().filter(|l| *l >= 1).and_then(Grade::new)
}

fn grade_from_ordinal(caps: &Captures<'_>) -> Option<Grade> {
    let level = ordinal_value(caps.get(1)?.as_str())?;
    Grade::new(level as u8)
}

pub(crate) static GRADE_RULES: LazyLock<Vec<Rule<Grade>>> = LazyLock::new(|| {
    vec![
        Rule::fixed(r"\b(?:kindergarten|kindergartners?|kinder)\b", Grade::KINDERGARTEN),
        Rule::derived(
            r"\b(\d{1,2})(?:st|nd|rd|th)[\s-]+grade(?:rs?)?\b",
            grade_from_number,
        ),
        Rule::derived(
            &format!(r"\b({})[\s-]+grade(?:rs?)?\b", ordinal_alternation()),
            grade_from_ordinal,
        ),
        Rule::derived(r"\bgrade[\s-]+(\d{1,2})\b", grade_from_number),
        Rule::derived(
            &format!(r"\bgrade[\s-]+({})\b", cardinal_alternation()),
            grade_from_number,
        ),
    ]
});

pub(crate) static SUBJECT_RULES: LazyLock<Vec<Rule<Subject>>> = LazyLock::new(|| {
    vec![
        // Subject named outright.
        Rule::fixed(r"\b(?:math|maths|mathematics|arithmetic)\b", Subject::Math),
        Rule::fixed(
            r"\b(?:reading|ela|english|language arts|literacy|phonics)\b",
            Subject::Reading,
        ),
        Rule::fixed(r"\bscience\b", Subject::Science),
        Rule::fixed(r"\b(?:history|social studies|civics)\b", Subject::History),
        Rule::fixed(r"\b(?:art|arts and crafts|drawing|painting)\b", Subject::Art),
        Rule::fixed(r"\b(?:music|musical|singing)\b", Subject::Music),
        Rule::fixed(r"\b(?:pe|physical education|gym)\b|\bp\.e\.(?:\W|$)", Subject::Pe),
        // Subject implied by the topic.
        Rule::fixed(
            r"\b(?:fractions?|decimals?|multiplication|division|geometry|algebra|place value|times tables?|word problems?|equations?|percentages?|addition and subtraction|counting)\b",
            Subject::Math,
        ),
        Rule::fixed(
            r"\b(?:vocabulary|spelling|grammar|comprehension|poetry|poems?|sight words|main idea|nouns|verbs|adjectives)\b",
            Subject::Reading,
        ),
        Rule::fixed(
            r"\b(?:plants?|photosynthesis|ecosystems?|weather|solar system|volcano(?:es)?|rocks and minerals|magnets?|life cycles?|water cycle|habitats?|experiments?|cells|states of matter)\b",
            Subject::Science,
        ),
        Rule::fixed(
            r"\b(?:civil war|revolution|ancient|presidents?|explorers|constitution|colonial|pilgrims|world war)\b",
            Subject::History,
        ),
        Rule::fixed(
            r"\b(?:instruments?|rhythm|composers?|melody)\b",
            Subject::Music,
        ),
        Rule::fixed(
            r"\b(?:exercise|fitness|sportsmanship|stretching)\b",
            Subject::Pe,
        ),
    ]
});

pub(crate) static THEME_RULES: LazyLock<Vec<Rule<Theme>>> = LazyLock::new(|| {
    vec![
        Rule::fixed(
            r"\b(?:halloween|spooky|pumpkins?|ghosts?|witch(?:es)?|jack-o-lanterns?|trick[\s-]or[\s-]treat(?:ing)?)\b",
            Theme::Halloween,
        ),
        Rule::fixed(
            r"\b(?:winter|snow|snowman|snowmen|snowflakes?|christmas|holidays?|december|mittens|hot cocoa|penguins?)\b",
            Theme::Winter,
        ),
        Rule::fixed(
            r"\b(?:spring|springtime|flowers?|easter|blooming|gardens?|butterfl(?:y|ies))\b",
            Theme::Spring,
        ),
        Rule::fixed(
            r"\b(?:ocean|oceans|sea|beach|underwater|marine|fish|sharks?|whales?|coral reefs?)\b",
            Theme::Ocean,
        ),
        Rule::fixed(
            r"\b(?:space|outer space|planets?|astronauts?|rockets?|galaxy|galaxies|solar system)\b",
            Theme::Space,
        ),
        Rule::fixed(
            r"\b(?:animals?|zoo|pets?|dinosaurs?|jungle|farm|safari|wildlife)\b",
            Theme::Animals,
        ),
        Rule::fixed(
            r"\b(?:sports?|soccer|football|basketball|baseball|olympics?|athletes?)\b",
            Theme::Sports,
        ),
        Rule::fixed(r"\b(?:general|no theme|plain)\b", Theme::General),
    ]
});
