use crate::{
    CharTest, MaskElement, MaskSpec, Masker, Placeholder, PlaceholderTable, format_input,
};
use rstest::rstest;

fn digit() -> MaskElement {
    MaskElement::pattern(r"\d")
}

fn masker_with(overrides: &[(char, Option<&str>)]) -> Masker {
    let table = PlaceholderTable::default().with_overrides(overrides.iter().map(|(ch, pattern)| {
        let placeholder = pattern
            .map(|pattern| Placeholder::Test(CharTest::new(pattern).expect("regex")));
        (*ch, placeholder)
    }));
    Masker::new(table)
}

#[test]
fn date_pattern() {
    assert_eq!(format_input("11112011", &MaskSpec::pattern("##.##.####")), "11.11.2011");
}

#[test]
fn explicit_elements_phone() {
    let mask = MaskSpec::elements([
        MaskElement::literal("("),
        digit(),
        digit(),
        digit(),
        MaskElement::literal(") "),
        digit(),
        digit(),
        digit(),
        MaskElement::literal("-"),
        digit(),
        digit(),
        digit(),
        digit(),
    ]);
    assert_eq!(format_input("5555551234", &mask), "(555) 555-1234");
}

#[test]
fn explicit_elements_from_json() {
    let mask = MaskSpec::from_json_str(
        r#"["(", {"pattern": "\\d"}, {"pattern": "\\d"}, {"pattern": "\\d"}, ") ",
            {"pattern": "\\d"}, {"pattern": "\\d"}, {"pattern": "\\d"}, "-",
            {"pattern": "\\d"}, {"pattern": "\\d"}, {"pattern": "\\d"}, {"pattern": "\\d"}]"#,
    )
    .expect("mask");
    assert_eq!(format_input("5555551234", &mask), "(555) 555-1234");
}

#[test]
fn removed_placeholder_becomes_literal() {
    let masker = masker_with(&[('#', None), ('D', Some(r"\d"))]);
    assert_eq!(
        masker.format("123456", &MaskSpec::pattern("###-DDD-###-DDD")),
        "###-123-###-456"
    );
}

#[test]
fn upper_and_lower_case_placeholders() {
    let masker = masker_with(&[('u', Some("[A-Z]")), ('l', Some("[a-z]"))]);
    assert_eq!(
        masker.format("123123123AbAb", &MaskSpec::pattern("###-###-###-ul-ul")),
        "123-123-123-Ab-Ab"
    );
}

#[test]
fn cyrillic_placeholder() {
    let masker = masker_with(&[('Я', Some(r"[\wа-яА-Я]"))]);
    assert_eq!(
        masker.format("Доброеутро", &MaskSpec::pattern("ЯЯЯЯЯЯ ЯЯЯЯ")),
        "Доброе утро"
    );
}

#[test]
fn alternation_placeholder() {
    let masker = masker_with(&[('P', Some("(6|7)"))]);
    let mask = MaskSpec::pattern("0P-##-##-##-##");
    assert_eq!(masker.format("0755555555", &mask), "07-55-55-55-55");
    assert_eq!(masker.format("0855555555", &mask), "0");
}

#[rstest]
#[case("02532137", "02:53-21:37")]
#[case("23599999", "23:59-")]
fn time_range(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(format_input(raw, &crate::presets::time_range(raw)), expected);
}

#[test]
fn static_time_range_truncates_at_first_bad_digit() {
    let hh = |tens: &str, units: &str| {
        vec![
            MaskElement::pattern(tens),
            MaskElement::pattern(units),
            MaskElement::literal(":"),
            MaskElement::pattern("[0-5]"),
            MaskElement::pattern("[0-9]"),
        ]
    };
    let mut elements = hh("[0-2]", "[0-3]");
    elements.push(MaskElement::literal("-"));
    elements.extend(hh("[0-2]", "[0-9]"));
    assert_eq!(format_input("23599999", &MaskSpec::Elements(elements)), "23:59-");
}

#[rstest]
// present and matching: the optional literal renders
#[case("12-34", "12-34")]
// present but not matching: the optional slot is skipped
#[case("1234", "1234")]
// absent: nothing after the last typed character
#[case("12", "12")]
fn optional_literal_mid_pattern(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(format_input(raw, &MaskSpec::pattern("##?-##")), expected);
}

#[test]
fn optional_placeholder_mid_pattern() {
    let mask = MaskSpec::pattern("#?#/##");
    assert_eq!(format_input("1/12", &mask), "1/12");
    assert_eq!(format_input("10/12", &mask), "10/12");
    assert_eq!(format_input("1012", &mask), "10/12");
}

#[rstest]
#[case("")]
#[case("abc")]
#[case("12-34")]
fn empty_mask_passes_text_through(#[case] raw: &str) {
    assert_eq!(format_input(raw, &MaskSpec::pattern("")), raw);
    assert_eq!(format_input(raw, &MaskSpec::Elements(Vec::new())), raw);
}

#[test]
fn leading_literals_wait_for_first_character() {
    let mask = MaskSpec::pattern("+1 (###)");
    assert_eq!(format_input("", &mask), "");
    assert_eq!(format_input("5", &mask), "+1 (5");
}

#[test]
fn lenient_masks_never_fail() {
    // trailing optional marker is dropped
    assert_eq!(format_input("123", &MaskSpec::pattern("##?")), "12");
    // characters outside the table are literals
    assert_eq!(format_input("12", &MaskSpec::pattern("#~#")), "1~2");
    // a pattern that does not compile is rendered as its own text
    let mask = MaskSpec::elements([digit(), MaskElement::pattern("[x")]);
    assert_eq!(format_input("1", &mask), "1[x");
}

#[test]
fn recompiling_same_pattern_is_structurally_identical() {
    let table = PlaceholderTable::default();
    let spec = MaskSpec::pattern("(###) ?#AN-X");
    assert_eq!(crate::compile(&spec, &table), crate::compile(&spec, &table));
}
