use super::normalize;

#[test]
fn boxed_wrapper_is_unwrapped() {
    let out = normalize("The result is \\boxed{42}.");
    assert!(out.contains("42"));
    assert!(!out.contains("boxed"));
    assert!(!out.contains('{'));
}

#[test]
fn fraction_becomes_slash_form() {
    let out = normalize("Half is \\frac{1}{2} of the whole.");
    assert!(out.contains("1/2"));
    assert!(!out.contains("frac"));
}

#[test]
fn math_delimiters_are_stripped_but_inner_text_kept() {
    assert_eq!(normalize("\\(x + y\\)"), "x + y");
    assert_eq!(normalize("\\[x = 3\\]"), "x = 3");
}

#[test]
fn text_wrapper_is_unwrapped() {
    assert_eq!(normalize("\\text{five apples}"), "five apples");
}

#[test]
fn times_becomes_ascii_x() {
    assert_eq!(normalize("3 \\times 4 = 12"), "3 x 4 = 12");
}

#[test]
fn bold_markers_and_answer_labels_are_removed() {
    assert_eq!(normalize("**Answer: Paris**"), "Paris");
}

#[test]
fn attributed_quotes_are_preserved_verbatim() {
    let input = r#"The report "states the figures clearly" on page two."#;
    assert_eq!(normalize(input), input);

    let input = r#"She "said it was fine" afterwards."#;
    assert_eq!(normalize(input), input);
}

#[test]
fn unattributed_quotes_are_unwrapped() {
    assert_eq!(normalize(r#"It was "important" to check."#), "It was important to check.");
}

#[test]
fn excess_blank_lines_collapse_to_one() {
    let out = normalize("first\n\n\n\n\nsecond");
    assert_eq!(out, "first\n\nsecond");
}

#[test]
fn per_line_and_overall_whitespace_is_trimmed() {
    let out = normalize("   leading\nmiddle   \n  both  ");
    assert_eq!(out, "leading\nmiddle\nboth");
}

#[test]
fn normalize_is_idempotent() {
    let samples = [
        "The result is \\boxed{42}.",
        "Half is \\frac{1}{2} of the whole.",
        "**Answer: Paris**",
        "a\n\n\n\nb\n\n\n\n\nc",
        r#"She "said it was fine" but it was "fine"."#,
        "\\(x\\) and \\[y\\] and \\text{z}",
        "plain text with no markup at all",
        "  mixed \\times content\n\n\n with \\frac{3}{4} markup  ",
    ];
    for s in samples {
        let once = normalize(s);
        let twice = normalize(&once);
        assert_eq!(once, twice, "normalize not idempotent for {s:?}");
    }
}

#[test]
fn empty_and_whitespace_inputs_yield_empty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   \n\t  "), "");
}
