use indoc::indoc;
use insta::assert_snapshot;

use crate::Config;

fn compile_ok(source: &str, config: &Config) -> String {
    let (output, diagnostics) = crate::compile(source, config).expect("compile");
    assert!(!diagnostics.has_errors());
    output
}

/// Smaller documents for assertions: fixed boilerplate swapped for markers.
fn compile_bare(source: &str) -> String {
    let config = Config::new().preamble("// preamble").postamble("// postamble");
    compile_ok(source, &config)
}

#[test]
fn typed_pair_document() {
    let output = compile_bare(indoc! {r#"
        pair = a:digit "," b:digit
        digit = [0-9]
    "#});

    assert_snapshot!(output.trim_end(), @r#"
    // preamble

    type Pair = Pair of a: Digit * b: Digit
    and Digit = Digit of char

    let rec pair (sr: SourceReader) : Pair option =
      let p = position sr
      let var0 = digit sr
      if Option.isNone var0 then
        reset sr p; None
      else
      let var1 = expectLiteral sr ","
      if Option.isNone var1 then
        reset sr p; None
      else
      let var2 = digit sr
      if Option.isNone var2 then
        reset sr p; None
      else
        Some (Pair.Pair (Option.get var0, Option.get var2))
    and digit (sr: SourceReader) : Digit option =
      let p = position sr
      match expectMatch (Regex "[0-9]") sr with
      | Some c -> Some (Digit c)
      | None ->
      reset sr p
      None

    let root = pair

    // postamble
    "#);
}

#[test]
fn ordered_choice_renders_case_cascade() {
    let output = compile_bare("digit = '0' / [1-9]");

    assert!(output.contains(indoc! {r#"
        type Digit =
        | DigitCase1 of MatchedLiteral
        | DigitCase2 of char
    "#}.trim_end()));

    // Cases are tried in grammar order, rolling back between attempts.
    assert!(output.contains(indoc! {r#"
        let rec digit (sr: SourceReader) : Digit option =
          let p = position sr
          match expectLiteral sr "0" with
          | Some x -> Some (Digit.DigitCase1 x)
          | None ->
          reset sr p
          match expectMatch (Regex "[1-9]") sr with
          | Some x -> Some (Digit.DigitCase2 x)
          | None ->
          reset sr p
          None
    "#}.trim_end()));
}

#[test]
fn all_literal_tuple_collapses_to_marker_type() {
    let output = compile_bare(r#"arrow = "-" ">""#);

    assert!(output.contains("type Arrow = Arrow\n"));
    // Both literals are still matched, just not captured.
    assert!(output.contains(r#"let var0 = expectLiteral sr "-""#));
    assert!(output.contains(r#"let var1 = expectLiteral sr ">""#));
    assert!(output.contains("Some (Arrow.Arrow)"));
}

#[test]
fn silent_reference_matches_but_is_not_captured() {
    let output = compile_bare(indoc! {r#"
        word = _ws letter
        letter = [a-z]
        _ws = " "*
    "#});

    assert!(output.contains("type Word = Word of Letter\n"));
    // The silent rule still runs; only its value is dropped.
    assert!(output.contains("let var0 = underscore_ws sr"));
    assert!(output.contains("Some (Word.Word (Option.get var1))"));
    assert!(output.contains("and underscore_ws (sr: SourceReader) : UnderscoreWs option ="));
}

#[test]
fn class_repetition_becomes_string() {
    let output = compile_bare("word = [a-z]+");

    assert!(output.contains("type Word = string\n"));
    assert!(output.contains(indoc! {r#"
        let rec word (sr: SourceReader) : Word option =
          let p = position sr
          let pattern = Regex "[a-z]"
          let rec readString s =
            match expectMatch pattern sr with
            | Some c -> readString (s + string c)
            | None -> s
          match readString "" with
          | s when s.Length >= 1 -> Some s
          | _ ->
          reset sr p
          None
    "#}.trim_end()));
}

#[test]
fn rule_repetition_becomes_list() {
    let output = compile_bare(indoc! {r#"
        digits = digit*
        digit = [0-9]
    "#});

    assert!(output.contains("type Digits = Digit list\n"));
    assert!(output.contains("| Some next -> readList (List.append items [next])"));
    assert!(output.contains("| items when List.length items >= 0 -> Some items"));
}

#[test]
fn optional_rule_never_fails() {
    let output = compile_bare(r#"sign = "-"?"#);

    assert!(output.contains("type Sign = Sign of MatchedLiteral option\n"));
    assert!(output.contains(indoc! {r#"
        let rec sign (sr: SourceReader) : Sign option =
          let p = position sr
          match expectLiteral sr "-" with
          | Some v -> Some (Sign (Some v))
          | None -> Some (Sign None)
    "#}.trim_end()));
}

#[test]
fn wildcard_uses_explicit_any_regex() {
    let output = compile_bare("any = .");

    assert!(output.contains("type Any = Any of char\n"));
    assert!(output.contains(r#"expectMatch (Regex "[\\s\\S]") sr"#));
}

#[test]
fn synthesized_rules_follow_their_parent() {
    let output = compile_bare(indoc! {r#"
        items = entry ("," entry)*
        entry = [a-z]
    "#});

    // The anonymous repetition body became its own rule and parser.
    assert!(output.contains("and ItemsElement2 = ItemsElement2Expression list"));
    assert!(output.contains("and ItemsElement2Expression = ItemsElement2Expression of Entry"));
    assert!(output.contains("and items_element2 (sr: SourceReader) : ItemsElement2 option ="));
    assert!(output.contains("items_element2_expression sr"));
}

#[test]
fn first_rule_is_the_entry_point() {
    let output = compile_bare(indoc! {r#"
        second_place = [a-z]
        another = [0-9]
    "#});
    assert!(output.contains("\nlet root = second_place\n"));
}

#[test]
fn built_in_boilerplate_brackets_the_output() {
    let output = compile_ok("digit = [0-9]", &Config::default());

    assert!(output.starts_with("module Generated\n"));
    assert!(output.contains("type SourceReader"));
    assert!(output.contains("let expectLiteral"));
    assert!(output.contains("let expectMatch"));
    assert!(output.contains("[<EntryPoint>]"));
    assert!(output.ends_with("1\n"));
}

#[test]
fn keeping_literals_changes_the_tuple_shape() {
    let config = Config::new()
        .discard_literals(false)
        .preamble("//")
        .postamble("//");
    let output = compile_ok(
        indoc! {r#"
            pair = a:digit "," b:digit
            digit = [0-9]
        "#},
        &config,
    );

    assert!(output.contains("type Pair = Pair of a: Digit * MatchedLiteral * b: Digit\n"));
    assert!(output.contains("Some (Pair.Pair (Option.get var0, Option.get var1, Option.get var2))"));
}
