use std::path::PathBuf;

use picky_lib::{extract_page, Parser, SourceFormat};
use rstest::rstest;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn page() -> String {
    std::fs::read_to_string(fixture("columns.html")).unwrap()
}

fn harvest(rules: &str, path: &[&str]) -> Vec<String> {
    let instruction = Parser::for_str(rules, SourceFormat::Yaml).parse().unwrap();
    let snapshot = extract_page(&instruction, &page());
    snapshot
        .get(path)
        .unwrap_or_else(|| panic!("no result for {:?}", path))
        .elements()
        .iter()
        .map(|e| e.text.clone())
        .collect()
}

const TD: &[&str] = &["body", "div", "td"];

#[rstest]
#[case::yaml("columns.yml")]
#[case::json("columns.json")]
fn catch_all_through_two_unlimited_levels(#[case] file: &str) {
    let instruction = Parser::for_file(fixture(file)).parse().unwrap();
    let snapshot = extract_page(&instruction, &page());
    let texts: Vec<&str> = snapshot
        .get(&["body", "div", "table", "td"])
        .unwrap()
        .elements()
        .iter()
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(texts, vec!["a1", "a2", "a3", "a4", "b1", "b2"]);
}

#[test]
fn yaml_and_json_fixtures_agree() {
    let yaml = Parser::for_file(fixture("columns.yml")).parse().unwrap();
    let json = Parser::for_file(fixture("columns.json")).parse().unwrap();
    assert_eq!(yaml, json);
}

#[rstest]
#[case::leaf("body: [{div: [{td: [{max-items: 0}, {do: catch}]}]}]", "body: [{div: [{td: [{do: catch}]}]}]")]
#[case::interior("body: [{div: [{max-items: 0}, {td: [{do: catch}]}]}]", "body: [{div: [{td: [{do: catch}]}]}]")]
fn zero_cap_equals_no_cap(#[case] zero: &str, #[case] absent: &str) {
    assert_eq!(harvest(zero, TD).len(), harvest(absent, TD).len());
    assert_eq!(harvest(zero, TD).len(), 6);
}

#[test]
fn leaf_cap_of_one() {
    let rules = "body: [{div: [{id: col-A}, {td: [{max-items: 1}, {do: catch}]}]}]";
    assert_eq!(harvest(rules, TD), vec!["a1"]);
}

#[test]
fn leaf_cap_larger_than_supply() {
    let rules = "body: [{div: [{id: col-B}, {td: [{max-items: 4}, {do: catch}]}]}]";
    assert_eq!(harvest(rules, TD), vec!["b1", "b2"]);
}

#[test]
fn leaf_cap_after_do_is_ignored() {
    let after = "body: [{div: [{id: col-A}, {td: [{do: catch}, {max-items: 1}]}]}]";
    let omitted = "body: [{div: [{id: col-A}, {td: [{do: catch}]}]}]";
    assert_eq!(harvest(after, TD), harvest(omitted, TD));
    assert_eq!(harvest(after, TD).len(), 4);
}

#[test]
fn entries_after_nested_level_have_no_effect() {
    let before = "body: [{div: [{max-items: 1}, {td: [{do: catch}]}]}]";
    let after = "body: [{div: [{td: [{do: catch}]}, {max-items: 1}]}]";
    assert_eq!(harvest(before, TD), vec!["a1", "a2", "a3", "a4"]);
    assert_eq!(harvest(after, TD).len(), 6);

    let filtered_after = "body: [{div: [{td: [{do: catch}]}, {id: col-B}]}]";
    assert_eq!(harvest(filtered_after, TD).len(), 6);
}

#[test]
fn class_filter_matches_one_of_several_classes() {
    let rules = "body: [{div: [{class: last}, {td: [{do: catch}]}]}]";
    assert_eq!(harvest(rules, TD), vec!["b1", "b2"]);
}

#[rstest]
#[case::missing_root("article: [{div: [{td: [{do: catch}]}]}]", &["article", "div", "td"])]
#[case::attribute_mismatch("body: [{div: [{id: col-Z}, {td: [{do: catch}]}]}]", &["body", "div", "td"])]
#[case::missing_intermediate("body: [{ul: [{td: [{do: catch}]}]}]", &["body", "ul", "td"])]
#[case::missing_leaf("body: [{div: [{span: [{do: catch}]}]}]", &["body", "div", "span"])]
#[case::leaf_filter_mismatch("body: [{div: [{td: [{id: nope}, {do: catch}]}]}]", &["body", "div", "td"])]
fn absent_elements_yield_empty_results(#[case] rules: &str, #[case] path: &[&str]) {
    assert!(harvest(rules, path).is_empty());
}

#[test]
fn sibling_leaves_are_reported_separately() {
    let rules = r#"
body:
  - div:
    - id: col-B
    - td:
      - do: catch
    - span:
      - do: catch
"#;
    let instruction = Parser::for_str(rules, SourceFormat::Yaml).parse().unwrap();
    let snapshot = extract_page(&instruction, &page());
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.get(&["body", "div", "td"]).unwrap().len(), 2);
    assert!(snapshot.get(&["body", "div", "span"]).unwrap().is_empty());
}

#[test]
fn harvested_elements_carry_attributes_and_markup() {
    let rules = "div: [{id: col-A}, {do: catch}]";
    let instruction = Parser::for_str(rules, SourceFormat::Yaml).parse().unwrap();
    let snapshot = extract_page(&instruction, &page());
    let div = &snapshot.get(&["div"]).unwrap().elements()[0];
    assert_eq!(div.tag, "div");
    assert_eq!(div.attrs.get("class").map(String::as_str), Some("column"));
    assert!(div.html.starts_with("<div"));
    assert!(div.text.contains("a3"));
}

#[test]
fn nested_same_tag_parents_report_each_element_once() {
    let rules = "body: [{div: [{span: [{do: catch}]}]}]";
    let page = "<body><div><div><span>a</span></div><span>b</span></div><div><span>c</span></div></body>";
    let instruction = Parser::for_str(rules, SourceFormat::Yaml).parse().unwrap();
    let snapshot = extract_page(&instruction, page);
    let texts: Vec<&str> = snapshot
        .get(&["body", "div", "span"])
        .unwrap()
        .elements()
        .iter()
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}
