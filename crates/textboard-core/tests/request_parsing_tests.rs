use proptest::prelude::*;
use textboard_core::CommandRequest;

#[test]
fn test_router_style_paths() {
    let rq = CommandRequest::parse("/usr/article/modify?id=3&title=New&body=Text");

    assert!(rq.path().ends_with("article/modify"));
    assert_eq!(rq.required_i64("id"), Ok(3));
    assert_eq!(rq.parameter("title"), Some("New"));
    assert_eq!(rq.raw(), "/usr/article/modify?id=3&title=New&body=Text");
}

#[test]
fn test_no_percent_decoding() {
    let rq = CommandRequest::parse("article/add?title=a%20b&body=c+d");
    assert_eq!(rq.parameter("title"), Some("a%20b"));
    assert_eq!(rq.parameter("body"), Some("c+d"));
}

#[test]
fn test_empty_pieces_are_skipped() {
    let rq = CommandRequest::parse("x?&&a=1&");
    let params: Vec<_> = rq.parameters().collect();
    assert_eq!(params, vec![("a", "1")]);
}

#[test]
fn test_parameters_are_sorted_by_key() {
    let rq = CommandRequest::parse("x?b=2&a=1&c=3");
    let keys: Vec<&str> = rq.parameters().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

proptest! {
    #[test]
    fn prop_input_without_question_mark_is_all_path(path in "[a-zA-Z/=&]{0,24}") {
        let rq = CommandRequest::parse(path.clone());
        prop_assert_eq!(rq.path(), path.as_str());
        prop_assert_eq!(rq.parameters().count(), 0);
    }

    #[test]
    fn prop_last_value_wins(
        key in "[a-z]{1,8}",
        values in prop::collection::vec("[a-z0-9]{0,8}", 1..6),
    ) {
        let query: Vec<String> = values.iter().map(|v| format!("{}={}", key, v)).collect();
        let rq = CommandRequest::parse(format!("cmd?{}", query.join("&")));
        prop_assert_eq!(rq.parameter(&key), values.last().map(String::as_str));
        prop_assert_eq!(rq.parameters().count(), 1);
    }
}
