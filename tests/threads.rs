mod common;

use redsift::{Resolution, ThreadIndex};

#[test]
fn top_level_comment_resolves_in_one_hop() {
    let mut index = ThreadIndex::new();
    index.insert_submission("t3_s1");
    assert_eq!(index.resolve("t3_s1").unwrap(), Resolution::Submission("t3_s1".to_string()));
}

#[test]
fn nested_replies_walk_up_to_the_submission() {
    let mut index = ThreadIndex::new();
    index.insert_submission("t3_s1");
    index.insert_comment("t1_c1", "t3_s1");
    index.insert_comment("t1_c2", "t1_c1");
    index.insert_comment("t1_c3", "t1_c2");

    assert_eq!(index.resolve("t1_c3").unwrap(), Resolution::Submission("t3_s1".to_string()));
    assert_eq!(index.resolve("t1_c1").unwrap(), Resolution::Submission("t3_s1".to_string()));
}

#[test]
fn walk_outside_the_retained_set_is_unresolved() {
    let mut index = ThreadIndex::new();
    index.insert_comment("t1_c1", "t1_orphan");
    assert_eq!(index.resolve("t1_c1").unwrap(), Resolution::Unresolved);
    assert_eq!(index.resolve("t1_never_seen").unwrap(), Resolution::Unresolved);
}

#[test]
fn contains_gates_on_retained_submissions_and_comments() {
    let mut index = ThreadIndex::new();
    index.insert_submission("t3_s1");
    index.insert_comment("t1_c1", "t3_s1");

    assert!(index.contains("t3_s1"));
    assert!(index.contains("t1_c1"));
    assert!(!index.contains("t3_s2"));
    assert!(!index.contains("t1_c2"));
    // Unknown prefixes (e.g. t4_ messages) never count as retained.
    assert!(!index.contains("t4_x"));
}

#[test]
fn parent_cycle_is_reported_not_looped() {
    let mut index = ThreadIndex::new();
    index.insert_comment("t1_a", "t1_b");
    index.insert_comment("t1_b", "t1_a");

    let err = index.resolve("t1_a").unwrap_err();
    assert_eq!(err.start, "t1_a");
    assert_eq!(err.depth, 2);
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn self_parent_is_a_cycle() {
    let mut index = ThreadIndex::new();
    index.insert_comment("t1_a", "t1_a");
    let err = index.resolve("t1_a").unwrap_err();
    assert_eq!(err.depth, 1);
}

#[test]
fn arbitrarily_deep_chains_resolve() {
    let mut index = ThreadIndex::new();
    index.insert_submission("t3_root");
    index.insert_comment("t1_0", "t3_root");
    for i in 1..5000 {
        index.insert_comment(&format!("t1_{i}"), &format!("t1_{}", i - 1));
    }
    assert_eq!(
        index.resolve("t1_4999").unwrap(),
        Resolution::Submission("t3_root".to_string())
    );
}

#[test]
fn submission_id_is_terminal_even_when_not_retained() {
    let mut index = ThreadIndex::new();
    index.insert_comment("t1_c1", "t3_unretained");
    assert_eq!(
        index.resolve("t1_c1").unwrap(),
        Resolution::Submission("t3_unretained".to_string())
    );
}
