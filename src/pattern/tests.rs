use proptest::prelude::*;

use super::*;
use crate::error::PatternError;

fn lit_sub_keys(node: &PatternNode) -> Vec<String> {
    match node {
        PatternNode::Literal(lit) => lit.sub_keys().map(str::to_string).collect(),
        other => panic!("expected Literal, got {other:?}"),
    }
}

/// Walk `input` against `spec` the way the tree walker would, then render
/// `output` against the resulting path.
fn shift(spec: &[&str], input: &[&str], output: &str) -> Result<Option<String>, PatternError> {
    let levels = compile_levels(spec)?;
    let Some(ctx) = match_path(&levels, input)? else {
        return Ok(None);
    };
    let rendered = render_path(&compile_dotted(output)?, &ctx)?;
    Ok(Some(rendered.join(".")))
}

#[test]
fn rating_keys_move_under_their_captures() {
    assert_eq!(
        shift(
            &["rating-*-*", "value"],
            &["rating-5-campaign", "value"],
            "&1(2).score&1(1)"
        )
        .unwrap(),
        Some("campaign.score5".to_string())
    );
}

#[test]
fn reference_inside_input_path() {
    assert_eq!(
        shift(&["tag-*", "&(1)-value"], &["tag-primary", "primary-value"], "tags.&1(1)").unwrap(),
        Some("tags.primary".to_string())
    );
}

#[test]
fn reference_inside_input_path_rejects_other_keys() {
    assert_eq!(
        shift(&["tag-*", "&(1)-value"], &["tag-primary", "other-value"], "x").unwrap(),
        None
    );
}

#[test]
fn photo_index_becomes_array_slot() {
    assert_eq!(
        shift(&["photo-*", "url"], &["photo-2", "url"], "photos[&1(1)].href").unwrap(),
        Some("photos[2].href".to_string())
    );
}

#[test]
fn marker_level_anchors_without_binding() {
    assert_eq!(
        shift(&["@", "name"], &["anything", "name"], "out.&").unwrap(),
        Some("out.name".to_string())
    );
}

#[test]
fn output_reaching_past_the_root_fails() {
    assert_eq!(
        shift(&["a"], &["a"], "&4").unwrap_err(),
        PatternError::AncestorOutOfRange {
            distance: 4,
            depth: 1
        }
    );
}

#[test]
fn bad_output_key_fails_before_matching() {
    assert!(matches!(
        shift(&["a"], &["a"], "out.*"),
        Err(PatternError::RejectedOutputSyntax(_))
    ));
}

#[test]
fn pushed_and_popped_levels_track_recursion() {
    let parent = compile("section-*").unwrap();
    let child = compile("&(1)-item").unwrap();
    let mut ctx = AncestorContext::new();

    for (section, item) in [("section-a", "a-item"), ("section-b", "b-item")] {
        ctx.push(match_key(&parent, section, &ctx).unwrap().unwrap());
        assert!(match_key(&child, item, &ctx).unwrap().is_some());
        assert!(match_key(&child, "z-item", &ctx).unwrap().is_none());
        ctx.pop();
    }
    assert!(ctx.is_empty());
}

proptest! {
    #[test]
    fn literal_matches_only_its_own_key(key in "[a-z0-9_-]{1,12}", other in "[a-z0-9_-]{1,12}") {
        let node = compile(&key).unwrap();
        let ctx = AncestorContext::new();
        prop_assert!(match_key(&node, &key, &ctx).unwrap().is_some());
        if other != key {
            prop_assert!(match_key(&node, &other, &ctx).unwrap().is_none());
        }
    }

    #[test]
    fn wildcard_yields_one_sub_key_per_star(
        segments in prop::collection::vec("[a-z]{1,4}", 2..6),
        fills in prop::collection::vec("[0-9]{0,3}", 5),
    ) {
        let stars = segments.len() - 1;
        let spec = segments.join("*");
        let mut real_key = segments[0].clone();
        for (segment, fill) in segments[1..].iter().zip(&fills) {
            real_key.push_str(fill);
            real_key.push_str(segment);
        }

        let matched = match_key(&compile(&spec).unwrap(), &real_key, &AncestorContext::new())
            .unwrap()
            .expect("wildcard should match its own expansion");
        let sub_keys = lit_sub_keys(&matched);

        prop_assert_eq!(sub_keys.len(), stars + 1);
        prop_assert_eq!(&sub_keys[0], &real_key);
        prop_assert_eq!(&sub_keys[1..], &fills[..stars]);
    }
}
