//! End-to-end abbreviation expansion over JSON-defined trees.

use cmdlens::cli::run_expand;
use cmdlens::definition::CommandDef;
use cmdlens::ResolveError;

fn shop_tree() -> CommandDef {
    CommandDef::from_json(
        r#"{
            "name": "shop",
            "children": [
                {
                    "name": "child",
                    "aliases": ["c"],
                    "children": [
                        {"name": "grandchild", "aliases": ["gc"]}
                    ]
                },
                {
                    "name": "order",
                    "aliases": ["ord"],
                    "children": [{"name": "list"}, {"name": "cancel"}]
                }
            ]
        }"#,
    )
    .unwrap()
}

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|t| t.to_string()).collect()
}

#[test]
fn aliases_and_prefixes_expand_to_canonical_paths() {
    let response = run_expand(&shop_tree(), &tokens(&["c", "gc"])).unwrap();
    assert_eq!(response.tokens, vec!["child", "grandchild"]);

    let response = run_expand(&shop_tree(), &tokens(&["ord", "li"])).unwrap();
    assert_eq!(response.tokens, vec!["order", "list"]);
}

#[test]
fn colon_joined_input_expands_like_separate_tokens() {
    let response = run_expand(&shop_tree(), &tokens(&["c:gc", "arg"])).unwrap();
    assert_eq!(response.tokens, vec!["child", "grandchild", "arg"]);

    let response = run_expand(&shop_tree(), &tokens(&["chi:gran"])).unwrap();
    assert_eq!(response.tokens, vec!["child", "grandchild"]);
}

#[test]
fn arguments_after_a_leaf_are_untouched() {
    let response = run_expand(&shop_tree(), &tokens(&["ord", "can", "123", "--force"])).unwrap();
    assert_eq!(response.tokens, vec!["order", "cancel", "123", "--force"]);
}

#[test]
fn ambiguous_prefix_is_a_structured_error() {
    let mut tree = shop_tree();
    tree.children.push(CommandDef {
        name: "chipmunk".to_string(),
        aliases: vec![],
        children: vec![CommandDef {
            name: "dig".to_string(),
            aliases: vec![],
            children: vec![],
        }],
    });

    let err = run_expand(&tree, &tokens(&["chi"])).unwrap_err();
    let resolve_err = match err {
        cmdlens::cli::CliError::Resolve(inner) => inner,
        other => panic!("expected a resolve error, got {other:?}"),
    };
    match resolve_err {
        ResolveError::AmbiguousToken {
            token,
            context,
            candidates,
        } => {
            assert_eq!(token, "chi");
            assert_eq!(context, "root");
            assert_eq!(candidates, vec!["child", "chipmunk"]);
        }
        other => panic!("expected AmbiguousToken, got {other:?}"),
    }
}

#[test]
fn unknown_tokens_pass_through_and_keep_the_context() {
    let response = run_expand(&shop_tree(), &tokens(&["mystery"])).unwrap();
    assert_eq!(response.tokens, vec!["mystery"]);

    // The cursor stays at the root, so a later token still resolves.
    let response = run_expand(&shop_tree(), &tokens(&["mystery", "ord"])).unwrap();
    assert_eq!(response.tokens, vec!["mystery", "order"]);
}

#[test]
fn flags_are_copied_through_anywhere_in_the_stream() {
    let response = run_expand(&shop_tree(), &tokens(&["--dry-run", "c", "--v", "gc"])).unwrap();
    assert_eq!(response.tokens, vec!["--dry-run", "child", "--v", "grandchild"]);
}
