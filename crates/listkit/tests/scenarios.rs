//! End-to-end list scenarios: registration, nesting, failure and loading from files.

use listkit::{
    parse_outline, render_list, Block, Catalog, ConfigError, Construct, CounterStore, ItemNode,
    KindRegistry, Layout, LevelResolver, ListConfig, ListError, ListItem, ListKind, ListNode,
    ListRef, Numbering, OutputMode, RenderContext, RenderedList, Spacing, TextRenderer, Theme,
    Transform,
};

fn nested_list(list: &RenderedList, item: usize) -> &RenderedList {
    list.items[item]
        .body
        .iter()
        .find_map(|block| match block {
            Block::List(inner) => Some(inner),
            Block::Text(_) => None,
        })
        .expect("item has a nested list")
}

#[test]
fn test_bullet_kind_marks_every_item() {
    let mut registry = KindRegistry::new();
    registry
        .register_list_kind("bullet", Layout::aligned(), Transform::literal("•"))
        .unwrap();
    let kind = registry.resolve("bullet").unwrap();
    let mut counters = CounterStore::new();
    counters.declare(kind.counter()).unwrap();

    let items = vec![ListItem::text("a"), ListItem::text("b"), ListItem::text("c")];
    let list = render_list(kind, &mut counters, items, Spacing::default(), None).unwrap();

    assert_eq!(list.len(), 3);
    assert!(list.markers().iter().all(|marker| *marker == "•"));
    assert_eq!(counters.current("bullet").unwrap(), 3);
}

#[test]
fn test_enumerate_at_depth_two_uses_letters() {
    let registry = KindRegistry::standard();
    let mut levels = LevelResolver::default();
    levels.enter(Construct::Enumerate);
    let name = levels.enter(Construct::Enumerate);
    assert_eq!(name, "enumerate-2");

    let kind = registry.resolve(&name).unwrap();
    let mut counters = CounterStore::new();
    counters.declare(kind.counter()).unwrap();
    let items = vec![ListItem::text("x"), ListItem::text("y"), ListItem::text("z")];
    let list = render_list(kind, &mut counters, items, Spacing::default(), None).unwrap();

    assert_eq!(list.markers(), vec!["a.", "b.", "c."]);
    assert_eq!(counters.current("enumerate-2").unwrap(), 3);
}

#[test]
fn test_roman_overflow_aborts_whole_list() {
    let kind = ListKind::new("big", Layout::aligned(), Transform::RomanUpper);
    let mut counters = CounterStore::new();
    counters.declare("big").unwrap();
    counters.set("big", 3997).unwrap();

    let items = (0..5).map(|i| ListItem::text(i.to_string())).collect();
    let err = render_list(&kind, &mut counters, items, Spacing::default(), None).unwrap_err();

    assert!(matches!(err, ListError::TransformRange { ordinal: 4000, .. }));
    assert_eq!(counters.current("big").unwrap(), 3997);
}

#[test]
fn test_explicit_item_then_automatic_keeps_count() {
    let mut ctx = RenderContext::standard().unwrap();
    let node = ListNode::new(
        ListRef::construct(Construct::Enumerate),
        vec![
            ItemNode::text("one"),
            ItemNode::text("two"),
            ItemNode::labeled("★", vec![]),
            ItemNode::text("three"),
        ],
    );
    let list = ctx.render(&node).unwrap();
    assert_eq!(list.markers(), vec!["1.", "2.", "★.", "3."]);
}

#[test]
fn test_itemize_depth_cycles_through_three_kinds() {
    let yaml = r#"
- list: itemize
  items:
    - body:
        - one
        - list: itemize
          items:
            - body:
                - two
                - list: itemize
                  items:
                    - body:
                        - three
                        - list: itemize
                          items: [four]
"#;
    let outline = parse_outline(yaml).unwrap();
    let mut ctx = RenderContext::standard().unwrap();
    let blocks = ctx.render_document(&outline).unwrap();

    let Block::List(first) = &blocks[0] else {
        panic!("expected a list");
    };
    let second = nested_list(first, 0);
    let third = nested_list(second, 0);
    let fourth = nested_list(third, 0);
    assert_eq!(
        [&first.kind, &second.kind, &third.kind, &fourth.kind],
        ["itemize-1", "itemize-2", "itemize-3", "itemize-1"]
    );
    assert_eq!(fourth.markers(), vec!["•"]);
}

#[test]
fn test_continued_lists_chain_tokens() {
    let yaml = r#"
- list: enumerate
  items:
    - first
    - body:
        - second
        - list: enumerate*
          items:
            - body:
                - nested
                - list: enumerate*
                  items: [deep]
"#;
    let outline = parse_outline(yaml).unwrap();
    let mut ctx = RenderContext::standard().unwrap();
    let blocks = ctx.render_document(&outline).unwrap();

    let Block::List(top) = &blocks[0] else {
        panic!("expected a list");
    };
    let middle = nested_list(top, 1);
    assert_eq!(middle.markers(), vec!["2.a."]);
    assert_eq!(nested_list(middle, 0).markers(), vec!["2.a.i."]);
}

#[test]
fn test_separate_contexts_do_not_share_counters() {
    let node = ListNode::new(
        ListRef::kind("enumerate-numeric"),
        vec![ItemNode::text("a"), ItemNode::text("b")],
    );
    let config = ListConfig {
        numbering: Numbering::Continuous,
        ..ListConfig::default()
    };
    let mut first = RenderContext::new(KindRegistry::standard(), config.clone()).unwrap();
    let mut second = RenderContext::new(KindRegistry::standard(), config).unwrap();

    first.render(&node).unwrap();
    first.render(&node).unwrap();
    let list = second.render(&node).unwrap();

    assert_eq!(list.markers(), vec!["1.", "2."]);
    assert_eq!(first.counters().current("enumerate-numeric").unwrap(), 4);
}

#[test]
fn test_render_outline_as_text() {
    let yaml = r#"
- Groceries
- list: itemize
  items:
    - Fruit
    - body:
        - Vegetables
        - list: enumerate
          items: [Carrots, Leeks]
- list: description
  items:
    - marker: Note
      body: [Bring bags]
"#;
    let outline = parse_outline(yaml).unwrap();
    let mut ctx = RenderContext::standard().unwrap();
    let blocks = ctx.render_document(&outline).unwrap();

    let text = TextRenderer::default()
        .with_mode(OutputMode::Text)
        .render_blocks(&blocks);
    let expected = [
        "Groceries",
        " • Fruit",
        " • Vegetables",
        "   1. Carrots",
        "   2. Leeks",
        " Note. Bring bags",
    ];
    assert_eq!(text, expected.join("\n"));
}

#[test]
fn test_files_configure_a_render() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("lists.yaml");
    let catalog_path = dir.path().join("kinds.yaml");
    let theme_path = dir.path().join("theme.yaml");
    std::fs::write(&config_path, "item_hsep: 5\nnumbering: continuous\n").unwrap();
    std::fs::write(
        &catalog_path,
        "kinds:\n  steps:\n    layout: aligned-strong-dot\n    transform: Roman\n",
    )
    .unwrap();
    std::fs::write(&theme_path, "item-strong: \"bold red\"\n").unwrap();

    let config = ListConfig::from_file(&config_path).unwrap();
    let catalog = Catalog::from_file(&catalog_path).unwrap();
    let theme = Theme::from_file(&theme_path).unwrap();

    let mut ctx = RenderContext::new(KindRegistry::standard(), config).unwrap();
    ctx.register_catalog(&catalog).unwrap();
    let node = ListNode::new(ListRef::kind("steps"), vec![ItemNode::text("Plan")]);
    let list = ctx.render(&node).unwrap();
    assert_eq!(list.indent, 5);
    assert_eq!(ctx.the_item("steps").unwrap(), "I");

    let text = TextRenderer::new(theme)
        .with_mode(OutputMode::TermDebug)
        .render_list(&list);
    assert_eq!(text, "  [item-strong]I.[/item-strong] Plan");
}

#[test]
fn test_catalog_clash_is_reported() {
    let catalog = Catalog::from_yaml("kinds:\n  description:\n    literal: '-'\n").unwrap();
    let mut ctx = RenderContext::standard().unwrap();
    let err = ctx.register_catalog(&catalog).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Registration(ListError::DuplicateListKind(ref name)) if name == "description"
    ));
}

#[test]
fn test_custom_transform() {
    let squares = Transform::custom("squares", |n| Ok((n * n).to_string()));
    let mut ctx = RenderContext::standard().unwrap();
    ctx.register_list_kind("squares", Layout::builtin("aligned-bracket").unwrap(), squares)
        .unwrap();
    let node = ListNode::new(
        ListRef::kind("squares"),
        (0..3).map(|i| ItemNode::text(i.to_string())).collect(),
    );
    assert_eq!(ctx.render(&node).unwrap().markers(), vec!["1)", "4)", "9)"]);
}

#[test]
fn test_deep_itemize_beyond_registered_levels() {
    let yaml = r#"
- list: itemize
  items:
    - body:
        - list: itemize
          items:
            - body:
                - list: itemize
                  items:
                    - body:
                        - list: itemize
                          items:
                            - body:
                                - list: itemize
                                  items: [five]
"#;
    let outline = parse_outline(yaml).unwrap();
    let config = ListConfig::from_yaml("itemize_levels: 5").unwrap();
    let mut ctx = RenderContext::new(KindRegistry::standard(), config).unwrap();
    let blocks = ctx.render_document(&outline).unwrap();

    let Block::List(first) = &blocks[0] else {
        panic!("expected a list");
    };
    let mut list = first;
    for _ in 0..4 {
        list = nested_list(list, 0);
    }
    assert_eq!(list.kind, "itemize-1");
    assert_eq!(ctx.counters().current("itemize-1").unwrap(), 2);
}
