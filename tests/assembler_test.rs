//! End-to-end tests for deck assembly.

use deckwright::config::ConfigBinding;
use deckwright::layout::Primitive;
use deckwright::model::{Alignment, BlockKind, RowShade, TABLE_HEADER_FILL, TABLE_HEADER_INK};
use deckwright::render::{JsonSink, MemorySink, TextSink};
use deckwright::{
    AssembleOptions, ConfigTree, DeckSpec, DocumentAssembler, Error, JsonFormat, TableModel,
};
use serde_json::json;

fn tracker_config() -> ConfigTree {
    ConfigTree::new(json!({
        "association": {"method": "GNN"},
        "tracker": {"maxTracks": 64, "confirmHits": 3}
    }))
}

fn tracker_deck() -> DeckSpec {
    DeckSpec::from_json_str(
        r#"{
            "metadata": {"title": "Counter-UAS Radar Tracker", "author": "radar team"},
            "pages": [
                {"title": "Counter-UAS Radar Tracker", "blocks": [
                    {"type": "subtitle", "text": "Technical Design Document"},
                    {"type": "subtitle", "text": "Repo: cuas_tracker", "role": "small",
                     "anchor": {"x": null, "y": 147.6}}
                ]},
                {"title": "Association", "blocks": [
                    {"type": "bullets", "items": [
                        "Method: {{association.method|?}}",
                        {"text": "Cost threshold: {{association.gnn.costThreshold}}", "level": 1}
                    ]}
                ]},
                {"title": "Tracker Parameters", "blocks": [
                    {"type": "table", "headers": ["Parameter", "Value"], "rows": [
                        ["maxTracks", "{{tracker.maxTracks}}"],
                        ["confirmHits", "{{tracker.confirmHits}}"],
                        ["deleteMisses", "{{tracker.deleteMisses|?}}"]
                    ], "column_widths": [300, 200]}
                ]},
                {"title": "Build", "blocks": [
                    {"type": "code", "kind": "console", "code": "cmake -B build\ncmake --build build"}
                ]}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn test_scenario_a_resolves_present_path() {
    let tree = tracker_config();
    let binding = ConfigBinding::new("association.method", "?");
    assert_eq!(binding.resolve(&tree), &json!("GNN"));
}

#[test]
fn test_scenario_b_missing_path_falls_back() {
    let tree = tracker_config();
    let binding = ConfigBinding::new("association.gnn.costThreshold", "n/a");
    assert_eq!(binding.resolve(&tree), &json!("n/a"));
}

#[test]
fn test_scenario_c_ragged_table() {
    let result = TableModel::new(["A", "B"], vec![vec!["1", "2"], vec!["3", "4", "5"]]);
    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_scenario_d_title_and_table() {
    let deck = DeckSpec::from_json_str(
        r#"{"pages": [{"title": "Executables", "blocks": [
            {"type": "table", "headers": ["Target", "Type"], "rows": [["cuas_tracker", "Executable"]]}
        ]}]}"#,
    )
    .unwrap();
    let (doc, _) = DocumentAssembler::from_deck(&deck)
        .layout(&deck, &ConfigTree::empty())
        .unwrap();

    let page = doc.get_page(1).unwrap();
    assert_eq!(page.block_count(), 2);
    let title = &page.elements[0].geometry;
    let table = &page.elements[1].geometry;
    assert!(title.y < table.y);
    assert!(!title.overlaps(table));
    assert!((table.width - (960.0 - 2.0 * 43.2)).abs() < 1e-3);
}

#[test]
fn test_tracker_deck_layout() {
    let deck = tracker_deck();
    let assembler = DocumentAssembler::from_deck(&deck);
    let (doc, stats) = assembler.layout(&deck, &tracker_config()).unwrap();

    assert_eq!(doc.page_count(), 4);
    assert_eq!(stats.page_count, 4);
    assert_eq!(stats.table_count, 1);
    assert_eq!(stats.code_block_count, 1);
    assert_eq!(stats.bindings_resolved, 3);
    assert_eq!(stats.fallbacks_used, 2);

    // pages keep declaration order
    let titles: Vec<String> = doc
        .pages
        .iter()
        .map(|p| p.elements[0].primitive.plain_text().unwrap())
        .collect();
    assert_eq!(
        titles,
        ["Counter-UAS Radar Tracker", "Association", "Tracker Parameters", "Build"]
    );

    let text = doc.plain_text();
    assert!(text.contains("Method: GNN"));
    assert!(text.contains("Cost threshold: n/a"));
    assert!(text.contains("64"));
}

#[test]
fn test_table_styling_rules() {
    let deck = tracker_deck();
    let (doc, _) = DocumentAssembler::from_deck(&deck)
        .layout(&deck, &tracker_config())
        .unwrap();

    let table = doc.pages[2].blocks_of(BlockKind::Table).next().unwrap();
    let styled = match &table.primitive {
        Primitive::Table(styled) => styled,
        other => panic!("expected table, got {:?}", other),
    };

    for cell in &styled.header {
        assert_eq!(cell.fill, TABLE_HEADER_FILL);
        assert_eq!(cell.style.color, TABLE_HEADER_INK);
        assert!(cell.style.bold);
    }
    let shades: Vec<Option<RowShade>> = styled.rows.iter().map(|row| row[0].shade).collect();
    assert_eq!(
        shades,
        [Some(RowShade::Alt), Some(RowShade::Plain), Some(RowShade::Alt)]
    );
    assert_eq!(styled.rows[2][1].text, "?");
    assert_eq!(styled.column_widths.as_deref(), Some(&[300.0, 200.0][..]));
}

#[test]
fn test_layout_is_deterministic() {
    let deck = tracker_deck();
    let config = tracker_config();
    let options = AssembleOptions::new().with_timestamp(chrono::Utc::now());
    let assembler = DocumentAssembler::from_deck(&deck).with_options(options);

    let (first, _) = assembler.layout(&deck, &config).unwrap();
    let (second, _) = assembler.layout(&deck, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_every_sink_sees_the_same_pages() {
    let deck = tracker_deck();
    let config = tracker_config();
    let assembler = DocumentAssembler::from_deck(&deck);

    let mut memory = MemorySink::new();
    let mut json = JsonSink::in_memory(JsonFormat::Compact);
    let mut text = TextSink::in_memory();
    assembler.assemble(&deck, &config, &mut memory).unwrap();
    assembler.assemble(&deck, &config, &mut json).unwrap();
    assembler.assemble(&deck, &config, &mut text).unwrap();

    let pages = memory.pages().len();
    let value: serde_json::Value = serde_json::from_str(json.output().unwrap()).unwrap();
    assert_eq!(value["pages"].as_array().unwrap().len(), pages);
    assert_eq!(text.output().unwrap().matches("== Page").count(), pages);
}

#[test]
fn test_failed_build_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("deck.json");
    let deck = DeckSpec::from_json_str(
        r#"{"pages": [
            {"title": "Ok"},
            {"title": "Broken", "blocks": [
                {"type": "diagram", "image": "missing.png", "width": 100, "height": 50}
            ]}
        ]}"#,
    )
    .unwrap();

    let assembler = DocumentAssembler::from_deck(&deck)
        .with_options(AssembleOptions::new().with_base_dir(dir.path()));
    let mut sink = JsonSink::new(&output, JsonFormat::Pretty);
    let err = assembler
        .assemble(&deck, &ConfigTree::empty(), &mut sink)
        .unwrap_err();

    assert!(matches!(err, Error::RendererFailure(_)));
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_off_canvas_theme_rejected() {
    let deck = DeckSpec::from_json_str(
        r#"{"theme": {"margin": -100}, "pages": [{"title": "Overview", "blocks": [
            {"type": "bullets", "items": ["one", "two"]}
        ]}]}"#,
    )
    .unwrap();
    let mut sink = MemorySink::new();
    let err = DocumentAssembler::from_deck(&deck)
        .assemble(&deck, &ConfigTree::empty(), &mut sink)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidDeck(_)));
    assert!(!sink.is_finished());
}

#[test]
fn test_negative_column_width_rejected() {
    let deck = DeckSpec::from_json_str(
        r#"{"pages": [{"title": "Widths", "blocks": [
            {"type": "table", "headers": ["A", "B"], "rows": [["1", "2"]],
             "column_widths": [-500, 2000]}
        ]}]}"#,
    )
    .unwrap();
    let err = DocumentAssembler::from_deck(&deck)
        .layout(&deck, &ConfigTree::empty())
        .unwrap_err();
    assert!(matches!(err, Error::ColumnWidth { column: 0, .. }));
}

#[test]
fn test_centered_cover_page() {
    let deck = DeckSpec::from_json_str(
        r##"{"pages": [{"blocks": [
            {"type": "title", "text": "Counter-UAS Radar Tracker", "alignment": "center",
             "color": "#1B3A6B", "anchor": {"y": 140}},
            {"type": "subtitle", "text": "System Architecture", "alignment": "center",
             "color": "#1A6B3C", "anchor": {"y": 200}},
            {"type": "subtitle", "text": "Version {{system.version|1.0.0}}", "role": "small",
             "alignment": "center", "anchor": {"y": 250}},
            {"type": "subtitle", "text": "Tracker project", "role": "small",
             "alignment": "center", "italic": true, "anchor": {"y": 380}}
        ]}]}"##,
    )
    .unwrap();
    let (doc, stats) = DocumentAssembler::from_deck(&deck)
        .layout(&deck, &ConfigTree::empty())
        .unwrap();
    assert_eq!(stats.fallbacks_used, 1);

    let styles: Vec<_> = doc.pages[0]
        .elements
        .iter()
        .map(|block| match &block.primitive {
            Primitive::Text {
                paragraphs,
                alignment,
                ..
            } => (*alignment, paragraphs[0].style.clone()),
            other => panic!("expected text, got {:?}", other),
        })
        .collect();

    assert!(styles.iter().all(|(a, _)| *a == Alignment::Center));
    assert_eq!(styles[0].1.color.to_hex(), "#1B3A6B");
    assert_eq!(styles[1].1.color.to_hex(), "#1A6B3C");
    assert!(!styles[2].1.italic);
    assert!(styles[3].1.italic);
    assert_eq!(
        doc.pages[0].elements[2].primitive.plain_text().as_deref(),
        Some("Version 1.0.0")
    );
}
