use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bridger_core::{BridgerError, Settings, TextTransformer, ViewMode};
use bridger_markup::{RenderNode, WordSegment};
use bridger_planner::providers::MockProvider;
use bridger_planner::{OverlapGate, Simplifier, SimplifierOptions};
use bridger_view::notice::{CORS_BLOCKED, KEPT_ORIGINAL, PROCESSING, TRANSFORM_FAILED};
use bridger_view::{spawn_settings_listener, NoticeLevel, RecordState, Rendition, ViewController};
use tokio::sync::watch;

const INPUT: &str = "The board postponed the extraordinary meeting until further notice.";
const OUTPUT: &str = "The board delayed the extraordinary meeting.";

fn controller_with(provider: MockProvider, settings: Settings) -> ViewController {
    let simplifier = Simplifier::new(Arc::new(provider), SimplifierOptions::default());
    ViewController::new(Arc::new(simplifier), OverlapGate::default(), settings)
}

fn controller(response: &str) -> ViewController {
    controller_with(MockProvider::new("mock").with_response(response), Settings::default())
}

fn long_words(nodes: &[RenderNode], out: &mut Vec<Vec<WordSegment>>) {
    for node in nodes {
        match node {
            RenderNode::LongWord { segments, .. } => out.push(segments.clone()),
            RenderNode::Section { children, .. }
            | RenderNode::Chunk { children }
            | RenderNode::ColorSpan { children, .. } => long_words(children, out),
            _ => {}
        }
    }
}

fn transformed_nodes(rendition: Option<Rendition>) -> Vec<RenderNode> {
    match rendition {
        Some(Rendition::Transformed { nodes }) => nodes,
        other => panic!("expected a transformed rendition, got {other:?}"),
    }
}

#[tokio::test]
async fn accepted_output_is_parsed_and_rendered_once() {
    let controller = controller(OUTPUT);
    let id = controller.transform_selection(&format!("  {INPUT}\n")).await.unwrap();

    assert_eq!(controller.record_state(id).await, Some(RecordState::Transformed));
    assert_eq!(controller.transformed_text(id).await.as_deref(), Some(OUTPUT));
    assert_eq!(controller.parse_count().await, 1);
    assert_eq!(controller.render_count().await, 1);

    let nodes = transformed_nodes(controller.display(id).await);
    let text: String = nodes.iter().map(RenderNode::text_content).collect();
    assert_eq!(text, OUTPUT);

    let notices = controller.take_notices().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, PROCESSING);
    assert!(controller.take_notices().await.is_empty());
}

#[tokio::test]
async fn runaway_output_falls_back_to_original() {
    let controller = controller("[SECTION:Summary]\nThe cat sat on the mat.");
    let id = controller.transform_selection("The cat sat.").await.unwrap();

    assert_eq!(controller.record_state(id).await, Some(RecordState::Original));
    assert_eq!(
        controller.display(id).await,
        Some(Rendition::Original {
            text: "The cat sat.".into()
        })
    );
    assert_eq!(controller.parse_count().await, 0);

    let notices = controller.take_notices().await;
    assert_eq!(notices.last().unwrap().message, KEPT_ORIGINAL);
    assert_eq!(notices.last().unwrap().level, NoticeLevel::Info);

    // Nothing to switch to.
    assert_eq!(controller.toggle(id).await, Some(RecordState::Original));
}

#[tokio::test]
async fn toggling_twice_never_reparses() {
    let controller = controller(OUTPUT);
    let id = controller.transform_selection(INPUT).await.unwrap();
    let parses = controller.parse_count().await;
    let renders = controller.render_count().await;

    assert_eq!(controller.toggle(id).await, Some(RecordState::Original));
    assert!(matches!(controller.display(id).await, Some(Rendition::Original { .. })));
    assert_eq!(controller.toggle(id).await, Some(RecordState::Transformed));

    assert_eq!(controller.parse_count().await, parses);
    assert_eq!(controller.render_count().await, renders);
}

#[tokio::test]
async fn cors_failure_raises_cors_notice() {
    let controller = controller_with(
        MockProvider::new("mock").with_failure("Ollama error 403 Forbidden: "),
        Settings::default(),
    );
    let id = controller.transform_selection(INPUT).await.unwrap();

    assert_eq!(controller.record_state(id).await, Some(RecordState::Original));
    let notices = controller.take_notices().await;
    let last = notices.last().unwrap();
    assert_eq!(last.message, CORS_BLOCKED);
    assert!(last.is_error());
}

#[tokio::test(start_paused = true)]
async fn timeout_falls_back_with_failure_notice() {
    let controller = controller_with(
        MockProvider::new("slow")
            .with_response(OUTPUT)
            .with_delay(Duration::from_secs(30)),
        Settings::default(),
    );
    let id = controller.transform_selection(INPUT).await.unwrap();

    assert_eq!(controller.record_state(id).await, Some(RecordState::Original));
    assert_eq!(controller.take_notices().await.last().unwrap().message, TRANSFORM_FAILED);
}

#[tokio::test]
async fn disabled_or_blank_selection_is_ignored() {
    let disabled = controller_with(
        MockProvider::new("mock").with_response(OUTPUT),
        Settings {
            enabled: false,
            ..Default::default()
        },
    );
    assert!(disabled.transform_selection(INPUT).await.is_none());
    assert!(disabled.ids().await.is_empty());

    let controller = controller(OUTPUT);
    assert!(controller.transform_selection("  \n\t ").await.is_none());
    assert!(controller.ids().await.is_empty());
    assert!(controller.take_notices().await.is_empty());
}

#[tokio::test]
async fn settings_change_rerenders_every_record() {
    let controller = controller(OUTPUT);
    let first = controller.transform_selection(INPUT).await.unwrap();
    let second = controller.transform_selection(INPUT).await.unwrap();
    controller.toggle(second).await;
    let parses = controller.parse_count().await;

    let renders = controller
        .apply_settings(Settings {
            split_long_words: true,
            ..Default::default()
        })
        .await;
    assert_eq!(renders, 2);
    assert_eq!(controller.parse_count().await, parses);

    let mut words = Vec::new();
    long_words(&transformed_nodes(controller.display(first).await), &mut words);
    assert_eq!(
        words,
        vec![vec![
            WordSegment::Text("extraor".into()),
            WordSegment::Separator,
            WordSegment::Text("din".into()),
            WordSegment::Separator,
            WordSegment::Text("ary".into()),
        ]]
    );

    // The record shown as original picks up the new render when toggled back.
    let renders_before = controller.render_count().await;
    controller.toggle(second).await;
    assert_eq!(controller.render_count().await, renders_before);
    let mut words = Vec::new();
    long_words(&transformed_nodes(controller.display(second).await), &mut words);
    assert_eq!(words.len(), 1);
}

#[tokio::test]
async fn toggle_all_applies_to_existing_and_new_records() {
    let controller = controller(OUTPUT);
    let first = controller.transform_selection(INPUT).await.unwrap();

    assert_eq!(controller.toggle_all().await, ViewMode::Original);
    assert_eq!(controller.record_state(first).await, Some(RecordState::Original));

    let second = controller.transform_selection(INPUT).await.unwrap();
    assert_eq!(controller.record_state(second).await, Some(RecordState::Original));

    assert_eq!(controller.toggle_all().await, ViewMode::Transformed);
    assert_eq!(controller.record_state(first).await, Some(RecordState::Transformed));
    assert_eq!(controller.record_state(second).await, Some(RecordState::Transformed));
    assert_eq!(controller.parse_count().await, 2);
}

#[tokio::test]
async fn toggle_all_survives_unrelated_settings_change() {
    let controller = controller(OUTPUT);
    let id = controller.transform_selection(INPUT).await.unwrap();
    assert_eq!(controller.toggle_all().await, ViewMode::Original);

    let renders = controller
        .apply_settings(Settings {
            highlight_long_words: true,
            ..Default::default()
        })
        .await;
    assert_eq!(renders, 1);
    assert_eq!(controller.record_state(id).await, Some(RecordState::Original));
    assert_eq!(controller.view_mode().await, ViewMode::Original);
    assert_eq!(controller.settings().await.view_mode, ViewMode::Original);
    assert!(controller.settings().await.highlight_long_words);

    // The highlight change is already rendered when the record is shown again.
    let renders_before = controller.render_count().await;
    assert_eq!(controller.toggle(id).await, Some(RecordState::Transformed));
    assert_eq!(controller.render_count().await, renders_before);
    let mut words = Vec::new();
    long_words(&transformed_nodes(controller.display(id).await), &mut words);
    assert_eq!(words, vec![vec![WordSegment::Text("extraordinary".into())]]);
}

#[tokio::test]
async fn explicit_view_mode_setting_still_applies() {
    let controller = controller(OUTPUT);
    let id = controller.transform_selection(INPUT).await.unwrap();

    controller
        .apply_settings(Settings {
            view_mode: ViewMode::Original,
            ..Default::default()
        })
        .await;
    assert_eq!(controller.record_state(id).await, Some(RecordState::Original));

    // Toggled back globally, then a settings push that repeats `original`
    // is not a new instruction.
    assert_eq!(controller.toggle_all().await, ViewMode::Transformed);
    controller
        .apply_settings(Settings {
            view_mode: ViewMode::Original,
            split_long_words: true,
            ..Default::default()
        })
        .await;
    assert_eq!(controller.record_state(id).await, Some(RecordState::Transformed));
}

#[tokio::test]
async fn listener_keeps_global_toggle() {
    let controller = controller(OUTPUT);
    let id = controller.transform_selection(INPUT).await.unwrap();
    controller.toggle_all().await;

    let (tx, rx) = watch::channel(Settings::default());
    let handle = spawn_settings_listener(controller.clone(), rx);
    tx.send(Settings {
        highlight_color: bridger_core::HighlightColor::Teal,
        ..Default::default()
    })
    .unwrap();
    drop(tx);
    handle.await.unwrap();

    assert_eq!(
        controller.settings().await.highlight_color,
        bridger_core::HighlightColor::Teal
    );
    assert_eq!(controller.record_state(id).await, Some(RecordState::Original));
}

#[tokio::test]
async fn listener_applies_settings_until_sender_drops() {
    let controller = controller(OUTPUT);
    let id = controller.transform_selection(INPUT).await.unwrap();

    let (tx, rx) = watch::channel(Settings::default());
    let handle = spawn_settings_listener(controller.clone(), rx);
    tx.send(Settings {
        highlight_long_words: true,
        ..Default::default()
    })
    .unwrap();
    drop(tx);
    handle.await.unwrap();

    assert!(controller.settings().await.highlight_long_words);
    let nodes = transformed_nodes(controller.display(id).await);
    let mut words = Vec::new();
    long_words(&nodes, &mut words);
    assert_eq!(words, vec![vec![WordSegment::Text("extraordinary".into())]]);
    assert_eq!(controller.parse_count().await, 1);
}

#[tokio::test]
async fn remove_drops_the_record() {
    let controller = controller(OUTPUT);
    let id = controller.transform_selection(INPUT).await.unwrap();
    assert!(controller.remove(id).await);
    assert!(!controller.remove(id).await);
    assert!(controller.display(id).await.is_none());
    assert_eq!(controller.toggle(id).await, None);
}

/// Marks the first word as a key term after a short pause; inputs starting
/// with "fail" error out.
struct EchoTransformer;

#[async_trait]
impl TextTransformer for EchoTransformer {
    async fn transform(&self, text: &str) -> Result<String, BridgerError> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        if text.starts_with("fail") {
            return Err(BridgerError::EmptyResponse);
        }
        Ok(text.replacen("Readable", "[KEY:Readable]", 1))
    }
}

#[tokio::test(start_paused = true)]
async fn concurrent_selections_do_not_interfere() {
    let controller = ViewController::new(
        Arc::new(EchoTransformer),
        OverlapGate::default(),
        Settings::default(),
    );
    let (ok, failed) = tokio::join!(
        controller.transform_selection("Readable sentence with several extra words."),
        controller.transform_selection("failing selection."),
    );
    let ok = ok.unwrap();
    let failed = failed.unwrap();

    assert_eq!(controller.record_state(ok).await, Some(RecordState::Transformed));
    assert_eq!(controller.record_state(failed).await, Some(RecordState::Original));
    assert_eq!(
        transformed_nodes(controller.display(ok).await),
        vec![RenderNode::Section {
            title: None,
            children: vec![RenderNode::Chunk {
                children: vec![
                    RenderNode::KeyTerm {
                        text: "Readable".into()
                    },
                    RenderNode::Text {
                        text: " sentence with several extra words.".into()
                    },
                ]
            }]
        }]
    );
    assert_eq!(controller.ids().await, vec![ok, failed]);
}
