use std::cell::RefCell;
use std::rc::Rc;

use markpipe::plugin::{HookKind, HookPayload, PluginContext, PluginError, RegisterOptions};
use markpipe::{
    Config, Node, Pipeline, Plugin, PluginKind, PluginManager, RenderOutput, SyntaxKind,
};
use serde_json::{Map, Value, json};
use similar_asserts::assert_eq;

fn recorder(name: &str, priority: i32, log: &Rc<RefCell<Vec<String>>>) -> Plugin {
    let log = Rc::clone(log);
    let name_owned = name.to_string();
    Plugin::new(name, PluginKind::Transform)
        .with_priority(priority)
        .after_parse(move |_, _| {
            log.borrow_mut().push(name_owned.clone());
            Ok(None)
        })
}

#[test]
fn equal_priorities_run_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut pipeline = Pipeline::bare(Config::default());
    pipeline.register(recorder("p0", 2, &log), RegisterOptions::default());
    pipeline.register(recorder("p1", 1, &log), RegisterOptions::default());
    pipeline.register(recorder("p2", 2, &log), RegisterOptions::default());

    pipeline.parse("text");
    assert_eq!(*log.borrow(), vec!["p0", "p2", "p1"]);
}

#[test]
fn failing_hook_does_not_change_the_result() {
    let shout = || {
        Plugin::new("shout", PluginKind::Transform)
            .before_parse(|text, _| Ok(Some(text.to_uppercase())))
    };

    let mut clean = Pipeline::bare(Config::default());
    clean.register(shout(), RegisterOptions::default());

    let mut noisy = Pipeline::bare(Config::default());
    noisy.register(
        Plugin::new("broken", PluginKind::Transform)
            .with_priority(10)
            .before_parse(|_, _| Err(PluginError::failed("cannot"))),
        RegisterOptions::default(),
    );
    noisy.register(
        Plugin::new("panics", PluginKind::Transform)
            .with_priority(5)
            .after_parse(|_, _| panic!("boom")),
        RegisterOptions::default(),
    );
    noisy.register(shout(), RegisterOptions::default());

    assert_eq!(noisy.process("hello"), clean.process("hello"));
    assert_eq!(noisy.process("hello").into_html(), "<p>HELLO</p>");
}

#[test]
fn before_render_sees_transformed_tree() {
    let mut pipeline = Pipeline::default();
    pipeline.register(
        Plugin::new("count-tables", PluginKind::Extension).before_render(|doc, _| {
            let count = doc.find_all(SyntaxKind::TABLE).len();
            let mut doc = doc.clone();
            doc.children.push(
                Node::new(SyntaxKind::PARAGRAPH).with_content(format!("{count} table(s)")),
            );
            Ok(Some(doc))
        }),
        RegisterOptions::default(),
    );
    let out = pipeline.process("|a|\n|-|").into_html();
    assert!(out.ends_with("<p>1 table(s)</p>"), "{out}");
}

#[test]
fn unregistered_plugin_stops_running() {
    let mut pipeline = Pipeline::default();
    assert!(pipeline.plugins_mut().unregister("table"));
    assert!(!pipeline.plugins_mut().unregister("table"));
    assert_eq!(pipeline.plugins().hook_count(HookKind::BeforeParse), 2);

    let doc = pipeline.parse("|a|\n|-|");
    assert!(doc.find_all(SyntaxKind::TABLE).is_empty());
}

#[test]
fn after_render_can_wrap_tree_output() {
    let mut pipeline = Pipeline::bare(Config::default());
    pipeline.register(
        Plugin::new("as-text", PluginKind::Transform)
            .after_render(|out, _| Ok(Some(RenderOutput::Text(out.clone().into_text())))),
        RegisterOptions::default(),
    );
    assert_eq!(pipeline.process("*x*"), RenderOutput::Text("<p><em>x</em></p>".into()));
}

fn context_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[test]
fn hooks_see_stored_and_call_context() {
    let mut manager = PluginManager::new();
    manager.set_context(context_map(json!({ "theme": "dark", "call": "stored" })));
    manager.register(
        Plugin::new("ctx", PluginKind::Transform).before_parse(|_, ctx| {
            Ok(Some(format!(
                "{}/{}",
                ctx.get_str("theme").unwrap_or("-"),
                ctx.get_str("call").unwrap_or("-")
            )))
        }),
        RegisterOptions::default(),
    );

    let call = PluginContext::new().with("call", "yes");
    let out = manager.execute_hook(HookPayload::BeforeParse(String::new()), &call);
    assert_eq!(out, HookPayload::BeforeParse("dark/yes".to_string()));
}

#[test]
fn render_node_sees_stored_context() {
    let mut manager = PluginManager::new();
    manager.set_context(context_map(json!({ "theme": "dark" })));
    manager.register(
        Plugin::new("themed", PluginKind::Renderer).render_node(|_, ctx| {
            Ok(ctx.get_str("theme").map(|t| RenderOutput::Html(t.to_string())))
        }),
        RegisterOptions::default(),
    );

    let out = manager.render_node(&Node::text("x"), &PluginContext::new());
    assert_eq!(out, Some(RenderOutput::Html("dark".to_string())));
}
