use markpipe::{Config, ParseMode, PluginToggles, SyntaxKind, parse};
use similar_asserts::assert_eq;

use crate::html;

#[test]
fn pipe_table_becomes_table_node() {
    let doc = parse("|a|b|\n|---|---|\n|1|2|");
    let tables = doc.find_all(SyntaxKind::TABLE);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].children.len(), 2);
    assert!(
        tables[0].children[0]
            .children
            .iter()
            .all(|cell| cell.attr_flag("header"))
    );
}

#[test]
fn table_html() {
    assert_eq!(
        html("|a|b|\n|:-|-:|\n|1|2|"),
        "<table><thead><tr><th>a</th><th style=\"text-align: right\">b</th></tr></thead>\
         <tbody><tr><td>1</td><td style=\"text-align: right\">2</td></tr></tbody></table>"
    );
}

#[test]
fn task_list_html() {
    assert_eq!(
        html("- [x] done\n- [ ] todo"),
        "<ul><li class=\"task-list-item\"><input type=\"checkbox\" disabled checked> done</li>\
         <li class=\"task-list-item\"><input type=\"checkbox\" disabled> todo</li></ul>"
    );
}

#[test]
fn toc_marker_and_heading_ids() {
    let doc = parse("# A\n[TOC]\n## B");
    let headings = doc.find_all(SyntaxKind::HEADING);
    assert!(headings.iter().all(|h| h.attr_str("id").is_some()));

    let toc = &doc.children[1];
    assert_eq!(toc.kind, SyntaxKind::LIST);
    let hrefs: Vec<_> = toc
        .find_all(SyntaxKind::LINK)
        .iter()
        .map(|l| l.attr_str("href").unwrap())
        .collect();
    assert_eq!(hrefs, vec!["#a", "#b"]);
}

#[test]
fn toc_html() {
    insta::assert_snapshot!(
        html("# A\n[TOC]\n## B"),
        @r##"<h1 id="a">A</h1><ul class="toc"><li><a href="#a">A</a><ul><li><a href="#b">B</a></li></ul></li></ul><h2 id="b">B</h2>"##
    );
}

#[test]
fn footnote_html() {
    insta::assert_snapshot!(
        html("Note[^1].\n\n[^1]: Text"),
        @r##"<p>Note<sup class="footnote-ref"><a href="#fn-1">1</a></sup>.</p><section class="footnotes"><ol><li id="fn-1"><p>Text</p></li></ol></section>"##
    );
}

#[test]
fn disabled_plugins_leave_syntax_alone() {
    let config = Config::builder().plugins(PluginToggles::none()).build();
    let out = markpipe::render("|a|\n|-|", Some(config)).into_html();
    assert_eq!(out, "<p>|a|\n|-|</p>");
}

#[test]
fn tokenized_mode_still_gets_heading_ids_and_tasks() {
    let config = Config::builder().parser(ParseMode::Tokenized).build();
    let pipeline = markpipe::Pipeline::new(config);
    let doc = pipeline.parse("# Title\n- [x] done");
    assert_eq!(doc.children[0].attr_str("id"), Some("title"));
    let item = doc.find_all(SyntaxKind::LIST_ITEM)[0];
    assert!(item.attr_flag("checked"));
}

#[test]
fn builtin_transforms_are_idempotent() {
    let input = "# Doc\n[TOC]\n\n|a|b|\n|---|---|\n|1|2|\n\n- [ ] task\n\nref[^n]\n\n[^n]: note";
    let pipeline = markpipe::Pipeline::default();
    let once = pipeline.parse(input);
    let twice = pipeline
        .plugins()
        .run_after_parse(once.clone(), pipeline.plugins().context());

    // A second pass only re-stamps the same ids.
    assert_eq!(once, twice);
}
