use markpipe::renderer::{Components, ComponentProps, Element, ElementNode};
use markpipe::{Config, OutputFormat, Pipeline, RenderOptions, RenderOutput};
use similar_asserts::assert_eq;

use crate::{html, render_with};

#[test]
fn inline_markup() {
    assert_eq!(
        html("# Title\n\nHello *world* and **bold** `code`."),
        "<h1 id=\"title\">Title</h1>\
         <p>Hello <em>world</em> and <strong>bold</strong> <code>code</code>.</p>"
    );
}

#[test]
fn external_links_open_in_new_tab() {
    assert_eq!(
        html("[site](https://x.com)"),
        "<p><a href=\"https://x.com\" target=\"_blank\" rel=\"noopener noreferrer\">site</a></p>"
    );
}

#[test]
fn script_urls_are_dropped() {
    assert_eq!(
        html("[x](javascript:void)"),
        "<p><a href=\"\" target=\"_blank\" rel=\"noopener noreferrer\">x</a></p>"
    );
}

#[test]
fn text_is_escaped() {
    assert_eq!(html("a <b> c"), "<p>a &lt;b&gt; c</p>");
}

#[test]
fn plain_text_output() {
    let config = Config::builder().format(OutputFormat::Text).build();
    assert_eq!(
        render_with("# Title\n\nbody", config),
        RenderOutput::Text("Title body".into())
    );
}

#[test]
fn unknown_format_in_config_falls_back_to_html() {
    let config: Config = toml::from_str("format = \"markdown\"").unwrap();
    assert_eq!(render_with("x", config).format(), OutputFormat::Html);
}

#[test]
fn element_tree_serializes_to_json() {
    let config = Config::builder().format(OutputFormat::Tree).build();
    let RenderOutput::Tree(tree) = render_with("# Hi", config) else {
        panic!("expected an element tree");
    };
    insta::assert_json_snapshot!(tree, @r#"
    {
      "kind": "fragment",
      "value": [
        {
          "kind": "element",
          "value": {
            "tag": "h1",
            "props": {
              "id": "hi"
            },
            "children": [
              {
                "kind": "text",
                "value": "Hi"
              }
            ]
          }
        }
      ]
    }
    "#);
}

#[test]
fn components_replace_elements_by_tag() {
    let mut pipeline = Pipeline::default();
    pipeline.update_render_options(RenderOptions {
        format: OutputFormat::Tree,
        ..RenderOptions::default()
    });
    pipeline.set_components(Components::new().with("h1", |props: ComponentProps| {
        Element::new("header")
            .prop("data-level", "1")
            .children(props.children)
            .into()
    }));

    let tree = pipeline.process("# Hi").into_tree();
    assert_eq!(tree.to_html(), "<header data-level=\"1\">Hi</header>");
    let ElementNode::Fragment(children) = tree else {
        panic!("document renders as a fragment");
    };
    assert_eq!(children[0].as_element().map(|e| e.tag.as_str()), Some("header"));
}
