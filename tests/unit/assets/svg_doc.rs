use super::*;

const INKSCAPE_DOC: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:xlink="http://www.w3.org/1999/xlink"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"
     width="100" height="50" viewBox="0 0 100 50">
  <sodipodi:namedview id="nv" inkscape:zoom="2"/>
  <g inkscape:label="Layer 1" transform="translate(1,2)">
    <path d="M0 0 L10 0 L10 10 Z" fill="#000000"/>
    <use xlink:href="#p"/>
    <text xml:space="preserve">A &amp; B</text>
  </g>
</svg>"##;

#[test]
fn parse_keeps_render_relevant_content_only() {
    let doc = SvgElement::parse(INKSCAPE_DOC).unwrap();
    assert_eq!(doc.name, "svg");
    assert_eq!(doc.attr("viewBox"), Some("0 0 100 50"));

    let names: Vec<_> = doc.descendants().iter().map(|e| e.name.clone()).collect();
    assert_eq!(names, vec!["svg", "g", "path", "use", "text"]);

    let g = doc.child_elements().next().unwrap();
    assert_eq!(g.attr("transform"), Some("translate(1,2)"));
    assert_eq!(g.attr("label"), None);

    let use_el = g.child_elements().nth(1).unwrap();
    assert_eq!(use_el.attr("xlink:href"), Some("#p"));
    let text_el = g.child_elements().nth(2).unwrap();
    assert_eq!(text_el.attr("xml:space"), Some("preserve"));
}

#[test]
fn serialized_output_reparses_to_the_same_tree() {
    let doc = SvgElement::parse(INKSCAPE_DOC).unwrap();
    let xml = doc.to_xml();
    assert!(xml.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(xml.contains("A &amp; B"));
    assert_eq!(SvgElement::parse(&xml).unwrap(), doc);
}

#[test]
fn with_attr_replaces_in_place_and_appends_new() {
    let el = SvgElement::new("path")
        .with_attr("d", "M0 0")
        .with_attr("fill", "#000")
        .with_attr("d", "M1 1")
        .with_attr("stroke", "red");
    assert_eq!(
        el.attrs,
        vec![
            ("d".to_string(), "M1 1".to_string()),
            ("fill".to_string(), "#000".to_string()),
            ("stroke".to_string(), "red".to_string()),
        ]
    );
}

#[test]
fn attribute_values_are_escaped() {
    let el = SvgElement::new("svg").with_attr("data-x", "a\"<b>&");
    assert!(el.to_xml().contains(r#"data-x="a&quot;&lt;b&gt;&amp;""#));
}

#[test]
fn rejects_non_svg_documents() {
    assert!(matches!(
        SvgElement::parse("<html/>"),
        Err(HitsterError::Processing(_))
    ));
    assert!(matches!(
        SvgElement::parse("<svg"),
        Err(HitsterError::Processing(_))
    ));
}

#[test]
fn text_around_dropped_nodes_is_merged() {
    let doc = SvgElement::parse(INKSCAPE_DOC).unwrap();
    assert!(matches!(doc.children.first(), Some(SvgNode::Text(t)) if t == "\n  \n  "));
    assert!(
        doc.children
            .windows(2)
            .all(|w| !matches!(w, [SvgNode::Text(_), SvgNode::Text(_)]))
    );

    let commented = SvgElement::parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g>a<!-- note -->b</g></svg>"#,
    )
    .unwrap();
    let g = commented.child_elements().next().unwrap();
    assert_eq!(g.children, vec![SvgNode::Text("ab".to_string())]);
}
