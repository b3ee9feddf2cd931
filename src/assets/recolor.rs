//! Structural SVG transforms that adapt artwork to a background color.

use crate::assets::svg_doc::{SvgElement, SvgNode};
use crate::foundation::core::Rgb8;
use crate::theme::contrast::secondary_fill;

/// Stroke width of the synthesized outline, in the artwork's user units.
pub const OUTLINE_STROKE_WIDTH: f64 = 750.0;

/// Viewport growth on each side so the outline is not clipped.
pub const OUTLINE_PADDING: f64 = OUTLINE_STROKE_WIDTH / 10.0;

/// Theme `source` for `background`: recolor black fills and optionally add an outline.
pub(crate) fn themed_document(source: &SvgElement, background: Rgb8, outline: bool) -> SvgElement {
    let recolored = recolor_black_fills(source, secondary_fill(background));
    if !outline {
        return recolored;
    }

    let strokes = stroke_copies(&recolored, background);
    let expanded = expand_view_box(recolored, OUTLINE_PADDING);
    insert_into_first_transformed_group(&expanded, &strokes)
}

fn is_black(value: &str) -> bool {
    value.parse::<Rgb8>().is_ok_and(|c| c == Rgb8::BLACK)
}

/// Replace every `fill` attribute equal to pure black with `fill`; other fills are kept.
pub(crate) fn recolor_black_fills(el: &SvgElement, fill: Rgb8) -> SvgElement {
    let hex = fill.hex();
    let attrs = el
        .attrs
        .iter()
        .map(|(k, v)| {
            if k == "fill" && is_black(v) {
                (k.clone(), hex.clone())
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect();
    let children = el
        .children
        .iter()
        .map(|c| match c {
            SvgNode::Element(e) => SvgNode::Element(recolor_black_fills(e, fill)),
            SvgNode::Text(t) => SvgNode::Text(t.clone()),
        })
        .collect();

    SvgElement {
        name: el.name.clone(),
        attrs,
        children,
    }
}

/// Grow the root `viewBox` by `padding` on every side.
///
/// A missing or malformed `viewBox` is left untouched.
pub(crate) fn expand_view_box(root: SvgElement, padding: f64) -> SvgElement {
    let Some(vb) = root.attr("viewBox") else {
        return root;
    };
    let parsed: Result<Vec<f64>, _> = vb
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect();
    let Ok(parts) = parsed else {
        return root;
    };
    let &[x, y, w, h] = parts.as_slice() else {
        return root;
    };

    let expanded = format!(
        "{} {} {} {}",
        x - padding,
        y - padding,
        w + 2.0 * padding,
        h + 2.0 * padding
    );
    root.with_attr("viewBox", expanded)
}

/// Stroke-only duplicates of every `<path>` under `root`, in document order.
///
/// Copies keep the geometry and presentation attributes of their source but not its `id`.
pub(crate) fn stroke_copies(root: &SvgElement, stroke: Rgb8) -> Vec<SvgElement> {
    let stroke = stroke.hex();
    root.descendants()
        .into_iter()
        .filter(|el| el.name == "path")
        .map(|el| SvgElement {
            name: "path".to_owned(),
            attrs: el.attrs.iter().filter(|(k, _)| k != "id").cloned().collect(),
            children: Vec::new(),
        })
        .map(|el| {
            el.with_attr("stroke", stroke.clone())
                .with_attr("stroke-width", OUTLINE_STROKE_WIDTH.to_string())
                .with_attr("stroke-linejoin", "round")
                .with_attr("stroke-linecap", "round")
                .with_attr("fill", "none")
        })
        .collect()
}

/// Prepend `siblings` to the children of the first `<g transform=...>` in document order.
///
/// Earlier children paint first, so the inserted strokes end up underneath the fills. Without
/// such a group the tree is returned unchanged.
pub(crate) fn insert_into_first_transformed_group(
    root: &SvgElement,
    siblings: &[SvgElement],
) -> SvgElement {
    fn walk(el: &SvgElement, siblings: &[SvgElement], done: &mut bool) -> SvgElement {
        let mut children = Vec::with_capacity(el.children.len());
        if !*done && el.name == "g" && el.attr("transform").is_some() {
            *done = true;
            children.extend(siblings.iter().cloned().map(SvgNode::Element));
        }
        for child in &el.children {
            children.push(match child {
                SvgNode::Element(e) if !*done => SvgNode::Element(walk(e, siblings, done)),
                other => other.clone(),
            });
        }
        SvgElement {
            name: el.name.clone(),
            attrs: el.attrs.clone(),
            children,
        }
    }

    if siblings.is_empty() {
        return root.clone();
    }
    let mut done = false;
    walk(root, siblings, &mut done)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/recolor.rs"]
mod tests;
