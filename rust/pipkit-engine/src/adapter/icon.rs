use crate::host::Dom;

/// Filled "enter" glyph used on YouTube.
pub const ENTER_GLYPH: &str = "M19 11h-8v6h8v-6zm4 10V3H1v18h22zm-2-1.98H3V4.97h18v14.05z";

/// Filled "exit" glyph used on YouTube.
pub const EXIT_GLYPH: &str = "M21 3H3v18h18V3zm-2 16H5V5h14v14zm-4-8H9v6h6v-6z";

/// Outlined "enter" glyph matching Netflix's 2px icon weight.
pub const OUTLINED_ENTER_GLYPH: &str = "M3 3h18a1 1 0 0 1 1 1v16a1 1 0 0 1-1 1H3a1 1 0 0 1-1-1V4a1 1 0 0 1 1-1zm1 2v14h16V5H4zm8 6h8v8h-8v-8z";

/// Outlined "exit" glyph matching Netflix's 2px icon weight.
pub const OUTLINED_EXIT_GLYPH: &str = "M3 3h18a1 1 0 0 1 1 1v16a1 1 0 0 1-1 1H3a1 1 0 0 1-1-1V4a1 1 0 0 1 1-1zm1 2v14h16V5H4zm3 3h10v8H8V8zm2 2v4h6v-4h-6z";

/// Build a 24x24 `<svg>` holding a single path.
///
/// Built node by node rather than from markup so that pages enforcing
/// Trusted Types accept it.
pub fn svg_icon<D: Dom>(dom: &D, glyph: &str) -> Option<D::Element> {
    let svg = dom.create_svg_element("svg")?;
    dom.set_attribute(&svg, "viewBox", "0 0 24 24");
    dom.set_attribute(&svg, "height", "100%");
    dom.set_attribute(&svg, "width", "100%");

    let path = dom.create_svg_element("path")?;
    dom.set_attribute(&path, "d", glyph);
    dom.append(&svg, &path).ok()?;

    Some(svg)
}
