use crate::host::Dom;
use crate::services::{Localizer, MessageKey};

use super::{
    CONTROL_ID, Control, Edge, OUTLINED_ENTER_GLYPH, OUTLINED_EXIT_GLYPH, SPACER_ID, SiteAdapter,
    svg_icon,
};

const FULLSCREEN_BUTTONS: [&str; 2] = [
    "[data-uia='control-fullscreen-enter']",
    "[data-uia='control-fullscreen-exit']",
];

// Netflix renames these often; tried in order when the row heuristic fails
const ROW_SELECTORS: [&str; 3] = [
    "[data-uia='controls-standard']",
    ".PlayerControlsNeo__button-control-row",
    ".watch-video--bottom-controls-container",
];

/// A real button row has play, volume, title and fullscreen groups.
const MIN_ROW_CHILDREN: usize = 4;

const SPACER_STYLE: &str = "min-width: 3rem; width: 3rem;";

/// Netflix's player.
///
/// The control row uses generated class names, so the row is found through
/// the fullscreen button and the control is cloned from that button's
/// wrapper to inherit whatever classes the current build uses. This is a
/// structural heuristic and breaks when Netflix redesigns the row.
#[derive(Debug, Default, Clone, Copy)]
pub struct Netflix;

impl Netflix {
    fn fullscreen_button<D: Dom>(dom: &D, scope: Option<&D::Element>) -> Option<D::Element> {
        FULLSCREEN_BUTTONS.iter().find_map(|selector| match scope {
            Some(scope) => dom.query_in(scope, selector),
            None => dom.query(selector),
        })
    }

    fn button_row<D: Dom>(dom: &D, fullscreen: &D::Element) -> Option<D::Element> {
        let row = dom.parent(&dom.parent(fullscreen)?)?;
        (dom.child_count(&row) >= MIN_ROW_CHILDREN).then_some(row)
    }

    fn is_spacer<D: Dom>(dom: &D, element: &D::Element) -> bool {
        dom.query_in(element, "button").is_none()
    }

    fn cloned_control<D: Dom>(
        dom: &D,
        fullscreen: &D::Element,
        text: &dyn Localizer,
    ) -> Option<Control<D::Element>> {
        let native_wrapper = dom.parent(fullscreen)?;
        let wrapper = dom.clone_subtree(&native_wrapper)?;

        let button = dom.query_in(&wrapper, "button")?;
        dom.set_attribute(&button, "aria-label", &text.message(MessageKey::AriaLabel));
        dom.remove_attribute(&button, "data-uia");
        dom.set_attribute(&button, "id", CONTROL_ID);

        let svg = dom.query_in(&wrapper, "svg")?;
        for attribute in ["data-icon", "data-icon-id", "data-uia"] {
            dom.remove_attribute(&svg, attribute);
        }
        let path = dom.query_in(&wrapper, "path")?;
        dom.set_attribute(&path, "d", OUTLINED_ENTER_GLYPH);

        let spacer = match dom.previous_sibling(&native_wrapper) {
            Some(native) if Self::is_spacer(dom, &native) => dom.clone_subtree(&native),
            _ => None,
        };
        let spacer = match spacer {
            Some(spacer) => spacer,
            None => {
                let spacer = dom.create_element("div")?;
                dom.set_attribute(&spacer, "style", SPACER_STYLE);
                spacer
            }
        };
        dom.set_attribute(&spacer, "id", SPACER_ID);

        Some(Control {
            handle: button,
            nodes: vec![spacer, wrapper],
        })
    }

    fn plain_control<D: Dom>(dom: &D, text: &dyn Localizer) -> Option<Control<D::Element>> {
        let button = dom.create_element("button")?;
        dom.set_attribute(&button, "id", CONTROL_ID);
        dom.set_attribute(&button, "class", "pip-ext-button pip-ext-netflix");
        dom.set_attribute(&button, "aria-label", &text.message(MessageKey::AriaLabel));
        dom.append(&button, &svg_icon(dom, OUTLINED_ENTER_GLYPH)?).ok()?;
        Some(Control::single(button))
    }
}

impl<D: Dom> SiteAdapter<D> for Netflix {
    fn locate_video_surface(&self, dom: &D) -> Option<D::Element> {
        dom.query("video")
    }

    fn locate_insertion_container(&self, dom: &D) -> Option<D::Element> {
        Self::fullscreen_button(dom, None)
            .and_then(|fullscreen| Self::button_row(dom, &fullscreen))
            .or_else(|| ROW_SELECTORS.iter().find_map(|selector| dom.query(selector)))
    }

    fn locate_insertion_reference(&self, dom: &D, container: &D::Element) -> Option<D::Element> {
        // Climb from the fullscreen button to the row child holding it
        let mut group = Self::fullscreen_button(dom, Some(container))?;
        loop {
            let parent = dom.parent(&group)?;
            if dom.is_same(&parent, container) {
                break;
            }
            group = parent;
        }

        // Keep the native spacer attached to the fullscreen group
        match dom.previous_sibling(&group) {
            Some(spacer) if Self::is_spacer(dom, &spacer) => Some(spacer),
            _ => Some(group),
        }
    }

    fn fallback_edge(&self) -> Edge {
        Edge::Append
    }

    fn build_control(&self, dom: &D, text: &dyn Localizer) -> Option<Control<D::Element>> {
        match Self::fullscreen_button(dom, None) {
            // A half-rendered native button has nothing to clone yet
            Some(fullscreen) => Self::cloned_control(dom, &fullscreen, text)
                .or_else(|| Self::plain_control(dom, text)),
            None => Self::plain_control(dom, text),
        }
    }

    fn render_control_state(
        &self,
        dom: &D,
        control: &D::Element,
        active: bool,
        _text: &dyn Localizer,
    ) {
        let glyph = if active {
            OUTLINED_EXIT_GLYPH
        } else {
            OUTLINED_ENTER_GLYPH
        };
        if let Some(path) = dom.query_in(control, "path") {
            dom.set_attribute(&path, "d", glyph);
        }
    }

    fn prepare_surface(&self, dom: &D, surface: &D::Element) {
        dom.remove_attribute(surface, "disablepictureinpicture");
    }
}
