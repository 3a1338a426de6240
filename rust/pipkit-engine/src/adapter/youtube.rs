use crate::host::Dom;
use crate::services::{Localizer, MessageKey};

use super::{ACTIVE_CLASS, CONTROL_ID, Control, ENTER_GLYPH, EXIT_GLYPH, Edge, SiteAdapter, svg_icon};

const TOOLTIP: &str = ".pip-ext-tooltip";
const ICON: &str = ".pip-ext-icon";

/// YouTube's player. The control bar is re-rendered on every client-side
/// navigation, which YouTube announces with `yt-navigate-finish`.
#[derive(Debug, Default, Clone, Copy)]
pub struct YouTube;

impl<D: Dom> SiteAdapter<D> for YouTube {
    fn locate_video_surface(&self, dom: &D) -> Option<D::Element> {
        dom.query("video.html5-main-video")
            .or_else(|| dom.query("video"))
    }

    fn locate_insertion_container(&self, dom: &D) -> Option<D::Element> {
        dom.query(".ytp-right-controls-right")
            .or_else(|| dom.query(".ytp-right-controls"))
    }

    fn locate_insertion_reference(&self, dom: &D, container: &D::Element) -> Option<D::Element> {
        let fullscreen = dom.query_in(container, ".ytp-fullscreen-button")?;
        let parent = dom.parent(&fullscreen)?;
        dom.is_same(&parent, container).then_some(fullscreen)
    }

    fn fallback_edge(&self) -> Edge {
        Edge::Prepend
    }

    fn build_control(&self, dom: &D, text: &dyn Localizer) -> Option<Control<D::Element>> {
        let button = dom.create_element("button")?;
        dom.set_attribute(&button, "id", CONTROL_ID);
        dom.set_attribute(&button, "class", "pip-ext-button ytp-button");
        dom.set_attribute(&button, "aria-label", &text.message(MessageKey::AriaLabel));
        dom.set_attribute(&button, "title", "");

        let tooltip = dom.create_element("span")?;
        dom.set_attribute(&tooltip, "class", "pip-ext-tooltip");
        dom.set_text(&tooltip, &text.message(MessageKey::TooltipEnter));
        dom.append(&button, &tooltip).ok()?;

        let icon = dom.create_element("span")?;
        dom.set_attribute(&icon, "class", "pip-ext-icon");
        dom.append(&icon, &svg_icon(dom, ENTER_GLYPH)?).ok()?;
        dom.append(&button, &icon).ok()?;

        Some(Control::single(button))
    }

    fn render_control_state(
        &self,
        dom: &D,
        control: &D::Element,
        active: bool,
        text: &dyn Localizer,
    ) {
        let (tooltip_key, glyph) = if active {
            (MessageKey::TooltipExit, EXIT_GLYPH)
        } else {
            (MessageKey::TooltipEnter, ENTER_GLYPH)
        };

        dom.set_class(control, ACTIVE_CLASS, active);
        if let Some(tooltip) = dom.query_in(control, TOOLTIP) {
            dom.set_text(&tooltip, &text.message(tooltip_key));
        }
        if let (Some(icon), Some(svg)) = (dom.query_in(control, ICON), svg_icon(dom, glyph)) {
            dom.replace_children(&icon, &svg);
        }
    }

    fn navigation_event(&self) -> Option<&'static str> {
        Some("yt-navigate-finish")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{FakeElement, FakePage, YouTubeLayout, youtube_player};
    use crate::services::KeyLocalizer;

    fn glyph(control: &FakeElement) -> Option<String> {
        control
            .children()
            .iter()
            .find(|c| c.has_class("pip-ext-icon"))
            .and_then(|icon| icon.children().first().cloned())
            .and_then(|svg| svg.children().first().cloned())
            .and_then(|path| path.attribute("d"))
    }

    #[test]
    fn it_prefers_the_main_video() {
        let page = FakePage::new();
        page.mount(FakeElement::new("video").attr("class", "ad-video"));
        page.mount(youtube_player(YouTubeLayout::Flat));

        let surface = YouTube.locate_video_surface(&*page).unwrap();
        assert!(surface.has_class("html5-main-video"));
    }

    #[test]
    fn it_falls_back_to_any_video() {
        let page = FakePage::new();
        page.mount(FakeElement::new("video").attr("class", "shorts-video"));

        let surface = YouTube.locate_video_surface(&*page).unwrap();
        assert!(surface.has_class("shorts-video"));
    }

    #[test]
    fn it_prefers_the_nested_right_group() {
        let page = FakePage::new();
        page.mount(youtube_player(YouTubeLayout::Nested));

        let container = YouTube.locate_insertion_container(&*page).unwrap();
        assert!(container.has_class("ytp-right-controls-right"));

        let reference = YouTube
            .locate_insertion_reference(&*page, &container)
            .unwrap();
        assert!(reference.has_class("ytp-fullscreen-button"));
    }

    #[test]
    fn it_ignores_a_fullscreen_button_that_is_not_a_direct_child() {
        let page = FakePage::new();
        page.mount(youtube_player(YouTubeLayout::Nested));

        let outer = page.find(".ytp-right-controls").unwrap();
        assert!(YouTube.locate_insertion_reference(&*page, &outer).is_none());
    }

    #[test]
    fn it_finds_nothing_before_the_player_renders() {
        let page = FakePage::new();

        assert!(YouTube.locate_video_surface(&*page).is_none());
        assert!(YouTube.locate_insertion_container(&*page).is_none());
    }

    #[test]
    fn it_builds_an_inactive_control() {
        let page = FakePage::new();
        let control = YouTube.build_control(&*page, &KeyLocalizer).unwrap();

        assert_eq!(control.nodes.len(), 1);
        assert_eq!(control.handle.id().as_deref(), Some(CONTROL_ID));
        assert!(control.handle.has_class("ytp-button"));
        assert_eq!(
            control.handle.attribute("aria-label").as_deref(),
            Some("ariaLabel")
        );
        assert_eq!(control.handle.text(), "tooltipEnter");
        assert_eq!(glyph(&control.handle).as_deref(), Some(ENTER_GLYPH));
        assert!(!control.handle.has_class(ACTIVE_CLASS));
    }

    #[test]
    fn it_renders_active_and_inactive_states() {
        let page = FakePage::new();
        let control = YouTube.build_control(&*page, &KeyLocalizer).unwrap().handle;

        YouTube.render_control_state(&*page, &control, true, &KeyLocalizer);
        assert!(control.has_class(ACTIVE_CLASS));
        assert_eq!(control.text(), "tooltipExit");
        assert_eq!(glyph(&control).as_deref(), Some(EXIT_GLYPH));

        YouTube.render_control_state(&*page, &control, false, &KeyLocalizer);
        assert!(!control.has_class(ACTIVE_CLASS));
        assert_eq!(control.text(), "tooltipEnter");
        assert_eq!(glyph(&control).as_deref(), Some(ENTER_GLYPH));
    }
}
