//! Player markup shaped like the live sites, trimmed to what the adapters
//! look at.

use super::FakeElement;

/// YouTube control bar layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YouTubeLayout {
    /// Single `.ytp-right-controls` row (pre-2024)
    Flat,
    /// `.ytp-right-controls` split into left/right groups (2024+)
    Nested,
}

fn div(class: &str) -> FakeElement {
    FakeElement::new("div").attr("class", class)
}

fn yt_button(class: &str) -> FakeElement {
    FakeElement::new("button").attr("class", &format!("ytp-button {class}"))
}

/// A YouTube watch-page player.
pub fn youtube_player(layout: YouTubeLayout) -> FakeElement {
    let video = FakeElement::new("video").attr("class", "video-stream html5-main-video");

    let right_controls = match layout {
        YouTubeLayout::Flat => div("ytp-right-controls")
            .with(yt_button("ytp-subtitles-button"))
            .with(yt_button("ytp-settings-button"))
            .with(yt_button("ytp-size-button"))
            .with(yt_button("ytp-fullscreen-button")),
        YouTubeLayout::Nested => div("ytp-right-controls")
            .with(
                div("ytp-right-controls-left")
                    .with(yt_button("ytp-subtitles-button"))
                    .with(yt_button("ytp-settings-button")),
            )
            .with(
                div("ytp-right-controls-right")
                    .with(yt_button("ytp-size-button"))
                    .with(yt_button("ytp-fullscreen-button")),
            ),
    };

    FakeElement::new("div")
        .attr("id", "movie_player")
        .attr("class", "html5-video-player")
        .with(div("html5-video-container").with(video))
        .with(
            div("ytp-chrome-bottom").with(
                div("ytp-chrome-controls")
                    .with(div("ytp-left-controls").with(yt_button("ytp-play-button")))
                    .with(right_controls),
            ),
        )
}

fn nf_spacer() -> FakeElement {
    FakeElement::new("div")
        .attr("class", "default-ltr-cache-1npqywr")
        .attr("style", "min-width: 3rem; width: 3rem;")
}

fn nf_control(uia: &str, label: &str) -> FakeElement {
    FakeElement::new("div")
        .attr("class", "medium default-ltr-cache-1dcjcj4")
        .with(
            FakeElement::new("button")
                .attr("aria-label", label)
                .attr("class", " default-ltr-cache-1enhvti")
                .attr("data-uia", uia)
                .with(
                    FakeElement::new("div")
                        .attr("class", "control-medium default-ltr-cache-iyulz3")
                        .attr("role", "presentation")
                        .with(
                            FakeElement::svg("svg")
                                .attr("viewBox", "0 0 24 24")
                                .attr("data-icon", "NativeStandard")
                                .attr("data-icon-id", "native-icon")
                                .attr("data-uia", "native-icon")
                                .with(
                                    FakeElement::svg("path")
                                        .attr("fill", "currentColor")
                                        .attr("d", "M0 0h24v24H0z"),
                                ),
                        ),
                ),
        )
}

/// A Netflix watch-page player with the bottom control row rendered.
pub fn netflix_player() -> FakeElement {
    let row = FakeElement::new("div")
        .attr("class", "default-ltr-cache-1bvtfxj")
        .with(nf_control("control-play-pause-pause", "Pause"))
        .with(nf_spacer())
        .with(nf_control("control-volume-high", "Volume"))
        .with(FakeElement::new("div").attr("class", "title").text_content("Episode 1"))
        .with(nf_spacer())
        .with(nf_control("control-fullscreen-enter", "Full screen"));

    FakeElement::new("div")
        .attr("class", "watch-video")
        .with(
            FakeElement::new("div")
                .attr("data-uia", "player")
                .with(FakeElement::new("video").attr("disablepictureinpicture", "")),
        )
        .with(
            div("watch-video--bottom-controls-container")
                .with(FakeElement::new("div").attr("data-uia", "controls-standard").with(row)),
        )
}

/// A Netflix player whose controls are still hidden: the video is present
/// but the control row has not been rendered.
pub fn netflix_player_idle() -> FakeElement {
    FakeElement::new("div").attr("class", "watch-video").with(
        FakeElement::new("div")
            .attr("data-uia", "player")
            .with(FakeElement::new("video").attr("disablepictureinpicture", "")),
    )
}
