use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use pipkit_engine::helpers::{
    FakeElement, FakePage, MemorySizes, NativeCall, NativeMode, YouTubeLayout, netflix_player,
    netflix_player_idle, youtube_player,
};
use pipkit_engine::{
    ACTIVE_CLASS, Ack, CONTROL_ID, EngineConfig, Host, KeyLocalizer, OUTLINED_ENTER_GLYPH,
    OUTLINED_EXIT_GLYPH, PipPhase, PipWindowSize, RelayMessage, Runtime, Services, Site, start,
};
use pretty_assertions::assert_eq;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test;
#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_dedicated_worker);

const YOUTUBE: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
const NETFLIX: &str = "https://www.netflix.com/watch/80100172";

fn run(page: &Rc<FakePage>, origin: &str) -> Runtime<FakePage> {
    run_with(page, origin, Services::default(), EngineConfig::default())
}

fn run_with(
    page: &Rc<FakePage>,
    origin: &str,
    services: Services,
    config: EngineConfig,
) -> Runtime<FakePage> {
    match start(page.clone(), origin, services, config) {
        Some(runtime) => runtime,
        None => panic!("{origin} should be supported"),
    }
}

fn control(page: &FakePage) -> Option<FakeElement> {
    page.find(&format!("#{CONTROL_ID}"))
}

fn controls(page: &FakePage) -> usize {
    page.count(&format!("#{CONTROL_ID}"))
}

fn video(page: &FakePage) -> FakeElement {
    match page.find("video") {
        Some(video) => video,
        None => panic!("no video mounted"),
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_injects_exactly_one_control_under_churn() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Nested));
    let _runtime = run(&page, YOUTUBE);

    for _ in 0..20 {
        page.notify_mutation();
    }
    page.advance(Duration::from_secs(16));

    assert_eq!(controls(&page), 1);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_heals_after_the_page_removes_the_control() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    let _runtime = run(&page, YOUTUBE);

    control(&page).ok_or(anyhow::anyhow!("not injected"))?.remove();
    assert_eq!(controls(&page), 0);

    page.notify_mutation();
    assert_eq!(controls(&page), 1);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_heals_after_the_player_is_rebuilt() -> Result<()> {
    let page = FakePage::new();
    let player = page.mount(youtube_player(YouTubeLayout::Flat));
    let runtime = run(&page, YOUTUBE);
    let first = video(&page);

    // SPA navigation replaces the whole player, video included
    player.remove();
    page.mount(youtube_player(YouTubeLayout::Flat));
    page.notify_mutation();

    let second = video(&page);
    assert!(!first.ptr_eq(&second));
    assert_eq!(controls(&page), 1);

    // The new surface is bound: its native events reach the control
    page.enter_natively(&second);
    assert_eq!(runtime.engine().phase(), PipPhase::Active);
    assert!(control(&page).is_some_and(|c| c.has_class(ACTIVE_CLASS)));
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_round_trips_to_the_initial_rendering() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    let _runtime = run(&page, YOUTUBE);
    let button = control(&page).ok_or(anyhow::anyhow!("not injected"))?;
    let initial = (button.attribute("class"), button.text());

    button.click();
    page.run_until_stalled();
    assert!(button.has_class(ACTIVE_CLASS));
    assert_eq!(button.text(), "tooltipExit");

    button.click();
    page.run_until_stalled();
    assert_eq!((button.attribute("class"), button.text()), initial);
    assert_eq!((page.requests(), page.exits()), (1, 1));
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_follows_the_native_window_being_closed() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    let runtime = run(&page, YOUTUBE);

    runtime.handle_message(RelayMessage::TogglePip);
    page.run_until_stalled();
    assert_eq!(runtime.engine().phase(), PipPhase::Active);

    page.close_native_window();
    assert_eq!(runtime.engine().phase(), PipPhase::Inactive);
    assert!(control(&page).is_some_and(|c| !c.has_class(ACTIVE_CLASS)));
    assert_eq!(page.exits(), 0);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_picks_up_an_already_active_session() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    page.enter_natively(&video(&page));

    let runtime = run(&page, YOUTUBE);
    assert_eq!(runtime.engine().phase(), PipPhase::Active);
    assert!(control(&page).is_some_and(|c| c.has_class(ACTIVE_CLASS)));
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_drops_toggles_while_a_request_is_pending() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    page.set_native_mode(NativeMode::Manual);
    let runtime = run(&page, YOUTUBE);
    let button = control(&page).ok_or(anyhow::anyhow!("not injected"))?;

    button.click();
    button.click();
    runtime.handle_message(RelayMessage::TogglePip);
    assert_eq!(page.pending_calls(), vec![NativeCall::Request(video(&page))]);
    assert_eq!(runtime.engine().phase(), PipPhase::Requesting);

    page.reject_next(pipkit_engine::PlatformError::NotAllowed("no gesture".into()));
    assert_eq!(runtime.engine().phase(), PipPhase::Inactive);
    assert!(!button.has_class(ACTIVE_CLASS));
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_enters_automatically_only_when_every_condition_holds() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    let runtime = run(&page, YOUTUBE);
    let video = video(&page);

    // Paused
    page.set_hidden(true);
    page.run_until_stalled();
    assert_eq!(page.requests(), 0);
    page.set_hidden(false);

    // Disabled through the relay
    video.set_paused(false);
    let ack = runtime.handle_message(RelayMessage::SetAutoPip { enabled: false });
    assert_eq!(ack, Ack::ok());
    page.set_hidden(true);
    page.run_until_stalled();
    assert_eq!(page.requests(), 0);
    page.set_hidden(false);

    // Everything holds
    runtime.handle_message(RelayMessage::SetAutoPip { enabled: true });
    page.set_hidden(true);
    page.run_until_stalled();
    assert_eq!(page.requests(), 1);
    assert_eq!(runtime.engine().phase(), PipPhase::Active);

    // Already active
    page.set_hidden(false);
    page.set_hidden(true);
    page.run_until_stalled();
    assert_eq!(page.requests(), 1);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_never_exits_when_the_tab_comes_back() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    let runtime = run(&page, YOUTUBE);
    video(&page).set_paused(false);

    page.set_hidden(true);
    page.run_until_stalled();
    page.set_hidden(false);
    page.run_until_stalled();

    assert_eq!(runtime.engine().phase(), PipPhase::Active);
    assert_eq!(page.exits(), 0);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_swallows_a_rejected_automatic_request() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    page.set_native_mode(NativeMode::Reject);
    let runtime = run(&page, YOUTUBE);
    video(&page).set_paused(false);

    page.set_hidden(true);
    page.run_until_stalled();

    assert_eq!(page.requests(), 1);
    assert_eq!(runtime.engine().phase(), PipPhase::Inactive);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_stays_out_of_unsupported_pages() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));

    for origin in ["https://example.org", "https://notyoutube.com", "site-a.example", ""] {
        let runtime = start(page.clone(), origin, Services::default(), EngineConfig::default());
        assert!(runtime.is_none(), "{origin}");
    }
    page.notify_mutation();
    page.advance(Duration::from_secs(10));

    assert_eq!(page.lookups(), 0);
    assert_eq!(page.subscriptions(), 0);
    assert_eq!(controls(&page), 0);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_selects_the_adapter_from_the_origin() -> Result<()> {
    let page = FakePage::new();
    assert_eq!(run(&page, YOUTUBE).site(), Site::YouTube);

    let page = FakePage::new();
    assert_eq!(run(&page, NETFLIX).site(), Site::Netflix);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_retries_on_schedule_until_the_player_appears() -> Result<()> {
    let page = FakePage::new();
    let config = EngineConfig {
        retry_delays_ms: vec![1000, 2000, 4000, 8000],
        ..EngineConfig::default()
    };
    let _runtime = run_with(&page, YOUTUBE, Services::default(), config);

    page.advance(Duration::from_millis(3999));
    page.mount(youtube_player(YouTubeLayout::Flat));
    assert_eq!(controls(&page), 0);

    page.advance(Duration::from_millis(1));
    assert_eq!(controls(&page), 1);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_gives_up_after_the_last_retry() -> Result<()> {
    let page = FakePage::new();
    let _runtime = run(&page, YOUTUBE);

    page.advance(Duration::from_secs(9));
    page.mount(youtube_player(YouTubeLayout::Flat));
    page.advance(Duration::from_secs(60));

    assert_eq!(controls(&page), 0);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_reinjects_after_a_youtube_navigation() -> Result<()> {
    let page = FakePage::new();
    let player = page.mount(youtube_player(YouTubeLayout::Flat));
    let _runtime = run(&page, YOUTUBE);
    page.advance(Duration::from_secs(9));

    player.remove();
    page.mount(youtube_player(YouTubeLayout::Nested));
    page.dispatch_event("yt-navigate-finish");
    page.advance(Duration::from_millis(499));
    assert_eq!(controls(&page), 0);

    page.advance(Duration::from_millis(1));
    assert_eq!(controls(&page), 1);
    assert!(
        control(&page)
            .and_then(|c| c.parent())
            .is_some_and(|p| p.has_class("ytp-right-controls-right"))
    );
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_injects_into_netflix_once_controls_show() -> Result<()> {
    let page = FakePage::new();
    let idle = page.mount(netflix_player_idle());
    let _runtime = run(&page, NETFLIX);

    // Surface restrictions are lifted even before the controls render
    assert!(video(&page).attribute("disablepictureinpicture").is_none());
    assert_eq!(controls(&page), 0);

    idle.remove();
    page.mount(netflix_player());
    page.notify_mutation();

    assert_eq!(controls(&page), 1);
    assert!(video(&page).attribute("disablepictureinpicture").is_none());
    Ok(())
}

fn glyph(control: &FakeElement) -> Option<String> {
    let mut node = control.clone();
    while node.tag() != "path" {
        node = node.children().first()?.clone();
    }
    node.attribute("d")
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_toggles_a_netflix_control_after_the_restriction_returns() -> Result<()> {
    let page = FakePage::new();
    page.mount(netflix_player());
    let runtime = run(&page, NETFLIX);
    let button = control(&page).ok_or(anyhow::anyhow!("not injected"))?;
    assert_eq!(glyph(&button).as_deref(), Some(OUTLINED_ENTER_GLYPH));

    // The player puts the attribute back on every re-render
    video(&page).set_attribute("disablepictureinpicture", "");
    button.click();
    page.run_until_stalled();

    assert!(video(&page).attribute("disablepictureinpicture").is_none());
    assert_eq!(runtime.engine().phase(), PipPhase::Active);
    assert_eq!(glyph(&button).as_deref(), Some(OUTLINED_EXIT_GLYPH));

    video(&page).set_attribute("disablepictureinpicture", "");
    assert_eq!(runtime.handle_message(RelayMessage::TogglePip), Ack::ok());
    page.run_until_stalled();

    assert!(video(&page).attribute("disablepictureinpicture").is_none());
    assert_eq!(runtime.engine().phase(), PipPhase::Inactive);
    assert_eq!(glyph(&button).as_deref(), Some(OUTLINED_ENTER_GLYPH));
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_persists_the_window_size() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    let sizes = Rc::new(MemorySizes::default());
    let services = Services {
        text: Box::new(KeyLocalizer),
        sizes: Box::new(sizes.clone()),
    };
    let runtime = run_with(&page, YOUTUBE, services, EngineConfig::default());

    runtime.handle_message(RelayMessage::TogglePip);
    page.run_until_stalled();
    let wide = PipWindowSize {
        width: 854,
        height: 480,
    };
    page.resize_native_window(wide);

    assert_eq!(
        sizes.saved(),
        vec![
            PipWindowSize {
                width: 400,
                height: 225
            },
            wide
        ]
    );

    // A broken store does not get in the way
    sizes.break_storage();
    page.resize_native_window(PipWindowSize {
        width: 320,
        height: 180,
    });
    assert_eq!(sizes.saved().len(), 2);
    assert_eq!(runtime.engine().phase(), PipPhase::Active);
    assert!(page.pip_element().is_some());
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_acknowledges_without_waiting_for_the_platform() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    page.set_native_mode(NativeMode::Manual);
    let runtime = run(&page, YOUTUBE);

    let ack = runtime.handle_message(RelayMessage::TogglePip);
    assert_eq!(ack, Ack::ok());
    assert_eq!(page.pending_calls().len(), 1);

    let decoded = RelayMessage::from_json(r#"{"action":"set-auto-pip","enabled":false}"#);
    assert_eq!(decoded.map(|m| runtime.handle_message(m)), Some(Ack::ok()));
    assert!(!runtime.engine().auto_pip_enabled());
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_goes_quiet_once_the_runtime_is_dropped() -> Result<()> {
    let page = FakePage::new();
    page.mount(youtube_player(YouTubeLayout::Flat));
    let runtime = run(&page, YOUTUBE);
    let button = control(&page).ok_or(anyhow::anyhow!("not injected"))?;
    drop(runtime);

    button.click();
    video(&page).set_paused(false);
    page.set_hidden(true);
    page.run_until_stalled();

    assert_eq!(page.requests(), 0);
    Ok(())
}
