#![cfg(all(target_arch = "wasm32", target_os = "unknown"))]

use std::rc::Rc;

use pipkit_engine::{CONTROL_ID, Dom, EngineConfig, Host, PipPhase, Services, SurfaceSet};
use pipkit_extension::page::WebPage;
use wasm_bindgen_test::wasm_bindgen_test;
use web_sys::Element;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn mount(page: &WebPage, markup: &str) -> Element {
    let root = page.create_element("div").unwrap();
    root.set_inner_html(markup);
    let body = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
        .unwrap();
    body.append_child(&root).unwrap();
    root
}

#[wasm_bindgen_test]
fn it_inserts_before_a_reference_in_the_live_document() {
    let page = WebPage::new().unwrap();
    let root = mount(&page, r#"<div class="bar"><span class="first"></span></div>"#);

    let bar = page.query_in(&root, ".bar").unwrap();
    let first = page.query_in(&bar, ".first").unwrap();
    let second = page.create_element("span").unwrap();

    page.insert_before(&bar, &second, &first).unwrap();

    assert_eq!(page.child_count(&bar), 2);
    assert!(page.is_same(&page.previous_sibling(&first).unwrap(), &second));
    assert!(page.is_same(&page.parent(&second).unwrap(), &bar));
    root.remove();
}

#[wasm_bindgen_test]
fn it_toggles_classes_and_attributes() {
    let page = WebPage::new().unwrap();
    let root = mount(&page, "<video disablepictureinpicture></video>");
    let video = page.query_in(&root, "video").unwrap();

    page.remove_attribute(&video, "disablepictureinpicture");
    page.set_class(&video, "on", true);

    assert!(!video.has_attribute("disablepictureinpicture"));
    assert!(video.class_list().contains("on"));

    page.set_class(&video, "on", false);
    assert!(!video.class_list().contains("on"));
    root.remove();
}

#[wasm_bindgen_test]
fn it_tracks_each_surface_once() {
    let page = WebPage::new().unwrap();
    let root = mount(&page, "<video></video>");
    let video = page.query_in(&root, "video").unwrap();

    let mut surfaces = page.surface_set();
    assert!(surfaces.insert(&video));
    assert!(!surfaces.insert(&video));
    root.remove();
}

#[wasm_bindgen_test]
fn it_injects_the_control_into_a_youtube_player() {
    let page = Rc::new(WebPage::new().unwrap());
    let root = mount(
        &page,
        r#"<video class="html5-main-video"></video>
           <div class="ytp-right-controls"><button class="ytp-fullscreen-button"></button></div>"#,
    );

    let runtime = pipkit_engine::start(
        page.clone(),
        "https://www.youtube.com",
        Services::default(),
        EngineConfig::default(),
    )
    .unwrap();

    let control = page.element_by_id(CONTROL_ID).unwrap();
    let fullscreen = page.query(".ytp-fullscreen-button").unwrap();
    assert!(page.is_same(&page.previous_sibling(&fullscreen).unwrap(), &control));
    assert_eq!(runtime.engine().phase(), PipPhase::Inactive);

    drop(runtime);
    root.remove();
}
