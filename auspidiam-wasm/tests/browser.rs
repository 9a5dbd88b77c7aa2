#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use auspidiam_core::constants::PANEL_STORAGE_KEY;
use auspidiam_core::{PersistedPanel, Point, Size, Storage};
use auspidiam_wasm::config::PageOptions;
use auspidiam_wasm::state::HomeState;
use auspidiam_wasm::storage::LocalStorage;
use auspidiam_wasm::utils::{client_rect, viewport_size};
use auspidiam_wasm::{home, panel};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    window, Document, Element, Event, HtmlElement, MouseEvent, MouseEventInit, PointerEvent,
    PointerEventInit, Window,
};

wasm_bindgen_test_configure!(run_in_browser);

const HOME_FIXTURE: &str = r#"
  <div id="title" style="position:fixed;left:300px;top:250px;width:0;height:0"></div>
  <a id="link-about" style="position:fixed"></a>
  <a id="link-audits" style="position:fixed"></a>
  <a id="link-analysis" style="position:fixed"></a>
"#;

const PANEL_FIXTURE: &str = r#"
  <div id="nav-panel" style="position:fixed;width:220px;height:140px">
    <div id="panel-handle" data-handle="true" style="height:30px">nav</div>
    <nav></nav>
  </div>
"#;

fn page() -> (Window, Document) {
    let window = window().expect("window");
    let document = window.document().expect("document");
    (window, document)
}

fn local_storage() -> LocalStorage {
    LocalStorage::open(&page().0)
}

fn fixture(html: &str) -> Element {
    let (_, document) = page();
    let root = document.create_element("div").expect("div");
    root.set_inner_html(html);
    document.body().expect("body").append_child(&root).expect("append");
    root
}

fn by_id(id: &str) -> HtmlElement {
    page()
        .1
        .get_element_by_id(id)
        .expect("fixture element")
        .dyn_into()
        .expect("html element")
}

fn style(el: &HtmlElement, prop: &str) -> String {
    el.style().get_property_value(prop).expect("style")
}

fn pointer(kind: &str, x: i32, y: i32, buttons: u16) -> PointerEvent {
    let init = PointerEventInit::new();
    init.set_pointer_id(1);
    init.set_is_primary(true);
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_client_x(x);
    init.set_client_y(y);
    init.set_button(0);
    init.set_buttons(buttons);
    PointerEvent::new_with_event_init_dict(kind, &init).expect("pointer event")
}

fn click() -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    MouseEvent::new_with_mouse_event_init_dict("click", &init).expect("click event")
}

fn dispatch(target: &web_sys::EventTarget, e: &Event) {
    target.dispatch_event(e).expect("dispatch");
}

fn measure_title() {
    by_id("title")
        .style()
        .set_css_text("position:fixed;left:300px;top:250px;width:240px;height:60px");
}

fn mount_home() -> Rc<RefCell<HomeState>> {
    let (window, document) = page();
    let options = PageOptions {
        seed: Some(7),
        ..PageOptions::default()
    };
    home::mount(&window, &document, &options)
        .expect("mount")
        .expect("home widgets present")
}

#[wasm_bindgen_test]
fn local_storage_round_trips_values() {
    let mut storage = local_storage();
    assert!(storage.is_available());
    storage.set("auspidiam-test", "hello").expect("set");
    assert_eq!(storage.get("auspidiam-test").expect("get").as_deref(), Some("hello"));
    assert_eq!(storage.get("auspidiam-missing").expect("get"), None);
}

#[wasm_bindgen_test]
fn panel_survives_garbage_in_local_storage() {
    let mut storage = local_storage();
    storage.set(PANEL_STORAGE_KEY, "{").expect("set");
    let panel = PersistedPanel::load(storage, Size::new(1024.0, 768.0));
    assert_eq!(panel.position(), Point::new(20.0, 20.0));
    let saved = local_storage().get(PANEL_STORAGE_KEY).expect("get");
    assert_eq!(saved.as_deref(), Some(r#"{"x":20.0,"y":20.0}"#));
}

#[wasm_bindgen_test]
fn measured_element_reports_its_box() {
    let (window, document) = page();
    let el: HtmlElement = document
        .create_element("div")
        .expect("div")
        .dyn_into()
        .expect("html element");
    el.style()
        .set_css_text("position:fixed;left:10px;top:20px;width:120px;height:30px");
    document.body().expect("body").append_child(&el).expect("append");
    let rect = client_rect(&el);
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (10.0, 20.0, 120.0, 30.0));
    assert!(!viewport_size(&window).is_empty());
    el.remove();
}

#[wasm_bindgen_test]
fn labels_stay_hidden_until_the_title_has_a_size() {
    let root = fixture(HOME_FIXTURE);
    let state = mount_home();
    let about = by_id("link-about");
    assert_eq!(about.text_content().as_deref(), Some("about."));
    assert_eq!(about.get_attribute("href").as_deref(), Some("/about"));

    assert!(home::relayout(&mut state.borrow_mut()).is_err());
    for id in ["link-about", "link-audits", "link-analysis"] {
        assert_eq!(style(&by_id(id), "visibility"), "hidden");
    }

    measure_title();
    home::relayout(&mut state.borrow_mut()).expect("layout");
    for id in ["link-about", "link-audits", "link-analysis"] {
        let el = by_id(id);
        assert_eq!(style(&el, "visibility"), "visible");
        assert!(style(&el, "left").ends_with("px"));
    }
    root.remove();
}

#[wasm_bindgen_test]
fn click_after_drag_is_prevented() {
    let root = fixture(HOME_FIXTURE);
    measure_title();
    let state = mount_home();
    home::relayout(&mut state.borrow_mut()).expect("layout");
    let about = by_id("link-about");
    let before = style(&about, "left");

    dispatch(&about, &pointer("pointerdown", 100, 100, 1));
    dispatch(&about, &pointer("pointermove", 140, 130, 1));
    dispatch(&about, &pointer("pointerup", 140, 130, 0));
    assert!(!state.borrow().controller.is_dragging());
    assert!(state.borrow().suppress_click);
    assert_ne!(style(&about, "left"), before);

    let e = click();
    dispatch(&about, &e);
    assert!(e.default_prevented());
    assert!(!state.borrow().suppress_click);
    root.remove();
}

#[wasm_bindgen_test]
fn key_press_clears_pending_click_suppression() {
    let root = fixture(HOME_FIXTURE);
    measure_title();
    let state = mount_home();
    home::relayout(&mut state.borrow_mut()).expect("layout");
    let audits = by_id("link-audits");

    dispatch(&audits, &pointer("pointerdown", 200, 200, 1));
    dispatch(&audits, &pointer("pointermove", 260, 200, 1));
    dispatch(&audits, &pointer("pointerup", 260, 200, 0));
    assert!(state.borrow().suppress_click);

    dispatch(&page().0, &Event::new("keydown").expect("event"));
    assert!(!state.borrow().suppress_click);
    root.remove();
}

#[wasm_bindgen_test]
fn window_blur_cancels_the_drag() {
    let root = fixture(HOME_FIXTURE);
    measure_title();
    let state = mount_home();
    home::relayout(&mut state.borrow_mut()).expect("layout");
    let analysis = by_id("link-analysis");
    let (left, top) = (style(&analysis, "left"), style(&analysis, "top"));

    dispatch(&analysis, &pointer("pointerdown", 50, 50, 1));
    dispatch(&analysis, &pointer("pointermove", 110, 90, 1));
    assert!(state.borrow().controller.is_dragging());
    assert_ne!(style(&analysis, "left"), left);

    dispatch(&page().0, &Event::new("blur").expect("event"));
    assert!(!state.borrow().controller.is_dragging());
    assert_eq!((style(&analysis, "left"), style(&analysis, "top")), (left, top));
    assert!(!state.borrow().suppress_click);
    root.remove();
}

#[wasm_bindgen_test]
fn panel_ignores_presses_off_the_handle() {
    local_storage()
        .set(PANEL_STORAGE_KEY, r#"{"x":40,"y":40}"#)
        .expect("set");
    let root = fixture(PANEL_FIXTURE);
    let (window, document) = page();
    let state = panel::mount(&window, &document)
        .expect("mount")
        .expect("panel present");
    let element = by_id("nav-panel");
    let nav = element.query_selector("nav").expect("query").expect("nav");
    assert_eq!(nav.child_element_count(), 4);
    let first: HtmlElement = nav
        .first_element_child()
        .expect("entry")
        .dyn_into()
        .expect("html element");
    assert_eq!(first.text_content().as_deref(), Some("argument."));

    dispatch(&first, &pointer("pointerdown", 60, 100, 1));
    assert!(!state.borrow().panel.is_dragging());
    dispatch(&element, &pointer("pointermove", 300, 300, 1));
    assert_eq!(state.borrow().panel.position(), Point::new(40.0, 40.0));
    assert_eq!(style(&element, "left"), "40px");
    root.remove();
}

#[wasm_bindgen_test]
fn panel_drag_ends_on_blur_and_lost_capture() {
    local_storage()
        .set(PANEL_STORAGE_KEY, r#"{"x":40,"y":40}"#)
        .expect("set");
    let root = fixture(PANEL_FIXTURE);
    let (window, document) = page();
    let state = panel::mount(&window, &document)
        .expect("mount")
        .expect("panel present");
    let handle = by_id("panel-handle");

    dispatch(&handle, &pointer("pointerdown", 50, 50, 1));
    assert!(state.borrow().panel.is_dragging());
    dispatch(&handle, &pointer("pointermove", 150, 120, 1));
    assert_eq!(state.borrow().panel.position(), Point::new(140.0, 110.0));

    dispatch(&window, &Event::new("blur").expect("event"));
    assert!(!state.borrow().panel.is_dragging());
    let saved = local_storage().get(PANEL_STORAGE_KEY).expect("get");
    assert_eq!(saved.as_deref(), Some(r#"{"x":140.0,"y":110.0}"#));
    dispatch(&handle, &pointer("pointermove", 300, 300, 1));
    assert_eq!(state.borrow().panel.position(), Point::new(140.0, 110.0));

    dispatch(&handle, &pointer("pointerdown", 150, 120, 1));
    dispatch(&handle, &pointer("pointermove", 170, 130, 1));
    dispatch(&by_id("nav-panel"), &pointer("lostpointercapture", 170, 130, 0));
    assert!(!state.borrow().panel.is_dragging());
    assert_eq!(state.borrow().panel.position(), Point::new(160.0, 120.0));
    root.remove();
}
