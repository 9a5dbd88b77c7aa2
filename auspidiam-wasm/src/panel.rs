use std::cell::RefCell;
use std::rc::Rc;

use auspidiam_core::{PersistedPanel, PointerId, PANEL_LINKS};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, PointerEvent, Window};

use crate::state::PanelState;
use crate::storage::LocalStorage;
use crate::utils::{client_point, log, place_element, viewport_size, warn};

const HANDLE_SELECTOR: &str = "[data-handle='true']";

/// Mounts the draggable panel on pages carrying `#nav-panel`.
pub fn mount(window: &Window, document: &Document) -> Result<Option<Rc<RefCell<PanelState>>>, JsValue> {
    let Some(el) = document.get_element_by_id("nav-panel") else {
        return Ok(None);
    };
    let element: HtmlElement = el
        .dyn_into()
        .map_err(|_| JsValue::from_str("#nav-panel is not an HTML element"))?;
    render_links(document, &element)?;
    let storage = LocalStorage::open(window);
    if !storage.is_available() {
        log("localStorage unavailable, panel position kept in memory");
    }
    let mut panel = PersistedPanel::load(storage, viewport_size(window));
    report_storage_error(&mut panel);
    place_element(&element, panel.position());

    let state = Rc::new(RefCell::new(PanelState {
        window: window.clone(),
        element,
        panel,
    }));
    attach(state.clone())?;
    Ok(Some(state))
}

fn report_storage_error(panel: &mut PersistedPanel<LocalStorage>) {
    if let Some(e) = panel.take_error() {
        warn(&format!("panel position not saved: {e}"));
    }
}

/// Fills the panel's `<nav>` from the link table.
fn render_links(document: &Document, panel: &HtmlElement) -> Result<(), JsValue> {
    let Some(nav) = panel.query_selector("nav")? else {
        return Ok(());
    };
    nav.set_inner_html("");
    for link in PANEL_LINKS {
        let a = document.create_element("a")?;
        a.set_attribute("href", link.target.path())?;
        a.set_text_content(Some(link.label));
        nav.append_child(&a)?;
    }
    Ok(())
}

/// Whether the press started on the drag handle.
fn on_handle(e: &PointerEvent) -> bool {
    e.target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(HANDLE_SELECTOR).ok().flatten())
        .is_some()
}

fn finish_drag(s: &mut PanelState, pointer: Option<PointerId>) {
    if s.panel.end_drag(pointer).is_some() {
        report_storage_error(&mut s.panel);
        if let Some(PointerId(id)) = pointer {
            let _ = s.element.release_pointer_capture(id);
        }
    }
}

fn attach(state: Rc<RefCell<PanelState>>) -> Result<(), JsValue> {
    let element = state.borrow().element.clone();
    let window = state.borrow().window.clone();
    {
        let st = state.clone();
        let pointerdown = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
            let mut s = st.borrow_mut();
            let handle = on_handle(&e);
            if s.panel.begin_drag(PointerId(e.pointer_id()), client_point(&e), handle) {
                e.prevent_default();
                let _ = s.element.set_pointer_capture(e.pointer_id());
            }
        }));
        element.add_event_listener_with_callback("pointerdown", pointerdown.as_ref().unchecked_ref())?;
        pointerdown.forget();
    }
    {
        let st = state.clone();
        let pointermove = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
            let mut s = st.borrow_mut();
            let pointer = PointerId(e.pointer_id());
            // Button went up somewhere we never heard about.
            if s.panel.is_dragging() && e.buttons() == 0 {
                finish_drag(&mut s, Some(pointer));
                return;
            }
            let viewport = viewport_size(&s.window);
            if let Some(p) = s.panel.drag_to(pointer, client_point(&e), viewport) {
                place_element(&s.element, p);
            }
        }));
        element.add_event_listener_with_callback("pointermove", pointermove.as_ref().unchecked_ref())?;
        pointermove.forget();
    }
    // Interrupted gestures keep the last clamped corner, same as a release.
    for kind in ["pointerup", "pointercancel", "lostpointercapture"] {
        let st = state.clone();
        let release = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
            let Ok(mut s) = st.try_borrow_mut() else {
                return;
            };
            finish_drag(&mut s, Some(PointerId(e.pointer_id())));
        }));
        element.add_event_listener_with_callback(kind, release.as_ref().unchecked_ref())?;
        release.forget();
    }
    {
        let st = state.clone();
        let onblur = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let Ok(mut s) = st.try_borrow_mut() else {
                return;
            };
            finish_drag(&mut s, None);
        }));
        window.add_event_listener_with_callback("blur", onblur.as_ref().unchecked_ref())?;
        onblur.forget();
    }
    {
        let st = state.clone();
        let onresize = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            let viewport = viewport_size(&s.window);
            let p = s.panel.fit_viewport(viewport);
            report_storage_error(&mut s.panel);
            place_element(&s.element, p);
        }));
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }
    Ok(())
}
