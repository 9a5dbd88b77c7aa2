use std::cell::RefCell;
use std::rc::Rc;

use auspidiam_core::{
    place, DragState, LayoutError, LinkId, LinkMap, NavConfig, PointerId, ReleaseAction,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, MouseEvent, PointerEvent, Window};

use crate::config::PageOptions;
use crate::state::HomeState;
use crate::utils::{client_point, client_rect, log, place_element, set_visible, viewport_size, warn};

/// Animation frames to wait for the title to get a size before giving up
/// until the next resize.
const MAX_LAYOUT_FRAMES: u32 = 120;

fn find_link(document: &Document, id: LinkId) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(&format!("link-{}", id.key()))
        .ok_or_else(|| JsValue::from_str(&format!("#link-{} not found", id.key())))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("link is not an HTML element"))
}

/// Mounts the label controller if the page carries a title and all three
/// links. Returns `None` on pages without them.
pub fn mount(
    window: &Window,
    document: &Document,
    options: &PageOptions,
) -> Result<Option<Rc<RefCell<HomeState>>>, JsValue> {
    let Some(title) = document.get_element_by_id("title") else {
        return Ok(None);
    };
    let links = match LinkMap::try_from_fn(|id| find_link(document, id)) {
        Ok(links) => links,
        Err(e) => {
            warn(&format!("title present but links missing: {:?}", e));
            return Ok(None);
        }
    };
    for (id, el) in links.iter() {
        let link = id.descriptor();
        el.set_text_content(Some(link.label));
        el.set_attribute("href", link.target.path())?;
        set_visible(el, false);
    }
    let seed = options
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64);
    let config: NavConfig = options.preset.config();
    log(&format!("home nav: variant '{}', seed {}", options.preset, seed));

    let state = Rc::new(RefCell::new(HomeState {
        window: window.clone(),
        title,
        links,
        config,
        controller: config.controller(),
        rng: SmallRng::seed_from_u64(seed),
        suppress_click: false,
    }));
    attach_links(state.clone())?;
    attach_window(state.clone())?;
    schedule_layout(state.clone(), MAX_LAYOUT_FRAMES);
    Ok(Some(state))
}

/// Measures the title and viewport and runs placement again.
pub fn relayout(state: &mut HomeState) -> Result<(), LayoutError> {
    let focal = client_rect(&state.title);
    let viewport = viewport_size(&state.window);
    let placement = place(focal, viewport, &state.config.placement, &mut state.rng)?;
    if placement.used_fallback() {
        let crowded: Vec<&str> = placement
            .fallbacks
            .iter()
            .filter(|(_, f)| **f)
            .map(|(id, _)| id.key())
            .collect();
        log(&format!("placement exhausted for {}", crowded.join(", ")));
    }
    if state.controller.apply_placement(placement) {
        render(state);
    } else {
        log("layout queued until the drag ends");
    }
    Ok(())
}

fn schedule_layout(state: Rc<RefCell<HomeState>>, frames_left: u32) {
    let window = state.borrow().window.clone();
    let cb = Closure::once_into_js(move || {
        let result = relayout(&mut state.borrow_mut());
        match result {
            Ok(()) => {}
            Err(_) if frames_left > 0 => schedule_layout(state, frames_left - 1),
            Err(e) => log(&format!("home nav hidden: {e}")),
        }
    });
    if window.request_animation_frame(cb.unchecked_ref()).is_err() {
        warn("requestAnimationFrame unavailable");
    }
}

fn render(state: &HomeState) {
    let Some(positions) = state.controller.positions() else {
        return;
    };
    for (id, el) in state.links.iter() {
        place_element(el, positions[id]);
        set_visible(el, true);
    }
}

fn render_link(state: &HomeState, id: LinkId) {
    if let Some(p) = state.controller.position(id) {
        place_element(&state.links[id], p);
    }
}

fn set_grabbed(el: &HtmlElement, grabbed: bool) {
    let _ = el.class_list().toggle_with_force("dragging", grabbed);
}

fn attach_links(state: Rc<RefCell<HomeState>>) -> Result<(), JsValue> {
    let links = state.borrow().links.clone();
    for (id, el) in links.iter() {
        // Native link dragging would hijack the pointer stream.
        el.set_draggable(false);
        {
            let ondragstart = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
                e.prevent_default();
            }));
            el.add_event_listener_with_callback("dragstart", ondragstart.as_ref().unchecked_ref())?;
            ondragstart.forget();
        }
        {
            let st = state.clone();
            let target = el.clone();
            let pointerdown =
                Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    let mut s = st.borrow_mut();
                    let pointer = PointerId(e.pointer_id());
                    if s.controller.pointer_down(id, pointer, client_point(&e)) {
                        s.suppress_click = false;
                        let _ = target.set_pointer_capture(e.pointer_id());
                        set_grabbed(&target, true);
                    }
                }));
            el.add_event_listener_with_callback("pointerdown", pointerdown.as_ref().unchecked_ref())?;
            pointerdown.forget();
        }
        {
            let st = state.clone();
            let target = el.clone();
            let lost = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
                let Ok(mut s) = st.try_borrow_mut() else {
                    return;
                };
                if s.controller.cancel(Some(PointerId(e.pointer_id()))).is_some() {
                    set_grabbed(&target, false);
                    render(&s);
                }
            }));
            el.add_event_listener_with_callback("lostpointercapture", lost.as_ref().unchecked_ref())?;
            lost.forget();
        }
        {
            let st = state.clone();
            let onclick = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
                let mut s = st.borrow_mut();
                if s.suppress_click {
                    e.prevent_default();
                    s.suppress_click = false;
                }
            }));
            el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
            onclick.forget();
        }
    }
    Ok(())
}

fn attach_window(state: Rc<RefCell<HomeState>>) -> Result<(), JsValue> {
    let window = state.borrow().window.clone();
    {
        let st = state.clone();
        let pointermove = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
            let mut s = st.borrow_mut();
            let active = match s.controller.state() {
                DragState::Dragging(session) => session.link,
                DragState::Idle => return,
            };
            if s
                .controller
                .pointer_move(PointerId(e.pointer_id()), client_point(&e))
                .is_some()
            {
                e.prevent_default();
                render_link(&s, active);
            }
        }));
        window.add_event_listener_with_callback("pointermove", pointermove.as_ref().unchecked_ref())?;
        pointermove.forget();
    }
    {
        let st = state.clone();
        let pointerup = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
            let mut s = st.borrow_mut();
            let active = match s.controller.state() {
                DragState::Dragging(session) => session.link,
                DragState::Idle => return,
            };
            let label = client_rect(&s.links[active]).size();
            let Some(release) =
                s.controller
                    .pointer_up(PointerId(e.pointer_id()), client_point(&e), label)
            else {
                return;
            };
            // Capture is released implicitly after pointerup.
            set_grabbed(&s.links[active], false);
            render(&s);
            match release.action {
                ReleaseAction::FollowLink => s.suppress_click = false,
                ReleaseAction::SuppressClick => s.suppress_click = true,
                ReleaseAction::Navigate(route) => {
                    s.suppress_click = true;
                    log(&format!("{} dropped on title, opening {}", release.link, route));
                    if let Err(err) = s.window.location().set_href(route.path()) {
                        warn(&format!("navigation to {} failed: {:?}", route, err));
                    }
                }
            }
        }));
        window.add_event_listener_with_callback("pointerup", pointerup.as_ref().unchecked_ref())?;
        pointerup.forget();
    }
    {
        let st = state.clone();
        let pointercancel =
            Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
                let mut s = st.borrow_mut();
                if let Some(id) = s.controller.cancel(Some(PointerId(e.pointer_id()))) {
                    set_grabbed(&s.links[id], false);
                    render(&s);
                }
            }));
        window.add_event_listener_with_callback("pointercancel", pointercancel.as_ref().unchecked_ref())?;
        pointercancel.forget();
    }
    {
        let st = state.clone();
        let onblur = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            if let Some(id) = s.controller.cancel(None) {
                set_grabbed(&s.links[id], false);
                render(&s);
            }
        }));
        window.add_event_listener_with_callback("blur", onblur.as_ref().unchecked_ref())?;
        onblur.forget();
    }
    {
        // Touch drags end without a click, so a keyboard activation may be
        // the next click the links see.
        let st = state.clone();
        let onkeydown = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Ok(mut s) = st.try_borrow_mut() {
                s.suppress_click = false;
            }
        }));
        window.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }
    {
        let st = state.clone();
        let onresize = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let result = relayout(&mut st.borrow_mut());
            if let Err(e) = result {
                log(&format!("resize layout skipped: {e}"));
            }
        }));
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }
    Ok(())
}
