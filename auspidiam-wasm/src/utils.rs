use auspidiam_core::{Point, Rect, Size};
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement, MouseEvent, Window};

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

pub fn warn(s: &str) {
    web_sys::console::warn_1(&JsValue::from_str(s));
}

/// `innerWidth`/`innerHeight`; zero when the window cannot report them.
pub fn viewport_size(window: &Window) -> Size {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(w, h)
}

/// Bounding box of an element in viewport coordinates.
pub fn client_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

pub fn client_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

/// Moves an element so its left/top sit at `p`.
pub fn place_element(el: &HtmlElement, p: Point) {
    let style = el.style();
    let _ = style.set_property("left", &format!("{:.1}px", p.x));
    let _ = style.set_property("top", &format!("{:.1}px", p.y));
}

pub fn set_visible(el: &HtmlElement, visible: bool) {
    let value = if visible { "visible" } else { "hidden" };
    let _ = el.style().set_property("visibility", value);
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}
