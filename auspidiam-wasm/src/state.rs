use std::cell::RefCell;
use std::rc::Rc;

use auspidiam_core::{LinkMap, NavConfig, NavController, PersistedPanel};
use rand::rngs::SmallRng;
use web_sys::{Element, HtmlElement, Window};

use crate::storage::LocalStorage;

/// Home page labels and the gesture state driving them.
pub struct HomeState {
    pub window: Window,
    pub title: Element,
    pub links: LinkMap<HtmlElement>,
    pub config: NavConfig,
    pub controller: NavController,
    pub rng: SmallRng,
    /// Set by a release that must not turn into a click. Cleared by the
    /// next press, click or key press.
    pub suppress_click: bool,
}

pub struct PanelState {
    pub window: Window,
    pub element: HtmlElement,
    pub panel: PersistedPanel<LocalStorage>,
}

/// Mounted widgets, shared across the wasm callbacks.
#[derive(Default)]
pub struct Widgets {
    pub home: Option<Rc<RefCell<HomeState>>>,
    pub panel: Option<Rc<RefCell<PanelState>>>,
}

thread_local! {
    pub static STATE: RefCell<Widgets> = RefCell::new(Widgets::default());
}
