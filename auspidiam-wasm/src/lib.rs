//! Browser binding for the Auspidiam navigation widgets.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod home;
pub mod panel;
pub mod state;
pub mod storage;
pub mod utils;

use config::PageOptions;
use state::STATE;
use utils::{log, warn};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let search = window.location().search().unwrap_or_default();
    let (options, warnings) = PageOptions::from_query(&search);
    for w in &warnings {
        warn(w);
    }

    let home = home::mount(&window, &document, &options)?;
    let panel = panel::mount(&window, &document)?;
    if home.is_none() && panel.is_none() {
        log("no navigation widgets on this page");
    }
    STATE.with(|st| {
        let mut widgets = st.borrow_mut();
        widgets.home = home;
        widgets.panel = panel;
    });
    Ok(())
}

/// Draws a fresh arrangement for the home page labels. Returns `false` when
/// there is nothing to lay out yet.
#[wasm_bindgen]
pub fn reshuffle() -> bool {
    let home = STATE.with(|st| st.borrow().home.clone());
    let Some(home) = home else {
        return false;
    };
    let result = home::relayout(&mut home.borrow_mut());
    match result {
        Ok(()) => true,
        Err(e) => {
            log(&format!("reshuffle skipped: {e}"));
            false
        }
    }
}
