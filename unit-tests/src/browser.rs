//! Runs the dashboard page script in an embedded JavaScript engine.

use boa_engine::{Context, JsValue, Source};
use serde::de::DeserializeOwned;

const DOM: &str = include_str!("dom.js");

/// The inline script of a rendered page, executed against a stub document.
///
/// `fetch` answers from the `responses` table (keyed by URL) and records every
/// call in `requests`; `setInterval` only records the timer.
pub struct ScriptedPage {
    context: Context,
}

impl ScriptedPage {
    /// Load `html`, answering `GET /api/pins` with `pins_json`.
    pub fn load(html: &str, pins_json: &str) -> Self {
        let mut page = Self {
            context: Context::default(),
        };
        page.run(DOM);
        page.run(&format!(
            "responses['/api/pins'] = {pins_json}; responses['/api/serial'] = [];"
        ));
        page.run(inline_script(html));
        page
    }

    /// Evaluate `code` and settle every pending promise.
    pub fn run(&mut self, code: &str) -> JsValue {
        let value = self
            .context
            .eval(Source::from_bytes(code))
            .unwrap_or_else(|e| panic!("script error: {e:?}"));
        self.context.run_jobs();
        value
    }

    /// Evaluate `expr` and decode its JSON form.
    pub fn query<T: DeserializeOwned>(&mut self, expr: &str) -> T {
        let value = self.run(&format!("JSON.stringify({expr})"));
        let json = value
            .as_string()
            .unwrap_or_else(|| panic!("`{expr}` is not serializable"))
            .to_std_string_escaped();
        serde_json::from_str(&json).unwrap_or_else(|e| panic!("`{expr}` gave {json}: {e}"))
    }
}

fn inline_script(html: &str) -> &str {
    let start = html.find("<script>").expect("page has no script") + "<script>".len();
    let end = start + html[start..].find("</script>").expect("script not closed");
    &html[start..end]
}
