//! Pre-paint boot script.
//!
//! The controller only runs once application code has loaded. To avoid a
//! flash of the wrong theme, the page embeds a tiny inline script in `<head>`
//! that reads the stored token and sets the light class before first paint.
//! This module renders that script from the same [`ThemeConfig`] the
//! controller uses, so the two never disagree about key or class names.

use minijinja::{context, AutoEscape, Environment};

use crate::config::ThemeConfig;
use crate::error::ScriptError;
use crate::theme::DefaultMode;

const BOOT_TEMPLATE: &str = "(function(){try{\
var t=localStorage.getItem({{ key }});\
{% if follow_system %}if(t!=={{ dark }}&&t!=={{ light }}){\
t=window.matchMedia&&window.matchMedia('(prefers-color-scheme: light)').matches?{{ light }}:{{ dark }};}\
{% endif %}\
var c=document.documentElement.classList;\
if(t==={{ light }}){c.add({{ light_class }});}else{c.remove({{ light_class }});}\
}catch(e){}})();";

/// Encodes `value` as a JavaScript string literal safe inside `<script>`.
fn js_literal(value: &str) -> Result<String, ScriptError> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Renders the inline boot script body.
///
/// Storage failures inside the browser are swallowed by the script's
/// `try`/`catch`, leaving the document in its default (dark) state.
///
/// # Example
///
/// ```rust
/// use folio_theme::{boot_script, ThemeConfig};
///
/// let script = boot_script(&ThemeConfig::default()).unwrap();
/// assert!(script.contains(r#"localStorage.getItem("theme")"#));
/// assert!(script.contains(r#"c.add("light-mode")"#));
/// ```
pub fn boot_script(config: &ThemeConfig) -> Result<String, ScriptError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template("boot", BOOT_TEMPLATE)?;
    let template = env.get_template("boot")?;

    Ok(template.render(context! {
        key => js_literal(&config.storage_key)?,
        light_class => js_literal(&config.light_class)?,
        dark => js_literal(crate::DARK_TOKEN)?,
        light => js_literal(crate::LIGHT_TOKEN)?,
        follow_system => config.fallback == DefaultMode::FollowSystem,
    })?)
}

/// Renders the boot script wrapped in a `<script>` element.
pub fn boot_script_tag(config: &ThemeConfig) -> Result<String, ScriptError> {
    Ok(format!("<script>{}</script>", boot_script(config)?))
}
