//! Built-in renderers selectable by name from the command line or config.

use gridrender_core::{Renderer, renderer};

pub const PRESET_NAMES: &[&str] = &["badge", "bold", "upper", "coords"];

/// Look up a preset renderer by (case-insensitive) name.
pub fn preset(name: &str) -> Option<Renderer> {
    let r = match name.to_ascii_lowercase().as_str() {
        "badge" => renderer(|ctx| {
            ctx.element.add_class("badge");
            ctx.element
                .set_content(format!("<span class=\"badge\">{}</span>", ctx.value));
            Ok(())
        }),
        "bold" => renderer(|ctx| {
            ctx.element.set_content(format!("<b>{}</b>", ctx.value));
            Ok(())
        }),
        "upper" => renderer(|ctx| {
            ctx.element.set_content(ctx.value.to_string().to_uppercase());
            Ok(())
        }),
        "coords" => renderer(|ctx| {
            ctx.element.set_content(format!("{},{}", ctx.x, ctx.y));
            Ok(())
        }),
        _ => return None,
    };
    Some(r)
}
