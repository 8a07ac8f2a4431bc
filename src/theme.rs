use gpui::*;

#[cfg(target_os = "macos")]
use objc2::rc::Retained;
#[cfg(target_os = "macos")]
use objc2_app_kit::NSColor;

pub struct Theme {
    /// Window background
    pub base: Rgba,
    /// Toolbar and footer strips
    pub mantle: Rgba,
    pub surface: Rgba,
    pub hover: Rgba,
    pub border: Rgba,
    pub text: Rgba,
    pub subtext: Rgba,
    /// Editable cells stay white with black text on every platform
    pub field: Rgba,
    pub field_text: Rgba,
    pub selection: Rgba,
    pub error: Rgba,
    pub accent: Rgba,
}

impl Global for Theme {}

/// Read the user's accent colour from AppKit
#[cfg(target_os = "macos")]
fn system_accent_color() -> Rgba {
    let accent: Retained<NSColor> = NSColor::controlAccentColor();
    let srgb = objc2_app_kit::NSColorSpace::sRGBColorSpace();
    match accent.colorUsingColorSpace(srgb.as_ref()) {
        Some(color) => {
            let channel = |v: f64| ((v as f32) * 255.0) as u32;
            rgba(
                channel(color.redComponent()) << 24
                    | channel(color.greenComponent()) << 16
                    | channel(color.blueComponent()) << 8
                    | channel(color.alphaComponent()),
            )
        }
        None => gpui::blue().into(),
    }
}

#[cfg(not(target_os = "macos"))]
fn system_accent_color() -> Rgba {
    gpui::blue().into()
}

impl Theme {
    pub fn init(app: &mut App) {
        app.set_global(Theme::dark());
    }

    // Catppuccin Mocha for chrome, plain white for the cells
    pub fn dark() -> Theme {
        Theme {
            base: rgb(0x1e1e2e),
            mantle: rgb(0x181825),
            surface: rgb(0x313244),
            hover: rgb(0x45475a),
            border: rgb(0x585b70),
            text: rgb(0xcdd6f4),
            subtext: rgb(0xa6adc8),
            field: rgb(0xffffff),
            field_text: rgb(0x000000),
            selection: rgba(0x3311ff30),
            error: rgb(0xf38ba8),
            accent: system_accent_color(),
        }
    }
}
