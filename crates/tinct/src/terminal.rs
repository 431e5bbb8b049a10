//! Terminal painting of themed runs.

use std::io::{self, Write};

use console::{Attribute, Style};
use tinct_renderer::ThemedRun;
use tinct_theme::{Color, StyleAttributes};

/// Map an RGB color to the nearest xterm 256-color palette index.
///
/// Grays use the 24-step grayscale ramp; everything else the 6x6x6 cube.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn ansi256(color: Color) -> u8 {
    let Color { r, g, b } = color;
    if r == g && g == b {
        return match r {
            0..8 => 16,
            249.. => 231,
            v => 232 + ((u16::from(v) - 8) * 24 / 247) as u8,
        };
    }
    16 + 36 * cube_level(r) + 6 * cube_level(g) + cube_level(b)
}

/// Index of the nearest cube level (0, 95, 135, 175, 215, 255).
fn cube_level(v: u8) -> u8 {
    match v {
        0..48 => 0,
        48..115 => 1,
        v => (v - 35) / 40,
    }
}

/// Console style for resolved attributes.
///
/// `base_background` is the document background; runs sharing it are
/// painted without one so the terminal's own background shows through.
pub(crate) fn style_for(attrs: &StyleAttributes, base_background: Option<Color>) -> Style {
    let mut style = Style::new().force_styling(true);
    if let Some(fg) = attrs.foreground {
        style = style.color256(ansi256(fg));
    }
    if let Some(bg) = attrs.background.filter(|bg| Some(*bg) != base_background) {
        style = style.on_color256(ansi256(bg));
    }
    if attrs.is_bold() {
        style = style.bold();
    }
    if attrs.is_italic() {
        style = style.italic();
    }
    if attrs.underline == Some(true) {
        style = style.underlined();
    }
    if attrs.strikethrough == Some(true) {
        style = style.attr(Attribute::StrikeThrough);
    }
    style
}

/// Write `runs` to `out`, styled when `colors` is set.
///
/// Each line is styled separately so attributes never bleed across line
/// breaks.
pub(crate) fn write_runs<W: Write>(
    out: &mut W,
    runs: &[ThemedRun],
    base_background: Option<Color>,
    colors: bool,
) -> io::Result<()> {
    for run in runs {
        if !colors {
            out.write_all(run.text.as_bytes())?;
            continue;
        }
        let style = style_for(&run.style, base_background);
        let mut lines = run.text.split('\n');
        if let Some(first) = lines.next() {
            write_styled(out, &style, first)?;
        }
        for line in lines {
            out.write_all(b"\n")?;
            write_styled(out, &style, line)?;
        }
    }
    Ok(())
}

fn write_styled<W: Write>(out: &mut W, style: &Style, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    write!(out, "{}", style.apply_to(text))
}
