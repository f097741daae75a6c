use super::display::Display;

pub const LIT: char = '@';
pub const UNLIT: char = ' ';

/// Renders the framebuffer as text, one line per pixel row.
pub fn render(display: &Display) -> String {
    display
        .pixels()
        .iter()
        .map(|row| {
            row.iter()
                .map(|lit| if *lit { LIT } else { UNLIT })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::basics::{Address, SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::emulator::memory::Memory;

    #[test]
    fn test_render_shape() {
        let text = render(&Display::new());
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), SCREEN_HEIGHT);
        assert!(lines.iter().all(|l| l.len() == SCREEN_WIDTH));
        assert!(text.chars().all(|c| c == UNLIT || c == '\n'));
    }

    #[test]
    fn test_render_glyph() {
        let memory = Memory::new();
        let mut display = Display::new();
        // glyph "1"
        display.draw(0, 0, Address(5), 5, &memory);
        let text = render(&display);
        let lines: Vec<&str> = text.split('\n').take(5).map(|l| &l[..4]).collect();
        assert_eq!(lines, vec!["  @ ", " @@ ", "  @ ", "  @ ", " @@@"]);
    }
}
