//! Redraw decisions and row rendering for the two-line status screen.

use crate::config;
use crate::menu::Entry;
use core::fmt::Write as _;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

/// Which screen regions need repainting this tick.
#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct Redraw(u8);

impl Redraw {
    pub const NONE: Redraw = Redraw(0);
    pub const FREQUENCY: Redraw = Redraw(1 << 0);
    pub const VOLUME: Redraw = Redraw(1 << 1);
    pub const ALL: Redraw = Redraw(Self::FREQUENCY.0 | Self::VOLUME.0);

    pub fn contains(self, other: Redraw) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for Redraw {
    type Output = Redraw;

    fn bitor(self, rhs: Redraw) -> Redraw {
        Redraw(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for Redraw {
    fn bitor_assign(&mut self, rhs: Redraw) {
        self.0 |= rhs.0;
    }
}

/// Everything the presenter needs to paint a tick.
#[derive(Clone, Copy)]
pub struct View {
    pub freq_hz: u32,
    pub volume: u8,
    pub active: Entry,
    pub dark: bool,
}

/// Foreground/background pair for one row. XOR-ing darkness with "is this the
/// active entry" renders the active row inverted relative to the rest of the
/// screen in either mode.
pub fn palette(dark: bool, active: bool) -> (BinaryColor, BinaryColor) {
    if dark != active {
        (BinaryColor::On, BinaryColor::Off)
    } else {
        (BinaryColor::Off, BinaryColor::On)
    }
}

/// Repaint the requested regions. `clear` wipes the whole screen to the
/// current background first (used on a light-mode transition).
pub fn refresh<D>(display: &mut D, view: &View, what: Redraw, clear: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if clear {
        let (_, background) = palette(view.dark, false);
        display.clear(background)?;
    }

    if what.contains(Redraw::FREQUENCY) {
        let mut text: String<16> = String::new();
        let _ = write!(text, "Freq: {}", view.freq_hz);
        let colors = palette(view.dark, view.active == Entry::Frequency);
        draw_row(display, config::screen::FREQ_ROW_Y, &text, colors)?;
    }

    if what.contains(Redraw::VOLUME) {
        let mut text: String<16> = String::new();
        let _ = write!(text, "Vol: {}", view.volume);
        let colors = palette(view.dark, view.active == Entry::Volume);
        draw_row(display, config::screen::VOLUME_ROW_Y, &text, colors)?;
    }

    Ok(())
}

fn draw_row<D>(
    display: &mut D,
    y: i32,
    text: &str,
    (foreground, background): (BinaryColor, BinaryColor),
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(
        Point::new(0, y),
        Size::new(config::screen::WIDTH, config::screen::ROW_HEIGHT),
    )
    .into_styled(PrimitiveStyle::with_fill(background))
    .draw(display)?;

    let style = MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(foreground)
        .background_color(background)
        .build();
    Text::with_baseline(
        text,
        Point::new(config::screen::TEXT_X, y + config::screen::TEXT_PAD_Y),
        style,
        Baseline::Top,
    )
    .draw(display)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    const WIDTH: u32 = config::screen::WIDTH;
    const HEIGHT: u32 = config::screen::HEIGHT;

    struct Frame {
        pixels: Vec<BinaryColor>,
    }

    impl Frame {
        fn new() -> Self {
            Self {
                pixels: vec![BinaryColor::Off; (WIDTH * HEIGHT) as usize],
            }
        }

        fn get(&self, x: u32, y: u32) -> BinaryColor {
            self.pixels[(y * WIDTH + x) as usize]
        }

        fn lit_in_rows(&self, y_range: core::ops::Range<u32>) -> usize {
            y_range
                .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
                .filter(|&(x, y)| self.get(x, y) == BinaryColor::On)
                .count()
        }
    }

    impl OriginDimensions for Frame {
        fn size(&self) -> Size {
            Size::new(WIDTH, HEIGHT)
        }
    }

    impl DrawTarget for Frame {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
        where
            I: IntoIterator<Item = Pixel<BinaryColor>>,
        {
            for Pixel(point, color) in pixels {
                if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                    self.pixels[(point.y as u32 * WIDTH + point.x as u32) as usize] = color;
                }
            }
            Ok(())
        }
    }

    fn view(active: Entry, dark: bool) -> View {
        View {
            freq_hz: 440,
            volume: 10,
            active,
            dark,
        }
    }

    #[test]
    fn palette_inverts_the_active_row_in_both_modes() {
        assert_eq!(palette(false, false), (BinaryColor::Off, BinaryColor::On));
        assert_eq!(palette(false, true), (BinaryColor::On, BinaryColor::Off));
        assert_eq!(palette(true, false), (BinaryColor::On, BinaryColor::Off));
        assert_eq!(palette(true, true), (BinaryColor::Off, BinaryColor::On));
    }

    #[test]
    fn partial_redraw_leaves_the_other_row_untouched() {
        let mut frame = Frame::new();
        refresh(
            &mut frame,
            &view(Entry::Volume, false),
            Redraw::FREQUENCY,
            false,
        )
        .unwrap();
        // frequency row painted in the light palette
        assert!(frame.lit_in_rows(0..config::screen::ROW_HEIGHT) > 0);
        // volume row never drawn
        assert_eq!(frame.lit_in_rows(config::screen::ROW_HEIGHT..2 * config::screen::ROW_HEIGHT), 0);
    }

    #[test]
    fn active_entry_renders_inverted() {
        let mut frame = Frame::new();
        refresh(&mut frame, &view(Entry::Frequency, false), Redraw::ALL, true).unwrap();
        // active frequency row: dark background; inactive volume row: light
        assert_eq!(frame.get(WIDTH - 1, 0), BinaryColor::Off);
        assert_eq!(
            frame.get(WIDTH - 1, config::screen::VOLUME_ROW_Y as u32 + 1),
            BinaryColor::On
        );
        // rest of the screen cleared to the light background
        assert_eq!(frame.get(WIDTH - 1, HEIGHT - 1), BinaryColor::On);
    }

    #[test]
    fn dark_transition_inverts_both_rows_and_the_background() {
        let mut frame = Frame::new();
        refresh(&mut frame, &view(Entry::Frequency, true), Redraw::ALL, true).unwrap();
        assert_eq!(frame.get(WIDTH - 1, 0), BinaryColor::On);
        assert_eq!(
            frame.get(WIDTH - 1, config::screen::VOLUME_ROW_Y as u32 + 1),
            BinaryColor::Off
        );
        assert_eq!(frame.get(WIDTH - 1, HEIGHT - 1), BinaryColor::Off);
    }

    #[test]
    fn redraw_flags_combine() {
        let mut flags = Redraw::NONE;
        assert!(flags.is_empty());
        flags |= Redraw::FREQUENCY;
        assert!(flags.contains(Redraw::FREQUENCY));
        assert!(!flags.contains(Redraw::VOLUME));
        assert!(!flags.contains(Redraw::ALL));
        flags |= Redraw::VOLUME;
        assert!(flags.contains(Redraw::ALL));
    }
}
