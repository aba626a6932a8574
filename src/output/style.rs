//! Cell formats for the table report
//!
//! Plain value types: a format is just its field values, and cloning one
//! yields an independent copy. `Clone::clone_from` overwrites a format in
//! place from another one.

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const WHITE: Rgb = Rgb(0xFFFFFF);
    pub const DARK_BLUE: Rgb = Rgb(0x1F4E78);
    pub const LIGHT_GREY: Rgb = Rgb(0xD9D9D9);
}

/// Line weight of one cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderLine {
    #[default]
    None,
    Thin,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Border {
    pub line: BorderLine,
    pub color: Rgb,
}

impl Border {
    pub fn thin() -> Self {
        Self {
            line: BorderLine::Thin,
            color: Rgb::BLACK,
        }
    }

    pub fn medium() -> Self {
        Self {
            line: BorderLine::Medium,
            color: Rgb::BLACK,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.line != BorderLine::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    pub top: Border,
    pub bottom: Border,
    pub left: Border,
    pub right: Border,
}

impl Borders {
    pub fn all(border: Border) -> Self {
        Self {
            top: border,
            bottom: border,
            left: border,
            right: border,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Font {
    pub bold: bool,
    /// `None` keeps the document's default text color.
    pub color: Option<Rgb>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPattern {
    #[default]
    None,
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fill {
    pub pattern: FillPattern,
    pub color: Rgb,
}

impl Fill {
    pub fn solid(color: Rgb) -> Self {
        Self {
            pattern: FillPattern::Solid,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    General,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    pub horizontal: HorizontalAlign,
}

/// Complete format of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellFormat {
    pub borders: Borders,
    pub font: Font,
    pub fill: Fill,
    pub alignment: Alignment,
}

impl CellFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// White borders, dark solid fill, bold white centered text.
    pub fn header() -> Self {
        Self {
            borders: Borders::all(Border::thin().with_color(Rgb::WHITE)),
            font: Font {
                bold: true,
                color: Some(Rgb::WHITE),
            },
            fill: Fill::solid(Rgb::DARK_BLUE),
            alignment: Alignment {
                horizontal: HorizontalAlign::Center,
            },
        }
    }

    /// Bold text on a shaded fill, edged top and left.
    pub fn directory() -> Self {
        Self::file()
            .with_font(Font {
                bold: true,
                color: None,
            })
            .with_fill(Fill::solid(Rgb::LIGHT_GREY))
    }

    /// Plain text edged top and left.
    pub fn file() -> Self {
        Self::new()
            .with_top(Border::thin())
            .with_left(Border::thin())
    }

    /// Left edge only; draws the line from a directory down to its subtree.
    pub fn connector() -> Self {
        Self::new().with_left(Border::thin())
    }

    /// Top edge only; closes the bottom of the table.
    pub fn footer() -> Self {
        Self::new().with_top(Border::thin())
    }

    /// Left edge only, heavier; closes the right side of the table.
    pub fn closing() -> Self {
        Self::new().with_left(Border::medium())
    }

    pub fn with_top(mut self, border: Border) -> Self {
        self.borders.top = border;
        self
    }

    pub fn with_left(mut self, border: Border) -> Self {
        self.borders.left = border;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_preset() {
        let header = CellFormat::header();
        assert!(header.font.bold);
        assert_eq!(header.font.color, Some(Rgb::WHITE));
        assert_eq!(header.fill.pattern, FillPattern::Solid);
        assert_eq!(header.fill.color, Rgb::DARK_BLUE);
        assert_eq!(header.alignment.horizontal, HorizontalAlign::Center);
        assert_eq!(header.borders.left.color, Rgb::WHITE);
        assert!(header.borders.bottom.is_visible());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = CellFormat::directory();
        let mut copy = original.clone();
        copy.font.bold = false;
        copy.borders.top = Border::default();
        assert!(original.font.bold);
        assert!(original.borders.top.is_visible());
        assert_ne!(original, copy);
    }

    #[test]
    fn test_clone_from_overwrites_every_field() {
        let mut target = CellFormat::header();
        target.clone_from(&CellFormat::connector());
        assert_eq!(target, CellFormat::connector());
        assert!(!target.font.bold);
        assert_eq!(target.fill, Fill::default());
    }

    #[test]
    fn test_row_presets_differ_by_kind() {
        let dir = CellFormat::directory();
        let file = CellFormat::file();
        assert!(dir.font.bold && !file.font.bold);
        assert_eq!(dir.borders, file.borders);
        assert!(file.borders.top.is_visible() && file.borders.left.is_visible());
        assert!(!file.borders.right.is_visible() && !file.borders.bottom.is_visible());
        assert_ne!(CellFormat::connector(), CellFormat::new());
    }
}
