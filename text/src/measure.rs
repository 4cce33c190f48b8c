use std::sync::Arc;

use ttf_parser as ttf;

use crate::{Error, Font, Measure, TextMetrics, fontdb};

/// Measures text by shaping it with rustybuzz, using faces of a font database
#[derive(Debug, Clone)]
pub struct ShapingMeasure {
    db: Arc<fontdb::Database>,
}

impl ShapingMeasure {
    pub fn new(db: Arc<fontdb::Database>) -> Self {
        ShapingMeasure { db }
    }

    /// Build a measure from the fonts installed on the system
    #[cfg(feature = "system-fonts")]
    pub fn system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("loaded {} system font faces", db.len());
        ShapingMeasure::new(Arc::new(db))
    }

    pub fn fontdb(&self) -> &Arc<fontdb::Database> {
        &self.db
    }
}

impl Measure for ShapingMeasure {
    fn measure(&self, text: &str, font: &Font, font_size: f32) -> Result<TextMetrics, Error> {
        let face_id = font
            .select_face(&self.db)
            .ok_or_else(|| Error::NoSuchFont(font.clone()))?;

        self.db
            .with_face_data(face_id, |data, index| -> Result<_, Error> {
                let face = ttf::Face::parse(data, index)?;
                let scale = font_size / face.units_per_em() as f32;
                let ascent = face.ascender() as f32 * scale;
                let descent = -(face.descender() as f32) * scale;

                if text.is_empty() {
                    return Ok(TextMetrics {
                        width: 0.0,
                        ascent,
                        descent,
                    });
                }

                let hbface = rustybuzz::Face::from_face(face);
                let mut buffer = rustybuzz::UnicodeBuffer::new();
                buffer.push_str(text);
                if let Some(dir) = crate::script_dir(text) {
                    buffer.set_direction(dir.into());
                }
                buffer.guess_segment_properties();

                let shape = rustybuzz::shape(&hbface, &[], buffer);
                let advance: i32 = shape.glyph_positions().iter().map(|p| p.x_advance).sum();

                Ok(TextMetrics {
                    width: advance as f32 * scale,
                    ascent,
                    descent,
                })
            })
            .ok_or_else(|| Error::NoSuchFont(font.clone()))?
    }
}

/// Measures text with a fixed advance for every character.
///
/// All values are expressed relatively to the font size.
/// This is mostly useful for headless layout and for tests, where no font file is at hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasure {
    pub advance: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl Default for FixedMeasure {
    fn default() -> Self {
        FixedMeasure {
            advance: 0.5,
            ascent: 0.8,
            descent: 0.2,
        }
    }
}

impl Measure for FixedMeasure {
    fn measure(&self, text: &str, _font: &Font, font_size: f32) -> Result<TextMetrics, Error> {
        Ok(TextMetrics {
            width: text.chars().count() as f32 * self.advance * font_size,
            ascent: self.ascent * font_size,
            descent: self.descent * font_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_measure() {
        let m = FixedMeasure::default();
        let font = Font::default();
        let tm = m.measure("42", &font, 16.0).unwrap();
        assert_eq!(tm.width, 16.0);
        assert_eq!(tm.height(), 16.0);

        let tm = m.measure("≠", &font, 10.0).unwrap();
        assert_eq!(tm.width, 5.0);

        let tm = m.measure("", &font, 10.0).unwrap();
        assert_eq!(tm.width, 0.0);
    }

    fn dejavu_measure() -> ShapingMeasure {
        let mut db = fontdb::Database::new();
        db.load_font_data(include_bytes!("fonts/DejaVuSans.ttf").to_vec());
        db.set_sans_serif_family("DejaVu Sans");
        ShapingMeasure::new(Arc::new(db))
    }

    #[test]
    fn shaping_measure_with_face() {
        let m = dejavu_measure();
        let sans = Font::default();
        let named = Font::new(crate::Family::Named("DejaVu Sans".to_string()));

        let zero = m.measure("0", &sans, 16.0).unwrap();
        assert!(zero.width > 0.0);
        assert!(zero.ascent > zero.descent);
        assert!(zero.descent > 0.0);
        assert!(zero.height() < 2.0 * 16.0);

        // digits have no kerning
        let zeros = m.measure("00", &sans, 16.0).unwrap();
        assert!((zeros.width - 2.0 * zero.width).abs() < 1e-3);

        let big = m.measure("0", &sans, 32.0).unwrap();
        assert!((big.width - 2.0 * zero.width).abs() < 1e-3);
        assert!((big.ascent - 2.0 * zero.ascent).abs() < 1e-3);

        let narrow = m.measure("ii", &named, 16.0).unwrap();
        let wide = m.measure("MM", &named, 16.0).unwrap();
        assert!(narrow.width < wide.width);

        let empty = m.measure("", &sans, 16.0).unwrap();
        assert_eq!(empty.width, 0.0);
        assert_eq!(empty.ascent, zero.ascent);
    }

    #[test]
    fn shaping_measure_unknown_family() {
        let m = dejavu_measure();
        let font = Font::new(crate::Family::Named("No Such Family".to_string()));
        let res = m.measure("x", &font, 12.0);
        assert!(matches!(res, Err(Error::NoSuchFont(_))));
    }

    #[test]
    fn shaping_measure_without_face() {
        let m = ShapingMeasure::new(Arc::new(fontdb::Database::new()));
        let res = m.measure("x", &Font::default(), 12.0);
        assert!(matches!(res, Err(Error::NoSuchFont(_))));
    }
}
