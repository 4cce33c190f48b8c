//! Font description and face selection

/// A font family
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Family {
    /// The default sans-serif family of the database
    #[default]
    SansSerif,
    /// The default serif family of the database
    Serif,
    /// The default monospace family of the database
    Monospace,
    /// A family selected by name
    Named(String),
}

impl Family {
    /// The CSS name of the family
    pub fn css_name(&self) -> &str {
        match self {
            Family::SansSerif => "sans-serif",
            Family::Serif => "serif",
            Family::Monospace => "monospace",
            Family::Named(name) => name,
        }
    }
}

/// Font weight, as in CSS (400 is normal, 700 is bold)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Weight(pub u16);

impl Weight {
    pub const NORMAL: Weight = Weight(400);
    pub const BOLD: Weight = Weight(700);
}

impl Default for Weight {
    fn default() -> Self {
        Weight::NORMAL
    }
}

/// Font selection properties
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Font {
    family: Family,
    weight: Weight,
    italic: bool,
}

impl Font {
    pub fn new(family: Family) -> Self {
        Font {
            family,
            ..Default::default()
        }
    }

    pub fn family(&self) -> &Family {
        &self.family
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn with_weight(self, weight: Weight) -> Self {
        Font { weight, ..self }
    }

    pub fn with_italic(self, italic: bool) -> Self {
        Font { italic, ..self }
    }

    /// Select the best matching face in the database
    pub fn select_face(&self, db: &fontdb::Database) -> Option<fontdb::ID> {
        let family = match &self.family {
            Family::SansSerif => fontdb::Family::SansSerif,
            Family::Serif => fontdb::Family::Serif,
            Family::Monospace => fontdb::Family::Monospace,
            Family::Named(name) => fontdb::Family::Name(name),
        };
        let style = if self.italic {
            fontdb::Style::Italic
        } else {
            fontdb::Style::Normal
        };
        db.query(&fontdb::Query {
            families: &[family],
            weight: fontdb::Weight(self.weight.0),
            stretch: fontdb::Stretch::Normal,
            style,
        })
    }
}

impl From<Family> for Font {
    fn from(family: Family) -> Self {
        Font::new(family)
    }
}
