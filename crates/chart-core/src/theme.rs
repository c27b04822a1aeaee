// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming plus the demographic and party palettes.

use std::str::FromStr;

use crate::scene::Rgba;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub grid: Rgba,
    pub axis_line: Rgba,
    pub axis_label: Rgba,
    pub tick: Rgba,
    pub placeholder: Rgba,
    pub box_fill: Rgba,
    pub box_stroke: Rgba,
    pub median: Rgba,
    pub whisker: Rgba,
    pub mean_marker: Rgba,
    pub reference_marker: Rgba,
    pub trendline: Rgba,
    pub bracket: Rgba,
    pub highlight: Rgba,
    pub tooltip_fill: Rgba,
    pub tooltip_text: Rgba,
    /// Fallback series colors for ids that are not a known group.
    pub palette: &'static [Rgba],
}

const DARK_PALETTE: &[Rgba] = &[
    Rgba::rgb(64, 160, 255),
    Rgba::rgb(255, 159, 64),
    Rgba::rgb(40, 200, 120),
    Rgba::rgb(220, 80, 80),
    Rgba::rgb(170, 120, 255),
    Rgba::rgb(240, 210, 70),
    Rgba::rgb(80, 210, 220),
    Rgba::rgb(230, 120, 190),
];

const LIGHT_PALETTE: &[Rgba] = &[
    Rgba::rgb(32, 120, 200),
    Rgba::rgb(230, 120, 20),
    Rgba::rgb(20, 160, 90),
    Rgba::rgb(200, 60, 60),
    Rgba::rgb(120, 80, 200),
    Rgba::rgb(190, 160, 20),
    Rgba::rgb(20, 150, 160),
    Rgba::rgb(200, 80, 150),
];

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            grid: Rgba::rgb(40, 40, 45),
            axis_line: Rgba::rgb(180, 180, 190),
            axis_label: Rgba::rgb(235, 235, 245),
            tick: Rgba::rgb(150, 150, 160),
            placeholder: Rgba::rgb(110, 110, 120),
            box_fill: Rgba::argb(160, 64, 160, 255),
            box_stroke: Rgba::rgb(140, 200, 255),
            median: Rgba::rgb(255, 255, 255),
            whisker: Rgba::rgb(180, 180, 190),
            mean_marker: Rgba::rgb(255, 230, 70),
            reference_marker: Rgba::rgb(255, 90, 90),
            trendline: Rgba::rgb(64, 160, 255),
            bracket: Rgba::rgb(200, 200, 210),
            highlight: Rgba::argb(48, 255, 230, 70),
            tooltip_fill: Rgba::argb(235, 32, 32, 36),
            tooltip_text: Rgba::rgb(235, 235, 245),
            palette: DARK_PALETTE,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(250, 250, 252),
            grid: Rgba::rgb(230, 230, 235),
            axis_line: Rgba::rgb(60, 60, 70),
            axis_label: Rgba::rgb(20, 20, 30),
            tick: Rgba::rgb(100, 100, 110),
            placeholder: Rgba::rgb(150, 150, 160),
            box_fill: Rgba::argb(140, 32, 120, 200),
            box_stroke: Rgba::rgb(20, 80, 150),
            median: Rgba::rgb(20, 20, 30),
            whisker: Rgba::rgb(60, 60, 70),
            mean_marker: Rgba::rgb(230, 120, 20),
            reference_marker: Rgba::rgb(200, 30, 30),
            trendline: Rgba::rgb(32, 120, 200),
            bracket: Rgba::rgb(60, 60, 70),
            highlight: Rgba::argb(56, 30, 120, 240),
            tooltip_fill: Rgba::argb(240, 255, 255, 255),
            tooltip_text: Rgba::rgb(20, 20, 30),
            palette: LIGHT_PALETTE,
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Rgba::rgb(0x00, 0x00, 0x00),
            grid: Rgba::rgb(0x22, 0x22, 0x22),
            axis_line: Rgba::rgb(0xff, 0xff, 0xff),
            axis_label: Rgba::rgb(0xff, 0xff, 0xff),
            tick: Rgba::rgb(0xcc, 0xcc, 0xcc),
            placeholder: Rgba::rgb(0xcc, 0xcc, 0xcc),
            box_fill: Rgba::argb(200, 0x00, 0xaa, 0xff),
            box_stroke: Rgba::rgb(0xff, 0xff, 0xff),
            median: Rgba::rgb(0xff, 0xff, 0x00),
            whisker: Rgba::rgb(0xff, 0xff, 0xff),
            mean_marker: Rgba::rgb(0x00, 0xff, 0x00),
            reference_marker: Rgba::rgb(0xff, 0x00, 0x00),
            trendline: Rgba::rgb(0x00, 0xff, 0xff),
            bracket: Rgba::rgb(0xff, 0xff, 0xff),
            highlight: Rgba::argb(80, 0xff, 0xff, 0x00),
            tooltip_fill: Rgba::rgb(0x11, 0x11, 0x11),
            tooltip_text: Rgba::rgb(0xff, 0xff, 0xff),
            palette: DARK_PALETTE,
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name)).unwrap_or_else(Theme::dark)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Demographic {
    White,
    Black,
    Latino,
    Asian,
    Other,
}

impl Demographic {
    pub fn color(self) -> Rgba {
        match self {
            Demographic::White => Rgba::rgb(141, 160, 203),
            Demographic::Black => Rgba::rgb(102, 194, 165),
            Demographic::Latino => Rgba::rgb(252, 141, 98),
            Demographic::Asian => Rgba::rgb(231, 138, 195),
            Demographic::Other => Rgba::rgb(166, 216, 84),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Party {
    Democratic,
    Republican,
}

impl Party {
    pub fn color(self) -> Rgba {
        match self {
            Party::Democratic => Rgba::rgb(37, 99, 235),
            Party::Republican => Rgba::rgb(220, 38, 38),
        }
    }
}

/// A series key the palette knows a fixed color for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    Demographic(Demographic),
    Party(Party),
}

impl Group {
    pub fn color(self) -> Rgba {
        match self {
            Group::Demographic(d) => d.color(),
            Group::Party(p) => p.color(),
        }
    }
}

impl FromStr for Group {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_prefix("pct_").unwrap_or(&key);
        Ok(match key {
            "white" => Group::Demographic(Demographic::White),
            "black" | "african_american" => Group::Demographic(Demographic::Black),
            "latino" | "hispanic" => Group::Demographic(Demographic::Latino),
            "asian" => Group::Demographic(Demographic::Asian),
            "other" => Group::Demographic(Demographic::Other),
            "d" | "dem" | "democratic" | "democrat" => Group::Party(Party::Democratic),
            "r" | "rep" | "republican" => Group::Party(Party::Republican),
            _ => return Err(()),
        })
    }
}

/// One color per series id, pairwise distinct while the palette lasts.
///
/// Known groups keep their fixed color; other ids take the next unused palette entry.
pub fn assign_colors<S: AsRef<str>>(ids: &[S], theme: &Theme) -> Vec<Rgba> {
    let mut used: Vec<Rgba> = Vec::with_capacity(ids.len());
    let mut next = 0usize;
    for id in ids {
        let fixed = id.as_ref().parse::<Group>().ok().map(Group::color).filter(|c| !used.contains(c));
        let color = fixed.unwrap_or_else(|| {
            let palette = theme.palette;
            if palette.is_empty() {
                return theme.trendline;
            }
            for _ in 0..palette.len() {
                let c = palette[next % palette.len()];
                next += 1;
                if !used.contains(&c) {
                    return c;
                }
            }
            palette[used.len() % palette.len()]
        });
        used.push(color);
    }
    used
}
